use std::io::Write;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use trackjoin_catalog::normalize_str;

use crate::error::CliError;

/// Print the normalized join key of each input.
///
/// Keys go to stdout rather than the log, so `--quiet` does not hide them.
pub(crate) fn run_normalize(text: &[String]) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    write_keys(&mut out, text)?;
    Ok(())
}

fn write_keys(out: &mut impl Write, text: &[String]) -> std::io::Result<()> {
    for input in text {
        let key = normalize_str(input);
        writeln!(
            out,
            "{} {} {}",
            input,
            "->".if_supports_color(Stdout, |t| t.dimmed()),
            format!("{:?}", key.as_str()).if_supports_color(Stdout, |t| t.cyan()),
        )?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_keys_one_line_per_input() {
        let mut buf = Vec::new();
        let inputs = vec!["Hello (Remix)".to_string(), "Jane Doe ft. X".to_string()];
        write_keys(&mut buf, &inputs).unwrap();

        let text = String::from_utf8(strip_ansi_escapes::strip(&buf)).unwrap();
        assert_eq!(
            text,
            "Hello (Remix) -> \"hello\"\nJane Doe ft. X -> \"jane doe\"\n"
        );
    }
}
