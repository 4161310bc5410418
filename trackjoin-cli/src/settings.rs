//! Settings file and path resolution.
//!
//! The settings file lives at `~/.config/trackjoin/settings.toml`. Every path
//! resolves through the same chain: CLI flag, then settings file, then the
//! built-in default.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cli_types::BuildArgs;
use crate::error::CliError;

pub(crate) const DEFAULT_CATALOG: &str = "SpotifyFeatures.csv";
pub(crate) const DEFAULT_CHARTS: &str = "charts.csv";
pub(crate) const DEFAULT_OUT_DIR: &str = "cleaned_data";

/// Canonical path to the settings file: `~/.config/trackjoin/settings.toml`.
pub(crate) fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("trackjoin").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Settings {
    pub inputs: InputSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct InputSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charts: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct OutputSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<PathBuf>,
}

impl Settings {
    /// Settings holding the built-in defaults, as written by `config init`.
    pub(crate) fn defaults() -> Self {
        Self {
            inputs: InputSettings {
                catalog: Some(PathBuf::from(DEFAULT_CATALOG)),
                charts: Some(PathBuf::from(DEFAULT_CHARTS)),
            },
            output: OutputSettings {
                dir: Some(PathBuf::from(DEFAULT_OUT_DIR)),
                report: None,
            },
        }
    }
}

/// Load settings from `path`. A missing file yields empty settings.
pub(crate) fn load_settings(path: &Path) -> Result<Settings, CliError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => {
            return Err(CliError::config(format!(
                "cannot read {}: {}",
                path.display(),
                e
            )));
        }
    };
    toml::from_str(&contents)
        .map_err(|e| CliError::config(format!("invalid {}: {}", path.display(), e)))
}

/// Write the default settings to `path`. Returns `false` if a file already exists.
pub(crate) fn init_settings(path: &Path) -> Result<bool, CliError> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let serialized = toml::to_string_pretty(&Settings::defaults())
        .map_err(|e| CliError::config(e.to_string()))?;

    // Write atomically
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)?;
    std::fs::rename(&tmp, path)?;
    Ok(true)
}

// ── Resolution ──────────────────────────────────────────────────────────────

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueSource {
    Flag,
    SettingsFile,
    Default,
}

impl fmt::Display for ValueSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag => f.write_str("command line"),
            Self::SettingsFile => f.write_str("settings file"),
            Self::Default => f.write_str("default"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Resolved<T> {
    pub value: T,
    pub source: ValueSource,
}

fn resolve(flag: Option<&PathBuf>, setting: Option<&PathBuf>) -> Option<Resolved<PathBuf>> {
    if let Some(value) = flag {
        return Some(Resolved {
            value: value.clone(),
            source: ValueSource::Flag,
        });
    }
    setting.map(|value| Resolved {
        value: value.clone(),
        source: ValueSource::SettingsFile,
    })
}

fn resolve_or(
    flag: Option<&PathBuf>,
    setting: Option<&PathBuf>,
    default: &str,
) -> Resolved<PathBuf> {
    resolve(flag, setting).unwrap_or_else(|| Resolved {
        value: PathBuf::from(default),
        source: ValueSource::Default,
    })
}

/// Effective paths for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedPaths {
    pub catalog: Resolved<PathBuf>,
    pub charts: Resolved<PathBuf>,
    pub out_dir: Resolved<PathBuf>,
    /// Only set when a flag or the settings file asks for a report.
    pub report: Option<Resolved<PathBuf>>,
}

impl ResolvedPaths {
    pub(crate) fn resolve(args: &BuildArgs, settings: &Settings) -> Self {
        Self {
            catalog: resolve_or(
                args.catalog.as_ref(),
                settings.inputs.catalog.as_ref(),
                DEFAULT_CATALOG,
            ),
            charts: resolve_or(
                args.charts.as_ref(),
                settings.inputs.charts.as_ref(),
                DEFAULT_CHARTS,
            ),
            out_dir: resolve_or(
                args.out.as_ref(),
                settings.output.dir.as_ref(),
                DEFAULT_OUT_DIR,
            ),
            report: resolve(args.report.as_ref(), settings.output.report.as_ref()),
        }
    }
}
