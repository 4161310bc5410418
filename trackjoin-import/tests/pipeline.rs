use std::fs;
use std::path::Path;

use trackjoin_catalog::types::*;
use trackjoin_import::*;
use trackjoin_source::{read_catalog, read_charts};

const CATALOG_HEADER: &str = "track_id,track_name,artist_name,genre,popularity";
const CHART_HEADER: &str = "date,rank,song,artist,last-week,peak-rank,weeks-on-board";

fn catalog(rows: &[&str]) -> Vec<CatalogRecord> {
    let csv = format!("{CATALOG_HEADER}\n{}\n", rows.join("\n"));
    read_catalog(csv.as_bytes()).unwrap().records
}

fn charts(rows: &[&str]) -> Vec<ChartRecord> {
    let csv = format!("{CHART_HEADER}\n{}\n", rows.join("\n"));
    read_charts(csv.as_bytes()).unwrap().records
}

fn build(catalog_rows: &[&str], chart_rows: &[&str]) -> BuiltTables {
    build_tables(&catalog(catalog_rows), &charts(chart_rows), None).unwrap()
}

fn write_inputs(dir: &Path, catalog_rows: &[&str], chart_rows: &[&str]) -> RunOptions {
    let catalog_path = dir.join("SpotifyFeatures.csv");
    let charts_path = dir.join("charts.csv");
    fs::write(
        &catalog_path,
        format!("{CATALOG_HEADER}\n{}\n", catalog_rows.join("\n")),
    )
    .unwrap();
    fs::write(
        &charts_path,
        format!("{CHART_HEADER}\n{}\n", chart_rows.join("\n")),
    )
    .unwrap();
    RunOptions {
        catalog_path,
        charts_path,
        out_dir: dir.join("cleaned_data"),
    }
}

// ── Reconciliation ──────────────────────────────────────────────────────────

#[test]
fn featured_artist_chart_row_links_to_remix() {
    let built = build(
        &["T1,Hello World (Remix),Jane Doe,Pop,50"],
        &["2021-11-06,1,Hello World,Jane Doe feat. Someone,0,1,1"],
    );

    let links = &built.tables.chart_links;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].join_id, 1);
    assert_eq!(links[0].spotify_id, "T1");
    assert_eq!(links[0].chart_id, 1);
    assert_eq!(links[0].clean_song_title, "hello world");
    assert_eq!(links[0].clean_artist_name, "jane doe");
    assert_eq!(built.reconcile.matched_rows, 1);
    assert_eq!(built.reconcile.unmatched_rows, 0);
}

#[test]
fn chart_row_matching_two_tracks_yields_two_links() {
    let built = build(
        &[
            "T1,Same Song,Same Artist,Pop,1",
            "T2,Same Song (Live),Same Artist,Rock,1",
        ],
        &["2021-11-06,1,Same Song,Same Artist,0,1,1"],
    );

    let linked: Vec<(&str, u32, u32)> = built
        .tables
        .chart_links
        .iter()
        .map(|l| (l.spotify_id.as_str(), l.chart_id, l.join_id))
        .collect();
    assert_eq!(linked, vec![("T1", 1, 1), ("T2", 1, 2)]);
    assert_eq!(built.reconcile.multi_match_rows, 1);
    assert_eq!(built.reconcile.links, 2);
}

#[test]
fn join_ids_follow_chart_order() {
    let built = build(
        &["T1,Alpha,Band,Pop,1", "T2,Beta,Band,Pop,1"],
        &[
            "2021-11-06,1,Beta,Band,0,1,1",
            "2021-11-06,2,Nothing Here,Nobody,0,2,1",
            "2021-11-13,1,Alpha,Band,0,1,1",
        ],
    );

    let linked: Vec<(u32, &str, u32)> = built
        .tables
        .chart_links
        .iter()
        .map(|l| (l.join_id, l.spotify_id.as_str(), l.chart_id))
        .collect();
    assert_eq!(linked, vec![(1, "T2", 1), (2, "T1", 3)]);
    assert_eq!(built.reconcile.unmatched_rows, 1);
    assert_eq!(built.reconcile.chart_rows, 3);
}

#[test]
fn unparseable_chart_date_contributes_nothing() {
    let built = build(
        &["T1,Song,Artist,Pop,1"],
        &[
            "not-a-date,1,Song,Artist,0,1,1",
            "2021-11-06,2,Song,Artist,0,2,1",
        ],
    );

    assert_eq!(built.tables.chart_entries.len(), 1);
    assert_eq!(built.tables.chart_entries[0].chart_id, 1);
    assert_eq!(built.tables.chart_entries[0].chart_rank, 2);
    assert_eq!(built.tables.chart_links.len(), 1);
    assert_eq!(built.tables.chart_links[0].chart_id, 1);
}

#[test]
fn case_variant_artists_stay_separate_but_both_join() {
    let built = build(
        &["T1,Song,Jane Doe,Pop,1", "T2,Song,jane doe,Pop,1"],
        &["2021-11-06,1,Song,JANE DOE,0,1,1"],
    );

    assert_eq!(built.tables.artists.len(), 2);
    assert_eq!(built.artist_key_collisions, 2);
    assert_eq!(built.tables.tracks[0].artist_id, 1);
    assert_eq!(built.tables.tracks[1].artist_id, 2);
    assert_eq!(built.tables.chart_links.len(), 2);
}

// ── Dimensions and facts ────────────────────────────────────────────────────

#[test]
fn dimension_ids_follow_first_appearance() {
    let built = build(
        &[
            "T1,One,Beta,Rock,1",
            "T2,Two,Alpha,Pop,1",
            "T3,Three,Beta,Rock,1",
        ],
        &[],
    );

    let artists: Vec<(u32, &str)> = built
        .tables
        .artists
        .iter()
        .map(|a| (a.artist_id, a.artist_name.as_str()))
        .collect();
    assert_eq!(artists, vec![(1, "Beta"), (2, "Alpha")]);

    let genres: Vec<(u32, &str)> = built
        .tables
        .genres
        .iter()
        .map(|g| (g.genre_id, g.genre_name.as_str()))
        .collect();
    assert_eq!(genres, vec![(1, "Rock"), (2, "Pop")]);

    let artist_ids: Vec<u32> = built.tables.tracks.iter().map(|t| t.artist_id).collect();
    assert_eq!(artist_ids, vec![1, 2, 1]);
}

#[test]
fn missing_genre_produces_no_track_genre() {
    let built = build(&["T1,One,A,,1", "T2,Two,A,Pop,1"], &[]);

    assert_eq!(built.tables.tracks.len(), 2);
    assert_eq!(built.tables.audio_features.len(), 2);
    assert_eq!(
        built.tables.track_genres,
        vec![TrackGenre {
            track_genre_id: 1,
            spotify_id: "T2".into(),
            genre_id: 1,
        }]
    );
}

#[test]
fn duplicate_ids_contribute_one_track() {
    let built = build(&["T1,First,A,Pop,10", "T1,Second,B,Rock,20"], &[]);

    assert_eq!(built.tables.tracks.len(), 1);
    assert_eq!(built.tables.tracks[0].track_name, "First");
    assert_eq!(built.tables.tracks[0].popularity, 10);
    assert_eq!(built.tables.artists.len(), 1);
    assert_eq!(built.tables.genres.len(), 1);
}

#[test]
fn tracks_are_never_explicit() {
    let built = build(&["T1,One,A,Pop,1"], &[]);
    assert!(built.tables.tracks.iter().all(|t| !t.explicit));
}

#[test]
fn row_counts_are_conserved() {
    let built = build(
        &[
            "T1,One,A,Pop,1",
            "T2,Two,B,,1",
            "T3,Three,C,Rock,1",
            "T2,Dup,B,Pop,1",
        ],
        &["2021-11-06,1,One,A,0,1,1"],
    );

    let counts = TableCounts::of(&built.tables);
    assert_eq!(counts.tracks, 3);
    assert_eq!(counts.audio_features, counts.tracks);
    assert!(counts.track_genres <= counts.tracks);
    assert_eq!(counts.track_genres, 2);
    assert_eq!(counts.billboard_charts, 1);
    assert_eq!(counts.song_join, 1);
}

#[test]
fn built_tables_pass_integrity() {
    let built = build(
        &["T1,One,A,Pop,1", "T2,Two,B,Rock,1"],
        &["2021-11-06,1,One,A,0,1,1", "2021-11-06,2,Two,B,0,2,1"],
    );
    assert_eq!(check_integrity(&built.tables), Ok(()));
}

#[test]
fn track_with_unknown_artist_is_fatal() {
    let records = catalog(&["T1,One,A,Pop,1"]);
    let artists = build_artists(&[]);
    match build_tracks(&records, &artists) {
        Err(ImportError::MissingArtist {
            track_id,
            artist_name,
        }) => {
            assert_eq!(track_id, "T1");
            assert_eq!(artist_name, "A");
        }
        other => panic!("expected MissingArtist, got {other:?}"),
    }
}

#[test]
fn track_genre_with_unknown_genre_is_fatal() {
    let records = catalog(&["T1,One,A,Pop,1"]);
    let artists = build_artists(&records);
    let tracks = build_tracks(&records, &artists).unwrap();
    let valid = valid_track_ids(&tracks);
    let genres = build_genres(&[]);
    assert!(matches!(
        build_track_genres(&records, &valid, &genres),
        Err(ImportError::MissingGenre { .. })
    ));
}

// ── Full runs ───────────────────────────────────────────────────────────────

#[test]
fn run_writes_every_table() {
    let tmp = tempfile::tempdir().unwrap();
    let options = write_inputs(
        tmp.path(),
        &["T1,Hello World (Remix),Jane Doe,Pop,50"],
        &["2021-11-06,1,Hello World,Jane Doe feat. Someone,0,1,1"],
    );

    let report = run(&options, Some(&SilentProgress)).unwrap();
    assert_eq!(report.tables.tracks, 1);
    assert_eq!(report.tables.song_join, 1);
    assert_eq!(report.catalog.kept, 1);
    assert_eq!(report.charts.kept, 1);

    for spec in trackjoin_tables::EMIT_ORDER {
        assert!(
            options.out_dir.join(spec.file_name()).is_file(),
            "{} missing",
            spec.name
        );
    }
    let join = fs::read_to_string(options.out_dir.join("song_join.csv")).unwrap();
    assert_eq!(
        join,
        "join_id,spotify_id,chart_id,clean_song_title,clean_artist_name\n1,T1,1,hello world,jane doe\n"
    );
}

#[test]
fn runs_are_byte_identical() {
    let catalog_rows = [
        "T1,Hello World (Remix),Jane Doe,Pop,50",
        "T2,Other,Someone Else,Rock,10",
        "T3,Third,Jane Doe,,5",
    ];
    let chart_rows = [
        "2021-11-06,1,Hello World,Jane Doe feat. Someone,0,1,1",
        "2021-11-06,2,Other,Someone Else,0,2,3",
    ];

    let first = tempfile::tempdir().unwrap();
    let second = tempfile::tempdir().unwrap();
    let a = write_inputs(first.path(), &catalog_rows, &chart_rows);
    let b = write_inputs(second.path(), &catalog_rows, &chart_rows);
    run(&a, Some(&LogProgress)).unwrap();
    run(&b, None).unwrap();

    for spec in trackjoin_tables::EMIT_ORDER {
        assert_eq!(
            fs::read(a.out_dir.join(spec.file_name())).unwrap(),
            fs::read(b.out_dir.join(spec.file_name())).unwrap(),
            "{} differs",
            spec.name
        );
    }
}

#[test]
fn missing_chart_file_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let mut options = write_inputs(tmp.path(), &["T1,One,A,Pop,1"], &[]);
    options.charts_path = tmp.path().join("absent.csv");

    assert!(matches!(
        run(&options, None),
        Err(ImportError::Source(_))
    ));
    assert!(!options.out_dir.exists());
}

#[test]
fn empty_catalog_writes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let options = write_inputs(tmp.path(), &[",,,,"], &["2021-11-06,1,Song,Artist,0,1,1"]);

    assert!(matches!(
        run(&options, None),
        Err(ImportError::Source(_))
    ));
    assert!(!options.out_dir.exists());
}

#[test]
fn empty_chart_feed_still_emits() {
    let tmp = tempfile::tempdir().unwrap();
    let options = write_inputs(tmp.path(), &["T1,One,A,Pop,1"], &[]);

    let report = run(&options, None).unwrap();
    assert_eq!(report.tables.billboard_charts, 0);
    assert_eq!(report.tables.song_join, 0);
    assert_eq!(report.reconcile, ReconcileStats::default());
}
