use chrono::NaiveDate;
use serde::Serialize;
use trackjoin_catalog::normalize::normalize_str;
use trackjoin_catalog::types::*;
use trackjoin_tables::TableRow;
use trackjoin_tables::schema::*;

/// Header that serde derives from the row type's field order.
fn derived_header<T: Serialize>(row: &T) -> Vec<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.serialize(row).unwrap();
    let bytes = wtr.into_inner().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    let first = text.lines().next().unwrap();
    first.split(',').map(str::to_string).collect()
}

fn assert_layout<T: TableRow>(row: &T) {
    assert_eq!(
        derived_header(row),
        T::SPEC.columns,
        "field order of {} drifted from its column list",
        T::SPEC.name
    );
}

#[test]
fn artist_layout() {
    assert_layout(&Artist {
        artist_id: 1,
        artist_name: "Adele".into(),
        normalized_artist_name: normalize_str("Adele"),
    });
}

#[test]
fn genre_layout() {
    assert_layout(&Genre {
        genre_id: 1,
        genre_name: "Pop".into(),
    });
}

#[test]
fn track_layout() {
    assert_layout(&Track {
        spotify_id: "T1".into(),
        track_name: "Easy On Me".into(),
        normalized_track_name: normalize_str("Easy On Me"),
        artist_id: 1,
        popularity: 90,
        duration_ms: 224_000,
        explicit: false,
    });
}

#[test]
fn audio_features_layout() {
    assert_layout(&AudioFeatures::new("T1", &AudioMeasurements::default()));
}

#[test]
fn track_genre_layout() {
    assert_layout(&TrackGenre {
        track_genre_id: 1,
        spotify_id: "T1".into(),
        genre_id: 1,
    });
}

#[test]
fn chart_entry_layout() {
    assert_layout(&ChartEntry {
        chart_id: 1,
        chart_date: NaiveDate::from_ymd_opt(2021, 11, 6).unwrap(),
        chart_rank: 1,
        song_title: "Easy On Me".into(),
        artist_name: "Adele".into(),
        last_week: 1,
        peak_rank: 1,
        weeks_on_board: 3,
    });
}

#[test]
fn chart_link_layout() {
    assert_layout(&ChartTrackLink {
        join_id: 1,
        spotify_id: "T1".into(),
        chart_id: 1,
        clean_song_title: normalize_str("Easy On Me"),
        clean_artist_name: normalize_str("Adele"),
    });
}

#[test]
fn emit_order_puts_dimensions_first() {
    let names: Vec<&str> = EMIT_ORDER.iter().map(|spec| spec.name).collect();
    assert_eq!(
        names,
        vec![
            "artists",
            "genres",
            "tracks",
            "audio_features",
            "track_genres",
            "billboard_charts",
            "song_join",
            "users",
            "playlists",
            "playlist_tracks",
        ]
    );
}

#[test]
fn placeholders_are_the_application_tables() {
    assert_eq!(PLACEHOLDERS, &[USERS, PLAYLISTS, PLAYLIST_TRACKS]);
    assert_eq!(USERS.file_name(), "users.csv");
}
