mod support;

use anyhow::Result;
use common::ReplayError;
use support::*;
use terminal::replay::catalog::MatchCatalog;

#[test]
fn loads_entries_in_file_then_line_order() -> Result<()> {
    let fixture = LogFixture::new();
    fixture.write(
        "replays.20180224",
        &[index_line("1", "robo", EPOCH), index_line("2", "robo", "1519512400")],
    );
    fixture.write("replays.20180225", &[index_line("3", "other", "1519600000.5")]);
    fixture.write("luasnake.20180224", &[log_line("1", "robo", EPOCH, "{}")]);

    let catalog = MatchCatalog::load(&fixture.source().index_glob())?;
    let ids: Vec<&str> = catalog.entries().iter().map(|k| k.match_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(catalog.entries()[0], match_key("1", "robo", EPOCH));
    Ok(())
}

#[test]
fn malformed_lines_are_skipped_not_fatal() -> Result<()> {
    let fixture = LogFixture::new();
    fixture.write(
        "replays.1",
        &[
            "-- rotated --".to_string(),
            index_line("1", "robo", ""),
            "{\"log_id\": 12}".to_string(),
            "{truncated".to_string(),
            index_line("2", "robo", EPOCH),
        ],
    );
    fixture.write("replays.2", &[index_line("3", "robo", EPOCH)]);

    let catalog = MatchCatalog::load(&fixture.source().index_glob())?;
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.skipped(), 4);
    Ok(())
}

#[test]
fn no_index_files_is_no_matches_found() {
    let fixture = LogFixture::new();
    let err = MatchCatalog::load(&fixture.source().index_glob()).unwrap_err();
    assert!(matches!(err, ReplayError::NoMatchesFound { .. }));
}

#[test]
fn index_files_without_entries_is_no_matches_found() {
    let fixture = LogFixture::new();
    fixture.write("replays.1", &["nothing here".to_string()]);
    let err = MatchCatalog::load(&fixture.source().index_glob()).unwrap_err();
    assert!(matches!(err, ReplayError::NoMatchesFound { .. }));
}
