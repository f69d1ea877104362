use std::fmt::Write;
use yapcheck_core::lookup::{LookupError, LookupOutcome};

const RANK_WIDTH: usize = 11;
const MINDSHARE_WIDTH: usize = 11;

pub fn table(outcome: &LookupOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Username: {}", outcome.handle);
    let _ = writeln!(
        out,
        "{:<RANK_WIDTH$} {:<MINDSHARE_WIDTH$} {}",
        "Rank", "Mindshare", "Timeframe"
    );
    for row in &outcome.rows {
        // Not Found rows get a marker so they stand out without colour.
        let rank = if row.found {
            row.rank.clone()
        } else {
            format!("{}*", row.rank)
        };
        let _ = writeln!(
            out,
            "{:<RANK_WIDTH$} {:<MINDSHARE_WIDTH$} {}",
            rank, row.mindshare, row.timeframe
        );
    }
    out
}

pub fn invalid(err: &LookupError) -> String {
    format!("Username: {}\n{}\n", err.title(), err.hint())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use yapcheck_core::domain::{ParticipantRecord, TimeWindow};
    use yapcheck_core::lookup::LookupEngine;
    use yapcheck_core::storage::SnapshotStore;

    #[test]
    fn renders_rows_in_window_order() {
        let store = SnapshotStore::new();
        store.insert_records(
            TimeWindow::SevenDay,
            vec![ParticipantRecord {
                username: "TheGreatOla".into(),
                user_id: "1".into(),
                rank: 5,
                mindshare: 0.021,
            }],
        );
        let outcome = LookupEngine::new(Arc::new(store))
            .lookup("@thegreatola")
            .unwrap();

        let text = table(&outcome);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "Username: TheGreatOla");
        assert!(lines[2].starts_with("#5"));
        assert!(lines[2].contains("2.1000%"));
        assert!(lines[2].ends_with("7D"));
        assert!(lines[3].starts_with("Not Found*"));
        assert!(lines[6].ends_with("12M"));
    }

    #[test]
    fn renders_hint_for_invalid_query() {
        let err = yapcheck_core::lookup::parse_query("thegreatola").unwrap_err();
        assert_eq!(
            invalid(&err),
            "Username: Invalid Format\nPlease add @ before the username (e.g., @thegreatola)\n"
        );
    }
}
