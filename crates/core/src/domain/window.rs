use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Reporting period a leaderboard snapshot covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeWindow {
    SevenDay,
    ThirtyDay,
    NinetyDay,
    OneEightyDay,
    ThreeSixtyFiveDay,
}

impl TimeWindow {
    /// Canonical order; search results always follow it.
    pub const ALL: [TimeWindow; 5] = [
        TimeWindow::SevenDay,
        TimeWindow::ThirtyDay,
        TimeWindow::NinetyDay,
        TimeWindow::OneEightyDay,
        TimeWindow::ThreeSixtyFiveDay,
    ];

    /// Key embedded in the snapshot resource name. Casing matters: the published
    /// files mix `7D` with `90d`.
    pub fn retrieval_key(self) -> &'static str {
        match self {
            TimeWindow::SevenDay => "7D",
            TimeWindow::ThirtyDay => "30D",
            TimeWindow::NinetyDay => "90d",
            TimeWindow::OneEightyDay => "180d",
            TimeWindow::ThreeSixtyFiveDay => "365d",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::SevenDay => "7D",
            TimeWindow::ThirtyDay => "30D",
            TimeWindow::NinetyDay => "3M",
            TimeWindow::OneEightyDay => "6M",
            TimeWindow::ThreeSixtyFiveDay => "12M",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for TimeWindow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl FromStr for TimeWindow {
    type Err = anyhow::Error;

    /// Accepts either the retrieval key or the display label, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        TimeWindow::ALL
            .into_iter()
            .find(|w| {
                w.retrieval_key().eq_ignore_ascii_case(needle)
                    || w.label().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| anyhow::anyhow!("unknown time window: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_display_mapping() {
        let labels: Vec<_> = TimeWindow::ALL.iter().map(|w| w.label()).collect();
        assert_eq!(labels, ["7D", "30D", "3M", "6M", "12M"]);
    }

    #[test]
    fn retrieval_keys_keep_published_casing() {
        let keys: Vec<_> = TimeWindow::ALL.iter().map(|w| w.retrieval_key()).collect();
        assert_eq!(keys, ["7D", "30D", "90d", "180d", "365d"]);
    }

    #[test]
    fn parses_keys_and_labels() {
        assert_eq!("90D".parse::<TimeWindow>().unwrap(), TimeWindow::NinetyDay);
        assert_eq!("3m".parse::<TimeWindow>().unwrap(), TimeWindow::NinetyDay);
        assert_eq!("12M".parse::<TimeWindow>().unwrap(), TimeWindow::ThreeSixtyFiveDay);
        assert_eq!(" 7d ".parse::<TimeWindow>().unwrap(), TimeWindow::SevenDay);
        assert!("1Y".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn serializes_as_label() {
        let v = serde_json::to_value(TimeWindow::OneEightyDay).unwrap();
        assert_eq!(v, serde_json::json!("6M"));
    }
}
