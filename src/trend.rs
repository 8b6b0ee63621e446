use crate::history::ScoreEntry;
use crate::util::mean;
use chrono::Datelike;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Trend {
    Improving,
    Declining,
}

/// Per-ISO-week average scores, oldest week first. Key is (iso year, week).
pub fn weekly_averages(entries: &[ScoreEntry]) -> Vec<((i32, u32), f64)> {
    let mut buckets: BTreeMap<(i32, u32), Vec<f64>> = BTreeMap::new();
    for e in entries {
        let week = e.date.iso_week();
        buckets
            .entry((week.year(), week.week()))
            .or_default()
            .push(e.score as f64);
    }
    buckets
        .into_iter()
        .filter_map(|(key, scores)| mean(&scores).map(|avg| (key, avg)))
        .collect()
}

/// Whether the latest week's average has caught up with the earliest
/// week's. Needs at least two weeks of entries to say anything.
pub fn weekly_trend(entries: &[ScoreEntry]) -> Option<Trend> {
    let averages = weekly_averages(entries);
    if averages.len() < 2 {
        return None;
    }
    let first = averages.first()?.1;
    let last = averages.last()?.1;
    Some(if last >= first {
        Trend::Improving
    } else {
        Trend::Declining
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Local};

    fn entry(score: i32, weeks_ago: i64) -> ScoreEntry {
        ScoreEntry::with_date(
            "p",
            "solo",
            score,
            Local::now() - Duration::weeks(weeks_ago),
        )
    }

    #[test]
    fn test_no_trend_for_empty_entries() {
        assert_eq!(weekly_trend(&[]), None);
    }

    #[test]
    fn test_no_trend_for_single_week() {
        let entries = vec![entry(10, 0), entry(20, 0)];
        assert_eq!(weekly_trend(&entries), None);
    }

    #[test]
    fn test_improving_across_two_weeks() {
        let entries = vec![entry(10, 2), entry(30, 0)];
        assert_eq!(weekly_trend(&entries), Some(Trend::Improving));
    }

    #[test]
    fn test_declining_across_two_weeks() {
        let entries = vec![entry(30, 2), entry(10, 0)];
        assert_eq!(weekly_trend(&entries), Some(Trend::Declining));
    }

    #[test]
    fn test_equal_averages_count_as_improving() {
        let entries = vec![entry(20, 2), entry(20, 0)];
        assert_eq!(weekly_trend(&entries), Some(Trend::Improving));
    }

    #[test]
    fn test_middle_weeks_do_not_decide() {
        // Spike in the middle; only first and last weeks matter.
        let entries = vec![entry(10, 4), entry(100, 2), entry(15, 0)];
        assert_eq!(weekly_trend(&entries), Some(Trend::Improving));
    }

    #[test]
    fn test_weekly_averages_buckets_and_means() {
        let entries = vec![entry(10, 2), entry(20, 2), entry(40, 0)];
        let averages = weekly_averages(&entries);
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].1, 15.0);
        assert_eq!(averages[1].1, 40.0);
    }
}
