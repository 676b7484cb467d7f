//! Fixed-range histogram of sleep session durations.

use crate::api::DurationBin;
use crate::models::DurationSession;

/// Histogram labels, in display order.
pub const DURATION_BUCKET_LABELS: [&str; 6] = ["<10", "11-20", "21-30", "31-40", "41-50", ">50"];

/// Inclusive upper bounds of every bucket but the last.
const UPPER_BOUNDS: [f64; 5] = [10.0, 20.0, 30.0, 40.0, 50.0];

/// Position of a duration in [`DURATION_BUCKET_LABELS`].
///
/// The first bound the duration does not exceed wins. A missing duration
/// compares false against every bound and lands in the last bucket.
pub fn bucket_index(duration_seconds: Option<f64>) -> usize {
    duration_seconds
        .and_then(|d| UPPER_BOUNDS.iter().position(|bound| d <= *bound))
        .unwrap_or(UPPER_BOUNDS.len())
}

/// Count sessions per duration range.
///
/// Every label is present in the result, in display order. Sessions are
/// counted, not deduplicated by id.
pub fn bucket_durations(sessions: &[DurationSession]) -> Vec<DurationBin> {
    let mut counts = [0usize; 6];
    for session in sessions {
        counts[bucket_index(session.duration_seconds)] += 1;
    }

    DURATION_BUCKET_LABELS
        .iter()
        .zip(counts)
        .map(|(label, count)| DurationBin {
            label: label.to_string(),
            count,
        })
        .collect()
}

/// True when no bucket has any session.
pub fn is_empty_histogram(bins: &[DurationBin]) -> bool {
    bins.iter().all(|bin| bin.count == 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DateKey;
    use proptest::prelude::*;

    fn sessions(durations: &[Option<f64>]) -> Vec<DurationSession> {
        durations
            .iter()
            .enumerate()
            .map(|(i, d)| DurationSession::new(format!("s{}", i), DateKey::new("2024-01-01"), *d))
            .collect()
    }

    fn counts(bins: &[DurationBin]) -> Vec<usize> {
        bins.iter().map(|b| b.count).collect()
    }

    #[test]
    fn test_inclusive_upper_bounds() {
        let bins = bucket_durations(&sessions(&[
            Some(5.0),
            Some(10.0),
            Some(11.0),
            Some(25.0),
            Some(60.0),
        ]));
        assert_eq!(counts(&bins), vec![2, 1, 1, 0, 0, 1]);
    }

    #[test]
    fn test_labels_in_fixed_order() {
        let bins = bucket_durations(&[]);
        let labels: Vec<&str> = bins.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, DURATION_BUCKET_LABELS.to_vec());
        assert!(is_empty_histogram(&bins));
    }

    #[test]
    fn test_edges_between_buckets() {
        assert_eq!(bucket_index(Some(20.0)), 1);
        assert_eq!(bucket_index(Some(20.5)), 2);
        assert_eq!(bucket_index(Some(50.0)), 4);
        assert_eq!(bucket_index(Some(50.01)), 5);
    }

    #[test]
    fn test_negative_durations_fall_in_first_bucket() {
        assert_eq!(bucket_index(Some(-3.0)), 0);
    }

    #[test]
    fn test_missing_duration_falls_in_last_bucket() {
        assert_eq!(bucket_index(None), 5);
    }

    #[test]
    fn test_duplicate_ids_are_counted_twice() {
        let mut list = sessions(&[Some(15.0)]);
        list.push(list[0].clone());
        assert_eq!(bucket_durations(&list)[1].count, 2);
    }

    proptest! {
        #[test]
        fn prop_counts_sum_to_session_count(durations in proptest::collection::vec(-10.0..100.0f64, 0..50)) {
            let list = sessions(&durations.iter().copied().map(Some).collect::<Vec<_>>());
            let total: usize = bucket_durations(&list).iter().map(|b| b.count).sum();
            prop_assert_eq!(total, list.len());
        }
    }
}
