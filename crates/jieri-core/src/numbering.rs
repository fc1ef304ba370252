//! Per-day numbering of festivals
//!
//! Several festivals can fall on the same day. Each one gets a 1-based
//! sequence number within its day so that `(date, sequence)` identifies
//! it uniquely inside one calendar.

use crate::types::{NumberedFestival, ParsedFestival};

/// Sort festivals by date and number them within each day.
///
/// The sort is stable: festivals sharing a date keep their input order and
/// are numbered `1..=n` in that order. Numbering restarts at 1 whenever the
/// date changes.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use jieri_core::numbering::number_festivals;
/// use jieri_core::ParsedFestival;
///
/// let day = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
/// let numbered = number_festivals(vec![
///     ParsedFestival::new("春节", day),
///     ParsedFestival::new("小年", day),
/// ]);
/// assert_eq!(numbered[0].sequence, 1);
/// assert_eq!(numbered[1].sequence, 2);
/// ```
pub fn number_festivals(mut festivals: Vec<ParsedFestival>) -> Vec<NumberedFestival> {
    festivals.sort_by_key(|festival| festival.date);

    let mut numbered = Vec::with_capacity(festivals.len());
    let mut run_start = 0usize;

    for (position, festival) in festivals.into_iter().enumerate() {
        let starts_new_day = numbered
            .last()
            .is_some_and(|previous: &NumberedFestival| previous.date() != festival.date);
        if starts_new_day {
            run_start = position;
        }

        // Position within the day, 1-based
        let sequence = (position - run_start + 1) as u32;
        numbered.push(NumberedFestival { festival, sequence });
    }

    numbered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::collections::{BTreeMap, HashSet};

    fn festival(name: &str, month: u32, day: u32) -> ParsedFestival {
        ParsedFestival::new(name, NaiveDate::from_ymd_opt(2024, month, day).unwrap())
    }

    fn summary(numbered: &[NumberedFestival]) -> Vec<(String, String, u32)> {
        numbered
            .iter()
            .map(|n| (n.name().to_string(), n.date_stamp(), n.sequence))
            .collect()
    }

    #[test]
    fn test_number_empty() {
        assert!(number_festivals(Vec::new()).is_empty());
    }

    #[test]
    fn test_number_single() {
        let numbered = number_festivals(vec![festival("元旦", 1, 1)]);
        assert_eq!(summary(&numbered), vec![("元旦".into(), "20240101".into(), 1)]);
    }

    #[test]
    fn test_number_same_day_keeps_input_order() {
        let numbered = number_festivals(vec![festival("春节", 2, 10), festival("小年", 2, 10)]);
        assert_eq!(
            summary(&numbered),
            vec![
                ("春节".into(), "20240210".into(), 1),
                ("小年".into(), "20240210".into(), 2),
            ]
        );
    }

    #[test]
    fn test_number_restarts_per_day_not_global() {
        let numbered = number_festivals(vec![
            festival("国庆节", 10, 1),
            festival("元旦", 1, 1),
            festival("世界音乐日", 10, 1),
            festival("腊八节", 1, 18),
            festival("国际老人节", 10, 1),
        ]);
        assert_eq!(
            summary(&numbered),
            vec![
                ("元旦".into(), "20240101".into(), 1),
                ("腊八节".into(), "20240118".into(), 1),
                ("国庆节".into(), "20241001".into(), 1),
                ("世界音乐日".into(), "20241001".into(), 2),
                ("国际老人节".into(), "20241001".into(), 3),
            ]
        );
    }

    #[test]
    fn test_number_interleaved_days_are_grouped() {
        let numbered = number_festivals(vec![
            festival("A", 3, 1),
            festival("B", 2, 1),
            festival("C", 3, 1),
            festival("D", 2, 1),
        ]);
        let names: Vec<_> = numbered.iter().map(|n| (n.name(), n.sequence)).collect();
        assert_eq!(names, vec![("B", 1), ("D", 2), ("A", 1), ("C", 2)]);
    }

    proptest! {
        #[test]
        fn prop_sequences_are_contiguous_per_day(days in proptest::collection::vec(1u32..=28, 0..60)) {
            let input: Vec<ParsedFestival> = days
                .iter()
                .enumerate()
                .map(|(i, d)| festival(&format!("节日{}", i), 5, *d))
                .collect();
            let numbered = number_festivals(input);

            // sorted by date
            prop_assert!(numbered.windows(2).all(|w| w[0].date() <= w[1].date()));

            // (date, sequence) unique across the output
            let pairs: HashSet<_> = numbered.iter().map(|n| (n.date(), n.sequence)).collect();
            prop_assert_eq!(pairs.len(), numbered.len());

            // each day with k festivals uses exactly 1..=k
            let mut per_day: BTreeMap<NaiveDate, Vec<u32>> = BTreeMap::new();
            for n in &numbered {
                per_day.entry(n.date()).or_default().push(n.sequence);
            }
            for sequences in per_day.values() {
                let expected: Vec<u32> = (1..=sequences.len() as u32).collect();
                prop_assert_eq!(sequences, &expected);
            }
        }

        #[test]
        fn prop_same_day_order_is_stable(days in proptest::collection::vec(1u32..=3, 0..30)) {
            let input: Vec<ParsedFestival> = days
                .iter()
                .enumerate()
                .map(|(i, d)| festival(&format!("{:03}", i), 7, *d))
                .collect();
            let numbered = number_festivals(input);

            for w in numbered.windows(2) {
                if w[0].date() == w[1].date() {
                    prop_assert!(w[0].name() < w[1].name());
                    prop_assert_eq!(w[0].sequence + 1, w[1].sequence);
                }
            }
        }
    }
}
