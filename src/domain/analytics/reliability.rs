use crate::domain::race::{DnfCategory, RaceResult, is_dnf, round_to, safe_divide};
use serde::Serialize;
use std::collections::BTreeMap;

/// Non-finish rate and cause breakdown.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DnfReport {
    pub dnf_percentage: f64,
    pub dnf_count: usize,
    pub total_races: usize,
    /// Only categories that occurred are present.
    pub dnf_causes: BTreeMap<DnfCategory, usize>,
}

/// DNF rate over all races, classifying each non-finish cause.
pub fn dnf_rate(results: &[RaceResult]) -> DnfReport {
    let mut dnf_count = 0;
    let mut dnf_causes: BTreeMap<DnfCategory, usize> = BTreeMap::new();

    for race in results {
        let status = race.status();
        if is_dnf(status) {
            dnf_count += 1;
            *dnf_causes.entry(DnfCategory::classify(status)).or_insert(0) += 1;
        }
    }

    let total_races = results.len();
    let dnf_percentage = round_to(
        safe_divide((dnf_count * 100) as f64, total_races as f64, 0.0),
        1,
    );

    DnfReport {
        dnf_percentage,
        dnf_count,
        total_races,
        dnf_causes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::race::DriverResult;

    fn race(round: u32, result: DriverResult) -> RaceResult {
        RaceResult::new(round, &format!("Race {}", round), None, result)
    }

    #[test]
    fn test_no_dnfs() {
        let results: Vec<RaceResult> = (1..=5)
            .map(|i| race(i, DriverResult::finished(i, 10.0, i)))
            .collect();

        let report = dnf_rate(&results);
        assert_eq!(report.dnf_count, 0);
        assert_eq!(report.dnf_percentage, 0.0);
        assert_eq!(report.total_races, 5);
        assert!(report.dnf_causes.is_empty());
    }

    #[test]
    fn test_all_dnfs() {
        let results = vec![
            race(1, DriverResult::retired("Engine", 1)),
            race(2, DriverResult::retired("Accident", 2)),
            race(3, DriverResult::retired("Gearbox", 3)),
        ];

        let report = dnf_rate(&results);
        assert_eq!(report.dnf_count, 3);
        assert_eq!(report.dnf_percentage, 100.0);
        assert_eq!(report.total_races, 3);
    }

    #[test]
    fn test_cause_categorization() {
        let results = vec![
            race(1, DriverResult::retired("Engine", 1)),
            race(2, DriverResult::retired("Gearbox", 2)),
            race(3, DriverResult::retired("Accident", 3)),
            race(4, DriverResult::retired("Collision", 4)),
            race(5, DriverResult::retired("Retired", 5)),
            race(6, DriverResult::retired("Electrical", 6)),
        ];

        let report = dnf_rate(&results);
        assert_eq!(report.dnf_count, 6);
        assert_eq!(report.dnf_causes[&DnfCategory::Mechanical], 3);
        assert_eq!(report.dnf_causes[&DnfCategory::Accident], 2);
        assert_eq!(report.dnf_causes[&DnfCategory::Other], 1);
        assert_eq!(report.dnf_causes.values().sum::<usize>(), report.dnf_count);
    }

    #[test]
    fn test_lapped_finish_counts_as_other() {
        let results = vec![
            race(1, DriverResult::finished(1, 25.0, 1)),
            race(2, DriverResult::finished(14, 0.0, 12).with_status("+1 Lap")),
            race(3, DriverResult::finished(2, 18.0, 2)),
        ];

        let report = dnf_rate(&results);
        assert_eq!(report.dnf_count, 1);
        assert_eq!(report.dnf_percentage, 33.3);
        assert_eq!(report.dnf_causes.get(&DnfCategory::Other), Some(&1));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(dnf_rate(&[]), DnfReport::default());
    }
}
