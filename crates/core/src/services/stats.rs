//! Shared counting and percentage helpers for the analysis rollups.

use std::collections::HashMap;

/// Round to 2 decimal places, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count occurrences of each name.
#[must_use]
pub fn count_names<'a, I>(names: I) -> HashMap<String, u64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, u64> = HashMap::new();
    for name in names {
        *counts.entry(name.to_owned()).or_insert(0) += 1;
    }
    counts
}

/// Convert counts to percentages of the total.
#[must_use]
pub fn percentages(counts: &HashMap<String, u64>) -> HashMap<String, f64> {
    let total: u64 = counts.values().sum();
    if total == 0 {
        return HashMap::new();
    }

    counts
        .iter()
        .map(|(name, &count)| (name.clone(), round2(count as f64 / total as f64 * 100.0)))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round2_is_half_away_from_zero() {
        assert_eq!(round2(33.335), 33.34);
        assert_eq!(round2(-33.335), -33.34);
        assert_eq!(round2(50.0), 50.0);
        assert_eq!(round2(100.0 / 3.0), 33.33);
    }

    #[test]
    fn counts_accumulate_per_name() {
        let counts = count_names(["Positive", "Negative", "Positive"]);
        assert_eq!(counts["Positive"], 2);
        assert_eq!(counts["Negative"], 1);
    }

    #[test]
    fn percentages_partition_to_one_hundred() {
        let counts = count_names(["A", "A", "B", "C", "C", "C"]);
        let pcts = percentages(&counts);

        let sum: f64 = pcts.values().sum();
        // Rounding tolerance: 0.01 per category.
        assert!((sum - 100.0).abs() <= 0.01 * pcts.len() as f64);
        assert_eq!(pcts["C"], 50.0);
        assert_eq!(pcts["A"], 33.33);
    }

    #[test]
    fn percentages_of_empty_counts_are_empty() {
        assert!(percentages(&HashMap::new()).is_empty());
    }
}
