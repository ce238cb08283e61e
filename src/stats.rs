//! Sample statistics
//! Outlier-trimmed min/max/avg over one test case's ops/s samples

/// Fewest samples for which trimming one low and one high value leaves data
pub const MIN_SAMPLES: usize = 3;

/// Summary of one test case's throughput samples (ops/s)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpsStat {
    pub min: u64,
    pub max: u64,
    pub avg: f64,
}

impl OpsStat {
    /// Drop the single lowest and single highest sample, then summarise the rest.
    ///
    /// `avg` divides the trimmed sum by the *untrimmed* sample count, so it
    /// reads slightly low against a plain mean of the trimmed set. Report
    /// figures depend on that formula.
    ///
    /// Returns `None` for fewer than [`MIN_SAMPLES`] values.
    pub fn from_ops(ops: &[u64]) -> Option<Self> {
        if ops.len() < MIN_SAMPLES {
            return None;
        }

        let mut sorted = ops.to_vec();
        sorted.sort_unstable();
        let trimmed = &sorted[1..sorted.len() - 1];

        let sample = ops.len() as f64;
        let mut stat = OpsStat {
            min: u64::MAX,
            max: 0,
            avg: 0.0,
        };
        for &op in trimmed {
            stat.min = stat.min.min(op);
            stat.max = stat.max.max(op);
            stat.avg += op as f64 / sample;
        }

        Some(stat)
    }
}

impl std::fmt::Display for OpsStat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "min: {} ops/s, max: {} ops/s, avg: {:.2} ops/s",
            self.min, self.max, self.avg
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_biased_average() {
        let stat = OpsStat::from_ops(&[10, 20, 30, 40, 50]).unwrap();
        assert_eq!(stat.min, 20);
        assert_eq!(stat.max, 40);
        assert!((stat.avg - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_numeric_sort() {
        // lexicographic ordering would treat 100 as smaller than 9
        let stat = OpsStat::from_ops(&[9, 100, 50, 1000]).unwrap();
        assert_eq!(stat.min, 50);
        assert_eq!(stat.max, 100);
        assert!((stat.avg - 37.5).abs() < 1e-9);
    }

    #[test]
    fn test_trims_only_one_duplicate() {
        let stat = OpsStat::from_ops(&[5, 5, 5, 7, 7]).unwrap();
        assert_eq!(stat.min, 5);
        assert_eq!(stat.max, 7);
    }

    #[test]
    fn test_too_few_samples() {
        assert_eq!(OpsStat::from_ops(&[]), None);
        assert_eq!(OpsStat::from_ops(&[1]), None);
        assert_eq!(OpsStat::from_ops(&[1, 2]), None);
        assert!(OpsStat::from_ops(&[1, 2, 3]).is_some());
    }

    #[test]
    fn test_display() {
        let stat = OpsStat { min: 1, max: 3, avg: 1.2 };
        assert_eq!(stat.to_string(), "min: 1 ops/s, max: 3 ops/s, avg: 1.20 ops/s");
    }

    proptest! {
        #[test]
        fn prop_bounds(ops in prop::collection::vec(0u64..10_000_000, 3..64)) {
            let stat = OpsStat::from_ops(&ops).unwrap();
            let lo = *ops.iter().min().unwrap();
            let hi = *ops.iter().max().unwrap();

            prop_assert!(stat.min <= stat.max);
            prop_assert!(lo <= stat.min && stat.min <= hi);
            prop_assert!(lo <= stat.max && stat.max <= hi);
        }

        #[test]
        fn prop_order_independent(
            (ops, shuffled) in prop::collection::vec(0u64..10_000_000, 3..64)
                .prop_flat_map(|ops| (Just(ops.clone()), Just(ops).prop_shuffle()))
        ) {
            let a = OpsStat::from_ops(&ops).unwrap();
            let b = OpsStat::from_ops(&shuffled).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
