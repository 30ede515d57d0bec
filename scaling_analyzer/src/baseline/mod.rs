//!
//! The baseline resolver.
//!

use crate::model::record::BenchmarkRecord;
use crate::model::record::Version;

///
/// Baseline resolution error.
///
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No sequential record exists for the requested problem size.
    #[error("Missing sequential baseline for n_bats={n_bats} iters={iters}")]
    MissingSequentialBaseline {
        /// The number of work units of the requested size.
        n_bats: u64,
        /// The number of iterations of the requested size.
        iters: u64,
    },
}

///
/// The noise-reduction policy applied when several candidate baseline times
/// exist for the same key.
///
/// `Min` collapses repeats to the best observed time, biasing estimates
/// optimistically but consistently.
///
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// The minimum observed time.
    #[default]
    Min,
    /// The arithmetic mean of the observed times.
    Mean,
    /// The median of the observed times.
    Median,
}

impl Aggregation {
    ///
    /// Collapses the candidate times into a single baseline value.
    ///
    /// Returns `None` for an empty candidate set.
    ///
    pub fn apply(self, mut times: Vec<f64>) -> Option<f64> {
        if times.is_empty() {
            return None;
        }
        match self {
            Self::Min => times.into_iter().reduce(f64::min),
            Self::Mean => {
                let count = times.len() as f64;
                Some(times.into_iter().sum::<f64>() / count)
            }
            Self::Median => {
                times.sort_by(|first, second| first.total_cmp(second));
                let middle = times.len() / 2;
                if times.len() % 2 == 1 {
                    Some(times[middle])
                } else {
                    Some((times[middle - 1] + times[middle]) / 2.0)
                }
            }
        }
    }
}

impl std::str::FromStr for Aggregation {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string.to_lowercase().as_str() {
            "min" => Ok(Self::Min),
            "mean" => Ok(Self::Mean),
            "median" => Ok(Self::Median),
            string => anyhow::bail!(
                "Unknown aggregation policy `{string}`. Supported policies: min, mean, median"
            ),
        }
    }
}

impl std::fmt::Display for Aggregation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Aggregation::Min => write!(f, "min"),
            Aggregation::Mean => write!(f, "mean"),
            Aggregation::Median => write!(f, "median"),
        }
    }
}

///
/// Locates reference times within the full record set for a given scaling
/// mode, version, and problem size.
///
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    /// The full record set.
    records: &'a [BenchmarkRecord],
    /// The noise-reduction policy.
    aggregation: Aggregation,
}

impl<'a> Resolver<'a> {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(records: &'a [BenchmarkRecord], aggregation: Aggregation) -> Self {
        Self {
            records,
            aggregation,
        }
    }

    ///
    /// Whether the record set contains any sequential record at all.
    ///
    /// Without one, no strong-scaling metric can be anchored.
    ///
    pub fn has_sequential(&self) -> bool {
        self.records
            .iter()
            .any(|record| record.version == Version::Sequential)
    }

    ///
    /// The strong-scaling baseline: the aggregated sequential time for
    /// exactly the problem size `(n_bats, iters)`.
    ///
    /// The error is local to the size: callers drop that size from the
    /// strong-scaling output rather than failing the whole run.
    ///
    pub fn strong_sequential(&self, n_bats: u64, iters: u64) -> Result<f64, Error> {
        let times: Vec<f64> = self
            .records
            .iter()
            .filter(|record| {
                record.version == Version::Sequential
                    && record.n_bats == n_bats
                    && record.iters == iters
            })
            .map(|record| record.time_s)
            .collect();
        self.aggregation
            .apply(times)
            .ok_or(Error::MissingSequentialBaseline { n_bats, iters })
    }

    ///
    /// The self baseline: the aggregated time of the same version at
    /// `parallelism == 1` for the problem size `(n_bats, iters)`.
    ///
    /// `None` if the version has no single-worker data for that size;
    /// callers fall back to the sequential baseline value.
    ///
    pub fn self_baseline(&self, version: Version, n_bats: u64, iters: u64) -> Option<f64> {
        let times: Vec<f64> = self
            .records
            .iter()
            .filter(|record| {
                record.version == version
                    && record.n_bats == n_bats
                    && record.iters == iters
                    && record.parallelism() == 1
            })
            .map(|record| record.time_s)
            .collect();
        self.aggregation.apply(times)
    }

    ///
    /// The weak-scaling baseline record for the group `(iters, version)`:
    /// the sequential p=1 record with the smallest `n_bats` at that `iters`,
    /// falling back to the same version's own p=1 record with the smallest
    /// `n_bats`.
    ///
    /// `None` if neither exists; the group is skipped entirely.
    ///
    pub fn weak_baseline(&self, iters: u64, version: Version) -> Option<&'a BenchmarkRecord> {
        self.smallest_p1(iters, Version::Sequential)
            .or_else(|| self.smallest_p1(iters, version))
    }

    ///
    /// The weak-scaling self baseline record: the same version's own p=1
    /// record with the smallest `n_bats` at the given `iters`.
    ///
    /// `None` if absent; callers fall back to the sequential-anchored
    /// baseline so self-baseline ratios remain defined.
    ///
    pub fn weak_self_baseline(&self, iters: u64, version: Version) -> Option<&'a BenchmarkRecord> {
        self.smallest_p1(iters, version)
    }

    ///
    /// The p=1 record of the given version with the smallest `n_bats` at the
    /// given `iters`.
    ///
    fn smallest_p1(&self, iters: u64, version: Version) -> Option<&'a BenchmarkRecord> {
        self.records
            .iter()
            .filter(|record| {
                record.iters == iters && record.version == version && record.parallelism() == 1
            })
            .min_by_key(|record| record.n_bats)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::record::BenchmarkRecord;
    use crate::model::record::Version;

    use super::Aggregation;
    use super::Resolver;

    fn record(version: Version, n_bats: u64, procs: u64, threads: u64, time_s: f64) -> BenchmarkRecord {
        BenchmarkRecord {
            version,
            n_bats,
            iters: 500,
            procs,
            threads,
            time_s,
        }
    }

    #[test]
    fn aggregation_policies() {
        let times = vec![3.0, 1.0, 2.0];
        assert_eq!(Aggregation::Min.apply(times.clone()), Some(1.0));
        assert_eq!(Aggregation::Mean.apply(times.clone()), Some(2.0));
        assert_eq!(Aggregation::Median.apply(times), Some(2.0));
        assert_eq!(Aggregation::Median.apply(vec![4.0, 1.0, 2.0, 3.0]), Some(2.5));
        assert_eq!(Aggregation::Min.apply(Vec::new()), None);
    }

    #[test]
    fn strong_baseline_takes_minimum_of_repeats() {
        let records = vec![
            record(Version::Sequential, 1000, 1, 1, 4.2),
            record(Version::Sequential, 1000, 1, 1, 4.0),
            record(Version::Sequential, 2000, 1, 1, 8.0),
        ];
        let resolver = Resolver::new(records.as_slice(), Aggregation::Min);
        let baseline = resolver.strong_sequential(1000, 500).expect("Always exists");
        assert_eq!(baseline, 4.0);
    }

    #[test]
    fn strong_baseline_missing_for_size() {
        let records = vec![record(Version::Sequential, 1000, 1, 1, 4.0)];
        let resolver = Resolver::new(records.as_slice(), Aggregation::Min);
        assert!(resolver.strong_sequential(2000, 500).is_err());
    }

    #[test]
    fn self_baseline_requires_single_worker_data() {
        let records = vec![
            record(Version::OpenMp, 1000, 1, 1, 4.4),
            record(Version::OpenMp, 1000, 1, 4, 1.3),
            record(Version::Mpi, 1000, 4, 1, 1.4),
        ];
        let resolver = Resolver::new(records.as_slice(), Aggregation::Min);
        assert_eq!(resolver.self_baseline(Version::OpenMp, 1000, 500), Some(4.4));
        assert_eq!(resolver.self_baseline(Version::Mpi, 1000, 500), None);
    }

    #[test]
    fn weak_baseline_prefers_sequential_smallest_size() {
        let records = vec![
            record(Version::Sequential, 2000, 1, 1, 8.0),
            record(Version::Sequential, 1000, 1, 1, 4.0),
            record(Version::Mpi, 1000, 1, 1, 4.4),
            record(Version::Mpi, 2000, 2, 1, 4.5),
        ];
        let resolver = Resolver::new(records.as_slice(), Aggregation::Min);
        let baseline = resolver
            .weak_baseline(500, Version::Mpi)
            .expect("Always exists");
        assert_eq!(baseline.version, Version::Sequential);
        assert_eq!(baseline.n_bats, 1000);
    }

    #[test]
    fn weak_baseline_falls_back_to_same_version() {
        let records = vec![
            record(Version::Mpi, 1000, 1, 1, 4.4),
            record(Version::Mpi, 2000, 2, 1, 4.5),
        ];
        let resolver = Resolver::new(records.as_slice(), Aggregation::Min);
        let baseline = resolver
            .weak_baseline(500, Version::Mpi)
            .expect("Always exists");
        assert_eq!(baseline.version, Version::Mpi);
        assert_eq!(baseline.n_bats, 1000);

        assert!(resolver.weak_baseline(999, Version::Mpi).is_none());
    }

    #[test]
    fn has_sequential() {
        let records = vec![record(Version::Mpi, 1000, 2, 1, 1.0)];
        assert!(!Resolver::new(records.as_slice(), Aggregation::Min).has_sequential());
        let records = vec![record(Version::Sequential, 1000, 1, 1, 1.0)];
        assert!(Resolver::new(records.as_slice(), Aggregation::Min).has_sequential());
    }
}
