//!
//! The benchmark record representation.
//!

///
/// The benchmark execution mode.
///
/// Determines how the parallelism level is derived from the raw resource
/// counts reported in the log.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Version {
    /// The sequential reference implementation.
    Sequential,
    /// The thread-parallel implementation.
    OpenMp,
    /// The process-parallel implementation.
    Mpi,
}

impl std::str::FromStr for Version {
    type Err = anyhow::Error;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "sequential" => Ok(Self::Sequential),
            "openmp" => Ok(Self::OpenMp),
            "mpi" => Ok(Self::Mpi),
            string => anyhow::bail!(
                "Unknown benchmark version `{string}`. Supported versions: sequential, openmp, mpi"
            ),
        }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Version::Sequential => write!(f, "sequential"),
            Version::OpenMp => write!(f, "openmp"),
            Version::Mpi => write!(f, "mpi"),
        }
    }
}

///
/// One observed benchmark run, parsed from a single log line.
///
/// Immutable after parsing.
///
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkRecord {
    /// The execution mode.
    pub version: Version,
    /// The number of work units, the first problem size dimension.
    pub n_bats: u64,
    /// The number of iterations, the second problem size dimension.
    pub iters: u64,
    /// The raw process count as reported.
    pub procs: u64,
    /// The raw thread count as reported.
    pub threads: u64,
    /// The measured wall time in seconds.
    pub time_s: f64,
}

impl BenchmarkRecord {
    ///
    /// Returns the parallelism level `p` for this record.
    ///
    /// `threads` for OpenMP, `procs` for MPI, `1` for sequential runs.
    /// Raw counts of zero are clamped so that `p >= 1` always holds.
    ///
    pub fn parallelism(&self) -> u64 {
        let p = match self.version {
            Version::OpenMp => self.threads,
            Version::Mpi => self.procs,
            Version::Sequential => 1,
        };
        p.max(1)
    }

    ///
    /// Returns the problem size pair `(n_bats, iters)`.
    ///
    pub fn problem_size(&self) -> (u64, u64) {
        (self.n_bats, self.iters)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::BenchmarkRecord;
    use super::Version;

    fn record(version: Version, procs: u64, threads: u64) -> BenchmarkRecord {
        BenchmarkRecord {
            version,
            n_bats: 1000,
            iters: 500,
            procs,
            threads,
            time_s: 1.0,
        }
    }

    #[test]
    fn parallelism_follows_version() {
        assert_eq!(record(Version::Sequential, 4, 8).parallelism(), 1);
        assert_eq!(record(Version::OpenMp, 4, 8).parallelism(), 8);
        assert_eq!(record(Version::Mpi, 4, 8).parallelism(), 4);
    }

    #[test]
    fn parallelism_is_at_least_one() {
        assert_eq!(record(Version::OpenMp, 0, 0).parallelism(), 1);
        assert_eq!(record(Version::Mpi, 0, 0).parallelism(), 1);
    }

    #[test]
    fn version_round_trip() {
        for token in ["sequential", "openmp", "mpi"] {
            let version = Version::from_str(token).expect("Always valid");
            assert_eq!(version.to_string(), token);
        }
    }

    #[test]
    fn unknown_version_is_rejected() {
        assert!(Version::from_str("cuda").is_err());
        assert!(Version::from_str("").is_err());
    }
}
