//!
//! The benchmark log input.
//!

pub mod error;

use std::collections::BTreeSet;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use colored::Colorize;

use crate::model::record::BenchmarkRecord;
use crate::model::record::Version;

use self::error::Error;

/// The benchmark line pattern. One line describes one observed run.
static BENCH_LINE: OnceLock<regex::Regex> = OnceLock::new();

///
/// Returns the compiled benchmark line pattern.
///
fn bench_line() -> &'static regex::Regex {
    BENCH_LINE.get_or_init(|| {
        regex::Regex::new(
            r"^BENCH\s+version=(?P<version>\S+)\s+n_bats=(?P<n_bats>\d+)\s+iters=(?P<iters>\d+)\s+procs=(?P<procs>\d+)\s+threads=(?P<threads>\d+)\s+time_s=(?P<time_s>[0-9.]+)\s*$",
        )
        .expect("Always valid")
    })
}

///
/// The parsed benchmark log: the extracted records plus scan statistics.
///
#[derive(Debug, Default)]
pub struct Log {
    /// The extracted benchmark records, in input order.
    pub records: Vec<BenchmarkRecord>,
    /// The total number of lines scanned.
    pub lines_scanned: usize,
}

impl Log {
    ///
    /// Extracts benchmark records from a text stream.
    ///
    /// Non-matching lines are skipped silently, so full stdout/stderr logs
    /// can be passed as-is. Matching lines with an unknown version token are
    /// skipped with a console warning, once per token.
    ///
    pub fn parse(text: &str) -> Self {
        let mut records = Vec::new();
        let mut lines_scanned = 0;
        let mut warned_versions: BTreeSet<String> = BTreeSet::new();

        for line in text.lines() {
            lines_scanned += 1;
            let Some(captures) = bench_line().captures(line.trim()) else {
                continue;
            };

            let version_token = &captures["version"];
            let version = match Version::from_str(version_token) {
                Ok(version) => version,
                Err(_) => {
                    if warned_versions.insert(version_token.to_owned()) {
                        eprintln!(
                            "{} skipping records with unknown benchmark version `{version_token}`",
                            "Warning:".bright_yellow().bold(),
                        );
                    }
                    continue;
                }
            };
            let Ok(time_s) = f64::from_str(&captures["time_s"]) else {
                continue;
            };
            // The pattern admits digit runs beyond the u64 range; such lines
            // are malformed and skipped like any other.
            let (Ok(n_bats), Ok(iters), Ok(procs), Ok(threads)) = (
                u64::from_str(&captures["n_bats"]),
                u64::from_str(&captures["iters"]),
                u64::from_str(&captures["procs"]),
                u64::from_str(&captures["threads"]),
            ) else {
                continue;
            };

            records.push(BenchmarkRecord {
                version,
                n_bats,
                iters,
                procs,
                threads,
                time_s,
            });
        }

        Self {
            records,
            lines_scanned,
        }
    }

    ///
    /// Reads and parses a benchmark log file.
    ///
    /// Zero extracted records is an error at this level: an input with no
    /// benchmark lines cannot produce any metrics.
    ///
    pub fn try_from_path(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|error| Error::Reading {
            error,
            path: path.to_owned(),
        })?;
        let log = Self::parse(text.as_str());
        if log.records.is_empty() {
            return Err(Error::NoRecords {
                path: path.to_owned(),
            });
        }
        Ok(log)
    }
}

#[cfg(test)]
mod tests {
    use crate::model::record::Version;

    use super::Log;

    #[test]
    fn extracts_records_and_ignores_noise() {
        let text = r#"
Starting benchmark suite...
BENCH version=sequential n_bats=2000 iters=2000 procs=1 threads=1 time_s=4.012345
progress: 50%
BENCH version=openmp n_bats=2000 iters=2000 procs=1 threads=4 time_s=1.298765
done.
"#;
        let log = Log::parse(text);
        assert_eq!(log.lines_scanned, 6);
        assert_eq!(log.records.len(), 2);
        assert_eq!(log.records[0].version, Version::Sequential);
        assert_eq!(log.records[1].version, Version::OpenMp);
        assert_eq!(log.records[1].threads, 4);
        assert!((log.records[1].time_s - 1.298765).abs() < 1e-12);
    }

    #[test]
    fn malformed_lines_are_skipped() {
        let text = r#"
BENCH version=openmp n_bats=2000 iters=2000 procs=1 threads=4
BENCH version=openmp n_bats=abc iters=2000 procs=1 threads=4 time_s=1.0
BENCH version=openmp n_bats=2000 iters=2000 procs=1 threads=4 time_s=1.0 extra=1
"#;
        assert!(Log::parse(text).records.is_empty());
    }

    #[test]
    fn overflowing_counts_are_skipped() {
        let text = r#"
BENCH version=openmp n_bats=99999999999999999999 iters=2000 procs=1 threads=4 time_s=1.0
BENCH version=openmp n_bats=2000 iters=99999999999999999999 procs=1 threads=4 time_s=1.0
BENCH version=openmp n_bats=2000 iters=2000 procs=99999999999999999999 threads=4 time_s=1.0
BENCH version=openmp n_bats=2000 iters=2000 procs=1 threads=4 time_s=1.0
"#;
        let log = Log::parse(text);
        assert_eq!(log.records.len(), 1);
        assert_eq!(log.records[0].n_bats, 2000);
    }

    #[test]
    fn unknown_versions_are_skipped() {
        let text = r#"
BENCH version=cuda n_bats=2000 iters=2000 procs=1 threads=4 time_s=1.0
BENCH version=mpi n_bats=2000 iters=2000 procs=4 threads=1 time_s=1.0
"#;
        let log = Log::parse(text);
        assert_eq!(log.records.len(), 1);
        assert_eq!(log.records[0].version, Version::Mpi);
    }

    #[test]
    fn leading_whitespace_is_tolerated() {
        let text = "   BENCH version=sequential n_bats=10 iters=20 procs=1 threads=1 time_s=0.5";
        assert_eq!(Log::parse(text).records.len(), 1);
    }
}
