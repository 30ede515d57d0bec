//!
//! The derived metric row representation.
//!

use crate::model::record::BenchmarkRecord;
use crate::model::record::Version;

///
/// The scaling mode of a derived metric row.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalingMode {
    /// Fixed problem size, increasing parallelism.
    Strong,
    /// Problem size growing proportionally with parallelism.
    Weak,
}

impl std::fmt::Display for ScalingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalingMode::Strong => write!(f, "strong"),
            ScalingMode::Weak => write!(f, "weak"),
        }
    }
}

///
/// One derived observation, produced from exactly one benchmark record plus
/// its resolved baselines. Never mutated after creation.
///
/// For strong rows `efficiency = speedup / p` for both baseline variants.
/// For weak rows efficiency equals speedup: both are the constant-time
/// retention ratio `T_base / T_p`.
///
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct MetricRow {
    /// The scaling mode.
    pub mode: ScalingMode,
    /// The execution mode of the source record.
    pub version: Version,
    /// The number of work units of the source record.
    pub n_bats: u64,
    /// The number of iterations of the source record.
    pub iters: u64,
    /// The raw process count of the source record.
    pub procs: u64,
    /// The raw thread count of the source record.
    pub threads: u64,
    /// The parallelism level of the source record.
    pub p: u64,
    /// The measured wall time of the source record in seconds.
    pub time_s: f64,
    /// The number of work units of the resolved baseline record.
    pub baseline_n_bats: u64,
    /// The primary baseline time in seconds.
    pub t_base_s: f64,
    /// The sequential-anchored baseline time in seconds.
    pub t_seq1_s: f64,
    /// The self-baseline time in seconds, falling back to the sequential one.
    pub t_self1_s: f64,
    /// The generic speedup, aliased to the self-baseline variant.
    pub speedup: f64,
    /// The generic efficiency, aliased to the self-baseline variant.
    pub efficiency: f64,
    /// The speedup against the sequential baseline.
    pub speedup_seq: f64,
    /// The efficiency against the sequential baseline.
    pub efficiency_seq: f64,
    /// The speedup against the self baseline.
    pub speedup_self: f64,
    /// The efficiency against the self baseline.
    pub efficiency_self: f64,
}

impl MetricRow {
    ///
    /// The identity key used for deduplication.
    ///
    pub fn key(&self) -> (ScalingMode, Version, u64, u64, u64, u64) {
        (
            self.mode,
            self.version,
            self.n_bats,
            self.iters,
            self.procs,
            self.threads,
        )
    }

    ///
    /// A synthetic weak-scaling row representing the baseline observation
    /// itself, with all ratios fixed at `1.0` and `p = 1`.
    ///
    /// Lets charts render a p=1 anchor point even if the true baseline record
    /// belongs to a different version.
    ///
    pub fn weak_baseline_anchor(
        baseline: &BenchmarkRecord,
        t_base_seq: f64,
        t_base_self: f64,
    ) -> Self {
        Self {
            mode: ScalingMode::Weak,
            version: baseline.version,
            n_bats: baseline.n_bats,
            iters: baseline.iters,
            procs: baseline.procs,
            threads: baseline.threads,
            p: 1,
            time_s: baseline.time_s,
            baseline_n_bats: baseline.n_bats,
            t_base_s: t_base_seq,
            t_seq1_s: t_base_seq,
            t_self1_s: t_base_self,
            speedup: 1.0,
            efficiency: 1.0,
            speedup_seq: 1.0,
            efficiency_seq: 1.0,
            speedup_self: 1.0,
            efficiency_self: 1.0,
        }
    }
}
