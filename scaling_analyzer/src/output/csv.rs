//!
//! Serializing derived metrics to CSV.
//!

use std::fmt::Write;

use crate::model::metric::MetricRow;

/// The fixed column order. Downstream tooling re-derives ratios from it.
pub const HEADER: &str = "mode,version,n_bats,iters,procs,threads,p,time_s,baseline_n_bats,T_base_s,T_seq1_s,T_self1_s,speedup,efficiency,speedup_seq,efficiency_seq,speedup_self,efficiency_self";

///
/// Serialize the derived metrics to CSV.
///
/// Floats are written with the shortest round-trip representation, so the
/// export preserves full numeric precision.
///
#[derive(Default)]
pub struct Csv {
    /// The CSV string.
    pub content: String,
}

impl Csv {
    ///
    /// Estimate the size of the CSV file based on the number of rows.
    ///
    fn estimate_csv_size(metrics: &[MetricRow]) -> usize {
        let estimated_line_length = 192;
        (metrics.len() + 1) * estimated_line_length
    }
}

impl From<&[MetricRow]> for Csv {
    fn from(metrics: &[MetricRow]) -> Csv {
        let mut content = String::with_capacity(Self::estimate_csv_size(metrics));
        content.push_str(HEADER);
        content.push('\n');

        for row in metrics {
            writeln!(
                &mut content,
                "{mode},{version},{n_bats},{iters},{procs},{threads},{p},{time_s},{baseline_n_bats},{t_base_s},{t_seq1_s},{t_self1_s},{speedup},{efficiency},{speedup_seq},{efficiency_seq},{speedup_self},{efficiency_self}",
                mode = row.mode,
                version = row.version,
                n_bats = row.n_bats,
                iters = row.iters,
                procs = row.procs,
                threads = row.threads,
                p = row.p,
                time_s = row.time_s,
                baseline_n_bats = row.baseline_n_bats,
                t_base_s = row.t_base_s,
                t_seq1_s = row.t_seq1_s,
                t_self1_s = row.t_self1_s,
                speedup = row.speedup,
                efficiency = row.efficiency,
                speedup_seq = row.speedup_seq,
                efficiency_seq = row.efficiency_seq,
                speedup_self = row.speedup_self,
                efficiency_self = row.efficiency_self,
            )
            .expect("Always valid");
        }

        Self { content }
    }
}
