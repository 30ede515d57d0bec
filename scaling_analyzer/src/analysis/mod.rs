//!
//! The scaling metrics engine.
//!

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use crate::baseline::Aggregation;
use crate::baseline::Resolver;
use crate::model::metric::MetricRow;
use crate::model::metric::ScalingMode;
use crate::model::record::BenchmarkRecord;
use crate::model::record::Version;

///
/// Computes both strong- and weak-scaling metrics for the record set.
///
/// Fails if the input contains no sequential record at all: nothing can be
/// anchored without one. The output order is deterministic: strong rows in
/// input order, then weak rows in ascending identity-key order.
///
pub fn compute(
    records: &[BenchmarkRecord],
    aggregation: Aggregation,
) -> anyhow::Result<Vec<MetricRow>> {
    let resolver = Resolver::new(records, aggregation);
    if !resolver.has_sequential() {
        anyhow::bail!("Missing sequential baseline: no sequential records found in the input");
    }

    let mut metrics = strong_metrics(records, &resolver);
    metrics.extend(weak_metrics(records, &resolver));
    Ok(metrics)
}

///
/// A baseline-over-time ratio, guarded against non-positive measured time.
///
fn ratio(baseline: f64, time_s: f64) -> f64 {
    if time_s > 0.0 {
        baseline / time_s
    } else {
        0.0
    }
}

///
/// A speedup normalized by the parallelism level, guarded against a zero
/// level.
///
fn per_worker(speedup: f64, p: u64) -> f64 {
    if p > 0 {
        speedup / p as f64
    } else {
        0.0
    }
}

///
/// Strong scaling: fixed `(n_bats, iters)`, baseline is the sequential time
/// at the same size.
///
/// A non-sequential `(version, n_bats, iters)` group qualifies only with at
/// least two distinct parallelism values. Weak-scaling datasets grow `n_bats`
/// with `p` and would otherwise flood the output with single-point groups.
/// Sequential records always qualify, serving as the reference line.
///
fn strong_metrics(records: &[BenchmarkRecord], resolver: &Resolver) -> Vec<MetricRow> {
    let mut parallelism_levels: BTreeMap<(Version, u64, u64), BTreeSet<u64>> = BTreeMap::new();
    for record in records {
        if record.version == Version::Sequential {
            continue;
        }
        parallelism_levels
            .entry((record.version, record.n_bats, record.iters))
            .or_default()
            .insert(record.parallelism());
    }
    let strong_keys: BTreeSet<(Version, u64, u64)> = parallelism_levels
        .into_iter()
        .filter_map(|(key, levels)| (levels.len() >= 2).then_some(key))
        .collect();

    // Only sizes that actually have a sequential baseline survive.
    let sizes: BTreeSet<(u64, u64)> = records.iter().map(BenchmarkRecord::problem_size).collect();
    let mut baselines: BTreeMap<(u64, u64), f64> = BTreeMap::new();
    for (n_bats, iters) in sizes {
        if let Ok(baseline) = resolver.strong_sequential(n_bats, iters) {
            baselines.insert((n_bats, iters), baseline);
        }
    }

    let mut metrics = Vec::with_capacity(records.len());
    for record in records {
        if record.version != Version::Sequential
            && !strong_keys.contains(&(record.version, record.n_bats, record.iters))
        {
            continue;
        }
        let Some(t_seq1) = baselines.get(&record.problem_size()).copied() else {
            continue;
        };
        let t_self1 = resolver
            .self_baseline(record.version, record.n_bats, record.iters)
            .unwrap_or(t_seq1);

        let p = record.parallelism();
        let speedup_seq = ratio(t_seq1, record.time_s);
        let efficiency_seq = per_worker(speedup_seq, p);
        let speedup_self = ratio(t_self1, record.time_s);
        let efficiency_self = per_worker(speedup_self, p);

        metrics.push(MetricRow {
            mode: ScalingMode::Strong,
            version: record.version,
            n_bats: record.n_bats,
            iters: record.iters,
            procs: record.procs,
            threads: record.threads,
            p,
            time_s: record.time_s,
            baseline_n_bats: record.n_bats,
            t_base_s: t_seq1,
            t_seq1_s: t_seq1,
            t_self1_s: t_self1,
            // The generic pair is aliased to the self-baseline variant.
            speedup: speedup_self,
            efficiency: efficiency_self,
            speedup_seq,
            efficiency_seq,
            speedup_self,
            efficiency_self,
        });
    }
    metrics
}

///
/// Weak scaling: `n_bats` grows with `p`, grouped by `(iters, version)`.
///
/// The efficiency measures how close time stays constant, `T_base / T_p`,
/// with no division by `p`; both the speedup and efficiency fields carry it.
/// Each group also gets one synthetic row for the baseline observation
/// itself, with all ratios at `1.0`.
///
fn weak_metrics(records: &[BenchmarkRecord], resolver: &Resolver) -> Vec<MetricRow> {
    let mut unique: BTreeMap<(ScalingMode, Version, u64, u64, u64, u64), MetricRow> =
        BTreeMap::new();

    let iters_set: BTreeSet<u64> = records.iter().map(|record| record.iters).collect();
    // Anchor rows of groups sharing one baseline record collide on the
    // identity key while carrying each group's own `t_self1_s`. Versions are
    // visited in name order, so the last name in the tie provides the
    // surviving anchor values.
    let mut versions: Vec<Version> = records
        .iter()
        .map(|record| record.version)
        .collect::<BTreeSet<Version>>()
        .into_iter()
        .collect();
    versions.sort_by_key(|version| version.to_string());

    for iters in iters_set {
        for version in versions.iter().copied() {
            if version == Version::Sequential {
                continue;
            }
            let Some(baseline) = resolver.weak_baseline(iters, version) else {
                continue;
            };
            let t_base_seq = baseline.time_s;
            let t_base_self = resolver
                .weak_self_baseline(iters, version)
                .map(|record| record.time_s)
                .unwrap_or(t_base_seq);

            for record in records
                .iter()
                .filter(|record| record.iters == iters && record.version == version)
            {
                let weak_eff_seq = ratio(t_base_seq, record.time_s);
                let weak_eff_self = ratio(t_base_self, record.time_s);

                let row = MetricRow {
                    mode: ScalingMode::Weak,
                    version: record.version,
                    n_bats: record.n_bats,
                    iters: record.iters,
                    procs: record.procs,
                    threads: record.threads,
                    p: record.parallelism(),
                    time_s: record.time_s,
                    baseline_n_bats: baseline.n_bats,
                    t_base_s: t_base_seq,
                    t_seq1_s: t_base_seq,
                    t_self1_s: t_base_self,
                    speedup: weak_eff_self,
                    efficiency: weak_eff_self,
                    speedup_seq: weak_eff_seq,
                    efficiency_seq: weak_eff_seq,
                    speedup_self: weak_eff_self,
                    efficiency_self: weak_eff_self,
                };
                unique.insert(row.key(), row);
            }

            // The baseline may coincide across groups; last write wins with
            // identical values, so the insertion is idempotent.
            let anchor = MetricRow::weak_baseline_anchor(baseline, t_base_seq, t_base_self);
            unique.insert(anchor.key(), anchor);
        }
    }

    unique.into_values().collect()
}
