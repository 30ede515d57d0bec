//!
//! The plotters-based chart renderer.
//!

use std::collections::BTreeMap;
use std::path::Path;

use plotters::prelude::*;

use crate::model::metric::MetricRow;
use crate::model::metric::ScalingMode;
use crate::model::record::Version;

use super::Renderer;

/// The thread-parallel series color.
const COLOR_OPENMP: RGBColor = RGBColor(52, 152, 219);
/// The process-parallel series color.
const COLOR_MPI: RGBColor = RGBColor(231, 76, 60);
/// The ideal/reference line color.
const COLOR_IDEAL: RGBColor = RGBColor(120, 120, 120);

/// The shared x-axis description.
const X_DESC: &str = "p (threads or MPI processes)";

///
/// One plotted line: a legend label, a color, and points sorted by `p`.
///
type Series = (&'static str, RGBColor, Vec<(f64, f64)>);

///
/// The reference line drawn alongside the measured series.
///
enum IdealLine {
    /// Ideal strong-scaling speedup, `y = p`.
    Parallelism,
    /// Ideal efficiency, `y = 1`.
    Unity,
    /// Ideal weak-scaling time, constant at the baseline.
    ConstantTime(f64),
}

///
/// Renders comparison charts with the SVG backend.
///
/// Groups with fewer than two distinct parallelism values among
/// non-sequential rows are suppressed: single points are not informative.
///
#[derive(Debug, Default)]
pub struct ChartRenderer;

impl Renderer for ChartRenderer {
    fn render(&self, metrics: &[MetricRow], outdir: &Path) -> anyhow::Result<()> {
        std::fs::create_dir_all(outdir)
            .map_err(|error| anyhow::anyhow!("Output directory {outdir:?} creating: {error}"))?;

        let mut strong_groups: BTreeMap<(u64, u64), Vec<&MetricRow>> = BTreeMap::new();
        let mut weak_groups: BTreeMap<(u64, u64), Vec<&MetricRow>> = BTreeMap::new();
        for row in metrics {
            match row.mode {
                ScalingMode::Strong => strong_groups
                    .entry((row.n_bats, row.iters))
                    .or_default()
                    .push(row),
                ScalingMode::Weak => weak_groups
                    .entry((row.baseline_n_bats, row.iters))
                    .or_default()
                    .push(row),
            }
        }

        for ((n_bats, iters), rows) in strong_groups {
            render_strong_group(n_bats, iters, rows.as_slice(), outdir)?;
        }
        for ((base_n_bats, iters), rows) in weak_groups {
            render_weak_group(base_n_bats, iters, rows.as_slice(), outdir)?;
        }

        Ok(())
    }
}

///
/// Whether the group has enough parallel data points to be worth a chart.
///
fn qualifies(rows: &[&MetricRow]) -> bool {
    let levels: std::collections::BTreeSet<u64> = rows
        .iter()
        .filter(|row| row.version != Version::Sequential)
        .map(|row| row.p)
        .collect();
    levels.len() >= 2
}

///
/// Collects the per-version series for the given y-value extractor.
///
fn series_of(rows: &[&MetricRow], value: impl Fn(&MetricRow) -> f64) -> Vec<Series> {
    let mut series = Vec::with_capacity(2);
    for (version, label, color) in [
        (Version::OpenMp, "OpenMP", COLOR_OPENMP),
        (Version::Mpi, "MPI", COLOR_MPI),
    ] {
        let mut points: Vec<(f64, f64)> = rows
            .iter()
            .filter(|row| row.version == version)
            .map(|row| (row.p as f64, value(row)))
            .collect();
        if points.is_empty() {
            continue;
        }
        points.sort_by(|first, second| first.0.total_cmp(&second.0));
        series.push((label, color, points));
    }
    series
}

///
/// Renders the five comparison charts of one strong-scaling group.
///
fn render_strong_group(
    n_bats: u64,
    iters: u64,
    rows: &[&MetricRow],
    outdir: &Path,
) -> anyhow::Result<()> {
    if !qualifies(rows) {
        return Ok(());
    }
    let title_tag = format!("nbats{n_bats}_it{iters}");

    let t_seq1 = rows
        .iter()
        .find(|row| row.version == Version::Sequential)
        .map(|row| row.t_seq1_s)
        .unwrap_or(rows[0].t_seq1_s);
    draw_chart(
        &outdir.join(format!("compare_strong_time_{title_tag}.svg")),
        format!("Strong scaling time: {title_tag}").as_str(),
        "Execution time (s)",
        series_of(rows, |row| row.time_s).as_slice(),
        (t_seq1 > 0.0).then_some(IdealLine::ConstantTime(t_seq1)),
        "Sequential (p=1)",
    )?;

    let charts: [(&str, &str, fn(&MetricRow) -> f64, IdealLine); 4] = [
        (
            "compare_strong_speedup_vs_seq",
            "Speedup (vs sequential)",
            |row| row.speedup_seq,
            IdealLine::Parallelism,
        ),
        (
            "compare_strong_efficiency_vs_seq",
            "Efficiency (vs sequential)",
            |row| row.efficiency_seq,
            IdealLine::Unity,
        ),
        (
            "compare_strong_speedup_vs_self",
            "Speedup (vs self p=1)",
            |row| row.speedup_self,
            IdealLine::Parallelism,
        ),
        (
            "compare_strong_efficiency_vs_self",
            "Efficiency (vs self p=1)",
            |row| row.efficiency_self,
            IdealLine::Unity,
        ),
    ];
    for (stem, y_desc, value, ideal) in charts {
        draw_chart(
            &outdir.join(format!("{stem}_{title_tag}.svg")),
            format!("Strong scaling {}: {title_tag}", y_desc.to_lowercase()).as_str(),
            y_desc,
            series_of(rows, value).as_slice(),
            Some(ideal),
            "ideal",
        )?;
    }

    Ok(())
}

///
/// Renders the three comparison charts of one weak-scaling group.
///
fn render_weak_group(
    base_n_bats: u64,
    iters: u64,
    rows: &[&MetricRow],
    outdir: &Path,
) -> anyhow::Result<()> {
    if !qualifies(rows) {
        return Ok(());
    }
    let title_tag = format!("base{base_n_bats}_it{iters}");

    let t_base = rows[0].t_seq1_s;
    draw_chart(
        &outdir.join(format!("compare_weak_time_{title_tag}.svg")),
        format!("Weak scaling time: {title_tag} (n_bats = base * p)").as_str(),
        "Execution time (s)",
        series_of(rows, |row| row.time_s).as_slice(),
        (t_base > 0.0).then_some(IdealLine::ConstantTime(t_base)),
        "ideal (constant time)",
    )?;

    let charts: [(&str, &str, fn(&MetricRow) -> f64); 2] = [
        (
            "compare_weak_efficiency_vs_seq",
            "Weak efficiency (vs sequential p=1)",
            |row| row.efficiency_seq,
        ),
        (
            "compare_weak_efficiency_vs_self",
            "Weak efficiency (vs self p=1)",
            |row| row.efficiency_self,
        ),
    ];
    for (stem, y_desc, value) in charts {
        draw_chart(
            &outdir.join(format!("{stem}_{title_tag}.svg")),
            format!("Weak scaling efficiency: {title_tag}").as_str(),
            y_desc,
            series_of(rows, value).as_slice(),
            Some(IdealLine::Unity),
            "ideal",
        )?;
    }

    Ok(())
}

///
/// Draws one line chart with the measured series and an optional reference
/// line.
///
fn draw_chart(
    output: &Path,
    title: &str,
    y_desc: &str,
    series: &[Series],
    ideal: Option<IdealLine>,
    ideal_label: &str,
) -> anyhow::Result<()> {
    draw_chart_inner(output, title, y_desc, series, ideal, ideal_label)
        .map_err(|error| anyhow::anyhow!("Chart {output:?} rendering: {error}"))
}

fn draw_chart_inner(
    output: &Path,
    title: &str,
    y_desc: &str,
    series: &[Series],
    ideal: Option<IdealLine>,
    ideal_label: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if series.is_empty() {
        return Ok(());
    }

    let x_max = series
        .iter()
        .flat_map(|(_, _, points)| points.iter().map(|&(x, _)| x))
        .fold(1.0f64, f64::max);
    let mut y_max = series
        .iter()
        .flat_map(|(_, _, points)| points.iter().map(|&(_, y)| y))
        .fold(0.0f64, f64::max);
    y_max = match ideal {
        Some(IdealLine::Parallelism) => y_max.max(x_max),
        Some(IdealLine::Unity) => y_max.max(1.0),
        Some(IdealLine::ConstantTime(value)) => y_max.max(value),
        None => y_max,
    };
    if y_max <= 0.0 {
        y_max = 1.0;
    }

    let root = SVGBackend::new(output, (900, 540)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 18))
        .margin(14)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..x_max * 1.05, 0f64..y_max * 1.15)?;

    chart
        .configure_mesh()
        .x_desc(X_DESC)
        .y_desc(y_desc)
        .draw()?;

    if let Some(ideal) = ideal {
        let line = match ideal {
            IdealLine::Parallelism => vec![(1.0, 1.0), (x_max, x_max)],
            IdealLine::Unity => vec![(0.0, 1.0), (x_max * 1.05, 1.0)],
            IdealLine::ConstantTime(value) => vec![(0.0, value), (x_max * 1.05, value)],
        };
        chart
            .draw_series(std::iter::once(PathElement::new(
                line,
                COLOR_IDEAL.stroke_width(1),
            )))?
            .label(ideal_label)
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], COLOR_IDEAL));
    }

    for (label, color, points) in series {
        let color = *color;
        chart
            .draw_series(LineSeries::new(points.clone(), color.stroke_width(2)))?
            .label(*label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
            });
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .margin(12)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK.mix(0.3))
        .label_font(("sans-serif", 13))
        .draw()?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::baseline::Aggregation;
    use crate::model::record::BenchmarkRecord;
    use crate::model::record::Version;
    use crate::renderer::Renderer;

    use super::ChartRenderer;

    fn record(
        version: Version,
        n_bats: u64,
        procs: u64,
        threads: u64,
        time_s: f64,
    ) -> BenchmarkRecord {
        BenchmarkRecord {
            version,
            n_bats,
            iters: 2000,
            procs,
            threads,
            time_s,
        }
    }

    #[test]
    fn single_point_groups_produce_no_files() {
        let records = vec![
            record(Version::Sequential, 2000, 1, 1, 4.0),
            record(Version::OpenMp, 2000, 1, 2, 2.2),
        ];
        let metrics =
            crate::analysis::compute(records.as_slice(), Aggregation::Min).expect("Always valid");

        let outdir = std::env::temp_dir().join("scaling_analyzer_single_point_test");
        let _ = std::fs::remove_dir_all(outdir.as_path());
        ChartRenderer
            .render(metrics.as_slice(), outdir.as_path())
            .expect("Always valid");

        let entries: Vec<_> = std::fs::read_dir(outdir.as_path())
            .expect("Always valid")
            .collect();
        assert!(entries.is_empty());
        let _ = std::fs::remove_dir_all(outdir.as_path());
    }

    #[test]
    fn strong_group_produces_five_charts() {
        let records = vec![
            record(Version::Sequential, 2000, 1, 1, 4.0),
            record(Version::OpenMp, 2000, 1, 2, 2.2),
            record(Version::OpenMp, 2000, 1, 4, 1.3),
        ];
        let metrics =
            crate::analysis::compute(records.as_slice(), Aggregation::Min).expect("Always valid");

        let outdir = std::env::temp_dir().join("scaling_analyzer_strong_charts_test");
        let _ = std::fs::remove_dir_all(outdir.as_path());
        ChartRenderer
            .render(metrics.as_slice(), outdir.as_path())
            .expect("Always valid");

        for stem in [
            "compare_strong_time",
            "compare_strong_speedup_vs_seq",
            "compare_strong_efficiency_vs_seq",
            "compare_strong_speedup_vs_self",
            "compare_strong_efficiency_vs_self",
        ] {
            let path = outdir.join(format!("{stem}_nbats2000_it2000.svg"));
            assert!(path.exists(), "missing {path:?}");
        }
        let _ = std::fs::remove_dir_all(outdir.as_path());
    }
}
