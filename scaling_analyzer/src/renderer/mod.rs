//!
//! The comparison chart renderer.
//!

#[cfg(feature = "plots")]
pub mod chart;

use std::path::Path;

use crate::model::metric::MetricRow;

///
/// Consumes derived metrics and produces comparison visualizations.
///
/// Charts are a non-essential enhancement: when the rendering capability is
/// not compiled in, the run still succeeds and merely skips chart output.
///
pub trait Renderer {
    ///
    /// Renders the comparison charts for the metric set into the output
    /// directory.
    ///
    fn render(&self, metrics: &[MetricRow], outdir: &Path) -> anyhow::Result<()>;
}

///
/// The no-op renderer, always available.
///
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&self, _metrics: &[MetricRow], _outdir: &Path) -> anyhow::Result<()> {
        Ok(())
    }
}

///
/// Selects the renderer once at startup.
///
/// Returns the chart renderer when the `plots` feature is compiled in and
/// charts were not disabled; the no-op renderer otherwise. Missing rendering
/// capability degrades to a console warning, never a failure.
///
pub fn select(charts_enabled: bool) -> Box<dyn Renderer> {
    if !charts_enabled {
        return Box::new(NullRenderer);
    }

    #[cfg(feature = "plots")]
    {
        Box::new(self::chart::ChartRenderer)
    }
    #[cfg(not(feature = "plots"))]
    {
        use colored::Colorize;

        eprintln!(
            "{} chart rendering is not compiled in; skipping plots. Rebuild with the `plots` feature to enable them.",
            "Warning:".bright_yellow().bold(),
        );
        Box::new(NullRenderer)
    }
}
