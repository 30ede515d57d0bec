//!
//! The metrics output.
//!

pub mod csv;
pub mod json;

use std::path::Path;
use std::path::PathBuf;

use crate::model::metric::MetricRow;
use crate::output_format::OutputFormat;

use self::csv::Csv;
use self::json::Json;

///
/// The serialized metrics table: a file name plus its whole contents.
///
/// Writing is all-or-nothing: a partial file is not a supported state, so a
/// write failure is fatal to the run.
///
#[derive(Debug)]
pub struct Output {
    /// The output file name within the output directory.
    pub file_name: &'static str,
    /// The serialized contents.
    pub content: String,
}

impl Output {
    ///
    /// Writes the metrics table into the output directory, creating the
    /// directory if absent. Returns the path of the written file.
    ///
    pub fn write_to_directory(self, outdir: &Path) -> anyhow::Result<PathBuf> {
        std::fs::create_dir_all(outdir)
            .map_err(|error| anyhow::anyhow!("Output directory {outdir:?} creating: {error}"))?;
        let path = outdir.join(self.file_name);
        std::fs::write(path.as_path(), self.content)
            .map_err(|error| anyhow::anyhow!("Metrics file {path:?} writing: {error}"))?;
        Ok(path)
    }
}

impl TryFrom<(&[MetricRow], OutputFormat)> for Output {
    type Error = anyhow::Error;

    fn try_from((metrics, format): (&[MetricRow], OutputFormat)) -> Result<Self, Self::Error> {
        Ok(match format {
            OutputFormat::Csv => Self {
                file_name: "bench_metrics.csv",
                content: Csv::from(metrics).content,
            },
            OutputFormat::Json => Self {
                file_name: "bench_metrics.json",
                content: Json::try_from(metrics)?.content,
            },
        })
    }
}
