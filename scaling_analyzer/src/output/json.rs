//!
//! Serializing derived metrics to JSON.
//!

use chrono::DateTime;
use chrono::Utc;

use crate::model::metric::MetricRow;

///
/// Metadata attached to a JSON metrics report.
///
#[derive(Debug, serde::Serialize)]
pub struct Metadata {
    /// The report generation timestamp.
    pub generated_at: DateTime<Utc>,
    /// The number of derived metric rows.
    pub rows: usize,
}

///
/// The JSON metrics report: run metadata plus the derived rows.
///
#[derive(Debug, serde::Serialize)]
pub struct Report<'a> {
    /// Metadata related to the whole report.
    pub metadata: Metadata,
    /// The derived metric rows.
    pub metrics: &'a [MetricRow],
}

///
/// Serialize the derived metrics to pretty-printed JSON.
///
#[derive(Default)]
pub struct Json {
    /// The JSON string.
    pub content: String,
}

impl TryFrom<&[MetricRow]> for Json {
    type Error = anyhow::Error;

    fn try_from(metrics: &[MetricRow]) -> Result<Self, Self::Error> {
        let report = Report {
            metadata: Metadata {
                generated_at: Utc::now(),
                rows: metrics.len(),
            },
            metrics,
        };
        let content = serde_json::to_string_pretty(&report)
            .map_err(|error| anyhow::anyhow!("Metrics JSON serializing: {error}"))?;
        Ok(Self { content })
    }
}

#[cfg(test)]
mod tests {
    use crate::model::metric::MetricRow;
    use crate::model::metric::ScalingMode;
    use crate::model::record::BenchmarkRecord;
    use crate::model::record::Version;

    use super::Json;

    #[test]
    fn report_carries_metadata_and_rows() {
        let baseline = BenchmarkRecord {
            version: Version::Sequential,
            n_bats: 1000,
            iters: 500,
            procs: 1,
            threads: 1,
            time_s: 1.0,
        };
        let rows = vec![MetricRow::weak_baseline_anchor(&baseline, 1.0, 1.0)];
        let json = Json::try_from(rows.as_slice()).expect("Always valid");

        let value: serde_json::Value =
            serde_json::from_str(json.content.as_str()).expect("Always valid");
        assert_eq!(value["metadata"]["rows"], 1);
        assert_eq!(value["metrics"][0]["mode"], "weak");
        assert_eq!(value["metrics"][0]["version"], "sequential");
        assert_eq!(value["metrics"][0]["efficiency"], 1.0);
    }
}
