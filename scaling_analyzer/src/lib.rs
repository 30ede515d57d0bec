//!
//! The scaling analyzer library.
//!

pub mod analysis;
pub mod baseline;
pub mod input;
pub mod model;
pub mod output;
pub mod output_format;
pub mod renderer;

pub use crate::analysis::compute;
pub use crate::baseline::Aggregation;
pub use crate::input::error::Error as InputError;
pub use crate::input::Log;
pub use crate::model::metric::MetricRow;
pub use crate::model::metric::ScalingMode;
pub use crate::model::record::BenchmarkRecord;
pub use crate::model::record::Version;
pub use crate::output::csv::Csv as CsvOutput;
pub use crate::output::json::Json as JsonOutput;
pub use crate::output::Output;
pub use crate::output_format::OutputFormat;
pub use crate::renderer::NullRenderer;
pub use crate::renderer::Renderer;
