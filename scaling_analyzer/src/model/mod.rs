//!
//! The scaling analyzer data model.
//!

pub mod metric;
pub mod record;
