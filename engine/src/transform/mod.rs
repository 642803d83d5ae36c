//! Transformation module.
//!
//! This module reshapes parsed tables:
//! - Columns: projection, sign stripping and column extraction
//! - Numeric: leading-number parsing, median and mean
//! - Partition: date split and numeric ordering
//! - Plan: JSON-described step lists and their executor
//! - Pipeline: load, run and summarize with progress logging

pub mod columns;
pub mod numeric;
pub mod partition;
pub mod pipeline;
pub mod plan;

pub use columns::*;
pub use numeric::*;
pub use partition::*;
pub use pipeline::*;
pub use plan::*;
