//! Application layer module
//!
//! This module contains the country pipeline use case and the steps
//! that orchestrate the domain logic: name reconciliation, image
//! resolution and record assembly.

pub mod image_resolver;
pub mod name_reconciler;
pub mod pipeline;
pub mod record_assembler;

pub use image_resolver::{ImageResolution, ImageResolver};
pub use name_reconciler::{CapitalsIndex, filter_note, reconcile_name};
pub use pipeline::{CountryPipeline, PipelineReport, PipelineRun};
pub use record_assembler::{Admission, RecordAssembler, RowOutcome};
