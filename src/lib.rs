//! autodoc - Engineering component report pipeline
//!
//! This crate reads engineering component specifications from Excel files
//! (XLSX), renders them into a formatted Markdown report, and records every
//! completed run in an append-only CSV activity log that feeds a dashboard.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use autodoc::PipelineBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a pipeline with default settings
//!     let pipeline = PipelineBuilder::new().build()?;
//!
//!     // Run the full pipeline: parse Excel -> render report -> append log
//!     let outcome = pipeline.run("components.xlsx", "Substation Alpha", "J. Smith");
//!
//!     // The outcome is a structured result, not an error
//!     if outcome.is_success() {
//!         println!("{}", outcome.message());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use autodoc::{PageSize, PipelineBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let pipeline = PipelineBuilder::new()
//!         .with_output_dir("reports")
//!         .with_log_path("reports/activity.csv")
//!         .with_page_size(PageSize::A4)
//!         .build()?;
//!
//!     let outcome = pipeline.run("components.xlsx", "Substation Alpha", "J. Smith");
//!     println!("{:?}", outcome);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Reading the Activity Log
//!
//! ```rust,no_run
//! use autodoc::ActivityLog;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let log = ActivityLog::at("report_log.csv");
//!
//!     // Raw listing: one entry per successfully completed run
//!     for entry in log.entries()? {
//!         println!("{} {} ({} components)", entry.report_id, entry.project, entry.component_count);
//!     }
//!
//!     // Computed statistics for the dashboard
//!     let stats = log.stats()?;
//!     println!("{} runs, {} succeeded", stats.total, stats.success);
//!
//!     Ok(())
//! }
//! ```

mod activity_log;
mod api;
mod error;
mod extractor;
mod pipeline;
mod report;
mod types;

// 公開API
pub use activity_log::{ActivityLog, DayCount, LogEntry, LogStats, ProjectCount};
pub use api::PageSize;
pub use error::AutoDocError;
pub use extractor::{extract_components, extract_components_from_path, EXPECTED_HEADERS};
pub use pipeline::{Pipeline, PipelineBuilder, PipelineOutcome};
pub use types::{ComponentRecord, ReportMetadata};
