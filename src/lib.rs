//! # quiz-print – two-column print pagination for quiz worksheets
//!
//! This crate turns generated quiz records into a frozen page layout that a
//! presentation layer can render without re-measuring anything. The pipeline
//! stages are:
//!
//! 1. **Normalize** – per-work-type record → ordered sections ([`normalize`])
//! 2. **Estimate** – render-free height of every section ([`estimate`])
//! 3. **Split** – over-tall questions → self-consistent chunks ([`split`])
//! 4. **Pack** – greedy shorter-column-first placement ([`pack`])
//! 5. **Aggregate** – composite-session translation after packing ([`aggregate`])
//!
//! A C-compatible FFI surface is exposed via the [`ffi`] module.

pub mod aggregate;
pub mod blanks;
pub mod error;
pub mod estimate;
pub mod ffi;
pub mod markup;
pub mod metrics;
pub mod normalize;
pub mod pack;
pub mod pipeline;
pub mod record;
pub mod samples;
pub mod section;
pub mod split;
pub mod work_type;

// Re-exports for convenience
pub use error::{Error, Result};
pub use metrics::LayoutMetrics;
pub use pipeline::{paginate, paginate_job, PrintJob};
pub use section::{Document, Mode};
