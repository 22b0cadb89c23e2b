//! Statistics finalization over the aggregated vacancy buckets.
//!
//! This module turns year and area sums into averages, ranks the areas that
//! hold a significant share of postings, and exposes the file-to-report
//! pipeline used by the CLI.

pub mod analyzer;
pub mod finalize;
pub mod types;
pub mod utility;
