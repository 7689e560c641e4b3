//! Report rendering for nodescope
//!
//! This crate turns a finished cluster snapshot into the text report:
//! status classification, the node table, the version line, the
//! unhealthy-operators block, and the symbol legend.

mod status;
mod symbols;
mod table;

pub use status::{age_cell, cpu_cell, memory_cell, role_label, status_string};
pub use symbols::legend;
pub use table::Report;

// Re-export types that are used in our public API
pub use nodescope_types::{ClusterSnapshot, DisplayOptions, OperatorInfo, VersionInfo};
