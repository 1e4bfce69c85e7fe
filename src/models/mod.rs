// Snapshot models: one fixed-shape record per data source, each described by a single field table.

mod build;
mod mem;
mod record;

pub use build::{build, build_into};
pub use mem::{MEMINFO_FIELDS, MemInfo};
pub use record::{Field, Record, stringify};
