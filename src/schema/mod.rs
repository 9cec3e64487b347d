//! Daily metrics response schema
//!
//! The envelope wraps a map of tagged metric entries. Each entry's payload is
//! resolved into one of the typed metric shapes, or kept as raw JSON when the
//! tag is unknown or the payload doesn't fit its schema.

mod de;
mod entry;
mod envelope;
mod metric;
mod sleep;

pub use entry::*;
pub use envelope::*;
pub use metric::*;
pub use sleep::*;

#[cfg(test)]
pub(crate) use sleep::fixtures;
