//! Content diffing between two versions of a slide (feature `diff`).

pub mod comparer;
pub mod error;
pub(crate) mod formatting;
pub mod markdown;
pub mod structured;
