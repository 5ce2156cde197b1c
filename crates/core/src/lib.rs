//! `smilefetch-core`: data model and name normalization.
//!
//! Pure crate: no network, no file IO.

pub mod model;
pub mod names;

pub use model::{EntityKind, Hyperlink, LookupResult, LookupStatus, ReportRow, SummaryCounts};
pub use names::{normalize, url_encode, PercentEncoding};
