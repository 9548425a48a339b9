//! Incremental availability checking
//!
//! While a document is still downloading, a viewer wants to know whether an
//! object and everything it depends on can already be parsed. [`ObjectAvail`]
//! answers that question one call at a time: each [`ObjectAvail::check_avail`]
//! parses whatever has become available since the last call, remembers what
//! is done, and reports whether anything is still missing. Missing bytes are
//! requested through the [`ReadValidator`](crate::parser::ReadValidator)
//! download hints.
//!
//! Which references are followed is decided by an [`ExclusionPolicy`].
//! [`PageObjectAvail`] uses [`PageExclusion`] so that checking one page does
//! not pull in every other page of the document.

mod exclusion;
mod object_avail;
mod page_object_avail;

pub use exclusion::{DefaultExclusion, ExclusionPolicy, PageExclusion};
pub use object_avail::ObjectAvail;
pub use page_object_avail::PageObjectAvail;

/// Outcome of one availability check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocAvailStatus {
    /// The byte source failed while reading data it reported as present.
    /// The affected objects stay pending and may be retried.
    DataError,
    /// More bytes are needed before the check can complete.
    DataNotAvailable,
    /// The object and everything it depends on can be parsed.
    DataAvailable,
}

impl DocAvailStatus {
    pub fn is_available(self) -> bool {
        self == DocAvailStatus::DataAvailable
    }
}
