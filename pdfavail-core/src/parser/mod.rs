//! Document plumbing underneath the object model
//!
//! This module owns the pieces that sit between raw bytes and [`Object`]s:
//!
//! - [`ByteSource`] / [`ProgressiveBuffer`]: the (possibly partial) bytes of a
//!   document.
//! - [`ReadValidator`]: wraps a byte source and records whether a parse attempt
//!   touched bytes that have not arrived yet. [`Session`] scopes that record to
//!   one attempt.
//! - [`IndirectObjectHolder`]: owns every indirect object of a document and
//!   materialises them on demand through an [`IndirectObjectParser`].
//!
//! The tokenizer and cross-reference machinery that turn bytes into objects
//! are not part of this crate; they plug in through [`IndirectObjectParser`].
//!
//! [`Object`]: crate::objects::Object

pub mod holder;
pub mod source;
pub mod validator;

pub use self::holder::{IndirectObjectHolder, IndirectObjectParser, Resolved};
pub use self::source::{ByteSource, ProgressiveBuffer};
pub use self::validator::{ReadValidator, Segment, Session};

/// Default granularity of download hint segments, in bytes
pub const DEFAULT_SEGMENT_ALIGNMENT: u64 = 512;

/// Configuration shared by the validator and the holder
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Requested download segments are widened to multiples of this size
    pub segment_alignment: u64,
    /// Route names through the holder's string pool
    pub intern_names: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            segment_alignment: DEFAULT_SEGMENT_ALIGNMENT,
            intern_names: true,
        }
    }
}

impl ParseOptions {
    /// Options that report exactly the missing byte ranges.
    pub fn fine_grained() -> Self {
        Self {
            segment_alignment: 1,
            ..Self::default()
        }
    }

    /// Options with name interning disabled.
    pub fn no_interning() -> Self {
        Self {
            intern_names: false,
            ..Self::default()
        }
    }

    /// Set the download segment alignment. Zero is treated as one.
    pub fn with_segment_alignment(mut self, alignment: u64) -> Self {
        self.segment_alignment = alignment.max(1);
        self
    }

    pub fn with_name_interning(mut self, enabled: bool) -> Self {
        self.intern_names = enabled;
        self
    }
}
