//! # pdfavail
//!
//! PDF object model with incremental availability checking for documents
//! that are still being downloaded.
//!
//! ## Features
//!
//! - **Object model**: the nine PDF object kinds, with arrays and dictionaries
//!   whose iteration borrows the container so it cannot be mutated mid-walk
//! - **Indirect objects**: a per-document holder that parses numbered objects
//!   on demand and caches them
//! - **Read validation**: reads over a partially downloaded file fail softly,
//!   record what went missing and produce download hints
//! - **Object walker**: iterative pre-order traversal with pruning
//! - **Availability checking**: decides whether an object and its
//!   dependencies can be parsed yet, cycle safe and resumable, with a page
//!   aware variant that ignores sibling pages
//!
//! ## Quick Start
//!
//! ```rust
//! use pdfavail::objects::{Dictionary, Object};
//! use pdfavail::parser::{IndirectObjectHolder, ProgressiveBuffer, ReadValidator};
//! use pdfavail::{DocAvailStatus, ObjectAvail};
//! use std::rc::Rc;
//!
//! // The document is 1 KiB long and nothing has arrived yet
//! let buffer = Rc::new(ProgressiveBuffer::new(1024));
//! let validator = Rc::new(ReadValidator::new(buffer.clone()));
//!
//! // Stand-in for a real parser: object 2 lives at offset 600
//! let reader = validator.clone();
//! let holder = IndirectObjectHolder::with_parser(Box::new(move |objnum: u32| {
//!     let mut byte = [0u8; 1];
//!     (objnum == 2 && reader.read_block_at_offset(&mut byte, 600))
//!         .then(|| Object::from(i64::from(byte[0])))
//! }));
//!
//! let mut catalog = Dictionary::new();
//! catalog.set_for("Pages", Object::Reference(2));
//! let mut avail = ObjectAvail::new(&validator, &holder, Rc::new(Object::from(catalog)));
//!
//! assert_eq!(avail.check_avail(), DocAvailStatus::DataNotAvailable);
//! for segment in validator.take_download_hints() {
//!     // fetch segment.offset..segment.end() from the network
//!     let bytes = vec![7u8; segment.size as usize];
//!     buffer.append_at(segment.offset, &bytes)?;
//! }
//! assert_eq!(avail.check_avail(), DocAvailStatus::DataAvailable);
//! # Ok::<(), pdfavail::PdfError>(())
//! ```

pub mod avail;
pub mod error;
pub mod objects;
pub mod parser;
pub mod walker;

pub use avail::{
    DefaultExclusion, DocAvailStatus, ExclusionPolicy, ObjectAvail, PageExclusion,
    PageObjectAvail,
};
pub use error::{PdfError, Result};
pub use objects::{Array, Dictionary, Object, PdfName, PdfString, Stream};
pub use parser::{IndirectObjectHolder, ParseOptions, ReadValidator};
pub use walker::ObjectWalker;

/// Current version of pdfavail
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
