//! Read validation over a partially downloaded document
//!
//! Every read a parser makes goes through [`ReadValidator::read_block_at_offset`].
//! When the requested bytes have not arrived, the read fails softly: the
//! validator remembers that data was missing and records which range should be
//! downloaded next. Callers open a [`Session`] around one parse attempt to see
//! only the problems that attempt caused.

use super::source::ByteSource;
use super::ParseOptions;
use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::Rc;

/// Byte range that should be fetched before retrying
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Segment {
    pub offset: u64,
    pub size: u64,
}

impl Segment {
    pub fn end(&self) -> u64 {
        self.offset.saturating_add(self.size)
    }
}

pub struct ReadValidator {
    source: Rc<dyn ByteSource>,
    options: ParseOptions,
    read_error: Cell<bool>,
    has_unavailable_data: Cell<bool>,
    hints: RefCell<BTreeSet<Segment>>,
}

impl fmt::Debug for ReadValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReadValidator")
            .field("size", &self.source.size())
            .field("read_error", &self.read_error.get())
            .field("has_unavailable_data", &self.has_unavailable_data.get())
            .field("pending_hints", &self.hints.borrow().len())
            .finish()
    }
}

impl ReadValidator {
    pub fn new(source: Rc<dyn ByteSource>) -> Self {
        Self::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: Rc<dyn ByteSource>, options: ParseOptions) -> Self {
        Self {
            source,
            options,
            read_error: Cell::new(false),
            has_unavailable_data: Cell::new(false),
            hints: RefCell::new(BTreeSet::new()),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn size(&self) -> u64 {
        self.source.size()
    }

    /// The byte source failed to deliver bytes it claimed to have.
    pub fn read_error(&self) -> bool {
        self.read_error.get()
    }

    /// A read asked for bytes that have not arrived yet.
    pub fn has_unavailable_data(&self) -> bool {
        self.has_unavailable_data.get()
    }

    pub fn has_read_problems(&self) -> bool {
        self.read_error() || self.has_unavailable_data()
    }

    pub fn reset_errors(&self) {
        self.read_error.set(false);
        self.has_unavailable_data.set(false);
    }

    /// Starts a parse attempt with clean flags.
    ///
    /// Whatever the attempt records is folded back into the flags seen before
    /// the session when it is dropped.
    pub fn session(&self) -> Session<'_> {
        Session::new(self)
    }

    /// Reads `buf.len()` bytes at `offset`.
    ///
    /// Returns false without touching any flag when the range runs past the
    /// end of the document. Missing bytes set [`has_unavailable_data`] and
    /// schedule a download; a failing source also sets [`read_error`].
    ///
    /// [`has_unavailable_data`]: ReadValidator::has_unavailable_data
    /// [`read_error`]: ReadValidator::read_error
    pub fn read_block_at_offset(&self, buf: &mut [u8], offset: u64) -> bool {
        let len = buf.len() as u64;
        match offset.checked_add(len) {
            Some(end) if end <= self.size() => {}
            _ => return false,
        }

        if !self.source.is_data_available(offset, len) {
            self.schedule_download(offset, len);
            return false;
        }

        if let Err(err) = self.source.read_at(offset, buf) {
            tracing::warn!(offset, len, error = %err, "byte source read failed");
            self.read_error.set(true);
            self.schedule_download(offset, len);
            return false;
        }
        true
    }

    pub fn is_whole_file_available(&self) -> bool {
        self.source.is_data_available(0, self.size())
    }

    pub fn check_whole_file_and_request_if_unavailable(&self) -> bool {
        if self.is_whole_file_available() {
            return true;
        }
        self.schedule_download(0, self.size());
        false
    }

    /// Checks `offset..offset + size` without reading it, requesting a
    /// download when it is missing.
    ///
    /// A range starting past the end of the document is trivially available;
    /// one that runs past the end is clamped.
    pub fn check_data_range_and_request_if_unavailable(&self, offset: u64, size: u64) -> bool {
        let file_size = self.size();
        if offset > file_size {
            return true;
        }
        let size = offset.saturating_add(size).min(file_size) - offset;
        if self.source.is_data_available(offset, size) {
            return true;
        }
        self.schedule_download(offset, size);
        false
    }

    /// Drains the download requests recorded so far, sorted by offset.
    pub fn take_download_hints(&self) -> Vec<Segment> {
        std::mem::take(&mut *self.hints.borrow_mut())
            .into_iter()
            .collect()
    }

    fn schedule_download(&self, offset: u64, size: u64) {
        self.has_unavailable_data.set(true);

        let file_size = self.size();
        if size == 0 || offset >= file_size {
            return;
        }
        let alignment = self.options.segment_alignment.max(1);
        let start = offset / alignment * alignment;
        let end = offset
            .saturating_add(size)
            .div_ceil(alignment)
            .saturating_mul(alignment)
            .min(file_size);

        let segment = Segment {
            offset: start,
            size: end - start,
        };
        tracing::trace!(offset = segment.offset, size = segment.size, "download scheduled");
        self.hints.borrow_mut().insert(segment);
    }
}

/// Scope of one parse attempt on a [`ReadValidator`]
///
/// On creation the validator's flags are saved and cleared; on drop the saved
/// flags are OR-ed back in. Inside the session the flags describe this attempt
/// only, while code outside still observes every problem.
#[must_use = "the session ends as soon as it is dropped"]
pub struct Session<'a> {
    validator: &'a ReadValidator,
    saved_read_error: bool,
    saved_has_unavailable_data: bool,
}

impl<'a> Session<'a> {
    fn new(validator: &'a ReadValidator) -> Self {
        let session = Self {
            validator,
            saved_read_error: validator.read_error(),
            saved_has_unavailable_data: validator.has_unavailable_data(),
        };
        validator.reset_errors();
        session
    }

    pub fn validator(&self) -> &'a ReadValidator {
        self.validator
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        let validator = self.validator;
        validator
            .read_error
            .set(validator.read_error.get() | self.saved_read_error);
        validator
            .has_unavailable_data
            .set(validator.has_unavailable_data.get() | self.saved_has_unavailable_data);
    }
}
