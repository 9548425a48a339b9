//! Shared fixture for the availability tests
//!
//! A `TestDocument` lays its objects out in fixed size slots of a byte buffer
//! and parses them back through a `ReadValidator`, so availability is decided
//! by the same validator and holder code a real document would go through.

#![allow(dead_code)]

use pdfavail::objects::Object;
use pdfavail::parser::{
    ByteSource, IndirectObjectHolder, ParseOptions, ProgressiveBuffer, ReadValidator,
};
use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::rc::Rc;

/// Bytes reserved for each object
pub const SLOT_SIZE: u64 = 64;

/// Progressive buffer whose reads can be made to fail.
pub struct TestSource {
    buffer: ProgressiveBuffer,
    broken_offsets: RefCell<BTreeSet<u64>>,
}

impl ByteSource for TestSource {
    fn size(&self) -> u64 {
        self.buffer.size()
    }

    fn is_data_available(&self, offset: u64, size: u64) -> bool {
        self.buffer.is_data_available(offset, size)
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        if self.broken_offsets.borrow().contains(&offset) {
            return Err(io::Error::other("checksum mismatch"));
        }
        self.buffer.read_at(offset, buf)
    }
}

pub struct TestDocument {
    pub source: Rc<TestSource>,
    pub validator: Rc<ReadValidator>,
    objects: Rc<BTreeMap<u32, Object>>,
    parse_count: Rc<Cell<usize>>,
}

impl TestDocument {
    /// A document containing `objects`, none of whose bytes have arrived.
    pub fn new(objects: impl IntoIterator<Item = (u32, Object)>) -> Self {
        let objects: BTreeMap<u32, Object> = objects.into_iter().collect();
        let slots = objects.keys().next_back().copied().unwrap_or(0) as u64 + 1;
        let source = Rc::new(TestSource {
            buffer: ProgressiveBuffer::new(slots * SLOT_SIZE),
            broken_offsets: RefCell::new(BTreeSet::new()),
        });
        let validator = Rc::new(ReadValidator::with_options(
            source.clone(),
            ParseOptions::fine_grained(),
        ));
        Self {
            source,
            validator,
            objects: Rc::new(objects),
            parse_count: Rc::new(Cell::new(0)),
        }
    }

    /// A holder that parses this document's objects through the validator.
    ///
    /// An object parses once all bytes of its slot are available. Numbers
    /// that are not part of the document never parse.
    pub fn holder(&self) -> IndirectObjectHolder {
        let validator = self.validator.clone();
        let objects = self.objects.clone();
        let parse_count = self.parse_count.clone();
        IndirectObjectHolder::with_parser(Box::new(move |objnum: u32| {
            let object = objects.get(&objnum)?;
            parse_count.set(parse_count.get() + 1);
            let mut slot = vec![0u8; SLOT_SIZE as usize];
            validator
                .read_block_at_offset(&mut slot, slot_offset(objnum))
                .then(|| object.clone())
        }))
    }

    pub fn make_available(&self, objnum: u32) {
        let bytes = vec![b' '; SLOT_SIZE as usize];
        self.source
            .buffer
            .append_at(slot_offset(objnum), &bytes)
            .expect("slot lies inside the document");
    }

    pub fn make_all_available(&self) {
        let numbers: Vec<u32> = self.objects.keys().copied().collect();
        for objnum in numbers {
            self.make_available(objnum);
        }
    }

    /// The object's bytes are present but reading them fails.
    pub fn break_object(&self, objnum: u32) {
        self.make_available(objnum);
        self.source
            .broken_offsets
            .borrow_mut()
            .insert(slot_offset(objnum));
    }

    pub fn repair_object(&self, objnum: u32) {
        self.source
            .broken_offsets
            .borrow_mut()
            .remove(&slot_offset(objnum));
    }

    /// Serves every outstanding download hint.
    pub fn serve_download_hints(&self) -> usize {
        let hints = self.validator.take_download_hints();
        for segment in &hints {
            let bytes = vec![b' '; segment.size as usize];
            self.source
                .buffer
                .append_at(segment.offset, &bytes)
                .expect("hints are clamped to the document");
        }
        hints.len()
    }

    /// Parse attempts made by the holder so far, failed ones included.
    pub fn parse_count(&self) -> usize {
        self.parse_count.get()
    }
}

pub fn slot_offset(objnum: u32) -> u64 {
    objnum as u64 * SLOT_SIZE
}

/// Installs a test subscriber; `RUST_LOG=pdfavail=trace` shows resolver steps.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
