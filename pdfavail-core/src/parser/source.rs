//! Byte sources that may not hold the whole document yet

use crate::error::{PdfError, Result};
use std::cell::RefCell;
use std::io;
use std::ops::Range;

/// Random access to the bytes of a document.
///
/// A source knows the final size of the document up front but may only hold
/// some of its bytes. Callers must check [`ByteSource::is_data_available`]
/// before reading; `read_at` on unavailable bytes is an error.
pub trait ByteSource {
    /// Total size of the document in bytes.
    fn size(&self) -> u64;

    /// Whether every byte in `offset..offset + size` has arrived.
    fn is_data_available(&self, offset: u64, size: u64) -> bool;

    /// Fill `buf` with the bytes starting at `offset`.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()>;
}

fn unexpected_eof(offset: u64, len: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!("{len} bytes at offset {offset} are not available"),
    )
}

impl ByteSource for Vec<u8> {
    fn size(&self) -> u64 {
        self.len() as u64
    }

    fn is_data_available(&self, offset: u64, size: u64) -> bool {
        offset
            .checked_add(size)
            .is_some_and(|end| end <= self.len() as u64)
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        if !self.is_data_available(offset, buf.len() as u64) {
            return Err(unexpected_eof(offset, buf.len()));
        }
        let start = offset as usize;
        buf.copy_from_slice(&self[start..start + buf.len()]);
        Ok(())
    }
}

#[derive(Debug, Default)]
struct BufferState {
    data: Vec<u8>,
    /// Sorted, disjoint and non-adjacent
    available: Vec<Range<u64>>,
}

impl BufferState {
    fn mark_available(&mut self, mut range: Range<u64>) {
        let mut merged = Vec::with_capacity(self.available.len() + 1);
        let mut placed = false;
        for existing in self.available.drain(..) {
            if existing.end < range.start {
                merged.push(existing);
            } else if range.end < existing.start {
                if !placed {
                    merged.push(range.clone());
                    placed = true;
                }
                merged.push(existing);
            } else {
                range.start = range.start.min(existing.start);
                range.end = range.end.max(existing.end);
            }
        }
        if !placed {
            merged.push(range);
        }
        self.available = merged;
    }

    fn covers(&self, offset: u64, size: u64) -> bool {
        let Some(end) = offset.checked_add(size) else {
            return false;
        };
        if end > self.data.len() as u64 {
            return false;
        }
        if size == 0 {
            return true;
        }
        self.available
            .iter()
            .any(|range| range.start <= offset && end <= range.end)
    }
}

/// In-memory document that receives its bytes in chunks, in any order.
///
/// This is the shape of a download in progress: the total size is known from
/// the start and the ranges that have arrived so far are tracked.
#[derive(Debug)]
pub struct ProgressiveBuffer {
    state: RefCell<BufferState>,
}

impl ProgressiveBuffer {
    pub fn new(size: u64) -> Self {
        Self {
            state: RefCell::new(BufferState {
                data: vec![0; size as usize],
                available: Vec::new(),
            }),
        }
    }

    /// A buffer whose bytes have all arrived.
    pub fn complete(data: Vec<u8>) -> Self {
        let buffer = Self::new(data.len() as u64);
        {
            let mut state = buffer.state.borrow_mut();
            let len = data.len() as u64;
            state.data = data;
            if len > 0 {
                state.mark_available(0..len);
            }
        }
        buffer
    }

    /// Store `bytes` at `offset` and mark them available.
    pub fn append_at(&self, offset: u64, bytes: &[u8]) -> Result<()> {
        let size = self.size();
        let len = bytes.len() as u64;
        let end = offset
            .checked_add(len)
            .filter(|end| *end <= size)
            .ok_or(PdfError::OutOfRange { offset, len, size })?;
        if len == 0 {
            return Ok(());
        }

        let mut state = self.state.borrow_mut();
        state.data[offset as usize..end as usize].copy_from_slice(bytes);
        state.mark_available(offset..end);
        tracing::trace!(offset, len, "bytes arrived");
        Ok(())
    }

    /// Number of bytes that have arrived so far.
    pub fn available_bytes(&self) -> u64 {
        self.state
            .borrow()
            .available
            .iter()
            .map(|range| range.end - range.start)
            .sum()
    }

    pub fn is_complete(&self) -> bool {
        self.available_bytes() == self.size()
    }
}

impl ByteSource for ProgressiveBuffer {
    fn size(&self) -> u64 {
        self.state.borrow().data.len() as u64
    }

    fn is_data_available(&self, offset: u64, size: u64) -> bool {
        self.state.borrow().covers(offset, size)
    }

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> io::Result<()> {
        let state = self.state.borrow();
        if !state.covers(offset, buf.len() as u64) {
            return Err(unexpected_eof(offset, buf.len()));
        }
        let start = offset as usize;
        buf.copy_from_slice(&state.data[start..start + buf.len()]);
        Ok(())
    }
}
