//! Document-wide pool of names
//!
//! Dictionaries of a single document repeat the same keys (`Type`, `Length`,
//! `Filter`, ...) thousands of times. Names longer than the inline capacity of
//! [`PdfName`] are heap allocated, so routing them through a pool lets every
//! occurrence share one allocation.

use crate::objects::PdfName;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use std::cell::RefCell;

#[derive(Debug, Default)]
pub struct StringPool {
    names: RefCell<FxHashSet<SmolStr>>,
}

impl StringPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a name equal to `name`, sharing storage with any equal name
    /// interned before.
    pub fn intern(&self, name: &str) -> PdfName {
        let mut names = self.names.borrow_mut();
        if let Some(existing) = names.get(name) {
            return PdfName::from_smol_str(existing.clone());
        }
        let interned = SmolStr::new(name);
        names.insert(interned.clone());
        PdfName::from_smol_str(interned)
    }

    /// Adds an existing name to the pool, returning the pooled copy.
    pub fn intern_name(&self, name: &PdfName) -> PdfName {
        let mut names = self.names.borrow_mut();
        if let Some(existing) = names.get(name.as_str()) {
            return PdfName::from_smol_str(existing.clone());
        }
        names.insert(name.as_smol_str().clone());
        name.clone()
    }

    pub fn len(&self) -> usize {
        self.names.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.names.borrow_mut().clear();
    }
}
