//! Owner of a document's indirect objects

use super::ParseOptions;
use crate::error::{PdfError, Result};
use crate::objects::{Object, PdfName, StringPool, INVALID_OBJECT_NUMBER};
use rustc_hash::FxHashMap;
use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

/// Materialises indirect objects from the document bytes.
///
/// Implemented by the tokenizer/cross-reference layer. `None` means the object
/// cannot be produced right now, either because it does not exist or because
/// its bytes have not arrived; the holder will ask again on the next lookup.
pub trait IndirectObjectParser {
    fn parse_indirect_object(&self, objnum: u32) -> Option<Object>;
}

impl<F> IndirectObjectParser for F
where
    F: Fn(u32) -> Option<Object>,
{
    fn parse_indirect_object(&self, objnum: u32) -> Option<Object> {
        self(objnum)
    }
}

/// Object reached through [`IndirectObjectHolder::get_direct_object`]
#[derive(Debug, Clone)]
pub enum Resolved<'a> {
    /// The object was not a reference
    Direct(&'a Object),
    /// The target of a reference, shared with the holder
    Indirect(Rc<Object>),
}

impl Resolved<'_> {
    pub fn is_indirect(&self) -> bool {
        matches!(self, Resolved::Indirect(_))
    }
}

impl Deref for Resolved<'_> {
    type Target = Object;

    fn deref(&self) -> &Object {
        match self {
            Resolved::Direct(object) => object,
            Resolved::Indirect(object) => object,
        }
    }
}

/// Every numbered object of one document.
///
/// Objects are created lazily the first time they are asked for and kept for
/// the lifetime of the holder. All methods take `&self`, so any number of
/// resolvers can share one holder.
pub struct IndirectObjectHolder {
    objects: RefCell<FxHashMap<u32, Rc<Object>>>,
    last_objnum: Cell<u32>,
    parser: Option<Box<dyn IndirectObjectParser>>,
    string_pool: StringPool,
    options: ParseOptions,
}

impl fmt::Debug for IndirectObjectHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndirectObjectHolder")
            .field("objects", &self.objects.borrow().len())
            .field("last_objnum", &self.last_objnum.get())
            .field("has_parser", &self.parser.is_some())
            .field("options", &self.options)
            .finish()
    }
}

impl Default for IndirectObjectHolder {
    fn default() -> Self {
        Self::new()
    }
}

impl IndirectObjectHolder {
    /// A holder without a parser: only objects added explicitly exist.
    pub fn new() -> Self {
        Self {
            objects: RefCell::new(FxHashMap::default()),
            last_objnum: Cell::new(INVALID_OBJECT_NUMBER),
            parser: None,
            string_pool: StringPool::new(),
            options: ParseOptions::default(),
        }
    }

    pub fn with_parser(parser: Box<dyn IndirectObjectParser>) -> Self {
        Self {
            parser: Some(parser),
            ..Self::new()
        }
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Looks up an object that is already materialised. Never parses.
    pub fn get_indirect_object(&self, objnum: u32) -> Option<Rc<Object>> {
        self.objects.borrow().get(&objnum).cloned()
    }

    /// Looks up an object, asking the parser for it on a miss.
    ///
    /// A successful parse is cached. A failed one is not, so the same number
    /// can be retried once more data is available.
    pub fn get_or_parse_indirect_object(&self, objnum: u32) -> Option<Rc<Object>> {
        if objnum == INVALID_OBJECT_NUMBER {
            return None;
        }
        if let Some(object) = self.get_indirect_object(objnum) {
            return Some(object);
        }

        let parsed = self.parser.as_ref()?.parse_indirect_object(objnum);
        let Some(parsed) = parsed else {
            tracing::trace!(objnum, "indirect object could not be parsed");
            return None;
        };

        let object = self
            .objects
            .borrow_mut()
            .entry(objnum)
            .or_insert_with(|| Rc::new(parsed))
            .clone();
        self.bump_last_objnum(objnum);
        tracing::trace!(objnum, kind = ?object.kind(), "indirect object parsed");
        Some(object)
    }

    /// Number the next [`add_indirect_object`](Self::add_indirect_object)
    /// call will use. Fails once `u32::MAX` has been handed out or seen.
    pub fn next_object_number(&self) -> Result<u32> {
        self.last_objnum
            .get()
            .checked_add(1)
            .ok_or(PdfError::ObjectNumbersExhausted)
    }

    /// Stores `object` under a fresh number and returns that number.
    pub fn add_indirect_object(&self, object: Object) -> Result<u32> {
        let objnum = self.next_object_number()?;
        self.objects.borrow_mut().insert(objnum, Rc::new(object));
        self.last_objnum.set(objnum);
        Ok(objnum)
    }

    /// Stores `object` under a caller chosen number that must still be free.
    pub fn insert_indirect_object(&self, objnum: u32, object: Object) -> Result<Rc<Object>> {
        if objnum == INVALID_OBJECT_NUMBER {
            return Err(PdfError::InvalidObjectNumber(objnum));
        }
        let mut objects = self.objects.borrow_mut();
        if objects.contains_key(&objnum) {
            return Err(PdfError::ObjectNumberInUse(objnum));
        }
        let object = Rc::new(object);
        objects.insert(objnum, object.clone());
        drop(objects);
        self.bump_last_objnum(objnum);
        Ok(object)
    }

    /// Stores `object` under `objnum`, dropping the holder's previous object.
    ///
    /// Anyone still holding the old `Rc` keeps a detached copy.
    pub fn replace_indirect_object(&self, objnum: u32, object: Object) -> Result<Rc<Object>> {
        if objnum == INVALID_OBJECT_NUMBER {
            return Err(PdfError::InvalidObjectNumber(objnum));
        }
        let object = Rc::new(object);
        self.objects.borrow_mut().insert(objnum, object.clone());
        self.bump_last_objnum(objnum);
        Ok(object)
    }

    /// Removes an object. Its number is not handed out again.
    pub fn delete_indirect_object(&self, objnum: u32) -> Option<Rc<Object>> {
        self.objects.borrow_mut().remove(&objnum)
    }

    pub fn last_object_number(&self) -> u32 {
        self.last_objnum.get()
    }

    pub fn len(&self) -> usize {
        self.objects.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.borrow().is_empty()
    }

    /// Numbers of the materialised objects, ascending.
    pub fn object_numbers(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self.objects.borrow().keys().copied().collect();
        numbers.sort_unstable();
        numbers
    }

    /// Follows `object` if it is a reference; otherwise returns it as is.
    ///
    /// `None` means a reference that does not resolve.
    pub fn get_direct_object<'a>(&self, object: &'a Object) -> Option<Resolved<'a>> {
        match object {
            Object::Reference(objnum) => self
                .get_or_parse_indirect_object(*objnum)
                .map(Resolved::Indirect),
            direct => Some(Resolved::Direct(direct)),
        }
    }

    /// Name for use in this document, pooled unless interning is disabled.
    pub fn intern_name(&self, name: &str) -> PdfName {
        if self.options.intern_names {
            self.string_pool.intern(name)
        } else {
            PdfName::new(name)
        }
    }

    pub fn string_pool(&self) -> &StringPool {
        &self.string_pool
    }

    fn bump_last_objnum(&self, objnum: u32) {
        if objnum > self.last_objnum.get() {
            self.last_objnum.set(objnum);
        }
    }
}
