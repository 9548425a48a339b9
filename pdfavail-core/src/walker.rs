//! Depth-first traversal of an object tree
//!
//! [`ObjectWalker`] yields a root object and then every object it owns,
//! pre-order, without following references. It keeps an explicit stack of
//! child iterators instead of recursing, so arbitrarily deep trees cannot
//! exhaust the call stack.
//!
//! Between two calls to `next` the walker can be asked where the last object
//! was found ([`ObjectWalker::parent`], [`ObjectWalker::dictionary_key`],
//! [`ObjectWalker::current_depth`]) and told not to descend into it
//! ([`ObjectWalker::skip_walk_into_current_object`]). Policies such as
//! availability checking build on that without the walker knowing about them.
//!
//! ```
//! use pdfavail::objects::{Dictionary, Object};
//!
//! let mut page = Dictionary::new();
//! page.set_for("Type", Object::name("Page"));
//! page.set_for("Contents", Object::Reference(4));
//! let page = Object::from(page);
//!
//! let references: Vec<u32> = page.walk().filter_map(Object::as_reference).collect();
//! assert_eq!(references, vec![4]);
//! ```

use crate::objects::{Object, PdfName};
use std::iter::FusedIterator;

enum Children<'a> {
    Array(std::slice::Iter<'a, Object>),
    /// Entries of a dictionary, or of a stream's dictionary
    Entries(indexmap::map::Iter<'a, PdfName, Object>),
}

struct SubobjectIterator<'a> {
    object: &'a Object,
    children: Children<'a>,
    started: bool,
}

impl<'a> SubobjectIterator<'a> {
    fn new(object: &'a Object) -> Option<Self> {
        let children = match object {
            Object::Array(array) => Children::Array(array.lock().into_iter()),
            Object::Dictionary(dict) => Children::Entries(dict.lock().into_iter()),
            Object::Stream(stream) => Children::Entries(stream.dict().lock().into_iter()),
            _ => return None,
        };
        Some(Self {
            object,
            children,
            started: false,
        })
    }

    fn increment(&mut self) -> Option<(&'a Object, Option<&'a PdfName>)> {
        let next = match &mut self.children {
            Children::Array(elements) => elements.next().map(|element| (element, None)),
            Children::Entries(entries) => entries.next().map(|(key, value)| (value, Some(key))),
        };
        self.started = true;
        next
    }
}

/// Lazy pre-order walk over an object and everything it owns inline.
///
/// The walk is single use; build a new walker to traverse again.
pub struct ObjectWalker<'a> {
    next_object: Option<&'a Object>,
    parent: Option<&'a Object>,
    dict_key: Option<&'a PdfName>,
    current_depth: usize,
    stack: Vec<SubobjectIterator<'a>>,
}

impl<'a> ObjectWalker<'a> {
    /// Walker starting at `root`. A `None` root yields nothing.
    pub fn new(root: impl Into<Option<&'a Object>>) -> Self {
        Self {
            next_object: root.into(),
            parent: None,
            dict_key: None,
            current_depth: 0,
            stack: Vec::new(),
        }
    }

    /// Depth of the object returned last; the root is at depth 0.
    pub fn current_depth(&self) -> usize {
        self.current_depth
    }

    /// Container of the object returned last. `None` for the root.
    pub fn parent(&self) -> Option<&'a Object> {
        self.parent
    }

    /// Key under which the object returned last sits in its parent's
    /// dictionary, when the parent is a dictionary or a stream.
    pub fn dictionary_key(&self) -> Option<&'a str> {
        self.dict_key.map(PdfName::as_str)
    }

    /// Do not visit the children of the object returned last.
    ///
    /// Has no effect once the walk has moved into those children, or when the
    /// object has none.
    pub fn skip_walk_into_current_object(&mut self) {
        if self.stack.last().is_some_and(|top| !top.started) {
            self.stack.pop();
        }
    }
}

impl<'a> Iterator for ObjectWalker<'a> {
    type Item = &'a Object;

    fn next(&mut self) -> Option<&'a Object> {
        loop {
            if let Some(object) = self.next_object.take() {
                if let Some(children) = SubobjectIterator::new(object) {
                    self.stack.push(children);
                }
                return Some(object);
            }

            let top = self.stack.last_mut()?;
            match top.increment() {
                Some((child, key)) => {
                    self.parent = Some(top.object);
                    self.dict_key = key;
                    self.next_object = Some(child);
                    self.current_depth = self.stack.len();
                }
                None => {
                    self.stack.pop();
                    if self.stack.is_empty() {
                        self.parent = None;
                        self.dict_key = None;
                        self.current_depth = 0;
                    }
                }
            }
        }
    }
}

impl FusedIterator for ObjectWalker<'_> {}

impl Object {
    /// Pre-order walk over this object and its inline children.
    pub fn walk(&self) -> ObjectWalker<'_> {
        ObjectWalker::new(self)
    }
}
