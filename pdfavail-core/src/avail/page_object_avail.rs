use super::{DocAvailStatus, ObjectAvail, PageExclusion};
use crate::objects::Object;
use crate::parser::{IndirectObjectHolder, ReadValidator};
use std::rc::Rc;

/// Availability of a single page.
///
/// Same as [`ObjectAvail`] with [`PageExclusion`]: other page dictionaries
/// reached through the page's resources or annotations are not descended
/// into, so the check covers this page's own dependencies only.
pub struct PageObjectAvail<'a> {
    inner: ObjectAvail<'a, PageExclusion>,
}

impl<'a> PageObjectAvail<'a> {
    pub fn new(
        validator: &'a ReadValidator,
        holder: &'a IndirectObjectHolder,
        page: Rc<Object>,
    ) -> Self {
        Self {
            inner: ObjectAvail::with_policy(validator, holder, page, PageExclusion),
        }
    }

    pub fn from_object_number(
        validator: &'a ReadValidator,
        holder: &'a IndirectObjectHolder,
        objnum: u32,
    ) -> Self {
        Self::new(validator, holder, Rc::new(Object::Reference(objnum)))
    }

    pub fn check_avail(&mut self) -> DocAvailStatus {
        self.inner.check_avail()
    }

    pub fn pending_count(&self) -> usize {
        self.inner.pending_count()
    }

    pub fn parsed_count(&self) -> usize {
        self.inner.parsed_count()
    }
}
