use super::{DefaultExclusion, DocAvailStatus, ExclusionPolicy};
use crate::objects::Object;
use crate::parser::{IndirectObjectHolder, ReadValidator};
use crate::walker::ObjectWalker;
use rustc_hash::FxHashSet;
use std::cell::Cell;
use std::rc::Rc;

/// Checks whether an object and its references can be parsed yet.
///
/// Call [`check_avail`](ObjectAvail::check_avail) again each time more of the
/// document has arrived. Objects proven available are never parsed again, and
/// reference cycles terminate because each object number is checked at most
/// once per call.
///
/// Several checkers may share one validator and holder as long as their
/// calls do not overlap.
pub struct ObjectAvail<'a, P: ExclusionPolicy = DefaultExclusion> {
    validator: &'a ReadValidator,
    holder: &'a IndirectObjectHolder,
    root: Option<Rc<Object>>,
    policy: P,
    non_parsed_objects: Vec<u32>,
    parsed_objnums: FxHashSet<u32>,
    read_error_seen: Cell<bool>,
}

impl<'a> ObjectAvail<'a> {
    /// Checker for an object already in hand.
    pub fn new(
        validator: &'a ReadValidator,
        holder: &'a IndirectObjectHolder,
        root: Rc<Object>,
    ) -> Self {
        Self::with_policy(validator, holder, root, DefaultExclusion)
    }

    /// Checker for the indirect object `objnum`, which need not be parsed yet.
    pub fn from_object_number(
        validator: &'a ReadValidator,
        holder: &'a IndirectObjectHolder,
        objnum: u32,
    ) -> Self {
        Self::new(validator, holder, Rc::new(Object::Reference(objnum)))
    }
}

impl<'a, P: ExclusionPolicy> ObjectAvail<'a, P> {
    pub fn with_policy(
        validator: &'a ReadValidator,
        holder: &'a IndirectObjectHolder,
        root: Rc<Object>,
        policy: P,
    ) -> Self {
        Self {
            validator,
            holder,
            root: Some(root),
            policy,
            non_parsed_objects: Vec::new(),
            parsed_objnums: FxHashSet::default(),
            read_error_seen: Cell::new(false),
        }
    }

    /// Object numbers still waiting for data.
    pub fn pending_count(&self) -> usize {
        self.non_parsed_objects.len()
    }

    /// Object numbers proven available so far. Reset once the check succeeds.
    pub fn parsed_count(&self) -> usize {
        self.parsed_objnums.len()
    }

    /// Parses as much as currently possible and reports the result.
    ///
    /// Objects already verified are never parsed again. Calling this again
    /// without new data only retries the numbers still pending.
    ///
    /// Once this returns [`DocAvailStatus::DataAvailable`] the working state is
    /// released and later calls keep returning `DataAvailable`.
    pub fn check_avail(&mut self) -> DocAvailStatus {
        self.read_error_seen.set(false);

        let status = if !self.load_root_object() {
            DocAvailStatus::DataNotAvailable
        } else if self.check_objects() {
            self.clean_memory();
            DocAvailStatus::DataAvailable
        } else {
            DocAvailStatus::DataNotAvailable
        };

        if status != DocAvailStatus::DataAvailable && self.read_error_seen.get() {
            tracing::debug!(
                pending = self.non_parsed_objects.len(),
                "read error while checking availability"
            );
            return DocAvailStatus::DataError;
        }
        tracing::debug!(
            ?status,
            pending = self.non_parsed_objects.len(),
            parsed = self.parsed_objnums.len(),
            "availability checked"
        );
        status
    }

    fn load_root_object(&mut self) -> bool {
        if !self.non_parsed_objects.is_empty() {
            return true;
        }

        while let Some(objnum) = self.root.as_deref().and_then(Object::as_reference) {
            if self.parsed_objnums.contains(&objnum) {
                self.root = None;
                return true;
            }

            let _session = self.validator.session();
            let direct = self.holder.get_or_parse_indirect_object(objnum);
            if self.has_read_problems() {
                tracing::debug!(objnum, "root object not available yet");
                return false;
            }
            self.parsed_objnums.insert(objnum);
            self.root = direct;
        }

        let root = self.root.clone();
        let mut refs = Vec::new();
        if !self.append_object_sub_refs(root.as_deref(), &mut refs) {
            return false;
        }
        tracing::debug!(pending = refs.len(), "root object loaded");
        self.non_parsed_objects = refs;
        true
    }

    fn check_objects(&mut self) -> bool {
        let mut checked_objects = FxHashSet::default();
        let mut objects_to_check = std::mem::take(&mut self.non_parsed_objects);

        while let Some(objnum) = objects_to_check.pop() {
            if self.parsed_objnums.contains(&objnum) || !checked_objects.insert(objnum) {
                continue;
            }

            let _session = self.validator.session();
            let direct = self.holder.get_or_parse_indirect_object(objnum);
            if self.is_root_rc(direct.as_ref()) {
                continue;
            }
            if self.has_read_problems()
                || !self.append_object_sub_refs(direct.as_deref(), &mut objects_to_check)
            {
                tracing::trace!(objnum, "object deferred");
                self.non_parsed_objects.push(objnum);
                continue;
            }
            tracing::trace!(objnum, "object available");
            self.parsed_objnums.insert(objnum);
        }

        self.non_parsed_objects.is_empty()
    }

    /// Pushes the references reachable from `object` onto `refs`.
    ///
    /// Returns false when deciding what to follow touched missing data; `refs`
    /// may then hold a partial result.
    fn append_object_sub_refs(&self, object: Option<&Object>, refs: &mut Vec<u32>) -> bool {
        let mut walker = ObjectWalker::new(object);
        while let Some(obj) = walker.next() {
            let _session = self.validator.session();
            let skip = walker.dictionary_key() == Some("Parent")
                || (!self.is_root(obj) && self.policy.exclude_object(obj, self.holder));

            // The policy may have parsed a referenced field to decide
            if self.has_read_problems() {
                return false;
            }
            if skip {
                walker.skip_walk_into_current_object();
                continue;
            }
            if let Object::Reference(objnum) = obj {
                refs.push(*objnum);
            }
        }
        true
    }

    fn has_read_problems(&self) -> bool {
        if self.validator.read_error() {
            self.read_error_seen.set(true);
        }
        self.validator.has_read_problems()
    }

    fn is_root(&self, object: &Object) -> bool {
        self.root
            .as_ref()
            .is_some_and(|root| std::ptr::eq(Rc::as_ptr(root), object))
    }

    fn is_root_rc(&self, object: Option<&Rc<Object>>) -> bool {
        match (object, &self.root) {
            (Some(object), Some(root)) => Rc::ptr_eq(object, root),
            _ => false,
        }
    }

    fn clean_memory(&mut self) {
        self.root = None;
        self.parsed_objnums.clear();
    }
}
