//! Cycle-safe cloning through references
//!
//! A plain [`Clone`] copies an object tree and keeps references as references.
//! The functions here instead replace each reference by a copy of the object it
//! names, which on a cyclic object graph would never terminate. To keep the
//! result finite, a reference whose target is already on the path from the
//! clone root is dropped: an array loses that element, a dictionary loses that
//! entry. The clone therefore contains no reference at all and no cycle, at the
//! price of losing back-edges.

use crate::objects::{Array, Dictionary, Object, Stream};
use crate::parser::IndirectObjectHolder;
use rustc_hash::FxHashSet;

/// Nesting beyond this depth is dropped from a clone.
pub const MAX_RECURSION_DEPTH: usize = 1000;

impl Object {
    /// Deep copy with every reference replaced by a copy of its target.
    ///
    /// Returns `None` only when `self` is a reference that cannot be resolved.
    pub fn clone_direct(&self, holder: &IndirectObjectHolder) -> Option<Object> {
        let mut visited = FxHashSet::default();
        self.clone_non_cyclic(holder, &mut visited)
    }

    /// Same as [`Object::clone_direct`] with a caller supplied set of object
    /// numbers that count as already visited.
    ///
    /// Seeding `visited` with the number of the object being cloned drops
    /// references back to it. The set is extended while descending and is
    /// back to its original contents when this returns.
    pub fn clone_non_cyclic(
        &self,
        holder: &IndirectObjectHolder,
        visited: &mut FxHashSet<u32>,
    ) -> Option<Object> {
        clone_object(self, holder, visited, 0)
    }
}

fn clone_object(
    object: &Object,
    holder: &IndirectObjectHolder,
    visited: &mut FxHashSet<u32>,
    depth: usize,
) -> Option<Object> {
    if depth > MAX_RECURSION_DEPTH {
        tracing::debug!(depth, "clone depth limit reached, dropping subtree");
        return None;
    }

    match object {
        Object::Reference(objnum) => {
            if visited.contains(objnum) {
                tracing::trace!(objnum, "dropping back-edge while cloning");
                return None;
            }
            let target = holder.get_or_parse_indirect_object(*objnum)?;
            visited.insert(*objnum);
            let cloned = clone_object(&target, holder, visited, depth + 1);
            visited.remove(objnum);
            cloned
        }
        Object::Array(array) => {
            let mut copy = Array::with_capacity(array.len());
            for element in array.lock() {
                if let Some(cloned) = clone_object(element, holder, visited, depth + 1) {
                    copy.append(cloned);
                }
            }
            Some(Object::Array(copy))
        }
        Object::Dictionary(dict) => Some(Object::Dictionary(clone_dictionary(
            dict, holder, visited, depth,
        ))),
        Object::Stream(stream) => {
            let dict = clone_dictionary(stream.dict(), holder, visited, depth);
            Some(Object::Stream(Stream::with_dictionary(
                dict,
                stream.raw_data().to_vec(),
            )))
        }
        leaf => Some(leaf.clone()),
    }
}

fn clone_dictionary(
    dict: &Dictionary,
    holder: &IndirectObjectHolder,
    visited: &mut FxHashSet<u32>,
    depth: usize,
) -> Dictionary {
    let mut copy = Dictionary::with_capacity(dict.len());
    for (key, value) in dict.lock() {
        if let Some(cloned) = clone_object(value, holder, visited, depth + 1) {
            copy.set_for(key.clone(), cloned);
        }
    }
    copy
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_reference(object: &Object) -> bool {
        object.walk().any(Object::is_reference)
    }

    #[test]
    fn test_clone_direct_resolves_references() {
        let holder = IndirectObjectHolder::new();
        let font = holder.add_indirect_object(Object::name("Helvetica")).unwrap();

        let mut dict = Dictionary::new();
        dict.set_for("Font", Object::Reference(font));
        let cloned = Object::from(dict)
            .clone_direct(&holder)
            .expect("direct object clones");

        assert_eq!(
            cloned.as_dict().map(|d| d.get_name_for("Font")),
            Some("Helvetica")
        );
        assert!(!has_reference(&cloned));
    }

    #[test]
    fn test_clone_direct_breaks_cycles() {
        // 1 -> [2 0 R]  and  2 -> << /Back 1 0 R /Value 7 >>
        let holder = IndirectObjectHolder::new();
        let mut two = Dictionary::new();
        two.set_for("Back", Object::Reference(1));
        two.set_for("Value", Object::from(7));
        holder
            .insert_indirect_object(1, Object::from(vec![Object::Reference(2)]))
            .unwrap();
        holder.insert_indirect_object(2, Object::from(two)).unwrap();

        let cloned = Object::Reference(1)
            .clone_direct(&holder)
            .expect("root resolves");

        assert!(!has_reference(&cloned));
        let array = cloned.as_array().expect("object 1 is an array");
        assert_eq!(array.len(), 1);
        let inner = array.get_dict_at(0).expect("object 2 was inlined");
        assert_eq!(inner.get_integer_for("Value"), 7);
        assert!(
            !inner.key_exists("Back"),
            "The back-edge to object 1 must be dropped"
        );
    }

    #[test]
    fn test_clone_direct_self_reference() {
        let holder = IndirectObjectHolder::new();
        let mut dict = Dictionary::new();
        dict.set_for("Self", Object::Reference(1));
        dict.set_for("Keep", Object::from(true));
        holder.insert_indirect_object(1, Object::from(dict)).unwrap();

        let target = holder.get_indirect_object(1).unwrap();
        let mut visited = FxHashSet::default();
        visited.insert(1);
        let cloned = target
            .clone_non_cyclic(&holder, &mut visited)
            .expect("dictionary clones");

        let dict = cloned.as_dict().unwrap();
        assert!(!dict.key_exists("Self"));
        assert!(dict.get_bool_for("Keep", false));
        assert_eq!(visited.len(), 1, "Visited set is restored on return");
    }

    #[test]
    fn test_clone_direct_drops_dangling_references() {
        let holder = IndirectObjectHolder::new();
        let array = Object::from(vec![Object::Reference(40), Object::from(1)]);

        let cloned = array.clone_direct(&holder).unwrap();
        assert_eq!(cloned.as_array().map(Array::len), Some(1));

        assert!(Object::Reference(40).clone_direct(&holder).is_none());
    }

    #[test]
    fn test_shared_target_is_cloned_for_each_parent() {
        let holder = IndirectObjectHolder::new();
        let shared = holder.add_indirect_object(Object::from(5)).unwrap();
        let array = Object::from(vec![Object::Reference(shared), Object::Reference(shared)]);

        let cloned = array.clone_direct(&holder).unwrap();
        let cloned = cloned.as_array().unwrap();
        assert_eq!(cloned.len(), 2);
        assert_eq!(cloned.get_integer_at(0), 5);
        assert_eq!(cloned.get_integer_at(1), 5);
    }

    #[test]
    fn test_clone_stream_keeps_payload() {
        let holder = IndirectObjectHolder::new();
        let length = holder.add_indirect_object(Object::from(3)).unwrap();
        let mut dict = Dictionary::new();
        dict.set_for("DecodeParms", Object::Reference(length));
        let stream = Object::from(Stream::with_dictionary(dict, vec![9, 8, 7]));

        let cloned = stream.clone_direct(&holder).unwrap();
        let cloned = cloned.as_stream().unwrap();
        assert_eq!(cloned.raw_data(), &[9, 8, 7]);
        assert_eq!(cloned.dict().get_integer_for("DecodeParms"), 3);
    }
}
