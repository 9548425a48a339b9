use crate::objects::Object;
use crate::parser::IndirectObjectHolder;

/// Decides which objects an availability check does not descend into.
///
/// The policy is consulted for every object reached while collecting
/// references, except the root being checked. Returning true prunes the
/// object's children from the check. The policy may resolve references
/// through `holder`; if that touches data that has not arrived, the object is
/// deferred instead of decided.
///
/// `/Parent` links are always pruned and need no policy.
pub trait ExclusionPolicy {
    fn exclude_object(&self, object: &Object, holder: &IndirectObjectHolder) -> bool;
}

impl<F> ExclusionPolicy for F
where
    F: Fn(&Object, &IndirectObjectHolder) -> bool,
{
    fn exclude_object(&self, object: &Object, holder: &IndirectObjectHolder) -> bool {
        self(object, holder)
    }
}

/// Excludes nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultExclusion;

impl ExclusionPolicy for DefaultExclusion {
    fn exclude_object(&self, _object: &Object, _holder: &IndirectObjectHolder) -> bool {
        false
    }
}

/// Excludes page dictionaries, so a check stays within one page.
///
/// Other pages are reachable from any page through shared ancestors; without
/// this policy checking a single page would require the whole page tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageExclusion;

impl ExclusionPolicy for PageExclusion {
    fn exclude_object(&self, object: &Object, holder: &IndirectObjectHolder) -> bool {
        DefaultExclusion.exclude_object(object, holder) || is_page_dictionary(object, holder)
    }
}

fn is_page_dictionary(object: &Object, holder: &IndirectObjectHolder) -> bool {
    object
        .as_dict()
        .and_then(|dict| dict.get_direct_object_for("Type", holder))
        .is_some_and(|kind| kind.as_name() == Some("Page"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::Dictionary;

    fn typed(kind: Object) -> Object {
        let mut dict = Dictionary::new();
        dict.set_for("Type", kind);
        Object::from(dict)
    }

    #[test]
    fn test_default_excludes_nothing() {
        let holder = IndirectObjectHolder::new();
        assert!(!DefaultExclusion.exclude_object(&typed(Object::name("Page")), &holder));
        assert!(!DefaultExclusion.exclude_object(&Object::Null, &holder));
    }

    #[test]
    fn test_page_exclusion() {
        let holder = IndirectObjectHolder::new();
        assert!(PageExclusion.exclude_object(&typed(Object::name("Page")), &holder));
        assert!(!PageExclusion.exclude_object(&typed(Object::name("Pages")), &holder));
        assert!(!PageExclusion.exclude_object(&typed(Object::string("Page")), &holder));
        assert!(!PageExclusion.exclude_object(&Object::name("Page"), &holder));
    }

    #[test]
    fn test_page_exclusion_resolves_type() {
        let holder = IndirectObjectHolder::new();
        let page_name = holder.add_indirect_object(Object::name("Page")).unwrap();
        assert!(PageExclusion.exclude_object(&typed(Object::Reference(page_name)), &holder));
        assert!(!PageExclusion.exclude_object(&typed(Object::Reference(77)), &holder));
    }

    #[test]
    fn test_closure_policy() {
        let holder = IndirectObjectHolder::new();
        let arrays = |object: &Object, _: &IndirectObjectHolder| object.as_array().is_some();
        assert!(arrays.exclude_object(&Object::from(vec![Object::Null]), &holder));
        assert!(!arrays.exclude_object(&Object::Null, &holder));
    }
}
