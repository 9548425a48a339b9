//! Tests for Array object functionality

use super::*;
use crate::objects::{Number, PdfString};

#[test]
fn test_array_new() {
    let array = Array::new();
    assert_eq!(array.len(), 0, "New array should be empty");
    assert!(array.is_empty(), "New array should be empty");
}

#[test]
fn test_array_with_capacity() {
    let array = Array::with_capacity(10);
    assert_eq!(array.len(), 0, "Array with capacity should start empty");
    assert!(array.is_empty(), "Array with capacity should be empty");
}

#[test]
fn test_array_append_returns_stored_element() {
    let mut array = Array::new();

    let stored = array.append(Object::from(42));
    assert_eq!(stored.as_integer(), Some(42));
    *stored = Object::from(43);

    assert_eq!(array.len(), 1, "Array should have one element after append");
    assert_eq!(array.get_integer_at(0), 43, "Handle should alias the slot");
}

#[test]
fn test_array_allows_duplicates_and_nulls() {
    let mut array = Array::new();
    array.append(Object::Null);
    array.append(Object::from(1));
    array.append(Object::from(1));
    array.append(Object::Null);

    assert_eq!(array.len(), 4);
    assert!(array.get(0).is_some_and(Object::is_null));
    assert_eq!(array.get(1), array.get(2));
}

#[test]
fn test_array_set_at() {
    let mut array = Array::new();
    array.append(Object::from(10));
    array.append(Object::from(20));

    let replaced = array.set_at(1, Object::name("Twenty"));
    assert!(replaced.is_some(), "In-range set should succeed");
    assert_eq!(array.get_name_at(1), "Twenty");

    assert!(
        array.set_at(2, Object::Null).is_none(),
        "Out of range set should be rejected"
    );
    assert_eq!(array.len(), 2);
}

#[test]
fn test_array_insert_at() {
    let mut array = Array::new();

    // Insert into empty array
    assert!(array.insert_at(0, Object::from(42)).is_some());

    // Insert at beginning
    assert!(array.insert_at(0, Object::from(true)).is_some());

    // Insert at end
    assert!(array.insert_at(2, Object::from(100)).is_some());

    // Insert in middle
    assert!(array.insert_at(1, Object::from(50)).is_some());

    assert_eq!(array.len(), 4);
    assert!(array.get_bool_at(0));
    assert_eq!(array.get_integer_at(1), 50);
    assert_eq!(array.get_integer_at(2), 42);
    assert_eq!(array.get_integer_at(3), 100);

    // Past the end
    assert!(array.insert_at(6, Object::Null).is_none());
    assert_eq!(array.len(), 4);
}

#[test]
fn test_array_remove_at() {
    let mut array = Array::new();
    array.append(Object::from(10));
    array.append(Object::from(20));
    array.append(Object::from(30));

    let removed = array.remove_at(1);
    assert_eq!(removed, Some(Object::from(20)));
    assert_eq!(array.len(), 2);
    assert_eq!(array.get_integer_at(1), 30);

    assert_eq!(array.remove_at(5), None, "Out of bounds remove is a no-op");
    assert_eq!(array.len(), 2);
}

#[test]
fn test_array_clear() {
    let mut array = Array::new();
    array.append(Object::from(1));
    array.append(Object::from(2));

    array.clear();
    assert!(array.is_empty(), "Array should be empty after clear");
}

#[test]
fn test_array_get_mut() {
    let mut array = Array::new();
    assert!(array.get_mut(0).is_none());

    array.append(Object::from(1));
    if let Some(Object::Number(Number::Integer(val))) = array.get_mut(0) {
        *val = 100;
    }
    assert_eq!(array.get_integer_at(0), 100);
}

#[test]
fn test_array_locker_iterates_in_order() {
    let array: Array = (0..5).map(Object::from).collect();

    let locker = array.lock();
    assert_eq!(locker.len(), 5);
    assert!(!locker.is_empty());

    let values: Vec<i64> = locker.iter().filter_map(Object::as_integer).collect();
    assert_eq!(values, vec![0, 1, 2, 3, 4]);

    let mut count = 0;
    for _ in array.lock() {
        count += 1;
    }
    assert_eq!(count, 5);
}

#[test]
fn test_array_multiple_lockers_coexist() {
    let array: Array = vec![Object::Null, Object::from(true)].into();

    let first = array.lock();
    let second = array.lock();
    assert_eq!(first.iter().count(), second.iter().count());
}

#[test]
fn test_array_typed_getter_defaults() {
    let mut array = Array::new();
    array.append(Object::name("NotANumber"));

    assert_eq!(array.get_integer_at(0), 0);
    assert_eq!(array.get_number_at(0), 0.0);
    assert!(!array.get_bool_at(0));
    assert!(array.get_string_at(0).is_empty());
    assert!(array.get_dict_at(0).is_none());
    assert!(array.get_array_at(0).is_none());
    assert!(array.get_stream_at(0).is_none());

    // Absent index behaves the same
    assert_eq!(array.get_integer_at(9), 0);
    assert_eq!(array.get_name_at(9), "");
}

#[test]
fn test_array_typed_getters() {
    let mut array = Array::new();
    array.append(Object::from(7));
    array.append(Object::from(2.5));
    array.append(Object::String(PdfString::from("text")));
    array.append(Object::from(Dictionary::new()));
    array.append(Object::from(Array::new()));
    array.append(Object::from(Stream::new(vec![1, 2, 3])));

    assert_eq!(array.get_integer_at(0), 7);
    assert_eq!(array.get_number_at(1), 2.5);
    assert_eq!(array.get_string_at(2), b"text");
    assert!(array.get_dict_at(3).is_some());
    assert!(array.get_array_at(4).is_some());
    assert_eq!(array.get_stream_at(5).map(Stream::raw_size), Some(3));
    // A stream's dictionary is reachable through the dictionary getter
    assert!(array.get_dict_at(5).is_some());
}

#[test]
fn test_array_from_vec_and_back() {
    let vec = vec![Object::from(1), Object::from(2)];
    let array = Array::from(vec.clone());
    assert_eq!(array.len(), 2);

    let back: Vec<Object> = array.into();
    assert_eq!(back, vec);
}

#[test]
fn test_array_clone_is_deep() {
    let mut inner = Array::new();
    inner.append(Object::from(1));
    let mut outer = Array::new();
    outer.append(Object::from(inner));

    let mut copy = outer.clone();
    if let Some(Object::Array(nested)) = copy.get_mut(0) {
        nested.append(Object::from(2));
    }

    assert_eq!(outer.get_array_at(0).map(Array::len), Some(1));
    assert_eq!(copy.get_array_at(0).map(Array::len), Some(2));
}

#[test]
fn test_convert_to_indirect_object_at() {
    let holder = IndirectObjectHolder::new();
    let mut array = Array::new();
    let mut dict = Dictionary::new();
    dict.set_for("Kind", Object::name("Inline"));
    array.append(Object::from(dict));

    let objnum = array
        .convert_to_indirect_object_at(0, &holder)
        .unwrap()
        .expect("slot exists");

    assert_eq!(array.get(0), Some(&Object::Reference(objnum)));
    let stored = holder
        .get_indirect_object(objnum)
        .expect("object moved into holder");
    assert_eq!(stored.dict().map(|d| d.get_name_for("Kind")), Some("Inline"));

    // Converting a reference again is a no-op
    assert_eq!(
        array.convert_to_indirect_object_at(0, &holder).unwrap(),
        Some(objnum)
    );
    assert_eq!(holder.len(), 1);

    assert_eq!(array.convert_to_indirect_object_at(3, &holder).unwrap(), None);
}

#[test]
fn test_convert_to_indirect_object_at_without_free_numbers() {
    let holder = IndirectObjectHolder::new();
    holder.insert_indirect_object(u32::MAX, Object::Null).unwrap();
    let mut array = Array::new();
    array.append(Object::from(42));

    let result = array.convert_to_indirect_object_at(0, &holder);
    assert!(matches!(result, Err(crate::PdfError::ObjectNumbersExhausted)));
    assert_eq!(array.get(0), Some(&Object::from(42)), "Slot is left in place");
    assert_eq!(holder.len(), 1);
}

#[test]
fn test_get_direct_object_at() {
    let holder = IndirectObjectHolder::new();
    let objnum = holder.add_indirect_object(Object::from(99)).unwrap();

    let mut array = Array::new();
    array.append(Object::Reference(objnum));
    array.append(Object::from(5));
    array.append(Object::Reference(1234));

    let resolved = array.get_direct_object_at(0, &holder);
    assert_eq!(resolved.and_then(|o| o.as_integer()), Some(99));

    let direct = array.get_direct_object_at(1, &holder);
    assert_eq!(direct.and_then(|o| o.as_integer()), Some(5));

    assert!(array.get_direct_object_at(2, &holder).is_none());
    assert!(array.get_direct_object_at(3, &holder).is_none());
}
