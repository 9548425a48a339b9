use crate::error::Result;
use crate::objects::{Array, Object, PdfName, Stream};
use crate::parser::{IndirectObjectHolder, Resolved};
use indexmap::IndexMap;

/// Keyed container of owned objects
///
/// Keys are unique. Insertion order has no meaning in PDF but is preserved so
/// that iteration is deterministic. As with [`Array`], iteration goes through a
/// [`DictionaryLocker`], which borrows the dictionary and so excludes mutation
/// for as long as it lives.
///
/// ```compile_fail
/// use pdfavail::objects::{Dictionary, Object};
///
/// let mut dict = Dictionary::new();
/// dict.set_for("Type", Object::name("Page"));
/// let locker = dict.lock();
/// dict.set_for("Count", Object::from(1));
/// drop(locker);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dictionary {
    entries: IndexMap<PdfName, Object>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Object> {
        self.entries.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Object> {
        self.entries.get_mut(key)
    }

    pub fn key_exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Locks the dictionary for iteration.
    pub fn lock(&self) -> DictionaryLocker<'_> {
        DictionaryLocker { dict: self }
    }

    /// Stores `object` under `key`, replacing any previous value, and returns
    /// a handle to the stored object.
    pub fn set_for(&mut self, key: impl Into<PdfName>, object: impl Into<Object>) -> &mut Object {
        let entry = self.entries.entry(key.into());
        match entry {
            indexmap::map::Entry::Occupied(mut occupied) => {
                occupied.insert(object.into());
                occupied.into_mut()
            }
            indexmap::map::Entry::Vacant(vacant) => vacant.insert(object.into()),
        }
    }

    pub fn remove_for(&mut self, key: &str) -> Option<Object> {
        self.entries.shift_remove(key)
    }

    /// Moves the value stored under `old_key` to `new_key`, dropping whatever
    /// `new_key` held before. Does nothing when `old_key` is absent.
    pub fn replace_key(&mut self, old_key: &str, new_key: impl Into<PdfName>) {
        let new_key = new_key.into();
        if old_key == new_key.as_str() {
            return;
        }
        if let Some(value) = self.entries.shift_remove(old_key) {
            self.entries.insert(new_key, value);
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get_integer_for(&self, key: &str) -> i64 {
        self.get(key).and_then(Object::as_integer).unwrap_or(0)
    }

    pub fn get_number_for(&self, key: &str) -> f64 {
        self.get(key).and_then(Object::as_number).unwrap_or(0.0)
    }

    pub fn get_bool_for(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Object::as_bool).unwrap_or(default)
    }

    pub fn get_string_for(&self, key: &str) -> &[u8] {
        self.get(key)
            .and_then(Object::as_string)
            .map(|s| s.as_bytes())
            .unwrap_or_default()
    }

    pub fn get_name_for(&self, key: &str) -> &str {
        self.get(key).and_then(Object::as_name).unwrap_or_default()
    }

    /// Dictionary under `key`, or the dictionary of a stream under `key`.
    pub fn get_dict_for(&self, key: &str) -> Option<&Dictionary> {
        self.get(key).and_then(Object::dict)
    }

    pub fn get_array_for(&self, key: &str) -> Option<&Array> {
        self.get(key).and_then(Object::as_array)
    }

    pub fn get_stream_for(&self, key: &str) -> Option<&Stream> {
        self.get(key).and_then(Object::as_stream)
    }

    /// Value of `/Type` when it is a direct name.
    pub fn get_type(&self) -> &str {
        self.get_name_for("Type")
    }

    /// Value under `key`, following a reference through `holder`.
    pub fn get_direct_object_for<'a>(
        &'a self,
        key: &str,
        holder: &IndirectObjectHolder,
    ) -> Option<Resolved<'a>> {
        holder.get_direct_object(self.get(key)?)
    }

    /// Moves the value under `key` into `holder` as a new indirect object and
    /// stores a reference to it under the same key.
    ///
    /// Returns the object number the entry now refers to, or `None` when the
    /// key is absent; an entry that already holds a reference is left
    /// untouched. If the holder has no numbers left the entry is not modified.
    pub fn convert_to_indirect_object_for(
        &mut self,
        key: &str,
        holder: &IndirectObjectHolder,
    ) -> Result<Option<u32>> {
        let Some(slot) = self.entries.get_mut(key) else {
            return Ok(None);
        };
        if let Object::Reference(objnum) = slot {
            return Ok(Some(*objnum));
        }
        holder.next_object_number()?;
        let object = std::mem::replace(slot, Object::Null);
        let objnum = holder.add_indirect_object(object)?;
        *slot = Object::Reference(objnum);
        Ok(Some(objnum))
    }
}

impl FromIterator<(PdfName, Object)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (PdfName, Object)>>(iter: T) -> Self {
        let mut dict = Dictionary::new();
        for (key, value) in iter {
            dict.set_for(key, value);
        }
        dict
    }
}

/// Shared lock over a [`Dictionary`]; the only way to iterate its entries.
#[derive(Debug, Clone, Copy)]
pub struct DictionaryLocker<'a> {
    dict: &'a Dictionary,
}

impl<'a> DictionaryLocker<'a> {
    pub fn iter(&self) -> indexmap::map::Iter<'a, PdfName, Object> {
        self.dict.entries.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'a, PdfName, Object> {
        self.dict.entries.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'a, PdfName, Object> {
        self.dict.entries.values()
    }

    pub fn len(&self) -> usize {
        self.dict.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dict.is_empty()
    }
}

impl<'a> IntoIterator for DictionaryLocker<'a> {
    type Item = (&'a PdfName, &'a Object);
    type IntoIter = indexmap::map::Iter<'a, PdfName, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.dict.entries.iter()
    }
}
