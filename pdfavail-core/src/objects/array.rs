use crate::error::Result;
use crate::objects::{Dictionary, Object, Stream};
use crate::parser::{IndirectObjectHolder, Resolved};

/// Ordered sequence of owned objects
///
/// Elements can only be iterated through an [`ArrayLocker`]. The locker
/// borrows the array, so any attempt to mutate it while a locker is alive is
/// rejected at compile time:
///
/// ```compile_fail
/// use pdfavail::objects::{Array, Object};
///
/// let mut array = Array::new();
/// array.append(Object::Null);
/// let locker = array.lock();
/// array.clear();
/// drop(locker);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Array {
    elements: Vec<Object>,
}

impl Array {
    pub fn new() -> Self {
        Self {
            elements: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Object> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Object> {
        self.elements.get_mut(index)
    }

    /// Locks the array for iteration.
    pub fn lock(&self) -> ArrayLocker<'_> {
        ArrayLocker { array: self }
    }

    /// Appends `object` and returns a handle to the stored element.
    pub fn append(&mut self, object: impl Into<Object>) -> &mut Object {
        self.elements.push(object.into());
        let last = self.elements.len() - 1;
        &mut self.elements[last]
    }

    /// Replaces the element at `index`. Returns `None` when out of range.
    pub fn set_at(&mut self, index: usize, object: impl Into<Object>) -> Option<&mut Object> {
        let slot = self.elements.get_mut(index)?;
        *slot = object.into();
        Some(slot)
    }

    /// Inserts before `index`; `index == len()` appends. Returns `None` when
    /// `index > len()`.
    pub fn insert_at(&mut self, index: usize, object: impl Into<Object>) -> Option<&mut Object> {
        if index > self.elements.len() {
            return None;
        }
        self.elements.insert(index, object.into());
        Some(&mut self.elements[index])
    }

    pub fn remove_at(&mut self, index: usize) -> Option<Object> {
        if index >= self.elements.len() {
            return None;
        }
        Some(self.elements.remove(index))
    }

    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn get_integer_at(&self, index: usize) -> i64 {
        self.get(index).and_then(Object::as_integer).unwrap_or(0)
    }

    pub fn get_number_at(&self, index: usize) -> f64 {
        self.get(index).and_then(Object::as_number).unwrap_or(0.0)
    }

    pub fn get_bool_at(&self, index: usize) -> bool {
        self.get(index).and_then(Object::as_bool).unwrap_or(false)
    }

    pub fn get_string_at(&self, index: usize) -> &[u8] {
        self.get(index)
            .and_then(Object::as_string)
            .map(|s| s.as_bytes())
            .unwrap_or_default()
    }

    pub fn get_name_at(&self, index: usize) -> &str {
        self.get(index).and_then(Object::as_name).unwrap_or_default()
    }

    /// Dictionary at `index`, or the dictionary of a stream at `index`.
    pub fn get_dict_at(&self, index: usize) -> Option<&Dictionary> {
        self.get(index).and_then(Object::dict)
    }

    pub fn get_array_at(&self, index: usize) -> Option<&Array> {
        self.get(index).and_then(Object::as_array)
    }

    pub fn get_stream_at(&self, index: usize) -> Option<&Stream> {
        self.get(index).and_then(Object::as_stream)
    }

    /// Element at `index`, following a reference through `holder`.
    pub fn get_direct_object_at<'a>(
        &'a self,
        index: usize,
        holder: &IndirectObjectHolder,
    ) -> Option<Resolved<'a>> {
        holder.get_direct_object(self.get(index)?)
    }

    /// Moves the element at `index` into `holder` as a new indirect object
    /// and leaves a reference to it in its place.
    ///
    /// Returns the object number the slot now refers to, or `None` when
    /// `index` is out of bounds. A slot that already holds a reference is left
    /// untouched. If the holder has no numbers left the slot is not modified.
    pub fn convert_to_indirect_object_at(
        &mut self,
        index: usize,
        holder: &IndirectObjectHolder,
    ) -> Result<Option<u32>> {
        let Some(slot) = self.elements.get_mut(index) else {
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

impl From<Vec<Object>> for Array {
    fn from(elements: Vec<Object>) -> Self {
        Self { elements }
    }
}

impl From<Array> for Vec<Object> {
    fn from(array: Array) -> Self {
        array.elements
    }
}

impl FromIterator<Object> for Array {
    fn from_iter<T: IntoIterator<Item = Object>>(iter: T) -> Self {
        Self {
            elements: iter.into_iter().collect(),
        }
    }
}

/// Shared lock over an [`Array`]; the only way to iterate its elements.
#[derive(Debug, Clone, Copy)]
pub struct ArrayLocker<'a> {
    array: &'a Array,
}

impl<'a> ArrayLocker<'a> {
    pub fn iter(&self) -> std::slice::Iter<'a, Object> {
        self.array.elements.iter()
    }

    pub fn len(&self) -> usize {
        self.array.len()
    }

    pub fn is_empty(&self) -> bool {
        self.array.is_empty()
    }
}

impl<'a> IntoIterator for ArrayLocker<'a> {
    type Item = &'a Object;
    type IntoIter = std::slice::Iter<'a, Object>;

    fn into_iter(self) -> Self::IntoIter {
        self.array.elements.iter()
    }
}

#[cfg(test)]
mod tests;
