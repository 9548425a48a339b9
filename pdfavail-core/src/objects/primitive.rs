use crate::objects::{Array, Dictionary, Stream};
use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt;

/// Object number meaning "not an indirect object".
///
/// Object 0 is the head of the free list in every cross-reference table, so it
/// can never name a real indirect object.
pub const INVALID_OBJECT_NUMBER: u32 = 0;

/// PDF Name object
///
/// Names are immutable and cheap to clone: short names are stored inline and
/// longer ones share their storage, which is what [`StringPool`] relies on.
///
/// [`StringPool`]: crate::objects::StringPool
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PdfName(SmolStr);

impl PdfName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(SmolStr::new(name))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub(crate) fn as_smol_str(&self) -> &SmolStr {
        &self.0
    }

    pub(crate) fn from_smol_str(name: SmolStr) -> Self {
        Self(name)
    }
}

impl Borrow<str> for PdfName {
    fn borrow(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for PdfName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for PdfName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PdfName {
    fn from(name: String) -> Self {
        Self(SmolStr::from(name))
    }
}

impl PartialEq<str> for PdfName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for PdfName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for PdfName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0)
    }
}

/// PDF String object (raw bytes, no text decoding applied)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PdfString(pub Vec<u8>);

impl PdfString {
    pub fn new(data: Vec<u8>) -> Self {
        Self(data)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn as_str(&self) -> Result<&str, std::str::Utf8Error> {
        std::str::from_utf8(&self.0)
    }
}

impl From<&[u8]> for PdfString {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

impl From<&str> for PdfString {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

/// Numeric object, either integral or real
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Real(f64),
}

impl Number {
    pub fn is_integer(&self) -> bool {
        matches!(self, Number::Integer(_))
    }

    /// Integer value; reals are truncated toward zero.
    pub fn as_i64(&self) -> i64 {
        match *self {
            Number::Integer(i) => i,
            Number::Real(f) => f as i64,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Number::Integer(i) => i as f64,
            Number::Real(f) => f,
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{i}"),
            Number::Real(r) => write!(f, "{r}"),
        }
    }
}

/// Discriminant of [`Object`] without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Null,
    Boolean,
    Number,
    String,
    Name,
    Array,
    Dictionary,
    Stream,
    Reference,
}

/// PDF Object types
///
/// Only [`Object::Array`], [`Object::Dictionary`] and [`Object::Stream`] own
/// children. A [`Object::Reference`] only names an object number; the object
/// itself lives in an [`IndirectObjectHolder`].
///
/// [`IndirectObjectHolder`]: crate::parser::IndirectObjectHolder
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Null,
    Boolean(bool),
    Number(Number),
    String(PdfString),
    Name(PdfName),
    Array(Array),
    Dictionary(Dictionary),
    Stream(Stream),
    Reference(u32),
}

impl Object {
    pub fn name(name: impl AsRef<str>) -> Self {
        Object::Name(PdfName::new(name))
    }

    pub fn string(data: impl Into<Vec<u8>>) -> Self {
        Object::String(PdfString(data.into()))
    }

    pub fn reference(objnum: u32) -> Self {
        Object::Reference(objnum)
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Null => ObjectKind::Null,
            Object::Boolean(_) => ObjectKind::Boolean,
            Object::Number(_) => ObjectKind::Number,
            Object::String(_) => ObjectKind::String,
            Object::Name(_) => ObjectKind::Name,
            Object::Array(_) => ObjectKind::Array,
            Object::Dictionary(_) => ObjectKind::Dictionary,
            Object::Stream(_) => ObjectKind::Stream,
            Object::Reference(_) => ObjectKind::Reference,
        }
    }

    /// True for the kinds that own child objects.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Object::Array(_) | Object::Dictionary(_) | Object::Stream(_)
        )
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Object::Reference(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Object::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Object::Number(n) => Some(n.as_i64()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Object::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    pub fn as_string(&self) -> Option<&PdfString> {
        match self {
            Object::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(n) => Some(n.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        match self {
            Object::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_dict_mut(&mut self) -> Option<&mut Dictionary> {
        match self {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    pub fn as_stream(&self) -> Option<&Stream> {
        match self {
            Object::Stream(stream) => Some(stream),
            _ => None,
        }
    }

    pub fn as_reference(&self) -> Option<u32> {
        match self {
            Object::Reference(objnum) => Some(*objnum),
            _ => None,
        }
    }

    /// Dictionary of a dictionary or of a stream.
    pub fn dict(&self) -> Option<&Dictionary> {
        match self {
            Object::Dictionary(dict) => Some(dict),
            Object::Stream(stream) => Some(stream.dict()),
            _ => None,
        }
    }
}

impl From<bool> for Object {
    fn from(b: bool) -> Self {
        Object::Boolean(b)
    }
}

impl From<i32> for Object {
    fn from(i: i32) -> Self {
        Object::Number(Number::Integer(i as i64))
    }
}

impl From<i64> for Object {
    fn from(i: i64) -> Self {
        Object::Number(Number::Integer(i))
    }
}

impl From<f64> for Object {
    fn from(f: f64) -> Self {
        Object::Number(Number::Real(f))
    }
}

impl From<Number> for Object {
    fn from(n: Number) -> Self {
        Object::Number(n)
    }
}

impl From<PdfName> for Object {
    fn from(n: PdfName) -> Self {
        Object::Name(n)
    }
}

impl From<PdfString> for Object {
    fn from(s: PdfString) -> Self {
        Object::String(s)
    }
}

impl From<Array> for Object {
    fn from(a: Array) -> Self {
        Object::Array(a)
    }
}

impl From<Vec<Object>> for Object {
    fn from(v: Vec<Object>) -> Self {
        Object::Array(Array::from(v))
    }
}

impl From<Dictionary> for Object {
    fn from(d: Dictionary) -> Self {
        Object::Dictionary(d)
    }
}

impl From<Stream> for Object {
    fn from(s: Stream) -> Self {
        Object::Stream(s)
    }
}
