//! PDF object model
//!
//! [`Object`] is a closed set of nine kinds. Composite kinds own their children
//! inline; indirect objects are owned by an
//! [`IndirectObjectHolder`](crate::parser::IndirectObjectHolder) and reached
//! through [`Object::Reference`] by number.

mod array;
mod clone;
mod dictionary;
mod primitive;
mod stream;
mod string_pool;

pub use array::{Array, ArrayLocker};
pub use clone::MAX_RECURSION_DEPTH;
pub use dictionary::{Dictionary, DictionaryLocker};
pub use primitive::{Number, Object, ObjectKind, PdfName, PdfString, INVALID_OBJECT_NUMBER};
pub use stream::Stream;
pub use string_pool::StringPool;
