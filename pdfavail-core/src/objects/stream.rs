use crate::objects::{Dictionary, Object};

/// Stream object: a dictionary plus its raw (still encoded) payload
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    dict: Dictionary,
    data: Vec<u8>,
}

impl Stream {
    pub fn new(data: Vec<u8>) -> Self {
        Self::with_dictionary(Dictionary::new(), data)
    }

    pub fn with_dictionary(dict: Dictionary, data: Vec<u8>) -> Self {
        let mut stream = Self { dict, data };
        stream.update_length();
        stream
    }

    pub fn dict(&self) -> &Dictionary {
        &self.dict
    }

    pub fn dict_mut(&mut self) -> &mut Dictionary {
        &mut self.dict
    }

    pub fn raw_data(&self) -> &[u8] {
        &self.data
    }

    pub fn raw_size(&self) -> usize {
        self.data.len()
    }

    /// Replaces the payload and keeps `/Length` in sync.
    pub fn set_data(&mut self, data: Vec<u8>) {
        self.data = data;
        self.update_length();
    }

    fn update_length(&mut self) {
        self.dict
            .set_for("Length", Object::from(self.data.len() as i64));
    }
}
