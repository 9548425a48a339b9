use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfError {
    #[error("Invalid object number: {0}")]
    InvalidObjectNumber(u32),

    #[error("Object number already in use: {0}")]
    ObjectNumberInUse(u32),

    #[error("No object numbers left to allocate")]
    ObjectNumbersExhausted,

    #[error("Range {offset}+{len} exceeds document size {size}")]
    OutOfRange { offset: u64, len: u64, size: u64 },
}

pub type Result<T> = std::result::Result<T, PdfError>;
