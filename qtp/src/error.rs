use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("incorrect image tag, expected \"P6\", got {0:?}")]
    InvalidTag(String),

    #[error("malformed image header: {0}")]
    InvalidHeader(String),

    #[error("data ended early, expected {expected} {what}, got {found}")]
    TruncatedData {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("corrupt quadtree at node {index}: {reason}")]
    InvalidTree { index: usize, reason: String },

    #[error("quadtree has already been built")]
    AlreadyBuilt,

    #[error("image has no pixels")]
    EmptyImage,

    #[error("image is too large to be stored as a quadtree")]
    TooLarge,

    #[error("image is {width}x{height}, the height must be at least the width")]
    DimensionMismatch { width: u32, height: u32 },
}
