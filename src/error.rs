use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntegrityError {
    #[error("Image loading error: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metadata extraction error: {0}")]
    Metadata(String),
}

pub type Result<T> = std::result::Result<T, IntegrityError>;
