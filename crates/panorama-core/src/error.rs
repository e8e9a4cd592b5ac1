use thiserror::Error;

#[derive(Error, Debug)]
pub enum PanoramaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid tier catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid viewer config: {0}")]
    InvalidConfig(String),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Unknown resolution tier: {0}")]
    UnknownTier(String),
}

pub type Result<T> = std::result::Result<T, PanoramaError>;
