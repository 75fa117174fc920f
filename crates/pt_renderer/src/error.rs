//! Error type shared by every construction and render entry point.

use thiserror::Error;

use crate::Bucket;

/// Errors reported by the renderer.
///
/// Every variant describes a caller mistake detected when an object is
/// constructed or a render is requested; nothing fails mid-render.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Region {region:?} does not fit inside a {width}x{height} image")]
    InvalidRegion {
        region: Bucket,
        width: u32,
        height: u32,
    },
}

impl Error {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidParameter(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
