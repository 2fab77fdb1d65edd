//! # Error Taxonomy
//!
//! Typed failures at the two boundaries of the interaction layer: talking to
//! the backend and patching the document. Handlers never surface these to
//! the user; the dispatch boundary logs them and leaves the display as it
//! was.

use thiserror::Error;

/// Failure while fetching or decoding a backend response.
///
/// A `success: false` payload and a dead socket are handled identically by
/// callers; the variants exist so logs can tell them apart.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response body.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response body was not the expected JSON envelope.
    #[error("undecodable response: {0}")]
    Decode(String),

    /// The backend answered with `success: false`.
    #[error("request rejected: {0}")]
    Rejected(String),
}

/// An expected document node was absent while applying a patch.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("missing document node: {0}")]
    MissingTarget(&'static str),
}

/// Failure while reading a selected file.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("file read failed: {0}")]
    Io(#[from] std::io::Error),
}
