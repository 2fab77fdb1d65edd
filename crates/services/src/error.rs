use domains::error::{ApiError, FileError, PatchError};
use thiserror::Error;

/// Anything a handler can fail with. All variants receive the same
/// treatment at the dispatch boundary: logged, display left untouched.
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error(transparent)]
    File(#[from] FileError),
}
