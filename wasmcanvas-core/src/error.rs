//! Bridge-level error taxonomy.
//!
//! Host import functions fail by returning one of these wrapped in
//! `anyhow::Error` (which is what `wasmtime::Error` is); wasmtime turns that
//! into a trap that unwinds the current guest call, and the typed value stays
//! downcastable from the failed call's error chain. Nothing here is retried.

use crate::mem::ProtocolError;
use crate::surface::AlignmentParseError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    /// The module called `throw_error`. Always fatal to the current frame.
    #[error("module raised a fatal error: {0}")]
    ModuleFatal(String),

    /// The module passed a malformed string reference.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The module passed an alignment keyword the surface does not recognize.
    #[error(transparent)]
    Alignment(#[from] AlignmentParseError),

    /// The module does not expose the required export surface.
    #[error("module is missing required export `{0}`")]
    MissingExport(&'static str),
}
