//! Wasmtime-backed runtime glue.
//!
//! Responsibilities:
//! - Create a Wasmtime `Engine`/`Store` carrying the bridge state.
//! - Define the host imports under module `"env"` matching the guest ABI.
//! - Instantiate a compiled `wasmtime::Module` and resolve its entry points.
//!
//! There is no global state: the drawing surface and marshalling limits
//! travel inside the `Store` data ([`HostState`]), so independent game
//! instances can coexist in one process.

pub mod imports;
mod runtime;

pub use runtime::{HostState, Runtime};
