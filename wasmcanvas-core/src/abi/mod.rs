//! ABI contract between the host bridge and the guest game module.
//!
//! ## Imports (guest -> host)
//! Imported from module `"env"`:
//! - `throw_error(message_addr: u32)`: decodes the string and aborts the
//!   current guest call with that message; no further entry points run this
//!   frame.
//! - `print_text(message_addr: u32)`: decodes the string into the host log.
//! - `draw_text(message_addr: u32, x: u32, y: u32, size: u32, color: u32,
//!   fill: u32, align_addr: u32)`
//! - `draw_number(number: u32, x: u32, y: u32, size: u32, color: u32,
//!   fill: u32, align_addr: u32)`: renders the base-10 form of `number`.
//! - `draw_rectangle(x: u32, y: u32, width: u32, height: u32, color: u32,
//!   fill: u32)`
//!
//! String arguments are addresses of null-terminated UTF-8 in the guest's
//! linear memory. Colors are packed RGBA (see [`crate::color`]). `fill`
//! selects fill (non-zero) vs. outline rendering.
//!
//! ## Exports (host -> guest) required
//! - `memory`
//! - `game_init(width: u32, height: u32)`: called exactly once after
//!   instantiation with the surface dimensions.
//! - `game_update(delta_time: f32)`: delta is seconds.
//! - `game_render()`
//! - `game_key_down(key_code: u32)`
//! - `get_arena_used() -> u32` / `get_arena_size() -> u32`: allocator
//!   diagnostics, byte counts.

use wasmtime::{AsContextMut, Instance, TypedFunc};

use crate::HostError;

/// Import module name used by the guest.
pub const IMPORT_MODULE: &str = "env";

/// Host import names provided to the guest under [`IMPORT_MODULE`].
pub mod host_imports {
    pub const THROW_ERROR: &str = "throw_error";
    pub const PRINT_TEXT: &str = "print_text";
    pub const DRAW_TEXT: &str = "draw_text";
    pub const DRAW_NUMBER: &str = "draw_number";
    pub const DRAW_RECTANGLE: &str = "draw_rectangle";
}

/// Guest export names. All of them are required.
pub mod guest_exports {
    pub const MEMORY: &str = "memory";
    pub const INIT: &str = "game_init";
    pub const UPDATE: &str = "game_update";
    pub const RENDER: &str = "game_render";
    pub const KEY_DOWN: &str = "game_key_down";
    pub const ARENA_USED: &str = "get_arena_used";
    pub const ARENA_SIZE: &str = "get_arena_size";
}

/// The guest's entry points, resolved once after instantiation with
/// compile-time-checked signatures.
pub struct GuestEntrypoints {
    pub init: TypedFunc<(u32, u32), ()>,
    pub update: TypedFunc<f32, ()>,
    pub render: TypedFunc<(), ()>,
    pub key_down: TypedFunc<u32, ()>,
    pub arena_used: TypedFunc<(), u32>,
    pub arena_size: TypedFunc<(), u32>,
}

impl GuestEntrypoints {
    /// Resolve and type-check all required entry points.
    ///
    /// Call [`validate::required_exports_present`] first for a by-name
    /// missing-export diagnostic; this surfaces signature mismatches.
    pub fn resolve(
        instance: &Instance,
        mut store: impl AsContextMut,
    ) -> Result<Self, anyhow::Error> {
        Ok(Self {
            init: instance.get_typed_func(&mut store, guest_exports::INIT)?,
            update: instance.get_typed_func(&mut store, guest_exports::UPDATE)?,
            render: instance.get_typed_func(&mut store, guest_exports::RENDER)?,
            key_down: instance.get_typed_func(&mut store, guest_exports::KEY_DOWN)?,
            arena_used: instance.get_typed_func(&mut store, guest_exports::ARENA_USED)?,
            arena_size: instance.get_typed_func(&mut store, guest_exports::ARENA_SIZE)?,
        })
    }
}

/// Helpers for validating guest exports before resolving them.
pub mod validate {
    use super::*;
    use wasmtime::Extern;

    /// Check that the instance exports `memory` and every entry point.
    pub fn required_exports_present(
        instance: &Instance,
        mut store: impl AsContextMut,
    ) -> Result<(), HostError> {
        if instance
            .get_export(&mut store, guest_exports::MEMORY)
            .and_then(Extern::into_memory)
            .is_none()
        {
            return Err(HostError::MissingExport(guest_exports::MEMORY));
        }

        for name in [
            guest_exports::INIT,
            guest_exports::UPDATE,
            guest_exports::RENDER,
            guest_exports::KEY_DOWN,
            guest_exports::ARENA_USED,
            guest_exports::ARENA_SIZE,
        ] {
            if instance.get_func(&mut store, name).is_none() {
                return Err(HostError::MissingExport(name));
            }
        }

        Ok(())
    }
}
