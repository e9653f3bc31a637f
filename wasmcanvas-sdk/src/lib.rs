#![cfg_attr(not(feature = "std"), no_std)]

//! wasmcanvas-sdk
//!
//! Bindings for **guest** game modules that run under the `wasmcanvas` host
//! bridge. The host supplies five imports under module `"env"`; strings cross
//! the boundary as addresses of null-terminated UTF-8 in the guest's linear
//! memory, colors as one packed RGBA integer.
//!
//! The guest must export:
//! - `game_init(width: u32, height: u32)`
//! - `game_update(delta_time: f32)` (seconds)
//! - `game_render()`
//! - `game_key_down(key_code: u32)`
//! - `get_arena_used() -> u32` / `get_arena_size() -> u32`
//!
//! ```ignore
//! #[unsafe(no_mangle)]
//! pub extern "C" fn game_render() {
//!     wasmcanvas_sdk::draw_rectangle(10, 10, 80, 20, wasmcanvas_sdk::rgba(255, 0, 0, 255), true);
//!     wasmcanvas_sdk::draw_text(c"score", 50, 24, 16, 0xFFFFFFFF, true, wasmcanvas_sdk::ALIGN_CENTER);
//! }
//! ```

#[cfg(target_arch = "wasm32")]
use core::ffi::CStr;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// Alignment keywords recognized by the host's drawing surface.
pub const ALIGN_LEFT: &core::ffi::CStr = c"left";
pub const ALIGN_CENTER: &core::ffi::CStr = c"center";
pub const ALIGN_RIGHT: &core::ffi::CStr = c"right";

/// Key codes delivered to `game_key_down` for the arrow keys. Printable keys
/// arrive as their character code.
pub const KEY_ARROW_LEFT: u32 = 37;
pub const KEY_ARROW_UP: u32 = 38;
pub const KEY_ARROW_RIGHT: u32 = 39;
pub const KEY_ARROW_DOWN: u32 = 40;

/// Pack four 8-bit channels into the wire color format (red high byte).
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((r as u32) << 24) | ((g as u32) << 16) | ((b as u32) << 8) | a as u32
}

/// Low-level raw ABI imports.
///
/// Only present on wasm32 targets; on native targets there is no host to
/// resolve the symbols against.
#[cfg(target_arch = "wasm32")]
pub mod sys {
    unsafe extern "C" {
        pub fn throw_error(message: *const u8);
        pub fn print_text(message: *const u8);
        pub fn draw_text(
            message: *const u8,
            x: u32,
            y: u32,
            size: u32,
            color: u32,
            fill: u32,
            alignment: *const u8,
        );
        pub fn draw_number(
            number: u32,
            x: u32,
            y: u32,
            size: u32,
            color: u32,
            fill: u32,
            alignment: *const u8,
        );
        pub fn draw_rectangle(x: u32, y: u32, width: u32, height: u32, color: u32, fill: u32);
    }
}

/// Raise a fatal host-side error carrying `message`. Does not return: the
/// host aborts the current guest call.
#[cfg(target_arch = "wasm32")]
pub fn throw_error(message: &CStr) -> ! {
    unsafe { sys::throw_error(message.as_ptr().cast()) };
    unreachable!("host aborts the calling frame on throw_error")
}

/// Write `message` to the host's diagnostic log.
#[cfg(target_arch = "wasm32")]
pub fn print_text(message: &CStr) {
    unsafe { sys::print_text(message.as_ptr().cast()) }
}

#[cfg(target_arch = "wasm32")]
pub fn draw_text(text: &CStr, x: u32, y: u32, size: u32, color: u32, fill: bool, alignment: &CStr) {
    unsafe {
        sys::draw_text(
            text.as_ptr().cast(),
            x,
            y,
            size,
            color,
            fill as u32,
            alignment.as_ptr().cast(),
        )
    }
}

/// Render the base-10 form of `number`.
#[cfg(target_arch = "wasm32")]
pub fn draw_number(
    number: u32,
    x: u32,
    y: u32,
    size: u32,
    color: u32,
    fill: bool,
    alignment: &CStr,
) {
    unsafe {
        sys::draw_number(
            number,
            x,
            y,
            size,
            color,
            fill as u32,
            alignment.as_ptr().cast(),
        )
    }
}

#[cfg(target_arch = "wasm32")]
pub fn draw_rectangle(x: u32, y: u32, width: u32, height: u32, color: u32, fill: bool) {
    unsafe { sys::draw_rectangle(x, y, width, height, color, fill as u32) }
}
