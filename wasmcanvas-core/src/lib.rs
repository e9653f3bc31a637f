//! wasmcanvas-core: the host bridge between a compiled WASM game module and a
//! 2D drawing surface.
//!
//! The guest module is opaque to this layer. It talks to the host through
//! exactly two channels:
//! - its exported linear `memory`, out of which the host decodes
//!   null-terminated UTF-8 strings per call (never retained across calls)
//! - a fixed import surface under module `"env"`: `throw_error`, `print_text`,
//!   `draw_text`, `draw_number`, `draw_rectangle`
//!
//! Required guest exports:
//! - `memory`
//! - `game_init(width, height)`
//! - `game_update(delta_seconds)`
//! - `game_render()`
//! - `game_key_down(key_code)`
//! - `get_arena_used()` / `get_arena_size()` (allocator diagnostics)
//!
//! The bridge itself implements no game rules. [`Game::load`] instantiates the
//! module and performs one-time init; [`FrameDriver`] drives `game_update` +
//! `game_render` once per display refresh with a measured delta.

pub mod abi;
pub mod color;
pub mod driver;
pub mod game;
pub mod input;
pub mod loader;
pub mod mem;
pub mod runtime;
pub mod surface;

mod error;

pub use driver::{CancelToken, FrameDriver, FrameHooks, FrameOutcome};
pub use error::HostError;
pub use game::Game;
pub use input::Key;
pub use surface::{Alignment, SoftwareSurface, Surface};
