//! Loading and driving one game module instance.

use wasmtime::Store;

use crate::abi::GuestEntrypoints;
use crate::driver::FrameHooks;
use crate::input::Key;
use crate::loader;
use crate::mem::DEFAULT_MAX_STRING_LEN;
use crate::runtime::{HostState, Runtime};
use crate::surface::Surface;

/// A loaded, initialized game module bound to its drawing surface.
///
/// `load` instantiates the module with the host import surface wired in and
/// calls `game_init` with the surface dimensions exactly once. Instantiation
/// failure is fatal; there is no retry and no frame runs before init.
pub struct Game<S: Surface + 'static> {
    store: Store<HostState<S>>,
    entrypoints: GuestEntrypoints,
}

impl<S: Surface + 'static> Game<S> {
    pub fn load(module_bytes: &[u8], surface: S) -> Result<Self, anyhow::Error> {
        Self::load_with_max_string_len(module_bytes, surface, DEFAULT_MAX_STRING_LEN)
    }

    /// `load` with an explicit ceiling for guest string decoding.
    pub fn load_with_max_string_len(
        module_bytes: &[u8],
        surface: S,
        max_string_len: usize,
    ) -> Result<Self, anyhow::Error> {
        let mut runtime = Runtime::with_max_string_len(surface, max_string_len)?;
        runtime.define_imports()?;

        let module = loader::compile_module(&runtime.engine, module_bytes)?;
        let (_instance, entrypoints) = runtime.instantiate(&module)?;

        let mut store = runtime.store;
        let (width, height) = {
            let surface = &store.data().surface;
            (surface.width(), surface.height())
        };
        entrypoints.init.call(&mut store, (width, height))?;

        let used = entrypoints.arena_used.call(&mut store, ())?;
        let size = entrypoints.arena_size.call(&mut store, ())?;
        log::debug!("module arena after init: {used} of {size} bytes");

        Ok(Self { store, entrypoints })
    }

    /// Forward one pressed key to `game_key_down`.
    pub fn key_down(&mut self, key: Key) -> Result<(), anyhow::Error> {
        self.entrypoints.key_down.call(&mut self.store, key.code())
    }

    /// Call `game_update` with an elapsed-seconds delta.
    pub fn update(&mut self, delta_seconds: f32) -> Result<(), anyhow::Error> {
        self.entrypoints.update.call(&mut self.store, delta_seconds)
    }

    /// Call `game_render`.
    pub fn render(&mut self) -> Result<(), anyhow::Error> {
        self.entrypoints.render.call(&mut self.store, ())
    }

    /// Bytes currently allocated from the module's arena.
    pub fn arena_used(&mut self) -> Result<u32, anyhow::Error> {
        self.entrypoints.arena_used.call(&mut self.store, ())
    }

    /// Total capacity of the module's arena in bytes.
    pub fn arena_size(&mut self) -> Result<u32, anyhow::Error> {
        self.entrypoints.arena_size.call(&mut self.store, ())
    }

    pub fn surface(&self) -> &S {
        &self.store.data().surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.store.data_mut().surface
    }
}

impl<S: Surface + 'static> FrameHooks for Game<S> {
    fn update(&mut self, delta_seconds: f32) -> Result<(), anyhow::Error> {
        Game::update(self, delta_seconds)
    }

    fn render(&mut self) -> Result<(), anyhow::Error> {
        Game::render(self)
    }
}
