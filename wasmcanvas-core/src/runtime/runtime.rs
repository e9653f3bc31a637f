use wasmtime::{Config, Engine, Instance, Linker, Module, Store};

use crate::abi::{self, GuestEntrypoints};
use crate::mem::DEFAULT_MAX_STRING_LEN;
use crate::surface::Surface;

/// Bridge state carried by the wasmtime `Store`.
///
/// Host import closures reach the surface through `Caller::data_mut`, which
/// is also what guarantees exclusive access: host functions never run
/// concurrently, and nothing here is touched between calls.
pub struct HostState<S> {
    pub surface: S,
    /// Ceiling for null-terminated string scans in guest memory.
    pub max_string_len: usize,
}

/// Host-side runtime container for one game instance.
pub struct Runtime<S: Surface + 'static> {
    pub engine: Engine,
    pub store: Store<HostState<S>>,
    pub linker: Linker<HostState<S>>,
}

impl<S: Surface + 'static> Runtime<S> {
    /// Create an engine/store/linker trio around the given drawing surface.
    pub fn new(surface: S) -> Result<Self, anyhow::Error> {
        Self::with_max_string_len(surface, DEFAULT_MAX_STRING_LEN)
    }

    pub fn with_max_string_len(surface: S, max_string_len: usize) -> Result<Self, anyhow::Error> {
        let mut cfg = Config::new();
        // Features a clang/rustc-built game module may rely on.
        cfg.wasm_multi_value(true);
        cfg.wasm_bulk_memory(true);
        cfg.wasm_simd(true);

        let engine = Engine::new(&cfg)?;
        let store = Store::new(
            &engine,
            HostState {
                surface,
                max_string_len,
            },
        );
        let linker = Linker::new(&engine);

        Ok(Self {
            engine,
            store,
            linker,
        })
    }

    /// Define all host imports expected by guests under module `"env"`.
    ///
    /// Must be called before `instantiate`.
    pub fn define_imports(&mut self) -> Result<(), anyhow::Error> {
        super::imports::define_imports(&mut self.linker)
    }

    /// Instantiate a module, validate its export surface and resolve the
    /// typed entry points.
    pub fn instantiate(
        &mut self,
        module: &Module,
    ) -> Result<(Instance, GuestEntrypoints), anyhow::Error> {
        let instance = self.linker.instantiate(&mut self.store, module)?;

        abi::validate::required_exports_present(&instance, &mut self.store)?;
        let entrypoints = GuestEntrypoints::resolve(&instance, &mut self.store)?;

        Ok((instance, entrypoints))
    }
}
