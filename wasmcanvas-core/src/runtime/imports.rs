//! Host import definitions: the fixed function surface the module calls.
//!
//! Every import marshals its raw arguments (string addresses, packed colors)
//! into host types and forwards to the [`Surface`] held in the store. Guest
//! memory is only viewed inside the call that received the address; the
//! module may grow or relocate its memory between calls.
//!
//! Marshalling failures and `throw_error` both return an error from the
//! closure, which wasmtime raises as a trap through the calling guest frame.

use wasmtime::{Caller, Extern, Linker};

use crate::abi::{IMPORT_MODULE, guest_exports, host_imports};
use crate::color;
use crate::error::HostError;
use crate::mem;
use crate::runtime::HostState;
use crate::surface::{Alignment, Surface};

/// Decode the null-terminated string at `addr` in the caller's memory.
fn read_guest_c_string<S: Surface + 'static>(
    caller: &mut Caller<'_, HostState<S>>,
    addr: u32,
) -> Result<String, anyhow::Error> {
    let memory = caller
        .get_export(guest_exports::MEMORY)
        .and_then(Extern::into_memory)
        .ok_or(HostError::MissingExport(guest_exports::MEMORY))?;

    let max_len = caller.data().max_string_len;
    let text = mem::read_c_string(memory.data(&*caller), addr, max_len)
        .map_err(HostError::Protocol)?;
    Ok(text)
}

fn read_alignment<S: Surface + 'static>(
    caller: &mut Caller<'_, HostState<S>>,
    addr: u32,
) -> Result<Alignment, anyhow::Error> {
    let keyword = read_guest_c_string(caller, addr)?;
    let alignment = keyword
        .parse::<Alignment>()
        .map_err(HostError::Alignment)?;
    Ok(alignment)
}

/// Render `text` with the call's styling arguments applied first.
///
/// Styling mutations persist on the surface past this call; that is the
/// contract, not an accident.
fn styled_text<S: Surface>(
    surface: &mut S,
    text: &str,
    x: u32,
    y: u32,
    size: u32,
    color: u32,
    fill: bool,
    alignment: Alignment,
) {
    let style = color::to_hex_string(color);
    surface.set_font_size(size);
    surface.set_alignment(alignment);
    if fill {
        surface.set_fill_style(&style);
        surface.fill_text(text, x as i32, y as i32);
    } else {
        surface.set_stroke_style(&style);
        surface.stroke_text(text, x as i32, y as i32);
    }
}

/// Define all host imports expected by guests under module `"env"`.
///
/// Must be called before instantiating the module.
pub fn define_imports<S: Surface + 'static>(
    linker: &mut Linker<HostState<S>>,
) -> Result<(), anyhow::Error> {
    linker.func_wrap(
        IMPORT_MODULE,
        host_imports::THROW_ERROR,
        |mut caller: Caller<'_, HostState<S>>, message_addr: u32| -> Result<(), anyhow::Error> {
            let message = read_guest_c_string(&mut caller, message_addr)?;
            Err(HostError::ModuleFatal(message).into())
        },
    )?;

    linker.func_wrap(
        IMPORT_MODULE,
        host_imports::PRINT_TEXT,
        |mut caller: Caller<'_, HostState<S>>, message_addr: u32| -> Result<(), anyhow::Error> {
            let message = read_guest_c_string(&mut caller, message_addr)?;
            log::info!(target: "module", "{message}");
            Ok(())
        },
    )?;

    linker.func_wrap(
        IMPORT_MODULE,
        host_imports::DRAW_TEXT,
        |mut caller: Caller<'_, HostState<S>>,
         message_addr: u32,
         x: u32,
         y: u32,
         size: u32,
         color: u32,
         fill: u32,
         align_addr: u32|
         -> Result<(), anyhow::Error> {
            let text = read_guest_c_string(&mut caller, message_addr)?;
            let alignment = read_alignment(&mut caller, align_addr)?;
            let surface = &mut caller.data_mut().surface;
            styled_text(surface, &text, x, y, size, color, fill != 0, alignment);
            Ok(())
        },
    )?;

    linker.func_wrap(
        IMPORT_MODULE,
        host_imports::DRAW_NUMBER,
        |mut caller: Caller<'_, HostState<S>>,
         number: u32,
         x: u32,
         y: u32,
         size: u32,
         color: u32,
         fill: u32,
         align_addr: u32|
         -> Result<(), anyhow::Error> {
            let alignment = read_alignment(&mut caller, align_addr)?;
            let text = number.to_string();
            let surface = &mut caller.data_mut().surface;
            styled_text(surface, &text, x, y, size, color, fill != 0, alignment);
            Ok(())
        },
    )?;

    linker.func_wrap(
        IMPORT_MODULE,
        host_imports::DRAW_RECTANGLE,
        |mut caller: Caller<'_, HostState<S>>,
         x: u32,
         y: u32,
         width: u32,
         height: u32,
         color: u32,
         fill: u32|
         -> Result<(), anyhow::Error> {
            let style = color::to_hex_string(color);
            let surface = &mut caller.data_mut().surface;
            if fill != 0 {
                surface.set_fill_style(&style);
                surface.fill_rect(x as i32, y as i32, width, height);
            } else {
                surface.set_stroke_style(&style);
                surface.stroke_rect(x as i32, y as i32, width, height);
            }
            Ok(())
        },
    )?;

    Ok(())
}
