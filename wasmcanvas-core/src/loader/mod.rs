//! Module-binary loading.
//!
//! Accepts either a `.wasm` binary or `.wat` text and compiles a
//! `wasmtime::Module`. The format is sniffed from the bytes themselves since
//! callers may hand over a buffer with no filename attached.

use thiserror::Error;
use wasmtime::{Engine, Module};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unrecognized module format (expected wasm or wat)")]
    UnrecognizedFormat,

    #[error("failed to parse WAT: {0}")]
    WatParse(#[from] wat::Error),

    #[error("failed to compile module: {0}")]
    Compile(#[source] anyhow::Error),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DetectedFormat {
    Wasm,
    Wat,
}

/// Detect -> (optional) wat->wasm -> compile.
pub fn compile_module(engine: &Engine, bytes: &[u8]) -> Result<Module, LoadError> {
    let wasm_bytes = normalize_to_wasm(bytes)?;
    Module::new(engine, &wasm_bytes).map_err(LoadError::Compile)
}

/// Normalize the input to valid WASM bytes.
pub fn normalize_to_wasm(bytes: &[u8]) -> Result<Vec<u8>, LoadError> {
    match detect_format(bytes).ok_or(LoadError::UnrecognizedFormat)? {
        DetectedFormat::Wasm => Ok(bytes.to_vec()),
        DetectedFormat::Wat => Ok(wat::parse_bytes(bytes)?.into()),
    }
}

/// Best-effort detection.
///
/// `\0asm` magic means WASM; otherwise, a `(` after an optional BOM and
/// leading whitespace is taken as WAT (`(module ...)`).
pub fn detect_format(bytes: &[u8]) -> Option<DetectedFormat> {
    if bytes.len() >= 4 && bytes[0..4] == *b"\0asm" {
        return Some(DetectedFormat::Wasm);
    }

    let i = skip_bom_and_leading_ws(bytes);
    if i < bytes.len() && bytes[i] == b'(' {
        return Some(DetectedFormat::Wat);
    }

    None
}

fn skip_bom_and_leading_ws(bytes: &[u8]) -> usize {
    let mut i = 0;

    // UTF-8 BOM: EF BB BF
    if bytes.len() >= 3 && bytes[0..3] == [0xEF, 0xBB, 0xBF] {
        i = 3;
    }

    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            _ => break,
        }
    }

    i
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_wasm_magic() {
        assert_eq!(
            detect_format(b"\0asm\x01\x00\x00\x00"),
            Some(DetectedFormat::Wasm)
        );
    }

    #[test]
    fn detects_wat_with_whitespace() {
        assert_eq!(detect_format(b"   \n\t(module)"), Some(DetectedFormat::Wat));
    }

    #[test]
    fn detects_wat_with_bom() {
        assert_eq!(
            detect_format(b"\xEF\xBB\xBF(module)"),
            Some(DetectedFormat::Wat)
        );
    }

    #[test]
    fn unrecognized_returns_none() {
        assert_eq!(detect_format(b"not wasm"), None);
        assert_eq!(detect_format(b""), None);
    }

    #[test]
    fn normalizes_wat_to_wasm_bytes() {
        let wasm = normalize_to_wasm(b"(module)").unwrap();
        assert_eq!(&wasm[0..4], b"\0asm");
    }

    #[test]
    fn unrecognized_input_fails_to_normalize() {
        assert!(matches!(
            normalize_to_wasm(b"garbage"),
            Err(LoadError::UnrecognizedFormat)
        ));
    }
}
