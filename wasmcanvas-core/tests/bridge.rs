//! End-to-end tests: a real WAT guest module driven through the public API.

use wasmcanvas_core::mem::ProtocolError;
use wasmcanvas_core::{FrameDriver, FrameOutcome, Game, HostError, Key, SoftwareSurface};

/// Guest used by most tests.
///
/// Behavior:
/// - `game_init` prints a greeting.
/// - `game_update` dispatches on the last pressed key: `x` raises a fatal
///   error, `p` prints an unterminated string, `b` draws text with a bogus
///   alignment keyword.
/// - `game_render` fills a red 2x2 rectangle at (1,1) and, once a key was
///   pressed, a green pixel at (key_code, 0).
const GUEST: &str = r#"
(module
  (import "env" "throw_error" (func $throw_error (param i32)))
  (import "env" "print_text" (func $print_text (param i32)))
  (import "env" "draw_text"
    (func $draw_text (param i32 i32 i32 i32 i32 i32 i32)))
  (import "env" "draw_number"
    (func $draw_number (param i32 i32 i32 i32 i32 i32 i32)))
  (import "env" "draw_rectangle"
    (func $draw_rectangle (param i32 i32 i32 i32 i32 i32)))

  (memory (export "memory") 1)
  (data (i32.const 0) "center\00")
  (data (i32.const 16) "hello host\00")
  (data (i32.const 32) "out of memory\00")
  ;; Last byte of the only memory page, deliberately not NUL-terminated.
  (data (i32.const 65535) "A")

  (global $last_key (mut i32) (i32.const -1))
  (global $width (mut i32) (i32.const 0))

  (func (export "game_init") (param $w i32) (param $h i32)
    (global.set $width (local.get $w))
    (call $print_text (i32.const 16)))

  (func (export "game_update") (param $dt f32)
    (if (i32.eq (global.get $last_key) (i32.const 120)) ;; 'x'
      (then (call $throw_error (i32.const 32))))
    (if (i32.eq (global.get $last_key) (i32.const 112)) ;; 'p'
      (then (call $print_text (i32.const 65535))))
    (if (i32.eq (global.get $last_key) (i32.const 98)) ;; 'b'
      (then (call $draw_text
        (i32.const 16) (i32.const 4) (i32.const 6) (i32.const 8)
        (i32.const 0xFFFFFFFF) (i32.const 1) (i32.const 16)))))

  (func (export "game_render")
    (call $draw_rectangle
      (i32.const 1) (i32.const 1) (i32.const 2) (i32.const 2)
      (i32.const 0xFF0000FF) (i32.const 1))
    (call $draw_number
      (i32.const 7) (i32.const 4) (i32.const 6) (i32.const 8)
      (i32.const 0xFFFFFFFF) (i32.const 1) (i32.const 0))
    (if (i32.ge_s (global.get $last_key) (i32.const 0))
      (then (call $draw_rectangle
        (global.get $last_key) (i32.const 0) (i32.const 1) (i32.const 1)
        (i32.const 0x00FF00FF) (i32.const 1)))))

  (func (export "game_key_down") (param $key i32)
    (global.set $last_key (local.get $key)))

  (func (export "get_arena_used") (result i32) (i32.const 128))
  (func (export "get_arena_size") (result i32) (i32.const 65536))
)
"#;

const RED: u32 = 0xFF0000FF;
const GREEN: u32 = 0x00FF00FF;

fn load_guest(width: u32, height: u32) -> Game<SoftwareSurface> {
    Game::load(GUEST.as_bytes(), SoftwareSurface::new(width, height)).expect("guest should load")
}

#[test]
fn load_initializes_module_and_reports_arena_diagnostics() {
    let mut game = load_guest(64, 8);
    assert_eq!(game.arena_used().unwrap(), 128);
    assert_eq!(game.arena_size().unwrap(), 65536);
}

#[test]
fn frame_driver_runs_update_render_and_rectangle_reaches_the_surface() {
    let mut game = load_guest(64, 8);
    let mut driver = FrameDriver::new();

    assert_eq!(driver.tick(0.0, &mut game).unwrap(), FrameOutcome::Warmup);
    assert_eq!(game.surface().pixel(1, 1), Some(0), "no render before first delta");

    assert_eq!(driver.tick(16.0, &mut game).unwrap(), FrameOutcome::Rendered);
    // Color travels packed-RGBA -> "#ff0000ff" -> framebuffer.
    assert_eq!(game.surface().pixel(1, 1), Some(RED));
    assert_eq!(game.surface().pixel(2, 2), Some(RED));
    assert_eq!(game.surface().pixel(3, 3), Some(0));
}

#[test]
fn arrow_key_reaches_the_module_as_its_reserved_code() {
    let mut game = load_guest(64, 8);
    game.key_down(Key::ArrowLeft).unwrap();
    game.render().unwrap();
    // The guest echoes the code as a pixel x-coordinate: 37, not a char code.
    assert_eq!(game.surface().pixel(37, 0), Some(GREEN));
}

#[test]
fn throw_error_aborts_the_frame_with_the_module_message() {
    let mut game = load_guest(64, 8);
    let mut driver = FrameDriver::new();
    driver.tick(0.0, &mut game).unwrap();

    game.key_down(Key::Character('x')).unwrap();
    let err = driver.tick(16.0, &mut game).unwrap_err();

    match err.downcast_ref::<HostError>() {
        Some(HostError::ModuleFatal(message)) => assert_eq!(message, "out of memory"),
        other => panic!("expected ModuleFatal, got {other:?}"),
    }
    // The failed update aborted the frame: render never ran.
    assert_eq!(game.surface().pixel(1, 1), Some(0));
}

#[test]
fn unterminated_guest_string_is_a_fatal_protocol_error() {
    let mut game = load_guest(64, 8);
    game.key_down(Key::Character('p')).unwrap();
    let err = game.update(0.016).unwrap_err();

    match err.downcast_ref::<HostError>() {
        Some(HostError::Protocol(ProtocolError::Unterminated { addr })) => {
            assert_eq!(*addr, 65535)
        }
        other => panic!("expected protocol violation, got {other:?}"),
    }
}

#[test]
fn unknown_alignment_keyword_is_rejected() {
    let mut game = load_guest(64, 8);
    game.key_down(Key::Character('b')).unwrap();
    let err = game.update(0.016).unwrap_err();
    assert!(
        matches!(err.downcast_ref::<HostError>(), Some(HostError::Alignment(_))),
        "expected alignment error, got {err:?}"
    );
}

#[test]
fn module_missing_an_entry_point_fails_to_load() {
    // Everything except `game_render`.
    let wat = r#"
    (module
      (memory (export "memory") 1)
      (func (export "game_init") (param i32 i32))
      (func (export "game_update") (param f32))
      (func (export "game_key_down") (param i32))
      (func (export "get_arena_used") (result i32) (i32.const 0))
      (func (export "get_arena_size") (result i32) (i32.const 0))
    )
    "#;

    let err = Game::load(wat.as_bytes(), SoftwareSurface::new(8, 8))
        .err()
        .expect("load must fail without game_render");
    assert!(
        matches!(
            err.downcast_ref::<HostError>(),
            Some(HostError::MissingExport("game_render"))
        ),
        "got {err:?}"
    );
}

#[test]
fn unparseable_module_bytes_fail_to_load() {
    assert!(Game::load(b"definitely not wasm", SoftwareSurface::new(8, 8)).is_err());
}
