//! C ABI for scripting hosts
//!
//! Every function takes the handle returned by [`game_init`]. Null handles
//! are ignored (queries return 0). Drawing channels are truncated to their
//! low 8 bits.
//!
//! The key-release callback runs inside [`game_wait`]. From there a host may
//! call [`game_is_pressed`]; any other call on the same handle is rejected,
//! logged, and answered as if the handle were null.

use std::cell::RefCell;
use std::ffi::c_int;
use std::ptr;

use tracing::{error, warn};

use crate::app::{AppConfig, Color, KeyCode, KeyView, Platform, Session, WinitPlatform};
use crate::logging;

/// Opaque session handle
pub struct Game {
    session: RefCell<Session<WinitPlatform>>,
    keys: KeyView,
}

/// Key-release callback receiving the key code
pub type KeyReleasedCallback = extern "C" fn(c_int);

fn channel(value: c_int) -> u8 {
    value as u8
}

fn rgba(r: c_int, g: c_int, b: c_int, a: c_int) -> Color {
    Color::rgba(channel(r), channel(g), channel(b), channel(a))
}

/// Runs `f` on the session unless it is already in use further up the stack
fn enter<P: Platform, R>(
    session: &RefCell<Session<P>>,
    call: &'static str,
    fallback: R,
    f: impl FnOnce(&mut Session<P>) -> R,
) -> R {
    match session.try_borrow_mut() {
        Ok(mut session) => f(&mut session),
        Err(_) => {
            warn!(call, "Call from inside the key-release callback rejected");
            fallback
        }
    }
}

/// # Safety
/// `game` must be null or a live handle from [`game_init`].
unsafe fn with_session<R>(
    game: *mut Game,
    call: &'static str,
    fallback: R,
    f: impl FnOnce(&mut Session<WinitPlatform>) -> R,
) -> R {
    match unsafe { game.as_ref() } {
        Some(game) => enter(&game.session, call, fallback, f),
        None => fallback,
    }
}

/// Key lookup shared by [`game_is_pressed`]; never touches the session itself
fn key_pressed(keys: &KeyView, code: c_int) -> c_int {
    match KeyCode::try_from(i64::from(code)) {
        Ok(key) => keys.is_down(key) as c_int,
        Err(e) => {
            warn!(error = %e, "Key lookup rejected");
            0
        }
    }
}

/// Opens a `width` x `height` window and starts the tick source
///
/// Returns null if the display cannot be initialized.
#[unsafe(no_mangle)]
pub extern "C" fn game_init(width: c_int, height: c_int) -> *mut Game {
    let config = AppConfig::load_from_env().unwrap_or_else(|_| AppConfig::fallback("release"));
    logging::init(&config.logging);

    let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
        error!(width, height, "Invalid surface size");
        return ptr::null_mut();
    };

    match WinitPlatform::new(config.window).and_then(|p| Session::initialize(p, width, height)) {
        Ok(session) => {
            let keys = session.key_view();
            Box::into_raw(Box::new(Game {
                session: RefCell::new(session),
                keys,
            }))
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize game session");
            ptr::null_mut()
        }
    }
}

/// Sets (or, with null, clears) the key-release callback
///
/// The callback may query [`game_is_pressed`]; the released key still reads
/// as pressed while it runs. Other calls on `game` from the callback are
/// rejected.
///
/// # Safety
/// `game` must be null or a live handle from [`game_init`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn game_set_keypressed_cb(
    game: *mut Game,
    callback: Option<KeyReleasedCallback>,
) {
    unsafe {
        with_session(game, "game_set_keypressed_cb", (), |session| match callback {
            Some(callback) => session
                .set_key_released_callback(move |key: KeyCode| callback(key.raw() as c_int)),
            None => session.clear_key_released_callback(),
        })
    }
}

/// Pointer to the surface's RGBA bytes (`4 * width` per row), valid until the next call
///
/// # Safety
/// `game` must be null or a live handle from [`game_init`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn game_get_surface(game: *mut Game) -> *const u8 {
    unsafe {
        with_session(game, "game_get_surface", ptr::null(), |s| {
            s.canvas().as_bytes().as_ptr()
        })
    }
}

/// # Safety
/// `game` must be null or a live handle from [`game_init`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn game_surface_width(game: *mut Game) -> c_int {
    unsafe { with_session(game, "game_surface_width", 0, |s| s.canvas().width() as c_int) }
}

/// # Safety
/// `game` must be null or a live handle from [`game_init`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn game_surface_height(game: *mut Game) -> c_int {
    unsafe { with_session(game, "game_surface_height", 0, |s| s.canvas().height() as c_int) }
}

/// # Safety
/// `game` must be null or a live handle from [`game_init`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn game_fill_screen(game: *mut Game, r: c_int, g: c_int, b: c_int) {
    unsafe {
        with_session(game, "game_fill_screen", (), |s| {
            s.fill(Color::rgb(channel(r), channel(g), channel(b)))
        })
    }
}

/// # Safety
/// `game` must be null or a live handle from [`game_init`].
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn game_draw_filled_ellipse(
    game: *mut Game,
    x: c_int,
    y: c_int,
    rx: c_int,
    ry: c_int,
    r: c_int,
    g: c_int,
    b: c_int,
    a: c_int,
) {
    unsafe {
        with_session(game, "game_draw_filled_ellipse", (), |s| {
            s.draw_filled_ellipse(x, y, rx, ry, rgba(r, g, b, a))
        })
    }
}

/// # Safety
/// `game` must be null or a live handle from [`game_init`].
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn game_draw_ellipse(
    game: *mut Game,
    x: c_int,
    y: c_int,
    rx: c_int,
    ry: c_int,
    r: c_int,
    g: c_int,
    b: c_int,
    a: c_int,
) {
    unsafe {
        with_session(game, "game_draw_ellipse", (), |s| {
            s.draw_ellipse(x, y, rx, ry, rgba(r, g, b, a))
        })
    }
}

/// # Safety
/// `game` must be null or a live handle from [`game_init`].
#[unsafe(no_mangle)]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn game_draw_triangle(
    game: *mut Game,
    x1: c_int,
    y1: c_int,
    x2: c_int,
    y2: c_int,
    x3: c_int,
    y3: c_int,
    r: c_int,
    g: c_int,
    b: c_int,
    a: c_int,
) {
    unsafe {
        with_session(game, "game_draw_triangle", (), |s| {
            s.draw_triangle(x1, y1, x2, y2, x3, y3, rgba(r, g, b, a))
        })
    }
}

/// Presents the surface. Returns 0 on success, -1 on failure.
///
/// # Safety
/// `game` must be null or a live handle from [`game_init`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn game_flip(game: *mut Game) -> c_int {
    unsafe {
        with_session(game, "game_flip", -1, |s| match s.present() {
            Ok(()) => 0,
            Err(e) => {
                warn!(error = %e, "Present failed");
                -1
            }
        })
    }
}

/// 1 if the key is held, 0 otherwise (including out-of-range codes)
///
/// Safe to call from the key-release callback.
///
/// # Safety
/// `game` must be null or a live handle from [`game_init`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn game_is_pressed(game: *mut Game, code: c_int) -> c_int {
    match unsafe { game.as_ref() } {
        Some(game) => key_pressed(&game.keys, code),
        None => 0,
    }
}

/// # Safety
/// `game` must be null or a live handle from [`game_init`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn game_is_running(game: *mut Game) -> c_int {
    unsafe { with_session(game, "game_is_running", 0, |s| s.is_running() as c_int) }
}

/// Blocks until the next tick. Returns 0, or -1 if the event loop has gone away.
///
/// # Safety
/// `game` must be null or a live handle from [`game_init`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn game_wait(game: *mut Game) -> c_int {
    unsafe {
        with_session(game, "game_wait", -1, |s| match s.wait_for_tick() {
            Ok(()) => 0,
            Err(e) => {
                error!(error = %e, "Wait failed");
                -1
            }
        })
    }
}

/// Releases the session. The handle must not be used afterwards.
///
/// Ignored when called from the key-release callback.
///
/// # Safety
/// `game` must be null or a live handle from [`game_init`] not yet freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn game_free(game: *mut Game) {
    let Some(handle) = (unsafe { game.as_ref() }) else {
        return;
    };
    if handle.session.try_borrow_mut().is_err() {
        warn!("game_free from inside the key-release callback ignored");
        return;
    }

    let game = unsafe { Box::from_raw(game) };
    game.session.into_inner().release();
}
