//! Integration tests for the tick-paced session against the headless platform

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tickdraw::app::{
    Color, EventInjector, HeadlessPlatform, KeyCode, Session, SessionError, SessionEvent,
};

fn manual_session(width: u32, height: u32) -> (Session<HeadlessPlatform>, EventInjector) {
    let (platform, injector) = HeadlessPlatform::manual();
    let session = Session::initialize(platform, width, height).unwrap();
    (session, injector)
}

#[test]
fn test_initialize_opens_display_at_requested_size() {
    let (session, _injector) = manual_session(640, 480);

    assert_eq!(session.platform().size(), Some((640, 480)));
    assert_eq!(session.canvas().width(), 640);
    assert_eq!(session.canvas().height(), 480);
    assert!(session.is_running());
    assert!(!session.is_key_down(13).unwrap());
}

#[test]
fn test_enter_press_and_release() {
    let (mut session, injector) = manual_session(640, 480);
    let released = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&released);
    session.set_key_released_callback(move |key: KeyCode| log.borrow_mut().push(key.raw()));

    injector.key_down(KeyCode::ENTER);
    injector.tick();
    session.wait_for_tick().unwrap();

    assert!(session.is_key_down(13).unwrap());
    assert!(released.borrow().is_empty());

    injector.key_up(KeyCode::ENTER);
    injector.tick();
    session.wait_for_tick().unwrap();

    assert!(!session.is_key_down(13).unwrap());
    assert_eq!(*released.borrow(), vec![13]);
}

#[test]
fn test_callback_runs_once_per_release_in_order() {
    let (mut session, injector) = manual_session(32, 32);
    let released = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&released);
    session.set_key_released_callback(move |key: KeyCode| log.borrow_mut().push(key));

    for key in [KeyCode::LEFT, KeyCode::SPACE, KeyCode::LEFT] {
        injector.key_down(key);
        injector.key_up(key);
    }
    injector.tick();
    session.wait_for_tick().unwrap();

    assert_eq!(
        *released.borrow(),
        vec![KeyCode::LEFT, KeyCode::SPACE, KeyCode::LEFT]
    );
    assert!(!session.key_down(KeyCode::LEFT));
    assert!(!session.key_down(KeyCode::SPACE));
}

#[test]
fn test_handler_runs_before_key_state_flips() {
    let (mut session, injector) = manual_session(32, 32);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let keys = session.key_view();
    session.set_key_released_callback(move |key: KeyCode| {
        log.borrow_mut().push((key, keys.is_down(key)));
    });

    injector.key_down(KeyCode::ESCAPE);
    injector.key_up(KeyCode::ESCAPE);
    injector.key_up(KeyCode::SPACE);
    injector.tick();
    session.wait_for_tick().unwrap();

    // Escape was still down when its handler ran; Space was never pressed
    assert_eq!(
        *seen.borrow(),
        vec![(KeyCode::ESCAPE, true), (KeyCode::SPACE, false)]
    );
    assert!(!session.key_down(KeyCode::ESCAPE));
}

#[test]
fn test_key_view_tracks_session() {
    let (mut session, injector) = manual_session(32, 32);
    let keys = session.key_view();

    injector.key_down(KeyCode::LEFT);
    injector.key_down(KeyCode::RIGHT);
    injector.key_up(KeyCode::LEFT);
    injector.tick();
    session.wait_for_tick().unwrap();

    assert!(keys.is_down(KeyCode::RIGHT));
    assert!(!keys.is_down(KeyCode::LEFT));
    assert_eq!(keys.snapshot().held().collect::<Vec<_>>(), vec![KeyCode::RIGHT]);
}

#[test]
fn test_release_without_handler_updates_state() {
    let (mut session, injector) = manual_session(32, 32);

    injector.key_down(KeyCode::UP);
    injector.key_up(KeyCode::UP);
    injector.tick();
    session.wait_for_tick().unwrap();

    assert!(!session.key_down(KeyCode::UP));
}

#[test]
fn test_cleared_handler_is_not_called() {
    let (mut session, injector) = manual_session(32, 32);
    let calls = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&calls);
    session.set_key_released_callback(move |_key: KeyCode| *counter.borrow_mut() += 1);
    session.clear_key_released_callback();

    injector.key_up(KeyCode::SPACE);
    injector.tick();
    session.wait_for_tick().unwrap();

    assert_eq!(*calls.borrow(), 0);
}

#[test]
fn test_quit_is_sticky_and_does_not_end_the_wait() {
    let (mut session, injector) = manual_session(32, 32);

    injector.quit();
    injector.key_down(KeyCode::SPACE);
    injector.tick();
    session.wait_for_tick().unwrap();

    assert!(!session.is_running());
    // Events queued after the quit in the same batch are still applied
    assert!(session.key_down(KeyCode::SPACE));

    injector.tick();
    session.wait_for_tick().unwrap();
    assert!(!session.is_running());
}

#[test]
fn test_one_return_per_tick() {
    let (mut session, injector) = manual_session(32, 32);

    for _ in 0..3 {
        injector.tick();
    }
    injector.key_down(KeyCode::SPACE);

    for _ in 0..3 {
        session.wait_for_tick().unwrap();
    }
    // The key-down was queued behind the third tick and is not applied yet
    assert!(!session.key_down(KeyCode::SPACE));

    injector.tick();
    session.wait_for_tick().unwrap();
    assert!(session.key_down(KeyCode::SPACE));
}

#[test]
fn test_other_events_are_ignored() {
    let (mut session, injector) = manual_session(32, 32);

    injector.send(SessionEvent::Other);
    injector.tick();
    session.wait_for_tick().unwrap();

    assert!(session.is_running());
}

#[test]
fn test_key_code_range() {
    let (session, _injector) = manual_session(32, 32);

    assert!(!session.is_key_down(0).unwrap());
    assert!(!session.is_key_down(322).unwrap());

    for code in [-1, 323, i64::from(u16::MAX) + 1] {
        assert!(matches!(
            session.is_key_down(code),
            Err(SessionError::InvalidKeyCode { code: c, limit: 323 }) if c == code
        ));
    }
}

#[test]
fn test_fill_is_idempotent_and_opaque() {
    let (mut session, _injector) = manual_session(16, 8);

    session.fill(Color::rgb(200, 10, 10));
    let once = session.canvas().clone();
    session.fill(Color::rgb(200, 10, 10));
    assert_eq!(session.canvas(), &once);

    session.fill(Color::rgba(1, 2, 3, 0));
    assert!(
        session
            .canvas()
            .pixels()
            .iter()
            .all(|&p| p == Color::rgb(1, 2, 3))
    );
}

#[test]
fn test_drawing_is_invisible_until_present() {
    let (mut session, _injector) = manual_session(64, 64);

    session.fill(Color::WHITE);
    assert!(session.platform().last_frame().is_none());

    session.present().unwrap();
    session.draw_filled_ellipse(32, 32, 10, 10, Color::rgb(0, 0, 255));
    session.draw_ellipse(32, 32, 20, 12, Color::rgb(0, 255, 0));
    session.draw_triangle(2, 2, 60, 2, 30, 60, Color::rgb(255, 0, 0));

    let frame = session.platform().last_frame().unwrap();
    assert_eq!(session.platform().frames_presented(), 1);
    assert_eq!(frame.pixel(32, 32), Some(Color::WHITE));

    session.present().unwrap();
    let frame = session.platform().last_frame().unwrap();
    assert_eq!(session.platform().frames_presented(), 2);
    assert_eq!(frame.pixel(32, 32), Some(Color::rgb(0, 0, 255)));
    assert_eq!(frame.pixel(52, 32), Some(Color::rgb(0, 255, 0)));
    assert_eq!(frame.pixel(30, 2), Some(Color::rgb(255, 0, 0)));
}

#[test]
fn test_translucent_shapes_blend_over_surface() {
    let (mut session, _injector) = manual_session(32, 32);

    session.fill(Color::BLACK);
    session.draw_filled_ellipse(16, 16, 6, 6, Color::rgba(255, 255, 255, 128));

    let center = session.canvas().pixel(16, 16).unwrap();
    assert_eq!(center.a, 255);
    assert!(center.r > 100 && center.r < 160, "got {center:?}");
    assert_eq!(session.canvas().pixel(0, 0), Some(Color::BLACK));
}

#[test]
fn test_closed_event_stream_is_an_error() {
    let (mut session, injector) = manual_session(32, 32);
    drop(injector);

    assert!(matches!(
        session.wait_for_tick(),
        Err(SessionError::EventStreamClosed)
    ));
}

#[test]
fn test_paced_session_receives_real_ticks() {
    let (platform, injector) = HeadlessPlatform::new();
    let mut session = Session::initialize(platform, 32, 32).unwrap();
    injector.key_down(KeyCode::SPACE);

    let start = Instant::now();
    for _ in 0..3 {
        session.wait_for_tick().unwrap();
    }

    assert!(start.elapsed() < Duration::from_secs(5));
    assert!(session.key_down(KeyCode::SPACE));
    session.release();
}
