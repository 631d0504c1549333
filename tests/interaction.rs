// Integration tests (native) for the `glizzy-cat` crate.
// These tests avoid wasm-specific functionality and exercise the pure
// interaction logic so they can run under `cargo test` on the host.

use glizzy_cat::{DragController, DragOutcome, FeedCounter, Point, Rect};

fn mouth() -> Rect {
    Rect::new(800.0, 500.0, 80.0, 50.0)
}

fn pile_slot() -> Rect {
    Rect::new(50.0, 30.0, 120.0, 48.0)
}

#[test]
fn feed_inside_expanded_zone_increments_exactly_once() {
    let mut drag = DragController::new(100.0);
    let mut counter = FeedCounter::new(7);
    assert!(drag.begin(1, Point::new(60.0, 40.0), pile_slot()));

    // Release 80px above the mouth top, inside the 100px margin.
    let outcome = drag.resolve(Point::new(840.0, 420.0), mouth());
    assert_eq!(outcome, DragOutcome::Fed { glizzy: 1 });
    if let DragOutcome::Fed { .. } = outcome {
        counter.increment();
    }
    assert_eq!(counter.get(), 8);
    assert!(!drag.is_active());
}

#[test]
fn miss_returns_to_origin_and_leaves_counter_alone() {
    let mut drag = DragController::new(100.0);
    let counter = FeedCounter::new(7);
    drag.begin(2, Point::new(60.0, 40.0), pile_slot());

    let outcome = drag.resolve(Point::new(10.0, 10.0), mouth());
    assert_eq!(
        outcome,
        DragOutcome::Returned {
            glizzy: 2,
            origin: Point::new(50.0, 30.0),
        }
    );
    assert_eq!(counter.get(), 7);
    assert!(!drag.is_active());
}

#[test]
fn only_one_drag_session_at_a_time() {
    let mut drag = DragController::new(100.0);
    assert!(drag.begin(1, Point::new(0.0, 0.0), pile_slot()));
    // A second pointer-down while a drag is live is a no-op.
    assert!(!drag.begin(2, Point::new(5.0, 5.0), pile_slot()));
    assert_eq!(drag.session().unwrap().glizzy, 1);

    // The eventual resolve still applies to the first glizzy.
    let outcome = drag.resolve(Point::new(840.0, 520.0), mouth());
    assert_eq!(outcome, DragOutcome::Fed { glizzy: 1 });
}

#[test]
fn forced_cancel_resets_everything() {
    let mut drag = DragController::new(100.0);
    drag.begin(3, Point::new(70.0, 50.0), pile_slot());

    // Resize / tab-hide path: the session is torn down wholesale.
    let session = drag.cancel().expect("active session");
    assert_eq!(session.glizzy, 3);
    assert_eq!(session.origin, Point::new(50.0, 30.0));
    assert!(!drag.is_active());
    assert!(drag.cancel().is_none());

    // A fresh drag starts cleanly afterwards.
    assert!(drag.begin(4, Point::new(0.0, 0.0), pile_slot()));
}

#[test]
fn drop_margin_is_configurable() {
    let m = mouth();
    let p = Point::new(m.left - 50.0, m.top + 10.0);

    let mut forgiving = DragController::new(100.0);
    forgiving.begin(1, Point::new(0.0, 0.0), pile_slot());
    assert_eq!(forgiving.resolve(p, m), DragOutcome::Fed { glizzy: 1 });

    let mut strict = DragController::new(30.0);
    strict.begin(1, Point::new(0.0, 0.0), pile_slot());
    assert!(matches!(
        strict.resolve(p, m),
        DragOutcome::Returned { glizzy: 1, .. }
    ));
}

#[test]
fn drag_position_tracks_pointer_without_snapping() {
    let mut drag = DragController::new(100.0);
    // Grabbed 10px into the sprite; the sprite keeps that offset while moving.
    drag.begin(1, Point::new(60.0, 40.0), pile_slot());
    assert_eq!(
        drag.drag_position(Point::new(300.0, 200.0)),
        Some(Point::new(290.0, 190.0))
    );
    assert_eq!(
        drag.drag_position(Point::new(301.5, 200.5)),
        Some(Point::new(291.5, 190.5))
    );
}

#[test]
fn local_only_mode_without_remote_config() {
    use glizzy_cat::{RemoteConfig, parse_stored_count};

    // Template placeholders never configure a remote backend.
    assert!(
        RemoteConfig::validate("YOUR_SUPABASE_URL".into(), "YOUR_SUPABASE_ANON_KEY".into())
            .is_none()
    );

    // The local fallback round-trips through its string encoding exactly.
    assert_eq!(parse_stored_count(Some(1234u64.to_string())), 1234);
    assert_eq!(parse_stored_count(None), 0);
    assert_eq!(parse_stored_count(Some("not a number".into())), 0);
}

#[test]
fn counter_display_formatting_thresholds() {
    use glizzy_cat::format_count;
    assert_eq!(format_count(950), "950");
    assert_eq!(format_count(1_500), "1.5K");
    assert_eq!(format_count(2_000_000), "2M");
}
