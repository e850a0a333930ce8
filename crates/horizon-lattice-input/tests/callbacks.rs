//! Integration tests for changes requested from inside callbacks.

use std::sync::Arc;

use horizon_lattice_input::{
    Dispatcher, EventContext, EventParameter, InputError, MouseButton, Point, Rect, Region,
    RegionHandler,
};
use parking_lot::Mutex;

fn setup() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

type Log = Arc<Mutex<Vec<String>>>;

/// Takes focus when clicked and records what it sees.
struct Clickable {
    name: &'static str,
    log: Log,
}

impl RegionHandler for Clickable {
    fn on_enter(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {
        self.log.lock().push(format!("enter({})", self.name));
    }

    fn on_exit(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {
        self.log.lock().push(format!("exit({})", self.name));
    }

    fn on_press(&mut self, _param: &EventParameter, ctx: &mut EventContext<'_>) {
        // The focus a callback sees is the one committed before the batch.
        let before = ctx.focus().unwrap_or("none").to_string();
        self.log.lock().push(format!("press({}) focus={before}", self.name));
        ctx.set_focus(self.name).unwrap();
    }

    fn on_keystroke(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {
        self.log.lock().push(format!("keystroke({})", self.name));
    }
}

/// Removes itself on the first press.
struct OneShot {
    log: Log,
}

impl RegionHandler for OneShot {
    fn on_exit(&mut self, _param: &EventParameter, _ctx: &mut EventContext<'_>) {
        self.log.lock().push("exit(popup)".to_string());
    }

    fn on_press(&mut self, _param: &EventParameter, ctx: &mut EventContext<'_>) {
        self.log.lock().push("press(popup)".to_string());
        assert_eq!(ctx.target_name(), Some("popup"));
        ctx.remove_region("popup").unwrap();
        // Still registered until the batch completes.
        assert!(ctx.region("popup").is_some());
    }
}

#[test]
fn test_focus_change_is_deferred_to_end_of_batch() {
    setup();
    let log = Log::default();
    let mut dispatcher = Dispatcher::new();
    for (name, sort) in [("upper", 2), ("lower", 1)] {
        dispatcher
            .add_region_with_handler(
                Region::new(name, Rect::FULL).with_sort(sort),
                Clickable { name, log: log.clone() },
            )
            .unwrap();
    }

    dispatcher.feed_position(Point::ZERO);
    dispatcher.feed_button_down(MouseButton::Left, None, false);

    // Both presses saw the original focus; the last request wins.
    assert_eq!(
        *log.lock(),
        vec![
            "enter(upper)",
            "enter(lower)",
            "press(upper) focus=none",
            "press(lower) focus=none",
        ]
    );
    assert_eq!(dispatcher.focus(), Some("lower"));

    log.lock().clear();
    dispatcher.feed_keystroke('k' as u32);
    assert_eq!(*log.lock(), vec!["keystroke(lower)"]);
}

#[test]
fn test_self_removal_during_press() {
    setup();
    let log = Log::default();
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .add_region_with_handler(
            Region::new("popup", Rect::FULL).with_sort(9),
            OneShot { log: log.clone() },
        )
        .unwrap();
    dispatcher
        .add_region_with_handler(
            Region::new("page", Rect::FULL),
            Clickable { name: "page", log: log.clone() },
        )
        .unwrap();

    dispatcher.feed_position(Point::ZERO);
    dispatcher.feed_button_down(MouseButton::Left, None, false);

    // The page still receives the press snapshotted before the removal.
    assert_eq!(
        *log.lock(),
        vec![
            "enter(page)",
            "press(popup)",
            "press(page) focus=none",
            "exit(popup)",
        ]
    );
    assert!(dispatcher.region("popup").is_none());
    assert_eq!(dispatcher.entered(), vec!["page"]);

    // Releasing skips the removed region.
    log.lock().clear();
    dispatcher.feed_button_up(MouseButton::Left);
    assert!(log.lock().is_empty());
}

#[test]
fn test_unknown_names_are_rejected_in_callbacks() {
    setup();

    struct Strict {
        result: Arc<Mutex<Option<InputError>>>,
    }

    impl RegionHandler for Strict {
        fn on_enter(&mut self, _param: &EventParameter, ctx: &mut EventContext<'_>) {
            *self.result.lock() = ctx.set_focus("missing").err();
        }
    }

    let result = Arc::new(Mutex::new(None));
    let mut dispatcher = Dispatcher::new();
    dispatcher
        .add_region_with_handler(
            Region::new("strict", Rect::FULL),
            Strict { result: result.clone() },
        )
        .unwrap();

    dispatcher.feed_position(Point::ZERO);
    assert_eq!(*result.lock(), Some(InputError::unknown_region("missing")));
    assert_eq!(dispatcher.focus(), None);
}

#[test]
fn test_deactivation_from_callback() {
    setup();

    struct Dismiss;

    impl RegionHandler for Dismiss {
        fn on_press(&mut self, _param: &EventParameter, ctx: &mut EventContext<'_>) {
            ctx.set_active("menu", false).unwrap();
        }
    }

    let mut dispatcher = Dispatcher::new();
    dispatcher
        .add_region_with_handler(Region::new("menu", Rect::FULL), Dismiss)
        .unwrap();

    dispatcher.feed_position(Point::ZERO);
    dispatcher.feed_button_down(MouseButton::Left, None, false);

    assert!(!dispatcher.region("menu").unwrap().is_active());
    assert!(!dispatcher.is_entered("menu"));

    // Capture does not resurrect an inactive region.
    dispatcher.feed_position(Point::new(0.2, 0.2));
    assert!(dispatcher.entered().is_empty());
}
