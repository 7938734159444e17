use std::cell::Cell;
use std::rc::Rc;

use disclosure::{
    Align, BoundaryMap, Button, Controller, Document, Event, Key, ListenerKind, MenuHandle,
    MenuItem, MenuList, Modifiers, Panel, Rect, Trigger,
};

const TRIGGER: Rect = Rect::new(10, 0, 12, 1);
const PANEL: Rect = Rect::new(10, 1, 20, 5);

struct Fixture {
    document: Document,
    controller: Controller,
    trigger: Trigger<Button>,
    panel: Panel<MenuList>,
}

impl Fixture {
    fn mount() -> Self {
        let document = Document::new();
        let controller = Controller::mount(&document);
        let menu = controller.handle();
        let trigger = Trigger::new(&menu, Button::new("Spring 2026"));
        let panel = Panel::new(&menu, &document, semesters());
        let fixture = Self {
            document,
            controller,
            trigger,
            panel,
        };
        fixture.lay_out();
        fixture
    }

    fn lay_out(&self) {
        let mut layout = BoundaryMap::new();
        layout.insert(self.trigger.node().clone(), TRIGGER);
        layout.insert(self.panel.node().clone(), PANEL);
        self.document.set_layout(layout);
    }

    fn menu(&self) -> MenuHandle {
        self.controller.handle()
    }

    /// Pointer-down on the trigger followed by its activation.
    fn click_trigger(&self) {
        let (x, y) = TRIGGER.center();
        self.document.dispatch(&Event::pointer_down(x, y));
        self.trigger.activate();
    }
}

fn semesters() -> MenuList {
    MenuList::new()
        .label("Choose semester")
        .separator()
        .item(MenuItem::new("Spring 2026"))
        .item(MenuItem::new("Fall 2025"))
}

fn count_transitions(menu: &MenuHandle) -> (Rc<Cell<u32>>, Rc<dyn Fn(bool)>) {
    let closes = Rc::new(Cell::new(0));
    let observer: Rc<dyn Fn(bool)> = {
        let closes = Rc::clone(&closes);
        Rc::new(move |open| {
            if !open {
                closes.set(closes.get() + 1);
            }
        })
    };
    menu.observe(&observer);
    (closes, observer)
}

// ============================================================================
// Controller
// ============================================================================

#[test]
fn test_toggle_parity() {
    for n in 0..8 {
        let document = Document::new();
        let controller = Controller::mount(&document);
        let menu = controller.handle();
        for _ in 0..n {
            menu.toggle();
        }
        assert_eq!(menu.is_open(), n % 2 == 1, "after {n} toggles");
    }
}

#[test]
fn test_close_when_closed_is_silent() {
    let document = Document::new();
    let controller = Controller::mount(&document);
    let menu = controller.handle();
    let (closes, _observer) = count_transitions(&menu);

    menu.close();
    menu.close();

    assert!(!menu.is_open());
    assert_eq!(closes.get(), 0);
}

#[test]
fn test_mount_registers_one_cancellation_listener() {
    let document = Document::new();
    let controller = Controller::mount(&document);

    assert!(controller.is_subscribed());
    assert_eq!(document.listener_count_of(ListenerKind::KeyDown), 1);
    assert_eq!(document.listener_count_of(ListenerKind::PointerDown), 0);
}

#[test]
fn test_early_return_during_mount_releases_cancellation() {
    fn build(document: &Document, fail: bool) -> Result<Controller, String> {
        let controller = Controller::mount(document);
        if fail {
            return Err("layout unavailable".into());
        }
        Ok(controller)
    }

    let document = Document::new();
    assert!(build(&document, true).is_err());
    assert_eq!(document.listener_count(), 0);

    let kept = build(&document, false).unwrap();
    assert_eq!(document.listener_count(), 1);
    kept.unmount();
    assert_eq!(document.listener_count(), 0);
}

// ============================================================================
// Panel rendering
// ============================================================================

#[test]
fn test_panel_renders_only_while_open() {
    let f = Fixture::mount();
    assert!(f.panel.render().is_none());
    assert!(!f.panel.is_listening());

    f.trigger.activate();
    assert!(f.panel.render().is_some());
    assert!(f.panel.is_listening());

    f.menu().close();
    assert!(f.panel.render().is_none());
    assert!(!f.panel.is_listening());
}

#[test]
fn test_panel_never_renders_while_closed() {
    let f = Fixture::mount();
    let menu = f.menu();
    let steps: [&dyn Fn(); 5] = [
        &|| menu.toggle(),
        &|| menu.close(),
        &|| f.trigger.activate(),
        &|| {
            f.document.dispatch(&Event::key(Key::Escape));
        },
        &|| f.click_trigger(),
    ];

    for step in steps {
        step();
        assert_eq!(f.panel.render().is_some(), menu.is_open());
        assert_eq!(f.panel.is_listening(), menu.is_open());
    }
}

#[test]
fn test_panel_created_while_open_listens_immediately() {
    let document = Document::new();
    let controller = Controller::mount(&document);
    let menu = controller.handle();
    menu.toggle();

    let panel = Panel::new(&menu, &document, semesters());

    assert!(panel.is_listening());
    assert_eq!(document.listener_count_of(ListenerKind::PointerDown), 1);
}

// ============================================================================
// Outside-pointer dismissal
// ============================================================================

#[test]
fn test_pointer_down_outside_closes_once() {
    let f = Fixture::mount();
    let (closes, _observer) = count_transitions(&f.menu());
    f.click_trigger();
    assert!(f.menu().is_open());

    let ran = f.document.dispatch(&Event::pointer_down(70, 20));
    assert_eq!(ran, 1);
    assert!(f.panel.render().is_none());
    assert_eq!(closes.get(), 1);

    // The listener left with the open state
    let ran = f.document.dispatch(&Event::pointer_down(70, 20));
    assert_eq!(ran, 0);
    assert_eq!(closes.get(), 1);
}

#[test]
fn test_pointer_down_inside_panel_keeps_open() {
    let f = Fixture::mount();
    f.click_trigger();

    f.document.dispatch(&Event::pointer_down(PANEL.x + 2, PANEL.y + 3));

    assert!(f.menu().is_open());
    assert!(f.panel.is_listening());
}

#[test]
fn test_pointer_down_inside_trigger_is_not_outside() {
    let f = Fixture::mount();
    f.click_trigger();

    let (x, y) = TRIGGER.center();
    f.document.dispatch(&Event::pointer_down(x, y));

    assert!(f.menu().is_open());
}

#[test]
fn test_clicking_trigger_again_closes() {
    let f = Fixture::mount();
    let (closes, _observer) = count_transitions(&f.menu());

    f.click_trigger();
    assert!(f.menu().is_open());

    f.click_trigger();
    assert!(!f.menu().is_open());
    assert!(f.panel.render().is_none());
    assert_eq!(closes.get(), 1);
    assert_eq!(f.document.listener_count_of(ListenerKind::PointerDown), 0);
}

#[test]
fn test_unresolved_boundaries_keep_menu_open() {
    let f = Fixture::mount();
    f.click_trigger();

    // Nothing laid out this frame
    f.document.set_layout(BoundaryMap::new());
    f.document.dispatch(&Event::pointer_down(70, 20));
    assert!(f.menu().is_open());

    // Only the trigger laid out
    let mut layout = BoundaryMap::new();
    layout.insert(f.trigger.node().clone(), TRIGGER);
    f.document.set_layout(layout);
    f.document.dispatch(&Event::pointer_down(70, 20));
    assert!(f.menu().is_open());

    f.lay_out();
    f.document.dispatch(&Event::pointer_down(70, 20));
    assert!(!f.menu().is_open());
}

#[test]
fn test_boundaries_resolve_against_current_layout() {
    let f = Fixture::mount();
    f.click_trigger();

    // Panel moved since the menu opened
    let moved = Rect::new(50, 10, 20, 5);
    let mut layout = BoundaryMap::new();
    layout.insert(f.trigger.node().clone(), TRIGGER);
    layout.insert(f.panel.node().clone(), moved);
    f.document.set_layout(layout);

    f.document.dispatch(&Event::pointer_down(55, 12));
    assert!(f.menu().is_open());

    f.document.dispatch(&Event::pointer_down(PANEL.x + 1, PANEL.y + 1));
    assert!(!f.menu().is_open());
}

#[test]
fn test_dropped_trigger_detaches_boundary() {
    let Fixture {
        document,
        controller,
        trigger,
        panel,
    } = Fixture::mount();
    let menu = controller.handle();
    trigger.activate();
    assert!(menu.trigger_boundary().is_attached());

    drop(trigger);
    assert!(!menu.trigger_boundary().is_attached());

    // Trigger boundary no longer resolves, so nothing counts as outside
    document.dispatch(&Event::pointer_down(70, 20));
    assert!(panel.is_open());
}

// ============================================================================
// Cancellation
// ============================================================================

#[test]
fn test_escape_closes_open_menu() {
    let f = Fixture::mount();
    f.click_trigger();

    f.document.dispatch(&Event::key(Key::Escape));

    assert!(!f.menu().is_open());
    assert!(f.panel.render().is_none());
}

#[test]
fn test_escape_closes_regardless_of_modifiers_or_origin() {
    let f = Fixture::mount();
    f.click_trigger();
    // A pointer-down inside the panel first, so the last interaction was "in" the menu
    f.document.dispatch(&Event::pointer_down(PANEL.x, PANEL.y));

    f.document.dispatch(&Event::KeyDown {
        key: Key::Escape,
        modifiers: Modifiers::ctrl(),
    });

    assert!(!f.menu().is_open());
}

#[test]
fn test_other_keys_do_not_close() {
    let f = Fixture::mount();
    f.click_trigger();

    f.document.dispatch(&Event::key(Key::Enter));
    f.document.dispatch(&Event::key(Key::Char('q')));

    assert!(f.menu().is_open());
}

#[test]
fn test_escape_closes_every_open_menu() {
    let document = Document::new();
    let first = Controller::mount(&document);
    let second = Controller::mount(&document);
    let third = Controller::mount(&document);
    first.handle().toggle();
    second.handle().toggle();

    document.dispatch(&Event::key(Key::Escape));

    assert!(!first.is_open());
    assert!(!second.is_open());
    assert!(!third.is_open());
}

// ============================================================================
// Several menus
// ============================================================================

#[test]
fn test_opening_second_menu_dismisses_first() {
    let document = Document::new();
    let semester = Controller::mount(&document);
    let major = Controller::mount(&document);

    let semester_trigger = Trigger::new(&semester.handle(), Button::new("Semester"));
    let semester_panel = Panel::new(&semester.handle(), &document, semesters());
    let major_trigger = Trigger::new(&major.handle(), Button::new("Major"));
    let major_panel = Panel::new(&major.handle(), &document, MenuList::new());

    let major_rect = Rect::new(30, 0, 10, 1);
    let mut layout = BoundaryMap::new();
    layout.insert(semester_trigger.node().clone(), TRIGGER);
    layout.insert(semester_panel.node().clone(), PANEL);
    layout.insert(major_trigger.node().clone(), major_rect);
    layout.insert(major_panel.node().clone(), Rect::new(30, 1, 20, 4));
    document.set_layout(layout);

    semester_trigger.activate();
    assert!(semester.is_open());

    let (x, y) = major_rect.center();
    document.dispatch(&Event::pointer_down(x, y));
    major_trigger.activate();

    assert!(!semester.is_open());
    assert!(major.is_open());
    assert!(semester_panel.render().is_none());
    assert!(major_panel.render().is_some());
}

#[test]
fn test_menus_toggle_independently() {
    let document = Document::new();
    let a = Controller::mount(&document);
    let b = Controller::mount(&document);

    a.handle().toggle();
    b.handle().toggle();
    b.handle().toggle();

    assert!(a.is_open());
    assert!(!b.is_open());
}

// ============================================================================
// Trigger
// ============================================================================

#[test]
fn test_trigger_runs_child_click_then_toggles() {
    let document = Document::new();
    let controller = Controller::mount(&document);
    let clicks = Rc::new(Cell::new(0));
    let button = {
        let clicks = Rc::clone(&clicks);
        Button::new("Filters").on_click(move || clicks.set(clicks.get() + 1))
    };
    let trigger = Trigger::new(&controller.handle(), button);

    trigger.activate();
    assert_eq!(clicks.get(), 1);
    assert!(controller.is_open());

    trigger.activate();
    assert_eq!(clicks.get(), 2);
    assert!(!controller.is_open());
}

#[test]
fn test_detached_trigger_passes_through() {
    let clicks = Rc::new(Cell::new(0));
    let button = {
        let clicks = Rc::clone(&clicks);
        Button::new("Cart").on_click(move || clicks.set(clicks.get() + 1))
    };
    let trigger = Trigger::detached(button);

    trigger.activate();
    trigger.activate();

    assert!(!trigger.is_bound());
    assert!(trigger.menu().is_none());
    assert_eq!(trigger.child().label(), "Cart");
    assert_eq!(clicks.get(), 2);
}

// ============================================================================
// Unmounting
// ============================================================================

#[test]
fn test_unmounting_open_menu_leaves_no_listeners() {
    let Fixture {
        document,
        controller,
        trigger,
        panel,
    } = Fixture::mount();
    let menu = controller.handle();
    trigger.activate();
    assert_eq!(document.listener_count(), 2);

    drop(panel);
    drop(trigger);
    controller.unmount();

    assert_eq!(document.listener_count(), 0);
    assert_eq!(document.dispatch(&Event::pointer_down(70, 20)), 0);
    assert_eq!(document.dispatch(&Event::key(Key::Escape)), 0);
    assert!(!menu.is_open());
}

#[test]
fn test_unmounting_controller_stops_panel_listening() {
    let Fixture {
        document,
        controller,
        trigger,
        panel,
    } = Fixture::mount();
    trigger.activate();
    let (closes, _observer) = count_transitions(panel.menu());

    drop(controller);

    assert!(!panel.is_listening());
    assert!(panel.render().is_none());
    assert_eq!(document.listener_count(), 0);
    assert_eq!(closes.get(), 1);

    // Stray events after unmount change nothing
    document.dispatch(&Event::pointer_down(70, 20));
    document.dispatch(&Event::key(Key::Escape));
    assert_eq!(closes.get(), 1);
}

#[test]
fn test_leftover_trigger_cannot_reopen_unmounted_menu() {
    let Fixture {
        document,
        controller,
        trigger,
        panel,
    } = Fixture::mount();
    let menu = controller.handle();
    assert!(menu.is_mounted());

    controller.unmount();
    trigger.activate();
    menu.toggle();

    assert!(!menu.is_mounted());
    assert!(!menu.is_open());
    assert!(panel.render().is_none());
    assert!(!panel.is_listening());
    assert_eq!(document.listener_count(), 0);

    document.dispatch(&Event::key(Key::Escape));
    assert!(!menu.is_open());
}

#[test]
fn test_dropping_open_panel_removes_pointer_listener() {
    let f = Fixture::mount();
    let Fixture {
        document,
        controller,
        trigger,
        panel,
    } = f;
    trigger.activate();

    drop(panel);

    assert_eq!(document.listener_count_of(ListenerKind::PointerDown), 0);
    assert!(!controller.handle().panel_boundary().is_attached());
    assert!(controller.is_open());
}

// ============================================================================
// Placement
// ============================================================================

#[test]
fn test_placement_below_start() {
    let f = Fixture::mount();
    let screen = Rect::from_size(80, 24);

    let rect = f.panel.placement(screen, TRIGGER, (20, 5));

    assert_eq!(rect, Rect::new(10, 1, 20, 5));
}

#[test]
fn test_placement_end_aligns_right_edges() {
    let document = Document::new();
    let controller = Controller::mount(&document);
    let panel = Panel::new(&controller.handle(), &document, ()).align(Align::End);
    let anchor = Rect::new(40, 0, 12, 1);

    let rect = panel.placement(Rect::from_size(80, 24), anchor, (20, 4));

    assert_eq!(rect.right(), anchor.right());
    assert_eq!(rect, Rect::new(32, 1, 20, 4));
}

#[test]
fn test_placement_flips_above_when_no_room() {
    let screen = Rect::from_size(80, 24);
    let anchor = Rect::new(5, 21, 10, 1);

    let rect = disclosure::menu::place(Align::Start, screen, anchor, (20, 6));

    assert_eq!(rect, Rect::new(5, 15, 20, 6));
}

#[test]
fn test_placement_clamped_to_screen() {
    let screen = Rect::from_size(40, 10);

    let right = disclosure::menu::place(Align::Start, screen, Rect::new(35, 0, 4, 1), (20, 3));
    assert_eq!(right, Rect::new(20, 1, 20, 3));

    let left = disclosure::menu::place(Align::End, screen, Rect::new(0, 0, 4, 1), (20, 3));
    assert_eq!(left, Rect::new(0, 1, 20, 3));

    let tall = disclosure::menu::place(Align::Start, screen, Rect::new(0, 4, 4, 1), (10, 30));
    assert_eq!(tall, Rect::new(0, 0, 10, 10));
}
