use std::cell::{Cell, RefCell};
use std::rc::Rc;

use disclosure::{
    Activate, Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Controller, Document,
    MenuEntry, MenuItem, MenuList, Switch, Trigger,
};

// ============================================================================
// Switch
// ============================================================================

#[test]
fn test_switch_is_controlled() {
    let requested = Rc::new(RefCell::new(Vec::new()));
    let switch = {
        let requested = Rc::clone(&requested);
        Switch::new(false).on_checked_change(move |v| requested.borrow_mut().push(v))
    };

    switch.activate();
    switch.activate();

    // Owner never applied the change, so both requests ask for `true`
    assert!(!switch.checked());
    assert_eq!(*requested.borrow(), vec![true, true]);
}

#[test]
fn test_switch_follows_owner() {
    let requested = Rc::new(Cell::new(None));
    let mut switch = {
        let requested = Rc::clone(&requested);
        Switch::new(false).on_checked_change(move |v| requested.set(Some(v)))
    };

    switch.activate();
    if let Some(v) = requested.take() {
        switch.set_checked(v);
    }
    assert!(switch.checked());

    switch.activate();
    assert_eq!(requested.get(), Some(false));
}

#[test]
fn test_switch_without_handler() {
    let switch = Switch::new(true);
    switch.activate();
    assert!(switch.checked());
}

// ============================================================================
// Button and badge
// ============================================================================

#[test]
fn test_button_defaults_and_width() {
    let button = Button::new("Filters");
    assert_eq!(button.variant(), ButtonVariant::Default);
    assert_eq!(button.size(), ButtonSize::Md);
    assert_eq!(button.width(), 7 + 4);

    let small = Button::new("Cart")
        .with_variant(ButtonVariant::Outline)
        .with_size(ButtonSize::Sm);
    assert_eq!(small.width(), 4 + 2);
    assert_eq!(ButtonSize::Lg.padding(), 3);
}

#[test]
fn test_button_relabel_in_trigger() {
    let document = Document::new();
    let controller = Controller::mount(&document);
    let mut trigger = Trigger::new(&controller.handle(), Button::new("Spring 2026"));

    trigger.child_mut().set_label("Fall 2025");

    assert_eq!(trigger.child().label(), "Fall 2025");
}

#[test]
fn test_badge() {
    let badge = Badge::secondary("Preview");
    assert_eq!(badge.variant(), BadgeVariant::Secondary);
    assert_eq!(badge.width(), 9);
    assert_eq!(Badge::new("3").variant(), BadgeVariant::Default);
}

// ============================================================================
// Menu content
// ============================================================================

#[test]
fn test_menu_list_rows() {
    let list = MenuList::new()
        .label("Select major")
        .separator()
        .item(MenuItem::new("Computer Science (BS)"))
        .item(MenuItem::new("Data Science (BS)"));

    assert_eq!(list.rows(), 4);
    assert!(list.item_at(0).is_none());
    assert!(list.item_at(1).is_none());
    assert_eq!(list.item_at(2).map(MenuItem::label), Some("Computer Science (BS)"));
    assert!(list.item_at(9).is_none());
    assert_eq!(list.max_label_len(), "Computer Science (BS)".len());
    assert!(matches!(list.entries()[1], MenuEntry::Separator));
}

#[test]
fn test_item_select_runs_callback_without_closing() {
    let document = Document::new();
    let controller = Controller::mount(&document);
    let chosen = Rc::new(RefCell::new(String::new()));
    let item = {
        let chosen = Rc::clone(&chosen);
        MenuItem::new("Fall 2025").on_select(move || *chosen.borrow_mut() = "Fall 2025".into())
    };
    controller.handle().toggle();

    assert!(item.select());

    assert_eq!(*chosen.borrow(), "Fall 2025");
    assert!(controller.is_open());
}

#[test]
fn test_item_select_and_close() {
    let document = Document::new();
    let controller = Controller::mount(&document);
    let menu = controller.handle();
    let item = {
        let menu = menu.clone();
        MenuItem::new("Summer 2025").on_select(move || menu.close())
    };
    menu.toggle();

    item.activate();

    assert!(!controller.is_open());
}

#[test]
fn test_disabled_item() {
    let hits = Rc::new(Cell::new(0));
    let item = {
        let hits = Rc::clone(&hits);
        MenuItem::new("Archived").disabled(true).on_select(move || hits.set(hits.get() + 1))
    };

    assert!(!item.select());
    assert!(item.is_disabled());
    assert_eq!(hits.get(), 0);
}
