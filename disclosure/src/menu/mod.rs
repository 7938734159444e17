//! The disclosure menu: controller, trigger and panel.
//!
//! ```ignore
//! let document = Document::new();
//! let controller = Controller::mount(&document);
//! let menu = controller.handle();
//!
//! let trigger = Trigger::new(&menu, Button::new("Spring 2026"));
//! let panel = Panel::new(&menu, &document, semesters).align(Align::End);
//!
//! trigger.activate();            // open
//! document.dispatch(&Event::key(Key::Escape));
//! assert!(panel.render().is_none());
//! ```
//!
//! Nothing is looked up implicitly: the [`MenuHandle`] a controller hands out
//! is the only link between the three parts.

mod controller;
mod item;
mod panel;
mod trigger;

pub use controller::{Controller, MenuHandle, MenuId};
pub use item::{MenuEntry, MenuItem, MenuList};
pub use panel::{place, Align, Panel};
pub use trigger::Trigger;

/// Open/closed state of one menu instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MenuState {
    pub is_open: bool,
}
