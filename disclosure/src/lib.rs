//! Disclosure menus for terminal hosts.
//!
//! A menu is three cooperating parts wired together explicitly:
//! a [`Controller`] owning the open/closed state, a [`Trigger`] that toggles it,
//! and a [`Panel`] that is only rendered while open and dismisses itself on
//! outside pointer-down. Escape closes every open menu through a
//! document-wide listener held by each controller.

pub mod boundary;
pub mod document;
pub mod event;
pub mod geometry;
pub mod menu;
pub mod widgets;

pub use boundary::{BoundaryHandle, BoundaryMap, NodeId};
pub use document::{Document, ListenerGuard, ListenerKind};
pub use event::{convert_event, Event, Key, Modifiers, MouseButton};
pub use geometry::Rect;
pub use menu::{
    Align, Controller, MenuEntry, MenuHandle, MenuId, MenuItem, MenuList, MenuState, Panel,
    Trigger,
};
pub use widgets::{Activate, Badge, BadgeVariant, Button, ButtonSize, ButtonVariant, Switch};
