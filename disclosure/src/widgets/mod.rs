//! Small presentational widgets that can sit inside a trigger or a panel.

mod badge;
mod button;
mod switch;

pub use badge::{Badge, BadgeVariant};
pub use button::{Button, ButtonSize, ButtonVariant};
pub use switch::Switch;

/// Something with its own click behavior.
///
/// A [`Trigger`](crate::Trigger) runs this before toggling its menu, so
/// wrapping a widget never swallows the widget's own handler.
pub trait Activate {
    fn activate(&self);
}
