use std::fmt;

use log::trace;

use super::Activate;

/// Controlled on/off switch.
///
/// Activation never flips the switch itself. It asks the owner for the
/// opposite value through `on_checked_change`; the owner decides and calls
/// [`Switch::set_checked`].
pub struct Switch {
    checked: bool,
    on_checked_change: Option<Box<dyn Fn(bool)>>,
}

impl Switch {
    pub fn new(checked: bool) -> Self {
        Self {
            checked,
            on_checked_change: None,
        }
    }

    pub fn on_checked_change<F>(mut self, f: F) -> Self
    where
        F: Fn(bool) + 'static,
    {
        self.on_checked_change = Some(Box::new(f));
        self
    }

    pub fn checked(&self) -> bool {
        self.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }
}

impl Activate for Switch {
    fn activate(&self) {
        match &self.on_checked_change {
            Some(f) => f(!self.checked),
            None => trace!("Switch activated without a change handler"),
        }
    }
}

impl fmt::Debug for Switch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Switch")
            .field("checked", &self.checked)
            .finish_non_exhaustive()
    }
}
