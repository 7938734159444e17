use log::trace;

use super::MenuHandle;
use crate::boundary::NodeId;
use crate::widgets::Activate;

/// Clickable wrapper that toggles a menu.
///
/// The wrapped child keeps its own activation behavior: activating the
/// trigger runs the child first, then toggles. A trigger built with
/// [`Trigger::detached`] has no menu and only forwards to the child.
pub struct Trigger<C> {
    node: NodeId,
    menu: Option<MenuHandle>,
    child: C,
}

impl<C> Trigger<C> {
    /// Wrap `child` and register as `menu`'s trigger boundary.
    pub fn new(menu: &MenuHandle, child: C) -> Self {
        let node = NodeId::generate("trigger");
        menu.trigger_boundary().attach(node.clone());
        Self {
            node,
            menu: Some(menu.clone()),
            child,
        }
    }

    /// A trigger with no menu behind it. Renders and activates the child only.
    pub fn detached(child: C) -> Self {
        Self {
            node: NodeId::generate("trigger"),
            menu: None,
            child,
        }
    }

    /// Node the host should paint the child under.
    pub fn node(&self) -> &NodeId {
        &self.node
    }

    pub fn child(&self) -> &C {
        &self.child
    }

    pub fn child_mut(&mut self) -> &mut C {
        &mut self.child
    }

    pub fn menu(&self) -> Option<&MenuHandle> {
        self.menu.as_ref()
    }

    pub fn is_bound(&self) -> bool {
        self.menu.is_some()
    }
}

impl<C: Activate> Trigger<C> {
    pub fn activate(&self) {
        self.child.activate();
        match &self.menu {
            Some(menu) => menu.toggle(),
            None => trace!("{} activated without a menu", self.node),
        }
    }
}

impl<C> Drop for Trigger<C> {
    fn drop(&mut self) {
        if let Some(menu) = &self.menu {
            menu.trigger_boundary().detach_if(&self.node);
        }
    }
}
