use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

use super::MenuState;
use crate::boundary::BoundaryHandle;
use crate::document::{Document, ListenerGuard, ListenerKind};

/// Identity of a menu instance, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuId(u64);

impl MenuId {
    fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MenuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "menu-{}", self.0)
    }
}

type Observer = dyn Fn(bool);

struct MenuShared {
    id: MenuId,
    state: Cell<MenuState>,
    /// Cleared when the controller goes away; an unmounted menu never reopens.
    mounted: Cell<bool>,
    trigger: BoundaryHandle,
    panel: BoundaryHandle,
    observers: RefCell<Vec<Weak<Observer>>>,
}

/// State-and-operations handle for one menu.
///
/// Cloning is cheap and every clone talks to the same state. Triggers and
/// panels receive one of these instead of discovering their controller.
#[derive(Clone)]
pub struct MenuHandle {
    shared: Rc<MenuShared>,
}

impl fmt::Debug for MenuHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuHandle")
            .field("id", &self.shared.id)
            .field("state", &self.shared.state.get())
            .finish()
    }
}

impl MenuHandle {
    fn new() -> Self {
        Self {
            shared: Rc::new(MenuShared {
                id: MenuId::new(),
                state: Cell::new(MenuState::default()),
                mounted: Cell::new(true),
                trigger: BoundaryHandle::new(),
                panel: BoundaryHandle::new(),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn id(&self) -> MenuId {
        self.shared.id
    }

    pub fn state(&self) -> MenuState {
        self.shared.state.get()
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open
    }

    /// Whether the owning [`Controller`] is still alive.
    pub fn is_mounted(&self) -> bool {
        self.shared.mounted.get()
    }

    /// Flip between open and closed.
    pub fn toggle(&self) {
        self.set_open(!self.is_open());
    }

    /// Close the menu. Does nothing if it is already closed.
    pub fn close(&self) {
        self.set_open(false);
    }

    /// Boundary of the trigger, attached by [`Trigger`](super::Trigger).
    pub fn trigger_boundary(&self) -> &BoundaryHandle {
        &self.shared.trigger
    }

    /// Boundary of the panel, attached by [`Panel`](super::Panel).
    pub fn panel_boundary(&self) -> &BoundaryHandle {
        &self.shared.panel
    }

    /// Get notified with the new open state after every transition.
    ///
    /// Only a weak reference is kept; the observer is forgotten once the
    /// caller drops its `Rc`.
    pub fn observe(&self, observer: &Rc<Observer>) {
        self.shared
            .observers
            .borrow_mut()
            .push(Rc::downgrade(observer));
    }

    pub(crate) fn downgrade(&self) -> WeakMenuHandle {
        WeakMenuHandle(Rc::downgrade(&self.shared))
    }

    fn set_open(&self, open: bool) {
        let state = self.shared.state.get();
        if state.is_open == open {
            return;
        }
        if open && !self.is_mounted() {
            trace!("{} is unmounted, not opening", self.shared.id);
            return;
        }
        self.shared.state.set(MenuState { is_open: open });
        debug!(
            "{} {}",
            self.shared.id,
            if open { "opened" } else { "closed" }
        );
        self.notify(open);
    }

    fn notify(&self, open: bool) {
        // Observers may toggle again or register new observers
        let live: Vec<Rc<Observer>> = {
            let mut observers = self.shared.observers.borrow_mut();
            observers.retain(|o| o.strong_count() > 0);
            observers.iter().filter_map(Weak::upgrade).collect()
        };
        for observer in live {
            observer(open);
        }
    }
}

#[derive(Clone)]
pub(crate) struct WeakMenuHandle(Weak<MenuShared>);

impl WeakMenuHandle {
    pub(crate) fn upgrade(&self) -> Option<MenuHandle> {
        self.0.upgrade().map(|shared| MenuHandle { shared })
    }
}

/// Owns a menu's state for as long as the menu is mounted.
///
/// Mounting subscribes to the document's cancellation signal. Dropping the
/// controller (or calling [`Controller::unmount`]) closes the menu and
/// releases that subscription. Handles that outlive it can no longer open
/// the menu.
pub struct Controller {
    handle: MenuHandle,
    cancellation: ListenerGuard,
}

impl fmt::Debug for Controller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Controller")
            .field("handle", &self.handle)
            .field("cancellation", &self.cancellation)
            .finish()
    }
}

impl Controller {
    /// Create a closed menu bound to `document`.
    pub fn mount(document: &Document) -> Self {
        let handle = MenuHandle::new();
        let cancellation = Self::subscribe_cancellation(&handle, document);
        debug!("{} mounted", handle.id());
        Self {
            handle,
            cancellation,
        }
    }

    /// Close `menu` whenever Escape is pressed anywhere in `document`.
    ///
    /// The listener is not scoped to the menu's boundary or to focus. It only
    /// holds a weak reference to the menu, so it never keeps one alive.
    pub fn subscribe_cancellation(menu: &MenuHandle, document: &Document) -> ListenerGuard {
        let menu = menu.downgrade();
        document.add_listener(ListenerKind::KeyDown, move |event, _| {
            if event.is_cancel()
                && let Some(menu) = menu.upgrade()
            {
                menu.close();
            }
        })
    }

    pub fn handle(&self) -> MenuHandle {
        self.handle.clone()
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_open()
    }

    /// Whether the cancellation listener is still registered.
    pub fn is_subscribed(&self) -> bool {
        self.cancellation.is_active()
    }

    pub fn unmount(self) {}
}

impl Drop for Controller {
    fn drop(&mut self) {
        // Panels still holding a handle must stop listening too
        self.handle.shared.mounted.set(false);
        self.handle.close();
        debug!("{} unmounted", self.handle.id());
    }
}
