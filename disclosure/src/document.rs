//! Document-wide listener registry and event dispatch.
//!
//! The document plays the role of the hosting surface: menus register
//! listeners on it that see every pointer-down or key-down, no matter where
//! it lands. Registration hands back a [`ListenerGuard`]; the listener lives
//! exactly as long as the guard.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use log::{debug, trace};

use crate::boundary::BoundaryMap;
use crate::event::Event;

/// Which events a listener receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    PointerDown,
    KeyDown,
}

impl ListenerKind {
    fn of(event: &Event) -> Option<Self> {
        match event {
            Event::PointerDown { .. } => Some(Self::PointerDown),
            Event::KeyDown { .. } => Some(Self::KeyDown),
            Event::Resize { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Rc<dyn Fn(&Event, &BoundaryMap)>;

struct Listener {
    id: ListenerId,
    kind: ListenerKind,
    callback: Callback,
}

#[derive(Default)]
struct DocumentInner {
    listeners: RefCell<Vec<Listener>>,
    next_id: Cell<u64>,
    layout: RefCell<Rc<BoundaryMap>>,
}

impl DocumentInner {
    fn is_registered(&self, id: ListenerId) -> bool {
        self.listeners.borrow().iter().any(|l| l.id == id)
    }

    fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        before != listeners.len()
    }
}

/// Single-threaded event host. Clones share the same registry.
#[derive(Clone, Default)]
pub struct Document {
    inner: Rc<DocumentInner>,
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("listeners", &self.listener_count())
            .field("layout", &self.inner.layout.borrow().len())
            .finish()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document-wide listener.
    ///
    /// The callback receives the event and the layout current at dispatch
    /// time. It stays registered until the returned guard is dropped.
    pub fn add_listener<F>(&self, kind: ListenerKind, callback: F) -> ListenerGuard
    where
        F: Fn(&Event, &BoundaryMap) + 'static,
    {
        let id = ListenerId(self.inner.next_id.get());
        self.inner.next_id.set(id.0 + 1);
        self.inner.listeners.borrow_mut().push(Listener {
            id,
            kind,
            callback: Rc::new(callback),
        });
        debug!("Listener {:?} attached ({:?})", id, kind);

        ListenerGuard {
            document: Rc::downgrade(&self.inner),
            id,
            kind,
        }
    }

    /// Deliver an event to every listener of the matching kind.
    ///
    /// Listeners run in registration order. One removed by an earlier
    /// listener during the same dispatch is skipped; one added during the
    /// dispatch only sees later events. Returns how many listeners ran.
    pub fn dispatch(&self, event: &Event) -> usize {
        let Some(kind) = ListenerKind::of(event) else {
            trace!("No listeners for {:?}", event);
            return 0;
        };

        let layout = Rc::clone(&self.inner.layout.borrow());
        let snapshot: Vec<(ListenerId, Callback)> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| (l.id, Rc::clone(&l.callback)))
            .collect();

        let mut invoked = 0;
        for (id, callback) in snapshot {
            if !self.inner.is_registered(id) {
                trace!("Listener {:?} removed mid-dispatch, skipping", id);
                continue;
            }
            callback(event, &layout);
            invoked += 1;
        }

        trace!("Dispatched {:?} to {} listener(s)", event, invoked);
        invoked
    }

    /// Replace the geometry boundary handles resolve against.
    pub fn set_layout(&self, layout: BoundaryMap) {
        *self.inner.layout.borrow_mut() = Rc::new(layout);
    }

    pub fn layout(&self) -> Rc<BoundaryMap> {
        Rc::clone(&self.inner.layout.borrow())
    }

    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    pub fn listener_count_of(&self, kind: ListenerKind) -> usize {
        self.inner
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }
}

/// Keeps a listener registered. Dropping it deregisters the listener.
#[must_use = "dropping the guard removes the listener immediately"]
pub struct ListenerGuard {
    document: Weak<DocumentInner>,
    id: ListenerId,
    kind: ListenerKind,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn kind(&self) -> ListenerKind {
        self.kind
    }

    /// Whether the listener is still registered on a live document.
    pub fn is_active(&self) -> bool {
        self.document
            .upgrade()
            .is_some_and(|inner| inner.is_registered(self.id))
    }

    /// Deregister now. Same as dropping the guard.
    pub fn release(self) {}
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Some(inner) = self.document.upgrade()
            && inner.remove(self.id)
        {
            debug!("Listener {:?} detached ({:?})", self.id, self.kind);
        }
    }
}
