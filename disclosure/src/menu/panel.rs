//! Menu panel and its outside-pointer dismissal.
//!
//! A panel is CLOSED (not rendered, no pointer listener) or OPEN (rendered,
//! pointer listener installed). It follows the menu state through an
//! observer, so the listener is installed and removed in the same call that
//! changes the state, whoever made the change.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::MenuHandle;
use super::controller::WeakMenuHandle;
use crate::boundary::{BoundaryMap, NodeId};
use crate::document::{Document, ListenerGuard, ListenerKind};
use crate::event::Event;
use crate::geometry::Rect;

/// Horizontal alignment of a panel against its trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    /// Left edges line up.
    #[default]
    Start,
    /// Right edges line up.
    End,
}

type ListenerSlot = RefCell<Option<ListenerGuard>>;

pub struct Panel<C> {
    node: NodeId,
    menu: MenuHandle,
    align: Align,
    content: C,
    listener: Rc<ListenerSlot>,
    _observer: Rc<dyn Fn(bool)>,
}

impl<C> Panel<C> {
    /// Create the panel for `menu`, listening on `document` while open.
    pub fn new(menu: &MenuHandle, document: &Document, content: C) -> Self {
        let node = NodeId::generate("panel");
        menu.panel_boundary().attach(node.clone());

        let listener: Rc<ListenerSlot> = Rc::new(RefCell::new(None));
        let observer: Rc<dyn Fn(bool)> = {
            let slot = Rc::downgrade(&listener);
            let weak_menu = menu.downgrade();
            let document = document.clone();
            Rc::new(move |open| {
                if let Some(slot) = slot.upgrade() {
                    sync_listener(&slot, &weak_menu, &document, open);
                }
            })
        };
        menu.observe(&observer);

        if menu.is_open() {
            sync_listener(&listener, &menu.downgrade(), document, true);
        }

        Self {
            node,
            menu: menu.clone(),
            align: Align::default(),
            content,
            listener,
            _observer: observer,
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn alignment(&self) -> Align {
        self.align
    }

    /// The content, but only while the menu is open.
    pub fn render(&self) -> Option<&C> {
        self.menu.is_open().then_some(&self.content)
    }

    pub fn is_open(&self) -> bool {
        self.menu.is_open()
    }

    /// Whether the outside-pointer listener is currently installed.
    pub fn is_listening(&self) -> bool {
        self.listener.borrow().is_some()
    }

    /// Node the host should paint the content under.
    pub fn node(&self) -> &NodeId {
        &self.node
    }

    pub fn menu(&self) -> &MenuHandle {
        &self.menu
    }

    pub fn content(&self) -> &C {
        &self.content
    }

    pub fn content_mut(&mut self) -> &mut C {
        &mut self.content
    }

    /// Where to paint a panel of `size` under `anchor` within `screen`.
    pub fn placement(&self, screen: Rect, anchor: Rect, size: (u16, u16)) -> Rect {
        place(self.align, screen, anchor, size)
    }
}

impl<C> Drop for Panel<C> {
    fn drop(&mut self) {
        if self.listener.borrow_mut().take().is_some() {
            debug!("{} dropped while open", self.node);
        }
        self.menu.panel_boundary().detach_if(&self.node);
    }
}

fn sync_listener(slot: &ListenerSlot, menu: &WeakMenuHandle, document: &Document, open: bool) {
    let mut slot = slot.borrow_mut();
    if open {
        if slot.is_none()
            && let Some(menu) = menu.upgrade()
        {
            *slot = Some(install_outside_listener(&menu, document));
        }
    } else if let Some(guard) = slot.take() {
        guard.release();
    }
}

fn install_outside_listener(menu: &MenuHandle, document: &Document) -> ListenerGuard {
    let weak = menu.downgrade();
    document.add_listener(ListenerKind::PointerDown, move |event, layout| {
        let &Event::PointerDown { x, y, .. } = event else {
            return;
        };
        let Some(menu) = weak.upgrade() else {
            return;
        };
        if is_outside(&menu, layout, x, y) {
            debug!("{} dismissed by pointer-down at ({}, {})", menu.id(), x, y);
            menu.close();
        }
    })
}

/// Whether `(x, y)` is outside both the panel and the trigger of `menu`.
///
/// A boundary that cannot be resolved in `layout` makes the answer `false`:
/// the menu stays open rather than closing on a guess.
fn is_outside(menu: &MenuHandle, layout: &BoundaryMap, x: u16, y: u16) -> bool {
    let in_panel = menu.panel_boundary().contains(layout, x, y);
    let in_trigger = menu.trigger_boundary().contains(layout, x, y);
    matches!((in_panel, in_trigger), (Some(false), Some(false)))
}

/// Position a panel of `size` next to `anchor`.
///
/// Prefers directly below the anchor and flips above when there is not
/// enough room. Horizontally it follows `align` and is kept on screen.
pub fn place(align: Align, screen: Rect, anchor: Rect, size: (u16, u16)) -> Rect {
    let width = size.0.min(screen.width);
    let height = size.1.min(screen.height);

    let x = match align {
        Align::Start => anchor.x,
        Align::End => anchor.right().saturating_sub(width),
    };
    let x = x
        .max(screen.x)
        .min(screen.right().saturating_sub(width));

    let below = anchor.bottom();
    let y = if below.saturating_add(height) <= screen.bottom() {
        below
    } else if anchor.y.saturating_sub(screen.y) >= height {
        anchor.y - height
    } else {
        screen.bottom().saturating_sub(height)
    };

    Rect::new(x, y, width, height)
}
