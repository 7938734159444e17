//! Rendered regions and the per-frame geometry they resolve against.
//!
//! A [`BoundaryHandle`] only remembers *which* node it points at. Where that
//! node is on screen is looked up in the current [`BoundaryMap`] every time it
//! is needed, so a handle can never hand out a rectangle from an older frame.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Rect;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Identifier of a rendered region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a unique id such as `trigger-7`.
    pub fn generate(prefix: &str) -> Self {
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self(format!("{prefix}-{id}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Node rectangles for one frame, in paint order (later entries are on top).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryMap {
    rects: Vec<(NodeId, Rect)>,
}

impl BoundaryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where `id` was painted. Re-inserting an id moves it to the top.
    pub fn insert(&mut self, id: NodeId, rect: Rect) {
        self.rects.retain(|(existing, _)| *existing != id);
        self.rects.push((id, rect));
    }

    pub fn get(&self, id: &NodeId) -> Option<Rect> {
        self.rects
            .iter()
            .find(|(existing, _)| existing == id)
            .map(|(_, rect)| *rect)
    }

    /// Topmost node containing the point.
    pub fn hit_test(&self, x: u16, y: u16) -> Option<&NodeId> {
        self.rects
            .iter()
            .rev()
            .find(|(_, rect)| rect.contains(x, y))
            .map(|(id, _)| id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, Rect)> {
        self.rects.iter().map(|(id, rect)| (id, *rect))
    }

    pub fn len(&self) -> usize {
        self.rects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }
}

/// Opaque, cloneable reference to a region owned by someone else.
///
/// The owner attaches its node when it mounts and detaches it when it drops.
/// Everyone else only reads.
#[derive(Debug, Clone, Default)]
pub struct BoundaryHandle {
    slot: Rc<RefCell<Option<NodeId>>>,
}

impl BoundaryHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn attach(&self, node: NodeId) {
        *self.slot.borrow_mut() = Some(node);
    }

    /// Detach only if still pointing at `node`; a newer owner keeps its claim.
    pub(crate) fn detach_if(&self, node: &NodeId) -> bool {
        let mut slot = self.slot.borrow_mut();
        if slot.as_ref() == Some(node) {
            *slot = None;
            true
        } else {
            false
        }
    }

    pub fn node(&self) -> Option<NodeId> {
        self.slot.borrow().clone()
    }

    pub fn is_attached(&self) -> bool {
        self.slot.borrow().is_some()
    }

    /// Where the attached node sits in `map`, if it is attached and was laid out.
    pub fn resolve(&self, map: &BoundaryMap) -> Option<Rect> {
        self.slot.borrow().as_ref().and_then(|node| map.get(node))
    }

    /// `Some(inside)` when the boundary resolves, `None` when it cannot be resolved.
    pub fn contains(&self, map: &BoundaryMap, x: u16, y: u16) -> Option<bool> {
        self.resolve(map).map(|rect| rect.contains(x, y))
    }
}
