use std::fmt;

use crate::widgets::Activate;

/// A selectable row inside a menu panel.
///
/// Selecting an item runs its callback and nothing else. It does not close
/// the menu; pass the [`MenuHandle`](super::MenuHandle) into the callback for
/// select-and-close.
pub struct MenuItem {
    label: String,
    disabled: bool,
    on_select: Option<Box<dyn Fn()>>,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            on_select: None,
        }
    }

    pub fn on_select<F>(mut self, f: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_select = Some(Box::new(f));
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Run the callback. Returns false for disabled items.
    pub fn select(&self) -> bool {
        if self.disabled {
            return false;
        }
        if let Some(f) = &self.on_select {
            f();
        }
        true
    }
}

impl Activate for MenuItem {
    fn activate(&self) {
        self.select();
    }
}

impl fmt::Debug for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuItem")
            .field("label", &self.label)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

/// One row of a [`MenuList`].
#[derive(Debug)]
pub enum MenuEntry {
    /// Muted heading text.
    Label(String),
    /// Thin rule between groups.
    Separator,
    Item(MenuItem),
}

/// Rows of a menu panel, top to bottom.
#[derive(Debug, Default)]
pub struct MenuList {
    entries: Vec<MenuEntry>,
}

impl MenuList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, text: impl Into<String>) -> Self {
        self.entries.push(MenuEntry::Label(text.into()));
        self
    }

    pub fn separator(mut self) -> Self {
        self.entries.push(MenuEntry::Separator);
        self
    }

    pub fn item(mut self, item: MenuItem) -> Self {
        self.entries.push(MenuEntry::Item(item));
        self
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    /// Number of rows the list occupies.
    pub fn rows(&self) -> u16 {
        self.entries.len().min(u16::MAX as usize) as u16
    }

    /// The item on `row`, if that row is an item.
    pub fn item_at(&self, row: u16) -> Option<&MenuItem> {
        match self.entries.get(row as usize)? {
            MenuEntry::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Widest label in characters.
    pub fn max_label_len(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| match entry {
                MenuEntry::Label(text) => text.chars().count(),
                MenuEntry::Item(item) => item.label().chars().count(),
                MenuEntry::Separator => 0,
            })
            .max()
            .unwrap_or(0)
    }
}
