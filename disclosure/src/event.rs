//! Input events consumed by a [`Document`](crate::Document).

use crossterm::event::{
    Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent,
    MouseEventKind,
};
use log::trace;

/// Events a host can dispatch to document-wide listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A mouse button went down at `(x, y)`.
    PointerDown { x: u16, y: u16, button: MouseButton },
    /// A key was pressed. Not scoped to any element.
    KeyDown { key: Key, modifiers: Modifiers },
    /// The host surface was resized.
    Resize { width: u16, height: u16 },
}

impl Event {
    pub fn pointer_down(x: u16, y: u16) -> Self {
        Self::PointerDown {
            x,
            y,
            button: MouseButton::Left,
        }
    }

    pub fn key(key: Key) -> Self {
        Self::KeyDown {
            key,
            modifiers: Modifiers::default(),
        }
    }

    /// Whether this event is the cancellation signal: Escape, with any modifiers.
    pub fn is_cancel(&self) -> bool {
        matches!(
            self,
            Event::KeyDown {
                key: Key::Escape,
                ..
            }
        )
    }
}

/// Simplified key representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Delete,
    Tab,
    BackTab,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

/// Key modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn none(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt
    }
}

/// Mouse button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

fn convert_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Backspace => Some(Key::Backspace),
        KeyCode::Delete => Some(Key::Delete),
        KeyCode::Tab => Some(Key::Tab),
        KeyCode::BackTab => Some(Key::BackTab),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Up => Some(Key::Up),
        KeyCode::Down => Some(Key::Down),
        KeyCode::Left => Some(Key::Left),
        KeyCode::Right => Some(Key::Right),
        KeyCode::Home => Some(Key::Home),
        KeyCode::End => Some(Key::End),
        KeyCode::PageUp => Some(Key::PageUp),
        KeyCode::PageDown => Some(Key::PageDown),
        KeyCode::F(n) => Some(Key::F(n)),
        _ => None,
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            shift: mods.contains(KeyModifiers::SHIFT),
            ctrl: mods.contains(KeyModifiers::CONTROL),
            alt: mods.contains(KeyModifiers::ALT),
        }
    }
}

impl From<crossterm::event::MouseButton> for MouseButton {
    fn from(btn: crossterm::event::MouseButton) -> Self {
        use crossterm::event::MouseButton as CtBtn;
        match btn {
            CtBtn::Left => MouseButton::Left,
            CtBtn::Right => MouseButton::Right,
            CtBtn::Middle => MouseButton::Middle,
        }
    }
}

fn convert_key_event(event: KeyEvent) -> Option<Event> {
    // Release and repeat would double-fire toggles
    if event.kind != KeyEventKind::Press {
        trace!("Ignoring non-press key event: {:?}", event.code);
        return None;
    }
    let key = convert_key(event.code)?;
    Some(Event::KeyDown {
        key,
        modifiers: event.modifiers.into(),
    })
}

fn convert_mouse_event(event: MouseEvent) -> Option<Event> {
    match event.kind {
        MouseEventKind::Down(button) => Some(Event::PointerDown {
            x: event.column,
            y: event.row,
            button: button.into(),
        }),
        _ => None,
    }
}

/// Convert a crossterm event into a document event.
///
/// Only key presses, mouse-down and resize are meaningful here; everything
/// else returns `None`.
pub fn convert_event(event: CrosstermEvent) -> Option<Event> {
    match event {
        CrosstermEvent::Key(key_event) => convert_key_event(key_event),
        CrosstermEvent::Mouse(mouse_event) => convert_mouse_event(mouse_event),
        CrosstermEvent::Resize(width, height) => Some(Event::Resize { width, height }),
        _ => None,
    }
}
