use disclosure::{Activate, Event, Key, Modifiers, MouseButton};
use log::{debug, trace};

use super::{Page, Target};

/// What the event loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

impl Page {
    /// Route one input event.
    ///
    /// Pointer-down and key events go to the document first, so open menus
    /// see them before the page acts on the click or the keystroke.
    pub fn handle(&mut self, event: Event) -> Flow {
        match &event {
            Event::KeyDown {
                key: Key::Char('c' | 'q'),
                modifiers,
            } if modifiers.ctrl => {
                debug!("Quit requested");
                return Flow::Quit;
            }
            &Event::PointerDown { x, y, button } => {
                // Resolve against the frame the user clicked on.
                let target = self.target_at(x, y);
                self.document.dispatch(&event);
                if button == MouseButton::Left
                    && let Some(target) = target
                {
                    self.activate(target);
                }
            }
            &Event::KeyDown { key, modifiers } => {
                self.document.dispatch(&event);
                self.edit_query(key, modifiers);
            }
            Event::Resize { width, height } => trace!("Resize to {}x{}", width, height),
        }
        Flow::Continue
    }

    fn target_at(&self, x: u16, y: u16) -> Option<Target> {
        let layout = self.document.layout();
        let node = layout.hit_test(x, y)?;
        self.targets.get(node).copied()
    }

    fn activate(&mut self, target: Target) {
        trace!("Activating {:?}", target);
        match target {
            Target::SemesterTrigger => self.semester.trigger.activate(),
            Target::MajorTrigger => self.major.trigger.activate(),
            Target::FiltersTrigger => self.filters.trigger.activate(),
            Target::SemesterItem(row) => {
                if let Some(item) = self.semester.panel.render().and_then(|l| l.item_at(row)) {
                    item.select();
                }
            }
            Target::MajorItem(row) => {
                if let Some(item) = self.major.panel.render().and_then(|l| l.item_at(row)) {
                    item.select();
                }
            }
            Target::FilterRow(index) => {
                if let Some(row) = self.filters.panel.render().and_then(|rows| rows.get(index)) {
                    row.switch.activate();
                }
            }
            Target::WhatIf => self.what_if.activate(),
            Target::Cart => self.cart.activate(),
            Target::AddCourse(index) => {
                if let Some(button) = self.add_buttons.get(index) {
                    button.activate();
                }
            }
            Target::ExploreCourse(index) => {
                if let Some(button) = self.what_if_buttons.get(index) {
                    button.activate();
                }
            }
        }
        self.sync_widgets();
    }

    /// Typing edits the search query; Backspace deletes.
    fn edit_query(&mut self, key: Key, modifiers: Modifiers) {
        if modifiers.ctrl || modifiers.alt {
            return;
        }
        let mut selection = self.selection.borrow_mut();
        match key {
            Key::Char(c) => selection.query.push(c),
            Key::Backspace => {
                selection.query.pop();
            }
            _ => {}
        }
    }
}
