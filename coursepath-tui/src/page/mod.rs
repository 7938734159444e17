//! The CoursePath preview page.
//!
//! Header with semester/major pickers, a filters menu, the cart counter and
//! the What-If switch; below it a search line, the requirements column and
//! the course cards. Every dropdown is a `disclosure` menu mounted on the
//! page's document.

mod events;
mod render;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use disclosure::{
    Align, Badge, Button, ButtonSize, ButtonVariant, Controller, Document, MenuItem, MenuList,
    NodeId, Panel, Switch, Trigger,
};
use log::{debug, info};

use crate::config::{Config, Course, Requirement};

pub use events::Flow;

/// Everything the user can change on the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Selection {
    semester: String,
    major: String,
    what_if: bool,
    open_seats_only: bool,
    cart_count: u32,
    query: String,
    /// Course picked through a card's What-If button.
    exploring: Option<String>,
}

impl Selection {
    fn filter(&self, filter: Filter) -> bool {
        match filter {
            Filter::OpenSeatsOnly => self.open_seats_only,
            Filter::WhatIf => self.what_if,
        }
    }

    fn set_filter(&mut self, filter: Filter, on: bool) {
        match filter {
            Filter::OpenSeatsOnly => self.open_seats_only = on,
            Filter::WhatIf => self.what_if = on,
        }
    }
}

type Shared = Rc<RefCell<Selection>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Filter {
    OpenSeatsOnly,
    WhatIf,
}

/// What a click on a painted node does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    SemesterTrigger,
    MajorTrigger,
    FiltersTrigger,
    SemesterItem(u16),
    MajorItem(u16),
    FilterRow(usize),
    WhatIf,
    Cart,
    AddCourse(usize),
    ExploreCourse(usize),
}

/// A dropdown of mutually exclusive choices.
struct Picker {
    name: &'static str,
    item_target: fn(u16) -> Target,
    controller: Controller,
    trigger: Trigger<Button>,
    panel: Panel<MenuList>,
}

impl Picker {
    fn new(
        name: &'static str,
        item_target: fn(u16) -> Target,
        heading: &str,
        choices: &[String],
        document: &Document,
        selection: &Shared,
        apply: fn(&mut Selection, String),
    ) -> Self {
        let controller = Controller::mount(document);
        let menu = controller.handle();

        let mut list = MenuList::new().label(heading).separator();
        for choice in choices {
            let selection = Rc::clone(selection);
            let menu = menu.clone();
            let value = choice.clone();
            list = list.item(MenuItem::new(choice.as_str()).on_select(move || {
                debug!("Picked {:?}", value);
                apply(&mut selection.borrow_mut(), value.clone());
                menu.close();
            }));
        }

        let button = Button::new("")
            .with_variant(ButtonVariant::Outline)
            .with_size(ButtonSize::Sm);
        Self {
            name,
            item_target,
            trigger: Trigger::new(&menu, button),
            panel: Panel::new(&menu, document, list).align(Align::End),
            controller,
        }
    }

    fn item_node(&self, row: u16) -> NodeId {
        NodeId::new(format!("{}-item-{}", self.name, row))
    }
}

struct FilterRow {
    label: &'static str,
    filter: Filter,
    switch: Switch,
}

struct FilterMenu {
    controller: Controller,
    trigger: Trigger<Button>,
    panel: Panel<Vec<FilterRow>>,
}

impl FilterMenu {
    fn new(document: &Document, selection: &Shared) -> Self {
        let controller = Controller::mount(document);
        let menu = controller.handle();
        let row = |label, filter| {
            let selection = Rc::clone(selection);
            FilterRow {
                label,
                filter,
                switch: Switch::new(false).on_checked_change(move |on| {
                    selection.borrow_mut().set_filter(filter, on);
                }),
            }
        };
        let rows = vec![
            row("Open seats only", Filter::OpenSeatsOnly),
            row("What-If mode", Filter::WhatIf),
        ];

        let button = Button::new("Filters")
            .with_variant(ButtonVariant::Outline)
            .with_size(ButtonSize::Sm);
        Self {
            trigger: Trigger::new(&menu, button),
            panel: Panel::new(&menu, document, rows).align(Align::End),
            controller,
        }
    }
}

pub struct Page {
    document: Document,
    selection: Shared,
    courses: Vec<Course>,
    requirements: Vec<Requirement>,
    semester: Picker,
    major: Picker,
    filters: FilterMenu,
    preview: Badge,
    cart: Button,
    what_if: Switch,
    add_buttons: Vec<Button>,
    what_if_buttons: Vec<Button>,
    /// Click targets painted in the last frame.
    targets: HashMap<NodeId, Target>,
}

impl Page {
    pub fn new(config: &Config) -> Self {
        let document = Document::new();
        let selection: Shared = Rc::new(RefCell::new(Selection {
            semester: config.initial_semester(),
            major: config.initial_major(),
            ..Default::default()
        }));

        let semester = Picker::new(
            "semester",
            Target::SemesterItem,
            "Choose semester",
            &config.semesters,
            &document,
            &selection,
            |s, v| s.semester = v,
        );
        let major = Picker::new(
            "major",
            Target::MajorItem,
            "Select major",
            &config.majors,
            &document,
            &selection,
            |s, v| s.major = v,
        );
        let filters = FilterMenu::new(&document, &selection);

        let cart = {
            let selection = Rc::clone(&selection);
            Button::new("Cart")
                .with_variant(ButtonVariant::Outline)
                .with_size(ButtonSize::Sm)
                .on_click(move || debug!("Cart holds {} course(s)", selection.borrow().cart_count))
        };
        let what_if = {
            let selection = Rc::clone(&selection);
            Switch::new(false).on_checked_change(move |on| selection.borrow_mut().what_if = on)
        };
        let add_buttons = config
            .courses
            .iter()
            .map(|course| {
                let selection = Rc::clone(&selection);
                let code = course.code.clone();
                Button::new("Add")
                    .with_variant(ButtonVariant::Outline)
                    .on_click(move || {
                        let mut selection = selection.borrow_mut();
                        selection.cart_count += 1;
                        info!("Added {} to cart ({} total)", code, selection.cart_count);
                    })
            })
            .collect();
        let what_if_buttons = config
            .courses
            .iter()
            .map(|course| {
                let selection = Rc::clone(&selection);
                let code = course.code.clone();
                Button::new("What-If")
                    .with_variant(ButtonVariant::Outline)
                    .with_size(ButtonSize::Sm)
                    .on_click(move || {
                        let mut selection = selection.borrow_mut();
                        selection.what_if = true;
                        selection.exploring = Some(code.clone());
                        debug!("Exploring {} in What-If mode", code);
                    })
            })
            .collect();

        Self {
            document,
            selection,
            courses: config.courses.clone(),
            requirements: config.requirements.clone(),
            semester,
            major,
            filters,
            preview: Badge::secondary("Preview"),
            cart,
            what_if,
            add_buttons,
            what_if_buttons,
            targets: HashMap::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Indices of the courses matching the search and filters.
    fn visible_courses(&self) -> Vec<usize> {
        let selection = self.selection.borrow();
        let query = selection.query.to_lowercase();
        self.courses
            .iter()
            .enumerate()
            .filter(|(_, c)| {
                query.is_empty()
                    || c.code.to_lowercase().contains(&query)
                    || c.title.to_lowercase().contains(&query)
            })
            .filter(|(_, c)| !selection.open_seats_only || c.seats > 0)
            .map(|(i, _)| i)
            .collect()
    }

    /// Push the current selection into the controlled widgets.
    fn sync_widgets(&mut self) {
        let selection = self.selection.borrow();
        self.semester
            .trigger
            .child_mut()
            .set_label(selection.semester.as_str());
        self.major
            .trigger
            .child_mut()
            .set_label(selection.major.as_str());
        self.what_if.set_checked(selection.what_if);
        for row in self.filters.panel.content_mut() {
            row.switch.set_checked(selection.filter(row.filter));
        }
    }
}
