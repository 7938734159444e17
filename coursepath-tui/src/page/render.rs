use std::collections::HashMap;

use crossterm::style::Color;
use disclosure::{
    Badge, BadgeVariant, BoundaryMap, Button, ButtonVariant, MenuEntry, MenuList, NodeId, Rect,
    Switch,
};

use super::{FilterRow, Page, Picker, Target};
use crate::buffer::{Buffer, Style};
use crate::config::{Course, Requirement, RequirementStatus};

const ACCENT: Color = Color::Cyan;
const MUTED: Color = Color::DarkGrey;
const FULL: Color = Color::Red;

const HEADER_ROW: u16 = 0;
const SEARCH_ROW: u16 = 2;
const CONTENT_ROW: u16 = 4;
const SIDEBAR_WIDTH: u16 = 34;
/// Narrower screens drop the requirements column.
const SIDEBAR_MIN_SCREEN: u16 = 80;
/// Two lines of card plus a blank line.
const CARD_STRIDE: u16 = 3;
const SWITCH_WIDTH: u16 = 5;
const METER_WIDTH: u8 = 5;

/// Paint state shared by the header and card helpers.
struct Frame<'a> {
    buf: &'a mut Buffer,
    layout: BoundaryMap,
    targets: HashMap<NodeId, Target>,
}

impl Frame<'_> {
    fn register(&mut self, node: NodeId, rect: Rect, target: Option<Target>) {
        if let Some(target) = target {
            self.targets.insert(node.clone(), target);
        }
        self.layout.insert(node, rect);
    }
}

impl Page {
    /// Paint the page into `buf` and publish the frame's layout to the document.
    pub fn render(&mut self, buf: &mut Buffer) {
        self.sync_widgets();
        let screen = buf.area();
        let mut frame = Frame {
            buf,
            layout: BoundaryMap::new(),
            targets: HashMap::new(),
        };

        let (semester, major, filters) = self.render_header(&mut frame, screen);
        self.render_search(&mut frame, screen);
        let (sidebar, content) = split_content(screen);
        if let Some(sidebar) = sidebar {
            self.render_requirements(&mut frame, sidebar);
        }
        self.render_cards(&mut frame, content);

        // Panels last so they sit on top for painting and hit testing.
        let selection = self.selection.borrow().clone();
        render_picker(&mut frame, screen, &self.semester, semester, &selection.semester);
        render_picker(&mut frame, screen, &self.major, major, &selection.major);
        if let Some(rows) = self.filters.panel.render() {
            let width = rows.iter().map(|r| r.label.len() as u16).max().unwrap_or(0)
                + SWITCH_WIDTH
                + 6;
            let height = rows.len() as u16 + 2;
            let rect = self.filters.panel.placement(screen, filters, (width, height));
            render_filter_panel(&mut frame, rect, rows, self.filters.panel.node());
        }

        let Frame {
            layout, targets, ..
        } = frame;
        self.targets = targets;
        self.document.set_layout(layout);
    }

    /// Returns the anchors of the semester, major and filters triggers.
    fn render_header(&self, frame: &mut Frame<'_>, screen: Rect) -> (Rect, Rect, Rect) {
        let y = HEADER_ROW;
        let max_x = screen.right();
        let x = frame
            .buf
            .put_str(1, y, "CoursePath", Style::default().fg(ACCENT).bold(), max_x);
        draw_badge(frame.buf, x + 1, y, &self.preview, max_x);

        // Right-aligned, laid out right to left.
        let mut right = screen.right().saturating_sub(1);
        let mut next = |width: u16| {
            let x = right.saturating_sub(width);
            right = x.saturating_sub(1);
            Rect::new(x, y, width, 1)
        };

        let switch = next(SWITCH_WIDTH);
        let what_if_label = next(7);
        let count = self.selection.borrow().cart_count;
        let cart_badge = (count > 0).then(|| Badge::new(count.to_string()));
        let cart_width = self.cart.width() + cart_badge.as_ref().map_or(0, Badge::width);
        let cart = next(cart_width);
        let filters = next(self.filters.trigger.child().width());
        let major = next(self.major.trigger.child().width());
        let semester = next(self.semester.trigger.child().width());

        draw_switch(frame.buf, switch, &self.what_if);
        frame.register(NodeId::new("what-if"), switch, Some(Target::WhatIf));
        frame
            .buf
            .put_str(what_if_label.x, y, "What-If", Style::default().fg(MUTED), max_x);

        let x = draw_button(frame.buf, cart.x, y, &self.cart, max_x);
        if let Some(badge) = &cart_badge {
            draw_badge(frame.buf, x, y, badge, max_x);
        }
        frame.register(NodeId::new("cart"), cart, Some(Target::Cart));

        for (trigger, open, rect, target) in [
            (&self.filters.trigger, self.filters.controller.is_open(), filters, Target::FiltersTrigger),
            (&self.major.trigger, self.major.controller.is_open(), major, Target::MajorTrigger),
            (&self.semester.trigger, self.semester.controller.is_open(), semester, Target::SemesterTrigger),
        ] {
            let x = draw_button(frame.buf, rect.x, y, trigger.child(), max_x);
            if open {
                // Highlight the trigger of the open menu.
                let style = Style::default().fg(ACCENT).bold();
                frame.buf.put_str(rect.x, y, "[", style, max_x);
                frame.buf.put_str(x.saturating_sub(1), y, "]", style, max_x);
            }
            frame.register(trigger.node().clone(), rect, Some(target));
        }

        frame
            .buf
            .hline(0, HEADER_ROW + 1, screen.width, Style::default().fg(MUTED));
        (semester, major, filters)
    }

    fn render_search(&self, frame: &mut Frame<'_>, screen: Rect) {
        let selection = self.selection.borrow();
        let max_x = screen.right();
        let x = frame
            .buf
            .put_str(1, SEARCH_ROW, "Search: ", Style::default().bold(), max_x);
        if selection.query.is_empty() {
            frame.buf.put_str(
                x,
                SEARCH_ROW,
                "type a course code or title",
                Style::default().fg(MUTED),
                max_x,
            );
        } else {
            let x = frame
                .buf
                .put_str(x, SEARCH_ROW, &selection.query, Style::default(), max_x);
            frame.buf.put_str(x, SEARCH_ROW, "▏", Style::default().fg(ACCENT), max_x);
        }
    }

    fn render_requirements(&self, frame: &mut Frame<'_>, area: Rect) {
        let max_x = area.right();
        frame.buf.put_str(
            area.x,
            area.y,
            "Remaining Requirements",
            Style::default().bold(),
            max_x,
        );

        let mut y = area.y.saturating_add(2);
        for requirement in &self.requirements {
            if y.saturating_add(2) > area.bottom() {
                break;
            }
            render_requirement(frame.buf, requirement, area.x, y, max_x);
            y += CARD_STRIDE;
        }
    }

    fn render_cards(&self, frame: &mut Frame<'_>, area: Rect) {
        let visible = self.visible_courses();
        let max_x = area.right();
        let selection = self.selection.borrow();

        let mut summary = format!(
            "{} result(s) • Semester: {}",
            visible.len(),
            selection.semester
        );
        if selection.what_if
            && let Some(code) = &selection.exploring
        {
            summary.push_str(&format!(" • What-If: {code}"));
        }
        frame
            .buf
            .put_str(area.x, area.y, &summary, Style::default().fg(MUTED), max_x);

        let mut y = area.y.saturating_add(2);
        if visible.is_empty() {
            frame.buf.put_str(
                area.x,
                y,
                &format!("No courses match \"{}\"", selection.query),
                Style::default().fg(MUTED),
                max_x,
            );
            return;
        }

        for index in visible {
            if y.saturating_add(2) > area.bottom() {
                break;
            }
            let course = &self.courses[index];
            render_card(frame.buf, course, area.x, y, max_x);

            // Buttons sit right-aligned on the card's second line.
            let mut right = max_x;
            for (button, node, target) in [
                (
                    self.add_buttons.get(index),
                    format!("add-{}", course.code),
                    Target::AddCourse(index),
                ),
                (
                    self.what_if_buttons.get(index),
                    format!("what-if-{}", course.code),
                    Target::ExploreCourse(index),
                ),
            ] {
                let Some(button) = button else { continue };
                let rect = Rect::new(right.saturating_sub(button.width()), y + 1, button.width(), 1);
                draw_button(frame.buf, rect.x, rect.y, button, max_x);
                frame.register(NodeId::new(node), rect, Some(target));
                right = rect.x.saturating_sub(1);
            }
            y += CARD_STRIDE;
        }
    }
}

/// Requirements column on the left, cards on the right.
fn split_content(screen: Rect) -> (Option<Rect>, Rect) {
    let area = Rect::new(
        1,
        CONTENT_ROW,
        screen.width.saturating_sub(2),
        screen.height.saturating_sub(CONTENT_ROW),
    );
    if screen.width < SIDEBAR_MIN_SCREEN {
        return (None, area);
    }
    let sidebar = Rect::new(area.x, area.y, SIDEBAR_WIDTH, area.height);
    (Some(sidebar), area.shrink(0, 0, 0, SIDEBAR_WIDTH + 2))
}

fn render_requirement(buf: &mut Buffer, requirement: &Requirement, x: u16, y: u16, max_x: u16) {
    buf.put_str(x, y, &requirement.name, Style::default().bold(), max_x);
    buf.put_str(
        x,
        y + 1,
        &format!("Code: {}", requirement.code),
        Style::default().fg(MUTED),
        max_x,
    );
    let badge = match requirement.status {
        RequirementStatus::Fulfilled => Badge::new(requirement.status.label()),
        status => Badge::secondary(status.label()),
    };
    draw_badge(buf, max_x.saturating_sub(badge.width()), y + 1, &badge, max_x);
}

fn render_card(buf: &mut Buffer, course: &Course, x: u16, y: u16, max_x: u16) {
    let end = buf.put_str(x, y, &course.code, Style::default().fg(ACCENT).bold(), max_x);
    buf.put_str(end + 2, y, &course.title, Style::default(), max_x);

    let (seats, style) = match course.seats {
        0 => ("Full".to_string(), Style::default().fg(FULL)),
        n => (format!("{n} seats"), Style::default()),
    };
    let end = buf.put_str(x + 2, y + 1, &seats, style, max_x);
    let end = draw_badge(buf, end + 2, y + 1, &Badge::secondary(course.requirement.as_str()), max_x);
    let end = buf.put_str(end + 2, y + 1, "Difficulty ", Style::default().fg(MUTED), max_x);
    buf.put_str(end, y + 1, &meter(course.difficulty), Style::default().fg(ACCENT), max_x);
}

fn meter(level: u8) -> String {
    (1..=METER_WIDTH)
        .map(|i| if i <= level { '■' } else { '□' })
        .collect()
}

fn render_picker(frame: &mut Frame<'_>, screen: Rect, picker: &Picker, anchor: Rect, current: &str) {
    let Some(list) = picker.panel.render() else {
        return;
    };
    let width = list_width(list);
    let height = list.rows() + 2;
    let rect = picker.panel.placement(screen, anchor, (width, height));
    frame.buf.draw_box(rect, Style::default().fg(MUTED));
    frame.register(picker.panel.node().clone(), rect, None);

    let inner = rect.shrink(1, 1, 1, 1);
    for (row, entry) in (0..).zip(list.entries()) {
        let Some(line) = inner.row(row) else { break };
        render_entry(frame, picker, line, row, entry, current);
    }
}

fn render_entry(
    frame: &mut Frame<'_>,
    picker: &Picker,
    line: Rect,
    row: u16,
    entry: &MenuEntry,
    current: &str,
) {
    let max_x = line.right();
    match entry {
        MenuEntry::Label(text) => {
            frame
                .buf
                .put_str(line.x + 1, line.y, text, Style::default().fg(MUTED), max_x);
        }
        MenuEntry::Separator => {
            frame.buf.hline(line.x, line.y, line.width, Style::default().fg(MUTED));
        }
        MenuEntry::Item(item) => {
            let style = if item.is_disabled() {
                Style::default().dim()
            } else {
                Style::default()
            };
            let mark = if item.label() == current { "✓ " } else { "  " };
            let x = frame
                .buf
                .put_str(line.x, line.y, mark, Style::default().fg(ACCENT), max_x);
            frame.buf.put_str(x, line.y, item.label(), style, max_x);
            frame.register(picker.item_node(row), line, Some((picker.item_target)(row)));
        }
    }
}

fn render_filter_panel(frame: &mut Frame<'_>, rect: Rect, rows: &[FilterRow], node: &NodeId) {
    frame.buf.draw_box(rect, Style::default().fg(MUTED));
    frame.register(node.clone(), rect, None);

    let inner = rect.shrink(1, 1, 1, 1);
    for (index, row) in rows.iter().enumerate() {
        let Some(line) = inner.row(index as u16) else {
            break;
        };
        frame
            .buf
            .put_str(line.x + 1, line.y, row.label, Style::default(), line.right());
        let switch = Rect::new(line.right().saturating_sub(SWITCH_WIDTH + 1), line.y, SWITCH_WIDTH, 1);
        draw_switch(frame.buf, switch, &row.switch);
        frame.register(
            NodeId::new(format!("filter-{index}")),
            line,
            Some(Target::FilterRow(index)),
        );
    }
}

/// `[label]` for outline buttons, reversed fill otherwise.
fn draw_button(buf: &mut Buffer, x: u16, y: u16, button: &Button, max_x: u16) -> u16 {
    let inner = " ".repeat(button.size().padding().saturating_sub(1) as usize);
    match button.variant() {
        ButtonVariant::Outline => buf.put_str(
            x,
            y,
            &format!("[{inner}{}{inner}]", button.label()),
            Style::default(),
            max_x,
        ),
        ButtonVariant::Default => buf.put_str(
            x,
            y,
            &format!(" {inner}{}{inner} ", button.label()),
            Style::default().fg(Color::Black).bg(ACCENT),
            max_x,
        ),
    }
}

fn draw_badge(buf: &mut Buffer, x: u16, y: u16, badge: &Badge, max_x: u16) -> u16 {
    let style = match badge.variant() {
        BadgeVariant::Default => Style::default().fg(Color::Black).bg(ACCENT),
        BadgeVariant::Secondary => Style::default().fg(Color::White).bg(MUTED),
    };
    buf.put_str(x, y, &format!(" {} ", badge.text()), style, max_x)
}

fn draw_switch(buf: &mut Buffer, rect: Rect, switch: &Switch) {
    let (glyph, style) = if switch.checked() {
        ("(  ●)", Style::default().fg(ACCENT).bold())
    } else {
        ("(●  )", Style::default().fg(MUTED))
    };
    buf.put_str(rect.x, rect.y, glyph, style, rect.right());
}

/// Border, check mark and a trailing space around the longest label.
fn list_width(list: &MenuList) -> u16 {
    (list.max_label_len().min(u16::MAX as usize) as u16).saturating_add(6)
}
