#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeVariant {
    #[default]
    Default,
    Secondary,
}

/// Short pill of text, display only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge {
    text: String,
    variant: BadgeVariant,
}

impl Badge {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            variant: BadgeVariant::Default,
        }
    }

    pub fn secondary(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            variant: BadgeVariant::Secondary,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn variant(&self) -> BadgeVariant {
        self.variant
    }

    /// Text plus one cell of padding per side.
    pub fn width(&self) -> u16 {
        let text = self.text.chars().count().min(u16::MAX as usize) as u16;
        text.saturating_add(2)
    }
}
