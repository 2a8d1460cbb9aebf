use owo_colors::Style;
use std::sync::OnceLock;
use crate::query::MarksBand;

static THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone)]
pub struct Theme {
    pub header: Style,
    pub success: Style,
    pub error: Style,
    pub warn: Style,
    pub info: Style,
    pub dim: Style,
    pub marks_high: Style,
    pub marks_medium: Style,
    pub marks_low: Style,
}

impl Theme {
    pub fn detect() -> Self {
        if !console::Term::stdout().is_term() {
            return Self::plain();
        }
        Self::colored()
    }

    pub fn colored() -> Self {
        Self {
            header: Style::new().cyan().bold(),
            success: Style::new().green().bold(),
            error: Style::new().red().bold(),
            warn: Style::new().yellow().bold(),
            info: Style::new().magenta(),
            dim: Style::new().white().dimmed(),
            marks_high: Style::new().green(),
            marks_medium: Style::new().yellow(),
            marks_low: Style::new().red(),
        }
    }

    pub fn plain() -> Self {
        Self {
            header: Style::new(),
            success: Style::new(),
            error: Style::new(),
            warn: Style::new(),
            info: Style::new(),
            dim: Style::new(),
            marks_high: Style::new(),
            marks_medium: Style::new(),
            marks_low: Style::new(),
        }
    }

    pub fn marks(&self, band: MarksBand) -> Style {
        match band {
            MarksBand::High => self.marks_high.clone(),
            MarksBand::Medium => self.marks_medium.clone(),
            MarksBand::Low => self.marks_low.clone(),
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
