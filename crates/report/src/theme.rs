use console::Style;

/// Semantic role of a piece of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
    Caution,
    Neutral,
    Heading,
}

/// Styling handed to a reporter at construction time.
///
/// A plain theme renders no escape sequences at all, which is what files,
/// pipes and tests want.
#[derive(Debug, Clone, Default)]
pub struct Theme {
    palette: Option<Palette>,
}

#[derive(Debug, Clone)]
struct Palette {
    good: Style,
    bad: Style,
    caution: Style,
    neutral: Style,
    heading: Style,
}

impl Theme {
    pub fn colored() -> Self {
        Self {
            palette: Some(Palette {
                good: Style::new().green().force_styling(true),
                bad: Style::new().red().force_styling(true),
                caution: Style::new().yellow().force_styling(true),
                neutral: Style::new().cyan().force_styling(true),
                heading: Style::new().bold().force_styling(true),
            }),
        }
    }

    pub fn plain() -> Self {
        Self { palette: None }
    }

    pub fn is_colored(&self) -> bool {
        self.palette.is_some()
    }

    pub fn paint(&self, tone: Tone, text: &str) -> String {
        let Some(palette) = &self.palette else {
            return text.to_string();
        };
        let style = match tone {
            Tone::Good => &palette.good,
            Tone::Bad => &palette.bad,
            Tone::Caution => &palette.caution,
            Tone::Neutral => &palette.neutral,
            Tone::Heading => &palette.heading,
        };
        style.apply_to(text).to_string()
    }
}
