use ratatui::style::Color;

use crate::app::Feedback;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub error: Color,
    pub success: Color,
    pub border: Color,
}

impl Theme {
    pub fn feedback_color(&self, feedback: &Feedback) -> Color {
        match feedback {
            Feedback::Notice(_) => self.success,
            Feedback::Error(_) => self.error,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(90, 150, 200),
            error: Color::Rgb(200, 80, 80),
            success: Color::Rgb(110, 180, 110),
            border: Color::Rgb(70, 80, 90),
        }
    }
}
