use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, ResetField, ResetStage},
    ui::Theme,
    ui::screens::{centered_box, login::render_field},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let card_area = centered_box(44, 9, area);
    frame.render_widget(Clear, card_area);

    let title = match state.reset.stage {
        ResetStage::RequestCode => " reset password: request code ",
        ResetStage::Confirm => " reset password: confirm ",
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    match state.reset.stage {
        ResetStage::RequestCode => {
            render_field(
                frame,
                rows[0],
                "username",
                &state.reset.username,
                state.reset.focus == ResetField::Username,
                false,
                &theme,
            );
        }
        ResetStage::Confirm => {
            render_field(
                frame,
                rows[0],
                "username",
                &state.reset.username,
                false,
                false,
                &theme,
            );
            render_field(
                frame,
                rows[1],
                "code",
                &state.reset.code,
                state.reset.focus == ResetField::Code,
                false,
                &theme,
            );
            render_field(
                frame,
                rows[2],
                "password",
                &state.reset.new_password,
                state.reset.focus == ResetField::NewPassword,
                true,
                &theme,
            );
        }
    }

    if let Some(feedback) = &state.reset.message {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                feedback.text(),
                Style::default().fg(theme.feedback_color(feedback)),
            ))),
            rows[4],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Enter submit  Tab next field  Esc back to sign in",
            Style::default().fg(theme.dim),
        ))),
        rows[5],
    );
}
