use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, LoginField},
    ui::Theme,
    ui::screens::centered_box,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let card_area = centered_box(40, 8, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" sign in ")
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
            Constraint::Min(0),
        ])
        .split(inner);

    render_field(
        frame,
        rows[0],
        "username",
        &state.login.username,
        state.login.focus == LoginField::Username,
        false,
        &theme,
    );
    render_field(
        frame,
        rows[1],
        "password",
        &state.login.password,
        state.login.focus == LoginField::Password,
        true,
        &theme,
    );

    if let Some(feedback) = &state.login.message {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                feedback.text(),
                Style::default().fg(theme.feedback_color(feedback)),
            ))),
            rows[3],
        );
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Enter sign in  Ctrl+R reset password  Ctrl+Q quit",
            Style::default().fg(theme.dim),
        ))),
        rows[4],
    );
}

pub(crate) fn render_field(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    masked: bool,
    theme: &Theme,
) {
    let shown = if masked {
        "*".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let marker = if focused { "> " } else { "  " };
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };

    let line = Line::from(vec![
        Span::styled(marker, style),
        Span::styled(format!("{label:<10}"), Style::default().fg(theme.dim)),
        Span::styled(shown, style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
