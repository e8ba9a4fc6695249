pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{app::AppState, nav::Screen, session::SessionStore, transactions::TransactionStore};

pub use terminal::{UiTerminal, init_terminal, restore_terminal};
pub use theme::Theme;

pub fn render(
    frame: &mut Frame<'_>,
    state: &AppState,
    session: &SessionStore,
    transactions: &TransactionStore,
) {
    let area = frame.area();
    match state.screen {
        Screen::Login => screens::login::render(frame, area, state),
        Screen::Reset => screens::reset::render(frame, area, state),
        Screen::Form | Screen::Dashboard => render_shell(frame, area, state, session, transactions),
    }
}

fn render_shell(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    session: &SessionStore,
    transactions: &TransactionStore,
) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Hints
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, session);

    match state.screen {
        Screen::Form => screens::form::render(frame, layout[1], state),
        _ => screens::dashboard::render(frame, layout[1], state, transactions),
    }

    render_hints(frame, layout[2], state);
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, session: &SessionStore) {
    let theme = Theme::default();
    let username = session
        .current_user()
        .and_then(|user| user.get("username"))
        .and_then(|value| value.as_str())
        .unwrap_or("-");

    let line = Line::from(vec![
        Span::styled(state.screen.label(), Style::default().fg(theme.accent)),
        Span::raw("   "),
        Span::styled("user", Style::default().fg(theme.dim)),
        Span::raw(format!(": {username}   ")),
        Span::styled("api", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", state.base_url)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_hints(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let hints = match state.screen {
        Screen::Form => "Tab next field  Up/Down change value  Enter submit  Esc dashboard  Ctrl+L logout",
        _ => "Up/Down select  r refresh  n new transaction  q quit  Ctrl+L logout",
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            hints,
            Style::default().fg(theme.dim),
        ))),
        area,
    );
}
