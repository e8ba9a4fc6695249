use chrono::DateTime;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use api_types::transaction::Transaction;

use crate::{app::AppState, transactions::TransactionStore, ui::Theme};

pub fn render(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    transactions: &TransactionStore,
) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], transactions, &theme);
    render_list(frame, layout[1], state, transactions, &theme);
}

fn render_header(
    frame: &mut Frame<'_>,
    area: Rect,
    transactions: &TransactionStore,
    theme: &Theme,
) {
    let mut line = vec![
        Span::styled("count", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", transactions.items().len())),
        Span::styled("total", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", transactions.total_amount())),
    ];

    if transactions.loading() {
        line.push(Span::raw("   "));
        line.push(Span::styled("loading…", Style::default().fg(theme.dim)));
    }
    if !transactions.error().is_empty() {
        line.push(Span::raw("   "));
        line.push(Span::styled(
            transactions.error(),
            Style::default().fg(theme.error),
        ));
    }

    let block = Block::default().borders(Borders::ALL).title("Transactions");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(
    frame: &mut Frame<'_>,
    area: Rect,
    state: &AppState,
    transactions: &TransactionStore,
    theme: &Theme,
) {
    let items = transactions
        .items()
        .iter()
        .map(|tx| ListItem::new(Line::from(row_text(tx))))
        .collect::<Vec<_>>();

    let mut list_state = ListState::default();
    if !items.is_empty() {
        list_state.select(Some(state.dashboard.selected.min(items.len() - 1)));
    }

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn row_text(tx: &Transaction) -> String {
    let date = format_date(&tx.datetime_iso);
    let amount = format!("{} {}", tx.amount, tx.currency.code());
    let method = tx.payment_method.label();
    format!(
        "{date:<17} {amount:<16} {method:<8} {:<20} {}",
        tx.receiver.name, tx.description
    )
}

/// The list shows an em-dash placeholder for missing or unparseable
/// timestamps instead of failing the whole row.
fn format_date(iso: &str) -> String {
    DateTime::parse_from_rfc3339(iso)
        .map(|date| date.format("%d %b %Y %H:%M").to_string())
        .unwrap_or_else(|_| "—".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_date_falls_back_on_bad_input() {
        assert_eq!(format_date(""), "—");
        assert_eq!(format_date("not a date"), "—");
        assert_eq!(format_date("2026-02-01T08:30:00Z"), "01 Feb 2026 08:30");
    }
}
