use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use api_types::PartyKind;

use crate::{
    app::{AppState, FormField},
    ui::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let form = &state.form;

    let block = Block::default()
        .title(" new transaction ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1); 12])
        .split(inner);

    let fields: [(&str, String, FormField); 10] = [
        (
            "receiver",
            form.receiver_name.clone(),
            FormField::ReceiverName,
        ),
        ("recv id", form.receiver_id.clone(), FormField::ReceiverId),
        (
            "recv type",
            kind_label(form.receiver_kind).to_string(),
            FormField::ReceiverKind,
        ),
        ("payer", form.payer_name.clone(), FormField::PayerName),
        ("payer id", form.payer_id.clone(), FormField::PayerId),
        (
            "payer type",
            kind_label(form.payer_kind).to_string(),
            FormField::PayerKind,
        ),
        ("method", form.method.label().to_string(), FormField::Method),
        (
            "currency",
            form.currency.code().to_string(),
            FormField::CurrencyCode,
        ),
        ("amount", form.amount.clone(), FormField::Amount),
        (
            "description",
            form.description.clone(),
            FormField::Description,
        ),
    ];

    for (idx, (label, value, field)) in fields.iter().enumerate() {
        render_row(
            frame,
            rows[idx],
            label,
            value,
            form.focus == *field,
            field.is_text(),
            &theme,
        );
    }

    if let Some(message) = &form.message {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))),
            rows[11],
        );
    }
}

fn render_row(
    frame: &mut Frame<'_>,
    area: Rect,
    label: &str,
    value: &str,
    focused: bool,
    is_text: bool,
    theme: &Theme,
) {
    let marker = if focused { "> " } else { "  " };
    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text)
    };
    let value = if is_text {
        value.to_string()
    } else {
        format!("< {value} >")
    };

    let line = Line::from(vec![
        Span::styled(marker, style),
        Span::styled(format!("{label:<12}"), Style::default().fg(theme.dim)),
        Span::styled(value, style),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn kind_label(kind: PartyKind) -> &'static str {
    match kind {
        PartyKind::Individual => "individual",
        PartyKind::Legal => "legal",
    }
}
