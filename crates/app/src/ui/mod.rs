pub mod keymap;

mod terminal;
mod theme;

use ledger::Store;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};

use crate::app::{App, Field, ToastLevel, ToastState};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render<S: Store>(frame: &mut Frame<'_>, app: &App<S>) {
    let theme = Theme::default();
    let area = frame.area();

    // Main layout: header, entry form, total, expense list, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(6), // Entry form (two fields)
            Constraint::Length(1), // Running total
            Constraint::Min(0),    // Expense list
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_header(frame, layout[0], &theme);
    render_form(frame, layout[1], app, &theme);
    render_total(frame, layout[2], app, &theme);
    render_list(frame, layout[3], app, &theme);
    render_bottom_bar(frame, layout[4], &theme);
    render_toast(frame, area, app.toast.as_ref(), &theme);
}

fn render_header(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let line = Line::from(Span::styled(
        " Notaspese",
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_form<S: Store>(frame: &mut Frame<'_>, area: Rect, app: &App<S>, theme: &Theme) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(area);

    render_input(
        frame,
        rows[0],
        "Name",
        &app.form.name,
        app.form.focus == Field::Name,
        theme,
    );
    render_input(
        frame,
        rows[1],
        "Amount",
        &app.form.amount,
        app.form.focus == Field::Amount,
        theme,
    );
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    value: &str,
    focused: bool,
    theme: &Theme,
) {
    let border = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.dim)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title);

    let mut text = value.to_string();
    if focused {
        text.push('▏');
    }
    let content = Paragraph::new(Line::from(text)).style(Style::default().fg(theme.text));
    frame.render_widget(content.block(block), area);
}

fn render_total<S: Store>(frame: &mut Frame<'_>, area: Rect, app: &App<S>, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(" Total: ", Style::default().fg(theme.dim)),
        Span::styled(
            format!("{:.2}", app.total()),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_list<S: Store>(frame: &mut Frame<'_>, area: Rect, app: &App<S>, theme: &Theme) {
    let items: Vec<ListItem> = app
        .records()
        .iter()
        .map(|record| {
            ListItem::new(Line::from(vec![
                Span::styled(record.name.clone(), Style::default().fg(theme.text)),
                Span::raw("  "),
                Span::styled(
                    format!("{:.2}", record.amount),
                    Style::default().fg(theme.dim),
                ),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.dim))
        .title("Expenses");
    frame.render_widget(List::new(items).block(block), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled(" Tab", Style::default().fg(theme.accent)),
        Span::raw(" field  "),
        Span::styled("Enter", Style::default().fg(theme.accent)),
        Span::raw(" add  "),
        Span::styled("Esc", Style::default().fg(theme.accent)),
        Span::raw(" quit"),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().fg(theme.dim)), area);
}

fn render_toast(frame: &mut Frame<'_>, area: Rect, toast: Option<&ToastState>, theme: &Theme) {
    let Some(toast) = toast else {
        return;
    };
    let width = (toast.message.len() + 4).min(area.width as usize) as u16;
    let height = 3u16;
    let x = area.x + area.width.saturating_sub(width);
    let y = area
        .y
        .saturating_add(area.height.saturating_sub(height + 1));
    let rect = Rect {
        x,
        y,
        width,
        height,
    };

    let style = match toast.level {
        ToastLevel::Success => Style::default().fg(theme.positive),
        ToastLevel::Error => Style::default().fg(theme.error),
    };

    let block = Block::default().borders(Borders::ALL).border_style(style);
    let content = Paragraph::new(Line::from(toast.message.as_str())).style(style);
    frame.render_widget(content.block(block), rect);
}
