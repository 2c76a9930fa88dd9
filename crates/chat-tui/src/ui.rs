//! Rendering for the memchat TUI.

use crate::app::App;
use chat_types::Role;
use chrono::Local;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(frame.area());

    let mut lines: Vec<Line> = Vec::new();
    for msg in app.transcript.messages() {
        let (label, color) = match msg.role {
            Role::User => ("you", Color::Blue),
            Role::Assistant => ("bot", Color::Green),
        };
        let stamp = msg
            .timestamp
            .with_timezone(&Local)
            .format("%H:%M:%S")
            .to_string();
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} ", label),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(stamp, Style::default().fg(Color::DarkGray)),
        ]));
        for content_line in msg.content.lines() {
            lines.push(Line::from(format!("  {}", content_line)));
        }
        if msg.memory_created == Some(true) {
            lines.push(Line::from(Span::styled(
                "  💾 Memory created",
                Style::default().fg(Color::Cyan),
            )));
        }
        lines.push(Line::from(""));
    }
    if app.transcript.is_busy() {
        lines.push(Line::from(Span::styled(
            "Thinking...",
            Style::default().fg(Color::DarkGray),
        )));
    }

    // Pin the view to the newest messages.
    let visible = chunks[0].height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible) as u16;
    let title = format!("memchat ({})", app.user_id);
    let messages = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(messages, chunks[0]);

    let input = Paragraph::new(app.input.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title("message (Enter to send, Esc to quit)"),
    );
    frame.render_widget(input, chunks[1]);
}
