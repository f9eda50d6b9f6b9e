use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::layout::centered_rect;
use crate::logic::feedback;
use crate::model::{ConfirmAction, DialogKind};

fn render_box(f: &mut Frame, lines: Vec<Line<'static>>, title: String, color: Color, width: u16) {
    let height = lines.len() as u16 + 2;
    let area = centered_rect(f.area(), width, height);

    let prompt = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(Style::default().fg(color)),
        )
        .style(Style::default().fg(Color::White).bg(Color::Black))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(prompt, area);
}

/// Render the "are you sure" prompt for a destructive action
pub fn render_confirmation(f: &mut Frame, action: &ConfirmAction) {
    let subject = match action {
        ConfirmAction::DeleteFolder { name, .. } => format!("Folder: {}", name),
        ConfirmAction::DeleteFile { name, .. } => format!("File: {}", name),
    };

    let lines = vec![
        Line::from(subject),
        Line::from(""),
        Line::from(feedback::CONFIRM_TEXT),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                format!("y: {}", feedback::CONFIRM_BUTTON),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("n: Cancel", Style::default().fg(Color::Gray)),
        ]),
    ];

    render_box(f, lines, feedback::CONFIRM_TITLE.to_string(), Color::Yellow, 50);
}

/// Render a success or error dialog that waits for dismissal
pub fn render_result(f: &mut Frame, kind: DialogKind, title: &str, text: &str) {
    let (icon, color) = match kind {
        DialogKind::Success => ("✓ ", Color::Green),
        DialogKind::Error => ("✗ ", Color::Red),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            Span::raw(text.to_string()),
        ]),
        Line::from(""),
        Line::from(Span::styled("Enter: OK", Style::default().fg(Color::Gray))),
    ];

    render_box(f, lines, title.to_string(), color, 56);
}

/// Render a plain blocking alert
pub fn render_alert(f: &mut Frame, text: &str) {
    let lines = vec![
        Line::from(text.to_string()),
        Line::from(""),
        Line::from(Span::styled("Press any key", Style::default().fg(Color::Gray))),
    ];

    render_box(f, lines, "Alert".to_string(), Color::White, 60);
}
