use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::layout::centered_rect;
use crate::model::{FolderSelect, Form, TextInput, UploadFocus};

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    }
}

/// Render one text input and place the terminal cursor after its text
fn render_input(f: &mut Frame, area: Rect, label: &str, input: &TextInput, focused: bool) {
    let paragraph = Paragraph::new(input.value.as_str()).block(
        Block::default()
            .borders(Borders::ALL)
            .title(label.to_string())
            .border_style(focus_style(focused)),
    );
    f.render_widget(paragraph, area);

    if focused {
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_x = (area.x + 1 + input.value.width() as u16).min(max_x);
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn render_folder_select(f: &mut Frame, area: Rect, select: &FolderSelect, focused: bool) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Folder")
        .border_style(focus_style(focused));

    if select.options.is_empty() {
        f.render_widget(
            Paragraph::new("No folders").style(Style::default().fg(Color::Gray)).block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = select
        .options
        .iter()
        .map(|option| ListItem::new(option.text.clone()))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(select.selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn hint_line(form: &Form) -> Line<'static> {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));
    let mut spans = vec![key("Enter"), Span::raw(":Submit  "), key("Esc"), Span::raw(":Cancel")];
    if matches!(form, Form::Upload { .. }) {
        spans.extend(vec![Span::raw("  "), key("Tab"), Span::raw(":Switch field")]);
    }
    Line::from(spans)
}

/// Render the open form as a centered modal
pub fn render_form(f: &mut Frame, form: &Form, folder_select: &FolderSelect) {
    let height = match form {
        Form::Upload { .. } => 16,
        _ => 7,
    };
    let area = centered_rect(f.area(), 60, height);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(form.title())
        .border_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    f.render_widget(block, area);

    match form {
        Form::CreateFolder { name } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(1)])
                .split(inner);
            render_input(f, chunks[0], "Folder name", name, true);
            f.render_widget(Paragraph::new(hint_line(form)), chunks[1]);
        }
        Form::RenameFolder { name, .. } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(1)])
                .split(inner);
            render_input(f, chunks[0], "New folder name", name, true);
            f.render_widget(Paragraph::new(hint_line(form)), chunks[1]);
        }
        Form::RenameFile { name, .. } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(3), Constraint::Min(1)])
                .split(inner);
            render_input(f, chunks[0], "New file name", name, true);
            f.render_widget(Paragraph::new(hint_line(form)), chunks[1]);
        }
        Form::Upload { path, focus } => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(3),
                    Constraint::Min(3),
                    Constraint::Length(1),
                ])
                .split(inner);
            render_input(f, chunks[0], "File path", path, *focus == UploadFocus::Path);
            render_folder_select(f, chunks[1], folder_select, *focus == UploadFocus::FolderSelect);
            f.render_widget(Paragraph::new(hint_line(form)), chunks[2]);
        }
    }
}
