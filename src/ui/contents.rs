use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::api::FileEntry;
use crate::logic::formatting::{format_created_at, format_folder_summary, format_size_kb};
use crate::model::ContentsState;

fn file_item(file: &FileEntry) -> ListItem<'static> {
    let detail = Style::default().fg(Color::Rgb(150, 150, 150));

    let mut spans = vec![
        Span::raw(file.name.clone()),
        Span::styled(format!("  {}", format_size_kb(file.size)), detail),
    ];
    if let Some(file_type) = &file.file_type {
        spans.push(Span::styled(format!("  {}", file_type), detail));
    }
    if let Some(created_at) = &file.created_at {
        spans.push(Span::styled(format!("  {}", format_created_at(created_at)), detail));
    }

    ListItem::new(Line::from(spans))
}

fn contents_title(contents: &ContentsState) -> String {
    match &contents.stats {
        Some(stats) => format!(
            "{} │ {}",
            contents.folder_name,
            format_folder_summary(stats.file_count, stats.total_size_mb)
        ),
        None => contents.folder_name.clone(),
    }
}

/// Render the files of the open folder
pub fn render_contents(f: &mut Frame, area: Rect, contents: &ContentsState, is_focused: bool) {
    let block = Block::default()
        .title(contents_title(contents))
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        });

    if contents.files.is_empty() {
        let placeholder = if contents.loading { "Loading..." } else { "No files" };
        let paragraph = Paragraph::new(placeholder)
            .style(Style::default().fg(Color::Gray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = contents.files.iter().map(file_item).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(contents.selected);
    f.render_stateful_widget(list, area, &mut state);
}
