use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::api::Folder;
use crate::logic::formatting::format_created_at;
use crate::model::{ConnectionState, FolderModel};

fn folder_item(folder: &Folder) -> ListItem<'static> {
    let mut spans = vec![Span::raw("📁 "), Span::raw(folder.name.clone())];

    if folder.is_zipped {
        spans.push(Span::styled(" [zip]", Style::default().fg(Color::Magenta)));
    }

    if let Some(created_at) = &folder.created_at {
        spans.push(Span::styled(
            format!("  {}", format_created_at(created_at)),
            Style::default().fg(Color::Rgb(150, 150, 150)),
        ));
    }

    ListItem::new(Line::from(spans))
}

/// Render the folder cards
pub fn render_folder_list(f: &mut Frame, area: Rect, folders: &FolderModel, is_focused: bool) {
    let mut title = format!("Folders ({})", folders.folders.len());
    if folders.from_cache {
        title.push_str(" [cached]");
    }

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::Gray)
        });

    if folders.folders.is_empty() {
        let placeholder = match folders.connection_state {
            ConnectionState::Loading => "Loading folders...",
            ConnectionState::Connected => "No folders yet. Press n to create one.",
            ConnectionState::Disconnected { .. } => "Folders unavailable.",
        };
        let paragraph = Paragraph::new(placeholder)
            .style(Style::default().fg(Color::Gray))
            .block(block);
        f.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = folders.folders.iter().map(folder_item).collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    // Create temporary ListState for rendering
    let mut state = ListState::default();
    state.select(folders.selected);
    f.render_stateful_widget(list, area, &mut state);
}
