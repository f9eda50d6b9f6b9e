use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::model::{ConnectionState, Model};

/// Connection label and its color
fn connection_span(model: &Model) -> Span<'static> {
    match &model.folders.connection_state {
        ConnectionState::Connected => Span::styled("● Connected", Style::default().fg(Color::Green)),
        ConnectionState::Loading => Span::styled("○ Loading", Style::default().fg(Color::Yellow)),
        ConnectionState::Disconnected { error_type, .. } => {
            let label = if model.folders.from_cache {
                format!("✗ Offline ({}), showing cached folders", error_type.label())
            } else {
                format!("✗ Offline ({})", error_type.label())
            };
            Span::styled(label, Style::default().fg(Color::Red))
        }
    }
}

/// Text describing the current selection
pub fn selection_text(model: &Model) -> String {
    if let Some(contents) = &model.folders.contents {
        return match contents.selected_file() {
            Some(file) => format!(
                "Folder: {} │ File: {} ({}/{})",
                contents.folder_name,
                file.name,
                contents.selected.map_or(0, |idx| idx + 1),
                contents.files.len()
            ),
            None => format!("Folder: {} │ {} files", contents.folder_name, contents.files.len()),
        };
    }

    match model.selected_folder() {
        Some(folder) => format!(
            "Folder: {} (id {}) │ {}/{}",
            folder.name,
            folder.id,
            model.folders.selected.map_or(0, |idx| idx + 1),
            model.folders.folders.len()
        ),
        None => "No folder selected".to_string(),
    }
}

pub fn render_status_bar(f: &mut Frame, area: Rect, model: &Model) {
    let line = Line::from(vec![
        connection_span(model),
        Span::raw(" │ "),
        Span::raw(selection_text(model)),
    ]);

    let status = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(Style::default().fg(Color::Gray));

    f.render_widget(status, area);
}
