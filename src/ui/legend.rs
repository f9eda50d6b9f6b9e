use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key(label: &'static str) -> Span<'static> {
    Span::styled(label, Style::default().fg(Color::Yellow))
}

/// Build hotkey spans (extracted for testability)
fn build_hotkey_spans(vim_mode: bool, in_contents: bool) -> Vec<Span<'static>> {
    let mut hotkey_spans = vec![];

    // Navigation keys (different for vim mode)
    if vim_mode {
        hotkey_spans.extend(vec![key("hjkl"), Span::raw(":Nav  ")]);
    } else {
        hotkey_spans.extend(vec![
            key("↑/↓"),
            Span::raw(":Nav  "),
            key("Enter"),
            Span::raw(":Open  "),
            key("←"),
            Span::raw(":Back  "),
        ]);
    }

    if in_contents {
        hotkey_spans.extend(vec![
            key("r"),
            Span::raw(":Rename File  "),
            key("x"),
            Span::raw(":Delete File  "),
        ]);
    } else {
        hotkey_spans.extend(vec![
            key("n"),
            Span::raw(":New  "),
            key("u"),
            Span::raw(":Upload  "),
            key("r"),
            Span::raw(":Rename  "),
            key("d"),
            Span::raw(":Delete  "),
            key("D"),
            Span::raw(":Delete (confirm)  "),
        ]);
    }

    hotkey_spans.extend(vec![
        key("F5"),
        Span::raw(":Reload  "),
        key("q"),
        Span::raw(":Quit"),
    ]);

    hotkey_spans
}

/// Build the legend paragraph (reusable for both rendering and height calculation)
pub fn build_legend_paragraph(vim_mode: bool, in_contents: bool) -> Paragraph<'static> {
    let hotkey_line = Line::from(build_hotkey_spans(vim_mode, in_contents));

    Paragraph::new(vec![hotkey_line])
        .block(Block::default().borders(Borders::ALL).title("Hotkeys"))
        .style(Style::default().fg(Color::Gray))
        .wrap(ratatui::widgets::Wrap { trim: false })
}

pub fn render_legend(f: &mut Frame, area: Rect, vim_mode: bool, in_contents: bool) {
    f.render_widget(build_legend_paragraph(vim_mode, in_contents), area);
}

/// Calculate required height for legend based on terminal width and content
pub fn calculate_legend_height(terminal_width: u16, vim_mode: bool, in_contents: bool) -> u16 {
    // Count lines without the block; line_count() miscounts with borders attached
    let paragraph_for_counting = Paragraph::new(vec![Line::from(build_hotkey_spans(vim_mode, in_contents))])
        .wrap(ratatui::widgets::Wrap { trim: false });

    let available_width = terminal_width.saturating_sub(2);
    let line_count = paragraph_for_counting.line_count(available_width);

    // Add top + bottom borders, ensure minimum of 3
    (line_count as u16).saturating_add(2).max(3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans_to_text(spans: &[Span]) -> String {
        spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_folder_view_shows_both_deletes() {
        let text = spans_to_text(&build_hotkey_spans(false, false));
        assert!(text.contains("d:Delete  "));
        assert!(text.contains("D:Delete (confirm)"));
        assert!(text.contains("u:Upload"));
        assert!(!text.contains("Delete File"));
    }

    #[test]
    fn test_contents_view_shows_file_actions() {
        let text = spans_to_text(&build_hotkey_spans(false, true));
        assert!(text.contains("x:Delete File"));
        assert!(!text.contains("u:Upload"));
    }

    #[test]
    fn test_vim_navigation_hint() {
        let text = spans_to_text(&build_hotkey_spans(true, false));
        assert!(text.starts_with("hjkl:Nav"));
    }

    #[test]
    fn test_legend_wraps_on_narrow_terminal() {
        assert_eq!(calculate_legend_height(500, false, false), 3);
        assert!(calculate_legend_height(30, false, false) > 3);
    }
}
