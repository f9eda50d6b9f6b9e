use ratatui::Frame;

use super::{contents, dialogs, folder_list, forms, layout, legend, status_bar, toast};
use crate::model::{Dialog, Model};

/// Main render function - orchestrates all UI rendering
pub fn render(f: &mut Frame, model: &Model) {
    let size = f.area();
    let in_contents = model.in_contents();

    let legend_height = legend::calculate_legend_height(size.width, model.ui.vim_mode, in_contents);
    let layout_info = layout::calculate_layout(size, in_contents, legend_height);

    folder_list::render_folder_list(f, layout_info.folders_area, &model.folders, !in_contents);

    if let (Some(area), Some(state)) = (layout_info.contents_area, &model.folders.contents) {
        contents::render_contents(f, area, state, true);
    }

    legend::render_legend(f, layout_info.legend_area, model.ui.vim_mode, in_contents);
    status_bar::render_status_bar(f, layout_info.status_area, model);

    // Overlays, bottom to top: form, dialog, alert
    if let Some(form) = &model.ui.form {
        forms::render_form(f, form, &model.ui.folder_select);
    }

    match &model.ui.dialog {
        Some(Dialog::Confirm(action)) => dialogs::render_confirmation(f, action),
        Some(Dialog::Result { kind, title, text, .. }) => dialogs::render_result(f, *kind, title, text),
        None => {}
    }

    if let Some(alert) = &model.ui.alert {
        dialogs::render_alert(f, alert);
    }

    // Render toast notification if active
    if let Some((message, _timestamp)) = &model.ui.toast_message {
        toast::render_toast(f, size, message);
    }
}
