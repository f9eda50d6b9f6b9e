// UI module - handles all TUI rendering using Ratatui
//
// Architecture:
// - layout: Calculates screen layout (folder pane, contents pane, legend, status)
// - render: Main orchestration function that coordinates all rendering
// - folder_list: Renders the folder cards
// - contents: Renders the open folder's files
// - legend: Renders hotkey legend
// - status_bar: Renders bottom status bar (connection, selection)
// - dialogs: Renders confirmation, result and alert overlays
// - forms: Renders the create, rename and upload forms
// - toast: Renders toast notifications (brief pop-up messages)

pub mod contents;
pub mod dialogs;
pub mod folder_list;
pub mod forms;
pub mod layout;
pub mod legend;
pub mod render;
pub mod status_bar;
pub mod toast;

// Re-export main render function for convenience
pub use render::render;
