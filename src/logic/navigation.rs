//! List selection logic
//!
//! Pure functions for moving and repairing a selection index in a list
//! of folder cards or file rows.

/// Move the selection down one row, wrapping to the top.
///
/// ```
/// use foldertui::logic::navigation::next_index;
///
/// assert_eq!(next_index(None, 0), None);
/// assert_eq!(next_index(None, 3), Some(0));
/// assert_eq!(next_index(Some(2), 3), Some(0));
/// ```
pub fn next_index(current: Option<usize>, len: usize) -> Option<usize> {
    match (current, len) {
        (_, 0) => None,
        (Some(i), _) if i + 1 < len => Some(i + 1),
        (Some(_), _) => Some(0),
        (None, _) => Some(0),
    }
}

/// Move the selection up one row, wrapping to the bottom.
pub fn prev_index(current: Option<usize>, len: usize) -> Option<usize> {
    match (current, len) {
        (_, 0) => None,
        (Some(i), _) if i > 0 && i <= len => Some(i - 1),
        _ => Some(len - 1),
    }
}

/// Repair a selection after the list shrank to `new_len` rows.
///
/// The selection stays on the same index (now the row that moved up into
/// the gap) unless it fell off the end, in which case it sticks to the
/// last row.
pub fn clamp_after_removal(current: Option<usize>, new_len: usize) -> Option<usize> {
    if new_len == 0 {
        return None;
    }

    match current {
        Some(i) if i >= new_len => Some(new_len - 1),
        Some(i) => Some(i),
        None => Some(0),
    }
}
