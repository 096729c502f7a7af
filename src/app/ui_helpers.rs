use ratatui::layout::Rect;

use super::Tab;

pub fn tab_prev(tab: Tab) -> Tab {
    Tab::ALL[wrap_prev_index(tab.index(), Tab::ALL.len())]
}

pub fn tab_next(tab: Tab) -> Tab {
    Tab::ALL[wrap_next_index(tab.index(), Tab::ALL.len())]
}

pub fn wrap_prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

pub fn wrap_next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current + 1 >= len {
        0
    } else {
        current + 1
    }
}

pub fn clamp_index(current: usize, len: usize) -> usize {
    current.min(len.saturating_sub(1))
}

/// A centred box covering `numerator/denominator` of the terminal, never
/// shorter than `min_height` rows when there is room.
pub fn modal_rect(terminal_size: Rect, numerator: u16, denominator: u16, min_height: u16) -> Rect {
    let target_width = terminal_size.width.saturating_mul(numerator) / denominator;
    let target_height =
        (terminal_size.height.saturating_mul(numerator) / denominator).max(min_height);

    let max_width = terminal_size.width.saturating_sub(2).max(1);
    let max_height = terminal_size.height.saturating_sub(2).max(1);

    let modal_width = target_width.clamp(1, max_width);
    let modal_height = target_height.clamp(1, max_height);

    let modal_x = terminal_size.x + (terminal_size.width.saturating_sub(modal_width)) / 2;
    let modal_y = terminal_size.y + (terminal_size.height.saturating_sub(modal_height)) / 2;

    Rect::new(modal_x, modal_y, modal_width, modal_height)
}

pub fn truncate_label(value: &str, max_chars: usize) -> String {
    let count = value.chars().count();
    if count <= max_chars {
        return value.to_string();
    }

    if max_chars <= 3 {
        return value.chars().take(max_chars).collect();
    }

    let prefix: String = value.chars().take(max_chars - 3).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_prev_index_wraps_to_end() {
        assert_eq!(wrap_prev_index(0, 5), 4);
        assert_eq!(wrap_prev_index(3, 5), 2);
        assert_eq!(wrap_prev_index(0, 0), 0);
    }

    #[test]
    fn test_wrap_next_index_wraps_to_start() {
        assert_eq!(wrap_next_index(4, 5), 0);
        assert_eq!(wrap_next_index(1, 5), 2);
        assert_eq!(wrap_next_index(0, 0), 0);
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(tab_next(Tab::Settings), Tab::Dashboard);
        assert_eq!(tab_prev(Tab::Dashboard), Tab::Settings);
        assert_eq!(tab_next(Tab::Today), Tab::Plan);
    }

    #[test]
    fn test_modal_rect_stays_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let rect = modal_rect(area, 1, 2, 5);
        assert_eq!(rect, Rect::new(20, 6, 40, 12));

        let tiny = modal_rect(Rect::new(0, 0, 4, 3), 1, 2, 10);
        assert!(tiny.width <= 2 && tiny.height <= 1);
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Deep Work", 20), "Deep Work");
        assert_eq!(truncate_label("Never Split the Difference", 10), "Never S...");
        assert_eq!(truncate_label("abcdef", 2), "ab");
    }
}
