/// Step and floor of the "show more / show less" lists
pub const DISPLAY_STEP: usize = 3;

/// How many items of a list are currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayWindow {
    shown: usize,
}

impl Default for DisplayWindow {
    fn default() -> Self {
        Self { shown: DISPLAY_STEP }
    }
}

impl DisplayWindow {
    pub fn shown(&self) -> usize {
        self.shown
    }

    pub fn more(self) -> Self {
        Self {
            shown: self.shown + DISPLAY_STEP,
        }
    }

    pub fn less(self) -> Self {
        Self {
            shown: self.shown.saturating_sub(DISPLAY_STEP).max(DISPLAY_STEP),
        }
    }

    pub fn can_show_more(&self, total: usize) -> bool {
        total > self.shown
    }

    pub fn can_show_less(&self) -> bool {
        self.shown > DISPLAY_STEP
    }

    /// The visible prefix of `items`
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.shown.min(items.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_grows_and_shrinks_by_step() {
        let window = DisplayWindow::default();
        assert_eq!(window.shown(), 3);
        assert!(!window.can_show_less());

        let window = window.more().more();
        assert_eq!(window.shown(), 9);
        assert!(window.can_show_less());

        let window = window.less().less().less();
        assert_eq!(window.shown(), 3);
    }

    #[test]
    fn test_slice_never_exceeds_list() {
        let items = [1, 2, 3, 4];
        let window = DisplayWindow::default();
        assert_eq!(window.slice(&items), &[1, 2, 3]);
        assert!(window.can_show_more(items.len()));
        assert_eq!(window.more().slice(&items), &[1, 2, 3, 4]);
        assert!(!window.more().can_show_more(items.len()));
    }
}
