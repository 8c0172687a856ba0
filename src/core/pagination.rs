use serde::{Deserialize, Serialize};
use std::fmt;

/// Pages shown on either side of the current one.
const WINDOW: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageItem {
    Page(usize),
    Ellipsis,
}

impl fmt::Display for PageItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageItem::Page(n) => write!(f, "{}", n),
            PageItem::Ellipsis => f.write_str("..."),
        }
    }
}

/// Compact page-button sequence for `current` out of `total` pages: first and
/// last page when outside the window, an ellipsis for every gap, and the
/// pages within two of `current`.
pub fn generate(current: usize, total: usize) -> Vec<PageItem> {
    if total == 0 {
        return Vec::new();
    }

    let mut items = Vec::new();

    if current > WINDOW + 1 {
        items.push(PageItem::Page(1));
        if current > WINDOW + 2 {
            items.push(PageItem::Ellipsis);
        }
    }

    let start = current.saturating_sub(WINDOW).max(1);
    let end = (current + WINDOW).min(total);
    items.extend((start..=end).map(PageItem::Page));

    if current + WINDOW < total {
        if current + WINDOW + 1 < total {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));
    }

    items
}

pub fn has_previous(current: usize) -> bool {
    current > 1
}

pub fn has_next(current: usize, total: usize) -> bool {
    current < total
}
