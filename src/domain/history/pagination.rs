use super::value_objects::{PageWindow, PageWindowItem};

/// Page counts up to this size are shown in full
pub const FULL_WINDOW_LIMIT: u32 = 10;
const EDGE_PAGES: u32 = 3;
const NEIGHBOURS: u32 = 2;

/// Visible page buttons for a pagination control.
///
/// Beyond [`FULL_WINDOW_LIMIT`] pages only the first three, the last three and
/// the pages within two of `current_page` are kept. A hidden index emits an
/// ellipsis only when it is index 3 or `total_pages - 4`; when one hidden run
/// covers both indices two adjacent markers appear (e.g. on the first page).
pub fn compute_page_window(total_pages: u32, current_page: u32) -> PageWindow {
    let mut items = Vec::new();

    for i in 0..total_pages {
        let hidden = total_pages > FULL_WINDOW_LIMIT
            && i >= EDGE_PAGES
            && i < total_pages - EDGE_PAGES
            && i.abs_diff(current_page) > NEIGHBOURS;

        if hidden {
            if i == EDGE_PAGES || i == total_pages - EDGE_PAGES - 1 {
                items.push(PageWindowItem::Ellipsis);
            }
            continue;
        }
        items.push(PageWindowItem::Page(i));
    }

    PageWindow(items)
}
