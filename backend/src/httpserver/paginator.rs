//! A five-element paginator: first, previous, current, next and last page.

use serde::Serialize;

use crate::httpserver::error::PaginateError;

/// Navigation values for one page of a listing. Build it with [`paginate`].
///
/// Pages start at 1 and end at `total_pages` (inclusive). `previous_page` and
/// `next_page` are 0 when the current page is already the first/last one.
///
/// A listing with no items has no pages: `total_pages`, `current_page`,
/// `previous_page` and `next_page` are all 0.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Paginator {
    pub current_page: i64,
    pub previous_page: i64,
    pub next_page: i64,
    pub total_items: i64,
    pub items_per_page: i64,
    pub total_pages: i64,
}

impl Paginator {
    pub fn is_empty(&self) -> bool {
        self.total_pages == 0
    }

    /// Index of the first item on the current page, e.g. for a SQL `OFFSET`.
    pub fn offset(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            (self.current_page - 1) * self.items_per_page
        }
    }
}

pub fn paginate(
    current_page: i64,
    total_items: i64,
    items_per_page: i64,
) -> Result<Paginator, PaginateError> {
    if items_per_page <= 0 {
        return Err(PaginateError::InvalidItemsPerPage(items_per_page));
    }

    let total_items = total_items.max(0);
    let mut total_pages = total_items / items_per_page;
    // partial last page
    if total_items % items_per_page != 0 {
        total_pages += 1;
    }

    if total_pages == 0 {
        return Ok(Paginator {
            items_per_page,
            ..Paginator::default()
        });
    }

    let current_page = current_page.clamp(1, total_pages);
    let previous_page = if current_page > 1 { current_page - 1 } else { 0 };
    let next_page = if current_page < total_pages { current_page + 1 } else { 0 };

    Ok(Paginator {
        current_page,
        previous_page,
        next_page,
        total_items,
        items_per_page,
        total_pages,
    })
}
