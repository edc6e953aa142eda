//! One page of query results plus pagination metadata.

use serde::Serialize;

use crate::query::QueryParams;

/// A page of items. All metadata is derived from the total count and the
/// request, never from the content length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub page_number: u32,
    pub page_size: u32,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PageResult<T> {
    /// Wrap an already-sliced page of `content` out of `total_elements`.
    pub fn new(content: Vec<T>, total_elements: u64, params: &QueryParams) -> Self {
        let page_size = params.size();
        let total_pages = total_elements.div_ceil(u64::from(page_size));
        let page_number = params.page();

        Self {
            content,
            total_elements,
            page_number,
            page_size,
            total_pages,
            has_next: u64::from(page_number) + 1 < total_pages,
            has_previous: page_number > 0,
        }
    }

    /// Slice a fully sorted sequence down to the requested page.
    ///
    /// An offset at or past the end yields an empty page with the
    /// pre-pagination total still reported.
    pub fn paginate(items: Vec<T>, params: &QueryParams) -> Self {
        let total = items.len();
        let start = usize::try_from(params.offset()).unwrap_or(usize::MAX);
        let content = if start >= total {
            Vec::new()
        } else {
            let end = start.saturating_add(params.limit() as usize).min(total);
            items.into_iter().skip(start).take(end - start).collect()
        };

        Self::new(content, total as u64, params)
    }

    /// An empty page for `params`.
    pub fn empty(params: &QueryParams) -> Self {
        Self::new(Vec::new(), 0, params)
    }
}
