/// Validated pagination request. `limit` is always at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based; values below 1 select nothing
    pub page: i64,
    pub limit: u32,
}

/// One page window plus the pre-slice totals
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: i64,
    pub limit: u32,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }
}

/// Slice `[(page-1)*limit, page*limit)` out of `items`, clamped to bounds.
///
/// Pages outside `1..=total_pages` yield an empty window.
pub fn paginate<T>(items: Vec<T>, request: PageRequest) -> Page<T> {
    let total = items.len();
    let limit = request.limit.max(1) as usize;
    let total_pages = total.div_ceil(limit);

    let start = if request.page >= 1 {
        usize::try_from(request.page - 1)
            .ok()
            .and_then(|index| index.checked_mul(limit))
    } else {
        None
    };
    let window = start
        .filter(|&start| start < total)
        .map(|start| start..total.min(start.saturating_add(limit)));

    let items = match window {
        Some(range) => items
            .into_iter()
            .skip(range.start)
            .take(range.len())
            .collect(),
        None => Vec::new(),
    };

    Page {
        items,
        total,
        page: request.page,
        limit: request.limit,
        total_pages,
    }
}
