use serde::Serialize;

/// Page arithmetic for offset/limit listings.
///
/// `page` is 1-based and derived from `skip / limit`; a `limit` of zero is
/// treated as a single page.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct PageWindow {
    /// Current page number (1-based).
    #[schema(example = 1)]
    pub page: u64,
    /// Requested page size (the `limit` parameter).
    #[schema(example = 100)]
    pub page_size: u64,
    /// Total number of pages for the filtered result set.
    #[schema(example = 3)]
    pub total_pages: u64,
}

impl PageWindow {
    pub fn new(total: u64, skip: u64, limit: u64) -> Self {
        if limit == 0 {
            return Self {
                page: 1,
                page_size: 0,
                total_pages: 1,
            };
        }
        Self {
            page: (skip / limit).saturating_add(1),
            page_size: limit,
            total_pages: total.div_ceil(limit),
        }
    }
}
