use ecomap_model::{CategoryId, FacilityQuery, SortDir, SortField};

/// Query and pagination state for one list session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    pub text: String,
    pub category_id: Option<CategoryId>,
    pub sort_field: SortField,
    pub sort_dir: SortDir,
    pub page: u32,
    pub limit: u32,
    pub total_items: u64,
    pub total_pages: Option<u32>,
    pub loaded_items: u64,
    pub has_more: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::with_limit(ecomap_model::query::DEFAULT_PAGE_LIMIT)
    }
}

impl SearchState {
    pub fn with_limit(limit: u32) -> Self {
        Self {
            text: String::new(),
            category_id: None,
            sort_field: SortField::default(),
            sort_dir: SortDir::default(),
            page: 1,
            limit,
            total_items: 0,
            total_pages: None,
            loaded_items: 0,
            has_more: true,
        }
    }

    /// Back to page one with nothing loaded; filters are kept.
    pub fn reset_pagination(&mut self) {
        self.page = 1;
        self.total_items = 0;
        self.total_pages = None;
        self.loaded_items = 0;
        self.has_more = true;
    }

    pub fn query(&self) -> FacilityQuery {
        FacilityQuery {
            page: self.page,
            limit: self.limit,
            text: self.text.trim().to_string(),
            category_id: self.category_id,
            sort_field: self.sort_field,
            sort_dir: self.sort_dir,
        }
    }

    pub(crate) fn recompute_has_more(&mut self) {
        self.has_more = match self.total_pages {
            Some(pages) => self.page < pages,
            None => true,
        };
    }

    /// `"Showing 10 of 12 facilities"`
    pub fn status_line(&self) -> String {
        format!(
            "Showing {} of {} facilities",
            self.loaded_items, self.total_items
        )
    }
}
