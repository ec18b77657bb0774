use crate::error::ModelError;
use crate::facility::Facility;
use crate::ids::CategoryId;
use std::fmt;
use std::str::FromStr;

/// Default number of facilities requested per page.
pub const DEFAULT_PAGE_LIMIT: u32 = 5;
/// Hard cap the paginate endpoint applies to `limit`.
pub const MAX_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SortField {
    #[default]
    Id,
    Title,
    Town,
    Postcode,
}

impl SortField {
    pub fn all() -> &'static [SortField] {
        &[
            SortField::Id,
            SortField::Title,
            SortField::Town,
            SortField::Postcode,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Town => "town",
            SortField::Postcode => "postcode",
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            "town" => Ok(SortField::Town),
            "postcode" => Ok(SortField::Postcode),
            _ => Err(ModelError::InvalidSortField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum SortDir {
    #[default]
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "ASC",
            SortDir::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDir {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDir::Asc),
            "DESC" => Ok(SortDir::Desc),
            _ => Err(ModelError::InvalidSortDir(s.to_string())),
        }
    }
}

/// One paginate request as it goes over the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityQuery {
    pub page: u32,
    pub limit: u32,
    pub text: String,
    pub category_id: Option<CategoryId>,
    pub sort_field: SortField,
    pub sort_dir: SortDir,
}

impl Default for FacilityQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_LIMIT,
            text: String::new(),
            category_id: None,
            sort_field: SortField::default(),
            sort_dir: SortDir::default(),
        }
    }
}

impl FacilityQuery {
    /// Query-string pairs for `/api/facilities/paginate`.
    ///
    /// `q` and `category` are left out entirely when empty.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        let text = self.text.trim();
        if !text.is_empty() {
            pairs.push(("q", text.to_string()));
        }
        if let Some(category) = self.category_id {
            pairs.push(("category", category.to_string()));
        }
        pairs.push(("order", self.sort_field.as_str().to_string()));
        pairs.push(("dir", self.sort_dir.as_str().to_string()));
        pairs
    }
}

/// Decoded paginate response.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FacilityPage {
    pub facilities: Vec<Facility>,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::u64_lenient")
    )]
    pub total: u64,
    /// The server computes this with `ceil`, so it may arrive as `3.0`.
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::serde_helpers::u32_lenient")
    )]
    pub pages: u32,
}
