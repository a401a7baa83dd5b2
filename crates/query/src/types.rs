//! Query and result value types.
//!
//! A [`Query`] is built fresh for every search and a [`SearchResult`] is
//! returned fresh from every search; neither carries state between calls.
use std::fmt;
use std::str::FromStr;

use catalog::{parse_measure, Product};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::QueryError;

/// Page size used when the caller does not pick one.
pub const DEFAULT_PAGE_SIZE: i64 = 12;

/// Upper bound (exclusive) of the `small` size class, in inches.
pub const SMALL_MAX_INCHES: f64 = 55.0;
/// Upper bound (inclusive) of the `medium` size class, in inches.
pub const MEDIUM_MAX_INCHES: f64 = 75.0;

/// Inclusive numeric interval. `max: None` is an open upper end (`"3000+"`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    pub fn at_least(min: f64) -> Self {
        Self { min, max: None }
    }

    pub fn exactly(value: f64) -> Self {
        Self::new(value, value)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && self.max.is_none_or(|max| value <= max)
    }

    /// Reject NaN or negative bounds and `min > max`.
    pub fn validate(&self, field: &str) -> Result<(), QueryError> {
        let bad_bound = |v: f64| v.is_nan() || v < 0.0;
        if bad_bound(self.min) || self.max.is_some_and(bad_bound) {
            return Err(QueryError::invalid(format!(
                "{field} range bounds must be non-negative numbers"
            )));
        }
        if let Some(max) = self.max {
            if self.min > max {
                return Err(QueryError::invalid(format!(
                    "{field} range min {} exceeds max {}",
                    self.min, max
                )));
            }
        }
        Ok(())
    }

    /// Parse the select-box syntax: `"1000-2000"`, `"3000+"`, or a single
    /// value such as `"1.25mm"`.
    pub fn parse(text: &str) -> Result<Self, QueryError> {
        let text = text.trim();
        let bound = |part: &str| {
            parse_bound(part)
                .ok_or_else(|| QueryError::invalid(format!("unparseable range {text:?}")))
        };

        let range = if let Some(min) = text.strip_suffix('+') {
            Self::at_least(bound(min)?)
        } else if let Some((min, max)) = text.split_once('-') {
            Self::new(bound(min)?, bound(max)?)
        } else {
            Self::exactly(bound(text)?)
        };
        range.validate("range")?;
        Ok(range)
    }
}

/// Units a range bound may carry after its number.
const BOUND_UNITS: &[&str] = &["", "mm", "nit", "nits", "cd/m2", "cd/m²", "in", "inch", "\""];

/// One side of a range: a number plus at most a known unit.
fn parse_bound(part: &str) -> Option<f64> {
    let part = part.trim();
    if part.contains(['-', '+']) {
        return None;
    }
    let value = parse_measure(part)?;
    let unit = part
        .trim_start_matches('$')
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ',')
        .trim()
        .to_lowercase();
    BOUND_UNITS.contains(&unit.as_str()).then_some(value)
}

impl fmt::Display for NumericRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "{}-{}", self.min, max),
            None => write!(f, "{}+", self.min),
        }
    }
}

/// Coarse size bucket over a product's diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    /// small `< 55"`, medium `55"..=75"`, large `> 75"`.
    pub fn classify(inches: f64) -> Self {
        if inches < SMALL_MAX_INCHES {
            SizeClass::Small
        } else if inches <= MEDIUM_MAX_INCHES {
            SizeClass::Medium
        } else {
            SizeClass::Large
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeClass::Small => "small",
            SizeClass::Medium => "medium",
            SizeClass::Large => "large",
        }
    }
}

impl FromStr for SizeClass {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "small" => Ok(SizeClass::Small),
            "medium" => Ok(SizeClass::Medium),
            "large" => Ok(SizeClass::Large),
            other => Err(QueryError::invalid(format!("unknown size class {other:?}"))),
        }
    }
}

/// Sort key. Unknown keys fall back to [`SortKey::Name`], from parameters
/// and from persisted JSON alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortKey {
    #[default]
    Name,
    Price,
    Category,
    PixelPitch,
    Brightness,
}

impl SortKey {
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "price" => SortKey::Price,
            "category" => SortKey::Category,
            "pixelpitch" | "pixel_pitch" | "pixel-pitch" => SortKey::PixelPitch,
            "brightness" => SortKey::Brightness,
            _ => SortKey::Name,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Price => "price",
            SortKey::Category => "category",
            SortKey::PixelPitch => "pixelPitch",
            SortKey::Brightness => "brightness",
        }
    }
}

impl<'de> Deserialize<'de> for SortKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SortKey::from_param(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    #[serde(alias = "asc")]
    Ascending,
    #[serde(alias = "desc")]
    Descending,
}

impl SortDirection {
    /// `"desc"` (any case) is descending; everything else is ascending.
    pub fn from_param(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "desc" | "descending" => SortDirection::Descending,
            _ => SortDirection::Ascending,
        }
    }
}

/// Structured predicates. Every active filter must pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_pitch: Option<NumericRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<NumericRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<NumericRange>,
    /// Passes when the product carries any of these.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub application: Vec<String>,
    /// Passes only when the product carries all of these.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_class: Option<SizeClass>,
}

impl Filters {
    /// True when at least one predicate is set.
    pub fn is_active(&self) -> bool {
        self.category.is_some()
            || self.pixel_pitch.is_some()
            || self.brightness.is_some()
            || self.price.is_some()
            || !self.application.is_empty()
            || !self.features.is_empty()
            || self.size_class.is_some()
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        let ranges = [
            ("pixelPitch", &self.pixel_pitch),
            ("brightness", &self.brightness),
            ("price", &self.price),
        ];
        for (field, range) in ranges {
            if let Some(range) = range {
                range.validate(field)?;
            }
        }
        Ok(())
    }

    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if product.category != *category {
                return false;
            }
        }

        let in_range =
            |range: &Option<NumericRange>, value: f64| range.is_none_or(|r| r.contains(value));
        if !in_range(&self.pixel_pitch, product.pixel_pitch)
            || !in_range(&self.brightness, product.brightness)
            || !in_range(&self.price, product.price)
        {
            return false;
        }

        if !self.application.is_empty()
            && !self.application.iter().any(|a| product.has_application(a))
        {
            return false;
        }

        if !self.features.iter().all(|f| product.has_feature(f)) {
            return false;
        }

        match self.size_class {
            None => true,
            Some(class) => product
                .size_inches
                .is_some_and(|inches| SizeClass::classify(inches) == class),
        }
    }
}

/// A single search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Query {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub filters: Filters,
    pub sort_key: SortKey,
    pub sort_direction: SortDirection,
    /// 1-based; values below 1 are clamped when searching.
    pub page: i64,
    /// Must be positive.
    pub page_size: i64,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            text: None,
            filters: Filters::default(),
            sort_key: SortKey::default(),
            sort_direction: SortDirection::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Query {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Trimmed, lower-cased search text, or `None` when blank.
    pub fn needle(&self) -> Option<String> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    pub fn validate(&self) -> Result<(), QueryError> {
        if self.page_size <= 0 {
            return Err(QueryError::invalid(format!(
                "page_size must be a positive integer, got {}",
                self.page_size
            )));
        }
        self.filters.validate()
    }
}

/// One page of search output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub items: Vec<Product>,
    /// Matches before pagination.
    pub total_matches: usize,
    /// `ceil(total_matches / page_size)`, 0 when nothing matched.
    pub total_pages: usize,
    /// The clamped page actually served.
    pub page: usize,
}

impl SearchResult {
    pub fn is_empty(&self) -> bool {
        self.total_matches == 0
    }

    /// Pagination control for this result, showing pages within `radius` of
    /// the current one. Hidden (default) when there is at most one page.
    pub fn window(&self, radius: usize) -> PageWindow {
        if self.total_pages <= 1 {
            return PageWindow::default();
        }
        let start = self.page.saturating_sub(radius).max(1);
        let end = (self.page + radius).min(self.total_pages);

        PageWindow {
            previous: (self.page > 1).then(|| self.page - 1),
            next: (self.page < self.total_pages).then(|| self.page + 1),
            pages: (start..=end).collect(),
            first: (start > 1).then_some(1),
            leading_gap: start > 2,
            last: (end < self.total_pages).then_some(self.total_pages),
            trailing_gap: end + 1 < self.total_pages,
        }
    }
}

/// Page links to render around the current page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub previous: Option<usize>,
    pub next: Option<usize>,
    pub pages: Vec<usize>,
    /// Page 1, when it falls outside `pages`.
    pub first: Option<usize>,
    /// Pages are skipped between `first` and `pages`.
    pub leading_gap: bool,
    /// The last page, when it falls outside `pages`.
    pub last: Option<usize>,
    /// Pages are skipped between `pages` and `last`.
    pub trailing_gap: bool,
}

impl PageWindow {
    pub fn is_hidden(&self) -> bool {
        self.pages.is_empty()
    }
}
