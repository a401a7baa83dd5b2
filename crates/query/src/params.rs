//! String parameters as a search form submits them.
//!
//! Front-ends (the CLI, a form handler) collect user input as optional strings.
//! [`QueryParams`] turns them into a typed [`Query`], lenient where the engine
//! is lenient (sort key, direction) and strict where it is strict (ranges,
//! page size).
use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::types::{
    Filters, NumericRange, Query, SizeClass, SortDirection, SortKey, DEFAULT_PAGE_SIZE,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryParams {
    pub q: Option<String>,
    pub category: Option<String>,
    /// `"1-2"`, `"3+"`, or a single pitch such as `"1.25mm"`.
    pub pixel_pitch: Option<String>,
    pub brightness: Option<String>,
    pub price: Option<String>,
    /// Comma-separated; any may match.
    pub application: Option<String>,
    /// Comma-separated; all must match.
    pub features: Option<String>,
    pub size: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_range(field: &str, value: &Option<String>) -> Result<Option<NumericRange>, QueryError> {
    non_blank(value)
        .map(|v| {
            NumericRange::parse(v)
                .map_err(|err| QueryError::invalid(format!("{field}: {err}")))
        })
        .transpose()
}

fn parse_list(value: &Option<String>) -> Vec<String> {
    non_blank(value)
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

impl QueryParams {
    /// Build a query, falling back to `default_page_size` when none was given.
    pub fn into_query(self, default_page_size: i64) -> Result<Query, QueryError> {
        let page = match non_blank(&self.page) {
            None => 1,
            Some(v) => v
                .parse::<i64>()
                .map_err(|_| QueryError::invalid(format!("page must be an integer, got {v:?}")))?,
        };

        let page_size = match non_blank(&self.page_size) {
            None => default_page_size,
            Some(v) => v.parse::<i64>().map_err(|_| {
                QueryError::invalid(format!("page_size must be a positive integer, got {v:?}"))
            })?,
        };
        if page_size <= 0 {
            return Err(QueryError::invalid(format!(
                "page_size must be a positive integer, got {page_size}"
            )));
        }

        let filters = Filters {
            category: non_blank(&self.category).map(str::to_string),
            pixel_pitch: parse_range("pixel_pitch", &self.pixel_pitch)?,
            brightness: parse_range("brightness", &self.brightness)?,
            price: parse_range("price", &self.price)?,
            application: parse_list(&self.application),
            features: parse_list(&self.features),
            size_class: non_blank(&self.size).map(str::parse::<SizeClass>).transpose()?,
        };

        Ok(Query {
            text: non_blank(&self.q).map(str::to_string),
            filters,
            sort_key: non_blank(&self.sort).map(SortKey::from_param).unwrap_or_default(),
            sort_direction: non_blank(&self.order)
                .map(SortDirection::from_param)
                .unwrap_or_default(),
            page,
            page_size,
        })
    }
}

impl TryFrom<QueryParams> for Query {
    type Error = QueryError;

    fn try_from(params: QueryParams) -> Result<Self, Self::Error> {
        params.into_query(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> QueryParams {
        QueryParams::default()
    }

    #[test]
    fn empty_params_give_the_default_query() {
        assert_eq!(Query::try_from(params()), Ok(Query::default()));
    }

    #[test]
    fn full_params_are_parsed() {
        let query = Query::try_from(QueryParams {
            q: Some("  outdoor ".into()),
            category: Some("Outdoor".into()),
            price: Some("0-1000".into()),
            brightness: Some("5000+".into()),
            application: Some("Stadium, Billboard,".into()),
            features: Some("High Brightness".into()),
            size: Some("large".into()),
            sort: Some("price".into()),
            order: Some("desc".into()),
            page: Some("2".into()),
            page_size: Some("5".into()),
            ..params()
        })
        .expect("params parse");

        assert_eq!(query.text.as_deref(), Some("outdoor"));
        assert_eq!(query.filters.category.as_deref(), Some("Outdoor"));
        assert_eq!(query.filters.price, Some(NumericRange::new(0.0, 1000.0)));
        assert_eq!(query.filters.brightness, Some(NumericRange::at_least(5000.0)));
        assert_eq!(query.filters.application, vec!["Stadium", "Billboard"]);
        assert_eq!(query.filters.features, vec!["High Brightness"]);
        assert_eq!(query.filters.size_class, Some(SizeClass::Large));
        assert_eq!(query.sort_key, SortKey::Price);
        assert_eq!(query.sort_direction, SortDirection::Descending);
        assert_eq!((query.page, query.page_size), (2, 5));
    }

    #[test]
    fn unknown_sort_and_order_fall_back() {
        let query = Query::try_from(QueryParams {
            sort: Some("popularity".into()),
            order: Some("random".into()),
            ..params()
        })
        .expect("lenient");
        assert_eq!(query.sort_key, SortKey::Name);
        assert_eq!(query.sort_direction, SortDirection::Ascending);
    }

    #[test]
    fn bad_page_sizes_are_rejected() {
        for bad in ["2.5", "0", "-3", "twelve"] {
            let result = Query::try_from(QueryParams {
                page_size: Some(bad.into()),
                ..params()
            });
            assert!(
                matches!(result, Err(QueryError::InvalidQuery(_))),
                "page_size {bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn low_pages_are_kept_for_clamping() {
        let query = Query::try_from(QueryParams {
            page: Some("-4".into()),
            ..params()
        })
        .expect("page below one is not an error");
        assert_eq!(query.page, -4);
    }

    #[test]
    fn inverted_range_and_unknown_size_are_rejected() {
        let inverted = Query::try_from(QueryParams {
            price: Some("5000-1000".into()),
            ..params()
        });
        assert!(inverted.is_err());

        let size = Query::try_from(QueryParams {
            size: Some("gigantic".into()),
            ..params()
        });
        assert!(size.is_err());
    }

    #[test]
    fn default_page_size_applies_only_when_missing() {
        let query = params().into_query(24).expect("defaults");
        assert_eq!(query.page_size, 24);
    }
}
