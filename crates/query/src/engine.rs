use std::cmp::Ordering;
use std::time::Instant;

use catalog::Product;
use tracing::debug;

use crate::error::QueryError;
use crate::types::{Query, SearchResult, SortDirection, SortKey};


/// Filter, sort, and paginate `catalog` according to `query`.
///
/// Pure: the catalog is never modified and equal inputs give equal results.
/// Catalog order is the tie-break for equal sort keys in either direction.
pub fn search(catalog: &[Product], query: &Query) -> Result<SearchResult, QueryError> {
    let start = Instant::now();
    query.validate()?;
    let page_size = usize::try_from(query.page_size)
        .map_err(|_| QueryError::invalid("page_size does not fit in memory"))?;

    let needle = query.needle();
    let mut matches: Vec<&Product> = catalog
        .iter()
        .filter(|product| matches_text(product, needle.as_deref()))
        .filter(|product| query.filters.matches(product))
        .collect();

    sort_products(&mut matches, query.sort_key, query.sort_direction);

    let total_matches = matches.len();
    let total_pages = total_matches.div_ceil(page_size);
    let last_page = i64::try_from(total_pages.max(1)).unwrap_or(i64::MAX);
    // In range [1, max(1, total_pages)], so the conversion cannot fail.
    let page = usize::try_from(query.page.clamp(1, last_page)).unwrap_or(1);

    let offset = (page - 1).saturating_mul(page_size);
    let items: Vec<Product> = matches
        .into_iter()
        .skip(offset)
        .take(page_size)
        .cloned()
        .collect();

    debug!(
        catalog_size = catalog.len(),
        total_matches,
        total_pages,
        page,
        returned = items.len(),
        elapsed_micros = start.elapsed().as_micros() as u64,
        "search_complete"
    );

    Ok(SearchResult {
        items,
        total_matches,
        total_pages,
        page,
    })
}

fn matches_text(product: &Product, needle: Option<&str>) -> bool {
    match needle {
        None => true,
        Some(needle) => product.search_text().contains(needle),
    }
}

/// Stable sort; descending reverses only the key comparison.
fn sort_products(products: &mut [&Product], key: SortKey, direction: SortDirection) {
    products.sort_by(|a, b| {
        let ord = compare_by_key(a, b, key);
        match direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
}

fn compare_by_key(a: &Product, b: &Product, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a
            .name
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.name.chars().flat_map(char::to_lowercase)),
        SortKey::Category => a.category.cmp(&b.category),
        SortKey::Price => a.price.total_cmp(&b.price),
        SortKey::PixelPitch => a.pixel_pitch.total_cmp(&b.pixel_pitch),
        SortKey::Brightness => a.brightness.total_cmp(&b.brightness),
    }
}
