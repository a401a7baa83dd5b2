use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use ledcat::{
    CatalogService, Filters, NumericRange, Product, ProductId, Query, QueryParams, SortDirection,
    SortKey, fixtures, search,
};

const CATALOG_SIZE: usize = 2_000;

/// Fixture products repeated with fresh ids and jittered prices.
fn synthesized_catalog() -> Vec<Product> {
    let base = fixtures::canonical_products();
    (0..CATALOG_SIZE)
        .map(|idx| {
            let mut product = base[idx % base.len()].clone();
            product.id = ProductId::new(format!("bench-{idx:05}"));
            product.name = format!("{} {}", product.name, idx / base.len());
            product.price += (idx % 97) as f64;
            product
        })
        .collect()
}

fn text_search_bench(c: &mut Criterion) {
    let products = synthesized_catalog();
    let query = Query::text("outdoor");
    c.bench_function("search_text_2000", |b| {
        b.iter(|| {
            let result = search(black_box(&products), black_box(&query)).expect("bench search");
            black_box(result);
        });
    });
}

fn filtered_sort_bench(c: &mut Criterion) {
    let products = synthesized_catalog();
    let query = Query {
        filters: Filters {
            brightness: Some(NumericRange::at_least(1000.0)),
            features: vec!["High Brightness".into()],
            ..Filters::default()
        },
        sort_key: SortKey::Price,
        sort_direction: SortDirection::Descending,
        page: 3,
        ..Query::default()
    };
    c.bench_function("search_filtered_price_desc_2000", |b| {
        b.iter(|| {
            let result = search(black_box(&products), black_box(&query)).expect("bench search");
            black_box(result);
        });
    });
}

fn service_params_bench(c: &mut Criterion) {
    let catalog = ledcat::Catalog::from_products(synthesized_catalog(), &Default::default())
        .expect("bench catalog");
    let service = CatalogService::new(catalog);
    c.bench_function("service_search_params_2000", |b| {
        b.iter(|| {
            let params = QueryParams {
                q: Some("led".into()),
                price: Some("1000-2000".into()),
                sort: Some("name".into()),
                ..QueryParams::default()
            };
            let result = service.search_params(black_box(params)).expect("bench params");
            black_box(result);
        });
    });
}

criterion_group!(
    search_benches,
    text_search_bench,
    filtered_sort_bench,
    service_params_bench
);
criterion_main!(search_benches);
