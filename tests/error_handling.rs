use ledcat::{
    Catalog, CatalogConfig, CatalogError, CatalogService, ConfigLoadError, LedcatConfig,
    QueryParams, ServiceError, fixtures,
};

fn service() -> CatalogService {
    CatalogService::new(fixtures::canonical_catalog())
}

#[test]
fn inverted_price_range_is_an_invalid_query() {
    let params = QueryParams {
        price: Some("5000-1000".into()),
        ..QueryParams::default()
    };
    let err = service().search_params(params).unwrap_err();
    assert!(matches!(err, ServiceError::Query(_)));
    assert_eq!(err.http_status_code(), 400);
}

#[test]
fn fractional_page_size_is_an_invalid_query() {
    let params = QueryParams {
        page_size: Some("2.5".into()),
        ..QueryParams::default()
    };
    assert!(service().search_params(params).is_err());
}

#[test]
fn unknown_sort_key_falls_back_to_name() {
    let params = QueryParams {
        sort: Some("popularity".into()),
        ..QueryParams::default()
    };
    let result = service().search_params(params).expect("lenient sort");
    let names: Vec<&str> = result.items.iter().map(|p| p.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort_by_key(|n| n.to_lowercase());
    assert_eq!(names, sorted);
}

#[test]
fn catalog_with_bad_measurement_is_rejected() {
    let json = r#"[{"id": "p9", "name": "P9", "brightness": "blinding"}]"#;
    let err = Catalog::from_json_str(json, &CatalogConfig::default()).unwrap_err();
    assert!(matches!(
        err,
        CatalogError::InvalidField {
            field: "brightness",
            ..
        }
    ));
    assert_eq!(ServiceError::from(err).http_status_code(), 422);
}

#[test]
fn catalog_with_duplicate_ids_is_rejected() {
    let json = r#"[{"id": 1, "name": "A"}, {"id": "1", "name": "B"}]"#;
    let err = Catalog::from_json_str(json, &CatalogConfig::default()).unwrap_err();
    assert_eq!(err, CatalogError::DuplicateId("1".into()));
}

#[test]
fn service_from_config_reports_missing_catalog_file() {
    let cfg = LedcatConfig::from_yaml(
        "version: \"1.0\"\ncatalog:\n  path: \"/nonexistent/products.json\"\n",
    )
    .expect("valid yaml");
    assert!(CatalogService::from_config(&cfg).is_err());
}

#[test]
fn config_with_unknown_version_is_rejected() {
    assert!(matches!(
        LedcatConfig::from_yaml("version: \"9\"\n"),
        Err(ConfigLoadError::UnsupportedVersion(_))
    ));
}
