//! Field normalization for raw product records.
//!
//! Source data mixes representations for the same quantity: `1.25` and
//! `"1.25mm"`, `800` and `"800 nits"`, `"500x500mm"` and `"55-inch"`. The
//! canonical schema is numeric, so everything is resolved here, once, at
//! ingestion time.
//!
//! ```text
//! "1.25mm"    -> 1.25
//! "6,500 nits"-> 6500.0
//! "$2,500"    -> 2500.0
//! "55-inch"   -> size_inches = 55.0
//! "500x500mm" -> size_inches = sqrt(500² + 500²) / 25.4 ≈ 27.8
//! ```
use uuid::Uuid;

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::types::RawNumber;

const MM_PER_INCH: f64 = 25.4;

/// Resolve a raw measurement into a finite, non-negative number.
///
/// Missing values resolve to `0.0`.
pub(crate) fn normalize_measure(
    id: &str,
    field: &'static str,
    value: Option<RawNumber>,
) -> Result<f64, CatalogError> {
    let invalid = |value: String| CatalogError::InvalidField {
        id: id.to_string(),
        field,
        value,
    };

    let parsed = match value {
        None => return Ok(0.0),
        Some(RawNumber::Number(n)) => Some(n).filter(|n| n.is_finite() && *n >= 0.0),
        Some(RawNumber::Text(ref text)) => parse_measure(text),
    };

    match (parsed, value) {
        (Some(n), _) => Ok(n),
        (None, Some(RawNumber::Text(text))) => Err(invalid(text)),
        (None, Some(RawNumber::Number(n))) => Err(invalid(n.to_string())),
        (None, None) => Ok(0.0),
    }
}

/// Parse the leading number of a unit-suffixed string.
///
/// A leading `$` and thousands separators are ignored. Returns `None` when the
/// string does not start with a digit or the number is malformed.
pub fn parse_measure(text: &str) -> Option<f64> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    let cleaned = cleaned.trim_start();
    let end = cleaned
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.'))
        .map(|(idx, _)| idx)
        .unwrap_or(cleaned.len());
    if end == 0 {
        return None;
    }
    cleaned[..end]
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
}

/// Parse a size string into a diagonal in inches.
///
/// Recognized forms: `"55-inch"`, `"55 inch"`, `"55in"`, `55"`, and
/// `"<w>x<h>"` with an `mm` (default), `cm`, `m`, or `in` suffix.
pub fn parse_size_inches(size: &str) -> Option<f64> {
    let lowered = size.trim().to_lowercase();
    if lowered.is_empty() {
        return None;
    }

    let dimensions = lowered
        .split_once('x')
        .filter(|(w, h)| starts_with_digit(w) && starts_with_digit(h));
    if let Some((width, height)) = dimensions {
        let (w, w_unit) = split_unit(width)?;
        let (h, h_unit) = split_unit(height)?;
        let h_scale = mm_per_unit(h_unit)?;
        // "500x500mm": a bare width takes the height's unit.
        let w_scale = if w_unit.is_empty() {
            h_scale
        } else {
            mm_per_unit(w_unit)?
        };
        let (w_mm, h_mm) = (w * w_scale, h * h_scale);
        return Some((w_mm * w_mm + h_mm * h_mm).sqrt() / MM_PER_INCH);
    }

    let is_inches = lowered.contains("inch") || lowered.ends_with("in") || lowered.ends_with('"');
    if is_inches {
        parse_measure(&lowered)
    } else {
        None
    }
}

fn starts_with_digit(part: &str) -> bool {
    part.trim_start().starts_with(|c: char| c.is_ascii_digit())
}

/// Split `"1.5 m"` into `(1.5, "m")`.
fn split_unit(part: &str) -> Option<(f64, &str)> {
    let part = part.trim();
    let value = parse_measure(part)?;
    let unit = part
        .trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ',')
        .trim();
    Some((value, unit))
}

fn mm_per_unit(unit: &str) -> Option<f64> {
    match unit {
        "" | "mm" => Some(1.0),
        "cm" => Some(10.0),
        "m" => Some(1000.0),
        "in" | "inch" | "\"" => Some(MM_PER_INCH),
        _ => None,
    }
}

/// Trim a string and optionally strip control characters.
pub(crate) fn sanitize(value: String, strip_control: bool) -> String {
    let filtered = if strip_control {
        value.chars().filter(|c| !c.is_control()).collect::<String>()
    } else {
        value
    };
    filtered.trim().to_string()
}

/// Sanitize a list of tags, dropping entries that end up empty.
pub(crate) fn sanitize_tags(values: Option<Vec<String>>, strip_control: bool) -> Vec<String> {
    values
        .unwrap_or_default()
        .into_iter()
        .map(|tag| sanitize(tag, strip_control))
        .filter(|tag| !tag.is_empty())
        .collect()
}

/// Derive a deterministic product id from its name.
pub(crate) fn derive_product_id(cfg: &CatalogConfig, name: &str) -> String {
    Uuid::new_v5(&cfg.id_namespace, name.as_bytes()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_measure_strips_units_and_separators() {
        assert_eq!(parse_measure("1.25mm"), Some(1.25));
        assert_eq!(parse_measure("800 nits"), Some(800.0));
        assert_eq!(parse_measure("6,500 nits"), Some(6500.0));
        assert_eq!(parse_measure("$2,500"), Some(2500.0));
        assert_eq!(parse_measure("  10.0mm "), Some(10.0));
    }

    #[test]
    fn parse_measure_rejects_garbage() {
        assert_eq!(parse_measure("bright"), None);
        assert_eq!(parse_measure("-5mm"), None);
        assert_eq!(parse_measure("1.2.3"), None);
        assert_eq!(parse_measure(""), None);
    }

    #[test]
    fn normalize_measure_defaults_missing_to_zero() {
        assert_eq!(normalize_measure("p", "price", None), Ok(0.0));
    }

    #[test]
    fn normalize_measure_rejects_negative_numbers() {
        let err = normalize_measure("p", "price", Some(RawNumber::Number(-1.0)))
            .expect_err("negative price rejected");
        assert!(matches!(err, CatalogError::InvalidField { field: "price", .. }));
    }

    #[test]
    fn inch_sizes_parse_directly() {
        assert_eq!(parse_size_inches("55-inch"), Some(55.0));
        assert_eq!(parse_size_inches("75 inch"), Some(75.0));
        assert_eq!(parse_size_inches("85in"), Some(85.0));
        assert_eq!(parse_size_inches("60\""), Some(60.0));
    }

    #[test]
    fn dimension_sizes_use_the_diagonal() {
        let inches = parse_size_inches("500x500mm").expect("mm size parses");
        assert!((inches - 27.84).abs() < 0.01, "got {inches}");

        let metres = parse_size_inches("3x4m").expect("metre size parses");
        assert!((metres - 196.85).abs() < 0.01, "got {metres}");
    }

    #[test]
    fn each_dimension_keeps_its_own_unit() {
        let mixed = parse_size_inches("1.5m x 1000mm").expect("mixed units parse");
        let same = parse_size_inches("1500x1000mm").expect("mm size parses");
        assert!((mixed - same).abs() < 1e-9, "{mixed} vs {same}");
        assert!((mixed - 70.97).abs() < 0.01, "got {mixed}");
    }

    #[test]
    fn an_x_in_trailing_text_is_not_a_dimension() {
        assert_eq!(parse_size_inches("55-inch flex"), Some(55.0));
        assert_eq!(parse_size_inches("65 inch matrix"), Some(65.0));
    }

    #[test]
    fn unrecognized_sizes_yield_none() {
        assert_eq!(parse_size_inches(""), None);
        assert_eq!(parse_size_inches("large"), None);
        assert_eq!(parse_size_inches("500x500furlongs"), None);
    }

    #[test]
    fn derived_ids_are_deterministic() {
        let cfg = CatalogConfig::default();
        let a = derive_product_id(&cfg, "Transparent LED Display");
        let b = derive_product_id(&cfg, "Transparent LED Display");
        let c = derive_product_id(&cfg, "P6 Outdoor LED Display");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn sanitize_strips_control_characters() {
        assert_eq!(sanitize(" p4\u{0007}-outdoor\n".into(), true), "p4-outdoor");
        assert_eq!(
            sanitize_tags(Some(vec!["Indoor".into(), "  ".into()]), true),
            vec!["Indoor".to_string()]
        );
    }
}
