use std::io::Write;

use catalog::Product;

use crate::error::SessionError;

pub const CSV_HEADERS: [&str; 7] = [
    "Name",
    "Category",
    "Pixel Pitch",
    "Brightness",
    "Price",
    "Size",
    "Features",
];

/// Write products as CSV, one row per product, features joined with `", "`.
pub fn export_csv<'a, W, I>(products: I, writer: W) -> Result<(), SessionError>
where
    W: Write,
    I: IntoIterator<Item = &'a Product>,
{
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(CSV_HEADERS)?;
    for product in products {
        csv.write_record([
            product.name.clone(),
            product.category.clone(),
            product.pixel_pitch.to_string(),
            product.brightness.to_string(),
            product.price.to_string(),
            product.size.clone(),
            product.features.join(", "),
        ])?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::fixtures::canonical_products;

    #[test]
    fn export_writes_header_and_quoted_features() {
        let products = canonical_products();
        let mut out = Vec::new();
        export_csv(products.iter().take(1), &mut out).expect("export");
        let text = String::from_utf8(out).expect("utf8");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("Name,Category,Pixel Pitch,Brightness,Price,Size,Features")
        );
        assert_eq!(
            lines.next(),
            Some(
                "P1.25 Fine Pitch LED Display,Fine Pitch,1.25,800,2500,500x500mm,\"High Resolution, Low Power, Seamless\""
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn empty_export_is_just_the_header() {
        let mut out = Vec::new();
        export_csv(std::iter::empty(), &mut out).expect("export");
        let text = String::from_utf8(out).expect("utf8");
        assert_eq!(
            text.lines().collect::<Vec<_>>(),
            vec!["Name,Category,Pixel Pitch,Brightness,Price,Size,Features"]
        );
    }
}
