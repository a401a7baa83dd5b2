//! The six canonical products shown on the marketing site.
//!
//! Used as the default catalog by the CLI and as the shared fixture for tests
//! and benchmarks. Order matters: it is the catalog's natural order and the
//! tie-break for equal sort keys.
use std::collections::BTreeMap;

use crate::normalize::parse_size_inches;
use crate::types::Product;
use crate::Catalog;

struct Fixture {
    id: &'static str,
    name: &'static str,
    category: &'static str,
    pixel_pitch: f64,
    brightness: f64,
    price: f64,
    application: [&'static str; 3],
    features: [&'static str; 3],
    resolution: &'static str,
    size: &'static str,
    description: &'static str,
    viewing_angle: &'static str,
    refresh_rate: &'static str,
    power: &'static str,
    operating_temp: &'static str,
}

const CANONICAL: [Fixture; 6] = [
    Fixture {
        id: "p125-fine-pitch",
        name: "P1.25 Fine Pitch LED Display",
        category: "Fine Pitch",
        pixel_pitch: 1.25,
        brightness: 800.0,
        price: 2500.0,
        application: ["Indoor", "Control Room", "Broadcast"],
        features: ["High Resolution", "Low Power", "Seamless"],
        resolution: "1920x1080",
        size: "500x500mm",
        description: "Ultra-high resolution indoor LED display perfect for control rooms",
        viewing_angle: "160°",
        refresh_rate: "3840Hz",
        power: "180W/m²",
        operating_temp: "-20°C to +60°C",
    },
    Fixture {
        id: "p156-fine-pitch",
        name: "P1.56 Fine Pitch LED Display",
        category: "Fine Pitch",
        pixel_pitch: 1.56,
        brightness: 900.0,
        price: 2000.0,
        application: ["Indoor", "Meeting Room", "Retail"],
        features: ["Cost Effective", "High Brightness", "Easy Install"],
        resolution: "1920x1080",
        size: "500x500mm",
        description: "Cost-effective fine pitch LED for meeting rooms and retail",
        viewing_angle: "160°",
        refresh_rate: "3840Hz",
        power: "200W/m²",
        operating_temp: "-20°C to +60°C",
    },
    Fixture {
        id: "p4-outdoor",
        name: "P4 Outdoor LED Display",
        category: "Outdoor",
        pixel_pitch: 4.0,
        brightness: 6000.0,
        price: 800.0,
        application: ["Outdoor", "Advertising", "Stadium"],
        features: ["Weather Resistant", "High Brightness", "Wide Viewing"],
        resolution: "1920x1080",
        size: "960x960mm",
        description: "Weather-resistant outdoor LED display for advertising",
        viewing_angle: "140°",
        refresh_rate: "1920Hz",
        power: "400W/m²",
        operating_temp: "-40°C to +80°C",
    },
    Fixture {
        id: "p6-outdoor",
        name: "P6 Outdoor LED Display",
        category: "Outdoor",
        pixel_pitch: 6.0,
        brightness: 6500.0,
        price: 600.0,
        application: ["Outdoor", "Billboard", "Sports"],
        features: ["Cost Effective", "High Brightness", "Durable"],
        resolution: "1280x720",
        size: "960x960mm",
        description: "Cost-effective outdoor LED for large displays",
        viewing_angle: "140°",
        refresh_rate: "1920Hz",
        power: "350W/m²",
        operating_temp: "-40°C to +80°C",
    },
    Fixture {
        id: "p3-rental",
        name: "P3 Rental LED Display",
        category: "Rental",
        pixel_pitch: 3.0,
        brightness: 4500.0,
        price: 1200.0,
        application: ["Events", "Concerts", "Exhibitions"],
        features: ["Lightweight", "Quick Setup", "Portable"],
        resolution: "1920x1080",
        size: "500x500mm",
        description: "Lightweight rental LED panel for events and concerts",
        viewing_angle: "160°",
        refresh_rate: "3840Hz",
        power: "300W/m²",
        operating_temp: "-20°C to +60°C",
    },
    Fixture {
        id: "transparent-led",
        name: "Transparent LED Display",
        category: "Transparent",
        pixel_pitch: 10.0,
        brightness: 4000.0,
        price: 3000.0,
        application: ["Retail", "Glass Wall", "Architecture"],
        features: ["See-through", "Architectural", "Energy Efficient"],
        resolution: "1920x1080",
        size: "1000x500mm",
        description: "See-through LED display for retail windows and architecture",
        viewing_angle: "140°",
        refresh_rate: "1920Hz",
        power: "250W/m²",
        operating_temp: "-20°C to +60°C",
    },
];

fn build(fixture: &Fixture) -> Product {
    let specifications = BTreeMap::from([
        ("pixelPitch".to_string(), format!("{}mm", fixture.pixel_pitch)),
        ("brightness".to_string(), format!("{} nits", fixture.brightness)),
        ("viewingAngle".to_string(), fixture.viewing_angle.to_string()),
        ("refreshRate".to_string(), fixture.refresh_rate.to_string()),
        ("powerConsumption".to_string(), fixture.power.to_string()),
        ("operatingTemp".to_string(), fixture.operating_temp.to_string()),
    ]);

    Product {
        id: fixture.id.into(),
        name: fixture.name.to_string(),
        category: fixture.category.to_string(),
        pixel_pitch: fixture.pixel_pitch,
        brightness: fixture.brightness,
        price: fixture.price,
        application: fixture.application.iter().map(|s| s.to_string()).collect(),
        features: fixture.features.iter().map(|s| s.to_string()).collect(),
        resolution: fixture.resolution.to_string(),
        size: fixture.size.to_string(),
        size_inches: parse_size_inches(fixture.size),
        description: fixture.description.to_string(),
        specifications,
    }
}

/// The canonical products in catalog order.
pub fn canonical_products() -> Vec<Product> {
    CANONICAL.iter().map(build).collect()
}

/// The canonical products wrapped in a [`Catalog`].
pub fn canonical_catalog() -> Catalog {
    Catalog::from_trusted(canonical_products())
}
