//! Unit labels to canonical base units.
//!
//! Recipes and supplier sheets use free-text units ("kg", "Litros", "unidades").
//! Everything is reduced to one of a handful of base units so that prices can be
//! compared per gram, per millilitre or per piece.

pub const GRAM: &str = "g";
pub const MILLILITRE: &str = "ml";
pub const PIECE: &str = "unidad";

/// (label, base unit, factor). Labels are matched after trimming and lower-casing.
const UNIT_TABLE: &[(&str, &str, f64)] = &[
    ("g", GRAM, 1.0),
    ("gramo", GRAM, 1.0),
    ("gramos", GRAM, 1.0),
    ("kg", GRAM, 1000.0),
    ("kilogramo", GRAM, 1000.0),
    ("kilogramos", GRAM, 1000.0),
    ("ml", MILLILITRE, 1.0),
    ("ml.", MILLILITRE, 1.0),
    ("mililitro", MILLILITRE, 1.0),
    ("mililitros", MILLILITRE, 1.0),
    ("l", MILLILITRE, 1000.0),
    ("l.", MILLILITRE, 1000.0),
    ("litro", MILLILITRE, 1000.0),
    ("litros", MILLILITRE, 1000.0),
    ("c", PIECE, 1.0),
    ("unit", PIECE, 1.0),
    ("units", PIECE, 1.0),
    ("unidad", PIECE, 1.0),
    ("unidades", PIECE, 1.0),
];

/// A quantity expressed in its base unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub value: f64,
    pub base_unit: String,
}

/// Converts `quantity` of `unit` into its base unit.
///
/// A missing unit counts as pieces. A label that is not in the table becomes
/// its own base unit with factor 1, so it only compares against the exact same
/// label. This never fails.
pub fn normalize(quantity: f64, unit: Option<&str>) -> Normalized {
    let Some(label) = unit else {
        return Normalized { value: quantity, base_unit: PIECE.to_string() };
    };

    let key = label.trim().to_lowercase();
    match UNIT_TABLE.iter().find(|(name, _, _)| *name == key) {
        Some((_, base, factor)) => Normalized {
            value: quantity * factor,
            base_unit: (*base).to_string(),
        },
        None => Normalized { value: quantity, base_unit: key },
    }
}

/// Price of one base unit of a product pack, if the pack size is usable.
pub fn price_per_base_unit(price: f64, size: f64, dimension: &str) -> Option<(f64, String)> {
    let normalized = normalize(size, Some(dimension));
    if normalized.value > 0.0 {
        Some((price / normalized.value, normalized.base_unit))
    } else {
        None
    }
}
