//! Bulk product import from supplier price sheets (CSV, ODS, XLSX).
//!
//! The first row names the columns. Every data row is validated on its own;
//! a bad row is reported with its line number and never aborts the batch.

mod delimited;
mod spreadsheet;

pub use delimited::parse_csv;
pub use spreadsheet::parse_spreadsheet;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::clients::ProductClient;
use crate::domain::{ProductCreate, Quality, User};

pub const REQUIRED_COLUMNS: [&str; 4] = ["name", "size", "dimension", "price"];

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
    #[error("The sheet has no header row")]
    EmptySheet,
    #[error("Unsupported file type: {0}")]
    UnsupportedFormat(String),
}

/// A data row that could not be turned into a product.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line in the source file, header included.
    pub line: usize,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportedRow {
    pub line: usize,
    pub product: ProductCreate,
}

#[derive(Debug, Default)]
pub struct ImportBatch {
    pub rows: Vec<ImportedRow>,
    pub rejected: Vec<RowError>,
}

/// Result of pushing a batch into the product store.
#[derive(Debug, Default)]
pub struct ImportOutcome {
    pub created: Vec<String>,
    pub rejected: Vec<RowError>,
}

/// Parses `path`, picking the reader from the file extension.
pub fn load_file(path: &Path, supplier: &User) -> Result<ImportBatch, ImportError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).map_err(csv::Error::from)?;
            parse_csv(file, supplier)
        }
        "ods" | "xlsx" | "xls" => parse_spreadsheet(path, supplier),
        other => Err(ImportError::UnsupportedFormat(other.to_string())),
    }
}

/// Creates every valid row of `batch`. Rows the store rejects are added to the
/// outcome's rejections alongside the ones that failed parsing.
#[instrument(skip(client, batch), fields(rows = batch.rows.len(), rejected = batch.rejected.len()))]
pub async fn import_products(client: &ProductClient, batch: ImportBatch) -> ImportOutcome {
    let mut outcome = ImportOutcome { created: Vec::new(), rejected: batch.rejected };

    for row in batch.rows {
        match client.create_product(row.product).await {
            Ok(id) => outcome.created.push(id),
            Err(e) => {
                warn!(line = row.line, error = %e, "Row rejected by product store");
                outcome.rejected.push(RowError { line: row.line, reason: e.to_string() });
            }
        }
    }

    info!(created = outcome.created.len(), rejected = outcome.rejected.len(), "Import finished");
    outcome
}

/// Lower-cases a header and drops separators, so `deliveryDays`,
/// `delivery_days` and `Delivery Days` are the same column.
fn column_key(header: &str) -> String {
    header
        .chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Header positions keyed by [`column_key`].
struct Columns {
    index: HashMap<String, usize>,
}

impl Columns {
    fn new<'a>(headers: impl IntoIterator<Item = &'a str>) -> Result<Self, ImportError> {
        let index: HashMap<String, usize> = headers
            .into_iter()
            .enumerate()
            .map(|(i, h)| (column_key(h), i))
            .collect();
        for column in REQUIRED_COLUMNS {
            if !index.contains_key(column) {
                return Err(ImportError::MissingColumn(column));
            }
        }
        Ok(Self { index })
    }

    fn get<'a>(&self, cells: &'a [String], column: &str) -> &'a str {
        self.index
            .get(column)
            .and_then(|&i| cells.get(i))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    /// Turns one row of cell texts into a product payload for `supplier`.
    fn product(&self, cells: &[String], supplier: &User) -> Result<ProductCreate, String> {
        let name = self.get(cells, "name");
        if name.is_empty() {
            return Err("name is empty".to_string());
        }
        let dimension = self.get(cells, "dimension");
        if dimension.is_empty() {
            return Err("dimension is empty".to_string());
        }

        let size = parse_number(self.get(cells, "size")).ok_or("size is not a number")?;
        let price = parse_number(self.get(cells, "price")).ok_or("price is not a number")?;

        let quality = match self.get(cells, "quality") {
            "" => Quality::Medium,
            label => label.parse()?,
        };
        let delivery_days = match self.get(cells, "deliverydays") {
            "" => 1,
            days => days
                .parse::<u32>()
                .map_err(|_| format!("delivery days '{}' is not a whole number", days))?,
        };
        let in_stock = match self.get(cells, "instock") {
            "" => true,
            flag => parse_flag(flag).ok_or_else(|| format!("in stock '{}' is not yes/no", flag))?,
        };

        Ok(ProductCreate {
            name: name.to_string(),
            brand: self.get(cells, "brand").to_string(),
            category: self.get(cells, "category").to_string(),
            size,
            dimension: dimension.to_string(),
            price,
            quality,
            delivery_days,
            supplier_id: supplier.id.clone(),
            supplier_name: supplier.business_name.clone(),
            in_stock,
        })
    }
}

/// Collects parsed `(line, cells)` rows.
fn collect_rows(columns: &Columns, rows: impl Iterator<Item = (usize, Vec<String>)>, supplier: &User) -> ImportBatch {
    let mut batch = ImportBatch::default();
    for (line, cells) in rows {
        if cells.iter().all(|c| c.trim().is_empty()) {
            continue;
        }
        match columns.product(&cells, supplier) {
            Ok(product) => batch.rows.push(ImportedRow { line, product }),
            Err(reason) => batch.rejected.push(RowError { line, reason }),
        }
    }
    batch
}

// Sheets exported with a Spanish locale write "12,5".
fn parse_number(text: &str) -> Option<f64> {
    text.replace(',', ".").parse::<f64>().ok().filter(|n| n.is_finite())
}

fn parse_flag(text: &str) -> Option<bool> {
    match text.to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "si" | "sí" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    #[test]
    fn column_keys_ignore_case_and_separators() {
        assert_eq!(column_key("deliveryDays"), "deliverydays");
        assert_eq!(column_key("Delivery_Days"), "deliverydays");
        assert_eq!(column_key(" In Stock "), "instock");
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let supplier = User::new("Norte", "ventas@norte.mx", Role::Supplier);
        let err = load_file(Path::new("precios.txt"), &supplier).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(ext) if ext == "txt"));
    }

    #[test]
    fn numbers_accept_decimal_commas() {
        assert_eq!(parse_number("12,5"), Some(12.5));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_flag("Sí"), Some(true));
        assert_eq!(parse_flag("maybe"), None);
    }
}
