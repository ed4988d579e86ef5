use std::io::Read;

use super::{collect_rows, Columns, ImportBatch, ImportError, RowError};
use crate::domain::User;

/// Reads a comma-separated price sheet. A row that is not valid UTF-8 is
/// rejected on its own; the header must decode.
pub fn parse_csv<R: Read>(reader: R, supplier: &User) -> Result<ImportBatch, ImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::new(rdr.headers()?.iter())?;

    let mut rows = Vec::new();
    let mut undecodable = Vec::new();
    for (offset, record) in rdr.byte_records().enumerate() {
        let record = record?;
        // Blank lines are skipped by the reader, so prefer its own line count.
        let line = record.position().map_or(offset + 2, |p| p.line() as usize);
        let cells: Result<Vec<String>, _> = record
            .iter()
            .map(|field| std::str::from_utf8(field).map(str::to_string))
            .collect();
        match cells {
            Ok(cells) => rows.push((line, cells)),
            Err(e) => undecodable.push(RowError { line, reason: format!("row is not valid UTF-8: {}", e) }),
        }
    }

    let mut batch = collect_rows(&columns, rows.into_iter(), supplier);
    batch.rejected.extend(undecodable);
    batch.rejected.sort_by_key(|r| r.line);
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Quality, Role};

    fn supplier() -> User {
        let mut user = User::new("Ana", "ana@lacteosnorte.mx", Role::Supplier);
        user.id = "user_1".to_string();
        user.business_name = "Lácteos del Norte".to_string();
        user
    }

    #[test]
    fn valid_rows_become_products_for_the_supplier() {
        let sheet = "\
name,brand,category,size,dimension,price,quality,deliveryDays,inStock
Leche Entera,La Vaquita,Lácteos,1,L,40,High,2,yes
Queso Fresco,La Vaquita,Lácteos,\"0,5\",kg,95.5,media,,
";
        let batch = parse_csv(sheet.as_bytes(), &supplier()).unwrap();
        assert!(batch.rejected.is_empty());
        assert_eq!(batch.rows.len(), 2);

        let milk = &batch.rows[0];
        assert_eq!(milk.line, 2);
        assert_eq!(milk.product.quality, Quality::High);
        assert_eq!(milk.product.delivery_days, 2);
        assert_eq!(milk.product.supplier_id, "user_1");
        assert_eq!(milk.product.supplier_name, "Lácteos del Norte");

        let cheese = &batch.rows[1].product;
        assert_eq!(cheese.size, 0.5);
        assert_eq!(cheese.quality, Quality::Medium);
        assert_eq!(cheese.delivery_days, 1);
        assert!(cheese.in_stock);
    }

    #[test]
    fn bad_rows_are_reported_without_stopping_the_batch() {
        let sheet = "\
Name,Size,Dimension,Price
,1,kg,10
Azúcar,mucho,kg,10

Sal,1,kg,8
";
        let batch = parse_csv(sheet.as_bytes(), &supplier()).unwrap();
        assert_eq!(batch.rows.len(), 1);
        assert_eq!(batch.rows[0].product.name, "Sal");
        assert_eq!(batch.rows[0].line, 5);
        let lines: Vec<usize> = batch.rejected.iter().map(|r| r.line).collect();
        assert_eq!(lines, vec![2, 3]);
    }

    #[test]
    fn undecodable_row_is_rejected_alone() {
        let sheet: &[u8] = b"name,size,dimension,price\nSal,1,kg,8\nAz\xff\xfecar,1,kg,10\nArroz,1,kg,20\n";
        let batch = parse_csv(sheet, &supplier()).unwrap();

        let names: Vec<&str> = batch.rows.iter().map(|r| r.product.name.as_str()).collect();
        assert_eq!(names, vec!["Sal", "Arroz"]);
        assert_eq!(batch.rows[1].line, 4);
        assert_eq!(batch.rejected.len(), 1);
        assert_eq!(batch.rejected[0].line, 3);
        assert!(batch.rejected[0].reason.contains("UTF-8"));
    }

    #[test]
    fn missing_required_column_fails_the_file() {
        let sheet = "name,size,price\nSal,1,8\n";
        let err = parse_csv(sheet.as_bytes(), &supplier()).unwrap_err();
        assert!(matches!(err, ImportError::MissingColumn("dimension")));
    }
}
