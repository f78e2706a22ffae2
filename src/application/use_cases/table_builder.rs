// ============================================================
// TABLE BUILDER
// ============================================================
// Infer a column schema and typed rows from decoded records

use crate::domain::error::{AppError, Result};
use crate::domain::table::{
    infer_type, ColumnSchema, ColumnType, RawRecord, TableDescription, TypedRow,
};

/// Build a table from a file's decoded records.
///
/// Record 0 is the header. Column types are sampled from record 1 only;
/// later records are never consulted, so a mixed column keeps the type of
/// its first value. Each cell is coerced on its own, so a numeric-looking
/// cell in a `Text` column is still stored as a number.
///
/// Zero records and header-only input are both `EmptyTable` errors.
pub fn build_table(records: Vec<RawRecord>, table_name: &str) -> Result<TableDescription> {
    let mut records = records.into_iter();

    let header = records
        .next()
        .ok_or_else(|| AppError::EmptyTable(format!("No rows found in table {}", table_name)))?;

    let mut records = records.peekable();
    let sample = records.peek().ok_or_else(|| {
        AppError::EmptyTable(format!(
            "Table {} has a header but no data rows",
            table_name
        ))
    })?;

    let columns: Vec<ColumnSchema> = header
        .iter()
        .enumerate()
        .map(|(index, name)| {
            let column_type = sample
                .get(index)
                .map(|value| infer_type(value))
                .unwrap_or(ColumnType::Text);
            ColumnSchema::new(name.clone(), column_type)
        })
        .collect();

    let mut rows = Vec::new();
    for (index, record) in records.enumerate() {
        if record.len() != header.len() {
            return Err(AppError::ParseError(format!(
                "Table {} record {} has {} fields, header has {}",
                table_name,
                index + 2,
                record.len(),
                header.len()
            )));
        }
        rows.push(TypedRow::from_record(&header, &record));
    }

    Ok(TableDescription::new(table_name, columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::table::{CellValue, TypedRow};

    fn records(rows: &[&[&str]]) -> Vec<RawRecord> {
        rows.iter()
            .map(|r| r.iter().map(|v| v.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_build_infers_schema_and_rows() {
        let table = build_table(records(&[&["a", "b"], &["1", "x"]]), "t").unwrap();

        assert_eq!(table.name(), "t");
        assert_eq!(
            table.columns(),
            &[
                ColumnSchema::new("a", ColumnType::Integer),
                ColumnSchema::new("b", ColumnType::Text),
            ]
        );

        let mut rows: Vec<TypedRow> = Vec::new();
        table.resolve(&mut rows).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("a"), Some(&CellValue::Integer(1)));
        assert_eq!(rows[0].get("b"), Some(&CellValue::Text("x".to_string())));
    }

    #[test]
    fn test_type_sampled_from_first_data_row_only() {
        let table = build_table(
            records(&[&["price", "label"], &["3", "n/a"], &["3.5", "7"]]),
            "prices",
        )
        .unwrap();

        assert_eq!(table.columns()[0].column_type, ColumnType::Integer);
        assert_eq!(table.columns()[1].column_type, ColumnType::Text);
    }

    #[test]
    fn test_padded_cells_are_numbers() {
        let table = build_table(
            records(&[&["a", " b"], &["1", " 2"], &[" ", " x "]]),
            "padded",
        )
        .unwrap();
        assert_eq!(table.columns()[1].column_type, ColumnType::Integer);

        let mut rows: Vec<TypedRow> = Vec::new();
        table.resolve(&mut rows).unwrap();
        assert_eq!(rows[0].get(" b"), Some(&CellValue::Integer(2)));
        assert_eq!(rows[1].get("a"), Some(&CellValue::Text(" ".to_string())));
        assert_eq!(rows[1].get(" b"), Some(&CellValue::Text(" x ".to_string())));
    }

    #[test]
    fn test_cells_coerce_independently_of_column_type() {
        let table = build_table(
            records(&[&["label"], &["n/a"], &["7"], &["2.5"]]),
            "labels",
        )
        .unwrap();
        assert_eq!(table.columns()[0].column_type, ColumnType::Text);

        let mut rows: Vec<TypedRow> = Vec::new();
        table.resolve(&mut rows).unwrap();
        assert_eq!(rows[0].get("label"), Some(&CellValue::Text("n/a".to_string())));
        assert_eq!(rows[1].get("label"), Some(&CellValue::Integer(7)));
        assert_eq!(rows[2].get("label"), Some(&CellValue::Float(2.5)));
    }

    #[test]
    fn test_float_and_empty_sample_values() {
        let table = build_table(records(&[&["x", "y"], &["0.25", ""]]), "t").unwrap();

        assert_eq!(table.columns()[0].column_type, ColumnType::Float);
        assert_eq!(table.columns()[1].column_type, ColumnType::Text);
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let err = build_table(records(&[&["a", "b"]]), "t").unwrap_err();
        assert!(matches!(err, AppError::EmptyTable(_)));
    }

    #[test]
    fn test_no_records_is_empty_table() {
        let err = build_table(Vec::new(), "t").unwrap_err();
        assert!(matches!(err, AppError::EmptyTable(_)));
    }

    #[test]
    fn test_ragged_record_is_rejected() {
        let err = build_table(records(&[&["a", "b"], &["1", "2"], &["3"]]), "t").unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }
}
