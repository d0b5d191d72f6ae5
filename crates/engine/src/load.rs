use crate::error::EngineError;
use crate::model::{CellValue, Row};

/// Load headered CSV text into rows.
///
/// Cells that round-trip through `f64` become numeric so date/time
/// serials in text exports still decode; anything else stays text
/// (zero-padded document numbers must not lose their leading zeros).
pub fn load_csv_rows(data: &str) -> Result<Vec<Row>, EngineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(data.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| EngineError::Io(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| EngineError::Io(e.to_string()))?;
        let mut row = Row::new();
        for (i, header) in headers.iter().enumerate() {
            row.insert(header.clone(), cell_from_text(record.get(i).unwrap_or("")));
        }
        rows.push(row);
    }
    Ok(rows)
}

/// Load a JSON array of objects into rows. Strings, numbers, and
/// nulls map directly onto cell values; anything else stringifies.
pub fn load_json_rows(data: &str) -> Result<Vec<Row>, EngineError> {
    let objects: Vec<serde_json::Map<String, serde_json::Value>> =
        serde_json::from_str(data).map_err(|e| EngineError::Io(e.to_string()))?;

    Ok(objects
        .into_iter()
        .map(|obj| {
            obj.into_iter()
                .map(|(key, value)| (key, cell_from_json(value)))
                .collect()
        })
        .collect())
}

fn cell_from_text(cell: &str) -> CellValue {
    let cell = cell.trim();
    if cell.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(n) = cell.parse::<f64>() {
        if n.to_string() == cell {
            return CellValue::Number(n);
        }
    }
    CellValue::Text(cell.to_string())
}

fn cell_from_json(value: serde_json::Value) -> CellValue {
    match value {
        serde_json::Value::Null => CellValue::Empty,
        serde_json::Value::Number(n) => CellValue::Number(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => {
            if s.trim().is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(s)
            }
        }
        serde_json::Value::Bool(b) => CellValue::Text(b.to_string()),
        other => CellValue::Text(other.to_string()),
    }
}
