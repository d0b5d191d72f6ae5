use crate::cleanup::apply_cleanup_rules;
use crate::config::{CleanupRule, ColumnMapping};
use crate::model::{CellValue, Field, Row};
use crate::normalize::{decode_date, decode_time};

/// Raw value for a logical field, or `Empty` when the field is
/// unmapped or its column is absent from the row. The single
/// indirection point between logical fields and physical columns.
pub fn mapped_value(row: &Row, field: Field, mapping: &ColumnMapping) -> CellValue {
    mapping
        .column(field)
        .and_then(|col| row.get(col))
        .cloned()
        .unwrap_or(CellValue::Empty)
}

pub fn mapped_text(row: &Row, field: Field, mapping: &ColumnMapping) -> String {
    mapped_value(row, field, mapping).as_text()
}

/// Resolved, normalized, cleaned value for one logical field.
///
/// Date and time fields decode through the value normalizer first;
/// an absent cell resolves to `""` here (the `"TBD"` sentinel belongs
/// to message rendering, not to canonical field maps).
pub fn canonical_text(
    row: &Row,
    field: Field,
    mapping: &ColumnMapping,
    rules: &[CleanupRule],
) -> String {
    let raw = mapped_value(row, field, mapping);
    let text = match field {
        _ if raw.is_empty() => String::new(),
        Field::ArrivalDate | Field::DepartDate => decode_date(&raw),
        Field::ArrivalTime | Field::DepartTime => decode_time(&raw),
        _ => raw.as_text().trim().to_string(),
    };
    apply_cleanup_rules(&text, field, rules)
}
