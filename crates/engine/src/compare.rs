use std::collections::HashMap;

use crate::config::{CleanupRule, ColumnMapping, CompareConfig, CompareJob};
use crate::model::{
    CanonicalFieldMap, CompareReport, CompareSummary, Field, GuestComparison, MatchStatus,
    ReportMeta, Row,
};
use crate::normalize::normalize_for_comparison;
use crate::resolve::canonical_text;

/// Run a full compare job over pre-loaded rows, with summary + meta.
pub fn run_compare(job: &CompareJob, rows_a: &[Row], rows_b: &[Row]) -> CompareReport {
    let comparisons = compare(
        rows_a,
        rows_b,
        &job.file1.columns,
        &job.file2.columns,
        &job.compare,
        &job.cleanup,
    );
    let summary = CompareSummary::from_comparisons(&comparisons);
    CompareReport {
        meta: ReportMeta::new(&job.name),
        summary,
        comparisons,
    }
}

/// Match every guest in `rows_a` against `rows_b` by identity key and
/// classify each as matched / different / only-on-one-side.
///
/// Output order: all A-derived entries in A's original order, then
/// unmatched B entries in B's original order. Rows with neither a
/// name nor a document number are skipped entirely.
pub fn compare(
    rows_a: &[Row],
    rows_b: &[Row],
    mapping_a: &ColumnMapping,
    mapping_b: &ColumnMapping,
    config: &CompareConfig,
    rules: &[CleanupRule],
) -> Vec<GuestComparison> {
    // Normalized identity of every B row, computed once.
    let ids_b: Vec<(String, String)> = rows_b
        .iter()
        .map(|row| identity(row, mapping_b, rules))
        .collect();

    // Identity indexes over B. Later rows overwrite earlier ones on
    // key collision (last-write-wins).
    let mut by_document: HashMap<&str, usize> = HashMap::new();
    let mut by_name: HashMap<&str, usize> = HashMap::new();
    for (i, (doc, name)) in ids_b.iter().enumerate() {
        if !doc.is_empty() {
            by_document.insert(doc, i);
        }
        if !name.is_empty() {
            by_name.insert(name, i);
        }
    }

    // Consumption is tracked per source row index, so duplicate rows
    // with identical content are tracked independently.
    let mut consumed = vec![false; rows_b.len()];
    let mut results = Vec::new();

    for row_a in rows_a {
        let (doc, name) = identity(row_a, mapping_a, rules);
        if doc.is_empty() && name.is_empty() {
            continue;
        }

        let file1_data = canonical_map(row_a, mapping_a, config, rules);

        // Document index first when enabled, name index as fallback.
        let matched = config
            .match_by
            .uses_document()
            .then(|| by_document.get(doc.as_str()).copied())
            .flatten()
            .or_else(|| {
                config
                    .match_by
                    .uses_name()
                    .then(|| by_name.get(name.as_str()).copied())
                    .flatten()
            });

        match matched {
            Some(bi) => {
                consumed[bi] = true;
                let file2_data = canonical_map(&rows_b[bi], mapping_b, config, rules);
                let mut differences = Vec::new();
                for &field in &config.fields {
                    let a = normalize_for_comparison(file1_data.get(field));
                    let b = normalize_for_comparison(file2_data.get(field));
                    if a != b {
                        differences.push(field);
                    }
                }
                let status = if differences.is_empty() {
                    MatchStatus::Match
                } else {
                    MatchStatus::Different
                };
                results.push(GuestComparison {
                    id: identity_key(&doc, &name),
                    name: file1_data.get(Field::FullName).to_string(),
                    document_number: file1_data.get(Field::DocumentNumber).to_string(),
                    status,
                    file1_data,
                    file2_data,
                    differences,
                });
            }
            None => {
                let differences = populated_fields(&file1_data, config);
                results.push(GuestComparison {
                    id: identity_key(&doc, &name),
                    name: file1_data.get(Field::FullName).to_string(),
                    document_number: file1_data.get(Field::DocumentNumber).to_string(),
                    status: MatchStatus::OnlyFile1,
                    file1_data,
                    file2_data: CanonicalFieldMap::default(),
                    differences,
                });
            }
        }
    }

    for (bi, row_b) in rows_b.iter().enumerate() {
        if consumed[bi] {
            continue;
        }
        let (doc, name) = &ids_b[bi];
        if doc.is_empty() && name.is_empty() {
            continue;
        }
        let file2_data = canonical_map(row_b, mapping_b, config, rules);
        let differences = populated_fields(&file2_data, config);
        results.push(GuestComparison {
            id: identity_key(doc, name),
            name: file2_data.get(Field::FullName).to_string(),
            document_number: file2_data.get(Field::DocumentNumber).to_string(),
            status: MatchStatus::OnlyFile2,
            file1_data: CanonicalFieldMap::default(),
            file2_data,
            differences,
        });
    }

    results
}

/// (normalized document number, normalized full name) for one row.
fn identity(row: &Row, mapping: &ColumnMapping, rules: &[CleanupRule]) -> (String, String) {
    (
        normalize_for_comparison(&canonical_text(row, Field::DocumentNumber, mapping, rules)),
        normalize_for_comparison(&canonical_text(row, Field::FullName, mapping, rules)),
    )
}

fn identity_key(doc: &str, name: &str) -> String {
    if doc.is_empty() {
        name.to_string()
    } else {
        doc.to_string()
    }
}

/// Canonical values for the configured fields plus the identity fields.
fn canonical_map(
    row: &Row,
    mapping: &ColumnMapping,
    config: &CompareConfig,
    rules: &[CleanupRule],
) -> CanonicalFieldMap {
    let mut map = CanonicalFieldMap::default();
    for field in config
        .fields
        .iter()
        .copied()
        .chain([Field::FullName, Field::DocumentNumber])
    {
        map.insert(field, canonical_text(row, field, mapping, rules));
    }
    map
}

/// For one-sided entries: the configured fields that carry any value.
fn populated_fields(data: &CanonicalFieldMap, config: &CompareConfig) -> Vec<Field> {
    config
        .fields
        .iter()
        .copied()
        .filter(|&field| !data.get(field).is_empty())
        .collect()
}
