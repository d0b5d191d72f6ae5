use std::collections::HashMap;

use crate::config::{CleanupRule, ColumnMapping, MessageConfig, MessageJob, TravelMode};
use crate::model::{Field, MessageReport, Passenger, ProcessedMessage, ReportMeta, Row};
use crate::normalize::{decode_date, decode_time};
use crate::resolve::{canonical_text, mapped_value};
use crate::template;

/// Run a full message job over pre-loaded rows, with meta.
pub fn run_messages(job: &MessageJob, rows: &[Row]) -> MessageReport {
    let messages = generate_messages(
        rows,
        &job.file.columns,
        job.mode,
        &job.dates,
        &job.message,
        &job.cleanup,
    );
    MessageReport {
        meta: ReportMeta::new(&job.name),
        group_count: messages.len(),
        messages,
    }
}

/// Filter rows by date, group by (flight, nationality, terminal,
/// hotel), and render one message per group.
///
/// Groups form in first-seen row order; each group's date and time
/// derive from its first row only. The final list is sorted by
/// `(date, time)` as plain strings.
pub fn generate_messages(
    rows: &[Row],
    mapping: &ColumnMapping,
    mode: TravelMode,
    selected_dates: &[String],
    config: &MessageConfig,
    rules: &[CleanupRule],
) -> Vec<ProcessedMessage> {
    let date_field = mode.date_field();
    let time_field = mode.time_field();
    let flight_field = mode.flight_field();

    // The date filter only engages when dates were selected and a
    // date column is actually mapped.
    let filter_on = !selected_dates.is_empty() && mapping.column(date_field).is_some();

    let mut index: HashMap<(String, String, String, String), usize> = HashMap::new();
    let mut groups: Vec<ProcessedMessage> = Vec::new();

    for row in rows {
        if filter_on {
            let decoded = decode_date(&mapped_value(row, date_field, mapping));
            // Undecodable dates never equal a selected date.
            if !selected_dates.iter().any(|d| *d == decoded) {
                continue;
            }
        }

        let flight = non_empty_or(canonical_text(row, flight_field, mapping, rules), "TBD");
        let nationality = canonical_text(row, Field::Nationality, mapping, rules);
        let terminal = non_empty_or(canonical_text(row, Field::Terminal, mapping, rules), "VIP");
        let hotel = canonical_text(row, Field::Hotel, mapping, rules);

        let key = (
            flight.clone(),
            nationality.clone(),
            terminal.clone(),
            hotel.clone(),
        );
        let gi = *index.entry(key).or_insert_with(|| {
            groups.push(ProcessedMessage {
                date: decode_date(&mapped_value(row, date_field, mapping)),
                time: decode_time(&mapped_value(row, time_field, mapping)),
                flight,
                nationality,
                terminal,
                hotel,
                passengers: Vec::new(),
                text: String::new(),
            });
            groups.len() - 1
        });

        groups[gi].passengers.push(Passenger {
            name: non_empty_or(canonical_text(row, Field::FullName, mapping, rules), "N/A"),
            position: canonical_text(row, Field::Position, mapping, rules),
            remarks: canonical_text(row, Field::Remarks, mapping, rules),
            document_number: canonical_text(row, Field::DocumentNumber, mapping, rules),
            category: canonical_text(row, Field::Category, mapping, rules),
        });
    }

    for group in &mut groups {
        group.text = match (&config.use_custom_template, &config.custom_template) {
            (true, Some(tpl)) => template::render_custom(tpl, group, mode, config),
            _ => template::render_default(group, mode, config),
        };
    }

    // Plain string sort: dates are YYYY-MM-DD, times zero-padded HH:MM.
    groups.sort_by(|a, b| (a.date.as_str(), a.time.as_str()).cmp(&(b.date.as_str(), b.time.as_str())));
    groups
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value
    }
}
