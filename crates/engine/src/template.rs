use chrono::NaiveDate;

use crate::config::{MessageConfig, TravelMode};
use crate::model::{Passenger, ProcessedMessage};

/// Expand `{{token}}` placeholders in one pass over the template.
/// Substitution is literal and non-recursive; unknown tokens stay
/// verbatim in the output.
pub fn render_custom(
    template: &str,
    msg: &ProcessedMessage,
    mode: TravelMode,
    config: &MessageConfig,
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            // Unterminated token: keep the tail as-is.
            out.push_str(&rest[start..]);
            return out;
        };
        let token = &after[..end];
        match resolve_token(token, msg, mode, config) {
            Some(value) => out.push_str(&value),
            None => {
                out.push_str("{{");
                out.push_str(token);
                out.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

fn resolve_token(
    token: &str,
    msg: &ProcessedMessage,
    mode: TravelMode,
    config: &MessageConfig,
) -> Option<String> {
    let value = match token {
        "header" => mode.label().to_string(),
        "mode" => mode.to_string(),
        "date" => display_date(&msg.date),
        "time" => msg.time.clone(),
        "passengers" => passenger_lines(&msg.passengers, config),
        "passengerCount" => msg.passengers.len().to_string(),
        "passengersDetailed" => detailed_lines(&msg.passengers),
        "passengerNames" => msg
            .passengers
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", "),
        "positions" => dash_if_empty(
            msg.passengers
                .iter()
                .map(|p| p.position.as_str())
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
        ),
        "documentNumbers" => dash_if_empty(
            msg.passengers
                .iter()
                .filter(|p| !p.document_number.is_empty())
                .map(|p| format!("{}: {}", p.name, p.document_number))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        "category" | "categories" => dash_if_empty(distinct_categories(&msg.passengers).join(", ")),
        "nationality" | "delegation" => {
            if msg.nationality.is_empty() {
                "N/A".to_string()
            } else {
                msg.nationality.clone()
            }
        }
        "flight" => msg.flight.clone(),
        "flightTime" => format!("{} | {}", msg.flight, msg.time),
        "flightInfo" => format!("Flight: {} | {}", msg.flight, msg.time),
        "terminal" => msg.terminal.clone(),
        "hotel" => dash_if_empty(msg.hotel.clone()),
        "baggage" | "luggage" => "-".to_string(),
        "remarks" => remarks_blocks(&msg.passengers),
        _ => return None,
    };
    Some(value)
}

/// Fixed-section message body. Only enabled sections are emitted;
/// the blank line after the passenger block is always present.
pub fn render_default(msg: &ProcessedMessage, mode: TravelMode, config: &MessageConfig) -> String {
    let mut lines: Vec<String> = Vec::new();

    if config.include_header {
        let emoji = match mode {
            TravelMode::Arrival => "🛬",
            TravelMode::Departure => "🛫",
        };
        lines.push(format!("{emoji} {} — {}", mode.label(), display_date(&msg.date)));
    }

    if config.include_passenger_list {
        for (i, p) in msg.passengers.iter().enumerate() {
            let mut line = format!("{}) *{}*", i + 1, p.name);
            if config.include_position && !p.position.is_empty() {
                line.push_str(" - ");
                line.push_str(&p.position);
            }
            lines.push(line);
        }
        lines.push(String::new());
    }

    if config.include_nationality {
        let nationality = if msg.nationality.is_empty() {
            "N/A"
        } else {
            msg.nationality.as_str()
        };
        lines.push(format!("Delegation: {nationality}"));
    }

    if config.include_flight_info {
        lines.push(format!("Flight: {} | {}", msg.flight, msg.time));
    }

    if config.include_terminal {
        lines.push(format!("Terminal: {}", msg.terminal));
    }

    if mode == TravelMode::Arrival {
        if config.include_hotel {
            lines.push(format!("Hotel: {}", dash_if_empty(msg.hotel.clone())));
        }
        if config.include_baggage {
            lines.push("Baggage: -".to_string());
        }
    }

    if config.include_remarks {
        lines.push("Remarks:".to_string());
        lines.push(remarks_blocks(&msg.passengers));
    }

    lines.join("\n")
}

/// `01 January 2023` display form, or `"TBD"` for an empty date.
fn display_date(date: &str) -> String {
    if date.is_empty() {
        return "TBD".to_string();
    }
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%d %B %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn dash_if_empty(value: String) -> String {
    if value.is_empty() {
        "-".to_string()
    } else {
        value
    }
}

fn passenger_lines(passengers: &[Passenger], config: &MessageConfig) -> String {
    passengers
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if config.include_position && !p.position.is_empty() {
                format!("{}) {} - {}", i + 1, p.name, p.position)
            } else {
                format!("{}) {}", i + 1, p.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn detailed_lines(passengers: &[Passenger]) -> String {
    passengers
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mut line = format!("{}) {}", i + 1, p.name);
            if !p.position.is_empty() {
                line.push_str(" - ");
                line.push_str(&p.position);
            }
            if !p.document_number.is_empty() {
                line.push_str(" - Doc: ");
                line.push_str(&p.document_number);
            }
            if !p.category.is_empty() {
                line.push_str(" - ");
                line.push_str(&p.category);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn distinct_categories(passengers: &[Passenger]) -> Vec<String> {
    let mut seen = Vec::new();
    for p in passengers {
        if !p.category.is_empty() && !seen.contains(&p.category) {
            seen.push(p.category.clone());
        }
    }
    seen
}

/// Per-passenger `Name:\nRemarks` blocks separated by blank lines,
/// or `"-"` when no passenger carries remarks.
fn remarks_blocks(passengers: &[Passenger]) -> String {
    let blocks: Vec<String> = passengers
        .iter()
        .filter(|p| !p.remarks.is_empty())
        .map(|p| format!("{}:\n{}", p.name, p.remarks))
        .collect();
    if blocks.is_empty() {
        "-".to_string()
    } else {
        blocks.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(name: &str, position: &str, doc: &str, category: &str, remarks: &str) -> Passenger {
        Passenger {
            name: name.into(),
            position: position.into(),
            remarks: remarks.into(),
            document_number: doc.into(),
            category: category.into(),
        }
    }

    fn msg() -> ProcessedMessage {
        ProcessedMessage {
            date: "2023-01-01".into(),
            time: "12:00".into(),
            flight: "AB123".into(),
            nationality: "QA".into(),
            terminal: "T1".into(),
            hotel: "Ritz".into(),
            passengers: vec![
                passenger("John Doe", "Minister", "X1", "VVIP", "Wheelchair at gate"),
                passenger("Jane Roe", "", "", "", ""),
            ],
            text: String::new(),
        }
    }

    #[test]
    fn count_and_flight_tokens() {
        let out = render_custom(
            "{{passengerCount}} pax on {{flight}}",
            &msg(),
            TravelMode::Arrival,
            &MessageConfig::default(),
        );
        assert_eq!(out, "2 pax on AB123");
    }

    #[test]
    fn unknown_tokens_stay_verbatim() {
        let out = render_custom(
            "{{flight}} {{nope}} {{time}}",
            &msg(),
            TravelMode::Arrival,
            &MessageConfig::default(),
        );
        assert_eq!(out, "AB123 {{nope}} 12:00");
    }

    #[test]
    fn substitution_is_not_recursive() {
        let mut m = msg();
        m.flight = "{{time}}".into();
        let out = render_custom("{{flight}}", &m, TravelMode::Arrival, &MessageConfig::default());
        assert_eq!(out, "{{time}}");
    }

    #[test]
    fn repeated_tokens_all_expand() {
        let out = render_custom(
            "{{flight}}/{{flight}}",
            &msg(),
            TravelMode::Departure,
            &MessageConfig::default(),
        );
        assert_eq!(out, "AB123/AB123");
    }

    #[test]
    fn unterminated_token_kept() {
        let out = render_custom("{{flight", &msg(), TravelMode::Arrival, &MessageConfig::default());
        assert_eq!(out, "{{flight");
    }

    #[test]
    fn passenger_tokens() {
        let m = msg();
        let cfg = MessageConfig::default();
        let out = render_custom("{{passengers}}", &m, TravelMode::Arrival, &cfg);
        assert_eq!(out, "1) John Doe - Minister\n2) Jane Roe");

        let out = render_custom("{{passengersDetailed}}", &m, TravelMode::Arrival, &cfg);
        assert_eq!(out, "1) John Doe - Minister - Doc: X1 - VVIP\n2) Jane Roe");

        let out = render_custom("{{passengerNames}}", &m, TravelMode::Arrival, &cfg);
        assert_eq!(out, "John Doe, Jane Roe");

        let out = render_custom("{{documentNumbers}}", &m, TravelMode::Arrival, &cfg);
        assert_eq!(out, "John Doe: X1");

        let out = render_custom("{{positions}}", &m, TravelMode::Arrival, &cfg);
        assert_eq!(out, "Minister");

        let out = render_custom("{{categories}}", &m, TravelMode::Arrival, &cfg);
        assert_eq!(out, "VVIP");
    }

    #[test]
    fn position_suffix_respects_toggle() {
        let cfg = MessageConfig {
            include_position: false,
            ..MessageConfig::default()
        };
        let out = render_custom("{{passengers}}", &msg(), TravelMode::Arrival, &cfg);
        assert_eq!(out, "1) John Doe\n2) Jane Roe");
    }

    #[test]
    fn empty_list_tokens_render_dash() {
        let mut m = msg();
        m.passengers = vec![passenger("Jane Roe", "", "", "", "")];
        m.hotel = String::new();
        let cfg = MessageConfig::default();
        assert_eq!(render_custom("{{positions}}", &m, TravelMode::Arrival, &cfg), "-");
        assert_eq!(render_custom("{{documentNumbers}}", &m, TravelMode::Arrival, &cfg), "-");
        assert_eq!(render_custom("{{categories}}", &m, TravelMode::Arrival, &cfg), "-");
        assert_eq!(render_custom("{{hotel}}", &m, TravelMode::Arrival, &cfg), "-");
        assert_eq!(render_custom("{{remarks}}", &m, TravelMode::Arrival, &cfg), "-");
        assert_eq!(render_custom("{{baggage}}", &m, TravelMode::Arrival, &cfg), "-");
    }

    #[test]
    fn header_date_and_delegation_tokens() {
        let cfg = MessageConfig::default();
        let out = render_custom(
            "{{header}} {{mode}} {{date}} {{delegation}}",
            &msg(),
            TravelMode::Departure,
            &cfg,
        );
        assert_eq!(out, "Departure departure 01 January 2023 QA");

        let mut m = msg();
        m.date = String::new();
        m.nationality = String::new();
        let out = render_custom("{{date}} {{nationality}}", &m, TravelMode::Arrival, &cfg);
        assert_eq!(out, "TBD N/A");
    }

    #[test]
    fn flight_info_tokens() {
        let cfg = MessageConfig::default();
        assert_eq!(
            render_custom("{{flightTime}}", &msg(), TravelMode::Arrival, &cfg),
            "AB123 | 12:00"
        );
        assert_eq!(
            render_custom("{{flightInfo}}", &msg(), TravelMode::Arrival, &cfg),
            "Flight: AB123 | 12:00"
        );
    }

    #[test]
    fn default_arrival_message_full() {
        let out = render_default(&msg(), TravelMode::Arrival, &MessageConfig::default());
        let expected = "\
🛬 Arrival — 01 January 2023
1) *John Doe* - Minister
2) *Jane Roe*

Delegation: QA
Flight: AB123 | 12:00
Terminal: T1
Hotel: Ritz
Baggage: -
Remarks:
John Doe:
Wheelchair at gate";
        assert_eq!(out, expected);
    }

    #[test]
    fn default_departure_skips_hotel_and_baggage() {
        let out = render_default(&msg(), TravelMode::Departure, &MessageConfig::default());
        assert!(!out.contains("Hotel:"));
        assert!(!out.contains("Baggage:"));
        assert!(out.starts_with("🛫 Departure — "));
    }

    #[test]
    fn disabled_sections_are_omitted_entirely() {
        let cfg = MessageConfig {
            include_header: false,
            include_nationality: false,
            include_terminal: false,
            include_hotel: false,
            include_baggage: false,
            include_remarks: false,
            ..MessageConfig::default()
        };
        let out = render_default(&msg(), TravelMode::Arrival, &cfg);
        assert_eq!(out, "1) *John Doe* - Minister\n2) *Jane Roe*\n\nFlight: AB123 | 12:00");
    }

    #[test]
    fn remarks_section_dash_when_none() {
        let mut m = msg();
        m.passengers = vec![passenger("Jane Roe", "", "", "", "")];
        let cfg = MessageConfig {
            include_header: false,
            include_passenger_list: false,
            include_nationality: false,
            include_flight_info: false,
            include_terminal: false,
            include_hotel: false,
            include_baggage: false,
            ..MessageConfig::default()
        };
        let out = render_default(&m, TravelMode::Arrival, &cfg);
        assert_eq!(out, "Remarks:\n-");
    }
}
