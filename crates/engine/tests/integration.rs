// End-to-end runs: TOML job config + CSV fixtures through the engine.

use manifest_engine::load::{load_csv_rows, load_json_rows};
use manifest_engine::model::MatchStatus;
use manifest_engine::{compare, generate_messages, run_compare, run_messages};
use manifest_engine::{CompareJob, MessageJob};

const ROSTER_A: &str = "\
Guest Name,Passport,Nationality,Terminal,Hotel,Arr Date,Arr Time,Arr Flight
John Doe,X1,QA,T1,Ritz,44927,0.5,AB123
Jane Roe,X2,QA,T1,Ritz,44927,0.5,AB123
Sam Poe,X3,FR,T2,Hilton,44928,0.25,CD456
";

const ROSTER_B: &str = "\
NAME,DOC,NAT,TERM,HTL
john doe,X1,QA,T1,Ritz
Jane  Roe,X2,QA,T2,Ritz
Extra Guest,X9,DE,T1,Marriott
";

const COMPARE_TOML: &str = r#"
kind = "compare"
name = "Protocol vs airline"

[file1]
file = "a.csv"
[file1.columns]
full_name = "Guest Name"
document_number = "Passport"
nationality = "Nationality"
terminal = "Terminal"
hotel = "Hotel"

[file2]
file = "b.csv"
[file2.columns]
full_name = "NAME"
document_number = "DOC"
nationality = "NAT"
terminal = "TERM"
hotel = "HTL"

[compare]
match_by = "both"
fields = ["nationality", "terminal", "hotel"]
"#;

#[test]
fn compare_end_to_end() {
    let job = CompareJob::from_toml(COMPARE_TOML).unwrap();
    let rows_a = load_csv_rows(ROSTER_A).unwrap();
    let rows_b = load_csv_rows(ROSTER_B).unwrap();

    let report = run_compare(&job, &rows_a, &rows_b);
    assert_eq!(report.meta.config_name, "Protocol vs airline");
    assert_eq!(report.summary.total, 4);
    assert_eq!(report.summary.matched, 1);
    assert_eq!(report.summary.different, 1);
    assert_eq!(report.summary.only_file1, 1);
    assert_eq!(report.summary.only_file2, 1);

    let comparisons = &report.comparisons;
    // A-side entries first, in A order; unmatched B entries after.
    assert_eq!(comparisons[0].name, "John Doe");
    assert_eq!(comparisons[0].status, MatchStatus::Match);
    assert_eq!(comparisons[1].name, "Jane Roe");
    assert_eq!(comparisons[1].status, MatchStatus::Different);
    assert_eq!(comparisons[1].differences.len(), 1);
    assert_eq!(comparisons[2].name, "Sam Poe");
    assert_eq!(comparisons[2].status, MatchStatus::OnlyFile1);
    assert_eq!(comparisons[3].name, "Extra Guest");
    assert_eq!(comparisons[3].status, MatchStatus::OnlyFile2);

    // Serializes cleanly, with camelCase keys and {} for absent sides
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["comparisons"][3]["file1Data"], serde_json::json!({}));
    assert_eq!(json["comparisons"][0]["status"], "match");
}

#[test]
fn compare_file_against_itself_is_all_match() {
    let job = CompareJob::from_toml(COMPARE_TOML).unwrap();
    let rows = load_csv_rows(ROSTER_A).unwrap();
    let mapping = &job.file1.columns;

    let out = compare(&rows, &rows, mapping, mapping, &job.compare, &job.cleanup);
    assert_eq!(out.len(), rows.len());
    assert!(out.iter().all(|c| c.status == MatchStatus::Match));
    assert!(out.iter().all(|c| c.differences.is_empty()));
}

#[test]
fn compare_completeness_count() {
    let job = CompareJob::from_toml(COMPARE_TOML).unwrap();
    let rows_a = load_csv_rows(ROSTER_A).unwrap();
    let rows_b = load_csv_rows(ROSTER_B).unwrap();

    let out = compare(
        &rows_a,
        &rows_b,
        &job.file1.columns,
        &job.file2.columns,
        &job.compare,
        &job.cleanup,
    );
    // |A with identity| + |unmatched B with identity| = 3 + 1
    assert_eq!(out.len(), 4);
}

#[test]
fn compare_with_empty_sides() {
    let job = CompareJob::from_toml(COMPARE_TOML).unwrap();
    let rows_a = load_csv_rows(ROSTER_A).unwrap();

    let out = compare(
        &rows_a,
        &[],
        &job.file1.columns,
        &job.file2.columns,
        &job.compare,
        &job.cleanup,
    );
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|c| c.status == MatchStatus::OnlyFile1));

    let out = compare(
        &[],
        &[],
        &job.file1.columns,
        &job.file2.columns,
        &job.compare,
        &job.cleanup,
    );
    assert!(out.is_empty());
}

const MESSAGES_TOML: &str = r#"
kind = "messages"
name = "Arrival batch"
mode = "arrival"
dates = ["2023-01-01"]

[file]
file = "roster.csv"
[file.columns]
full_name = "Guest Name"
document_number = "Passport"
nationality = "Nationality"
terminal = "Terminal"
hotel = "Hotel"
arrival_date = "Arr Date"
arrival_time = "Arr Time"
arrival_flight = "Arr Flight"
"#;

#[test]
fn messages_end_to_end() {
    let job = MessageJob::from_toml(MESSAGES_TOML).unwrap();
    let rows = load_csv_rows(ROSTER_A).unwrap();

    let report = run_messages(&job, &rows);
    // Sam Poe arrives 2023-01-02 and is filtered out.
    assert_eq!(report.group_count, 1);
    let msg = &report.messages[0];
    assert_eq!(msg.flight, "AB123");
    assert_eq!(msg.date, "2023-01-01");
    assert_eq!(msg.time, "12:00");
    assert_eq!(msg.passengers.len(), 2);
    assert!(msg.text.contains("🛬 Arrival — 01 January 2023"));
    assert!(msg.text.contains("1) *John Doe*"));
    assert!(msg.text.contains("Flight: AB123 | 12:00"));
    assert!(msg.text.contains("Hotel: Ritz"));
}

#[test]
fn messages_custom_template() {
    let toml = format!(
        "{MESSAGES_TOML}
[message]
use_custom_template = true
custom_template = \"{{{{passengerCount}}}} pax on {{{{flight}}}}\"
"
    );
    let job = MessageJob::from_toml(&toml).unwrap();
    let rows = load_csv_rows(ROSTER_A).unwrap();

    let report = run_messages(&job, &rows);
    assert_eq!(report.messages[0].text, "2 pax on AB123");
}

#[test]
fn messages_without_date_filter_keep_all_groups() {
    let toml = MESSAGES_TOML.replace("dates = [\"2023-01-01\"]", "");
    let job = MessageJob::from_toml(&toml).unwrap();
    let rows = load_csv_rows(ROSTER_A).unwrap();

    let out = generate_messages(
        &rows,
        &job.file.columns,
        job.mode,
        &job.dates,
        &job.message,
        &job.cleanup,
    );
    assert_eq!(out.len(), 2);
    // Sorted by (date, time): 2023-01-01 before 2023-01-02
    assert_eq!(out[0].date, "2023-01-01");
    assert_eq!(out[1].date, "2023-01-02");
    assert_eq!(out[1].time, "06:00");
}

#[test]
fn messages_grouping_ignores_row_order_elsewhere() {
    let job = MessageJob::from_toml(MESSAGES_TOML).unwrap();
    let rows = load_csv_rows(ROSTER_A).unwrap();
    let mut shuffled = rows.clone();
    shuffled.swap(0, 1);

    let a = generate_messages(&rows, &job.file.columns, job.mode, &[], &job.message, &job.cleanup);
    let b = generate_messages(
        &shuffled,
        &job.file.columns,
        job.mode,
        &[],
        &job.message,
        &job.cleanup,
    );
    assert_eq!(a.len(), b.len());
    for (x, y) in a.iter().zip(&b) {
        assert_eq!(x.flight, y.flight);
        assert_eq!(x.passengers.len(), y.passengers.len());
    }
}

#[test]
fn json_rows_feed_the_engine_too() {
    let job = MessageJob::from_toml(MESSAGES_TOML).unwrap();
    let rows = load_json_rows(
        r#"[
            {"Guest Name": "John Doe", "Arr Flight": "AB123",
             "Arr Date": 44927, "Arr Time": 0.5, "Terminal": "T1"}
        ]"#,
    )
    .unwrap();

    let report = run_messages(&job, &rows);
    assert_eq!(report.group_count, 1);
    assert_eq!(report.messages[0].time, "12:00");
    assert_eq!(report.messages[0].terminal, "T1");
}

#[test]
fn cleanup_rules_apply_across_both_engines() {
    let toml = format!(
        "{COMPARE_TOML}
[[cleanup]]
field = \"terminal\"
pattern = \"Terminal \"
replacement = \"T\"
"
    );
    let job = CompareJob::from_toml(&toml).unwrap();
    let rows_a = load_csv_rows(
        "Guest Name,Passport,Terminal\nJohn Doe,X1,Terminal 1\n",
    )
    .unwrap();
    let rows_b = load_csv_rows("NAME,DOC,TERM\nJohn Doe,X1,T1\n").unwrap();

    let out = compare(
        &rows_a,
        &rows_b,
        &job.file1.columns,
        &job.file2.columns,
        &job.compare,
        &job.cleanup,
    );
    assert_eq!(out[0].status, MatchStatus::Match);
    assert_eq!(out[0].file1_data.get(manifest_engine::Field::Terminal), "T1");
}
