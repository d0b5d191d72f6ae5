use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// A single raw cell as handed over by the spreadsheet collaborator.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    /// Stringified form: numbers print without a trailing `.0`,
    /// `Empty` prints as the empty string.
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
            Self::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }
}

/// One source record: physical column name → raw cell value.
pub type Row = HashMap<String, CellValue>;

// ---------------------------------------------------------------------------
// Logical fields
// ---------------------------------------------------------------------------

/// The fixed set of logical fields every mapping resolves into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    DocumentNumber,
    Nationality,
    Position,
    Terminal,
    Hotel,
    Remarks,
    ArrivalDate,
    ArrivalTime,
    ArrivalFlight,
    DepartDate,
    DepartTime,
    DepartFlight,
    Category,
}

impl Field {
    pub const ALL: [Field; 14] = [
        Field::FullName,
        Field::DocumentNumber,
        Field::Nationality,
        Field::Position,
        Field::Terminal,
        Field::Hotel,
        Field::Remarks,
        Field::ArrivalDate,
        Field::ArrivalTime,
        Field::ArrivalFlight,
        Field::DepartDate,
        Field::DepartTime,
        Field::DepartFlight,
        Field::Category,
    ];

    /// camelCase name, matching the serde representation.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::DocumentNumber => "documentNumber",
            Self::Nationality => "nationality",
            Self::Position => "position",
            Self::Terminal => "terminal",
            Self::Hotel => "hotel",
            Self::Remarks => "remarks",
            Self::ArrivalDate => "arrivalDate",
            Self::ArrivalTime => "arrivalTime",
            Self::ArrivalFlight => "arrivalFlight",
            Self::DepartDate => "departDate",
            Self::DepartTime => "departTime",
            Self::DepartFlight => "departFlight",
            Self::Category => "category",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Fully resolved, cleaned logical-field values for one row.
/// An absent side of a comparison serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CanonicalFieldMap(BTreeMap<Field, String>);

impl CanonicalFieldMap {
    pub fn get(&self, field: Field) -> &str {
        self.0.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn insert(&mut self, field: Field, value: String) {
        self.0.insert(field, value);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    #[serde(rename = "match")]
    Match,
    #[serde(rename = "different")]
    Different,
    #[serde(rename = "only-file1")]
    OnlyFile1,
    #[serde(rename = "only-file2")]
    OnlyFile2,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::Different => write!(f, "different"),
            Self::OnlyFile1 => write!(f, "only-file1"),
            Self::OnlyFile2 => write!(f, "only-file2"),
        }
    }
}

/// One guest's cross-file verdict with a per-field diff list.
///
/// For `only-file1`/`only-file2` entries, `differences` lists the
/// fields that carry any value (what the caller should display), and
/// the absent side's data map is empty.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestComparison {
    pub id: String,
    pub name: String,
    pub document_number: String,
    pub status: MatchStatus,
    pub file1_data: CanonicalFieldMap,
    pub file2_data: CanonicalFieldMap,
    pub differences: Vec<Field>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareSummary {
    pub total: usize,
    pub matched: usize,
    pub different: usize,
    pub only_file1: usize,
    pub only_file2: usize,
}

impl CompareSummary {
    pub fn from_comparisons(comparisons: &[GuestComparison]) -> Self {
        let mut summary = Self {
            total: comparisons.len(),
            ..Self::default()
        };
        for c in comparisons {
            match c.status {
                MatchStatus::Match => summary.matched += 1,
                MatchStatus::Different => summary.different += 1,
                MatchStatus::OnlyFile1 => summary.only_file1 += 1,
                MatchStatus::OnlyFile2 => summary.only_file2 += 1,
            }
        }
        summary
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

/// One grouped row, cleaned and ready for rendering.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    pub name: String,
    pub position: String,
    pub remarks: String,
    pub document_number: String,
    pub category: String,
}

/// One (flight, nationality, terminal, hotel) group with its rendered text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessedMessage {
    pub date: String,
    pub time: String,
    pub flight: String,
    pub nationality: String,
    pub terminal: String,
    pub hotel: String,
    pub passengers: Vec<Passenger>,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMeta {
    pub config_name: String,
    pub engine_version: String,
    pub run_at: String,
}

impl ReportMeta {
    pub fn new(config_name: &str) -> Self {
        Self {
            config_name: config_name.to_string(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareReport {
    pub meta: ReportMeta,
    pub summary: CompareSummary,
    pub comparisons: Vec<GuestComparison>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReport {
    pub meta: ReportMeta,
    pub group_count: usize,
    pub messages: Vec<ProcessedMessage>,
}
