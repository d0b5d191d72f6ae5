use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::EngineError;
use crate::model::Field;

// ---------------------------------------------------------------------------
// Column mapping
// ---------------------------------------------------------------------------

/// Logical field → physical column name. Unmapped fields resolve to
/// the empty value downstream; nothing here is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub full_name: Option<String>,
    pub document_number: Option<String>,
    pub nationality: Option<String>,
    pub position: Option<String>,
    pub terminal: Option<String>,
    pub hotel: Option<String>,
    pub remarks: Option<String>,
    pub arrival_date: Option<String>,
    pub arrival_time: Option<String>,
    pub arrival_flight: Option<String>,
    pub depart_date: Option<String>,
    pub depart_time: Option<String>,
    pub depart_flight: Option<String>,
    pub category: Option<String>,
}

impl ColumnMapping {
    pub fn column(&self, field: Field) -> Option<&str> {
        let slot = match field {
            Field::FullName => &self.full_name,
            Field::DocumentNumber => &self.document_number,
            Field::Nationality => &self.nationality,
            Field::Position => &self.position,
            Field::Terminal => &self.terminal,
            Field::Hotel => &self.hotel,
            Field::Remarks => &self.remarks,
            Field::ArrivalDate => &self.arrival_date,
            Field::ArrivalTime => &self.arrival_time,
            Field::ArrivalFlight => &self.arrival_flight,
            Field::DepartDate => &self.depart_date,
            Field::DepartTime => &self.depart_time,
            Field::DepartFlight => &self.depart_flight,
            Field::Category => &self.category,
        };
        slot.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Cleanup rules
// ---------------------------------------------------------------------------

/// Ordered find/replace rule. Omit `field` to apply to every field.
/// With `is_regex`, `pattern` is a regex and `replacement` may use
/// capture groups; an invalid pattern degrades to literal matching.
#[derive(Debug, Clone, Deserialize)]
pub struct CleanupRule {
    #[serde(default)]
    pub field: Option<Field>,
    pub pattern: String,
    #[serde(default)]
    pub replacement: String,
    #[serde(default)]
    pub is_regex: bool,
}

// ---------------------------------------------------------------------------
// Comparison config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchBy {
    Name,
    DocumentNumber,
    Both,
}

impl Default for MatchBy {
    fn default() -> Self {
        Self::Both
    }
}

impl MatchBy {
    pub fn uses_document(self) -> bool {
        matches!(self, Self::DocumentNumber | Self::Both)
    }

    pub fn uses_name(self) -> bool {
        matches!(self, Self::Name | Self::Both)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub match_by: MatchBy,
    /// Fields diffed and carried into the per-side data maps.
    pub fields: Vec<Field>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            match_by: MatchBy::default(),
            fields: default_compare_fields(),
        }
    }
}

/// Everything except the identity fields, which the comparison
/// already surfaces on its own.
fn default_compare_fields() -> Vec<Field> {
    Field::ALL
        .into_iter()
        .filter(|f| !matches!(f, Field::FullName | Field::DocumentNumber))
        .collect()
}

// ---------------------------------------------------------------------------
// Message config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Arrival,
    Departure,
}

impl TravelMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Arrival => "Arrival",
            Self::Departure => "Departure",
        }
    }

    pub fn date_field(self) -> Field {
        match self {
            Self::Arrival => Field::ArrivalDate,
            Self::Departure => Field::DepartDate,
        }
    }

    pub fn time_field(self) -> Field {
        match self {
            Self::Arrival => Field::ArrivalTime,
            Self::Departure => Field::DepartTime,
        }
    }

    pub fn flight_field(self) -> Field {
        match self {
            Self::Arrival => Field::ArrivalFlight,
            Self::Departure => Field::DepartFlight,
        }
    }
}

impl std::fmt::Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Arrival => write!(f, "arrival"),
            Self::Departure => write!(f, "departure"),
        }
    }
}

/// Fixed record of section toggles for the structured renderer, plus
/// the custom-template switch.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MessageConfig {
    pub include_header: bool,
    pub include_passenger_list: bool,
    pub include_position: bool,
    pub include_nationality: bool,
    pub include_flight_info: bool,
    pub include_terminal: bool,
    pub include_hotel: bool,
    pub include_baggage: bool,
    pub include_remarks: bool,
    pub use_custom_template: bool,
    pub custom_template: Option<String>,
}

impl Default for MessageConfig {
    fn default() -> Self {
        Self {
            include_header: true,
            include_passenger_list: true,
            include_position: true,
            include_nationality: true,
            include_flight_info: true,
            include_terminal: true,
            include_hotel: true,
            include_baggage: true,
            include_remarks: true,
            use_custom_template: false,
            custom_template: None,
        }
    }
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// One row source: a file path (resolved by the caller relative to
/// the config file) and its column mapping.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub file: String,
    #[serde(default)]
    pub columns: ColumnMapping,
}

#[derive(Debug, Deserialize)]
pub struct CompareJob {
    pub name: String,
    pub file1: SourceConfig,
    pub file2: SourceConfig,
    #[serde(default)]
    pub compare: CompareConfig,
    #[serde(default)]
    pub cleanup: Vec<CleanupRule>,
}

impl CompareJob {
    pub fn from_toml(input: &str) -> Result<Self, EngineError> {
        let job: CompareJob =
            toml::from_str(input).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        job.validate()?;
        Ok(job)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for (side, source) in [("file1", &self.file1), ("file2", &self.file2)] {
            if source.columns.full_name.is_none() && source.columns.document_number.is_none() {
                return Err(EngineError::ConfigValidation(format!(
                    "{side}: map at least one identity column (full_name or document_number)"
                )));
            }
        }
        if self.compare.fields.is_empty() {
            return Err(EngineError::ConfigValidation(
                "compare.fields must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct MessageJob {
    pub name: String,
    pub file: SourceConfig,
    pub mode: TravelMode,
    /// `YYYY-MM-DD` dates to keep; empty means no date filter.
    #[serde(default)]
    pub dates: Vec<String>,
    #[serde(default)]
    pub message: MessageConfig,
    #[serde(default)]
    pub cleanup: Vec<CleanupRule>,
}

impl MessageJob {
    pub fn from_toml(input: &str) -> Result<Self, EngineError> {
        let job: MessageJob =
            toml::from_str(input).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        job.validate()?;
        Ok(job)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for date in &self.dates {
            if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                return Err(EngineError::ConfigValidation(format!(
                    "dates: '{date}' is not a YYYY-MM-DD date"
                )));
            }
        }
        if self.message.use_custom_template && self.message.custom_template.is_none() {
            return Err(EngineError::ConfigValidation(
                "use_custom_template requires custom_template".into(),
            ));
        }
        Ok(())
    }
}

/// Extract the `kind` field from a TOML string, defaulting to "compare".
pub fn config_kind(input: &str) -> String {
    #[derive(Deserialize)]
    struct KindProbe {
        #[serde(default = "default_kind")]
        kind: String,
    }
    fn default_kind() -> String {
        "compare".into()
    }

    toml::from_str::<KindProbe>(input)
        .map(|p| p.kind)
        .unwrap_or_else(|_| "compare".into())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
