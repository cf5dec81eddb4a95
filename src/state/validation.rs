//! Field validation and submission rules
//!
//! Pure functions over [`IntakeRecord`]: per-field checks, the full
//! validation pass, section completion, and the submit decision. No IO;
//! surfacing errors and persisting records is the caller's job.

use super::record::{Field, IntakeRecord, Section};
use chrono::{DateTime, Duration, Utc};
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{LazyLock, Mutex, PoisonError};
use thiserror::Error;

/// Error key for the aggregate safety checklist check
pub const SAFETY_CHECKS_KEY: &str = "safetyChecks";
/// Error key for the aggregate equipment checklist check
pub const EQUIPMENT_CHECKS_KEY: &str = "equipmentChecks";

static IMO_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^IMO\d{7}$").unwrap());

/// What went wrong with a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingRequiredField,
    InvalidFormat,
    OutOfRange,
    IncompleteChecklist,
}

/// A single field-scoped (or checklist-group-scoped) validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    fn missing(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::MissingRequiredField,
            message: message.into(),
        }
    }

    fn invalid(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::InvalidFormat,
            message: message.into(),
        }
    }

    fn out_of_range(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::OutOfRange,
            message: message.into(),
        }
    }

    fn incomplete(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::IncompleteChecklist,
            message: message.into(),
        }
    }
}

/// Validation errors collected in one pass, keyed by wire field name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSet {
    errors: BTreeMap<&'static str, FieldError>,
}

impl ErrorSet {
    pub fn insert(&mut self, key: &'static str, error: FieldError) {
        self.errors.insert(key, error);
    }

    pub fn get(&self, key: &str) -> Option<&FieldError> {
        self.errors.get(key)
    }

    /// Drop the error for one key, if any (live clearing while editing)
    pub fn clear_key(&mut self, key: &str) {
        self.errors.remove(key);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &FieldError)> + '_ {
        self.errors.iter().map(|(k, v)| (*k, v))
    }
}

/// Result of a submission attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Record accepted; the returned copy carries the approval stamp
    Accepted(IntakeRecord),
    /// Record rejected; `sections` are the ones the UI must reveal
    Rejected {
        errors: ErrorSet,
        sections: BTreeSet<Section>,
    },
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validate one field in isolation
pub fn validate_field(record: &IntakeRecord, field: Field) -> Option<FieldError> {
    let text = record.text(field).trim();
    match field {
        Field::Quantity => {
            if text.is_empty() {
                return Some(FieldError::missing("Quantity is required"));
            }
            match parse_number(text) {
                None => Some(FieldError::invalid("Quantity must be a number")),
                Some(v) if v <= 0.0 => {
                    Some(FieldError::out_of_range("Quantity must be greater than zero"))
                }
                Some(_) => None,
            }
        }
        Field::ImoNumber => {
            if !text.is_empty() && !IMO_RE.is_match(text) {
                Some(FieldError::invalid(
                    "IMO number must be \"IMO\" followed by 7 digits",
                ))
            } else {
                None
            }
        }
        Field::QuantityUnit => None,
        Field::CargoTemperature
        | Field::CargoDensity
        | Field::StartupLoadRate
        | Field::MaxLoadRate
        | Field::MaxPressure => {
            if !text.is_empty() && parse_number(text).is_none() {
                Some(FieldError::invalid(format!(
                    "{} must be a number",
                    field.label()
                )))
            } else {
                None
            }
        }
        _ => {
            if text.is_empty() {
                Some(FieldError::missing(format!(
                    "{} is required",
                    field.label()
                )))
            } else {
                None
            }
        }
    }
}

/// Re-validate every field plus both checklist aggregates.
/// Collects all errors; never stops at the first.
pub fn validate_all(record: &IntakeRecord) -> ErrorSet {
    let mut errors = ErrorSet::default();
    for field in Field::ALL {
        if let Some(error) = validate_field(record, field) {
            errors.insert(field.name(), error);
        }
    }
    if !record.safety_checks.all_checked() {
        errors.insert(
            SAFETY_CHECKS_KEY,
            FieldError::incomplete("All safety checklist items must be confirmed"),
        );
    }
    if !record.equipment_checks.all_checked() {
        errors.insert(
            EQUIPMENT_CHECKS_KEY,
            FieldError::incomplete("All equipment checks must be confirmed"),
        );
    }
    errors
}

/// Completion indicator for one section. Purely informational; submission
/// always runs [`validate_all`] regardless of displayed status.
pub fn section_status(record: &IntakeRecord, section: Section) -> bool {
    match section {
        Section::Safety => record.safety_checks.all_checked(),
        Section::Equipment => record.equipment_checks.all_checked(),
        _ => section
            .fields()
            .iter()
            .all(|field| !record.is_field_empty(*field)),
    }
}

/// Section owning one error key
pub fn section_for_key(key: &str) -> Option<Section> {
    match key {
        SAFETY_CHECKS_KEY => Some(Section::Safety),
        EQUIPMENT_CHECKS_KEY => Some(Section::Equipment),
        _ => Field::from_name(key).map(Field::section),
    }
}

/// Sections holding at least one invalid field, for force-reveal after a
/// failed submit
pub fn sections_for_errors(errors: &ErrorSet) -> BTreeSet<Section> {
    errors.keys().filter_map(section_for_key).collect()
}

static LAST_APPROVAL: Mutex<Option<DateTime<Utc>>> = Mutex::new(None);

/// Approval stamps must increase across repeated submissions even when the
/// wall clock has not advanced.
fn approval_timestamp() -> DateTime<Utc> {
    let mut last = LAST_APPROVAL
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let now = Utc::now();
    let stamp = match *last {
        Some(prev) if now <= prev => prev + Duration::nanoseconds(1),
        _ => now,
    };
    *last = Some(stamp);
    stamp
}

/// Run the full validation pass and decide the submission attempt
pub fn submit(record: &IntakeRecord) -> SubmitOutcome {
    let errors = validate_all(record);
    if errors.is_empty() {
        let mut finalized = record.clone();
        finalized.approval_date_time = Some(approval_timestamp());
        SubmitOutcome::Accepted(finalized)
    } else {
        let sections = sections_for_errors(&errors);
        SubmitOutcome::Rejected { errors, sections }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::record::{EquipmentChecklist, SafetyChecklist};

    fn all_checked_safety() -> SafetyChecklist {
        let mut checks = SafetyChecklist::default();
        for i in 0..SafetyChecklist::LEN {
            checks.toggle(i);
        }
        checks
    }

    fn all_checked_equipment() -> EquipmentChecklist {
        let mut checks = EquipmentChecklist::default();
        for i in 0..EquipmentChecklist::LEN {
            checks.toggle(i);
        }
        checks
    }

    fn valid_record() -> IntakeRecord {
        IntakeRecord {
            vessel_name: "MT Stolt Auk".to_string(),
            vessel_id: "V-2041".to_string(),
            imo_number: "IMO9123456".to_string(),
            flag_state: "Norway".to_string(),
            vessel_type: "Chemical tanker".to_string(),
            date_of_arrival: "2025-03-14".to_string(),
            time_of_arrival: "06:30".to_string(),
            berth_assignment: "Jetty 4".to_string(),
            estimated_departure: "2025-03-15T18:00".to_string(),
            quantity: "12500".to_string(),
            cargo_temperature: "18.5".to_string(),
            cargo_density: "791.3".to_string(),
            startup_load_rate: "150".to_string(),
            max_load_rate: "600".to_string(),
            max_pressure: "5.5".to_string(),
            safety_checks: all_checked_safety(),
            equipment_checks: all_checked_equipment(),
            vessel_rep_name: "A. Larsen".to_string(),
            vessel_rep_signature: "A. Larsen".to_string(),
            terminal_rep_name: "P. Okafor".to_string(),
            terminal_rep_signature: "P. Okafor".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_record_has_no_errors() {
        assert!(validate_all(&valid_record()).is_empty());
    }

    #[test]
    fn test_each_required_field_reports_missing() {
        let required = [
            Field::VesselName,
            Field::VesselId,
            Field::FlagState,
            Field::VesselType,
            Field::DateOfArrival,
            Field::TimeOfArrival,
            Field::BerthAssignment,
            Field::EstimatedDeparture,
            Field::Quantity,
            Field::VesselRepName,
            Field::VesselRepSignature,
            Field::TerminalRepName,
            Field::TerminalRepSignature,
        ];
        for field in required {
            let mut record = valid_record();
            if let Some(text) = record.text_mut(field) {
                text.clear();
            }
            let errors = validate_all(&record);
            let error = errors.get(field.name()).unwrap_or_else(|| {
                panic!("no error reported for cleared {}", field.name())
            });
            assert_eq!(error.kind, ErrorKind::MissingRequiredField);
            assert!(sections_for_errors(&errors).contains(&field.section()));
        }
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let mut record = valid_record();
        record.vessel_name = "   ".to_string();
        let errors = validate_all(&record);
        assert_eq!(
            errors.get("vesselName").map(|e| e.kind),
            Some(ErrorKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_imo_number_pattern() {
        let mut record = valid_record();
        record.imo_number = "IMO123".to_string();
        let errors = validate_all(&record);
        assert_eq!(
            errors.get("imoNumber").map(|e| e.kind),
            Some(ErrorKind::InvalidFormat)
        );

        record.imo_number = "IMO1234567".to_string();
        assert!(validate_all(&record).get("imoNumber").is_none());

        // Optional: an empty IMO number passes
        record.imo_number.clear();
        assert!(validate_all(&record).get("imoNumber").is_none());

        // But eight digits, or a missing prefix, does not
        record.imo_number = "IMO12345678".to_string();
        assert!(validate_all(&record).get("imoNumber").is_some());
        record.imo_number = "1234567".to_string();
        assert!(validate_all(&record).get("imoNumber").is_some());
    }

    #[test]
    fn test_quantity_range_and_format() {
        let mut record = valid_record();

        record.quantity = "-5".to_string();
        assert_eq!(
            validate_all(&record).get("quantity").map(|e| e.kind),
            Some(ErrorKind::OutOfRange)
        );

        record.quantity = "0".to_string();
        assert_eq!(
            validate_all(&record).get("quantity").map(|e| e.kind),
            Some(ErrorKind::OutOfRange)
        );

        record.quantity = "12.5".to_string();
        assert!(validate_all(&record).get("quantity").is_none());

        record.quantity = "twelve".to_string();
        assert_eq!(
            validate_all(&record).get("quantity").map(|e| e.kind),
            Some(ErrorKind::InvalidFormat)
        );
    }

    #[test]
    fn test_optional_numeric_fields_validate_only_when_filled() {
        let mut record = valid_record();
        record.cargo_temperature.clear();
        assert!(validate_all(&record).get("cargoTemperature").is_none());

        record.cargo_temperature = "warm".to_string();
        assert_eq!(
            validate_all(&record).get("cargoTemperature").map(|e| e.kind),
            Some(ErrorKind::InvalidFormat)
        );
    }

    #[test]
    fn test_single_unchecked_safety_item_reports_one_aggregate_error() {
        let mut record = valid_record();
        record.safety_checks.toggle(3);

        let errors = validate_all(&record);
        assert_eq!(
            errors.iter().map(|(key, _)| key).collect::<Vec<_>>(),
            vec![SAFETY_CHECKS_KEY]
        );
        assert_eq!(
            errors.get(SAFETY_CHECKS_KEY).map(|e| e.kind),
            Some(ErrorKind::IncompleteChecklist)
        );
        assert!(!section_status(&record, Section::Safety));
        assert!(section_status(&record, Section::Equipment));
    }

    #[test]
    fn test_section_status_requires_every_field_filled() {
        let mut record = valid_record();
        assert!(section_status(&record, Section::VesselInfo));
        assert!(section_status(&record, Section::Cargo));

        // Optional fields still count towards completion display
        record.max_pressure.clear();
        assert!(!section_status(&record, Section::Cargo));
        assert!(validate_all(&record).is_empty());
    }

    #[test]
    fn test_sections_for_errors_groups_by_owner() {
        let mut record = valid_record();
        record.vessel_name.clear();
        record.quantity = "-1".to_string();
        record.terminal_rep_signature.clear();
        record.equipment_checks.toggle(0);

        let errors = validate_all(&record);
        let sections = sections_for_errors(&errors);
        assert_eq!(
            sections.into_iter().collect::<Vec<_>>(),
            vec![
                Section::VesselInfo,
                Section::Cargo,
                Section::Equipment,
                Section::Signatures,
            ]
        );
    }

    #[test]
    fn test_submit_accepts_valid_record_with_monotonic_stamp() {
        let record = valid_record();
        let before = Utc::now();

        let first = match submit(&record) {
            SubmitOutcome::Accepted(finalized) => finalized,
            SubmitOutcome::Rejected { errors, .. } => {
                panic!("rejected valid record: {:?}", errors)
            }
        };
        let first_stamp = first.approval_date_time.unwrap();
        assert!(first_stamp >= before);

        // Repeated submissions get strictly increasing stamps
        let mut previous = first_stamp;
        for _ in 0..5 {
            match submit(&record) {
                SubmitOutcome::Accepted(finalized) => {
                    let stamp = finalized.approval_date_time.unwrap();
                    assert!(stamp > previous);
                    previous = stamp;
                }
                SubmitOutcome::Rejected { .. } => panic!("rejected valid record"),
            }
        }
    }

    #[test]
    fn test_submit_rejects_without_stamping() {
        let mut record = valid_record();
        record.vessel_id.clear();

        match submit(&record) {
            SubmitOutcome::Rejected { errors, sections } => {
                assert!(errors.get("vesselId").is_some());
                assert!(sections.contains(&Section::VesselInfo));
            }
            SubmitOutcome::Accepted(_) => panic!("accepted invalid record"),
        }
        assert!(record.approval_date_time.is_none());
    }
}
