//! Form session state
//!
//! Tracks the cursor over the ordered field stops, applies edits to the
//! record with live error clearing, and carries the transient submitted
//! banner. Validation itself lives in [`super::validation`].

use super::record::{EquipmentChecklist, Field, IntakeRecord, SafetyChecklist, Section};
use super::validation::{
    self, ErrorSet, SubmitOutcome, EQUIPMENT_CHECKS_KEY, SAFETY_CHECKS_KEY,
};
use std::collections::BTreeSet;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

/// How long the success banner stays up after an accepted submission
pub const BANNER_DISPLAY: Duration = Duration::from_secs(5);

/// One tab stop in the form: an editable field or a single checklist item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
    Field(Field),
    SafetyItem(usize),
    EquipmentItem(usize),
}

impl Stop {
    pub fn section(self) -> Section {
        match self {
            Stop::Field(field) => field.section(),
            Stop::SafetyItem(_) => Section::Safety,
            Stop::EquipmentItem(_) => Section::Equipment,
        }
    }

    /// Error key cleared when this stop is edited
    pub fn error_key(self) -> &'static str {
        match self {
            Stop::Field(field) => field.name(),
            Stop::SafetyItem(_) => SAFETY_CHECKS_KEY,
            Stop::EquipmentItem(_) => EQUIPMENT_CHECKS_KEY,
        }
    }
}

static STOPS: LazyLock<Vec<Stop>> = LazyLock::new(|| {
    let mut stops = Vec::new();
    for section in Section::ALL {
        match section {
            Section::Safety => stops.extend((0..SafetyChecklist::LEN).map(Stop::SafetyItem)),
            Section::Equipment => {
                stops.extend((0..EquipmentChecklist::LEN).map(Stop::EquipmentItem));
            }
            _ => stops.extend(section.fields().iter().copied().map(Stop::Field)),
        }
    }
    stops
});

/// All tab stops in display order
pub fn stops() -> &'static [Stop] {
    &STOPS
}

/// Transient success state after an accepted submission
#[derive(Debug, Clone)]
pub struct SubmittedBanner {
    pub shown_at: Instant,
}

impl SubmittedBanner {
    pub fn new() -> Self {
        Self {
            shown_at: Instant::now(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() >= BANNER_DISPLAY
    }
}

impl Default for SubmittedBanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Editing state for one form session
#[derive(Debug, Clone)]
pub struct FormSession {
    pub record: IntakeRecord,
    pub errors: ErrorSet,
    pub submitted: Option<SubmittedBanner>,
    cursor: usize,
    dirty: bool,
}

impl FormSession {
    pub fn new() -> Self {
        Self::from_record(IntakeRecord::default())
    }

    /// Start a session from a hydrated draft
    pub fn from_record(record: IntakeRecord) -> Self {
        Self {
            record,
            errors: ErrorSet::default(),
            submitted: None,
            cursor: 0,
            dirty: false,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn active_stop(&self) -> Stop {
        stops()[self.cursor]
    }

    pub fn active_section(&self) -> Section {
        self.active_stop().section()
    }

    /// Sections currently holding validation errors
    pub fn error_sections(&self) -> BTreeSet<Section> {
        validation::sections_for_errors(&self.errors)
    }

    /// Move to the next stop (wraps around)
    pub fn next_stop(&mut self) {
        self.cursor = (self.cursor + 1) % stops().len();
    }

    /// Move to the previous stop (wraps around)
    pub fn prev_stop(&mut self) {
        if self.cursor == 0 {
            self.cursor = stops().len() - 1;
        } else {
            self.cursor -= 1;
        }
    }

    /// Jump to the first stop of a section
    pub fn jump_to_section(&mut self, section: Section) {
        if let Some(index) = stops().iter().position(|stop| stop.section() == section) {
            self.cursor = index;
        }
    }

    /// Jump to the next section after the active one (wraps around)
    pub fn next_section(&mut self) {
        let current = self.active_section();
        let index = Section::ALL.iter().position(|s| *s == current).unwrap_or(0);
        self.jump_to_section(Section::ALL[(index + 1) % Section::ALL.len()]);
    }

    /// Jump to the first stop of the previous section (wraps around)
    pub fn prev_section(&mut self) {
        let current = self.active_section();
        let index = Section::ALL.iter().position(|s| *s == current).unwrap_or(0);
        let prev = if index == 0 {
            Section::ALL.len() - 1
        } else {
            index - 1
        };
        self.jump_to_section(Section::ALL[prev]);
    }

    /// Type a character into the active field. Clears that field's error so
    /// stale messages never linger while the user fixes the value.
    pub fn input_char(&mut self, c: char) {
        self.submitted = None;
        if let Stop::Field(field) = self.active_stop() {
            if let Some(text) = self.record.text_mut(field) {
                text.push(c);
                self.errors.clear_key(field.name());
                self.dirty = true;
            }
        }
    }

    /// Remove the last character from the active field
    pub fn backspace(&mut self) {
        self.submitted = None;
        if let Stop::Field(field) = self.active_stop() {
            if let Some(text) = self.record.text_mut(field) {
                text.pop();
                self.errors.clear_key(field.name());
                self.dirty = true;
            }
        }
    }

    /// Toggle the active checklist item, or cycle the unit selector
    pub fn toggle_active(&mut self) {
        self.submitted = None;
        match self.active_stop() {
            Stop::SafetyItem(index) => {
                self.record.safety_checks.toggle(index);
                self.errors.clear_key(SAFETY_CHECKS_KEY);
                self.dirty = true;
            }
            Stop::EquipmentItem(index) => {
                self.record.equipment_checks.toggle(index);
                self.errors.clear_key(EQUIPMENT_CHECKS_KEY);
                self.dirty = true;
            }
            Stop::Field(Field::QuantityUnit) => {
                self.record.quantity_unit = self.record.quantity_unit.next();
                self.dirty = true;
            }
            Stop::Field(_) => {}
        }
    }

    /// Attempt submission. On acceptance returns the finalized record (the
    /// caller delivers it and then calls [`Self::mark_submitted`]); on
    /// rejection stores the errors and moves the cursor to the first
    /// offending stop.
    pub fn submit(&mut self) -> Option<IntakeRecord> {
        match validation::submit(&self.record) {
            SubmitOutcome::Accepted(finalized) => {
                self.errors = ErrorSet::default();
                Some(finalized)
            }
            SubmitOutcome::Rejected { errors, .. } => {
                self.errors = errors;
                self.jump_to_first_error();
                None
            }
        }
    }

    /// Show the success banner; field values are kept
    pub fn mark_submitted(&mut self) {
        self.submitted = Some(SubmittedBanner::new());
        self.dirty = false;
    }

    /// Drop the banner once its display interval has passed
    pub fn clear_expired_banner(&mut self) {
        if self.submitted.as_ref().is_some_and(SubmittedBanner::is_expired) {
            self.submitted = None;
        }
    }

    /// Clear the record and all session state
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// True when nothing has been entered yet
    pub fn is_pristine(&self) -> bool {
        self.record == IntakeRecord::default()
    }

    /// True when the record changed since hydration, submission, or reset
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn jump_to_first_error(&mut self) {
        if let Some(index) = stops()
            .iter()
            .position(|stop| self.errors.get(stop.error_key()).is_some())
        {
            self.cursor = index;
        }
    }
}

impl Default for FormSession {
    fn default() -> Self {
        Self::new()
    }
}
