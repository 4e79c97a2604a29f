//! View state of the appointment booking form and the pure updates that keep
//! doctor options and time-slot suggestions in step with the user's choices.
//!
//! Nothing here touches the network. Applying an action records the request
//! that should be made (`pending_doctors` / `pending_slots`) and the caller
//! feeds the outcome back as a `DoctorsLoaded` / `SlotsLoaded` action.

use chrono::{NaiveDate, NaiveTime};

use crate::{AppointmentRequest, CascadeError, Doctor, SubmissionError};

/// Label of the doctor selector's placeholder option
pub const DOCTOR_PLACEHOLDER: &str = "Choose Doctor";

/// Element id of the time field's suggestion list
pub const SUGGESTION_LIST_ID: &str = "time_slots";

/// One `<option>` of a select control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            disabled: false,
        }
    }

    /// Shown selected and cannot be picked back once a doctor is chosen
    pub fn doctor_placeholder() -> Self {
        Self {
            disabled: true,
            ..Self::new("", DOCTOR_PLACEHOLDER)
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.value.is_empty()
    }
}

impl From<&Doctor> for SelectOption {
    fn from(doctor: &Doctor) -> Self {
        Self::new(doctor.id.clone(), doctor.display_name.clone())
    }
}

/// Sequence number a request was issued with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestTicket(u64);

/// Monotonic request counter for one dependent field.
///
/// Only a response carrying the latest ticket may touch the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestSequence {
    latest: u64,
}

impl RequestSequence {
    pub fn issue(&mut self) -> RequestTicket {
        self.latest += 1;
        RequestTicket(self.latest)
    }

    /// Make every outstanding ticket stale without issuing a new request
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_latest(&self, ticket: RequestTicket) -> bool {
        ticket.0 == self.latest
    }
}

/// Doctors request the caller should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorsFetch {
    pub ticket: RequestTicket,
    pub department_id: String,
}

/// Slots request the caller should perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotsFetch {
    pub ticket: RequestTicket,
    pub doctor_id: String,
    pub date: String,
}

/// The `<datalist>` attached to the time field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionList {
    id: &'static str,
    pub entries: Vec<String>,
}

impl SuggestionList {
    fn new() -> Self {
        Self {
            id: SUGGESTION_LIST_ID,
            entries: Vec::new(),
        }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn replace(&mut self, entries: Vec<String>) {
        self.entries = entries;
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Raw field values, as the server rendered them or the user typed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub department: String,
    pub doctor: String,
    pub date: String,
    pub time: String,
    pub symptoms: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BookingAction {
    DepartmentChanged(String),
    DoctorChanged(String),
    DateChanged(String),
    TimeChanged(String),
    SymptomsChanged(String),
    DoctorsLoaded {
        ticket: RequestTicket,
        result: Result<Vec<Doctor>, CascadeError>,
    },
    SlotsLoaded {
        ticket: RequestTicket,
        result: Result<Vec<String>, CascadeError>,
    },
    SubmissionChecked(Vec<SubmissionError>),
}

/// Everything the booking form renders
#[derive(Debug, Clone, PartialEq)]
pub struct BookingFormState {
    pub values: FormValues,
    /// Doctor selector options, placeholder first once a department response arrived
    pub doctor_options: Vec<SelectOption>,
    pub time_enabled: bool,
    /// `None` until the first non-empty slot response
    pub suggestions: Option<SuggestionList>,
    pub doctors_error: Option<CascadeError>,
    pub slots_error: Option<CascadeError>,
    pub submission_errors: Vec<SubmissionError>,
    pub pending_doctors: Option<DoctorsFetch>,
    pub pending_slots: Option<SlotsFetch>,
    doctors_seq: RequestSequence,
    slots_seq: RequestSequence,
}

impl BookingFormState {
    /// Start from what the server rendered. The time field starts disabled;
    /// if a doctor and date were carried over, their slots are requested.
    pub fn new(values: FormValues, doctor_options: Vec<SelectOption>) -> Self {
        let mut state = Self {
            values,
            doctor_options,
            time_enabled: false,
            suggestions: None,
            doctors_error: None,
            slots_error: None,
            submission_errors: Vec::new(),
            pending_doctors: None,
            pending_slots: None,
            doctors_seq: RequestSequence::default(),
            slots_seq: RequestSequence::default(),
        };

        if !state.values.doctor.is_empty() && !state.values.date.is_empty() {
            state.request_slots();
        }
        state
    }

    pub fn apply(&mut self, action: BookingAction) {
        match action {
            BookingAction::DepartmentChanged(department_id) => {
                self.change_department(department_id)
            }
            BookingAction::DoctorChanged(doctor_id) => {
                self.values.doctor = doctor_id;
                self.request_slots();
            }
            BookingAction::DateChanged(date) => {
                self.values.date = date;
                self.request_slots();
            }
            BookingAction::TimeChanged(time) => self.values.time = time,
            BookingAction::SymptomsChanged(symptoms) => self.values.symptoms = symptoms,
            BookingAction::DoctorsLoaded { ticket, result } => self.doctors_loaded(ticket, result),
            BookingAction::SlotsLoaded { ticket, result } => self.slots_loaded(ticket, result),
            BookingAction::SubmissionChecked(errors) => self.submission_errors = errors,
        }
    }

    /// Returns the suggestion list, creating it on first use
    pub fn ensure_suggestions(&mut self) -> &mut SuggestionList {
        self.suggestions.get_or_insert_with(SuggestionList::new)
    }

    /// Value for the time input's `list` attribute
    pub fn suggestion_list_id(&self) -> Option<&'static str> {
        self.suggestions.as_ref().map(SuggestionList::id)
    }

    pub fn suggestion_entries(&self) -> &[String] {
        self.suggestions
            .as_ref()
            .map(|list| list.entries.as_slice())
            .unwrap_or_default()
    }

    pub fn is_loading_doctors(&self) -> bool {
        self.pending_doctors.is_some()
    }

    pub fn is_loading_slots(&self) -> bool {
        self.pending_slots.is_some()
    }

    /// Notices for fetches that failed, in field order
    pub fn fetch_notices(&self) -> Vec<&'static str> {
        [&self.doctors_error, &self.slots_error]
            .into_iter()
            .flatten()
            .map(|err| err.endpoint().failure_notice())
            .collect()
    }

    /// Check the form the way the booking view would before accepting it.
    /// Reports every problem found, not just the first.
    pub fn validate(&self, today: NaiveDate) -> Result<AppointmentRequest, Vec<SubmissionError>> {
        let mut errors = Vec::new();
        let values = &self.values;

        if values.department.is_empty() {
            errors.push(SubmissionError::MissingDepartment);
        }
        if values.doctor.is_empty() {
            errors.push(SubmissionError::MissingDoctor);
        }

        let date = match values.date.trim() {
            "" => {
                errors.push(SubmissionError::MissingDate);
                None
            }
            raw => match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) if date < today => {
                    errors.push(SubmissionError::DateInPast(date));
                    None
                }
                Ok(date) => Some(date),
                Err(_) => {
                    errors.push(SubmissionError::InvalidDate(raw.to_string()));
                    None
                }
            },
        };

        // A disabled time input is left out of the POST
        let raw_time = if self.time_enabled { values.time.trim() } else { "" };
        let time = match raw_time {
            "" => {
                errors.push(SubmissionError::MissingTime);
                None
            }
            raw => match parse_time(raw) {
                Some(time) => Some(time),
                None => {
                    errors.push(SubmissionError::InvalidTime(raw.to_string()));
                    None
                }
            },
        };

        match (date, time) {
            (Some(date), Some(time)) if errors.is_empty() => {
                let symptoms = values.symptoms.trim();
                Ok(AppointmentRequest {
                    department_id: values.department.clone(),
                    doctor_id: values.doctor.clone(),
                    date,
                    time,
                    symptoms: (!symptoms.is_empty()).then(|| symptoms.to_string()),
                })
            }
            _ => Err(errors),
        }
    }

    fn change_department(&mut self, department_id: String) {
        // A new department invalidates any chosen time
        self.clear_time();
        if let Some(list) = self.suggestions.as_mut() {
            list.clear();
        }
        self.slots_error = None;

        if department_id.is_empty() {
            self.doctors_seq.invalidate();
            self.pending_doctors = None;
            self.doctors_error = None;
            self.reset_doctor_options();
        } else {
            let ticket = self.doctors_seq.issue();
            self.pending_doctors = Some(DoctorsFetch {
                ticket,
                department_id: department_id.clone(),
            });
        }
        self.values.department = department_id;
    }

    fn request_slots(&mut self) {
        if self.values.doctor.is_empty() || self.values.date.is_empty() {
            self.clear_time();
            return;
        }

        let ticket = self.slots_seq.issue();
        self.pending_slots = Some(SlotsFetch {
            ticket,
            doctor_id: self.values.doctor.clone(),
            date: self.values.date.clone(),
        });
    }

    fn doctors_loaded(&mut self, ticket: RequestTicket, result: Result<Vec<Doctor>, CascadeError>) {
        if !self.doctors_seq.is_latest(ticket) {
            return;
        }
        self.pending_doctors = None;

        match result {
            Ok(doctors) => {
                self.doctors_error = None;
                self.doctor_options = std::iter::once(SelectOption::doctor_placeholder())
                    .chain(doctors.iter().map(SelectOption::from))
                    .collect();
                self.clear_doctor();
            }
            Err(err) => {
                self.doctors_error = Some(err);
                self.reset_doctor_options();
            }
        }
    }

    fn slots_loaded(&mut self, ticket: RequestTicket, result: Result<Vec<String>, CascadeError>) {
        if !self.slots_seq.is_latest(ticket) {
            return;
        }
        self.pending_slots = None;

        let slots = match result {
            Ok(slots) => {
                self.slots_error = None;
                slots
            }
            Err(err) => {
                self.slots_error = Some(err);
                Vec::new()
            }
        };

        if slots.is_empty() {
            self.values.time.clear();
            self.time_enabled = false;
            if let Some(list) = self.suggestions.as_mut() {
                list.clear();
            }
        } else {
            self.time_enabled = true;
            self.ensure_suggestions().replace(slots);
        }
    }

    fn reset_doctor_options(&mut self) {
        self.doctor_options = vec![SelectOption::doctor_placeholder()];
        self.clear_doctor();
    }

    /// No doctor means no (doctor, date) pair, so the time field goes too
    fn clear_doctor(&mut self) {
        self.values.doctor.clear();
        self.clear_time();
        if let Some(list) = self.suggestions.as_mut() {
            list.clear();
        }
    }

    /// Clear and disable the time field, dropping any slot request in flight
    fn clear_time(&mut self) {
        self.values.time.clear();
        self.time_enabled = false;
        self.slots_seq.invalidate();
        self.pending_slots = None;
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}
