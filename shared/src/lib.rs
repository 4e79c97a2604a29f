use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

pub mod cascade;

pub use cascade::*;

/// A doctor as returned by the "doctors by department" endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "DoctorWire")]
pub struct Doctor {
    /// Opaque identifier; the backend sends an integer, but strings are accepted too
    pub id: String,
    /// Label shown in the doctor selector
    #[serde(rename = "username")]
    pub display_name: String,
}

/// Doctor entry as sent; the label may come as `username`, `name` or both
#[derive(Deserialize)]
struct DoctorWire {
    #[serde(deserialize_with = "deserialize_opaque_id")]
    id: String,
    username: Option<String>,
    name: Option<String>,
}

impl TryFrom<DoctorWire> for Doctor {
    type Error = String;

    fn try_from(wire: DoctorWire) -> Result<Self, Self::Error> {
        let display_name = wire
            .username
            .or(wire.name)
            .ok_or_else(|| format!("doctor {} has neither `username` nor `name`", wire.id))?;
        Ok(Doctor {
            id: wire.id,
            display_name,
        })
    }
}

/// Response of `GET /patients/get_doctors_by_department/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorsResponse {
    pub doctors: Vec<Doctor>,
}

/// Response of `GET /patients/get_available_time_slots/`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    /// Missing and `null` both mean no slots
    #[serde(default)]
    pub available_slots: Option<Vec<String>>,
}

impl AvailableSlotsResponse {
    pub fn into_slots(self) -> Vec<String> {
        self.available_slots.unwrap_or_default()
    }
}

/// Accepts `7` or `"7"` and yields `"7"`
fn deserialize_opaque_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OpaqueId {
        Integer(i64),
        Text(String),
    }

    Ok(match OpaqueId::deserialize(deserializer)? {
        OpaqueId::Integer(value) => value.to_string(),
        OpaqueId::Text(value) => value,
    })
}

/// The collaborator endpoints the booking form depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    DoctorsByDepartment,
    AvailableTimeSlots,
}

impl Endpoint {
    /// Message shown next to the affected field when a fetch fails
    pub fn failure_notice(&self) -> &'static str {
        match self {
            Endpoint::DoctorsByDepartment => "Could not load doctors. Please try again.",
            Endpoint::AvailableTimeSlots => "Could not load available times. Please try again.",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::DoctorsByDepartment => write!(f, "get_doctors_by_department"),
            Endpoint::AvailableTimeSlots => write!(f, "get_available_time_slots"),
        }
    }
}

/// Failure of a cascade fetch: transport error, bad status or unexpected body
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CascadeError {
    #[error("Failed to fetch {endpoint}: {reason}")]
    FetchFailed { endpoint: Endpoint, reason: String },
}

impl CascadeError {
    pub fn fetch_failed(endpoint: Endpoint, reason: impl Into<String>) -> Self {
        CascadeError::FetchFailed {
            endpoint,
            reason: reason.into(),
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            CascadeError::FetchFailed { endpoint, .. } => *endpoint,
        }
    }
}

/// Client-side validation failures found before the booking form is submitted
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SubmissionError {
    #[error("Please select a department")]
    MissingDepartment,
    #[error("Please select a doctor")]
    MissingDoctor,
    #[error("Please choose a date")]
    MissingDate,
    #[error("'{0}' is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Appointments cannot be booked in the past ({0})")]
    DateInPast(NaiveDate),
    #[error("Please choose a time slot")]
    MissingTime,
    #[error("'{0}' is not a valid time (expected HH:MM)")]
    InvalidTime(String),
}

impl SubmissionError {
    /// Name of the form field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            SubmissionError::MissingDepartment => "department",
            SubmissionError::MissingDoctor => "doctor",
            SubmissionError::MissingDate
            | SubmissionError::InvalidDate(_)
            | SubmissionError::DateInPast(_) => "date",
            SubmissionError::MissingTime | SubmissionError::InvalidTime(_) => "time",
        }
    }
}

/// A booking that passed client-side validation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppointmentRequest {
    pub department_id: String,
    pub doctor_id: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub symptoms: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doctor_accepts_integer_and_string_ids() {
        let doctor: Doctor = serde_json::from_str(r#"{"id": 7, "username": "Dr. Lee"}"#).unwrap();
        assert_eq!(doctor.id, "7");
        assert_eq!(doctor.display_name, "Dr. Lee");

        let doctor: Doctor = serde_json::from_str(r#"{"id": "abc", "username": "Dr. Kim"}"#).unwrap();
        assert_eq!(doctor.id, "abc");
    }

    #[test]
    fn test_doctor_accepts_name_alias() {
        // The Django view emits `name` (full name falling back to username)
        let response: DoctorsResponse =
            serde_json::from_str(r#"{"doctors": [{"id": 3, "name": "Grace Hopper"}]}"#).unwrap();
        assert_eq!(response.doctors[0].display_name, "Grace Hopper");
    }

    #[test]
    fn test_doctor_with_username_and_name_prefers_username() {
        let response: DoctorsResponse = serde_json::from_str(
            r#"{"doctors": [{"id": 7, "username": "drlee", "name": "Dr. Lee"}]}"#,
        )
        .unwrap();
        assert_eq!(response.doctors[0].id, "7");
        assert_eq!(response.doctors[0].display_name, "drlee");
    }

    #[test]
    fn test_doctors_response_requires_doctors_key() {
        assert!(serde_json::from_str::<DoctorsResponse>("{}").is_err());
        assert!(serde_json::from_str::<DoctorsResponse>(r#"{"doctors": [{"id": 1}]}"#).is_err());
    }

    #[test]
    fn test_slots_response_absent_or_null_means_empty() {
        let absent: AvailableSlotsResponse = serde_json::from_str("{}").unwrap();
        assert!(absent.into_slots().is_empty());

        let null: AvailableSlotsResponse =
            serde_json::from_str(r#"{"available_slots": null}"#).unwrap();
        assert!(null.into_slots().is_empty());

        let some: AvailableSlotsResponse =
            serde_json::from_str(r#"{"available_slots": ["09:00", "09:30"]}"#).unwrap();
        assert_eq!(some.into_slots(), vec!["09:00", "09:30"]);
    }

    #[test]
    fn test_cascade_error_message_names_endpoint() {
        let err = CascadeError::fetch_failed(Endpoint::AvailableTimeSlots, "HTTP 500");
        assert_eq!(err.endpoint(), Endpoint::AvailableTimeSlots);
        assert_eq!(err.to_string(), "Failed to fetch get_available_time_slots: HTTP 500");
    }

    #[test]
    fn test_submission_error_fields() {
        assert_eq!(SubmissionError::MissingDoctor.field(), "doctor");
        assert_eq!(SubmissionError::InvalidDate("x".to_string()).field(), "date");
        assert_eq!(SubmissionError::InvalidTime("x".to_string()).field(), "time");
    }
}
