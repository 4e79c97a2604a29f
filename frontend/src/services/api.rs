use gloo::net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{AvailableSlotsResponse, CascadeError, Doctor, DoctorsResponse, Endpoint};

use crate::services::config::BookingConfig;

/// Client for the two collaborator endpoints behind the booking form
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    config: BookingConfig,
}

impl ApiClient {
    pub fn with_config(config: BookingConfig) -> Self {
        Self { config }
    }

    /// Doctors allocated to a department, in the order the backend lists them
    pub async fn get_doctors_by_department(&self, department_id: &str) -> Result<Vec<Doctor>, CascadeError> {
        let request = Request::get(&self.config.doctors_url())
            .query([("department_id", department_id)]);

        let response: DoctorsResponse = Self::fetch_json(Endpoint::DoctorsByDepartment, request).await?;
        Ok(response.doctors)
    }

    /// Free slots for a doctor on a `YYYY-MM-DD` date; empty when none
    pub async fn get_available_time_slots(&self, doctor_id: &str, date: &str) -> Result<Vec<String>, CascadeError> {
        let request = Request::get(&self.config.slots_url())
            .query([("doctor_id", doctor_id), ("date", date)]);

        let response: AvailableSlotsResponse = Self::fetch_json(Endpoint::AvailableTimeSlots, request).await?;
        Ok(response.into_slots())
    }

    async fn fetch_json<T: DeserializeOwned>(endpoint: Endpoint, request: RequestBuilder) -> Result<T, CascadeError> {
        let response = request
            .send()
            .await
            .map_err(|e| CascadeError::fetch_failed(endpoint, format!("Network error: {}", e)))?;

        let body = response
            .text()
            .await
            .map_err(|e| CascadeError::fetch_failed(endpoint, format!("Failed to read response: {}", e)))?;

        decode_response(endpoint, response.status(), &response.status_text(), &body)
    }
}

/// Turn a completed response into data, or `FetchFailed` for a non-2xx
/// status or a body of the wrong shape
fn decode_response<T: DeserializeOwned>(
    endpoint: Endpoint,
    status: u16,
    status_text: &str,
    body: &str,
) -> Result<T, CascadeError> {
    if !(200..300).contains(&status) {
        return Err(CascadeError::fetch_failed(
            endpoint,
            format!("Server error {}: {}", status, status_text),
        ));
    }

    serde_json::from_str::<T>(body)
        .map_err(|e| CascadeError::fetch_failed(endpoint, format!("Failed to parse response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{AvailableSlotsResponse, DoctorsResponse};

    #[test]
    fn test_decode_success_body() {
        let response: DoctorsResponse = decode_response(
            Endpoint::DoctorsByDepartment,
            200,
            "OK",
            r#"{"doctors": [{"id": 7, "username": "Dr. Lee"}]}"#,
        )
        .unwrap();
        assert_eq!(response.doctors[0].display_name, "Dr. Lee");
    }

    #[test]
    fn test_non_success_status_is_fetch_failed() {
        let err = decode_response::<AvailableSlotsResponse>(
            Endpoint::AvailableTimeSlots,
            500,
            "Internal Server Error",
            r#"{"available_slots": ["09:00"]}"#,
        )
        .unwrap_err();

        assert_eq!(
            err,
            CascadeError::fetch_failed(Endpoint::AvailableTimeSlots, "Server error 500: Internal Server Error")
        );
    }

    #[test]
    fn test_redirect_to_login_page_is_fetch_failed() {
        let err = decode_response::<DoctorsResponse>(Endpoint::DoctorsByDepartment, 302, "Found", "")
            .unwrap_err();
        assert_eq!(err.endpoint(), Endpoint::DoctorsByDepartment);
    }

    #[test]
    fn test_malformed_body_is_fetch_failed() {
        let err = decode_response::<DoctorsResponse>(Endpoint::DoctorsByDepartment, 200, "OK", r#"{"items": []}"#)
            .unwrap_err();

        match err {
            CascadeError::FetchFailed { endpoint, reason } => {
                assert_eq!(endpoint, Endpoint::DoctorsByDepartment);
                assert!(reason.starts_with("Failed to parse response"), "{}", reason);
            }
        }
    }

    #[test]
    fn test_html_body_is_fetch_failed() {
        let result = decode_response::<AvailableSlotsResponse>(
            Endpoint::AvailableTimeSlots,
            200,
            "OK",
            "<!DOCTYPE html><html></html>",
        );
        assert!(result.is_err());
    }
}
