use web_sys::Element;

pub const DEFAULT_HOST_ID: &str = "booking-form-root";
pub const DEFAULT_DOCTORS_PATH: &str = "/patients/get_doctors_by_department/";
pub const DEFAULT_SLOTS_PATH: &str = "/patients/get_available_time_slots/";

/// Where the booking form lives and which backend it talks to
#[derive(Debug, Clone, PartialEq)]
pub struct BookingConfig {
    /// Host element whose server-rendered form gets taken over
    pub host_id: String,
    /// Empty means same origin as the page
    pub api_base_url: String,
    pub doctors_path: String,
    pub slots_path: String,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            host_id: DEFAULT_HOST_ID.to_string(),
            api_base_url: String::new(),
            doctors_path: DEFAULT_DOCTORS_PATH.to_string(),
            slots_path: DEFAULT_SLOTS_PATH.to_string(),
        }
    }
}

impl BookingConfig {
    /// Apply `data-api-base`, `data-doctors-path` and `data-slots-path`
    /// overrides from the host element
    pub fn with_overrides_from(mut self, host: &Element) -> Self {
        if let Some(base) = host.get_attribute("data-api-base") {
            self.api_base_url = base.trim_end_matches('/').to_string();
        }
        if let Some(path) = non_empty_attribute(host, "data-doctors-path") {
            self.doctors_path = path;
        }
        if let Some(path) = non_empty_attribute(host, "data-slots-path") {
            self.slots_path = path;
        }
        self
    }

    pub fn doctors_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.doctors_path)
    }

    pub fn slots_url(&self) -> String {
        format!("{}{}", self.api_base_url, self.slots_path)
    }
}

fn non_empty_attribute(element: &Element, name: &str) -> Option<String> {
    element
        .get_attribute(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
