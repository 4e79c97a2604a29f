//! Bridge between the server-rendered booking page and the Yew form.
//!
//! The page template renders a plain `<form>` inside a host element. Before
//! mounting, everything the server put into that form (choices, values,
//! CSRF token) is read out so the Yew form can render the same controls
//! with the same ids and names.

use anyhow::{anyhow, Context};
use shared::{FormValues, SelectOption};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlOptionElement, HtmlSelectElement, HtmlTextAreaElement};

use crate::components::booking_form::BookingFormProps;
use crate::components::BookingForm;
use crate::services::api::ApiClient;
use crate::services::config::BookingConfig;
use crate::services::logging::Logger;

pub const DEPARTMENT_ID: &str = "id_department";
pub const DOCTOR_ID: &str = "id_doctor";
pub const DATE_ID: &str = "id_date";
pub const TIME_ID: &str = "id_time";
pub const SYMPTOMS_ID: &str = "id_symptoms";

const CSRF_FIELD: &str = "csrfmiddlewaretoken";

/// What the server rendered into the booking form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerForm {
    /// Empty posts back to the current URL
    pub action: String,
    pub csrf_token: Option<String>,
    pub department_options: Vec<SelectOption>,
    pub doctor_options: Vec<SelectOption>,
    pub values: FormValues,
}

/// Read the server-rendered form inside `host`
pub fn read_server_form(host: &Element) -> anyhow::Result<ServerForm> {
    let form: HtmlFormElement = find(host, "form")?.context("no <form> inside the booking host")?;
    let department: HtmlSelectElement = required_control(host, DEPARTMENT_ID)?;
    let doctor: HtmlSelectElement = required_control(host, DOCTOR_ID)?;
    let date: HtmlInputElement = required_control(host, DATE_ID)?;
    let time: HtmlInputElement = required_control(host, TIME_ID)?;
    let symptoms: Option<HtmlTextAreaElement> = find(host, &format!("#{}", SYMPTOMS_ID))?;
    let csrf: Option<HtmlInputElement> = find(host, &format!("input[name={}]", CSRF_FIELD))?;

    Ok(ServerForm {
        action: form.get_attribute("action").unwrap_or_default(),
        csrf_token: csrf.map(|input| input.value()),
        department_options: select_options(&department),
        doctor_options: select_options(&doctor),
        values: FormValues {
            department: department.value(),
            doctor: doctor.value(),
            date: date.value(),
            time: time.value(),
            symptoms: symptoms.map(|area| area.value()).unwrap_or_default(),
        },
    })
}

/// Replace the server-rendered form inside the host with the Yew booking form
pub fn mount(config: BookingConfig) -> anyhow::Result<()> {
    let document = gloo::utils::document();
    let host = document
        .get_element_by_id(&config.host_id)
        .with_context(|| format!("host element #{} not found", config.host_id))?;

    let config = config.with_overrides_from(&host);
    let server_form = read_server_form(&host).context("could not read the server-rendered booking form")?;

    Logger::info_with_component(
        "booking-page",
        &format!(
            "Mounting booking form with {} departments against '{}'",
            server_form.department_options.len(),
            config.doctors_url()
        ),
    );

    host.set_inner_html("");
    yew::Renderer::<BookingForm>::with_root_and_props(
        host,
        BookingFormProps {
            server_form,
            api_client: ApiClient::with_config(config),
        },
    )
    .render();
    Ok(())
}

fn select_options(select: &HtmlSelectElement) -> Vec<SelectOption> {
    (0..select.length())
        .filter_map(|index| select.item(index))
        .filter_map(|element| element.dyn_into::<HtmlOptionElement>().ok())
        .map(|option| SelectOption {
            value: option.value(),
            label: option.text(),
            disabled: option.disabled(),
        })
        .collect()
}

fn required_control<T: JsCast>(host: &Element, id: &str) -> anyhow::Result<T> {
    find(host, &format!("#{}", id))?.with_context(|| format!("missing form control #{}", id))
}

fn find<T: JsCast>(host: &Element, selector: &str) -> anyhow::Result<Option<T>> {
    let element = host.query_selector(selector).map_err(|e| js_error(selector, e))?;
    element
        .map(|element| {
            element
                .dyn_into::<T>()
                .map_err(|_| anyhow!("'{}' matched an element of an unexpected type", selector))
        })
        .transpose()
}

fn js_error(selector: &str, err: JsValue) -> anyhow::Error {
    anyhow!("query '{}' failed: {:?}", selector, err)
}
