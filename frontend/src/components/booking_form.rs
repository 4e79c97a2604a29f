use shared::SubmissionError;
use yew::prelude::*;

use super::{SelectField, TimeSlotInput};
use crate::hooks::use_booking_cascade::use_booking_cascade;
use crate::services::api::ApiClient;
use crate::services::date_utils::get_current_date;
use crate::services::page::{ServerForm, DATE_ID, DEPARTMENT_ID, DOCTOR_ID, SYMPTOMS_ID, TIME_ID};

#[derive(Properties, PartialEq)]
pub struct BookingFormProps {
    pub server_form: ServerForm,
    pub api_client: ApiClient,
}

fn field_errors(errors: &[SubmissionError], field: &str) -> Html {
    html! {
        <>
            {for errors.iter().filter(|err| err.field() == field).map(|err| html! {
                <div class="invalid-feedback d-block">{err.to_string()}</div>
            })}
        </>
    }
}

#[function_component(BookingForm)]
pub fn booking_form(props: &BookingFormProps) -> Html {
    let cascade = use_booking_cascade(&props.api_client, &props.server_form);
    let state = &cascade.state;
    let actions = &cascade.actions;
    let errors = &state.submission_errors;

    html! {
        <form
            method="post"
            action={props.server_form.action.clone()}
            class="booking-form"
            onsubmit={actions.on_submit.clone()}
        >
            {if let Some(token) = props.server_form.csrf_token.clone() {
                html! { <input type="hidden" name="csrfmiddlewaretoken" value={token} /> }
            } else { html! {} }}

            {for state.fetch_notices().into_iter().map(|notice| html! {
                <div class="alert alert-warning" role="alert">{notice}</div>
            })}

            <div class="mb-3">
                <label for={DEPARTMENT_ID} class="form-label">{"Department"}</label>
                <SelectField
                    id={DEPARTMENT_ID}
                    name="department"
                    options={props.server_form.department_options.clone()}
                    selected={state.values.department.clone()}
                    onchange={actions.on_department_change.clone()}
                    required=true
                />
                {field_errors(errors, "department")}
            </div>

            <div class="mb-3">
                <label for={DOCTOR_ID} class="form-label">{"Doctor"}</label>
                <SelectField
                    id={DOCTOR_ID}
                    name="doctor"
                    options={state.doctor_options.clone()}
                    selected={state.values.doctor.clone()}
                    onchange={actions.on_doctor_change.clone()}
                    required=true
                />
                {if state.is_loading_doctors() {
                    html! { <small class="form-text">{"Loading doctors..."}</small> }
                } else { html! {} }}
                {field_errors(errors, "doctor")}
            </div>

            <div class="mb-3">
                <label for={DATE_ID} class="form-label">{"Date"}</label>
                <input
                    type="date"
                    id={DATE_ID}
                    name="date"
                    class="form-control"
                    min={get_current_date()}
                    value={state.values.date.clone()}
                    onchange={actions.on_date_change.clone()}
                    required=true
                />
                {field_errors(errors, "date")}
            </div>

            <div class="mb-3">
                <label for={TIME_ID} class="form-label">{"Time Slot"}</label>
                <TimeSlotInput
                    value={state.values.time.clone()}
                    enabled={state.time_enabled}
                    list_id={state.suggestion_list_id().map(AttrValue::Static)}
                    suggestions={state.suggestion_entries().to_vec()}
                    loading={state.is_loading_slots()}
                    oninput={actions.on_time_input.clone()}
                />
                {field_errors(errors, "time")}
            </div>

            <div class="mb-3">
                <label for={SYMPTOMS_ID} class="form-label">{"Symptoms (Optional)"}</label>
                <textarea
                    id={SYMPTOMS_ID}
                    name="symptoms"
                    class="form-control"
                    rows="3"
                    value={state.values.symptoms.clone()}
                    oninput={actions.on_symptoms_input.clone()}
                />
            </div>

            <button type="submit" class="btn btn-primary">{"Book Appointment"}</button>
        </form>
    }
}
