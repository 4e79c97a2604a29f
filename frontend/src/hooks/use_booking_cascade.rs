use std::rc::Rc;

use shared::{BookingAction, BookingFormState};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils;
use crate::services::logging::Logger;
use crate::services::page::ServerForm;

const COMPONENT: &str = "booking-cascade";

/// Yew reducer wrapper around the pure booking form state
#[derive(Clone, PartialEq)]
pub struct CascadeStore {
    pub state: BookingFormState,
}

impl Reducible for CascadeStore {
    type Action = BookingAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.state.clone();
        state.apply(action);
        Rc::new(Self { state })
    }
}

pub struct UseBookingCascadeResult {
    pub state: BookingFormState,
    pub actions: UseBookingCascadeActions,
}

#[derive(Clone, PartialEq)]
pub struct UseBookingCascadeActions {
    pub on_department_change: Callback<Event>,
    pub on_doctor_change: Callback<Event>,
    pub on_date_change: Callback<Event>,
    pub on_time_input: Callback<InputEvent>,
    pub on_symptoms_input: Callback<InputEvent>,
    pub on_submit: Callback<SubmitEvent>,
}

/// Hook keeping doctor options and time slots in step with the form.
///
/// Requests recorded in the state are performed by effects keyed on the
/// pending request, so each issued ticket is fetched exactly once.
#[hook]
pub fn use_booking_cascade(api_client: &ApiClient, server_form: &ServerForm) -> UseBookingCascadeResult {
    let initial = BookingFormState::new(server_form.values.clone(), server_form.doctor_options.clone());
    let store = use_reducer(move || CascadeStore { state: initial });

    // Doctors for the selected department
    {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();

        use_effect_with(store.state.pending_doctors.clone(), move |pending| {
            if let Some(fetch) = pending.clone() {
                Logger::debug_with_component(
                    COMPONENT,
                    &format!("Fetching doctors for department {}", fetch.department_id),
                );

                spawn_local(async move {
                    let result = api_client.get_doctors_by_department(&fetch.department_id).await;
                    match &result {
                        Ok(doctors) => Logger::info_with_component(
                            COMPONENT,
                            &format!("Loaded {} doctors for department {}", doctors.len(), fetch.department_id),
                        ),
                        Err(e) => Logger::error_with_component(COMPONENT, &e.to_string()),
                    }
                    dispatcher.dispatch(BookingAction::DoctorsLoaded {
                        ticket: fetch.ticket,
                        result,
                    });
                });
            }
            || ()
        });
    }

    // Slots for the selected doctor and date
    {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();

        use_effect_with(store.state.pending_slots.clone(), move |pending| {
            if let Some(fetch) = pending.clone() {
                Logger::debug_with_component(
                    COMPONENT,
                    &format!("Fetching slots for doctor {} on {}", fetch.doctor_id, fetch.date),
                );

                spawn_local(async move {
                    let result = api_client
                        .get_available_time_slots(&fetch.doctor_id, &fetch.date)
                        .await;
                    match &result {
                        Ok(slots) if slots.is_empty() => Logger::info_with_component(
                            COMPONENT,
                            &format!("No free slots for doctor {} on {}", fetch.doctor_id, fetch.date),
                        ),
                        Ok(slots) => Logger::info_with_component(
                            COMPONENT,
                            &format!("Loaded {} slots for doctor {} on {}", slots.len(), fetch.doctor_id, fetch.date),
                        ),
                        Err(e) => Logger::error_with_component(COMPONENT, &e.to_string()),
                    }
                    dispatcher.dispatch(BookingAction::SlotsLoaded {
                        ticket: fetch.ticket,
                        result,
                    });
                });
            }
            || ()
        });
    }

    let on_department_change = {
        let dispatcher = store.dispatcher();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            dispatcher.dispatch(BookingAction::DepartmentChanged(select.value()));
        })
    };

    let on_doctor_change = {
        let dispatcher = store.dispatcher();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            dispatcher.dispatch(BookingAction::DoctorChanged(select.value()));
        })
    };

    let on_date_change = {
        let dispatcher = store.dispatcher();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(BookingAction::DateChanged(input.value()));
        })
    };

    let on_time_input = {
        let dispatcher = store.dispatcher();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            dispatcher.dispatch(BookingAction::TimeChanged(input.value()));
        })
    };

    let on_symptoms_input = {
        let dispatcher = store.dispatcher();
        Callback::from(move |e: InputEvent| {
            let area: HtmlTextAreaElement = e.target_unchecked_into();
            dispatcher.dispatch(BookingAction::SymptomsChanged(area.value()));
        })
    };

    // Valid forms submit natively to the booking view
    let on_submit = {
        let store = store.clone();
        Callback::from(move |e: SubmitEvent| match store.state.validate(date_utils::today()) {
            Ok(request) => {
                Logger::info_with_component(
                    COMPONENT,
                    &format!(
                        "Submitting booking with doctor {} on {} at {}",
                        request.doctor_id,
                        request.date,
                        request.time.format("%H:%M")
                    ),
                );
                store.dispatch(BookingAction::SubmissionChecked(Vec::new()));
            }
            Err(errors) => {
                e.prevent_default();
                Logger::warn_with_component(
                    COMPONENT,
                    &format!("Booking form has {} problem(s), not submitting", errors.len()),
                );
                store.dispatch(BookingAction::SubmissionChecked(errors));
            }
        })
    };

    let state = store.state.clone();
    let actions = UseBookingCascadeActions {
        on_department_change,
        on_doctor_change,
        on_date_change,
        on_time_input,
        on_symptoms_input,
        on_submit,
    };

    UseBookingCascadeResult { state, actions }
}
