use yew::prelude::*;

use crate::services::page::TIME_ID;

#[derive(Properties, PartialEq)]
pub struct TimeSlotInputProps {
    pub value: String,
    pub enabled: bool,
    /// Id of the suggestion list, once one exists
    pub list_id: Option<AttrValue>,
    pub suggestions: Vec<String>,
    pub loading: bool,
    pub oninput: Callback<InputEvent>,
}

/// Free-text time field with its `<datalist>` of available slots
#[function_component(TimeSlotInput)]
pub fn time_slot_input(props: &TimeSlotInputProps) -> Html {
    html! {
        <>
            <input
                type="text"
                id={TIME_ID}
                name="time"
                class="form-control"
                placeholder="HH:MM"
                autocomplete="off"
                value={props.value.clone()}
                disabled={!props.enabled}
                list={props.list_id.clone()}
                oninput={props.oninput.clone()}
            />
            {if let Some(list_id) = props.list_id.clone() {
                html! {
                    <datalist id={list_id}>
                        {for props.suggestions.iter().map(|slot| html! {
                            <option value={slot.clone()} />
                        })}
                    </datalist>
                }
            } else { html! {} }}
            {if props.loading {
                html! { <small class="form-text">{"Checking availability..."}</small> }
            } else { html! {} }}
        </>
    }
}
