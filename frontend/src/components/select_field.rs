use shared::SelectOption;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub id: AttrValue,
    pub name: AttrValue,
    pub options: Vec<SelectOption>,
    /// Value of the option that should be selected
    pub selected: String,
    pub onchange: Callback<Event>,
    #[prop_or_default]
    pub required: bool,
}

/// A `<select>` whose selection follows `selected`, including after its
/// options have been replaced wholesale
#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let select_ref = use_node_ref();

    {
        let select_ref = select_ref.clone();
        use_effect_with((props.options.clone(), props.selected.clone()), move |(_, selected)| {
            if let Some(select) = select_ref.cast::<HtmlSelectElement>() {
                select.set_value(selected);
            }
            || ()
        });
    }

    html! {
        <select
            ref={select_ref}
            id={props.id.clone()}
            name={props.name.clone()}
            class="form-select"
            required={props.required}
            onchange={props.onchange.clone()}
        >
            {for props.options.iter().map(|option| html! {
                <option
                    value={option.value.clone()}
                    disabled={option.disabled}
                    selected={option.value == props.selected}
                >
                    {&option.label}
                </option>
            })}
        </select>
    }
}
