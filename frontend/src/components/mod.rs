pub mod booking_form;
pub mod select_field;
pub mod time_slot_input;

pub use booking_form::BookingForm;
pub use select_field::SelectField;
pub use time_slot_input::TimeSlotInput;
