pub mod use_booking_cascade;
