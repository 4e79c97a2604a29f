mod components;
mod hooks;
mod services;

use services::config::BookingConfig;
use services::logging::Logger;

fn main() {
    // Without a usable host the server-rendered form keeps working on its own
    if let Err(e) = services::page::mount(BookingConfig::default()) {
        Logger::error_with_component("booking-page", &format!("Booking form not enhanced: {:#}", e));
    }
}
