//! Subscriber-facing prompt and message catalog.
//!
//! Every string the service ever displays lives here, so screens stay
//! reviewable in one place and no menu level can fall through to an empty
//! reply.

use crate::domain::claim::{Claim, Facility};
use crate::domain::subscriber::TemporaryPin;

// ────────────────────────────────────────────────────────────────────────────
// Root menus
// ────────────────────────────────────────────────────────────────────────────

pub fn visitor_root() -> String {
    "Welcome to Tuza\n1. Register\n2. Exit".to_string()
}

pub fn member_root(name: &str) -> String {
    format!(
        "Welcome back, {}\n1. Book pickup\n2. Cancel booking\n3. Booking status\n4. My bookings\n5. Exit",
        name
    )
}

pub fn invalid_option() -> String {
    "Invalid input. Please try again.".to_string()
}

pub fn goodbye() -> String {
    "Thank you for using Tuza. Goodbye!".to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Registration flow
// ────────────────────────────────────────────────────────────────────────────

pub fn prompt_language() -> String {
    "Choose your language:\n1. English\n2. Kinyarwanda".to_string()
}

pub fn prompt_full_name() -> String {
    "Enter your full name:".to_string()
}

pub fn prompt_email() -> String {
    "Enter your email address:".to_string()
}

pub fn prompt_national_id() -> String {
    "Enter your national ID number:".to_string()
}

pub fn prompt_city() -> String {
    "Enter your city:".to_string()
}

pub fn invalid_full_name() -> String {
    "The name you entered is not valid. Please dial again to restart.".to_string()
}

pub fn invalid_email() -> String {
    "The email address is not valid. Please dial again to restart.".to_string()
}

pub fn invalid_national_id() -> String {
    "The national ID must be 5-16 digits. Please dial again to restart.".to_string()
}

pub fn invalid_city() -> String {
    "The city you entered is not valid. Please dial again to restart.".to_string()
}

pub fn registration_done(pin: &TemporaryPin) -> String {
    format!(
        "Registration successful. Your temporary PIN is {}. Keep it safe.",
        pin
    )
}

pub fn duplicate_registration() -> String {
    "This phone number is already registered with Tuza.".to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Booking flow
// ────────────────────────────────────────────────────────────────────────────

pub fn facility_menu(facilities: &[Facility]) -> String {
    let mut out = String::from("Choose the hospital:");
    for (i, facility) in facilities.iter().enumerate() {
        out.push_str(&format!("\n{}. {}", i + 1, facility.name()));
    }
    out
}

pub fn no_facilities() -> String {
    "No hospitals are available right now. Please try again later.".to_string()
}

pub fn prompt_subject_national_id() -> String {
    "Enter the deceased's national ID number:".to_string()
}

pub fn relationship_menu() -> String {
    "Your relationship to the deceased:\n1. Parent\n2. Spouse\n3. Child\n4. Other".to_string()
}

pub fn payment_menu() -> String {
    "Payment method:\n1. Mobile Money\n2. Insurance".to_string()
}

pub fn prompt_pickup_date() -> String {
    "Enter pickup date (YYYY-MM-DD):".to_string()
}

pub fn prompt_pickup_time() -> String {
    "Enter pickup time (HH:MM):".to_string()
}

pub fn invalid_pickup_date() -> String {
    "The date must look like 2026-09-14. Please dial again to restart.".to_string()
}

pub fn invalid_pickup_time() -> String {
    "The time must look like 14:30. Please dial again to restart.".to_string()
}

pub fn subject_not_found() -> String {
    "No record matches that national ID. Please verify with the hospital.".to_string()
}

pub fn subject_already_claimed() -> String {
    "This record has already been claimed.".to_string()
}

pub fn booking_done(claim_id: i64, amount: i64) -> String {
    format!(
        "Pickup booked successfully.\nBooking ID: {}\nStorage fee due: {} RWF",
        claim_id, amount
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Cancel / status / history
// ────────────────────────────────────────────────────────────────────────────

pub fn prompt_cancel_id() -> String {
    "Enter the booking ID to cancel:".to_string()
}

pub fn prompt_status_id() -> String {
    "Enter the booking ID to check:".to_string()
}

pub fn invalid_booking_id() -> String {
    "The booking ID must be a number. Please dial again to restart.".to_string()
}

pub fn booking_cancelled() -> String {
    "Booking cancelled successfully.".to_string()
}

pub fn booking_not_found() -> String {
    "Booking not found or already closed.".to_string()
}

pub fn booking_status(claim: &Claim) -> String {
    format!(
        "Booking #{}\nPickup: {}\nStatus: {}\nAmount: {} RWF",
        claim.id(),
        claim.pickup_at().display_short(),
        claim.status().label(),
        claim.amount()
    )
}

pub fn booking_history(claims: &[Claim]) -> String {
    let mut out = String::from("Your bookings:");
    for claim in claims {
        out.push_str(&format!(
            "\n#{} {} {}",
            claim.id(),
            claim.pickup_at().display_short(),
            claim.status().label()
        ));
    }
    out
}

pub fn no_bookings() -> String {
    "You have no bookings yet.".to_string()
}

// ────────────────────────────────────────────────────────────────────────────
// Session faults
// ────────────────────────────────────────────────────────────────────────────

pub fn session_ended() -> String {
    "Your previous session has ended. Please dial again.".to_string()
}

pub fn already_processed() -> String {
    "This request was already processed. Please dial again.".to_string()
}

pub fn service_unavailable() -> String {
    "Tuza is temporarily unavailable. Please try again shortly.".to_string()
}
