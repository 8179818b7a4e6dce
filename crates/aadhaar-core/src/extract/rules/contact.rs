//! Pincode and phone number extraction.
//!
//! Both are bare digit runs searched over the whole text, so any standalone
//! six-digit (or ten-digit) number on the card is taken.

use super::patterns::{PHONE, PINCODE};

pub fn extract_pincode(text: &str) -> Option<String> {
    PINCODE.captures(text).map(|caps| caps[1].to_string())
}

pub fn extract_phone(text: &str) -> Option<String> {
    PHONE.captures(text).map(|caps| caps[1].to_string())
}
