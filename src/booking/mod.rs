//! Traveler-facing booking screens: flight results and the traveler form.

pub mod search;
pub mod traveler;
