//! Known cities and states offered by the registration form.

/// Sentinel city value meaning "the city is given in `customCity`".
pub const OTHER_CITY: &str = "Other";

/// Cities offered by the registration form, ending with [`OTHER_CITY`].
pub const KNOWN_CITIES: &[&str] = &[
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Chennai",
    "Kolkata",
    "Hyderabad",
    "Pune",
    "Ahmedabad",
    "Surat",
    "Jaipur",
    "Lucknow",
    "Kanpur",
    OTHER_CITY,
];

/// States a school may be registered in.
pub const KNOWN_STATES: &[&str] = &[
    "Maharashtra",
    "Delhi",
    "Karnataka",
    "Tamil Nadu",
    "West Bengal",
    "Telangana",
    "Gujarat",
    "Rajasthan",
    "Uttar Pradesh",
    "Kerala",
];

/// Check if a state is one of [`KNOWN_STATES`] (exact match).
pub fn is_known_state(state: &str) -> bool {
    KNOWN_STATES.contains(&state)
}
