//! Booking payload models.
//!
//! These are plain data containers; deserializing into them is how a
//! response body's shape is validated.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier assigned by the service to a created booking.
pub type BookingId = u64;

/// Booking date range (ISO-8601 date strings, e.g. `"2025-01-01"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDates {
    /// Check-in date
    pub checkin: String,
    /// Check-out date
    pub checkout: String,
}

/// Full booking payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Guest's first name
    pub firstname: String,
    /// Guest's last name
    pub lastname: String,
    /// Total price in the service's currency unit
    pub totalprice: u32,
    /// Whether a deposit has been paid
    pub depositpaid: bool,
    /// Stay period
    pub bookingdates: BookingDates,
    /// Free-text additional requirements (e.g. "Breakfast")
    pub additionalneeds: String,
}

/// Response body of `POST /booking`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedBooking {
    /// Assigned identifier
    pub bookingid: BookingId,
    /// The booking as stored
    pub booking: Booking,
}

/// Response body of a successful `POST /auth`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    /// Session token, sent back as `Cookie: token=<token>`
    pub token: String,
}

/// Login credentials for `POST /auth`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    /// Account name
    pub username: String,
    /// Account password
    pub password: String,
}

impl Credentials {
    /// Creates credentials from a username and password.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}
