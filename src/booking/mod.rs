//! Booking domain: payload models and the service client.
//!
//! | Operation | Verb | Endpoint |
//! |---|---|---|
//! | [`BookingApi::create_token`] | POST | `/auth` |
//! | [`BookingApi::create_booking`] | POST | `/booking` |
//! | [`BookingApi::get_booking`] | GET | `/booking/{id}` |
//! | [`BookingApi::update_booking`] | PUT | `/booking/{id}` |
//! | [`BookingApi::partial_update`] | PATCH | `/booking/{id}` |
//! | [`BookingApi::delete_booking`] | DELETE | `/booking/{id}` |
//! | [`BookingApi::health_check`] | GET | `/ping` |

mod api;
mod fake;
mod models;

#[cfg(test)]
pub(crate) mod test_fixtures;

pub use api::BookingApi;
pub use fake::{MAX_PRICE, MIN_PRICE, random_booking};
pub use models::{Booking, BookingDates, BookingId, CreatedBooking, Credentials, TokenResponse};
