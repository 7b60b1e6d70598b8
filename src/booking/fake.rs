//! Random booking payloads for test cases.

use rand::Rng;
use rand::seq::SliceRandom;

use super::{Booking, BookingDates};

const FIRST_NAMES: &[&str] = &[
    "Sally", "Jim", "Mark", "Susan", "Eric", "Mary", "Jackson", "Aisha", "Kenji", "Lucia",
];

const LAST_NAMES: &[&str] = &[
    "Brown", "Wilson", "Jackson", "Smith", "Ericsson", "Tanaka", "Okafor", "Novak", "Garcia",
];

/// Lowest generated total price.
pub const MIN_PRICE: u32 = 50;

/// Highest generated total price.
pub const MAX_PRICE: u32 = 500;

/// Generates a booking with random guest name and price.
///
/// Dates and additional needs are fixed so bookings stay valid for the
/// service regardless of the current date.
#[must_use]
pub fn random_booking<R: Rng + ?Sized>(rng: &mut R) -> Booking {
    Booking {
        firstname: pick(rng, FIRST_NAMES),
        lastname: pick(rng, LAST_NAMES),
        totalprice: rng.gen_range(MIN_PRICE..=MAX_PRICE),
        depositpaid: false,
        bookingdates: BookingDates {
            checkin: "2025-01-01".to_string(),
            checkout: "2025-01-05".to_string(),
        },
        additionalneeds: "Breakfast".to_string(),
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, names: &[&str]) -> String {
    names.choose(rng).copied().unwrap_or("Guest").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_booking_is_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let booking = random_booking(&mut rng);
            assert!((MIN_PRICE..=MAX_PRICE).contains(&booking.totalprice));
            assert!(FIRST_NAMES.contains(&booking.firstname.as_str()));
            assert!(LAST_NAMES.contains(&booking.lastname.as_str()));
        }
    }

    #[test]
    fn same_seed_gives_same_booking() {
        let first = random_booking(&mut StdRng::seed_from_u64(42));
        let second = random_booking(&mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
    }
}
