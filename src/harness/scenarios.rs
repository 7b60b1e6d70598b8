//! Bundled test scenarios against the booking service.

use std::fmt;

use serde::Serialize;

use super::{CaseError, Expectations};
use crate::booking::{Booking, BookingApi, BookingId, CreatedBooking};
use crate::transport::{HttpClient, HttpResponse};

/// First name written by the full update in [`crud_flow`].
pub const UPDATED_FIRSTNAME: &str = "UpdatedName";

/// First name written by the partial update in [`partial_update_flow`].
pub const PATCHED_FIRSTNAME: &str = "PatchedName";

/// A bundled scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    /// `GET /ping`
    HealthCheck,
    /// Create, read, update, verify and delete one booking.
    CrudFlow,
    /// Create, patch one field, verify and delete one booking.
    PartialUpdate,
}

impl Scenario {
    /// Every scenario, in run order.
    pub const ALL: [Self; 3] = [Self::HealthCheck, Self::CrudFlow, Self::PartialUpdate];

    /// Case name used in logs and reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HealthCheck => "health_check",
            Self::CrudFlow => "crud_flow",
            Self::PartialUpdate => "partial_update",
        }
    }

    /// Whether the scenario writes and so needs an auth token.
    #[must_use]
    pub const fn needs_token(self) -> bool {
        !matches!(self, Self::HealthCheck)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Serialize)]
struct FirstnamePatch<'a> {
    firstname: &'a str,
}

/// Checks that the service is up.
///
/// # Errors
///
/// Returns [`CaseError`] if the call fails or the status is unexpected.
pub async fn health_check<H: HttpClient>(
    api: &BookingApi<H>,
    expect: &Expectations,
) -> Result<(), CaseError> {
    let response = api
        .health_check()
        .await
        .map_err(CaseError::http("health check"))?;
    expect.health.check("health check", &response)
}

/// Creates `booking`, reads it back, replaces it with an updated first
/// name, verifies the update and deletes it. Makes exactly five calls
/// when every step succeeds.
///
/// `api` must carry a token for the write steps.
///
/// # Errors
///
/// Returns [`CaseError`] for the first step that fails.
pub async fn crud_flow<H: HttpClient>(
    api: &BookingApi<H>,
    booking: &Booking,
    expect: &Expectations,
) -> Result<(), CaseError> {
    let id = create(api, booking, expect).await?;

    let response = api.get_booking(id).await.map_err(CaseError::http("read"))?;
    expect.read.check("read", &response)?;

    let updated = Booking {
        firstname: UPDATED_FIRSTNAME.to_string(),
        ..booking.clone()
    };
    let response = api
        .update_booking(id, &updated)
        .await
        .map_err(CaseError::http("update"))?;
    expect.update.check("update", &response)?;

    let stored = read_back(api, id, "verify update", expect).await?;
    ensure_eq("verify update", "firstname", UPDATED_FIRSTNAME, &stored.firstname)?;

    delete(api, id, expect).await
}

/// Creates `booking`, patches its first name, verifies that only that
/// field changed and deletes it.
///
/// `api` must carry a token for the write steps.
///
/// # Errors
///
/// Returns [`CaseError`] for the first step that fails.
pub async fn partial_update_flow<H: HttpClient>(
    api: &BookingApi<H>,
    booking: &Booking,
    expect: &Expectations,
) -> Result<(), CaseError> {
    let id = create(api, booking, expect).await?;

    let response = api
        .partial_update(id, &FirstnamePatch {
            firstname: PATCHED_FIRSTNAME,
        })
        .await
        .map_err(CaseError::http("partial update"))?;
    expect.partial_update.check("partial update", &response)?;

    let stored = read_back(api, id, "verify partial update", expect).await?;
    ensure_eq("verify partial update", "firstname", PATCHED_FIRSTNAME, &stored.firstname)?;
    ensure_eq("verify partial update", "lastname", &booking.lastname, &stored.lastname)?;

    delete(api, id, expect).await
}

async fn create<H: HttpClient>(
    api: &BookingApi<H>,
    booking: &Booking,
    expect: &Expectations,
) -> Result<BookingId, CaseError> {
    let response = api
        .create_booking(booking)
        .await
        .map_err(CaseError::http("create"))?;
    expect.create.check("create", &response)?;

    let created: CreatedBooking = decode("create", &response)?;
    Ok(created.bookingid)
}

async fn read_back<H: HttpClient>(
    api: &BookingApi<H>,
    id: BookingId,
    step: &'static str,
    expect: &Expectations,
) -> Result<Booking, CaseError> {
    let response = api.get_booking(id).await.map_err(CaseError::http(step))?;
    expect.read.check(step, &response)?;
    decode(step, &response)
}

async fn delete<H: HttpClient>(
    api: &BookingApi<H>,
    id: BookingId,
    expect: &Expectations,
) -> Result<(), CaseError> {
    let response = api
        .delete_booking(id)
        .await
        .map_err(CaseError::http("delete"))?;
    expect.delete.check("delete", &response)
}

fn decode<T: serde::de::DeserializeOwned>(
    step: &'static str,
    response: &HttpResponse,
) -> Result<T, CaseError> {
    response.json().map_err(CaseError::decode(step))
}

fn ensure_eq(
    step: &'static str,
    field: &'static str,
    expected: &str,
    actual: &str,
) -> Result<(), CaseError> {
    if expected == actual {
        return Ok(());
    }

    Err(CaseError::Mismatch {
        step,
        field,
        expected: expected.to_string(),
        actual: actual.to_string(),
    })
}
