//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::time::Duration;

/// Default base URL of the booking service.
pub const BASE_URL: &str = "https://restful-booker.herokuapp.com";

/// Default account name for `POST /auth`.
pub const USERNAME: &str = "admin";

/// Default account password for `POST /auth`.
pub const PASSWORD: &str = "password123";

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 30;

/// Expected status of `POST /auth`.
pub const EXPECT_AUTH: &[u16] = &[200];

/// Expected status of `GET /ping`. The service answers 201, not 200.
pub const EXPECT_HEALTH: &[u16] = &[201];

/// Expected status of `POST /booking`.
pub const EXPECT_CREATE: &[u16] = &[200];

/// Expected status of `GET /booking/{id}`.
pub const EXPECT_READ: &[u16] = &[200];

/// Expected status of `PUT /booking/{id}`.
pub const EXPECT_UPDATE: &[u16] = &[200, 201];

/// Expected status of `PATCH /booking/{id}`.
pub const EXPECT_PARTIAL_UPDATE: &[u16] = &[200];

/// Expected status of `DELETE /booking/{id}`.
pub const EXPECT_DELETE: &[u16] = &[200, 201, 204];

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Environment variables that override the config file.
pub mod env {
    /// Overrides `target.base_url`.
    pub const BASE_URL: &str = "BASE_URL";
    /// Overrides `target.username`.
    pub const USERNAME: &str = "BOOKER_USER";
    /// Overrides `target.password`.
    pub const PASSWORD: &str = "BOOKER_PASS";
}
