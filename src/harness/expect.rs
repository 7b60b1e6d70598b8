//! Expected status codes per operation.
//!
//! The live service is not consistent about which 2xx code a "successful"
//! write returns, so expected codes are configuration, not constants.

use std::fmt;

use crate::config::defaults;
use crate::transport::HttpResponse;

use super::CaseError;

/// Set of acceptable status codes for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSet(Vec<u16>);

impl StatusSet {
    /// Creates a set from status codes. Duplicates are removed.
    #[must_use]
    pub fn new(codes: impl IntoIterator<Item = u16>) -> Self {
        let mut codes: Vec<u16> = codes.into_iter().collect();
        codes.sort_unstable();
        codes.dedup();
        Self(codes)
    }

    /// Returns the codes in ascending order.
    #[must_use]
    pub fn codes(&self) -> &[u16] {
        &self.0
    }

    /// Returns true if `status` is acceptable.
    #[must_use]
    pub fn contains(&self, status: http::StatusCode) -> bool {
        self.0.contains(&status.as_u16())
    }

    /// Checks the status of `response` for the named step.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::UnexpectedStatus`] if the status is not in the set.
    pub fn check(&self, step: &'static str, response: &HttpResponse) -> Result<(), CaseError> {
        if self.contains(response.status) {
            return Ok(());
        }

        Err(CaseError::UnexpectedStatus {
            step,
            expected: self.clone(),
            actual: response.status.as_u16(),
        })
    }
}

impl fmt::Display for StatusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let codes: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", codes.join("|"))
    }
}

/// Expected status codes for every booking operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectations {
    /// `POST /auth`
    pub auth: StatusSet,
    /// `GET /ping`
    pub health: StatusSet,
    /// `POST /booking`
    pub create: StatusSet,
    /// `GET /booking/{id}`
    pub read: StatusSet,
    /// `PUT /booking/{id}`
    pub update: StatusSet,
    /// `PATCH /booking/{id}`
    pub partial_update: StatusSet,
    /// `DELETE /booking/{id}`
    pub delete: StatusSet,
}

impl Default for Expectations {
    fn default() -> Self {
        Self {
            auth: StatusSet::new(defaults::EXPECT_AUTH.iter().copied()),
            health: StatusSet::new(defaults::EXPECT_HEALTH.iter().copied()),
            create: StatusSet::new(defaults::EXPECT_CREATE.iter().copied()),
            read: StatusSet::new(defaults::EXPECT_READ.iter().copied()),
            update: StatusSet::new(defaults::EXPECT_UPDATE.iter().copied()),
            partial_update: StatusSet::new(defaults::EXPECT_PARTIAL_UPDATE.iter().copied()),
            delete: StatusSet::new(defaults::EXPECT_DELETE.iter().copied()),
        }
    }
}
