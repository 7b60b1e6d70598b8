//! Transport layer for issuing HTTP requests against the booking service.
//!
//! This module provides types and traits for:
//! - Building HTTP requests ([`HttpRequest`], [`RequestBody`])
//! - Handling HTTP responses ([`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//!
//! Everything above this layer (the booking client, the call recorder)
//! talks to an [`HttpClient`], so a decorator can observe every call
//! without touching call sites.

mod client;
mod error;
mod http;


pub use client::ReqwestClient;
pub use error::HttpError;
pub use http::{HttpClient, HttpRequest, HttpResponse, RequestBody};
