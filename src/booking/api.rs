//! Booking service client.

use http::header::{CONTENT_TYPE, COOKIE, InvalidHeaderValue};
use http::{HeaderMap, HeaderValue, Method};
use serde::Serialize;
use url::Url;

use super::{Booking, BookingId, Credentials};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// Client for the restful-booker API.
///
/// Each operation issues exactly one request through the wrapped
/// [`HttpClient`] and returns the raw response, leaving status checks to
/// the caller. Headers set on the client (see [`set_token`](Self::set_token))
/// are sent with every request, like a session.
///
/// # Example
///
/// ```no_run
/// use booker_probe::booking::BookingApi;
/// use booker_probe::transport::ReqwestClient;
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let base = Url::parse("https://restful-booker.herokuapp.com/")?;
/// let api = BookingApi::new(ReqwestClient::new(), base);
/// let response = api.health_check().await?;
/// assert_eq!(response.status.as_u16(), 201);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct BookingApi<H> {
    client: H,
    base_url: Url,
    default_headers: HeaderMap,
}

impl<H> BookingApi<H> {
    /// Creates a client for the service at `base_url`.
    ///
    /// Any path on `base_url` is kept as a prefix for every endpoint;
    /// trailing slashes, the query and the fragment are dropped.
    #[must_use]
    pub fn new(client: H, mut base_url: Url) -> Self {
        let prefix = base_url.path().trim_end_matches('/').to_string();
        base_url.set_path(&prefix);
        base_url.set_query(None);
        base_url.set_fragment(None);
        Self {
            client,
            base_url,
            default_headers: HeaderMap::new(),
        }
    }

    /// Stores an auth token so later requests carry it as a cookie.
    ///
    /// Also sets `Content-Type: application/json` for all later requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the token contains characters not allowed in a
    /// header value.
    pub fn set_token(&mut self, token: &str) -> Result<(), InvalidHeaderValue> {
        let cookie = HeaderValue::from_str(&format!("token={token}"))?;
        self.default_headers.insert(COOKIE, cookie);
        self.default_headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(())
    }

    /// Returns the headers sent with every request.
    #[must_use]
    pub const fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Returns the wrapped HTTP client.
    #[must_use]
    pub const fn client(&self) -> &H {
        &self.client
    }

    /// Resolves `path` (starting with `/`) below the base URL.
    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base_url.clone();
        let joined = format!("{}{path}", url.path().trim_end_matches('/'));
        url.set_path(&joined);
        url
    }

    fn build(&self, method: Method, path: &str) -> HttpRequest {
        let mut request = HttpRequest::new(method, self.endpoint(path));
        for (name, value) in &self.default_headers {
            request.headers.append(name, value.clone());
        }
        request
    }

    fn build_with_payload(
        &self,
        method: Method,
        path: &str,
        payload: &impl Serialize,
    ) -> Result<HttpRequest, HttpError> {
        let value = serde_json::to_value(payload).map_err(HttpError::Payload)?;
        Ok(self.build(method, path).with_json(value))
    }
}

impl<H: HttpClient> BookingApi<H> {
    /// `POST /auth`: requests a session token.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be sent.
    pub async fn create_token(
        &self,
        username: &str,
        password: &str,
    ) -> Result<HttpResponse, HttpError> {
        let credentials = Credentials::new(username, password);
        let request = self.build_with_payload(Method::POST, "/auth", &credentials)?;
        self.client.request(request).await
    }

    /// `POST /booking`: creates a booking.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be sent.
    pub async fn create_booking(&self, booking: &Booking) -> Result<HttpResponse, HttpError> {
        let request = self.build_with_payload(Method::POST, "/booking", booking)?;
        self.client.request(request).await
    }

    /// `GET /booking/{id}`: fetches a booking.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be sent.
    pub async fn get_booking(&self, id: BookingId) -> Result<HttpResponse, HttpError> {
        let request = self.build(Method::GET, &format!("/booking/{id}"));
        self.client.request(request).await
    }

    /// `PUT /booking/{id}`: replaces a booking. Requires a token.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be sent.
    pub async fn update_booking(
        &self,
        id: BookingId,
        booking: &Booking,
    ) -> Result<HttpResponse, HttpError> {
        let request = self.build_with_payload(Method::PUT, &format!("/booking/{id}"), booking)?;
        self.client.request(request).await
    }

    /// `PATCH /booking/{id}`: updates some fields of a booking. Requires a token.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the payload cannot be encoded or the request
    /// cannot be sent.
    pub async fn partial_update(
        &self,
        id: BookingId,
        fields: &impl Serialize,
    ) -> Result<HttpResponse, HttpError> {
        let request = self.build_with_payload(Method::PATCH, &format!("/booking/{id}"), fields)?;
        self.client.request(request).await
    }

    /// `DELETE /booking/{id}`: deletes a booking. Requires a token.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be sent.
    pub async fn delete_booking(&self, id: BookingId) -> Result<HttpResponse, HttpError> {
        let request = self.build(Method::DELETE, &format!("/booking/{id}"));
        self.client.request(request).await
    }

    /// `GET /ping`: service health check.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the request cannot be sent.
    pub async fn health_check(&self) -> Result<HttpResponse, HttpError> {
        let request = self.build(Method::GET, "/ping");
        self.client.request(request).await
    }
}
