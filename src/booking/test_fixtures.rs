//! Shared test fixtures: an in-memory stand-in for the booking service.

use std::collections::BTreeMap;
use std::sync::Mutex;

use serde_json::{Value, json};

use super::{Booking, BookingDates};
use crate::transport::{HttpClient, HttpError, HttpRequest, HttpResponse, RequestBody};

/// Token handed out by [`FakeBooker`] for valid credentials.
pub(crate) const FAKE_TOKEN: &str = "abc123";

/// Username accepted by [`FakeBooker`].
pub(crate) const FAKE_USER: &str = "admin";

/// Password accepted by [`FakeBooker`].
pub(crate) const FAKE_PASSWORD: &str = "password123";

pub(crate) fn sample_booking() -> Booking {
    Booking {
        firstname: "Jim".to_string(),
        lastname: "Brown".to_string(),
        totalprice: 111,
        depositpaid: true,
        bookingdates: BookingDates {
            checkin: "2018-01-01".to_string(),
            checkout: "2019-01-01".to_string(),
        },
        additionalneeds: "Breakfast".to_string(),
    }
}

#[derive(Debug)]
struct FakeState {
    next_id: u64,
    bookings: BTreeMap<u64, Value>,
    requests: Vec<HttpRequest>,
}

/// In-memory booking service mimicking restful-booker's responses:
/// `/ping` answers 201, writes need the token cookie (403 otherwise),
/// deletes answer 201, unknown bookings 404 on read and 405 on write.
#[derive(Debug)]
pub(crate) struct FakeBooker {
    state: Mutex<FakeState>,
}

impl Default for FakeBooker {
    fn default() -> Self {
        Self {
            state: Mutex::new(FakeState {
                next_id: 1,
                bookings: BTreeMap::new(),
                requests: Vec::new(),
            }),
        }
    }
}

impl FakeBooker {
    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub(crate) fn booking(&self, id: u64) -> Option<Value> {
        self.state.lock().unwrap().bookings.get(&id).cloned()
    }

    fn handle(&self, req: &HttpRequest) -> HttpResponse {
        let mut state = self.state.lock().unwrap();
        state.requests.push(req.clone());

        let segments: Vec<&str> = req
            .url
            .path_segments()
            .map(Iterator::collect)
            .unwrap_or_default();

        match (req.method.as_str(), segments.as_slice()) {
            ("GET", ["ping"]) => text(201, "Created"),
            ("POST", ["auth"]) => auth(req),
            ("POST", ["booking"]) => match body(req) {
                Some(booking) if serde_json::from_value::<Booking>(booking.clone()).is_ok() => {
                    let id = state.next_id;
                    state.next_id += 1;
                    state.bookings.insert(id, booking.clone());
                    json_response(200, &json!({"bookingid": id, "booking": booking}))
                }
                _ => text(500, "Internal Server Error"),
            },
            ("GET", ["booking", id]) => match parse_id(id).and_then(|id| state.bookings.get(&id)) {
                Some(booking) => json_response(200, booking),
                None => text(404, "Not Found"),
            },
            (method @ ("PUT" | "PATCH" | "DELETE"), ["booking", id]) => {
                if !authorized(req) {
                    return text(403, "Forbidden");
                }
                let Some(id) = parse_id(id).filter(|id| state.bookings.contains_key(id)) else {
                    return text(405, "Method Not Allowed");
                };
                write(&mut state.bookings, method, id, body(req))
            }
            _ => text(404, "Not Found"),
        }
    }
}

impl HttpClient for FakeBooker {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        Ok(self.handle(&req))
    }
}

fn write(
    bookings: &mut BTreeMap<u64, Value>,
    method: &str,
    id: u64,
    payload: Option<Value>,
) -> HttpResponse {
    match (method, payload) {
        ("DELETE", _) => {
            bookings.remove(&id);
            text(201, "Created")
        }
        ("PUT", Some(replacement)) => {
            bookings.insert(id, replacement.clone());
            json_response(200, &replacement)
        }
        ("PATCH", Some(Value::Object(fields))) => {
            let Some(Value::Object(stored)) = bookings.get_mut(&id) else {
                return text(500, "Internal Server Error");
            };
            stored.extend(fields);
            let merged = Value::Object(stored.clone());
            json_response(200, &merged)
        }
        _ => text(400, "Bad Request"),
    }
}

fn auth(req: &HttpRequest) -> HttpResponse {
    let accepted = body(req).is_some_and(|creds| {
        creds["username"] == FAKE_USER && creds["password"] == FAKE_PASSWORD
    });

    if accepted {
        json_response(200, &json!({"token": FAKE_TOKEN}))
    } else {
        json_response(200, &json!({"reason": "Bad credentials"}))
    }
}

fn authorized(req: &HttpRequest) -> bool {
    let expected = format!("token={FAKE_TOKEN}");
    req.headers
        .get(http::header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|cookie| cookie == expected)
}

fn body(req: &HttpRequest) -> Option<Value> {
    match &req.body {
        RequestBody::Json(value) => Some(value.clone()),
        RequestBody::Raw(bytes) => serde_json::from_slice(bytes).ok(),
        RequestBody::Empty => None,
    }
}

fn parse_id(raw: &str) -> Option<u64> {
    raw.parse().ok()
}

fn text(status: u16, body: &str) -> HttpResponse {
    let mut headers = http::HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        headers,
        body.as_bytes().to_vec(),
    )
}

fn json_response(status: u16, value: &Value) -> HttpResponse {
    let mut headers = http::HeaderMap::new();
    headers.insert(
        http::header::CONTENT_TYPE,
        http::HeaderValue::from_static("application/json; charset=utf-8"),
    );
    HttpResponse::new(
        http::StatusCode::from_u16(status).unwrap(),
        headers,
        serde_json::to_vec(value).unwrap(),
    )
}
