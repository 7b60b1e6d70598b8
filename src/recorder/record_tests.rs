//! Tests for call records and logs.

use std::time::Duration;

use super::body::{NO_RESPONSE, UNSERIALIZABLE};
use super::record::{CallDraft, LiveLog};
use super::{CallLog, CallRecord, header_snapshot};
use crate::transport::{HttpRequest, HttpResponse};

fn booking_url() -> url::Url {
    url::Url::parse("https://restful-booker.herokuapp.com/booking").unwrap()
}

fn sample_record(method: &str) -> CallRecord {
    CallDraft::from_request(&HttpRequest::new(
        method.parse().unwrap(),
        booking_url(),
    ))
    .complete(Err("boom".to_string()), Duration::ZERO)
}

mod headers {
    use super::*;

    #[test]
    fn snapshot_joins_repeated_values() {
        let mut headers = http::HeaderMap::new();
        headers.append(http::header::ACCEPT, "text/html".parse().unwrap());
        headers.append(http::header::ACCEPT, "application/json".parse().unwrap());
        headers.insert(http::header::COOKIE, "token=abc".parse().unwrap());

        let snapshot = header_snapshot(&headers);

        assert_eq!(snapshot["accept"], "text/html, application/json");
        assert_eq!(snapshot["cookie"], "token=abc");
    }

    #[test]
    fn snapshot_of_empty_map_is_empty() {
        assert!(header_snapshot(&http::HeaderMap::new()).is_empty());
    }
}

mod draft {
    use super::*;

    #[test]
    fn captures_request_side() {
        let request = HttpRequest::post(booking_url())
            .with_header(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static("application/json"),
            )
            .with_json(serde_json::json!({"firstname": "Jim"}));

        let record = CallDraft::from_request(&request).complete(
            Ok(&HttpResponse::new(
                http::StatusCode::OK,
                http::HeaderMap::new(),
                br#"{"bookingid":1}"#.to_vec(),
            )),
            Duration::from_millis(250),
        );

        assert_eq!(record.method, "POST");
        assert_eq!(record.url, "https://restful-booker.herokuapp.com/booking");
        assert_eq!(record.status, Some(200));
        assert_eq!(record.request_headers["content-type"], "application/json");
        assert_eq!(record.request_body, "{\n  \"firstname\": \"Jim\"\n}");
        assert_eq!(record.response_body, "{\n  \"bookingid\": 1\n}");
        assert!((record.duration_secs() - 0.25).abs() < f64::EPSILON);
        assert!(!record.failed());
    }

    #[test]
    fn failure_uses_placeholders() {
        let record = CallDraft::from_request(&HttpRequest::get(booking_url()))
            .complete(Err("Request timed out".to_string()), Duration::from_secs(1));

        assert_eq!(record.status, None);
        assert!(record.response_headers.is_empty());
        assert_eq!(record.response_body, NO_RESPONSE);
        assert_eq!(record.failure, "Request timed out");
        assert!(record.failed());
    }

    #[test]
    fn binary_response_becomes_placeholder() {
        let record = CallDraft::from_request(&HttpRequest::get(booking_url())).complete(
            Ok(&HttpResponse::new(
                http::StatusCode::OK,
                http::HeaderMap::new(),
                vec![0xFF, 0xD8, 0xFF],
            )),
            Duration::ZERO,
        );

        assert_eq!(record.response_body, UNSERIALIZABLE);
    }
}

mod logs {
    use super::*;

    #[test]
    fn live_log_snapshot_keeps_order_and_context() {
        let live = LiveLog::new("crud_flow");
        live.push(sample_record("POST"));
        live.push(sample_record("GET"));

        let log = live.snapshot();

        assert_eq!(log.context(), "crud_flow");
        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].method, "POST");
        assert_eq!(log.records()[1].method, "GET");
    }

    #[test]
    fn default_log_is_empty() {
        let log = CallLog::default();

        assert!(log.is_empty());
        assert_eq!(log.context(), "");
    }

    #[test]
    fn serializes_duration_as_seconds() {
        let mut record = sample_record("DELETE");
        record.duration = Duration::from_millis(1500);
        let log = CallLog::new("delete", vec![record]);

        let json = serde_json::to_value(&log).unwrap();

        assert_eq!(json["context"], "delete");
        assert_eq!(json["records"][0]["duration"], 1.5);
        assert_eq!(json["records"][0]["status"], serde_json::Value::Null);
    }
}
