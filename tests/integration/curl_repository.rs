//! Curl repository against a mock Cloud Controller

use super::test_utils::MockCloudController;
use cfctl::api::{CloudControllerCurlRepository, CurlRepository};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, ResponseTemplate};

const EXPECTED_JSON_RESPONSE: &str = r#"
	{"resources": [
		{
			"metadata": { "guid": "my-quota-guid" },
			"entity": { "name": "my-remote-quota", "memory_limit": 1024 }
		}
	]}"#;

fn repository(server: &MockCloudController) -> CloudControllerCurlRepository {
    CloudControllerCurlRepository::new(server.gateway(server.config()))
}

#[test]
fn test_get_returns_headers_and_raw_body() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/endpoint"))
            .and(header("authorization", "bearer test-token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(EXPECTED_JSON_RESPONSE, "application/json"),
            )
            .expect(1),
    );

    let response = repository(&server)
        .request("GET", "/v2/endpoint", "", "")
        .unwrap();

    assert_eq!(response.status, 200);
    assert!(response.headers.starts_with("HTTP/1.1 200 OK"));
    assert!(response.headers.contains("Content-Type: application/json"));
    assert_eq!(response.body, EXPECTED_JSON_RESPONSE);
    server.verify();
}

#[test]
fn test_empty_method_without_body_is_get() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/endpoint"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1),
    );

    repository(&server).request("", "/v2/endpoint", "", "").unwrap();
    server.verify();
}

#[test]
fn test_empty_method_with_body_is_post() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path("/v2/endpoint"))
            .and(body_string(r#"{"key":"val"}"#))
            .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
            .expect(1),
    );

    repository(&server)
        .request("", "/v2/endpoint", "", r#"{"key":"val"}"#)
        .unwrap();
    server.verify();
}

#[test]
fn test_sends_parsed_headers() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/endpoint"))
            .and(header("content-type", "ascii/cats"))
            .and(header("x-something-else", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1),
    );

    repository(&server)
        .request(
            "GET",
            "/v2/endpoint",
            "content-type: ascii/cats\nx-something-else:5",
            "",
        )
        .unwrap();
    server.verify();
}

#[test]
fn test_malformed_headers_fail_before_sending() {
    let server = MockCloudController::start();
    let err = repository(&server)
        .request("GET", "/v2/endpoint", "not-valid", "")
        .unwrap_err();

    assert!(err.to_string().contains("headers"));
    assert_eq!(server.received_request_count(), 0);
}

#[test]
fn test_client_error_status_is_not_an_error() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("POST"))
            .and(path("/v2/endpoint"))
            .respond_with(ResponseTemplate::new(400).set_body_string(EXPECTED_JSON_RESPONSE))
            .expect(1),
    );

    let response = repository(&server)
        .request("POST", "/v2/endpoint", "", r#"{"key":"val"}"#)
        .unwrap();
    assert_eq!(response.status, 400);
    assert!(response.headers.starts_with("HTTP/1.1 400 Bad Request"));
    assert_eq!(response.body, EXPECTED_JSON_RESPONSE);
    server.verify();
}

#[test]
fn test_transport_failure_is_an_error() {
    let server = MockCloudController::start();
    let mut config = (*server.config()).clone();
    config.target.api_endpoint = "http://127.0.0.1:1".to_string();
    let repo = CloudControllerCurlRepository::new(server.gateway(std::sync::Arc::new(config)));

    assert!(repo.request("GET", "/v2/endpoint", "", "").is_err());
}
