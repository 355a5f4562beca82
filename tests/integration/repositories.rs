//! Cloud Controller repositories through the real gateway

use super::test_utils::MockCloudController;
use cfctl::api::RepositoryLocator;
use cfctl::error::ApiError;
use cfctl::models::DomainFields;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn locator(server: &MockCloudController) -> RepositoryLocator {
    RepositoryLocator::new(server.gateway(server.config()))
}

#[test]
fn test_service_brokers_follow_pagination() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/service_brokers"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "next_url": null,
                "resources": [
                    {"metadata": {"guid": "b-guid"}, "entity": {"name": "beta", "broker_url": "http://beta.example.com", "auth_username": "admin"}}
                ]
            })))
            .with_priority(1)
            .expect(1),
    );
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/service_brokers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "next_url": "/v2/service_brokers?page=2",
                "resources": [
                    {"metadata": {"guid": "a-guid"}, "entity": {"name": "alpha", "broker_url": "http://alpha.example.com", "auth_username": "admin"}}
                ]
            })))
            .expect(1),
    );

    let mut names = Vec::new();
    locator(&server)
        .service_broker_repository()
        .list_service_brokers(&mut |broker| {
            names.push(broker.name);
            true
        })
        .unwrap();

    assert_eq!(names, vec!["alpha", "beta"]);
    server.verify();
}

#[test]
fn test_bind_sends_parameters_to_managed_instance_path() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("PUT"))
            .and(path("/v2/service_instances/si-guid/routes/route-guid"))
            .and(header("authorization", "bearer test-token"))
            .and(body_json(json!({"parameters": {"some": "json"}})))
            .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
            .expect(1),
    );

    locator(&server)
        .route_service_binding_repository()
        .bind("si-guid", "route-guid", false, r#"{"some":"json"}"#)
        .unwrap();
    server.verify();
}

#[test]
fn test_bind_error_carries_platform_code() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("PUT"))
            .and(path("/v2/user_provided_service_instances/si-guid/routes/route-guid"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": 130008,
                "description": "The route and service instance are already bound.",
                "error_code": "CF-ServiceInstanceAlreadyBoundToSameRoute"
            })))
            .expect(1),
    );

    let err = locator(&server)
        .route_service_binding_repository()
        .bind("si-guid", "route-guid", true, "")
        .unwrap_err();
    let http = err.http_error().unwrap();
    assert_eq!(http.status, 400);
    assert_eq!(http.error_code, "130008");
    server.verify();
}

#[test]
fn test_unbind_deletes_binding() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("DELETE"))
            .and(path("/v2/service_instances/si-guid/routes/route-guid"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1),
    );

    locator(&server)
        .route_service_binding_repository()
        .unbind("si-guid", "route-guid", false)
        .unwrap();
    server.verify();
}

#[test]
fn test_domain_falls_back_to_shared_domains() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/organizations/my-org-guid/private_domains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
            .expect(1),
    );
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/shared_domains"))
            .and(query_param("q", "name:example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": [{"metadata": {"guid": "shared-guid"}, "entity": {"name": "example.com"}}]
            })))
            .expect(1),
    );

    let domain = locator(&server)
        .domain_repository()
        .find_by_name_in_org("example.com", "my-org-guid")
        .unwrap();
    assert_eq!(
        domain,
        DomainFields {
            guid: "shared-guid".to_string(),
            name: "example.com".to_string(),
            shared: true,
        }
    );
    server.verify();
}

#[test]
fn test_missing_application_is_not_found() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/spaces/my-space-guid/apps"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []}))),
    );

    let err = locator(&server)
        .application_repository()
        .read("ghost", "my-space-guid")
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(err.to_string(), "App ghost not found");
}
