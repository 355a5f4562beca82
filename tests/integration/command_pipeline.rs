//! End-to-end command runs: clap parsing, real requirements, repositories and gateway

use super::test_utils::MockCloudController;
use cfctl::api::RepositoryLocator;
use cfctl::cli::{Cli, RunContext};
use cfctl::config::CfConfig;
use cfctl::testing::FakeUi;
use clap::Parser;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

fn run(server: &MockCloudController, config: Arc<CfConfig>, args: &[&str], ui: &mut FakeUi) -> bool {
    let cli = Cli::try_parse_from(args).unwrap();
    let locator = RepositoryLocator::new(server.gateway(Arc::clone(&config)));
    let mut context = RunContext::with_locator(config, locator);
    context.execute(&cli.command, ui).is_ok()
}

fn mount_domain_and_instance(server: &MockCloudController, requires: &[&str]) {
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/organizations/my-org-guid/private_domains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": [{"metadata": {"guid": "domain-guid"}, "entity": {"name": "example.com"}}]
            }))),
    );
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/spaces/my-space-guid/service_instances"))
            .and(query_param("q", "name:my-service"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": [{
                    "metadata": {"guid": "si-guid"},
                    "entity": {
                        "name": "my-service",
                        "service_plan_guid": "plan-guid",
                        "service_plan": {
                            "metadata": {"guid": "plan-guid"},
                            "entity": {
                                "name": "small",
                                "service": {
                                    "metadata": {"guid": "service-guid"},
                                    "entity": {"label": "ratelimiter", "requires": requires}
                                }
                            }
                        }
                    }
                }]
            }))),
    );
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/routes"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": [{"metadata": {"guid": "route-guid"}, "entity": {"host": "app", "path": ""}}]
            }))),
    );
}

#[test]
fn test_bind_route_service_end_to_end() {
    let server = MockCloudController::start();
    mount_domain_and_instance(&server, &[]);
    server.mount(
        Mock::given(method("PUT"))
            .and(path("/v2/service_instances/si-guid/routes/route-guid"))
            .respond_with(ResponseTemplate::new(201).set_body_string("{}"))
            .expect(1),
    );

    let mut ui = FakeUi::new();
    let ok = run(
        &server,
        server.config(),
        &["cfctl", "bind-route-service", "example.com", "my-service", "-n", "app"],
        &mut ui,
    );

    assert!(ok);
    assert!(ui.output_contains(
        "Binding route app.example.com to service instance my-service in org my-org / space my-space as my-user..."
    ));
    assert_eq!(ui.outputs.last().map(String::as_str), Some("OK"));
    server.verify();
}

#[test]
fn test_bind_route_service_declined_never_binds() {
    let server = MockCloudController::start();
    mount_domain_and_instance(&server, &["route_forwarding"]);
    server.mount(
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0),
    );

    let mut ui = FakeUi::answering(false);
    let ok = run(
        &server,
        server.config(),
        &["cfctl", "brs", "example.com", "my-service", "--hostname", "app"],
        &mut ui,
    );

    assert!(ok);
    assert_eq!(ui.prompts.len(), 1);
    assert!(ui.output_contains("Bind cancelled"));
    server.verify();
}

#[test]
fn test_old_api_version_fails_before_binding() {
    let server = MockCloudController::start();
    let mut config = (*server.config()).clone();
    config.target.api_version = Some("2.50.0".to_string());
    mount_domain_and_instance(&server, &[]);

    let mut ui = FakeUi::new();
    let ok = run(
        &server,
        Arc::new(config),
        &["cfctl", "bind-route-service", "example.com", "my-service"],
        &mut ui,
    );

    assert!(!ok);
    assert_eq!(ui.outputs[0], "FAILED");
    assert!(ui.output_contains(
        "bind-route-service requires CF API version 2.51.0+. Your target is 2.50.0."
    ));
    assert!(!ui.output_contains("Binding route"));
}

#[test]
fn test_missing_domain_aborts_pipeline() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/organizations/my-org-guid/private_domains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []}))),
    );
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/shared_domains"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []}))),
    );
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/spaces/my-space-guid/service_instances"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"resources": []})))
            .expect(0),
    );

    let mut ui = FakeUi::new();
    let ok = run(
        &server,
        server.config(),
        &["cfctl", "bind-route-service", "nope.com", "my-service"],
        &mut ui,
    );

    assert!(!ok);
    assert!(ui.output_contains("Domain nope.com not found"));
    server.verify();
}

#[test]
fn test_service_brokers_sorted_table() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/service_brokers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": [
                    {"metadata": {"guid": "1"}, "entity": {"name": "zeta", "broker_url": "http://z.example.com"}},
                    {"metadata": {"guid": "2"}, "entity": {"name": "alpha", "broker_url": "http://a.example.com"}}
                ]
            }))),
    );

    let mut ui = FakeUi::new();
    assert!(run(&server, server.config(), &["cfctl", "service-brokers"], &mut ui));
    let alpha = ui.outputs.iter().position(|l| l.starts_with("alpha")).unwrap();
    let zeta = ui.outputs.iter().position(|l| l.starts_with("zeta")).unwrap();
    assert!(alpha < zeta);
}

#[test]
fn test_not_logged_in_never_reaches_network() {
    let server = MockCloudController::start();
    let mut config = (*server.config()).clone();
    config.session.access_token.clear();

    let mut ui = FakeUi::new();
    assert!(!run(&server, Arc::new(config), &["cfctl", "curl", "/v2/info"], &mut ui));
    assert_eq!(ui.outputs[0], "FAILED");
    assert!(ui.output_contains("Not logged in"));
    assert_eq!(server.received_request_count(), 0);
}

#[test]
fn test_ssh_enabled_rejects_dea_app() {
    let server = MockCloudController::start();
    server.mount(
        Mock::given(method("GET"))
            .and(path("/v2/spaces/my-space-guid/apps"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "resources": [{"metadata": {"guid": "app-guid"}, "entity": {"name": "my-app", "diego": false, "enable_ssh": true}}]
            }))),
    );

    let mut ui = FakeUi::new();
    assert!(!run(&server, server.config(), &["cfctl", "ssh-enabled", "my-app"], &mut ui));
    assert!(ui.output_contains("DEA backend"));
}
