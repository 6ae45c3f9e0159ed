use httpmock::MockServer;
use serde_json::json;

use moip_assinaturas::http_client::reqwest::ReqwestHttpClient;
use moip_assinaturas::http_client::HttpClient;
use moip_assinaturas::{ApiClient, ApiError, ClientConfig, Environment, RequestOptions};

fn client_for(server: &MockServer) -> ApiClient<ReqwestHttpClient> {
    let transport = ReqwestHttpClient::create(ClientConfig::new(server.base_url(), true));
    ApiClient::with_client("token", "key", Environment::Sandbox, transport).unwrap()
}

#[test]
fn create_plan_and_read_results() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::POST)
            .path("/assinaturas/v1/plans")
            .header("Authorization", "Basic dG9rZW46a2V5")
            .header("Accept", "application/json")
            .header("Content-Type", "application/json");
        then.status(201).body(r#"{"code":"plan101","amount":990}"#);
    });

    let mut client = client_for(&server);
    let options = RequestOptions::new().body(json!({
        "code": "plan101",
        "amount": 990,
    }));
    let has_errors = client
        .post("/assinaturas/v1/plans", options)
        .unwrap()
        .has_errors();

    mock.assert();
    assert!(!has_errors);
    assert_eq!(client.response().unwrap().http_code, 201);
    let results = client.results().unwrap();
    assert_eq!(results["code"], "plan101");
    assert_eq!(results["amount"], 990);
}

#[test]
fn provider_errors_are_extracted_from_the_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(httpmock::Method::POST)
            .path("/assinaturas/v1/subscriptions");
        then.status(400).body(
            r#"{"errors":[{"code":"SUB-0001","description":"Invalid plan code"}]}"#,
        );
    });

    let mut client = client_for(&server);
    client
        .post("/assinaturas/v1/subscriptions", RequestOptions::new())
        .unwrap();

    assert!(client.has_errors());
    assert_eq!(
        client.errors(),
        [ApiError::new("SUB-0001", "Invalid plan code")]
    );
}

#[test]
fn consecutive_calls_overwrite_the_recorded_response() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/assinaturas/v1/plans/plan101");
        then.status(200).body(r#"{"code":"plan101"}"#);
    });
    server.mock(|when, then| {
        when.method(httpmock::Method::DELETE)
            .path("/assinaturas/v1/plans/plan101");
        then.status(404)
            .body(r#"{"errors":[{"code":"PLA-0001","description":"Plan not found"}]}"#);
    });

    let mut client = client_for(&server);

    client
        .get("/assinaturas/v1/plans/plan101", RequestOptions::new())
        .unwrap();
    assert!(!client.has_errors());
    assert_eq!(client.results().unwrap()["code"], "plan101");

    client
        .delete("/assinaturas/v1/plans/plan101", RequestOptions::new())
        .unwrap();
    assert!(client.has_errors());
    assert_eq!(client.response().unwrap().http_code, 404);
    assert_eq!(
        client.errors(),
        [ApiError::new("PLA-0001", "Plan not found")]
    );
}

#[test]
fn query_parameters_reach_the_server() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(httpmock::Method::GET)
            .path("/assinaturas/v1/invoices")
            .query_param("status", "paid");
        then.status(200).body("[]");
    });

    let mut client = client_for(&server);
    let options = RequestOptions::new().query("status", "paid");
    client.get("/assinaturas/v1/invoices", options).unwrap();

    mock.assert();
    assert_eq!(client.results(), Some(json!([])));
}

#[test]
fn a_transport_failure_propagates_as_an_error() {
    // no server listening on this port
    let transport =
        ReqwestHttpClient::create(ClientConfig::new("http://127.0.0.1:1".to_string(), true));
    let mut client =
        ApiClient::with_client("token", "key", Environment::Sandbox, transport).unwrap();

    assert!(client
        .get("/assinaturas/v1/plans", RequestOptions::new())
        .is_err());
    assert!(client.response().is_none());
}
