//! Tests for single section calls against scripted replies

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, ResponseTemplate};

use super::fixtures::{UCI_PATH, capture_logs, logged_in, rpc_error, rpc_result};
use crate::{ChangeOperation, ClientError, OptionError, Options, UciOption};

fn uci_call(rpc_method: &str) -> wiremock::MockBuilder {
    Mock::given(method("POST"))
        .and(path(UCI_PATH))
        .and(body_partial_json(json!({"method": rpc_method})))
}

#[tokio::test]
async fn test_get_section_rejects_undecodable_value() {
    let (server, client) = logged_in().await;
    uci_call("get_all")
        .and(body_partial_json(json!({"params": ["network", "lan"]})))
        .respond_with(rpc_result(json!({
            ".anonymous": false,
            ".name": "lan",
            ".type": "interface",
            "proto": "static",
            "weight": 3,
        })))
        .mount(&server)
        .await;

    // Native JSON numbers are not a UCI option shape.
    let err = client.get_section("network", "lan").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
    assert!(err.to_string().starts_with("unable to decode network.lan"));
}

#[tokio::test]
async fn test_get_section_typed_getters() {
    let (server, client) = logged_in().await;
    uci_call("get_all")
        .respond_with(rpc_result(json!({
            ".anonymous": false,
            ".name": "lan",
            ".type": "interface",
            "proto": "static",
            "mtu": "1500",
            "auto": "on",
            "dns": ["1.1.1.1"],
        })))
        .mount(&server)
        .await;

    let options = client.get_section("network", "lan").await.unwrap();

    assert_eq!(options.len(), 7);
    assert_eq!(options.section_type().unwrap(), "interface");
    assert!(!options.is_anonymous().unwrap());
    assert_eq!(options.get_string("proto").unwrap(), "static");
    assert_eq!(options.get_integer("mtu").unwrap(), 1500);
    assert!(options.get_boolean("auto").unwrap());
    assert!(options.get_integer("auto").is_err());
    assert_eq!(options.get_list_string("dns").unwrap(), vec!["1.1.1.1"]);

    let err = options.get_string("ipaddr").unwrap_err();
    assert!(err.is_not_found());
    let OptionError::NotFound(err) = err else {
        panic!("Expected NotFound");
    };
    assert_eq!(err.available_options, options.keys());
}

#[tokio::test]
async fn test_get_section_missing_is_not_found() {
    let (server, client) = logged_in().await;
    uci_call("get_all")
        .respond_with(rpc_result(json!(null)))
        .mount(&server)
        .await;

    let err = client.get_section("network", "nope").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "incorrect config \"network\" and/or section \"nope\""
    );
}

#[tokio::test]
async fn test_get_section_false_is_not_found() {
    let (server, client) = logged_in().await;
    uci_call("get_all")
        .respond_with(rpc_result(json!(false)))
        .mount(&server)
        .await;

    let err = client.get_section("nope", "lan").await.unwrap_err();
    assert!(matches!(err, ClientError::SectionNotFound { .. }));
}

#[tokio::test]
async fn test_get_section_non_object_fails_to_decode() {
    let (server, client) = logged_in().await;
    uci_call("get_all")
        .respond_with(rpc_result(json!("lan")))
        .mount(&server)
        .await;

    let err = client.get_section("network", "lan").await.unwrap_err();
    assert!(matches!(err, ClientError::Decode { .. }));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_server_error_passed_through_verbatim() {
    let (server, client) = logged_in().await;
    uci_call("get_all")
        .respond_with(rpc_error("Access denied: uci/network"))
        .mount(&server)
        .await;

    let err = client.get_section("network", "lan").await.unwrap_err();

    match err {
        ClientError::Rpc { method, message } => {
            assert_eq!(method, "get_all");
            assert_eq!(message, "Access denied: uci/network");
        }
        other => panic!("Expected Rpc error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_non_200_on_uci_call() {
    let (server, client) = logged_in().await;
    uci_call("changes")
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.show_changes("network").await.unwrap_err();
    assert!(err.to_string().contains("expected 200 response"));
}

#[tokio::test]
async fn test_malformed_envelope() {
    let (server, client) = logged_in().await;
    uci_call("get_all")
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client.get_section("network", "lan").await.unwrap_err();
    assert!(
        err.to_string()
            .starts_with("unable to process get_all response")
    );
}

#[tokio::test]
async fn test_create_section_encodes_options_and_commits() {
    let (server, client) = logged_in().await;
    uci_call("section")
        .and(body_partial_json(json!({
            "params": [
                "network",
                "interface",
                "testing",
                {"option_1": true, "option_2": "31", "option_3": ["foo", "bar", "baz"]},
            ],
        })))
        .respond_with(rpc_result(json!("testing")))
        .expect(1)
        .mount(&server)
        .await;
    uci_call("commit")
        .and(body_partial_json(json!({"params": ["network"]})))
        .respond_with(rpc_result(json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    let options = Options::new()
        .with("option_1", true)
        .with("option_2", 31)
        .with("option_3", UciOption::list_string(["foo", "bar", "baz"]));

    let created = client
        .create_section("network", "interface", "testing", &options)
        .await
        .unwrap();
    assert!(created);
}

#[tokio::test]
async fn test_create_section_refused_skips_commit() {
    let (server, client) = logged_in().await;
    uci_call("section")
        .respond_with(rpc_result(json!(false)))
        .mount(&server)
        .await;
    uci_call("commit")
        .respond_with(rpc_result(json!(true)))
        .expect(0)
        .mount(&server)
        .await;

    let created = client
        .create_section("network", "interface", "lan", &Options::new())
        .await
        .unwrap();
    assert!(!created);
}

#[tokio::test]
async fn test_failed_commit_reports_false() {
    let (server, client) = logged_in().await;
    uci_call("delete")
        .respond_with(rpc_result(json!(true)))
        .mount(&server)
        .await;
    uci_call("commit")
        .respond_with(rpc_result(json!(false)))
        .mount(&server)
        .await;

    assert!(!client.delete_section("network", "lan").await.unwrap());
}

#[tokio::test]
async fn test_update_section_params() {
    let (server, client) = logged_in().await;
    uci_call("tset")
        .and(body_partial_json(json!({"params": ["network", "lan", {"mtu": "9000"}]})))
        .respond_with(rpc_result(json!(true)))
        .expect(1)
        .mount(&server)
        .await;
    uci_call("commit")
        .respond_with(rpc_result(json!(true)))
        .mount(&server)
        .await;

    let options = Options::new().with("mtu", 9000);
    assert!(client.update_section("network", "lan", &options).await.unwrap());
}

#[tokio::test]
async fn test_non_boolean_result_is_invalid() {
    let (server, client) = logged_in().await;
    uci_call("revert")
        .respond_with(rpc_result(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let err = client.revert("network").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_show_changes_decodes_records() {
    let (server, client) = logged_in().await;
    uci_call("changes")
        .and(body_partial_json(json!({"params": ["network"]})))
        .respond_with(rpc_result(json!([
            ["set", "lan", "proto", "dhcp"],
            ["remove", "wan6"],
        ])))
        .mount(&server)
        .await;

    let changes = client.show_changes("network").await.unwrap();

    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].operation, ChangeOperation::Set);
    assert_eq!(changes[0].value, Some(UciOption::string("dhcp")));
    assert_eq!(changes[1].operation, ChangeOperation::Remove);
    assert_eq!(changes[1].section, "wan6");
}

#[tokio::test]
async fn test_show_changes_unrecognised_result() {
    let (server, client) = logged_in().await;
    uci_call("changes")
        .respond_with(rpc_result(json!(42)))
        .mount(&server)
        .await;

    let err = client.show_changes("network").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_request_ids_increase() {
    let (server, client) = logged_in().await;
    uci_call("commit")
        .and(body_partial_json(json!({"id": 1})))
        .respond_with(rpc_result(json!(true)))
        .expect(1)
        .mount(&server)
        .await;
    uci_call("commit")
        .and(body_partial_json(json!({"id": 2})))
        .respond_with(rpc_result(json!(true)))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.commit("network").await.unwrap());
    assert!(client.clone().commit("network").await.unwrap());
}

#[tokio::test]
async fn test_calls_are_logged_with_config_and_section() {
    let (server, client) = logged_in().await;
    uci_call("get_all")
        .respond_with(rpc_result(json!({".name": "lan", ".type": "interface"})))
        .mount(&server)
        .await;
    uci_call("delete")
        .respond_with(rpc_result(json!(false)))
        .mount(&server)
        .await;
    let (_guard, logs) = capture_logs();

    client.get_section("network", "lan").await.unwrap();
    client.delete_section("network", "wan6").await.unwrap();

    let logs = logs.contents();
    assert!(
        logs.contains(r#"get_section{config="network" section="lan"}"#),
        "{logs}"
    );
    assert!(
        logs.contains(r#"delete_section{section="wan6" config="network"}"#)
            || logs.contains(r#"delete_section{config="network" section="wan6"}"#),
        "{logs}"
    );
    assert!(logs.contains("calling uci"), "{logs}");
    assert!(!logs.contains("unable to process"), "{logs}");
}
