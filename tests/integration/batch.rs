//! Batch-level failure handling: continue-on-fail versus abort

use super::mock_server::{items, MockServerFixture};
use rest_nodes::ocilion::{OcilionOperation, OcilionParameters};
use rest_nodes::odoo::{OdooOperation, OdooParameters, OdooRestCredentials};
use rest_nodes::transport::TransportConfig;
use rest_nodes::{Error, ExecutionSettings, Node, OdooRestNode};
use serde_json::json;

fn get_by_item_id() -> OcilionParameters {
    OcilionParameters {
        operation: OcilionOperation::Get,
        world_id: "w1".to_string(),
        id: "{{ id }}".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_continue_on_fail_keeps_one_record_per_item() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login(1).await;
    let _a = fixture
        .mock_ocilion("GET", "/w1/customers/a", 200, &json!({"id": "a"}), 1)
        .await;
    let _b = fixture
        .mock_ocilion("GET", "/w1/customers/b", 500, &json!({"message": "boom"}), 1)
        .await;
    let _c = fixture
        .mock_ocilion("GET", "/w1/customers/c", 200, &json!({"id": "c"}), 1)
        .await;

    let node = fixture.ocilion_node(get_by_item_id(), true);
    let out = node
        .execute(&items(vec![
            json!({"id": "a"}),
            json!({"id": "b"}),
            json!({"id": "c"}),
        ]))
        .await
        .unwrap();

    assert_eq!(out.len(), 3);
    assert_eq!(out[0].json, json!({"id": "a"}));
    let message = out[1].error_message().unwrap();
    assert!(message.contains("HTTP 500"), "{}", message);
    assert!(message.contains("boom"), "{}", message);
    assert_eq!(out[2].json, json!({"id": "c"}));
}

#[tokio::test]
async fn test_abort_stops_before_later_items() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login(1).await;
    let a = fixture
        .mock_ocilion("GET", "/w1/customers/a", 200, &json!({"id": "a"}), 1)
        .await;
    let b = fixture
        .mock_ocilion("GET", "/w1/customers/b", 404, &json!({"message": "missing"}), 1)
        .await;
    let c = fixture
        .mock_ocilion("GET", "/w1/customers/c", 200, &json!({"id": "c"}), 0)
        .await;

    let node = fixture.ocilion_node(get_by_item_id(), false);
    let err = node
        .execute(&items(vec![
            json!({"id": "a"}),
            json!({"id": "b"}),
            json!({"id": "c"}),
        ]))
        .await
        .unwrap_err();

    assert_eq!(err.item_index(), Some(1));
    match err {
        Error::Item { source, .. } => {
            assert!(matches!(*source, Error::Remote { status: 404, .. }))
        }
        other => panic!("unexpected error: {}", other),
    }
    a.assert_async().await;
    b.assert_async().await;
    c.assert_async().await;
}

#[tokio::test]
async fn test_unresolved_expression_is_per_item() {
    let mut fixture = MockServerFixture::new().await;
    let _login = fixture.mock_login(1).await;
    let _a = fixture
        .mock_ocilion("GET", "/w1/customers/a", 200, &json!({"id": "a"}), 1)
        .await;

    let node = fixture.ocilion_node(get_by_item_id(), true);
    let out = node
        .execute(&items(vec![json!({"other": 1}), json!({"id": "a"})]))
        .await
        .unwrap();

    assert_eq!(out.len(), 2);
    assert!(out[0].error_message().unwrap().contains("{{ id }}"));
    assert_eq!(out[1].json, json!({"id": "a"}));
}

#[tokio::test]
async fn test_split_and_errors_mix() {
    let mut fixture = MockServerFixture::new().await;
    let _search = fixture
        .mock_odoo(
            "GET",
            "/res.partner/search",
            200,
            r#"{"data": [{"id": 1}, {"id": 2}]}"#,
            1,
        )
        .await;

    // The first item searches, the second carries a broken body.
    let node = fixture.odoo_node(
        OdooParameters {
            operation: OdooOperation::Search,
            body: "{{ raw }}".to_string(),
            ..Default::default()
        },
        true,
    );
    let out = node
        .execute(&items(vec![json!({"raw": ""}), json!({"raw": "{bad json"})]))
        .await
        .unwrap();

    assert_eq!(out.len(), 3);
    assert_eq!(out[0].json, json!({"id": 1}));
    assert_eq!(out[1].json, json!({"id": 2}));
    assert!(out[2].error_message().unwrap().contains("{bad json"));
}

fn odoo_node_without_key(base_url: &str, continue_on_fail: bool) -> OdooRestNode {
    std::env::remove_var("ODOO_REST_API_KEY");
    let credentials = OdooRestCredentials {
        api_key: None,
        ..OdooRestCredentials::new(format!("{}/no-key", base_url), "")
    };
    OdooRestNode::from_config(
        credentials,
        OdooParameters {
            id: "1".to_string(),
            ..Default::default()
        },
        ExecutionSettings { continue_on_fail },
        &TransportConfig::default(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_missing_api_key_fails_every_item() {
    let mut fixture = MockServerFixture::new().await;
    let get = fixture
        .server
        .mock("GET", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let out = odoo_node_without_key(&fixture.base_url, true)
        .execute(&items(vec![json!({}), json!({}), json!({})]))
        .await
        .unwrap();

    assert_eq!(out.len(), 3);
    for item in &out {
        let message = item.error_message().unwrap();
        assert!(message.starts_with("Authentication failed"), "{}", message);
    }

    let err = odoo_node_without_key(&fixture.base_url, false)
        .execute(&items(vec![json!({})]))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }));
    get.assert_async().await;
}
