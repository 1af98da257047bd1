//! Odoo REST node against a mock server

use super::mock_server::{items, MockServerFixture, API_KEY};
use mockito::Matcher;
use rest_nodes::odoo::{OdooModel, OdooOperation, OdooParameters};
use rest_nodes::Node;
use serde_json::json;

fn params(operation: OdooOperation) -> OdooParameters {
    OdooParameters {
        operation,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_search_splits_records() {
    let mut fixture = MockServerFixture::new().await;
    let search = fixture
        .server
        .mock("GET", "/res.partner/search")
        .match_header("api-key", API_KEY)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("domain".into(), r#"[["is_company","=",true]]"#.into()),
            Matcher::UrlEncoded("fields".into(), "name,email".into()),
            Matcher::UrlEncoded("limit".into(), "2".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"count": 2, "data": [{"id": 1, "name": "Acme"}, {"id": 2, "name": "Globex"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let node = fixture.odoo_node(
        OdooParameters {
            domain: r#"[["is_company","=",true]]"#.to_string(),
            fields: "name,email".to_string(),
            limit: 2,
            ..params(OdooOperation::Search)
        },
        false,
    );
    let out = node.execute(&items(vec![json!({})])).await.unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].json, json!({"id": 1, "name": "Acme"}));
    assert_eq!(out[1].json, json!({"id": 2, "name": "Globex"}));
    search.assert_async().await;
}

#[tokio::test]
async fn test_get_without_split() {
    let mut fixture = MockServerFixture::new().await;
    let body = r#"{"data": [{"id": 5, "name": "Jane"}]}"#;
    let get = fixture.mock_odoo("GET", "/res.partner/5", 200, body, 1).await;

    let node = fixture.odoo_node(
        OdooParameters {
            id: "{{ partner.id }}".to_string(),
            split: false,
            ..params(OdooOperation::Get)
        },
        false,
    );
    let out = node
        .execute(&items(vec![json!({"partner": {"id": 5}})]))
        .await
        .unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].json, json!({"data": [{"id": 5, "name": "Jane"}]}));
    get.assert_async().await;
}

#[tokio::test]
async fn test_write_operations() {
    let mut fixture = MockServerFixture::new().await;
    let update = fixture
        .server
        .mock("PUT", "/sale.order/9")
        .match_header("api-key", API_KEY)
        .match_body(Matcher::Json(json!({"note": "rush"})))
        .with_status(200)
        .with_body(r#"{"result": true}"#)
        .expect(1)
        .create_async()
        .await;
    let create = fixture
        .server
        .mock("POST", "/sale.order/create")
        .match_body(Matcher::Json(json!({"partner_id": 5})))
        .with_status(200)
        .with_body(r#"{"id": 10}"#)
        .expect(1)
        .create_async()
        .await;
    let execute = fixture
        .server
        .mock("POST", "/sale.order/execute_kw")
        .match_body(Matcher::Json(json!({"method": "action_confirm", "args": [[10]]})))
        .with_status(200)
        .with_body(r#"{"result": null}"#)
        .expect(1)
        .create_async()
        .await;
    let delete = fixture
        .mock_odoo("DELETE", "/sale.order/10", 200, r#"{"result": true}"#, 1)
        .await;

    let model = OdooModel::new("sale.order").unwrap();
    let run = |operation: OdooOperation, id: &str, body: &str| OdooParameters {
        resource: model.clone(),
        operation,
        id: id.to_string(),
        body: body.to_string(),
        ..Default::default()
    };

    let out = fixture
        .odoo_node(run(OdooOperation::Update, "9", r#"{"note": "rush"}"#), false)
        .execute(&items(vec![json!({})]))
        .await
        .unwrap();
    assert_eq!(out[0].json, json!({"result": true}));

    let out = fixture
        .odoo_node(run(OdooOperation::Create, "", r#"{"partner_id": 5}"#), false)
        .execute(&items(vec![json!({})]))
        .await
        .unwrap();
    assert_eq!(out[0].json, json!({"id": 10}));

    let out = fixture
        .odoo_node(
            run(
                OdooOperation::Execute,
                "",
                r#"{"method": "action_confirm", "args": [[10]]}"#,
            ),
            false,
        )
        .execute(&items(vec![json!({})]))
        .await
        .unwrap();
    assert_eq!(out[0].json, json!({"result": null}));

    let out = fixture
        .odoo_node(run(OdooOperation::Delete, "10", ""), false)
        .execute(&items(vec![json!({})]))
        .await
        .unwrap();
    assert_eq!(out.len(), 1);

    update.assert_async().await;
    create.assert_async().await;
    execute.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_schema_split() {
    let mut fixture = MockServerFixture::new().await;
    let schema = fixture
        .mock_odoo(
            "GET",
            "/hr.employee/schema",
            200,
            r#"{"data": [{"name": "name", "type": "char"}, {"name": "work_email", "type": "char"}]}"#,
            1,
        )
        .await;

    let node = fixture.odoo_node(
        OdooParameters {
            resource: OdooModel::new("hr.employee").unwrap(),
            ..params(OdooOperation::Schema)
        },
        false,
    );
    let out = node.execute(&items(vec![json!({})])).await.unwrap();

    assert_eq!(out.len(), 2);
    assert_eq!(out[1].json["name"], "work_email");
    schema.assert_async().await;
}

#[tokio::test]
async fn test_non_json_response_is_item_error() {
    let mut fixture = MockServerFixture::new().await;
    let _get = fixture
        .mock_odoo("GET", "/res.partner/1", 200, "<html>maintenance</html>", 1)
        .await;

    let node = fixture.odoo_node(
        OdooParameters {
            id: "1".to_string(),
            ..params(OdooOperation::Get)
        },
        true,
    );
    let out = node.execute(&items(vec![json!({})])).await.unwrap();

    assert_eq!(out.len(), 1);
    assert!(out[0]
        .error_message()
        .unwrap()
        .starts_with("Response is not valid JSON"));
}

#[tokio::test]
async fn test_malformed_body_never_reaches_server() {
    let mut fixture = MockServerFixture::new().await;
    let create = fixture
        .mock_odoo("POST", "/res.partner/create", 200, "{}", 0)
        .await;

    let node = fixture.odoo_node(
        OdooParameters {
            body: "{bad json".to_string(),
            ..params(OdooOperation::Create)
        },
        true,
    );
    let out = node.execute(&items(vec![json!({})])).await.unwrap();

    assert_eq!(out.len(), 1);
    let message = out[0].error_message().unwrap();
    assert!(message.contains("{bad json"), "{}", message);
    create.assert_async().await;
}

#[tokio::test]
async fn test_requests_carry_request_id() {
    let mut fixture = MockServerFixture::new().await;
    let get = fixture
        .server
        .mock("GET", "/res.partner/3")
        .match_header("api-key", API_KEY)
        .match_header(
            "x-request-id",
            Matcher::Regex(
                r"^[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}$".to_string(),
            ),
        )
        .with_status(200)
        .with_body(r#"{"id": 3}"#)
        .expect(2)
        .create_async()
        .await;

    let node = fixture.odoo_node(
        OdooParameters {
            id: "3".to_string(),
            ..params(OdooOperation::Get)
        },
        false,
    );
    let out = node
        .execute(&items(vec![json!({}), json!({})]))
        .await
        .unwrap();

    assert_eq!(out.len(), 2);
    get.assert_async().await;
}
