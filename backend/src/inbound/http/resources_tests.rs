//! Handler tests for the generic record endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    MockResourceCommand, MockResourceQuery, MockResourceRepository, RepositoryError,
};
use crate::domain::{Error, Products, RecordId, ResourceService, Users};
use crate::inbound::http::api_scope;
use crate::outbound::persistence::InMemoryResourceRepository;

fn in_memory_state<R: Resource>() -> HttpState<R> {
    let service = ResourceService::new(
        Arc::new(InMemoryResourceRepository::<R>::new()),
        Arc::new(DefaultClock),
    );
    HttpState::from_service(Arc::new(service))
}

async fn call(
    products: HttpState<Products>,
    users: HttpState<Users>,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(web::Data::new(products))
            .app_data(web::Data::new(users))
            .service(api_scope()),
    )
    .await;
    let res = actix_test::call_service(&app, request.to_request()).await;
    let status = res.status();
    let body = actix_test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

fn messages(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .expect("errors array")
        .iter()
        .map(|entry| entry["message"].as_str().expect("message").to_owned())
        .collect()
}

#[rstest]
fn record_body_uses_resource_detail_key() {
    let record = Record::<Users>::new(crate::domain::RecordDraft {
        id: RecordId::from_uuid(uuid::Uuid::nil()),
        name: "Ada".to_owned(),
        detail: None,
        is_archived: false,
        created_at: 1,
        updated_at: 2,
    })
    .expect("valid record");

    let value = serde_json::to_value(RecordBody::from(record)).expect("serialises");
    assert_eq!(
        value,
        json!({
            "id": "00000000-0000-0000-0000-000000000000",
            "name": "Ada",
            "address": null,
            "isArchived": false,
            "createdAt": 1,
            "updatedAt": 2,
        })
    );
}

#[rstest]
#[actix_web::test]
async fn create_returns_created_record() {
    let (status, body) = call(
        in_memory_state(),
        in_memory_state(),
        actix_test::TestRequest::post()
            .uri("/api/v1/products")
            .set_json(json!({"name": "Widget", "description": "x"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["name"], "Widget");
    assert_eq!(body["data"]["description"], "x");
    assert_eq!(body["data"]["isArchived"], false);
    assert_eq!(body["data"]["createdAt"], body["data"]["updatedAt"]);
}

#[rstest]
#[actix_web::test]
async fn create_reports_every_violation() {
    let (status, body) = call(
        in_memory_state(),
        in_memory_state(),
        actix_test::TestRequest::post()
            .uri("/api/v1/users")
            .set_json(json!({"address": "a".repeat(1001)})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        messages(&body),
        ["name is required", "address must be at most 1000 characters"]
    );
}

#[rstest]
#[case("{not json")]
#[case(r#"{"name": 7}"#)]
#[actix_web::test]
async fn undecodable_body_is_bad_request(#[case] payload: &'static str) {
    let (status, body) = call(
        in_memory_state(),
        in_memory_state(),
        actix_test::TestRequest::post()
            .uri("/api/v1/products")
            .insert_header(("content-type", "application/json"))
            .set_payload(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), ["invalid request body"]);
}

#[rstest]
#[case("limit=abc", "invalid query parameter limit: abc")]
#[case("page=two", "invalid query parameter page: two")]
#[case("isArchived=maybe", "invalid query parameter isArchived: maybe")]
#[actix_web::test]
async fn list_rejects_bad_query(#[case] query: &str, #[case] expected: &str) {
    let (status, body) = call(
        in_memory_state(),
        in_memory_state(),
        actix_test::TestRequest::get().uri(&format!("/api/v1/products?{query}")),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), [expected]);
}

#[rstest]
#[actix_web::test]
async fn list_echoes_clamped_window() {
    let (status, body) = call(
        in_memory_state(),
        in_memory_state(),
        actix_test::TestRequest::get().uri("/api/v1/users?limit=500&page=0"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["limit"], 100);
    assert_eq!(body["data"]["page"], 1);
    assert_eq!(body["data"]["items"], json!([]));
}

#[rstest]
#[case(actix_test::TestRequest::get())]
#[case(actix_test::TestRequest::delete())]
#[actix_web::test]
async fn malformed_id_is_bad_request(#[case] request: actix_test::TestRequest) {
    let (status, body) = call(
        in_memory_state(),
        in_memory_state(),
        request.uri("/api/v1/products/not-a-uuid"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), ["id must be a valid UUID"]);
}

#[rstest]
#[actix_web::test]
async fn unknown_id_is_not_found() {
    let id = RecordId::random();
    let (status, body) = call(
        in_memory_state(),
        in_memory_state(),
        actix_test::TestRequest::get().uri(&format!("/api/v1/users/{id}")),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(messages(&body), [format!("user {id} not found")]);
}

#[rstest]
#[actix_web::test]
async fn update_with_empty_name_names_the_field() {
    let id = RecordId::random();
    let (status, body) = call(
        in_memory_state(),
        in_memory_state(),
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/products/{id}"))
            .set_json(json!({"name": ""})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), ["name must not be empty"]);
}

#[rstest]
#[actix_web::test]
async fn operation_failure_maps_to_bad_request() {
    let mut command = MockResourceCommand::<Products>::new();
    command
        .expect_delete()
        .times(1)
        .return_once(|_| Err(Error::operation_failed()));
    let products = HttpState::new(Arc::new(command), Arc::new(MockResourceQuery::new()));

    let (status, body) = call(
        products,
        in_memory_state(),
        actix_test::TestRequest::delete().uri(&format!("/api/v1/products/{}", RecordId::random())),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&body), ["failed to perform the operation"]);
}

#[rstest]
#[actix_web::test]
async fn internal_failures_are_redacted() {
    let mut query = MockResourceQuery::<Products>::new();
    query
        .expect_read_many()
        .times(1)
        .return_once(|_| Err(Error::internal("product repository error: syntax error")));
    let products = HttpState::new(Arc::new(MockResourceCommand::new()), Arc::new(query));

    let (status, body) = call(
        products,
        in_memory_state(),
        actix_test::TestRequest::get().uri("/api/v1/products"),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(messages(&body), ["internal server error"]);
}

#[rstest]
#[actix_web::test]
async fn update_ignores_archive_flag() {
    let products = in_memory_state::<Products>();
    let created = products
        .command
        .create(crate::domain::ports::CreateRecordRequest {
            name: "Widget".to_owned(),
            detail: None,
        })
        .await
        .expect("created");

    let (status, body) = call(
        products,
        in_memory_state(),
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/products/{}", created.id()))
            .set_json(json!({"name": "Gadget", "isArchived": true})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "Gadget");
    assert_eq!(body["data"]["isArchived"], false);
    assert_eq!(body["data"]["description"], Value::Null);
}

#[rstest]
#[actix_web::test]
async fn default_listing_hides_deleted_records() {
    let products = in_memory_state::<Products>();
    let mut ids = Vec::new();
    for name in ["Widget", "Gadget"] {
        let created = products
            .command
            .create(crate::domain::ports::CreateRecordRequest {
                name: name.to_owned(),
                detail: None,
            })
            .await
            .expect("created");
        ids.push(created.id().to_string());
    }
    let [deleted_id, kept_id] = <[String; 2]>::try_from(ids).expect("two records");

    let (status, _) = call(
        products.clone(),
        in_memory_state(),
        actix_test::TestRequest::delete().uri(&format!("/api/v1/products/{deleted_id}")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = call(
        products.clone(),
        in_memory_state(),
        actix_test::TestRequest::get().uri("/api/v1/products"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<&str> = body["data"]["items"]
        .as_array()
        .expect("items")
        .iter()
        .filter_map(|item| item["id"].as_str())
        .collect();
    assert_eq!(listed, [kept_id.as_str()]);

    let (_, archived) = call(
        products,
        in_memory_state(),
        actix_test::TestRequest::get().uri("/api/v1/products?isArchived=true"),
    )
    .await;
    assert_eq!(archived["data"]["items"][0]["id"], deleted_id.as_str());
}

#[rstest]
#[actix_web::test]
async fn connection_failures_hide_driver_detail() {
    const DRIVER_TEXT: &str = "could not connect to server: Connection refused. Is the server \
         running on host \"db.internal\" (10.0.0.5) and accepting TCP/IP connections on port 5432?";
    let mut repo = MockResourceRepository::<Products>::new();
    repo.expect_read_one()
        .times(1)
        .return_once(|_| Err(RepositoryError::connection(DRIVER_TEXT)));
    let service = ResourceService::new(Arc::new(repo), Arc::new(DefaultClock));
    let products = HttpState::from_service(Arc::new(service));

    let (status, body) = call(
        products,
        in_memory_state(),
        actix_test::TestRequest::get().uri(&format!("/api/v1/products/{}", RecordId::random())),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(messages(&body), ["product repository unavailable"]);
    let rendered = body.to_string();
    assert!(!rendered.contains("db.internal"));
    assert!(!rendered.contains("10.0.0.5"));
}
