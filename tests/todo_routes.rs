use axum::{
    Router,
    body::{self, Body},
    http::{Request, StatusCode},
};
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult};
use serde_json::json;
use tower::ServiceExt;

use todo_api::{db::entities::todo, test_helpers::test_router};

fn row(id: i32, title: &str, description: &str, completed: bool) -> todo::Model {
    todo::Model {
        id,
        title: title.to_string(),
        description: description.to_string(),
        completed,
    }
}

fn mock() -> MockDatabase {
    MockDatabase::new(DatabaseBackend::Postgres)
}

fn deleted(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

fn statements_sent(db: DatabaseConnection) -> usize {
    db.into_transaction_log().len()
}

fn sql_sent(db: DatabaseConnection) -> Vec<String> {
    db.into_transaction_log()
        .iter()
        .flat_map(|transaction| transaction.statements())
        .map(|statement| statement.sql.clone())
        .collect()
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn json_response(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.expect("request should succeed");
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json: serde_json::Value = serde_json::from_slice(&body).expect("body should be json");
    (status, json)
}

fn detail(json: &serde_json::Value) -> &str {
    json["detail"].as_str().expect("detail should be a string")
}

#[tokio::test]
async fn create_returns_created_record() {
    let db = mock()
        .append_query_results([vec![row(1, "Buy milk", "2%", false)]])
        .into_connection();

    let (status, json) = json_response(
        test_router(db.clone()),
        json_request(
            "POST",
            "/todos",
            json!({ "title": "Buy milk", "description": "2%" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        json,
        json!({ "id": 1, "title": "Buy milk", "description": "2%", "completed": false })
    );
    assert_eq!(statements_sent(db), 1);
}

#[tokio::test]
async fn create_accepts_empty_strings() {
    let db = mock()
        .append_query_results([vec![row(2, "", "", false)]])
        .into_connection();

    let (status, json) = json_response(
        test_router(db),
        json_request("POST", "/todos", json!({ "title": "", "description": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["id"], 2);
    assert_eq!(json["completed"], false);
}

#[tokio::test]
async fn create_missing_field_is_rejected_before_storage() {
    let db = mock().into_connection();

    let (status, json) = json_response(
        test_router(db.clone()),
        json_request("POST", "/todos", json!({ "title": "Buy milk" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(detail(&json).contains("missing field `description`"));
    assert_eq!(statements_sent(db), 0);
}

#[tokio::test]
async fn create_mistyped_field_is_rejected_before_storage() {
    let db = mock().into_connection();

    let (status, json) = json_response(
        test_router(db.clone()),
        json_request("POST", "/todos", json!({ "title": 5, "description": "2%" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(!detail(&json).is_empty());
    assert_eq!(statements_sent(db), 0);
}

#[tokio::test]
async fn create_malformed_json_is_bad_request() {
    let db = mock().into_connection();

    let (status, json) = json_response(
        test_router(db.clone()),
        Request::builder()
            .method("POST")
            .uri("/todos")
            .header("content-type", "application/json")
            .body(Body::from("{\"title\": "))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!detail(&json).is_empty());
    assert_eq!(statements_sent(db), 0);
}

#[tokio::test]
async fn create_without_json_content_type_is_rejected() {
    let db = mock().into_connection();

    let (status, json) = json_response(
        test_router(db.clone()),
        Request::builder()
            .method("POST")
            .uri("/todos")
            .body(Body::from(
                json!({ "title": "Buy milk", "description": "2%" }).to_string(),
            ))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(detail(&json).contains("application/json"));
    assert_eq!(statements_sent(db), 0);
}

#[tokio::test]
async fn read_returns_record() {
    let db = mock()
        .append_query_results([vec![row(1, "Buy milk", "2%", false)]])
        .into_connection();

    let (status, json) = json_response(test_router(db), empty_request("GET", "/todos/1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "id": 1, "title": "Buy milk", "description": "2%", "completed": false })
    );
}

#[tokio::test]
async fn read_missing_is_not_found() {
    let db = mock()
        .append_query_results([Vec::<todo::Model>::new()])
        .into_connection();

    let (status, json) = json_response(test_router(db), empty_request("GET", "/todos/7")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "detail": "Todo not found" }));
}

#[tokio::test]
async fn read_out_of_range_id_is_not_found_without_touching_db() {
    let db = mock().into_connection();

    let (status, json) = json_response(
        test_router(db.clone()),
        empty_request("GET", "/todos/99999999999999999999"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "detail": "Todo not found" }));
    assert_eq!(statements_sent(db), 0);
}

#[tokio::test]
async fn read_non_integer_id_is_validation_failure() {
    let db = mock().into_connection();

    let (status, json) =
        json_response(test_router(db.clone()), empty_request("GET", "/todos/abc")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(detail(&json).contains("abc"));
    assert_eq!(statements_sent(db), 0);
}

#[tokio::test]
async fn read_storage_failure_is_server_error() {
    let db = mock()
        .append_query_errors([DbErr::Custom("connection reset".to_string())])
        .into_connection();

    let (status, json) = json_response(test_router(db), empty_request("GET", "/todos/1")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(detail(&json).contains("connection reset"));
}

#[tokio::test]
async fn update_overwrites_title_and_description_only() {
    let db = mock()
        .append_query_results([
            vec![row(1, "Buy milk", "2%", true)],
            vec![row(1, "Buy bread", "whole wheat", true)],
        ])
        .into_connection();

    let (status, json) = json_response(
        test_router(db.clone()),
        json_request(
            "PUT",
            "/todos/1",
            json!({ "id": 9, "title": "Buy bread", "description": "whole wheat", "completed": false }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({ "id": 1, "title": "Buy bread", "description": "whole wheat", "completed": true })
    );

    let sql = sql_sent(db);
    assert_eq!(sql.len(), 2);
    assert!(sql[0].starts_with("SELECT"), "{}", sql[0]);
    assert!(
        sql[1].starts_with(
            r#"UPDATE "todos" SET "title" = $1, "description" = $2 WHERE "todos"."id" = $3"#
        ),
        "{}",
        sql[1]
    );
    let assignments = sql[1]
        .split(" WHERE ")
        .next()
        .expect("update should have a SET clause");
    assert!(!assignments.contains(r#""completed""#), "{assignments}");
    assert!(!assignments.contains(r#""id""#), "{assignments}");
}

#[tokio::test]
async fn update_missing_is_not_found_and_skips_write() {
    let db = mock()
        .append_query_results([Vec::<todo::Model>::new()])
        .into_connection();

    let (status, json) = json_response(
        test_router(db.clone()),
        json_request(
            "PUT",
            "/todos/3",
            json!({ "title": "Buy bread", "description": "whole wheat" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "detail": "Todo not found" }));
    assert_eq!(statements_sent(db), 1);
}

#[tokio::test]
async fn update_of_row_deleted_after_check_is_not_found() {
    let db = mock()
        .append_query_results([
            vec![row(1, "Buy milk", "2%", false)],
            Vec::<todo::Model>::new(),
        ])
        .into_connection();

    let (status, json) = json_response(
        test_router(db.clone()),
        json_request(
            "PUT",
            "/todos/1",
            json!({ "title": "Buy bread", "description": "whole wheat" }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "detail": "Todo not found" }));
    assert_eq!(statements_sent(db), 2);
}

#[tokio::test]
async fn update_missing_field_is_rejected_before_storage() {
    let db = mock().into_connection();

    let (status, _) = json_response(
        test_router(db.clone()),
        json_request("PUT", "/todos/1", json!({ "description": "whole wheat" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(statements_sent(db), 0);
}

#[tokio::test]
async fn delete_returns_confirmation() {
    let db = mock().append_exec_results([deleted(1)]).into_connection();

    let (status, json) =
        json_response(test_router(db.clone()), empty_request("DELETE", "/todos/1")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({ "message": "Todo deleted successfully" }));
    assert_eq!(statements_sent(db), 1);
}

#[tokio::test]
async fn second_delete_is_not_found() {
    let db = mock()
        .append_exec_results([deleted(1), deleted(0)])
        .into_connection();
    let app = test_router(db);

    let (first, _) = json_response(app.clone(), empty_request("DELETE", "/todos/1")).await;
    let (second, json) = json_response(app, empty_request("DELETE", "/todos/1")).await;

    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "detail": "Todo not found" }));
}

#[tokio::test]
async fn unknown_route_is_json_not_found() {
    let db = mock().into_connection();

    let (status, json) = json_response(test_router(db), empty_request("GET", "/todo")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json, json!({ "detail": "Not Found" }));
}

#[tokio::test]
async fn unsupported_method_is_json_method_not_allowed() {
    let db = mock().into_connection();

    let (status, json) =
        json_response(test_router(db), empty_request("PATCH", "/todos/1")).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json, json!({ "detail": "Method Not Allowed" }));
}
