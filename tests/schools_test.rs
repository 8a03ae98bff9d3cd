//! Integration tests for school registration and listing routes.

mod common;

use axum::http::StatusCode;
use common::{body_bytes, body_json, Form, TestHarness};
use schooldir::config::Config;

fn names(list: &serde_json::Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn add_school_returns_summary() {
    let h = TestHarness::new();
    let resp = h.post_form(&Form::valid("Lincoln High")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert_eq!(json["message"], "School added successfully");
    assert_eq!(json["data"]["name"], "Lincoln High");
    assert_eq!(json["data"]["city"], "Pune");
    assert_eq!(json["data"]["state"], "Maharashtra");
    assert!(json["data"]["id"].is_i64());

    let image = json["data"]["image"].as_str().unwrap();
    assert!(image.starts_with("/schoolImages/"));
    assert!(image.ends_with("-front.png"));
}

#[tokio::test]
async fn added_school_is_listed_with_identical_fields() {
    let h = TestHarness::new();
    let created = h.add_school("Lincoln High", "Pune").await;

    let resp = h.get("/api/getSchools").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await;
    let schools = list.as_array().unwrap();
    assert_eq!(schools.len(), 1);

    let school = &schools[0];
    assert_eq!(school["id"], created["data"]["id"]);
    assert_eq!(school["name"], "Lincoln High");
    assert_eq!(school["address"], "12 MG Road");
    assert_eq!(school["city"], "Pune");
    assert_eq!(school["state"], "Maharashtra");
    assert_eq!(school["contact"], "1234567890");
    assert_eq!(school["email_id"], "office@school.in");
    assert_eq!(school["image"], created["data"]["image"]);
}

#[tokio::test]
async fn stored_image_is_served_at_recorded_path() {
    let h = TestHarness::new();
    let created = h.add_school("Lincoln High", "Pune").await;
    let image = created["data"]["image"].as_str().unwrap().to_string();

    let resp = h.get(&image).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, b"\x89PNG fake png data");
}

#[tokio::test]
async fn other_city_stores_custom_value() {
    let h = TestHarness::new();
    let form = Form::valid("Hill View")
        .text("city", "Other")
        .text("customCity", "Nashik");

    let resp = h.post_form(&form).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let list = body_json(h.get("/api/getSchools").await).await;
    assert_eq!(list[0]["city"], "Nashik");
}

#[tokio::test]
async fn other_city_without_custom_value_is_rejected() {
    let h = TestHarness::new();
    let resp = h.post_form(&Form::valid("Hill View").text("city", "Other")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert_eq!(json["fields"][0]["field"], "customCity");
}

#[tokio::test]
async fn missing_fields_persist_nothing() {
    let h = TestHarness::new();

    for field in ["name", "address", "city", "state", "contact", "emailId", "image"] {
        let resp = h.post_form(&Form::valid("Lincoln High").without(field)).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "field {}", field);

        let json = body_json(resp).await;
        assert_eq!(json["code"], "validation_error");
        let fields: Vec<&str> = json["fields"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&field), "no error for {}", field);
    }

    assert_eq!(h.school_count(), 0);
    assert_eq!(h.image_count(), 0);
}

#[tokio::test]
async fn blank_field_is_missing() {
    let h = TestHarness::new();
    let resp = h.post_form(&Form::valid("   ")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.school_count(), 0);
}

#[tokio::test]
async fn contact_validation() {
    let h = TestHarness::new();

    for bad in ["12345", "12345678901", "123-456-7890"] {
        let resp = h
            .post_form(&Form::valid("Lincoln High").text("contact", bad))
            .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "accepted {}", bad);
    }

    let resp = h
        .post_form(&Form::valid("Lincoln High").text("contact", "1234567890"))
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(h.school_count(), 1);
    assert_eq!(h.image_count(), 1);
}

#[tokio::test]
async fn email_validation() {
    let h = TestHarness::new();

    let resp = h
        .post_form(&Form::valid("A").text("emailId", "not-an-email"))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = h.post_form(&Form::valid("A").text("emailId", "a@b.com")).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_state_is_rejected() {
    let h = TestHarness::new();
    let resp = h
        .post_form(&Form::valid("A").text("state", "Atlantis"))
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.image_count(), 0);
}

#[tokio::test]
async fn non_image_upload_is_rejected() {
    let h = TestHarness::new();
    let form = Form::valid("A").image("notes.txt", "text/plain", b"hello");
    let resp = h.post_form(&form).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.image_count(), 0);
}

#[tokio::test]
async fn oversized_image_is_rejected() {
    let mut config = Config::default();
    config.validation.max_image_bytes = 16;
    let h = TestHarness::with_config(config);
    h.ctx.schools.bootstrap().unwrap();

    let form = Form::valid("A").image("big.png", "image/png", &[0u8; 64]);
    let resp = h.post_form(&form).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(h.school_count(), 0);
    assert_eq!(h.image_count(), 0);
}

#[tokio::test]
async fn body_beyond_limit_is_rejected_as_validation_error() {
    let mut config = Config::default();
    config.validation.max_image_bytes = 16;
    let h = TestHarness::with_config(config);
    h.ctx.schools.bootstrap().unwrap();

    let form = Form::valid("A").image("huge.png", "image/png", &vec![0u8; 256 * 1024]);
    let resp = h.post_form(&form).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert_eq!(json["code"], "validation_error");
    assert_eq!(json["fields"][0]["field"], "image");
    assert_eq!(h.school_count(), 0);
    assert_eq!(h.image_count(), 0);
}

#[tokio::test]
async fn long_image_name_is_stored() {
    let h = TestHarness::new();
    let file_name = format!("{}.png", "a".repeat(246));
    let form = Form::valid("Lincoln High").image(&file_name, "image/png", b"\x89PNG data");

    let resp = h.post_form(&form).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let image = json["data"]["image"].as_str().unwrap().to_string();
    let stored_name = image.rsplit('/').next().unwrap();
    assert!(stored_name.len() <= 255);
    assert!(stored_name.ends_with(".png"));

    let resp = h.get(&image).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_bytes(resp).await, b"\x89PNG data");
}

#[tokio::test]
async fn non_multipart_body_is_bad_request() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let h = TestHarness::new();
    let resp = h
        .router()
        .oneshot(
            Request::post("/api/addSchool")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let json = body_json(resp).await;
    assert_eq!(json["code"], "invalid_input");
}

#[tokio::test]
async fn add_without_table_is_server_error() {
    let h = TestHarness::with_config(Config::default());

    let resp = h.post_form(&Form::valid("Lincoln High")).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let json = body_json(resp).await;
    assert_eq!(json["error"], "Failed to add school");
    assert_eq!(json["code"], "database_error");
}

// ---------------------------------------------------------------------------
// List / search
// ---------------------------------------------------------------------------

#[tokio::test]
async fn list_is_empty_array_initially() {
    let h = TestHarness::new();
    let resp = h.get("/api/getSchools").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    assert!(json.is_array());
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn list_is_newest_first() {
    let h = TestHarness::new();
    h.add_school("First", "Pune").await;
    h.add_school("Second", "Pune").await;
    h.add_school("Third", "Pune").await;

    let list = body_json(h.get("/api/getSchools").await).await;
    assert_eq!(names(&list), vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn search_and_city_filters() {
    let h = TestHarness::new();
    h.add_school("Lincoln High", "Pune").await;
    h.add_school("Washington High", "Pune").await;

    let list = body_json(h.get("/api/getSchools?search=Lincoln").await).await;
    assert_eq!(names(&list), vec!["Lincoln High"]);

    let list = body_json(h.get("/api/getSchools?city=Pune").await).await;
    assert_eq!(names(&list), vec!["Washington High", "Lincoln High"]);

    let list = body_json(h.get("/api/getSchools?search=Lincoln&city=Pune").await).await;
    assert_eq!(names(&list), vec!["Lincoln High"]);
}

#[tokio::test]
async fn search_is_case_insensitive() {
    let h = TestHarness::new();
    h.add_school("Lincoln High", "Pune").await;

    let list = body_json(h.get("/api/getSchools?search=lincoln%20HIGH").await).await;
    assert_eq!(names(&list), vec!["Lincoln High"]);
}

#[tokio::test]
async fn search_folds_non_ascii_case() {
    let h = TestHarness::new();
    h.add_school("École Internationale", "Pune").await;
    h.add_school("Lincoln High", "Pune").await;

    let list = body_json(h.get("/api/getSchools?search=%C3%A9cole").await).await;
    assert_eq!(names(&list), vec!["École Internationale"]);

    let list = body_json(h.get("/api/getSchools?search=%C3%89COLE").await).await;
    assert_eq!(names(&list), vec!["École Internationale"]);
}

#[tokio::test]
async fn state_filter_and_empty_params() {
    let h = TestHarness::new();
    h.add_school("Lincoln High", "Pune").await;
    let resp = h
        .post_form(
            &Form::valid("Delhi Public")
                .text("city", "Delhi")
                .text("state", "Delhi"),
        )
        .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let list = body_json(h.get("/api/getSchools?state=Delhi").await).await;
    assert_eq!(names(&list), vec!["Delhi Public"]);

    let list = body_json(h.get("/api/getSchools?search=&city=&state=").await).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn no_match_is_empty_array() {
    let h = TestHarness::new();
    h.add_school("Lincoln High", "Pune").await;

    let resp = h.get("/api/getSchools?city=Mumbai").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn list_without_table_is_server_error() {
    let h = TestHarness::with_config(Config::default());

    let resp = h.get("/api/getSchools").await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(resp).await["error"], "Failed to fetch schools");
}

// ---------------------------------------------------------------------------
// Form options
// ---------------------------------------------------------------------------

#[tokio::test]
async fn form_options_lists_catalog() {
    let h = TestHarness::new();
    let resp = h.get("/api/form-options").await;
    assert_eq!(resp.status(), StatusCode::OK);

    let json = body_json(resp).await;
    let cities = json["cities"].as_array().unwrap();
    assert!(cities.iter().any(|c| c == "Pune"));
    assert_eq!(cities.last().unwrap(), "Other");
    assert!(json["states"].as_array().unwrap().iter().any(|s| s == "Maharashtra"));
}
