//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which creates an in-memory DB, an image directory
//! under a temp dir, and the full [`AppContext`]. Requests are driven through
//! the router with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use schooldir::config::Config;
use schooldir::images::ImageStore;
use schooldir::schools::SchoolService;
use schooldir::server::{create_router, AppContext};
use schooldir_common::validation::Validator;
use schooldir_db::pool::{init_memory_pool, DbPool};
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "schooldir-test-boundary";

/// Test harness wrapping a fully-constructed [`AppContext`].
pub struct TestHarness {
    pub ctx: AppContext,
    pub db: DbPool,
    pub image_dir: PathBuf,
    _tmp: TempDir,
}

impl TestHarness {
    /// Harness with default configuration and a bootstrapped database.
    pub fn new() -> Self {
        let h = Self::with_config(Config::default());
        h.ctx.schools.bootstrap().expect("bootstrap failed");
        h
    }

    /// Harness with a custom configuration. The database is not bootstrapped.
    pub fn with_config(mut config: Config) -> Self {
        let tmp = tempfile::tempdir().expect("failed to create temp dir");
        let image_dir = tmp.path().join("schoolImages");
        config.images.dir = image_dir.clone();

        let db = init_memory_pool().expect("failed to create in-memory pool");
        let images = ImageStore::new(image_dir.clone(), config.images.url_prefix.clone());
        let validator = Validator::new(config.validation.policy());
        let service = SchoolService::new(db.clone(), images, validator);

        Self {
            ctx: AppContext::new(config, service),
            db,
            image_dir,
            _tmp: tmp,
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone())
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    pub async fn post_form(&self, form: &Form) -> Response<Body> {
        self.router()
            .oneshot(
                Request::post("/api/addSchool")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={}", BOUNDARY),
                    )
                    .body(Body::from(form.encode()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Register a valid school and assert it was accepted.
    pub async fn add_school(&self, name: &str, city: &str) -> serde_json::Value {
        let resp = self.post_form(&Form::valid(name).text("city", city)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        body_json(resp).await
    }

    /// Number of files in the image directory.
    pub fn image_count(&self) -> usize {
        count_files(&self.image_dir)
    }

    /// Number of rows in the schools table.
    pub fn school_count(&self) -> u64 {
        let conn = self.db.get().unwrap();
        schooldir_db::queries::schools::count_schools(&conn).unwrap()
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.count())
        .unwrap_or(0)
}

/// Read a response body as JSON.
pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as raw bytes.
pub async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
    resp.into_body().collect().await.unwrap().to_bytes().to_vec()
}

/// A multipart form under construction. Later values replace earlier ones
/// with the same name.
#[derive(Clone, Default)]
pub struct Form {
    texts: Vec<(String, String)>,
    file: Option<(String, String, Vec<u8>)>,
}

impl Form {
    /// A form that passes validation.
    pub fn valid(name: &str) -> Self {
        Self::default()
            .text("name", name)
            .text("address", "12 MG Road")
            .text("city", "Pune")
            .text("state", "Maharashtra")
            .text("contact", "1234567890")
            .text("emailId", "office@school.in")
            .image("front.png", "image/png", b"\x89PNG fake png data")
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.texts.retain(|(n, _)| n != name);
        self.texts.push((name.to_string(), value.to_string()));
        self
    }

    pub fn without(mut self, name: &str) -> Self {
        self.texts.retain(|(n, _)| n != name);
        if name == "image" {
            self.file = None;
        }
        self
    }

    pub fn image(mut self, file_name: &str, content_type: &str, data: &[u8]) -> Self {
        self.file = Some((file_name.to_string(), content_type.to_string(), data.to_vec()));
        self
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut body = Vec::new();
        for (name, value) in &self.texts {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            );
            body.extend_from_slice(value.as_bytes());
            body.extend_from_slice(b"\r\n");
        }
        if let Some((file_name, content_type, data)) = &self.file {
            body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
            body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"image\"; filename=\"{}\"\r\n",
                    file_name
                )
                .as_bytes(),
            );
            body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
            body.extend_from_slice(data);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
        body
    }
}
