// テスト用のローカルHTTPサーバー
//
// - GET  /files/{name}  PDFもどきを返す（名前が "missing" で始まれば 404）
// - POST /upload        multipart の "file" を受け取り公開URLを返す
//                       （中身が配信したPDFと違えば 422、"broken" を含めば 500、
//                         "blank" を含めば空ボディ）
// - /api/...            保存API（インメモリ）

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use gazette_scraper::server::{router, AppState, InMemoryGazetteStore};

pub fn pdf_body(name: &str) -> Vec<u8> {
    format!("%PDF-1.4\n% {}\n", name).repeat(64).into_bytes()
}

async fn serve_file(Path(name): Path<String>) -> impl IntoResponse {
    if name.starts_with("missing") {
        return (StatusCode::NOT_FOUND, Vec::new());
    }
    (StatusCode::OK, pdf_body(&name))
}

/// "file" フィールドのファイル名と中身
async fn file_field(multipart: &mut Multipart) -> Option<(String, Vec<u8>)> {
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        if field.content_type() != Some("application/pdf") {
            return None;
        }
        let name = field.file_name()?.to_string();
        let data = field.bytes().await.ok()?;
        return Some((name, data.to_vec()));
    }
    None
}

async fn receive_upload(mut multipart: Multipart) -> impl IntoResponse {
    let Some((name, data)) = file_field(&mut multipart).await else {
        return (StatusCode::BAD_REQUEST, String::new());
    };
    if data != pdf_body(&name) {
        return (StatusCode::UNPROCESSABLE_ENTITY, "content mismatch".to_string());
    }
    if name.contains("broken") {
        return (StatusCode::INTERNAL_SERVER_ERROR, "storage failure".to_string());
    }
    if name.contains("blank") {
        return (StatusCode::OK, "  \n".to_string());
    }
    (StatusCode::OK, format!("  https://cdn.example/gazettes/{}\n", name))
}

pub struct TestServer {
    pub base_url: String,
    pub store: Arc<InMemoryGazetteStore>,
}

impl TestServer {
    pub fn file_url(&self, name: &str) -> String {
        format!("{}/files/{}", self.base_url, name)
    }

    pub fn upload_url(&self) -> String {
        format!("{}/upload", self.base_url)
    }

    pub fn api_base_url(&self) -> String {
        format!("{}/api", self.base_url)
    }
}

pub async fn spawn_server() -> TestServer {
    let store = Arc::new(InMemoryGazetteStore::new());
    let app = Router::new()
        .route("/files/{name}", get(serve_file))
        .route("/upload", post(receive_upload))
        .nest("/api", router(AppState::new(store.clone())));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    TestServer {
        base_url: format!("http://{}", addr),
        store,
    }
}
