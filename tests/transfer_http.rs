// tests/transfer_http.rs
//
// ダウンロード・アップロード・保存APIクライアントをローカルサーバーに対して検証する

mod common;

use std::path::PathBuf;

use axum::{routing::post, Json, Router};
use chrono::NaiveDate;
use gazette_scraper::{
    Downloader, FileFetcher, FileUploader, GazetteQuery, GazetteSink, NewGazette, ScraperError,
    StorageClient, Uploader,
};
use serde_json::{json, Value};

use common::{pdf_body, spawn_server};

#[tokio::test]
async fn download_failure_does_not_affect_siblings() {
    let server = spawn_server().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let downloader = Downloader::new(reqwest::Client::new(), dir.path(), 2);

    let mut paths = downloader
        .fetch_all(vec![
            server.file_url("diario_20250701.pdf"),
            server.file_url("missing_20250702.pdf"),
            server.file_url("diario_20250703.pdf"),
        ])
        .await;
    paths.sort();

    assert_eq!(
        paths,
        vec![
            dir.path().join("diario_20250701.pdf"),
            dir.path().join("diario_20250703.pdf"),
        ]
    );
    assert_eq!(
        std::fs::read(&paths[0]).unwrap(),
        pdf_body("diario_20250701.pdf")
    );
    assert!(
        !dir.path().join("missing_20250702.pdf").exists(),
        "failed download must not leave a file behind"
    );
}

#[tokio::test]
async fn download_creates_missing_directory() {
    let server = spawn_server().await;
    let root = tempfile::tempdir().expect("tempdir");
    let nested = root.path().join("a").join("b");
    let downloader = Downloader::new(reqwest::Client::new(), &nested, 1);

    let paths = downloader
        .fetch_all(vec![server.file_url("ed_20250710.pdf")])
        .await;

    assert_eq!(paths, vec![nested.join("ed_20250710.pdf")]);
}

#[tokio::test]
async fn unreachable_host_is_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let downloader = Downloader::new(reqwest::Client::new(), dir.path(), 2);

    let paths = downloader
        .fetch_all(vec!["http://127.0.0.1:9/files/ed_20250701.pdf".to_string()])
        .await;

    assert!(paths.is_empty());
}

#[tokio::test]
async fn upload_failure_does_not_affect_siblings() {
    let server = spawn_server().await;
    let dir = tempfile::tempdir().expect("tempdir");

    let mut paths = Vec::new();
    for name in [
        "ok_20250701.pdf",
        "broken_20250702.pdf",
        "blank_20250703.pdf",
        "ok_20250704.pdf",
    ] {
        let path = dir.path().join(name);
        std::fs::write(&path, pdf_body(name)).unwrap();
        paths.push(path);
    }
    paths.push(PathBuf::from("/nonexistent/gone_20250705.pdf"));

    let uploader = Uploader::new(reqwest::Client::new(), server.upload_url(), 5);
    let uploaded = uploader.upload_all(paths).await;

    let pairs: Vec<(String, String)> = uploaded
        .iter()
        .map(|f| (f.file_name().unwrap().to_string(), f.url.clone()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            (
                "ok_20250701.pdf".to_string(),
                "https://cdn.example/gazettes/ok_20250701.pdf".to_string()
            ),
            (
                "ok_20250704.pdf".to_string(),
                "https://cdn.example/gazettes/ok_20250704.pdf".to_string()
            ),
        ]
    );
}

#[tokio::test]
async fn storage_client_round_trip() {
    let server = spawn_server().await;
    let client = StorageClient::new(reqwest::Client::new(), server.api_base_url());

    client
        .store_gazette(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(), "https://cdn.example/a.pdf")
        .await
        .expect("store a");
    client
        .store_gazette(NaiveDate::from_ymd_opt(2025, 8, 1).unwrap(), "https://cdn.example/b.pdf")
        .await
        .expect("store b");

    let again = client
        .create_gazette(&NewGazette {
            url: "https://cdn.example/a.pdf".to_string(),
            publication_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        })
        .await
        .expect("store duplicate");
    assert_eq!(again.id, 1);

    let july = client
        .list_gazettes(&GazetteQuery::month(7, 2025))
        .await
        .expect("list july");
    assert_eq!(july.len(), 1);
    assert_eq!(july[0].url, "https://cdn.example/a.pdf");

    let page = client
        .list_gazettes(&GazetteQuery::page(1, 10))
        .await
        .expect("list page");
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].url, "https://cdn.example/b.pdf");
}

#[tokio::test]
async fn storage_client_surfaces_bad_request() {
    let server = spawn_server().await;
    let client = StorageClient::new(reqwest::Client::new(), server.api_base_url());

    let err = client
        .list_gazettes(&GazetteQuery {
            month: Some(7),
            ..Default::default()
        })
        .await
        .unwrap_err();

    match err {
        ScraperError::Api { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("Both month and year"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// 日付を datetime で返す保存API（公開日を深夜0時の日時で保持する実装）
async fn spawn_datetime_api() -> String {
    async fn create(Json(body): Json<Value>) -> Json<Value> {
        let date = body["publication_date"].as_str().unwrap_or_default();
        Json(json!({
            "id": 1,
            "url": body["url"],
            "publication_date": format!("{}T00:00:00", date),
        }))
    }

    async fn list() -> Json<Value> {
        Json(json!([
            { "id": 1, "url": "https://cdn.example/a.pdf", "publication_date": "2025-07-15T00:00:00" }
        ]))
    }

    let app = Router::new().route("/api/gazettes/", post(create).get(list));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind datetime api");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    format!("http://{}/api", addr)
}

#[tokio::test]
async fn storage_client_accepts_datetime_records() {
    let base_url = spawn_datetime_api().await;
    let client = StorageClient::new(reqwest::Client::new(), base_url);
    let date = NaiveDate::from_ymd_opt(2025, 7, 15).unwrap();

    client
        .store_gazette(date, "https://cdn.example/a.pdf")
        .await
        .expect("2xx is a successful store");

    let created = client
        .create_gazette(&NewGazette {
            url: "https://cdn.example/a.pdf".to_string(),
            publication_date: date,
        })
        .await
        .expect("datetime record");
    assert_eq!(created.publication_date, date);

    let listed = client
        .list_gazettes(&GazetteQuery::month(7, 2025))
        .await
        .expect("datetime list");
    assert_eq!(listed[0].publication_date, date);
}

#[tokio::test]
async fn storage_client_ignores_unexpected_success_body() {
    async fn create() -> &'static str {
        "created"
    }

    let app = Router::new().route("/api/gazettes/", post(create));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = StorageClient::new(reqwest::Client::new(), format!("http://{}/api", addr));
    client
        .store_gazette(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(), "https://cdn.example/b.pdf")
        .await
        .expect("non-JSON 2xx body still counts as stored");
}

#[tokio::test]
async fn upload_streams_whole_file() {
    let server = spawn_server().await;
    let dir = tempfile::tempdir().expect("tempdir");
    let name = "large_20250709.pdf";
    let path = dir.path().join(name);
    std::fs::write(&path, pdf_body(name)).unwrap();

    let uploader = Uploader::new(reqwest::Client::new(), server.upload_url(), 1);
    let uploaded = uploader.upload_file(&path).await.expect("upload");

    // 受信側で中身を照合している
    assert_eq!(uploaded.url, format!("https://cdn.example/gazettes/{}", name));
}
