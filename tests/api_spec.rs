use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use black_croz::api::{create_router, ErrorBody, ServerConfig};
use black_croz::db::Database;
use black_croz::models::*;

fn seeded_db() -> Database {
    let db = Database::open_memory().expect("Failed to create database");
    db.migrate().expect("Failed to migrate");
    db.seed_if_empty().expect("Failed to seed");
    db
}

fn setup() -> TestServer {
    setup_with(seeded_db(), &ServerConfig::default())
}

fn setup_with(db: Database, config: &ServerConfig) -> TestServer {
    let app = create_router(db, config);
    TestServer::new(app).expect("Failed to create test server")
}

mod collections {
    use super::*;

    #[tokio::test]
    async fn returns_seeded_items_newest_first() {
        let server = setup();

        let response = server.get("/api/collections").await;

        response.assert_status_ok();
        let items: Vec<CollectionItem> = response.json();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].name, "The Denim Jacket");
        assert_eq!(items[3].name, "The Grey Hoodie");
    }

    #[tokio::test]
    async fn serializes_fields_in_camel_case() {
        let server = setup();

        let response = server.get("/api/collections").await;

        let raw: serde_json::Value = response.json();
        let first = &raw[0];
        assert_eq!(first["priceLabel"], "NPR 8,900");
        assert_eq!(first["imageUrl"], "/assets/denim_jacket.png");
        assert_eq!(first["tag"], "Core");
        assert!(first.get("createdAt").is_some());
        assert!(first.get("price_label").is_none());
    }

    #[tokio::test]
    async fn returns_empty_list_when_nothing_is_stored() {
        let db = Database::open_memory().expect("Failed to create database");
        db.migrate().expect("Failed to migrate");
        let server = setup_with(db, &ServerConfig::default());

        let response = server.get("/api/collections").await;

        response.assert_status_ok();
        let items: Vec<CollectionItem> = response.json();
        assert!(items.is_empty());
    }

    #[tokio::test]
    async fn reports_store_failures_as_500() {
        // No migrations, so the table is missing
        let db = Database::open_memory().expect("Failed to create database");
        let server = setup_with(db, &ServerConfig::default());

        let response = server.get("/api/collections").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = response.json();
        assert_eq!(body.message, "Failed to load collections");
    }
}

mod lookbook {
    use super::*;

    #[tokio::test]
    async fn returns_seeded_images_newest_first() {
        let server = setup();

        let response = server.get("/api/lookbook").await;

        response.assert_status_ok();
        let images: Vec<LookbookImage> = response.json();
        assert_eq!(images.len(), 4);
        assert_eq!(images[0].title, "Static Calm");
        assert_eq!(images[0].mood, "Calm / Texture");
    }

    #[tokio::test]
    async fn reports_store_failures_as_500() {
        let db = Database::open_memory().expect("Failed to create database");
        let server = setup_with(db, &ServerConfig::default());

        let response = server.get("/api/lookbook").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = response.json();
        assert_eq!(body.message, "Failed to load lookbook");
    }
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let server = setup();

        let response = server.get("/api/health").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}

mod static_site {
    use super::*;
    use std::fs;

    fn public_dir() -> tempfile::TempDir {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("index.html"), "<div id=\"root\"></div>")
            .expect("Failed to write index.html");
        fs::write(dir.path().join("app.js"), "console.log('black croz');")
            .expect("Failed to write app.js");
        dir
    }

    #[tokio::test]
    async fn serves_files_from_the_public_directory() {
        let dir = public_dir();
        let server = setup_with(
            seeded_db(),
            &ServerConfig::default().with_public_dir(dir.path()),
        );

        let response = server.get("/app.js").await;

        response.assert_status_ok();
        assert_eq!(response.text(), "console.log('black croz');");
    }

    #[tokio::test]
    async fn falls_back_to_index_for_deep_links() {
        let dir = public_dir();
        let server = setup_with(
            seeded_db(),
            &ServerConfig::default().with_public_dir(dir.path()),
        );

        let response = server.get("/lookbook/night-shift").await;

        response.assert_status_ok();
        assert_eq!(response.text(), "<div id=\"root\"></div>");
    }

    #[tokio::test]
    async fn keeps_api_routes_ahead_of_the_fallback() {
        let dir = public_dir();
        let server = setup_with(
            seeded_db(),
            &ServerConfig::default().with_public_dir(dir.path()),
        );

        let response = server.get("/api/lookbook").await;

        response.assert_status_ok();
        let images: Vec<LookbookImage> = response.json();
        assert_eq!(images.len(), 4);
    }

    #[tokio::test]
    async fn returns_404_without_a_public_directory() {
        let server = setup();

        let response = server.get("/about").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}

mod cors {
    use super::*;

    #[tokio::test]
    async fn allows_any_origin_by_default() {
        let server = setup();

        let response = server
            .get("/api/collections")
            .add_header(header::ORIGIN, HeaderValue::from_static("https://example.com"))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("*"))
        );
    }

    #[tokio::test]
    async fn echoes_configured_origins() {
        let config = ServerConfig::default()
            .with_cors_origins(vec!["https://blackcroz.com".to_string()]);
        let server = setup_with(seeded_db(), &config);

        let response = server
            .get("/api/collections")
            .add_header(header::ORIGIN, HeaderValue::from_static("https://blackcroz.com"))
            .await;

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("https://blackcroz.com"))
        );
    }

    #[tokio::test]
    async fn omits_header_for_other_origins() {
        let config = ServerConfig::default()
            .with_cors_origins(vec!["https://blackcroz.com".to_string()]);
        let server = setup_with(seeded_db(), &config);

        let response = server
            .get("/api/collections")
            .add_header(header::ORIGIN, HeaderValue::from_static("https://elsewhere.example"))
            .await;

        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
