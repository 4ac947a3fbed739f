use aunt_rosies_api::routes::health::{about, health_check};

#[tokio::test]
async fn health_check_returns_ok() {
    let response = health_check().await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    let json = serde_json::to_value(&data).unwrap();
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn about_reports_crate_version() {
    let response = about().await;
    let data = response.0.data.expect("about data");
    assert_eq!(data.version, env!("CARGO_PKG_VERSION"));
    assert!(data.name.starts_with("Aunt Rosie's Kitchen"));
}
