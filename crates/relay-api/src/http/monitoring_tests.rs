use super::*;

use relay_config::Config;

fn state(config: &Config) -> Arc<AppState> {
    Arc::new(AppState::from_config(config).unwrap())
}

#[test]
fn test_health_status_serialize() {
    assert_eq!(
        serde_json::to_string(&HealthStatus::Healthy).unwrap(),
        "\"healthy\""
    );
    assert_eq!(
        serde_json::to_string(&HealthStatus::Degraded).unwrap(),
        "\"degraded\""
    );
}

#[tokio::test]
async fn test_health_degraded_without_keys() {
    let Json(health) = health_check(State(state(&Config::default()))).await;

    assert_eq!(health.status, HealthStatus::Degraded);
    assert_eq!(health.service, "relay-worker");
    assert!(health.endpoints.contains(&"/solve-pdf".to_string()));
    let gemini = health.providers.iter().find(|p| p.name == "gemini").unwrap();
    assert_eq!(gemini.status, HealthStatus::Degraded);
}

#[tokio::test]
async fn test_health_healthy_with_keys() {
    let mut config = Config::default();
    config.providers.gemini.api_key = Some("g".to_string());
    config.providers.screenshot.api_key = Some("s".to_string());
    config.providers.elevenlabs.api_key = Some("e".to_string());

    let Json(health) = health_check(State(state(&config))).await;
    assert_eq!(health.status, HealthStatus::Healthy);
    assert!(health.providers.iter().all(|p| p.message.is_none()));
}

#[tokio::test]
async fn test_service_info_lists_endpoints() {
    let Json(info) = service_info().await;
    assert_eq!(info["service"], "relay-worker");
    let paths: Vec<&str> = info["endpoints"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"/generate-image"));
    assert!(paths.contains(&"/voiceover"));
}

#[tokio::test]
async fn test_cleanup_reports_memory() {
    let Json(report) = cleanup(State(state(&Config::default()))).await;
    assert!(report.success);
    #[cfg(target_os = "linux")]
    assert!(report.memory_mb.unwrap() > 0.0);
}
