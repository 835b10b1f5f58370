//! AppState construction from configuration.

use std::io::Write;

use rxlens_common::{AppConfig, KnowledgeProvider};
use rxlens_web::state::AppState;

fn offline_config(dataset: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.dataset.path = dataset.to_string();
    config.knowledge.provider = KnowledgeProvider::Offline;
    config
}

#[tokio::test]
async fn test_state_from_config() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Age,Condition,Drug,Sex,Satisfaction,Reviews").unwrap();
    writeln!(file, "30,Flu,X,Male,5,good").unwrap();

    let config = offline_config(file.path().to_str().unwrap());
    let state = AppState::from_config(&config).await.unwrap();
    assert_eq!(state.store.len(), 1);
    assert_eq!(state.knowledge.name(), "offline");
    assert_eq!(state.lookup_timeout.as_secs(), 4);
}

#[tokio::test]
async fn test_missing_dataset_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.csv");

    let config = offline_config(missing.to_str().unwrap());
    let err = AppState::from_config(&config).await.err().unwrap();
    assert!(err.to_string().contains("failed to load dataset"));
}

#[tokio::test]
async fn test_bundled_demo_dataset_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../assets/cleaned_dataset_WebMd.csv");
    let state = AppState::from_config(&offline_config(path)).await.unwrap();
    assert!(state.store.all_conditions().contains(&"Influenza".to_string()));
    // "75-84" is not a number; the row stays with no age
    assert_eq!(state.store.load_report().ages_coerced, 1);
}
