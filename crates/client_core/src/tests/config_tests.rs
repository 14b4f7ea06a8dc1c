use super::*;

use std::{
    env,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_path(tag: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let dir = env::temp_dir().join(format!("fraudcheck_config_{tag}_{suffix}"));
    fs::create_dir_all(&dir).expect("temp dir");
    dir.join(SETTINGS_FILE)
}

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn missing_file_and_env_yield_defaults() {
    let path = temp_settings_path("defaults");
    let settings = load_settings_from(&path, no_env).expect("settings");
    assert_eq!(settings, ClientSettings::default());
    assert_eq!(settings.api_url, None);
    assert_eq!(settings.default_model, ModelLabel::NbBow);
}

#[test]
fn file_values_are_overridden_by_env() {
    let path = temp_settings_path("layers");
    fs::write(
        &path,
        "api_url = \"http://file.example:8000\"\ndefault_model = \"nb_tfidf\"\n",
    )
    .expect("write");

    let from_file = load_settings_from(&path, no_env).expect("settings");
    assert_eq!(from_file.api_url.as_deref(), Some("http://file.example:8000"));
    assert_eq!(from_file.default_model, ModelLabel::NbTfidf);

    let layered = load_settings_from(&path, |key| match key {
        "APP__API_URL" => Some("http://env.example".to_string()),
        "DEFAULT_MODEL" => Some("lr_bow_res".to_string()),
        _ => None,
    })
    .expect("settings");
    assert_eq!(layered.api_url.as_deref(), Some("http://env.example"));
    assert_eq!(layered.default_model, ModelLabel::LrBowRes);

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn blank_url_counts_as_absent_and_unknown_model_is_ignored() {
    let path = temp_settings_path("blank");
    let settings = load_settings_from(&path, |key| match key {
        "API_URL" => Some("   ".to_string()),
        "DEFAULT_MODEL" => Some("svm_bow".to_string()),
        _ => None,
    })
    .expect("settings");
    assert_eq!(settings.api_url, None);
    assert_eq!(settings.default_model, ModelLabel::NbBow);
}

#[test]
fn unparsable_settings_file_is_an_error() {
    let path = temp_settings_path("broken");
    fs::write(&path, "api_url = [not toml").expect("write");
    let err = load_settings_from(&path, no_env).expect_err("should fail");
    assert!(err.to_string().contains("failed to parse settings file"));
    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn resolve_api_url_trims_and_validates() {
    assert_eq!(
        resolve_api_url(Some(" http://localhost:8000/ ")).expect("url"),
        "http://localhost:8000"
    );
    assert!(matches!(
        resolve_api_url(None),
        Err(PredictionError::Configuration(message)) if message == MISSING_API_URL_MESSAGE
    ));
    assert!(matches!(
        resolve_api_url(Some("")),
        Err(PredictionError::Configuration(_))
    ));
    assert!(matches!(
        resolve_api_url(Some("not a url")),
        Err(PredictionError::Configuration(_))
    ));
    assert!(matches!(
        resolve_api_url(Some("ftp://files.example")),
        Err(PredictionError::Configuration(_))
    ));
}

#[test]
fn blank_env_url_keeps_url_from_file() {
    let path = temp_settings_path("blank_env");
    fs::write(&path, "api_url = \"http://file.example:8000\"\n").expect("write");

    let settings = load_settings_from(&path, |key| match key {
        "APP__API_URL" => Some(String::new()),
        "API_URL" => Some("  ".to_string()),
        _ => None,
    })
    .expect("settings");
    assert_eq!(settings.api_url.as_deref(), Some("http://file.example:8000"));

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}

#[test]
fn blank_file_url_counts_as_absent() {
    let path = temp_settings_path("blank_file");
    fs::write(&path, "api_url = \"\"\n").expect("write");

    let from_file = load_settings_from(&path, no_env).expect("settings");
    assert_eq!(from_file.api_url, None);

    let with_env = load_settings_from(&path, |key| {
        (key == "API_URL").then(|| "http://env.example".to_string())
    })
    .expect("settings");
    assert_eq!(with_env.api_url.as_deref(), Some("http://env.example"));

    fs::remove_dir_all(path.parent().expect("parent")).expect("cleanup");
}
