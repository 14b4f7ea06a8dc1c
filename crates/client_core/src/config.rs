use std::{collections::HashMap, fs, io, path::Path};

use anyhow::Context;
use shared::domain::ModelLabel;
use tracing::warn;
use url::Url;

use crate::error::{PredictionError, MISSING_API_URL_MESSAGE};

pub const SETTINGS_FILE: &str = "client.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_url: Option<String>,
    pub default_model: ModelLabel,
}

pub fn load_settings() -> anyhow::Result<ClientSettings> {
    load_settings_from(Path::new(SETTINGS_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the settings file, then environment variables. Later layers win;
/// a blank value leaves the earlier layer in place.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    match fs::read_to_string(path) {
        Ok(raw) => {
            let file_cfg = toml::from_str::<HashMap<String, String>>(&raw)
                .with_context(|| format!("failed to parse settings file '{}'", path.display()))?;
            if let Some(v) = file_cfg.get("api_url").and_then(|v| non_blank(v)) {
                settings.api_url = Some(v);
            }
            if let Some(v) = file_cfg.get("default_model") {
                apply_model(&mut settings, v, "settings file");
            }
        }
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    }

    for key in ["API_URL", "APP__API_URL"] {
        if let Some(v) = env(key).as_deref().and_then(non_blank) {
            settings.api_url = Some(v);
        }
    }
    for key in ["DEFAULT_MODEL", "APP__DEFAULT_MODEL"] {
        if let Some(v) = env(key) {
            apply_model(&mut settings, &v, key);
        }
    }

    Ok(settings)
}

/// Normalizes the configured base URL, or explains why the service cannot be reached.
pub fn resolve_api_url(raw: Option<&str>) -> Result<String, PredictionError> {
    let Some(raw) = raw.map(str::trim).filter(|v| !v.is_empty()) else {
        return Err(PredictionError::Configuration(
            MISSING_API_URL_MESSAGE.to_string(),
        ));
    };

    let parsed = Url::parse(raw).map_err(|err| {
        PredictionError::Configuration(format!("API URL '{raw}' is not a valid URL: {err}"))
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(PredictionError::Configuration(format!(
            "API URL '{raw}' must use http or https"
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn apply_model(settings: &mut ClientSettings, raw: &str, source: &str) {
    match raw.parse::<ModelLabel>() {
        Ok(label) => settings.default_model = label,
        Err(err) => warn!(%source, "ignoring configured default model: {err}"),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
