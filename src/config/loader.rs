// Configuration loader
// Reads ~/.edulog/config.toml (optional) and the environment

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::constants::{APP_DIR_NAME, API_KEY_ENV_VARS, DATA_DIR_ENV_VAR};
use super::settings::{Config, FileConfig};

/// Load configuration from ~/.edulog/config.toml and the process environment
pub fn load_config() -> Result<Config> {
    let home = dirs::home_dir().context("홈 디렉터리를 찾을 수 없습니다")?;
    let app_dir = home.join(APP_DIR_NAME);
    load_config_from(&app_dir, |name| std::env::var(name).ok())
}

/// Load configuration rooted at `app_dir`, reading variables through `env`.
///
/// Precedence: environment, then config.toml, then defaults. The credential
/// is never read from the file.
pub fn load_config_from<F>(app_dir: &Path, env: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let config_path = app_dir.join("config.toml");
    let file_config = if config_path.exists() {
        let contents = fs::read_to_string(&config_path)
            .with_context(|| format!("{} 파일을 읽지 못했습니다", config_path.display()))?;
        toml::from_str::<FileConfig>(&contents)
            .with_context(|| format!("{} 파일 형식이 잘못되었습니다", config_path.display()))?
    } else {
        tracing::debug!(path = %config_path.display(), "No config file, using defaults");
        FileConfig::default()
    };

    let data_dir = env(DATA_DIR_ENV_VAR)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .or(file_config.data_dir)
        .unwrap_or_else(|| app_dir.to_path_buf());

    let mut config = Config::new(data_dir);
    if let Some(model) = file_config.model {
        config.model = model;
    }
    if let Some(base_url) = file_config.gemini_base_url {
        config.gemini_base_url = base_url.trim_end_matches('/').to_string();
    }
    config.api_key = API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| env(*name))
        .find(|v| !v.trim().is_empty());

    config
        .validate()
        .context("설정 검증 실패")?;

    Ok(config)
}
