// Configuration structs

use serde::Deserialize;
use std::path::PathBuf;

use super::constants::{DEFAULT_GEMINI_BASE_URL, DEFAULT_REWRITE_MODEL};

/// Effective configuration after merging config.toml and the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory for the key-value store (endpoint URL, records)
    pub data_dir: PathBuf,

    /// Gemini model used for rewrites
    pub model: String,

    /// Gemini API root; overridable for proxies and tests
    pub gemini_base_url: String,

    /// Gemini credential. Only ever read from the environment.
    pub api_key: Option<String>,
}

impl Config {
    pub fn new(data_dir: PathBuf) -> Self {
        Self {
            data_dir,
            model: DEFAULT_REWRITE_MODEL.to_string(),
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            api_key: None,
        }
    }

    /// Validate configuration and return helpful errors
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.model.trim().is_empty() {
            anyhow::bail!("model 값이 비어 있습니다\n\n~/.edulog/config.toml 파일을 수정하세요");
        }

        if !(self.gemini_base_url.starts_with("http://")
            || self.gemini_base_url.starts_with("https://"))
        {
            anyhow::bail!(
                "gemini_base_url 값이 잘못되었습니다: '{}'\n\nhttp:// 또는 https:// 로 시작해야 합니다",
                self.gemini_base_url
            );
        }

        if self.data_dir.as_os_str().is_empty() {
            anyhow::bail!("data_dir 값이 비어 있습니다");
        }

        Ok(())
    }
}

/// On-disk shape of ~/.edulog/config.toml. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct FileConfig {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub gemini_base_url: Option<String>,
}
