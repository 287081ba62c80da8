use skyliner_git::{ExtractionPolicy, GitConfig};
use skyliner_sync::{DeliveryConfig, DEFAULT_SERVER};

pub const TOKEN_KEY: &str = "skyliner.token";
pub const REPO_NAME_KEY: &str = "skyliner.repo-name";
pub const SERVER_KEY: &str = "skyliner.server";
pub const VERBOSE_KEY: &str = "skyliner.verbose";
pub const STRICT_EXTRACTION_KEY: &str = "skyliner.strict-extraction";

/// Settings read once at startup and handed to each component.
#[derive(Debug, Clone)]
pub struct HookConfig {
    pub delivery: DeliveryConfig,
    pub verbose: bool,
    pub extraction: ExtractionPolicy,
}

impl HookConfig {
    pub fn from_git_config(config: &GitConfig) -> anyhow::Result<Self> {
        let token = required(config, TOKEN_KEY)?;
        let repo_name = required(config, REPO_NAME_KEY)?;
        let server = config.get(SERVER_KEY).unwrap_or(DEFAULT_SERVER).to_string();

        let verbose = verbose_enabled(config);
        let strict = optional_bool(config, STRICT_EXTRACTION_KEY, false);

        Ok(Self {
            delivery: DeliveryConfig {
                server,
                token,
                repo_name,
            },
            verbose,
            extraction: if strict {
                ExtractionPolicy::Strict
            } else {
                ExtractionPolicy::BestEffort
            },
        })
    }
}

/// Whether `skyliner.verbose` asks for debug logging. Unreadable values
/// count as off.
pub fn verbose_enabled(config: &GitConfig) -> bool {
    optional_bool(config, VERBOSE_KEY, false)
}

fn optional_bool(config: &GitConfig, key: &str, default: bool) -> bool {
    match config.get_bool(key) {
        Ok(value) => value.unwrap_or(default),
        Err(e) => {
            tracing::warn!("{}; using {}", e, default);
            default
        }
    }
}

fn required(config: &GitConfig, key: &str) -> anyhow::Result<String> {
    config
        .get(key)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| anyhow::anyhow!("{key} is not set; run `git config {key} <value>`"))
}
