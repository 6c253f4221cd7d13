use crate::adapters::rpc::{alchemy_url, ENS_BASE_REGISTRAR};
use crate::core::scheduler::{DEFAULT_BATCH_SIZE, DEFAULT_PACING_DELAY};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, SnipeError};
use crate::utils::validation::{self, Validate};
use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnipeConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub rpc: RpcConfig,
    #[serde(default)]
    pub batch: BatchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_input_path")]
    pub input_path: String,
    #[serde(default = "default_domain_column")]
    pub domain_column: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    pub url: Option<String>,
    pub alchemy_api_key: Option<String>,
    #[serde(default = "default_registrar_address")]
    pub registrar_address: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchConfig {
    #[serde(default = "default_batch_size")]
    pub size: usize,
    #[serde(default = "default_pacing_delay_ms")]
    pub pacing_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: String,
}

fn default_input_path() -> String {
    "domains.csv".to_string()
}

fn default_domain_column() -> String {
    "domain".to_string()
}

fn default_registrar_address() -> String {
    ENS_BASE_REGISTRAR.to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

fn default_pacing_delay_ms() -> u64 {
    DEFAULT_PACING_DELAY.as_millis() as u64
}

fn default_output_path() -> String {
    "snipeable.json".to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            domain_column: default_domain_column(),
        }
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: None,
            alchemy_api_key: None,
            registrar_address: default_registrar_address(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            size: default_batch_size(),
            pacing_delay_ms: default_pacing_delay_ms(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
        }
    }
}

impl SnipeConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SnipeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ALCHEMY_API_KEY})；未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: std::sync::LazyLock<regex::Regex> = std::sync::LazyLock::new(|| {
            regex::Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static pattern")
        });

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// Explicit URL wins; otherwise the Alchemy mainnet URL for the key.
    pub fn rpc_endpoint(&self) -> Result<String> {
        if let Some(url) = self.rpc.url.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok(url.to_string());
        }
        let key = validation::validate_required_field("rpc.url", &self.rpc.alchemy_api_key)?;
        validation::validate_non_empty_string("rpc.alchemy_api_key", key)?;
        Ok(alchemy_url(key))
    }

    pub fn registrar_address(&self) -> Result<Address> {
        validation::validate_address("rpc.registrar_address", &self.rpc.registrar_address)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc.timeout_seconds)
    }
}

impl ConfigProvider for SnipeConfig {
    fn input_path(&self) -> &str {
        &self.source.input_path
    }

    fn domain_column(&self) -> &str {
        &self.source.domain_column
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn batch_size(&self) -> usize {
        self.batch.size
    }

    fn pacing_delay(&self) -> Duration {
        Duration::from_millis(self.batch.pacing_delay_ms)
    }
}

impl Validate for SnipeConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("source.input_path", &self.source.input_path)?;
        validation::validate_file_extension("source.input_path", &self.source.input_path, &["csv"])?;
        validation::validate_non_empty_string("source.domain_column", &self.source.domain_column)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_positive_number("batch.size", self.batch.size, 1)?;
        validation::validate_range("rpc.timeout_seconds", self.rpc.timeout_seconds, 1, 300)?;
        validation::validate_url("rpc.url", &self.rpc_endpoint()?)?;
        self.registrar_address()?;
        Ok(())
    }
}
