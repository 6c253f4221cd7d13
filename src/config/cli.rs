use super::SnipeConfig;
use crate::utils::error::Result;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "ens-sniper")]
#[command(about = "Find expired ENS names past their grace period and price them")]
pub struct CliConfig {
    /// Optional TOML configuration file; flags below override it
    #[arg(short, long)]
    pub config: Option<String>,

    /// CSV file with the domains to check
    #[arg(short, long)]
    pub input: Option<String>,

    /// Column of the CSV holding the domain names
    #[arg(long)]
    pub column: Option<String>,

    /// JSON file results are merged into
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long)]
    pub batch_size: Option<usize>,

    /// Pause between batches, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Ethereum JSON-RPC endpoint (takes precedence over the Alchemy key)
    #[arg(long, env = "ENS_SNIPER_RPC_URL")]
    pub rpc_url: Option<String>,

    #[arg(long, env = "ALCHEMY_API_KEY", hide_env_values = true)]
    pub alchemy_api_key: Option<String>,

    #[arg(long)]
    pub registrar: Option<String>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Show what would be checked without calling the RPC endpoint")]
    pub dry_run: bool,
}

impl CliConfig {
    /// Loads the TOML file (if any) and applies the flags on top.
    pub fn resolve(&self) -> Result<SnipeConfig> {
        let mut config = match &self.config {
            Some(path) => SnipeConfig::from_file(path)?,
            None => SnipeConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut SnipeConfig) {
        if let Some(input) = &self.input {
            config.source.input_path = input.clone();
        }
        if let Some(column) = &self.column {
            config.source.domain_column = column.clone();
        }
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if let Some(size) = self.batch_size {
            config.batch.size = size;
        }
        if let Some(delay) = self.delay_ms {
            config.batch.pacing_delay_ms = delay;
        }
        if let Some(url) = &self.rpc_url {
            config.rpc.url = Some(url.clone());
        }
        if let Some(key) = &self.alchemy_api_key {
            config.rpc.alchemy_api_key = Some(key.clone());
        }
        if let Some(registrar) = &self.registrar {
            config.rpc.registrar_address = registrar.clone();
        }
        if let Some(timeout) = self.timeout_secs {
            config.rpc.timeout_seconds = timeout;
        }
    }
}
