use anyhow::Context;
use clap::Parser;
use ens_sniper::core::ConfigProvider;
use ens_sniper::utils::error::ErrorSeverity;
use ens_sniper::utils::{logger, validation::Validate};
use ens_sniper::{
    CliConfig, LocalStorage, RpcExpirationOracle, ScanEngine, SnipeConfig, SnipePipeline,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting ens-sniper");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = match args.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - no RPC calls will be made");
        return perform_dry_run(&config).await;
    }

    let oracle = RpcExpirationOracle::new(
        config.rpc_endpoint()?,
        config.registrar_address()?,
        config.request_timeout(),
    )
    .context("failed to build RPC client")?;

    let pipeline = SnipePipeline::new(LocalStorage::default(), config, Arc::new(oracle))
        .context("failed to set up scan pipeline")?;
    let engine = ScanEngine::new(pipeline);

    match engine.run().await {
        Ok(report) => {
            tracing::info!("✅ Scan completed in {:?}", report.elapsed);
            println!("✅ Checked {} domains", report.summary.total);
            println!("🎯 Snipeable: {}", report.summary.snipeable);
            if report.summary.failed > 0 {
                println!("⚠️ Failed lookups: {}", report.summary.failed);
            }
            println!("📁 Output saved to: {}", report.output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Scan failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &SnipeConfig) {
    println!("📋 Configuration Summary:");
    println!(
        "  Input: {} (column '{}')",
        config.input_path(),
        config.domain_column()
    );
    println!("  Output: {}", config.output_path());
    println!(
        "  Batches: {} domains, {:?} apart",
        config.batch_size(),
        config.pacing_delay()
    );
    println!("  Registrar: {}", config.rpc.registrar_address);
    println!();
}

async fn perform_dry_run(config: &SnipeConfig) -> anyhow::Result<()> {
    let data = tokio::fs::read(config.input_path())
        .await
        .with_context(|| format!("cannot read {}", config.input_path()))?;
    let values = ens_sniper::adapters::csv_source::parse_csv_column(&data, config.domain_column())?;
    let domains = ens_sniper::adapters::csv_source::unique_domains(values);

    let batches = domains.len().div_ceil(config.batch_size());
    let min_wait = config.pacing_delay() * batches.saturating_sub(1) as u32;

    println!("🔍 Dry Run Analysis:");
    println!("  Domains: {}", domains.len());
    println!("  Batches: {}", batches);
    println!("  Minimum pacing time: {:?}", min_wait);
    for domain in domains.iter().take(10) {
        println!(
            "  {} -> labelhash {}",
            domain,
            ens_sniper::label_hash(domain)
        );
    }
    if domains.len() > 10 {
        println!("  ... and {} more", domains.len() - 10);
    }

    Ok(())
}
