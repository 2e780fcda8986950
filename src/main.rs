use anyhow::Context;
use clap::Parser;
use factory_sense::domain::ports::ConfigProvider;
use factory_sense::utils::error::{ErrorSeverity, FactoryError};
use factory_sense::utils::{logger, validation::Validate};
use factory_sense::{CliConfig, Menu, Plant, ReportGenerator};
use std::io;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入配置並套用命令列覆蓋
    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting factory-sense");
    tracing::debug!("Resolved config: {:?}", config);

    let plant = match Plant::from_config(&config) {
        Ok(plant) => plant,
        Err(e) => exit_with(&e),
    };

    let stdin = io::stdin();
    let mut menu = Menu::new(plant, stdin.lock(), io::stdout())
        .with_export_path(config.export_path().map(str::to_string));

    menu.run().context("interactive session failed")?;

    // 結束時自動匯出報表
    if let Some(path) = config.export_path() {
        ReportGenerator::new(menu.plant())
            .export_json(path)
            .with_context(|| format!("failed to export report to {}", path))?;
        println!("📁 Relatório exportado para: {}", path);
    }

    Ok(())
}

fn exit_with(e: &FactoryError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Sugestão: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
