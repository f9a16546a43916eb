use anyhow::Context;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use loan_advisor::config::AdvisorConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AdvisorConfig::from_env().context("Failed to load configuration")?;

    // Initialize tracing: stderr always, plus a daily log file when configured.
    // The guard flushes the file writer on drop, so it lives until main returns.
    let (file_writer, _log_guard) = match config.log_dir.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "loan-advisor.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(file_writer.map(|writer| {
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
        }))
        .init();

    eprintln!("🏦 Loan Advisor v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Chat API: http://{}/api/chat", config.listen_addr());
    eprintln!("   Eligibility API: http://{}/api/eligibility", config.listen_addr());
    eprintln!(
        "   Sentiment: {}",
        if config.sentiment.is_some() { "enabled" } else { "disabled" }
    );
    if let Some(ref dir) = config.log_dir {
        eprintln!("   Logs: {dir}");
    }

    loan_advisor::server::run(&config)
        .await
        .context("Loan advisor server failed")?;

    Ok(())
}
