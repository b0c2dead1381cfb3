use std::sync::Arc;

use clap::Parser;

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = settings::Args::parse();
    let settings = settings::Settings::new(&args.settings)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "vaquita={level},telegram_bot={level},engine={level}",
            level = settings.app.level
        ))
        .init();

    tracing::info!("Loaded settings from {}", args.settings.display());

    let engine = Arc::new(engine::Engine::builder().build());
    let bot = telegram_bot::Bot::builder()
        .token(&settings.telegram.token)
        .engine(engine)
        .build()?;

    bot.run().await;
    tracing::info!("Telegram bot stopped");

    Ok(())
}
