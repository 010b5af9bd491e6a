use anyhow::Context;
use clap::Parser;
use lumen::cli::{A11yAction, Cli, Command, ThemeAction};
use lumen::commands::{self, ThemeSession};
use lumen::config::{self, AppConfig};
use lumen::logger;
use lumen_core::observer::OsColorScheme;
use std::io::Write;
use std::process::ExitCode;
use std::rc::Rc;
use std::time::Duration;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = config::init_config(cli.config.clone()).as_result()?;
    logger::setup_logger(config.logging(), cli.verbose)?;
    log::debug!("Loaded configuration: {config:?}");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let code = run(cli, config, &mut out)?;
    out.flush()?;
    Ok(code)
}

fn run(cli: Cli, config: &AppConfig, out: &mut dyn Write) -> anyhow::Result<ExitCode> {
    let json = cli.json;
    match cli.command {
        Command::Theme { action } => {
            let scheme = Rc::new(OsColorScheme::new());
            let session = ThemeSession::from_config(config, scheme.clone())?;
            match action {
                ThemeAction::Show => {
                    session.show(json, out)?;
                }
                ThemeAction::Set { theme } => {
                    session.set(theme.into(), json, out)?;
                }
                ThemeAction::Toggle => {
                    session.toggle(json, out)?;
                }
                ThemeAction::Watch { interval_ms } => {
                    let interval = interval_ms
                        .map(Duration::from_millis)
                        .unwrap_or_else(|| config.watch().poll_interval());
                    let runtime = tokio::runtime::Builder::new_current_thread()
                        .enable_all()
                        .build()
                        .context("failed to start the async runtime")?;
                    runtime.block_on(session.watch(&scheme, interval, shutdown_signal(), json, out))?;
                }
            }
        }
        Command::A11y { action } => match action {
            A11yAction::CheckColors(args) => {
                let result = commands::check_colors(config.accessibility(), &args, json, out)?;
                if !result.valid {
                    return Ok(ExitCode::FAILURE);
                }
            }
            A11yAction::Profile(args) => {
                commands::profile(&args, json, out)?;
            }
            A11yAction::Navigate(args) => {
                commands::navigate(config.accessibility(), &args, json, out)?;
            }
        },
    }
    Ok(ExitCode::SUCCESS)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for Ctrl+C: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("Received Ctrl+C, shutting down");
}
