mod bootstrap;

use std::process::ExitCode;

use anyhow::Result;
use tally_core::settings::{InputSource, Settings};
use tally_runtime::clipboard::Clipboard;
use tally_ui::app::App;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let settings = Settings::load();

    let log_file = settings.resolved_log_file();
    bootstrap::setup_logging(&settings.log_level, log_file.as_deref())?;

    tracing::info!("vidtally v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Lang: {}, Theme: {}, Interactive: {}",
        settings.locale().as_str(),
        settings.theme,
        settings.interactive
    );

    if settings.interactive {
        run_interactive(&settings).await?;
        return Ok(ExitCode::SUCCESS);
    }

    let raw = bootstrap::read_input(&settings.input_source())?;
    let outcome = bootstrap::run_once(
        &raw,
        &settings,
        &Clipboard::default(),
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    )
    .await?;
    Ok(outcome.into())
}

async fn run_interactive(settings: &Settings) -> Result<()> {
    let mut app = App::new(&settings.theme, settings.messages());

    // Stdin is the terminal here, so only an explicit file is preloaded.
    if let source @ InputSource::File(_) = settings.input_source() {
        let text = bootstrap::read_input(&source)?;
        app.load_text(&text);
    }

    // Ctrl+C arrives as a key event in raw mode and quits the loop.
    app.run().await?;
    Ok(())
}
