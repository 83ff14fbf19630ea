use anyhow::Context;
use inquire::{CustomType, Text};
use tourism_core::{
    Config,
    config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT},
};

/// Prompt for backend settings and write them to the config file.
pub fn run(mut config: Config) -> anyhow::Result<()> {
    let current_url = config.base_url.clone().unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let url = Text::new("Backend base URL:")
        .with_default(&current_url)
        .with_help_message("Where the Tourism AI API is served")
        .prompt()
        .context("Failed to read base URL")?;
    config.set_base_url(&url)?;

    let timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT.as_secs()))
        .with_error_message("Please enter a whole number of seconds")
        .prompt()
        .context("Failed to read timeout")?;
    config.timeout_secs = Some(timeout_secs);

    let history_limit = CustomType::<u32>::new("History entries to show:")
        .with_default(config.history_limit())
        .with_error_message("Please enter a whole number")
        .prompt()
        .context("Failed to read history limit")?;
    config.history_limit = Some(history_limit);

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
