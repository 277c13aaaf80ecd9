use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};

use configform::{
    ConfigUi, UiOptions, domain::builtin_schemas, io::DocumentFormat, logging, store::FileStore,
};

#[derive(Debug, Parser)]
#[command(
    name = "configform",
    version,
    about = "Edit the Eric chat-bot configuration in a terminal form"
)]
struct Cli {
    /// Directory holding one document per configuration schema
    #[arg(short = 'd', long = "config-dir", value_name = "DIR", default_value = "config")]
    config_dir: PathBuf,

    /// Document format of the stored configuration (json, yaml, toml)
    #[arg(short = 'f', long = "format", value_name = "FORMAT", default_value = "json")]
    format: String,

    /// Directory for the editor's log file
    #[arg(long = "log-dir", value_name = "DIR", default_value = "log")]
    log_dir: PathBuf,

    /// Open the first schema directly instead of the welcome screen
    #[arg(long = "no-welcome")]
    no_welcome: bool,

    /// Quit immediately even when there are unsaved changes
    #[arg(long = "no-confirm-exit")]
    no_confirm_exit: bool,

    /// Input polling interval in milliseconds
    #[arg(long = "tick-rate", value_name = "MS", default_value_t = 250)]
    tick_rate: u64,

    /// Write compact documents instead of pretty-printed ones
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Print every schema with its document path and exit
    #[arg(long = "list")]
    list: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let format = cli
        .format
        .parse::<DocumentFormat>()
        .map_err(|err| eyre!("{err}"))?;
    let store = FileStore::new(cli.config_dir.clone(), builtin_schemas())
        .with_format(format)
        .with_pretty(!cli.no_pretty);

    if cli.list {
        for schema in builtin_schemas() {
            println!("{}\t{}", schema.name, store.path_for(&schema).display());
        }
        return Ok(());
    }

    let _guard = logging::init(&cli.log_dir)
        .map_err(|err| eyre!("{err:#}"))
        .wrap_err("failed to initialize logging")?;

    let options = UiOptions::default()
        .with_tick_rate(Duration::from_millis(cli.tick_rate.max(10)))
        .with_welcome(!cli.no_welcome)
        .with_confirm_exit(!cli.no_confirm_exit);

    let saved = ConfigUi::new(store)
        .with_options(options)
        .run()
        .map_err(|err| eyre!("{err:#}"))?;

    for name in saved {
        println!("saved {name}");
    }
    Ok(())
}
