use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use prompt_info::config::PromptConfig;
use prompt_info::env::PromptEnv;
use prompt_info::prompt;
use prompt_info::styling::ERROR;

/// Print a colorized `[branch dirty path]` summary for a shell prompt.
///
/// Meant to be called from PS1, e.g. `PS1='$(prompt-info) \$ '`.
#[derive(Parser)]
#[command(name = "prompt-info", version, about, long_about = None)]
struct Cli {
    /// Log to stderr (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "off",
        1 => "debug",
        _ => "trace",
    };

    // stdout belongs to the prompt line; logs always go to stderr.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let env = PromptEnv::from_process();
    let config = PromptConfig::load(cli.config.as_deref()).context("Failed to load config")?;
    log::debug!("Config: {config:?}");

    let line = prompt::run(&env, &config)?;

    // Written to raw stdout: the line is usually captured by `$(...)`, and the
    // colors must survive even though stdout isn't a terminal.
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{line}").context("Failed to write prompt")?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(&cli) {
        anstream::eprintln!("{ERROR}prompt-info: {err:#}{ERROR:#}");
        std::process::exit(1);
    }
}
