use clap::Parser;
use moneysim::cli::{Cli, execute};
use moneysim::data::DataDirectory;
use moneysim::init_logging;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let data_dir = cli
        .data_dir
        .clone()
        .unwrap_or_else(DataDirectory::default_path);

    init_logging(&data_dir, &cli.log_level)?;

    let data = DataDirectory::new(data_dir);
    let mut stdout = std::io::stdout().lock();
    let outcome = execute(cli.command, &data, &mut stdout);

    if let Err(err) = &outcome {
        tracing::error!("Command failed: {err}");
    }
    outcome
}
