use clap::Parser;
use color_eyre::Result;
use tracing_subscriber::EnvFilter;
use todoterm::{
    ApiClient, Config, Profile,
    cli::{Cli, Commands},
    utils,
};

fn main() -> Result<()> {
    // Set up error reporting with color-eyre
    color_eyre::install()?;

    // Parse CLI arguments
    let cli = Cli::parse();

    // Determine profile: --dev flag enables dev mode, otherwise use prod
    let profile = if cli.dev { Profile::Dev } else { Profile::Prod };

    // Load configuration with the determined profile
    let config = Config::load_with_profile(profile)?;

    init_logging(profile)?;

    // --server on the command line wins over the config file
    let server_url = cli.server.as_deref().unwrap_or(&config.server_url);
    let api = ApiClient::new(server_url);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let app = todoterm::tui::App::new(config, api);
            todoterm::tui::run_event_loop(app)?;
        }
        Commands::List => todoterm::cli::handle_list(&api)?,
        Commands::Add { text } => todoterm::cli::handle_add(text, &api)?,
        Commands::Show { id } => todoterm::cli::handle_show(id, &api)?,
        Commands::Done { id } => todoterm::cli::handle_done(id, &api)?,
        Commands::Rm { id } => todoterm::cli::handle_rm(id, &api)?,
    }

    Ok(())
}

/// Log to a file in the profile's data directory so raw-mode terminal output
/// stays clean. `RUST_LOG` controls the filter, defaulting to info.
fn init_logging(profile: Profile) -> Result<()> {
    let Some(data_dir) = utils::get_data_dir(profile) else {
        return Ok(());
    };
    std::fs::create_dir_all(&data_dir)?;
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(data_dir.join("todoterm.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}
