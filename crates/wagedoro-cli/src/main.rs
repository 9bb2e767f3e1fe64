use clap::{Parser, Subcommand};

mod commands;
mod logging;
mod settings;

#[derive(Parser)]
#[command(
    name = "wagedoro",
    version,
    about = "Work/break timer that tracks what your focus time earns"
)]
struct Cli {
    #[command(flatten)]
    settings: settings::Settings,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive timer session (default)
    Run,
    /// Run the timer headless on synthetic ticks and print the result as JSON
    Simulate(commands::simulate::SimulateArgs),
    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => cli.settings.resolve().and_then(commands::run::run),
        Commands::Simulate(args) => cli
            .settings
            .resolve()
            .and_then(|config| commands::simulate::run(config, args)),
        Commands::Config { action } => commands::config::run(&cli.settings, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
