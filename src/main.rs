use clap::Parser;
use locator_forge::cli::commands::{
    cmd_add, cmd_clear, cmd_generate_locators, cmd_list, cmd_locate, cmd_page_object, cmd_refine,
    cmd_region, cmd_show,
};
use locator_forge::cli::config::{API_KEY_ENV, Cli, Commands, load_config, resolve};
use locator_forge::dom::rect::Rect;
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref());
    let runtime = resolve(&cli, &config, std::env::var(API_KEY_ENV).ok());

    let outcome = match cli.command {
        Commands::Locate { snapshot, preset } => cmd_locate(&runtime, &snapshot, preset),
        Commands::GenerateLocators { snapshot } => cmd_generate_locators(&runtime, &snapshot),
        Commands::Add { snapshot } => cmd_add(&runtime, &snapshot),
        Commands::Region {
            snapshot,
            left,
            top,
            right,
            bottom,
        } => cmd_region(&runtime, &snapshot, Rect::new(left, top, right, bottom)),
        Commands::List { all } => cmd_list(&runtime, all),
        Commands::PageObject => cmd_page_object(&runtime),
        Commands::Refine { instructions } => cmd_refine(&runtime, &instructions),
        Commands::Show => cmd_show(&runtime),
        Commands::Clear { session_only } => cmd_clear(&runtime, session_only),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
