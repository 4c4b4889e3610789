use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::Editor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use nutrisync_application::{HydrationView, SessionController};
use nutrisync_core::config::ClientConfig;
use nutrisync_core::form::PlanProfile;
use nutrisync_infrastructure::{JsonPlanRepository, NutriPaths};
use nutrisync_interaction::HttpNutritionClient;

mod command;
mod helper;
mod render;

use command::Command;
use helper::CliHelper;

#[derive(Parser)]
#[command(name = "nutrisync")]
#[command(about = "NutriSync - nutrition plan dashboard in the terminal", long_about = None)]
struct Cli {
    /// Base URL of the plan service (overrides NUTRISYNC_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Directory holding the saved plan
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Send the selection as a fitness goal or an activity level
    #[arg(long, value_parser = parse_profile)]
    profile: Option<PlanProfile>,
}

fn parse_profile(raw: &str) -> Result<PlanProfile, String> {
    raw.parse()
        .map_err(|_| format!("expected 'goal' or 'activity', got '{}'", raw))
}

fn init_tracing() -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))
}

fn load_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config = config.with_base_url(url)?;
    }
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }
    if let Some(profile) = cli.profile {
        config = config.with_profile(profile);
    }
    Ok(config)
}

fn print_help() {
    println!("{}", "Commands:".bright_black());
    println!("  /set <age|weight|height|goal|activity> <value>  edit the form");
    println!("  /submit                                         request a plan");
    println!("  /water                                          add 0.5 L of water");
    println!("  /chat <message>  (or just type)                 ask the assistant");
    println!("  /track <weight>                                 record today's weight");
    println!("  /food <image path>                              analyze a meal photo");
    println!("  /restart                                        discard the plan");
    println!("  /show                                           show the current screen");
    println!("  quit | exit");
}

/// Runs one parsed command. Returns `false` when the REPL should stop.
async fn dispatch(controller: &SessionController, command: Command) -> bool {
    match command {
        Command::Quit => return false,
        Command::Help => print_help(),
        Command::Show => render::print_view(&controller.view().await),
        Command::Set { field, value } => {
            controller.set_field(field, value).await;
        }
        Command::Submit => {
            println!("{}", "Generating your plan...".yellow());
            if render::print_outcome(&controller.submit().await, "Plan ready.") {
                render::print_view(&controller.view().await);
            }
        }
        Command::Water => {
            let outcome = controller.add_water().await;
            if render::print_outcome(&outcome, "") {
                let hydration = HydrationView::from_level(&controller.snapshot().await.hydration);
                println!("{}", hydration.label.bright_green());
            }
        }
        Command::Chat(message) => {
            let outcome = controller.send_chat(&message).await;
            if render::print_outcome(&outcome, "") {
                if let Some(entry) = controller.snapshot().await.chat.last() {
                    for line in entry.ai_reply.lines() {
                        println!("{}", line.bright_blue());
                    }
                }
            }
        }
        Command::Track(weight) => {
            let outcome = controller.track_weight(&weight).await;
            render::print_outcome(&outcome, "Progress updated.");
        }
        Command::Food(path) => match tokio::fs::read(&path).await {
            Ok(image) => {
                let outcome = controller.analyze_food(&image).await;
                if render::print_outcome(&outcome, "") {
                    if let Some(analysis) = controller.snapshot().await.food_analysis {
                        println!("{}", analysis);
                    }
                }
            }
            Err(e) => eprintln!(
                "{}",
                format!("Cannot read {}: {}", path.display(), e).red()
            ),
        },
        Command::Restart => {
            if render::print_outcome(&controller.restart().await, "Plan discarded.") {
                render::print_view(&controller.view().await);
            }
        }
    }
    true
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    // ===== Backend Initialization =====
    let config = load_config(&cli)?;
    let paths = NutriPaths::new(config.data_dir.clone());
    let repository = Arc::new(
        JsonPlanRepository::new(&paths).context("Failed to locate the data directory")?,
    );
    let api = Arc::new(HttpNutritionClient::from_config(&config));
    info!(base_url = %config.base_url, record = %repository.path().display(), "Starting session");

    let controller = SessionController::start(api, repository, config.profile).await;

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper));

    println!("{}", "=== NutriSync ===".bright_magenta().bold());
    println!("{}", "Type '/help' for commands, or 'quit' to exit.".bright_black());
    println!();
    render::print_view(&controller.view().await);

    // ===== Main REPL Loop =====
    loop {
        match rl.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                match Command::parse(trimmed) {
                    Ok(command) => {
                        debug!(?command, "Dispatching");
                        if !dispatch(&controller, command).await {
                            println!("{}", "Goodbye!".bright_green());
                            break;
                        }
                    }
                    Err(message) => eprintln!("{}", message.red()),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    Ok(())
}
