use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use digipet::app::{recap_lines, status_lines, App};
use digipet::config::{load_settings, project_paths, save_settings_atomic};
use digipet::storage::{load_or_init_session, save_atomic};
use digipet::{Obituary, Outcome, PetAction, Session, Species};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "digipet")]
#[command(about = "Look after a virtual pet that keeps living while you are away")]
struct Cli {
    /// Directory holding save.json and settings.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Real seconds per game-minute for this run
    #[arg(long, global = true)]
    speed: Option<f64>,

    /// Write the effective settings back to settings.json
    #[arg(long, global = true)]
    save_settings: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Adopt a new pet and make it active
    New {
        name: String,
        #[arg(long, value_enum, default_value_t = SpeciesArg::Fox)]
        species: SpeciesArg,
    },
    /// List all pets
    List,
    /// Make another pet the active one
    Select { id: String },
    /// Show the active pet
    Status,
    Feed,
    Play,
    /// Put the pet to bed, or wake it up
    Sleep,
    Clean,
    /// Switch the radio on or off
    Radio,
    /// Remove a pet for good
    Delete { id: String },
    /// Interactive mode: the pet lives in real time
    Watch,
    /// End-of-life summary for the active pet
    Obituary,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SpeciesArg {
    Fox,
    Axolotl,
}

impl From<SpeciesArg> for Species {
    fn from(s: SpeciesArg) -> Self {
        match s {
            SpeciesArg::Fox => Species::Fox,
            SpeciesArg::Axolotl => Species::Axolotl,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("DIGIPET_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let paths = project_paths(cli.data_dir.as_deref())?;
    let mut settings = load_settings(&paths.settings_path);
    if let Some(speed) = cli.speed {
        if !(speed.is_finite() && speed > 0.0) {
            bail!("--speed must be a positive number of seconds");
        }
        settings.rules.real_seconds_per_game_minute = speed;
    }
    if cli.save_settings {
        save_settings_atomic(&paths.settings_path, &settings)?;
    }
    let rules = settings.rules.clone();

    let mut session = load_or_init_session(&paths.save_path)?;
    let now = chrono::Utc::now();
    if let Some(summary) = session.tick(now, &rules) {
        if summary.has_anything() && !matches!(cli.command, Cmd::Watch) {
            for line in recap_lines(&summary) {
                println!("{line}");
            }
            println!();
        }
    }

    match cli.command {
        Cmd::New { name, species } => {
            let name = name.trim();
            if name.is_empty() {
                bail!("a pet needs a name");
            }
            let id = session.create_pet(name, species.into(), now);
            println!("Welcome, {name}! ({id})");
        }
        Cmd::List => print_list(&session),
        Cmd::Select { id } => {
            let id = session.resolve(&id)?;
            session.select(id)?;
            // the newly active pet catches up on everything it missed
            if let Some(summary) = session.tick(now, &rules) {
                recap_lines(&summary).iter().for_each(|l| println!("{l}"));
            }
            print_status(&session, &rules);
        }
        Cmd::Status => print_status(&session, &rules),
        Cmd::Feed => act(&mut session, PetAction::Feed, &rules),
        Cmd::Play => act(&mut session, PetAction::Play, &rules),
        Cmd::Sleep => act(&mut session, PetAction::Sleep, &rules),
        Cmd::Clean => act(&mut session, PetAction::Clean, &rules),
        Cmd::Radio => act(&mut session, PetAction::ToggleRadio, &rules),
        Cmd::Delete { id } => {
            let id = session.resolve(&id)?;
            let pet = session.delete(id).context("pet vanished while deleting")?;
            println!("Said goodbye to {}.", pet.name);
        }
        Cmd::Watch => {
            session = App::new(settings, session, paths.clone()).run()?;
        }
        Cmd::Obituary => match session.active_pet() {
            None => println!("No pet selected."),
            Some(pet) => match Obituary::for_pet(pet) {
                Some(card) => println!("{card}"),
                None => println!("{} is still alive.", pet.name),
            },
        },
    }

    save_atomic(&paths.save_path, &session)?;
    Ok(())
}

fn act(session: &mut Session, action: PetAction, rules: &digipet::Rules) {
    match session.act(action, rules) {
        Outcome::Applied => print_status(session, rules),
        Outcome::Ignored => println!("Nothing happened; your pet can't {} right now.", action.label()),
        Outcome::NoActivePet => println!("No pet selected. Try `digipet new <name>`."),
    }
}

fn print_status(session: &Session, rules: &digipet::Rules) {
    match session.active_pet() {
        None => println!("No pet selected. Try `digipet new <name>`."),
        Some(pet) if pet.is_dead() => {
            if let Some(card) = Obituary::for_pet(pet) {
                println!("{card}");
            }
        }
        Some(pet) => status_lines(pet, rules).iter().for_each(|l| println!("{l}")),
    }
}

fn print_list(session: &Session) {
    if session.pets.is_empty() {
        println!("No pets yet.");
        return;
    }
    for (id, pet) in &session.pets {
        let marker = if session.active == Some(*id) { "*" } else { " " };
        let full = id.to_string();
        let short = &full[..8];
        let state = if pet.is_dead() { "dead" } else { pet.status.label() };
        println!(
            "{marker} {short}  {:<12} {:<8} age {:>2}  {}",
            pet.name,
            pet.species.label(),
            pet.age,
            state
        );
    }
}
