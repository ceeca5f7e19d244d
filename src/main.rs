use minigame_levels::config::PlayConfig;
use minigame_levels::error::AppError;
use minigame_levels::{games, logging, screens};
use std::env;

fn main()
{
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError>
{
    let mut args = env::args().skip(1);
    let command = args.next();
    let rest: Vec<String> = args.collect();
    match command.as_deref() {
        None => interactive_menu(),
        Some("list") => {
            list_games();
            Ok(())
        }
        Some("levels") => run_game("levels", &rest),
        Some("roll") => run_game("roll", &rest),
        Some("-h") | Some("--help") => {
            print_help();
            Ok(())
        }
        Some(other) => Err(AppError::usage(format!(
            "Unknown command '{other}'. Run with --help."
        ))),
    }
}

fn run_game(name: &str, args: &[String]) -> Result<(), AppError>
{
    let config = PlayConfig::from_args(args)?;
    logging::init_tracing();
    match name {
        "levels" => screens::play::run(&config),
        "roll" => screens::roll::run(&config),
        _ => Err(AppError::usage(format!(
            "Unknown game '{name}'. Run with --help."
        ))),
    }
}

fn interactive_menu() -> Result<(), AppError>
{
    let registry = games::registry();
    println!("Mini Levels");
    println!();
    println!("Select a game:");
    for (idx, game) in registry.iter().enumerate() {
        println!("  {}. {} - {}", idx + 1, game.name, game.description);
    }
    println!();
    print!("Enter number or name (default 1, q to quit): ");
    std::io::Write::flush(&mut std::io::stdout())?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let choice = input.trim();

    if choice.is_empty() {
        return run_game(registry[0].name, &[]);
    }
    if choice.eq_ignore_ascii_case("q") {
        return Ok(());
    }
    if let Ok(index) = choice.parse::<usize>() {
        if index >= 1 && index <= registry.len() {
            return run_game(registry[index - 1].name, &[]);
        }
    }

    for game in registry {
        if game.name.eq_ignore_ascii_case(choice) {
            return run_game(game.name, &[]);
        }
    }

    Err(AppError::usage("Invalid selection."))
}

fn list_games()
{
    println!("Available games:");
    for game in games::registry() {
        println!("  {:<10} - {}", game.name, game.description);
    }
}

fn print_help()
{
    println!("minigame-levels");
    println!("\nUsage:");
    println!("  minigame-levels list");
    println!("  minigame-levels levels [--seed=N] [--no-mouse]");
    println!("  minigame-levels roll [--seed=N]");
    println!("\nNotes:");
    println!("  Logs go to $MINIGAME_LEVELS_LOG (default: minigame-levels.log in the temp dir).");
    println!("  Set RUST_LOG to change the log filter.");
}
