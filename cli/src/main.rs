use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use keyflip_core::{
    BoardConfig, CellCount, CellIndex, GameSession, Phase, RandomSetupGenerator, SessionView,
    SetupGenerator, coords_to_index,
};
use tracing_subscriber::EnvFilter;

/// The almost impossible chessboard puzzle, at the terminal.
///
/// Player 1 sees the coins and the key square and must flip exactly one
/// coin. Player 2 then sees only the coins and has to name the key square.
#[derive(Debug, Parser)]
#[command(name = "keyflip", version, about)]
struct Cli {
    /// Seed for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    /// Board side length (a power of two up to 16)
    #[arg(long, default_value_t = BoardConfig::classic().side, value_parser = parse_side)]
    side: u8,

    #[command(flatten)]
    verbosity: clap_verbosity_flag::Verbosity,
}

fn parse_side(raw: &str) -> std::result::Result<u8, String> {
    let side: u8 = raw.parse().map_err(|_| "expected a number".to_string())?;
    BoardConfig::new(side)
        .map(|config| config.side)
        .map_err(|err| err.to_string())
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Command {
    Select(CellIndex),
    Confirm,
    Solve,
    Restart,
    Help,
    Quit,
}

/// Parses one input line; squares are numbered from 1 on screen.
fn parse_command(line: &str, cells: CellCount) -> Option<Command> {
    match line.trim().to_ascii_lowercase().as_str() {
        "" => None,
        "c" | "confirm" | "start" => Some(Command::Confirm),
        "s" | "solve" => Some(Command::Solve),
        "r" | "restart" => Some(Command::Restart),
        "h" | "help" | "?" => Some(Command::Help),
        "q" | "quit" | "exit" => Some(Command::Quit),
        number => match number.parse::<CellCount>() {
            Ok(square) if (1..=cells).contains(&square) => {
                Some(Command::Select((square - 1) as CellIndex))
            }
            _ => None,
        },
    }
}

fn square_label(index: CellIndex) -> String {
    format!("{}", index as CellCount + 1)
}

fn print_banner(view: &SessionView) {
    match view.phase {
        Phase::Intro => {
            println!("{}", "The Almost Impossible Chess Board Puzzle".bold());
            println!();
            println!("Two prisoners can win their freedom if they can locate a hidden key.");
            println!(
                "{} enters the room, sees the coins and the key's square, and must flip exactly one coin.",
                "Player 1".bold()
            );
            println!(
                "{} enters after. They only see the coins. They must point to the secret square.",
                "Player 2".bold()
            );
            println!();
            println!("Type {} to begin.", "start".bold());
        }
        Phase::Encode => {
            println!("{}", "Player 1's turn".bold());
            if let Some(key) = view.key {
                println!(
                    "The key is hidden under square {}.",
                    square_label(key).yellow().bold()
                );
            }
            println!("Choose one square to flip (it turns blue), then confirm.");
        }
        Phase::Decode => {
            println!("{}", "Player 2's turn".bold());
            println!("The key's location is secret. Name the square and confirm.");
        }
        Phase::Result => match (view.guess, view.key) {
            (Some(guess), Some(key)) if guess == key => {
                println!("{}", "Victory!".green().bold());
                println!(
                    "Player 2 found the key under square {} in {}s.",
                    square_label(key).yellow().bold(),
                    view.elapsed_secs
                );
            }
            (Some(guess), Some(key)) => {
                println!("{}", "Game over".red().bold());
                println!(
                    "Square {} was named, but the key sat under square {}.",
                    square_label(guess).bold(),
                    square_label(key).yellow().bold()
                );
            }
            _ => {}
        },
    }
}

fn print_board(view: &SessionView) {
    let side = view.side;

    print!("    ");
    for x in 0..side {
        print!("{:^3}", x + 1);
    }
    println!();

    for y in 0..side {
        let row_label = (y as CellCount) * (side as CellCount) + 1;
        print!("{row_label:>3} ");
        for x in 0..side {
            let index = coords_to_index((x, y), side);
            let glyph = format!(" {} ", view.coin_at(index).glyph());
            let square = if view.selection == Some(index) {
                glyph.white().on_blue()
            } else if view.phase.is_final() && view.key == Some(index) {
                glyph.black().on_yellow()
            } else if (x + y) % 2 == 1 {
                glyph.white().on_green()
            } else {
                glyph.black().on_bright_white()
            };
            print!("{square}");
        }
        println!();
    }
}

fn print_help(cells: CellCount) {
    println!("Commands:");
    println!("  1-{cells}      select a square");
    println!("  confirm   lock in the selection and hand the board over");
    println!("  solve     let the parity oracle pick for the current player");
    println!("  restart   throw the game away and deal a fresh board");
    println!("  quit      leave the table");
}

fn init_logging(cli: &Cli) {
    let fallback = cli.verbosity.log_level_filter().to_string().to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> Result<()> {
    use rand::prelude::*;

    let cli = Cli::parse();
    init_logging(&cli);

    let config = BoardConfig::new(cli.side)?;
    let master_seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    log::debug!("Master seed {}", master_seed);
    let mut seeds = SmallRng::seed_from_u64(master_seed);

    let mut session =
        GameSession::new(RandomSetupGenerator::new(seeds.random()).generate(config));

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        let view = SessionView::from_session(&session);
        println!();
        print_banner(&view);
        if !view.phase.is_initial() {
            println!();
            print_board(&view);
        }

        print!("> ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else { break };
        let Some(command) = parse_command(&line?, view.cell_count()) else {
            println!("Unrecognized input, type {} for the commands.", "help".bold());
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Help => print_help(view.cell_count()),
            Command::Restart => {
                session.restart(RandomSetupGenerator::new(seeds.random()).generate(config));
            }
            Command::Select(index) => {
                if let Err(err) = session.select_cell(index) {
                    println!("{err}");
                }
            }
            Command::Confirm => match session.confirm_phase() {
                Ok(outcome) if !outcome.has_update() => println!("Pick a square first."),
                Ok(_) => {}
                Err(err) => println!("{err}"),
            },
            Command::Solve => {
                let suggestion = match session.phase() {
                    Phase::Encode => session.solve_flip(),
                    Phase::Decode => session.solve_guess(),
                    _ => None,
                };
                match suggestion {
                    Some(index) => {
                        println!("Square {} it is.", square_label(index).bold());
                        session.select_cell(index)?;
                    }
                    None => println!("Nothing to solve in this phase."),
                }
            }
        }
    }

    Ok(())
}
