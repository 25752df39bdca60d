// src/bingo_client.rs
// Entry point of the bingo card client: loads the word lists named on the
// command line and opens the interactive card.
//
// CLI:
// - bingo-card <file> [cap] <file> [cap] ...
// - --seed <n>: seed of the first board
// - --color <#RRGGBB>: color of marked cells
// - --config <path>: configuration file (default conf/bingo.conf)
// - --print / --json: write the board to stdout and exit

use std::error::Error;
use std::path::PathBuf;
use clap::Parser;

use bingo_card::config::{CardConfig, DEFAULT_CONFIG_PATH};
use bingo_card::error::BingoError;
use bingo_card::logging::{init_log_file, log_error, log_info, log_warning};
use bingo_card::session::BingoSession;
use bingo_card::theme::Theme;
use bingo_card::{terminal, wordlist};

#[derive(Parser)]
#[command(name = env!("CARGO_BIN_NAME"))]
#[command(about = "Bingo Card - Generate a bingo card from word lists")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Word list files, each optionally followed by the maximum number of entries to draw from it
    #[arg(allow_negative_numbers = true)]
    lists: Vec<String>,

    /// Seed of the first board
    #[arg(long, allow_negative_numbers = true)]
    seed: Option<i32>,

    /// Color of marked cells (#RRGGBB)
    #[arg(long)]
    color: Option<String>,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Print the board as text and exit
    #[arg(long)]
    print: bool,

    /// Print the board as JSON and exit
    #[arg(long, conflicts_with = "print")]
    json: bool,
}

fn initial_theme(color: &str) -> Theme {
    match Theme::from_hex(color) {
        Ok(theme) => theme,
        Err(e) => {
            log_warning(&format!("{e}. Using default color."));
            Theme::default()
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let config = CardConfig::load_from(&args.config);
    if let Some(log_file) = &config.log_file {
        init_log_file(log_file)?;
    }

    let lists = wordlist::load_lists(&args.lists)?;
    let theme = initial_theme(args.color.as_deref().unwrap_or(&config.color));
    let mut session = BingoSession::new(lists, theme, args.seed.or(config.seed))?;

    if args.print {
        print!("{}", terminal::render_plain(session.board()));
        println!("seed {}", session.seed());
        return Ok(());
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&session.export())?);
        return Ok(());
    }

    terminal::run(&mut session)?;
    log_info("Bingo card closed");
    Ok(())
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        match e.downcast_ref::<BingoError>() {
            Some(BingoError::Usage(usage)) => println!("{usage}"),
            _ => log_error(&e.to_string()),
        }
        std::process::exit(1);
    }
}
