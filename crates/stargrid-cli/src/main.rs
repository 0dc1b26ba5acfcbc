use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use stargrid_core::{codec, Board, Generator, SolveOutcome, Solver};
use std::fs;
use std::path::PathBuf;
use std::process;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => execute_generate(args),
        Command::Solve(args) => execute_solve(args),
        Command::Count(args) => execute_count(args),
    }
}

fn execute_generate(args: GenerateArgs) -> Result<()> {
    check_size(args.size)?;
    let mut generator = match args.seed {
        Some(seed) => Generator::with_seed(seed),
        None => Generator::new(),
    };

    for idx in 0..args.count {
        let puzzle = generator.generate(args.size)?;
        if args.json {
            println!("{}", serde_json::to_string(&puzzle.board.color_map())?);
        } else {
            if args.count > 1 {
                println!("Puzzle {}:", idx + 1);
            }
            print!("{}", puzzle.board);
            println!(
                "difficulty {}, accepted after {} attempt(s)",
                puzzle.difficulty, puzzle.attempts
            );
            if args.packed {
                println!(
                    "packed: {}",
                    hex_string(&codec::encode_color_map(&puzzle.board.color_map()))
                );
            }
        }
    }
    Ok(())
}

fn execute_solve(args: BoardArgs) -> Result<()> {
    let board = load_board(&args.file)?;
    match Solver::new().solve(&board) {
        SolveOutcome::Solved { difficulty } => {
            println!("Solved: unique solution, difficulty {difficulty}")
        }
        SolveOutcome::Contradiction => println!("Contradiction: the board has no solution"),
        SolveOutcome::Exhausted => {
            println!("Exhausted: the rule set could not reach a verdict")
        }
    }
    Ok(())
}

fn execute_count(args: BoardArgs) -> Result<()> {
    let board = load_board(&args.file)?;
    let solutions = Solver::new().solutions(&board);
    println!("{} solution(s)", solutions.len());
    for (idx, solution) in solutions.iter().enumerate() {
        println!("Solution {}:", idx + 1);
        print!("{solution}");
    }
    Ok(())
}

/// Boards travel as JSON 2D color maps, the same shape the engine's storage
/// adapters decode to.
fn load_board(path: &PathBuf) -> Result<Board> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let colors: Vec<Vec<u8>> =
        serde_json::from_str(&text).context("board file must be a JSON 2D color map")?;
    let size = colors.len();
    check_size(size)?;
    if colors.iter().any(|row| row.len() != size) {
        bail!("color map must be square");
    }
    Ok(Board::from_color_map(&colors))
}

fn check_size(size: usize) -> Result<()> {
    if !(4..=10).contains(&size) {
        bail!("board size must be between 4 and 10");
    }
    Ok(())
}

fn hex_string(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[derive(Parser)]
#[command(name = "stargrid", version, about = "Region-coloring star puzzle tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate puzzles with a proven-unique solution
    Generate(GenerateArgs),
    /// Run the deductive solver on a board and report the verdict
    Solve(BoardArgs),
    /// Exhaustively count a board's solutions
    Count(BoardArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Board side length (4-10)
    #[arg(short, long, default_value_t = 8)]
    size: usize,

    /// Seed for reproducible generation
    #[arg(long)]
    seed: Option<u64>,

    /// Number of puzzles to generate
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Emit each board as a JSON color map instead of a grid
    #[arg(long)]
    json: bool,

    /// Also print the nibble-packed storage encoding
    #[arg(long)]
    packed: bool,
}

#[derive(Args)]
struct BoardArgs {
    /// Path to a JSON 2D color map
    file: PathBuf,
}
