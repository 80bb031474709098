use anyhow::Result;
use clap::Parser;
use pleco::{BitMove, Board, Player};
use ponderbot::board::find_move_uci;
use ponderbot::book::Book;
use ponderbot::search::alphabeta::Searcher;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play chess against the alpha-beta engine", long_about = None)]
struct Args {
    /// Search depth in plies below each root move
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Your color: 'w' for white, 'b' for black
    #[arg(long, default_value = "w")]
    color: String,

    /// Starting FEN position
    #[arg(long)]
    fen: Option<String>,

    /// Path to a JSON opening book
    #[arg(long)]
    book: Option<PathBuf>,

    /// Play without any opening book
    #[arg(long)]
    no_book: bool,

    /// Print search statistics
    #[arg(long)]
    verbose: bool,
}

fn parse_color(color_str: &str) -> Result<Player> {
    match color_str.to_lowercase().as_str() {
        "w" | "white" => Ok(Player::White),
        "b" | "black" => Ok(Player::Black),
        _ => anyhow::bail!("Invalid color: use 'w' or 'b'"),
    }
}

fn player_name(p: Player) -> &'static str {
    if p == Player::White { "White" } else { "Black" }
}

fn get_human_move(board: &Board) -> Result<BitMove> {
    loop {
        print!("Enter your move (e.g., e2e4): ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        match find_move_uci(board, input) {
            Some(mv) => return Ok(mv),
            None => println!("Illegal move! Use UCI format like 'e2e4'"),
        }
    }
}

fn load_book(args: &Args) -> Option<Book> {
    if args.no_book {
        return None;
    }
    match &args.book {
        Some(path) => match Book::from_path(path) {
            Ok(book) => Some(book),
            Err(e) => {
                // A missing or unreadable book means "no recommendation";
                // every move then comes from search.
                log::warn!("{e}; playing without a book");
                None
            }
        },
        None => Some(Book::builtin()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let human_color = parse_color(&args.color)?;

    let mut board = match &args.fen {
        Some(fen) => Board::from_fen(fen).map_err(|e| anyhow::anyhow!("Invalid FEN string: {e:?}"))?,
        None => Board::start_pos(),
    };

    let mut searcher = Searcher::with_depth(args.depth);
    if let Some(book) = load_book(&args) {
        searcher.set_book(book);
    }

    // Main game loop
    loop {
        println!("\n{}", board.pretty_string());

        if board.checkmate() {
            println!("Checkmate! {} wins!", player_name(board.turn().other_player()));
            break;
        }
        if board.stalemate() {
            println!("Game is a stalemate!");
            break;
        }

        println!("{}'s turn", player_name(board.turn()));

        if board.turn() == human_color {
            let mv = get_human_move(&board)?;
            board.apply_move(mv);
        } else {
            let start_time = Instant::now();
            let mv = searcher.select_move(&mut board);
            let elapsed = start_time.elapsed();

            if args.verbose {
                println!(
                    "Searched {} nodes in {:.2}s",
                    searcher.nodes(),
                    elapsed.as_secs_f32()
                );
            }
            println!("Computer plays: {}", mv);
            board.apply_move(mv);
        }
    }

    Ok(())
}
