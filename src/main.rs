use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use checkers_engine::{Cell, Color, Command, GameService, MatchInterface, MatchState};
use clap::Parser;
use crossterm::style::Stylize;

const HELP: &str = "\
Enter move: <square> <l|r> [b]   e.g.  a3 r   or   d4 l b (king only)
l and r mean the lower and higher file, in the direction the piece moves.
Other commands: undo, end, restart, help, quit";

/// Two-player checkers in the terminal.
#[derive(Parser, Debug)]
#[command(name = "checkers", version, about)]
struct Args {
    /// Print the board without ANSI colors
    #[arg(long)]
    no_color: bool,
}

fn render(game: &GameService, colored: bool) -> String {
    if !colored {
        return game.board().to_string();
    }
    let cells = game.current_board();
    let separator = format!("   +{}\n", "---+".repeat(8));
    let mut out = String::new();
    for (index, row) in cells.iter().enumerate().rev() {
        out.push_str(&separator);
        out.push_str(&format!("{:2} |", index + 1));
        for cell in row {
            let text = match cell {
                Cell::Empty => " ".to_string(),
                Cell::Figure(figure) => {
                    let styled = match figure.color {
                        Color::White => figure.symbol().white().bold(),
                        Color::Black => figure.symbol().red().bold(),
                    };
                    if figure.forced {
                        styled.on_dark_yellow().to_string()
                    } else {
                        styled.to_string()
                    }
                }
            };
            out.push_str(&format!(" {text} |"));
        }
        match index {
            7 => out.push_str(&format!("  Black captured: {}", game.captures(Color::Black))),
            0 => out.push_str(&format!("  White captured: {}", game.captures(Color::White))),
            _ => (),
        }
        out.push('\n');
    }
    out.push_str(&separator);
    out.push_str("     a   b   c   d   e   f   g   h\n");
    out
}

fn prompt<M: MatchInterface>(game: &M) -> String {
    match game.state() {
        MatchState::Active => format!("{}'s turn.", game.current_player()),
        MatchState::ChainInProgress(square) => format!(
            "{}'s turn. Continue the capture with the piece on {square}.",
            game.current_player()
        ),
        MatchState::Over(outcome) => format!("Game over. {outcome} Type 'restart' or 'quit'."),
    }
}

fn run(game: &mut GameService, colored: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    println!("{}", render(game, colored));
    loop {
        println!("{}", prompt(game));
        print!("> ");
        stdout.flush().context("failed to flush stdout")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("failed to read input")? == 0 {
            break;
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "" => println!("Invalid input. Type 'help' for the command list."),
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "undo" => {
                if game.undo() {
                    println!("{}", render(game, colored));
                } else {
                    println!("Nothing to undo.");
                }
            }
            "end" => {
                game.end_game();
                println!("{}", game.result_text());
            }
            "restart" => {
                game.restart_game();
                println!("{}", render(game, colored));
            }
            input => match input
                .parse::<Command>()
                .and_then(|command| game.execute_command(command))
            {
                Ok(()) => println!("{}", render(game, colored)),
                Err(err) => println!("Error: {err}"),
            },
        }
    }
    println!("{}", game.result_text());
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let args = Args::parse();
    let mut game = GameService::new();
    println!("{HELP}");
    run(&mut game, !args.no_color)
}
