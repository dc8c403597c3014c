//! Line-oriented terminal play.
//!
//! The same loop drives either an in-process game or a remote server.

use crate::client::RestGameClient;
use crate::games::sticks::{
    Actor, GameState, StateView, WinCondition, apply_computer_move, play_round,
};
use crate::server::{MoveRequest, RoundView};
use anyhow::Result;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, instrument};

const HELP: &str = "\
Commands:
  <row> <start> <count>   take <count> adjacent sticks from <row>
  <row>:<i> <row>:<i> ... take the picked sticks (one row, adjacent)
  pass                    let the computer move (e.g. to open the game)
  new                     start a new game
  help                    show this message
  quit                    leave";

/// Something a terminal session can play against.
#[async_trait::async_trait]
pub trait Table: Send {
    /// Starts a new game.
    async fn new_game(&mut self) -> Result<StateView>;

    /// Plays a human move and the opponent's reply.
    async fn round(&mut self, request: MoveRequest) -> Result<RoundView>;

    /// Lets the opponent move on its own.
    async fn computer_move(&mut self) -> Result<StateView>;
}

/// In-process table with no server.
#[derive(Debug, Clone)]
pub struct LocalTable {
    state: GameState,
    ladder: Vec<usize>,
    win_condition: WinCondition,
}

impl LocalTable {
    /// Creates a local table for the given rules.
    #[instrument]
    pub fn new(ladder: Vec<usize>, win_condition: WinCondition) -> Self {
        Self {
            state: GameState::new(&ladder),
            ladder,
            win_condition,
        }
    }
}

#[async_trait::async_trait]
impl Table for LocalTable {
    async fn new_game(&mut self) -> Result<StateView> {
        self.state = GameState::new(&self.ladder);
        Ok(StateView::new(&self.state, self.win_condition))
    }

    async fn round(&mut self, request: MoveRequest) -> Result<RoundView> {
        let mv = request.into_move()?;
        let outcome = play_round(&self.state, mv)?;
        self.state = outcome.state;
        Ok(RoundView {
            state: StateView::new(&self.state, self.win_condition),
            human: outcome.human,
            computer: outcome.computer,
        })
    }

    async fn computer_move(&mut self) -> Result<StateView> {
        self.state = apply_computer_move(&self.state)?;
        Ok(StateView::new(&self.state, self.win_condition))
    }
}

#[async_trait::async_trait]
impl Table for RestGameClient {
    async fn new_game(&mut self) -> Result<StateView> {
        Ok(RestGameClient::new_game(self, None).await?)
    }

    async fn round(&mut self, request: MoveRequest) -> Result<RoundView> {
        Ok(RestGameClient::round(self, &request).await?)
    }

    async fn computer_move(&mut self) -> Result<StateView> {
        Ok(RestGameClient::computer_move(self).await?)
    }
}

/// A parsed line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a move.
    Take(MoveRequest),
    /// Let the computer move.
    Pass,
    /// Start over.
    New,
    /// Print usage.
    Help,
    /// Leave.
    Quit,
}

/// Parses one line of player input.
#[instrument]
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    match line.to_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        "n" | "new" => return Ok(Command::New),
        "c" | "pass" => return Ok(Command::Pass),
        "h" | "help" | "?" | "" => return Ok(Command::Help),
        _ => {}
    }

    if line.contains(':') {
        let picks = line
            .split_whitespace()
            .map(|pick| -> Result<(usize, usize), String> {
                let (row, index) = pick
                    .split_once(':')
                    .ok_or_else(|| format!("Expected <row>:<index>, got '{}'", pick))?;
                let row = row.parse().map_err(|_| format!("Bad row in '{}'", pick))?;
                let index = index.parse().map_err(|_| format!("Bad index in '{}'", pick))?;
                Ok((row, index))
            })
            .collect::<Result<Vec<_>, String>>()?;
        return Ok(Command::Take(MoveRequest::Selection { picks }));
    }

    let numbers = line
        .split_whitespace()
        .map(|n| n.parse::<usize>().map_err(|_| format!("Not a number: '{}'", n)))
        .collect::<Result<Vec<_>, String>>()?;

    match numbers.as_slice() {
        &[row, start, count] => Ok(Command::Take(MoveRequest::Range { row, start, count })),
        _ => Err("Expected three numbers: <row> <start> <count>".to_string()),
    }
}

fn print_view(view: &StateView) {
    println!("\n{}\n", view.display());
    println!("sticks left: {}   xor: {}", view.remaining, view.xor_total);

    if view.finished {
        match view.winner {
            Some(Actor::Human) => println!("Game over - you win!"),
            Some(Actor::Computer) => println!("Game over - the computer wins."),
            None => println!("Game over."),
        }
        println!("Type 'new' to play again.");
    }
}

/// Runs the interactive loop on stdin/stdout until the player quits.
#[instrument(skip(table))]
pub async fn run<T: Table>(table: &mut T) -> Result<()> {
    info!("Starting terminal game");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_view(&table.new_game().await?);
    println!("{}", HELP);

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{}", HELP),
            Ok(Command::New) => print_view(&table.new_game().await?),
            Ok(Command::Pass) => match table.computer_move().await {
                Ok(view) => print_view(&view),
                Err(e) => println!("Rejected: {}", e),
            },
            Ok(Command::Take(request)) => match table.round(request).await {
                Ok(round) => {
                    debug!(human = %round.human, computer = ?round.computer, "Round played");
                    if let Some(reply) = round.computer {
                        println!("Computer took {}", reply);
                    }
                    print_view(&round.state);
                }
                Err(e) => println!("Rejected: {}", e),
            },
            Err(e) => println!("{}", e),
        }
    }

    info!("Terminal game ended");
    Ok(())
}
