//! Interactive game loop and turn bookkeeping. The loop owns whose turn it
//! is and the half-move counter; the rules engine only ever receives an
//! explicit side per command.

use std::io::{self, BufRead, Write};

use chrono::prelude::*;
use itertools::Itertools;

use crate::board::Board;
use crate::render::render;
use crate::setup::SetupFile;
use crate::types::{RulesError, Side};

pub const DEFAULT_MOVES_LIMIT: u32 = 400;

const ILLEGAL_MOVE_MESSAGE: &str = "Illegal move! Please enter again.";
const SELF_CHECK_MESSAGE: &str = "This move will cause yourself in check! Please enter again.";

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TurnOutcome {
    Continue,
    /// The side that just moved checkmated its opponent.
    Checkmate,
    /// The half-move limit was reached without a checkmate.
    Tie,
}

pub struct ChessGame {
    board: Board,
    moves_count: u32,
    current_side: Side,
    moves_limit: u32,
    started_at: DateTime<Local>,
}

impl ChessGame {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            moves_count: 0,
            current_side: Side::Undecided,
            moves_limit: DEFAULT_MOVES_LIMIT,
            started_at: Local::now(),
        }
    }

    pub fn from_setup(setup: &SetupFile) -> Result<Self, RulesError> {
        let mut game = Self::new();
        game.board.setup(
            &setup.placements,
            &setup.white_captures,
            &setup.black_captures,
        )?;
        Ok(game)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_side(&self) -> Side {
        self.current_side
    }

    pub fn set_moves_limit(&mut self, limit: u32) {
        self.moves_limit = limit;
    }

    /// Hand the turn to the next side. Undecided hands off to White so the
    /// first advance of a fresh game starts the white player.
    pub fn advance_turn(&mut self) {
        self.moves_count += 1;
        self.flip_side();
    }

    /// Undo a turn advance after a recoverable failure so the same side
    /// replays on the next advance.
    fn rewind_turn(&mut self) {
        self.moves_count -= 1;
        self.flip_side();
    }

    fn flip_side(&mut self) {
        self.current_side = match self.current_side {
            Side::Undecided | Side::Black => Side::White,
            Side::White => Side::Black,
        };
    }

    pub fn is_tie(&self) -> bool {
        self.moves_count >= self.moves_limit
    }

    /// Execute one command for the side whose turn it is. Recoverable
    /// failures rewind the turn counter before surfacing, so the caller
    /// simply advances again and the same side retries.
    pub fn play_turn(&mut self, command: &str) -> Result<TurnOutcome, RulesError> {
        match self.board.execute(command, self.current_side) {
            Ok(true) => Ok(TurnOutcome::Checkmate),
            Ok(false) if self.is_tie() => Ok(TurnOutcome::Tie),
            Ok(false) => Ok(TurnOutcome::Continue),
            Err(err) => {
                if err.is_recoverable() {
                    self.rewind_turn();
                }
                Err(err)
            }
        }
    }

    /// Drive the read-eval loop until checkmate, tie, or end of input.
    pub fn run<R: BufRead>(&mut self, mut input: R) -> Result<(), RulesError> {
        println!(
            "Game started at {}",
            self.started_at.format("%Y-%m-%d %H:%M:%S")
        );
        println!("{}", render(&self.board));

        loop {
            self.advance_turn();
            self.print_check_banner()?;

            print!("{}> ", side_name(self.current_side));
            let _ = io::stdout().flush();

            let mut line = String::new();
            match input.read_line(&mut line) {
                Ok(0) | Err(_) => return Ok(()),
                Ok(_) => {}
            }
            let command = line.trim().to_string();

            match self.play_turn(&command) {
                Ok(TurnOutcome::Continue) => self.print_action(&command),
                Ok(TurnOutcome::Checkmate) => {
                    self.print_action(&command);
                    println!();
                    println!("{} player wins.  Checkmate", side_name(self.current_side));
                    return Ok(());
                }
                Ok(TurnOutcome::Tie) => {
                    self.print_action(&command);
                    println!("Tie game.  Too many moves.");
                    return Ok(());
                }
                Err(RulesError::SelfCheck) => println!("{SELF_CHECK_MESSAGE}"),
                Err(err) if err.is_recoverable() => println!("{ILLEGAL_MOVE_MESSAGE}"),
                Err(fatal) => return Err(fatal),
            }
        }
    }

    fn print_action(&self, command: &str) {
        println!(
            "{} player action: {}",
            side_name(self.current_side),
            command
        );
        println!("{}", render(&self.board));
    }

    /// Announce the check and the legal responses before prompting, as the
    /// original loop does.
    fn print_check_banner(&mut self) -> Result<(), RulesError> {
        if !self.board.is_in_check(self.current_side)? {
            return Ok(());
        }
        println!("{} is in check", side_name(self.current_side));
        println!("Available moves:");
        let available = self
            .board
            .legal_responses_while_in_check(self.current_side)?;
        println!("{}", available.iter().join("\n"));
        println!();
        Ok(())
    }
}

impl Default for ChessGame {
    fn default() -> Self {
        ChessGame::new()
    }
}

fn side_name(side: Side) -> &'static str {
    match side {
        Side::White => "WHITE Player",
        Side::Black => "BLACK Player",
        Side::Undecided => "Unknown Player",
    }
}
