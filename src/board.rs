//! Board state, check detection, move validation and execution.
//!
//! The board owns an 8x8 grid of squares, each holding at most one piece,
//! plus one append-only capture list per side. All rule enforcement funnels
//! through `execute`: parse the command, validate it (geometry, then the
//! self-check simulation, then the in-check response set), apply it, and
//! report whether the opponent is now checkmated.

use crate::movegen::reachable_squares;
use crate::types::{Move, Piece, PieceKind, Position, RulesError, Side, BOARD_SIZE};

/// One cell of the grid. Lives for the whole game; only its occupant
/// changes.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Square {
    pub row: usize,
    pub col: usize,
    pub piece: Option<Piece>,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Board {
    squares: [[Square; BOARD_SIZE]; BOARD_SIZE],
    white_captures: Vec<String>,
    black_captures: Vec<String>,
}

impl Board {
    pub fn new() -> Board {
        let squares =
            std::array::from_fn(|row| std::array::from_fn(|col| Square { row, col, piece: None }));
        Board {
            squares,
            white_captures: Vec::new(),
            black_captures: Vec::new(),
        }
    }

    /// The square named by a coordinate string, None if it decodes outside
    /// the grid.
    pub fn square_at(&self, coordinate: &str) -> Option<&Square> {
        Position::from_coordinate(coordinate).map(|pos| &self.squares[pos.row][pos.col])
    }

    pub fn piece_at(&self, pos: Position) -> Option<&Piece> {
        self.squares[pos.row][pos.col].piece.as_ref()
    }

    /// Signs of the opponent pieces this side has captured, in capture
    /// order.
    pub fn captures(&self, side: Side) -> &[String] {
        match side {
            Side::Black => &self.black_captures,
            _ => &self.white_captures,
        }
    }

    fn captures_mut(&mut self, side: Side) -> &mut Vec<String> {
        match side {
            Side::Black => &mut self.black_captures,
            _ => &mut self.white_captures,
        }
    }

    /// Place pieces from (sign, coordinate) entries and seed the capture
    /// lists. Setup data is trusted; any inconsistency is fatal.
    pub fn setup(
        &mut self,
        placements: &[(char, String)],
        white_captures: &[String],
        black_captures: &[String],
    ) -> Result<(), RulesError> {
        for (sign, coordinate) in placements {
            let pos = Position::from_coordinate(coordinate).ok_or_else(|| {
                RulesError::SetupConflict(format!("position {coordinate:?} is off the board"))
            })?;
            let piece = Piece::from_sign(*sign, pos).ok_or_else(|| {
                RulesError::SetupConflict(format!("unknown piece sign {sign:?}"))
            })?;
            let square = &mut self.squares[pos.row][pos.col];
            if square.piece.is_some() {
                return Err(RulesError::SetupConflict(format!(
                    "square {coordinate} is already occupied"
                )));
            }
            square.piece = Some(piece);
        }
        self.white_captures = white_captures.to_vec();
        self.black_captures = black_captures.to_vec();
        Ok(())
    }

    /// All pieces of one side in row-major board order. Copies; the grid
    /// stays the single source of truth.
    pub fn side_pieces(&self, side: Side) -> Vec<Piece> {
        self.squares
            .iter()
            .flatten()
            .filter_map(|sq| sq.piece)
            .filter(|p| p.side == side)
            .collect()
    }

    fn find_king(&self, side: Side) -> Result<Piece, RulesError> {
        self.side_pieces(side)
            .into_iter()
            .find(|p| p.kind == PieceKind::King)
            .ok_or(RulesError::KingMissing(side))
    }

    /// True when the side's king square is reachable by some opposing
    /// piece.
    pub fn is_in_check(&self, side: Side) -> Result<bool, RulesError> {
        let king_pos = self.find_king(side)?.position();
        Ok(self
            .side_pieces(side.opponent())
            .iter()
            .flat_map(|p| reachable_squares(self, p))
            .any(|dest| dest == king_pos))
    }

    /// The opposing pieces currently giving check.
    pub fn checking_pieces(&self, side: Side) -> Result<Vec<Piece>, RulesError> {
        let king_pos = self.find_king(side)?.position();
        Ok(self
            .side_pieces(side.opponent())
            .into_iter()
            .filter(|p| reachable_squares(self, p).contains(&king_pos))
            .collect())
    }

    /// Would moving the piece on `from` to `to` leave `side`'s own king in
    /// check? Applies the move to the live board, evaluates, then restores
    /// the previous occupants exactly. Capture lists are never touched, so
    /// the board is bit-identical afterwards.
    pub fn would_cause_self_check(
        &mut self,
        from: Position,
        to: Position,
        side: Side,
    ) -> Result<bool, RulesError> {
        let mut piece = self.squares[from.row][from.col]
            .piece
            .take()
            .ok_or_else(|| {
                RulesError::IllegalMove(format!("no piece on {}", from.to_coordinate()))
            })?;
        let displaced = self.squares[to.row][to.col].piece;

        piece.row = to.row;
        piece.col = to.col;
        self.squares[to.row][to.col].piece = Some(piece);

        let result = self.is_in_check(side);

        self.squares[to.row][to.col].piece = displaced;
        piece.row = from.row;
        piece.col = from.col;
        self.squares[from.row][from.col].piece = Some(piece);

        result
    }

    /// Moves that answer an active check, as `"<from> <to>"` strings:
    /// king relocations that escape the check first, then, when exactly one
    /// piece is giving check, one entry per other piece that has any move
    /// resolving the check. Those entries name the checker's square as the
    /// destination regardless of the destination that was actually
    /// evaluated; the original engine reports them that way and callers
    /// match against this exact format.
    pub fn legal_responses_while_in_check(&mut self, side: Side) -> Result<Vec<String>, RulesError> {
        let checkers = self.checking_pieces(side)?;
        let king = self.find_king(side)?;
        let king_from = king.position();

        let mut responses = Vec::new();
        for dest in reachable_squares(self, &king) {
            if !self.would_cause_self_check(king_from, dest, side)? {
                responses.push(format!(
                    "{} {}",
                    king_from.to_coordinate(),
                    dest.to_coordinate()
                ));
            }
        }

        // With more than one checker only the king can resolve the check,
        // so the piece scan below is skipped entirely.
        if checkers.len() == 1 {
            let checker_coordinate = checkers[0].position().to_coordinate();
            for piece in self.side_pieces(side) {
                if piece.kind == PieceKind::King {
                    continue;
                }
                let from = piece.position();
                for dest in reachable_squares(self, &piece) {
                    if !self.would_cause_self_check(from, dest, side)? {
                        responses.push(format!("{} {}", from.to_coordinate(), checker_coordinate));
                        break;
                    }
                }
            }
        }
        Ok(responses)
    }

    pub fn is_checkmate(&mut self, side: Side) -> Result<bool, RulesError> {
        Ok(self.is_in_check(side)? && self.legal_responses_while_in_check(side)?.is_empty())
    }

    /// Validate an origin/destination pair for `side` and build the move.
    /// Order matters: the in-check response set is consulted first, then
    /// coordinates and ownership, then geometry, then the self-check
    /// simulation.
    pub fn validate_move(
        &mut self,
        origin: &str,
        destination: &str,
        side: Side,
    ) -> Result<Move, RulesError> {
        if self.is_in_check(side)? {
            let responses = self.legal_responses_while_in_check(side)?;
            let requested = format!("{origin} {destination}");
            if !responses.contains(&requested) {
                return Err(RulesError::IllegalMove(format!(
                    "{requested:?} does not answer the check"
                )));
            }
        }

        let from = Position::from_coordinate(origin).ok_or_else(|| {
            RulesError::IllegalMove(format!("{origin:?} is not a board coordinate"))
        })?;
        let to = Position::from_coordinate(destination).ok_or_else(|| {
            RulesError::IllegalMove(format!("{destination:?} is not a board coordinate"))
        })?;

        let piece = *self.piece_at(from).ok_or_else(|| {
            RulesError::IllegalMove(format!("no piece on {origin}"))
        })?;
        if piece.side != side {
            return Err(RulesError::IllegalMove(format!(
                "the piece on {origin} belongs to the other player"
            )));
        }

        if !reachable_squares(self, &piece).contains(&to) {
            return Err(RulesError::IllegalMove(format!(
                "{} cannot reach {destination}",
                piece.kind.to_human()
            )));
        }

        if self.would_cause_self_check(from, to, side)? {
            return Err(RulesError::SelfCheck);
        }

        Ok(Move {
            piece,
            from,
            to,
            captured: self.piece_at(to).copied(),
        })
    }

    /// Parse a two-token command ("origin destination"), validate it for
    /// `side`, apply it, and report whether the opponent is checkmated.
    pub fn execute(&mut self, command: &str, side: Side) -> Result<bool, RulesError> {
        if side == Side::Undecided {
            return Err(RulesError::IllegalMove("no side to move".to_string()));
        }
        let tokens: Vec<&str> = command.split_whitespace().collect();
        let &[origin, destination] = tokens.as_slice() else {
            return Err(RulesError::IllegalMove(format!(
                "command {command:?} must be two coordinates"
            )));
        };
        let mv = self.validate_move(origin, destination, side)?;
        self.apply_move(&mv);
        self.is_checkmate(side.opponent())
    }

    /// Apply a validated move: record the capture on the mover's list,
    /// clear the origin square, and attach the piece to the destination
    /// with its cached coordinates updated in the same step.
    pub fn apply_move(&mut self, mv: &Move) {
        if let Some(captured) = mv.captured {
            self.captures_mut(mv.piece.side)
                .push(captured.sign().to_string());
        }
        self.squares[mv.from.row][mv.from.col].piece = None;
        let mut piece = mv.piece;
        piece.row = mv.to.row;
        piece.col = mv.to.col;
        self.squares[mv.to.row][mv.to.col].piece = Some(piece);
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}
