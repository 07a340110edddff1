use thiserror::Error;

pub const BOARD_SIZE: usize = 8;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Side {
    White,
    Black,
    /// Pre-game sentinel used by the game loop before the first turn.
    /// The rules engine itself only ever operates on White/Black.
    Undecided,
}

impl Side {
    pub fn opponent(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
            Side::Undecided => Side::Undecided,
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Side::White => "white",
            Side::Black => "black",
            Side::Undecided => "undecided",
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    /// Decode the external sign character. The letter selects the kind, the
    /// case selects the side: lowercase is White, uppercase is Black.
    pub fn from_sign(sign: char) -> Option<(PieceKind, Side)> {
        let kind = match sign.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => return None,
        };
        let side = if sign.is_ascii_lowercase() {
            Side::White
        } else {
            Side::Black
        };
        Some((kind, side))
    }

    pub fn to_char(&self) -> char {
        match self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        }
    }

    pub fn to_human(&self) -> &str {
        match self {
            Self::King => "king",
            Self::Queen => "queen",
            Self::Rook => "rook",
            Self::Bishop => "bishop",
            Self::Knight => "knight",
            Self::Pawn => "pawn",
        }
    }
}

/// A square address as 0-based grid indices. Row 0 is rank 8, so the grid
/// iterates top to bottom the way the board is drawn.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Decode a file-letter + rank-digit coordinate like `"e2"`.
    /// Returns None for anything that does not land on the 8x8 grid.
    pub fn from_coordinate(s: &str) -> Option<Position> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let col = file as i32 - 'a' as i32;
        let row = BOARD_SIZE as i32 - (rank as i32 - '0' as i32);
        if !(0..BOARD_SIZE as i32).contains(&col) || !(0..BOARD_SIZE as i32).contains(&row) {
            return None;
        }
        Some(Position {
            row: row as usize,
            col: col as usize,
        })
    }

    pub fn to_coordinate(&self) -> String {
        format!(
            "{}{}",
            (b'a' + self.col as u8) as char,
            (b'0' + (BOARD_SIZE - self.row) as u8) as char
        )
    }

    /// Apply a (row, col) delta, None when the result leaves the grid.
    pub fn offset(&self, row_delta: i8, col_delta: i8) -> Option<Position> {
        let row = self.row as i8 + row_delta;
        let col = self.col as i8 + col_delta;
        if !(0..BOARD_SIZE as i8).contains(&row) || !(0..BOARD_SIZE as i8).contains(&col) {
            return None;
        }
        Some(Position {
            row: row as usize,
            col: col as usize,
        })
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    /// Cached copy of the owning square's indices. The executor updates
    /// these together with square occupancy; they must never diverge.
    pub row: usize,
    pub col: usize,
}

impl Piece {
    pub fn from_sign(sign: char, position: Position) -> Option<Piece> {
        let (kind, side) = PieceKind::from_sign(sign)?;
        Some(Piece {
            kind,
            side,
            row: position.row,
            col: position.col,
        })
    }

    pub fn position(&self) -> Position {
        Position {
            row: self.row,
            col: self.col,
        }
    }

    pub fn sign(&self) -> char {
        let c = self.kind.to_char();
        match self.side {
            Side::Black => c.to_ascii_uppercase(),
            _ => c,
        }
    }

    pub fn to_human(&self) -> String {
        format!("{} {}", self.side.to_human(), self.kind.to_human())
    }
}

/// A validated move, produced by `Board::validate_move` and consumed
/// immediately by the executor. Never persisted.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Move {
    pub piece: Piece,
    pub from: Position,
    pub to: Position,
    pub captured: Option<Piece>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RulesError {
    /// Malformed command, off-board coordinate, wrong-side piece,
    /// unreachable destination, or a move outside the legal-response set
    /// while in check. Recoverable: the same side re-enters a move.
    #[error("illegal move: {0}")]
    IllegalMove(String),
    /// Geometrically legal move that would expose the mover's own king.
    /// Recoverable like IllegalMove.
    #[error("move would leave own king in check")]
    SelfCheck,
    /// Setup data targeted an occupied square or could not be decoded.
    /// Fatal: the board is not trustworthy.
    #[error("setup conflict: {0}")]
    SetupConflict(String),
    /// A side's king is absent from the grid. Fatal internal inconsistency.
    #[error("no {} king on the board", .0.to_human())]
    KingMissing(Side),
}

impl RulesError {
    /// Recoverable failures re-prompt the same side; anything else ends
    /// the session.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RulesError::IllegalMove(_) | RulesError::SelfCheck)
    }
}
