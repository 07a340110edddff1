//! Text renderer for the board, a thin collaborator around the rules
//! engine. The layout matches the original console output: file letters on
//! top and bottom, rank digits on both margins, `_` for empty squares.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::board::Board;
use crate::types::{Position, BOARD_SIZE};

/// Display glyph per sign character. White gets the filled glyph set, as in
/// the original renderer.
static PIECE_GLYPHS: Lazy<HashMap<char, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ('k', "\u{265A}"),
        ('K', "\u{2654}"),
        ('q', "\u{265B}"),
        ('Q', "\u{2655}"),
        ('r', "\u{265C}"),
        ('R', "\u{2656}"),
        ('b', "\u{265D}"),
        ('B', "\u{2657}"),
        ('n', "\u{265E}"),
        ('N', "\u{2658}"),
        ('p', "\u{265F}"),
        ('P', "\u{2659}"),
    ])
});

pub fn render(board: &Board) -> String {
    let mut out = String::new();
    push_file_letters(&mut out);

    for rank in (1..=BOARD_SIZE).rev() {
        let row = BOARD_SIZE - rank;
        out.push_str(&format!("{rank} |"));
        for col in 0..BOARD_SIZE {
            match board.piece_at(Position { row, col }) {
                Some(piece) => {
                    let glyph = PIECE_GLYPHS
                        .get(&piece.sign())
                        .copied()
                        .unwrap_or("?");
                    out.push_str(&format!(" {glyph} |"));
                }
                None => out.push_str(" _ |"),
            }
        }
        out.push_str(&format!(" {rank}\n"));
        if rank != 1 {
            out.push('\n');
        }
    }

    push_file_letters(&mut out);
    out
}

fn push_file_letters(out: &mut String) {
    out.push_str("   ");
    for col in 0..BOARD_SIZE {
        out.push_str(&format!(" {}  ", (b'a' + col as u8) as char));
    }
    out.push('\n');
}

pub fn draw_to_terminal(board: &Board) {
    println!("{}", render(board));
}
