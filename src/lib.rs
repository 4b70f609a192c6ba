//! Shortest-solution search for sliding-tile puzzles.
//!
//! [`Board`] is the n-by-n grid with one blank; [`Solver`] runs a best-first
//! search over any [`Puzzle`] state and reconstructs the move sequence.

pub mod board;
pub mod solver;

pub use board::{parse_board, Board, BoardError, Puzzle, BLANK};
pub use solver::{Solver, Stats};
