use std::fmt::{self, Display};
use std::ops::Index;

use itertools::Itertools;
use smallvec::SmallVec;
use thiserror::Error;

pub const BLANK: u8 = 0;

/// Capabilities a state must offer for the solver to search over it.
///
/// Structural equality (the `Eq` supertrait) is what the expansion loop uses
/// to recognize the board it just left.
pub trait Puzzle: Clone + Eq {
    fn is_goal(&self) -> bool;

    /// One successor per legal move from this state.
    fn neighbors(&self) -> SmallVec<[Self; 4]>;

    /// Tiles out of place, blank excluded.
    fn hamming(&self) -> u32;

    /// Total grid distance of tiles from their goal cells, blank excluded.
    fn manhattan(&self) -> u32;

    /// Same layout with one adjacent pair of tiles swapped. Exactly one of
    /// a state and its twin can reach the goal.
    fn twin(&self) -> Self;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("empty puzzle description")]
    Empty,
    #[error("bad token {0:?}, expected a number")]
    BadToken(String),
    #[error("dimension {0} is outside the supported 2..=15 range")]
    BadDimension(usize),
    #[error("row {row} has {len} tiles, expected {dim}")]
    RaggedRow { row: usize, len: usize, dim: usize },
    #[error("expected {expected} tiles, found {found}")]
    WrongTileCount { expected: usize, found: usize },
    #[error("tile {0} is out of range for this board")]
    TileOutOfRange(u8),
    #[error("tile {0} appears more than once")]
    DuplicateTile(u8),
}

/// An n-by-n tile grid with one blank, stored flat in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    dim: usize,
    tiles: Vec<u8>,
    blank: usize,
}

const DELTAS: &[(isize, isize)] = &[(0, 1), (0, -1), (1, 0), (-1, 0)];

impl Board {
    pub fn new(rows: Vec<Vec<u8>>) -> Result<Board, BoardError> {
        let dim = rows.len();
        for (row, tiles) in rows.iter().enumerate() {
            if tiles.len() != dim {
                return Err(BoardError::RaggedRow {
                    row,
                    len: tiles.len(),
                    dim,
                });
            }
        }
        Board::from_tiles(dim, rows.into_iter().flatten().collect())
    }

    pub fn from_tiles(dim: usize, tiles: Vec<u8>) -> Result<Board, BoardError> {
        if !(2..=15).contains(&dim) {
            return Err(BoardError::BadDimension(dim));
        }
        if tiles.len() != dim * dim {
            return Err(BoardError::WrongTileCount {
                expected: dim * dim,
                found: tiles.len(),
            });
        }

        let mut seen = vec![false; dim * dim];
        for &tile in &tiles {
            match seen.get_mut(tile as usize) {
                None => return Err(BoardError::TileOutOfRange(tile)),
                Some(true) => return Err(BoardError::DuplicateTile(tile)),
                Some(slot) => *slot = true,
            }
        }

        // the permutation check above guarantees exactly one blank
        let blank = tiles.iter().position(|&t| t == BLANK).unwrap();

        Ok(Board { dim, tiles, blank })
    }

    /// The solved layout: tiles in order, blank in the last cell.
    pub fn goal(dim: usize) -> Result<Board, BoardError> {
        let count = dim.checked_mul(dim).ok_or(BoardError::BadDimension(dim))?;
        let tiles = (1..count as u8).chain([BLANK]).collect();
        Board::from_tiles(dim, tiles)
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }

    fn goal_cell(&self, tile: u8) -> (usize, usize) {
        let home = (tile - 1) as usize;
        (home / self.dim, home % self.dim)
    }
}

impl Puzzle for Board {
    fn is_goal(&self) -> bool {
        let last = self.tiles.len() - 1;
        self.tiles[..last]
            .iter()
            .enumerate()
            .all(|(i, &t)| t as usize == i + 1)
            && self.tiles[last] == BLANK
    }

    fn neighbors(&self) -> SmallVec<[Board; 4]> {
        let mut out = SmallVec::new();
        let (r, c) = (self.blank / self.dim, self.blank % self.dim);

        for &(dr, dc) in DELTAS {
            let (nr, nc) = (r as isize + dr, c as isize + dc);
            if nr < 0 || nc < 0 || nr >= self.dim as isize || nc >= self.dim as isize {
                continue;
            }
            let from = nr as usize * self.dim + nc as usize;
            let mut next = self.clone();
            next.tiles.swap(self.blank, from);
            next.blank = from;
            out.push(next);
        }

        out
    }

    fn hamming(&self) -> u32 {
        self.tiles
            .iter()
            .enumerate()
            .filter(|&(i, &t)| t != BLANK && t as usize != i + 1)
            .count() as u32
    }

    fn manhattan(&self) -> u32 {
        let mut total = 0;
        for (i, &t) in self.tiles.iter().enumerate() {
            if t == BLANK {
                continue;
            }
            let (r, c) = (i / self.dim, i % self.dim);
            let (gr, gc) = self.goal_cell(t);
            total += r.abs_diff(gr) + c.abs_diff(gc);
        }
        total as u32
    }

    fn twin(&self) -> Board {
        let mut twin = self.clone();
        for i in 0..twin.tiles.len() - 1 {
            if i % twin.dim == twin.dim - 1 {
                continue; // row boundary
            }
            if twin.tiles[i] != BLANK && twin.tiles[i + 1] != BLANK {
                twin.tiles.swap(i, i + 1);
                return twin;
            }
        }
        unreachable!("every 2x2 or larger board has a row with two adjacent tiles")
    }
}

impl Index<(usize, usize)> for Board {
    type Output = u8;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.tiles[index.0 * self.dim + index.1]
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.dim)?;
        for row in self.tiles.chunks(self.dim) {
            let cells = row
                .iter()
                .format_with(" ", |t, g| g(&format_args!("{:2}", t)));
            writeln!(f, "{}", cells)?;
        }
        Ok(())
    }
}

/// Parse the driver format: the dimension first, then n*n tiles in row-major
/// order. Tokens are whitespace-separated; line breaks carry no meaning.
pub fn parse_board(input: &str) -> Result<Board, BoardError> {
    let mut tokens = input.split_whitespace();

    let dim: usize = match tokens.next() {
        None => return Err(BoardError::Empty),
        Some(tok) => tok
            .parse()
            .map_err(|_| BoardError::BadToken(tok.to_string()))?,
    };
    if !(2..=15).contains(&dim) {
        return Err(BoardError::BadDimension(dim));
    }

    let tiles: Vec<u8> = tokens
        .map(|tok| {
            tok.parse()
                .map_err(|_| BoardError::BadToken(tok.to_string()))
        })
        .collect::<Result<_, _>>()?;

    Board::from_tiles(dim, tiles)
}

#[cfg(test)]
mod test {
    use super::*;

    const PRINCETON: &str = "
3
 8  1  3
 4  0  2
 7  6  5
";

    #[test]
    fn parse_and_read_back() {
        let board = parse_board(PRINCETON).unwrap();
        assert_eq!(board.dimension(), 3);
        assert_eq!(board[(0, 0)], 8);
        assert_eq!(board[(1, 1)], 0);
        assert_eq!(board[(2, 2)], 5);

        let reparsed = parse_board(&board.to_string()).unwrap();
        assert_eq!(board, reparsed);
    }

    #[test]
    fn known_heuristic_values() {
        let board = parse_board(PRINCETON).unwrap();
        assert_eq!(board.hamming(), 5);
        assert_eq!(board.manhattan(), 10);
    }

    #[test]
    fn goal_board_heuristics_are_zero() {
        let goal = Board::goal(3).unwrap();
        assert!(goal.is_goal());
        assert_eq!(goal.hamming(), 0);
        assert_eq!(goal.manhattan(), 0);
    }

    #[test]
    fn non_goal_board_is_not_goal() {
        assert!(!parse_board(PRINCETON).unwrap().is_goal());
        // blank in place, two tiles exchanged
        assert!(!parse_board("3 1 2 3 4 5 6 8 7 0").unwrap().is_goal());
    }

    #[test]
    fn neighbor_counts_follow_blank_position() {
        // blank in a corner
        assert_eq!(parse_board("3 0 1 3 4 2 5 7 8 6").unwrap().neighbors().len(), 2);
        // blank on an edge
        assert_eq!(parse_board("3 1 2 3 4 5 6 7 0 8").unwrap().neighbors().len(), 3);
        // blank in the center
        assert_eq!(parse_board(PRINCETON).unwrap().neighbors().len(), 4);
    }

    #[test]
    fn neighbors_differ_by_one_slide() {
        let board = parse_board(PRINCETON).unwrap();
        for next in board.neighbors() {
            let moved: Vec<usize> = (0..9)
                .filter(|&i| board.tiles[i] != next.tiles[i])
                .collect();
            // exactly two cells change: the blank and the tile that slid
            assert_eq!(moved.len(), 2);
            assert!(moved.contains(&board.blank));
            assert!(moved.contains(&next.blank));
        }
    }

    #[test]
    fn twin_swaps_one_adjacent_pair() {
        let board = parse_board(PRINCETON).unwrap();
        let twin = board.twin();
        assert_ne!(board, twin);
        assert_eq!(board.blank, twin.blank);

        let changed: Vec<usize> = (0..9)
            .filter(|&i| board.tiles[i] != twin.tiles[i])
            .collect();
        assert_eq!(changed.len(), 2);
        assert_eq!(changed[0] + 1, changed[1]);
        assert_eq!(changed[0] / 3, changed[1] / 3);
    }

    #[test]
    fn twin_of_twin_restores_the_board() {
        let board = parse_board(PRINCETON).unwrap();
        assert_eq!(board.twin().twin(), board);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_board(""), Err(BoardError::Empty));
        assert_eq!(
            parse_board("x"),
            Err(BoardError::BadToken("x".to_string()))
        );
        assert_eq!(
            parse_board("3 1 2 3 4 five 6 7 8 0"),
            Err(BoardError::BadToken("five".to_string()))
        );
        assert_eq!(parse_board("1 0"), Err(BoardError::BadDimension(1)));
        assert_eq!(parse_board("16"), Err(BoardError::BadDimension(16)));
        assert_eq!(
            parse_board("2 1 2 3"),
            Err(BoardError::WrongTileCount {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            parse_board("2 1 2 3 0 0"),
            Err(BoardError::WrongTileCount {
                expected: 4,
                found: 5
            })
        );
        assert_eq!(
            parse_board("2 1 2 3 9"),
            Err(BoardError::TileOutOfRange(9))
        );
        assert_eq!(
            parse_board("2 1 2 2 0"),
            Err(BoardError::DuplicateTile(2))
        );
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = Board::new(vec![vec![1, 2], vec![3, 0, 4]]);
        assert_eq!(
            err,
            Err(BoardError::RaggedRow {
                row: 1,
                len: 3,
                dim: 2
            })
        );
    }

    #[test]
    fn display_matches_driver_format() {
        let board = parse_board("2 1 2 3 0").unwrap();
        assert_eq!(board.to_string(), "2\n 1  2\n 3  0\n");
    }
}
