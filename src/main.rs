use std::{env, fs};

use anyhow::Context;

use npuzzle_solver::{parse_board, Puzzle, Solver};

// Puzzle file format: the dimension first, then the tile grid in row-major
// order, whitespace-separated, with 0 for the blank. For example:
//
// 3
//  0  1  3
//  4  2  5
//  7  8  6

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .context("usage: npuzzle-solver <puzzle-file>")?;
    let input = fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
    let initial = parse_board(&input).with_context(|| format!("parsing {}", path))?;

    println!("hamming: {}", initial.hamming());
    println!("manhattan: {}", initial.manhattan());
    println!("dimension: {}", initial.dimension());

    let solver = Solver::new(initial);

    match solver.solution() {
        None => println!("No solution possible"),
        Some(boards) => {
            println!("Minimum number of moves = {}", solver.moves());
            for board in boards {
                println!("{}", board);
            }
        }
    }

    Ok(())
}
