use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::rc::Rc;

use log::debug;

use crate::board::Puzzle;

/// One point in the search tree: a state, its distance from the start, and
/// the node it was expanded from. Heuristic values are computed once here so
/// that ranking a node never re-walks the board.
struct SearchNode<P> {
    board: P,
    moves: u32,
    hamming: u32,
    manhattan: u32,
    parent: Option<Rc<SearchNode<P>>>,
}

impl<P: Puzzle> SearchNode<P> {
    fn root(board: P) -> Rc<Self> {
        let (hamming, manhattan) = (board.hamming(), board.manhattan());
        Rc::new(SearchNode {
            board,
            moves: 0,
            hamming,
            manhattan,
            parent: None,
        })
    }

    fn child(parent: &Rc<Self>, board: P) -> Rc<Self> {
        let (hamming, manhattan) = (board.hamming(), board.manhattan());
        Rc::new(SearchNode {
            board,
            moves: parent.moves + 1,
            hamming,
            manhattan,
            parent: Some(Rc::clone(parent)),
        })
    }

    fn rank(&self) -> Rank {
        Rank {
            hamming: self.moves + self.hamming,
            manhattan: self.moves + self.manhattan,
        }
    }
}

/// Extraction order for the frontier. The cheap estimate decides; the
/// tighter one breaks ties. Both estimates are admissible, so either
/// ordering alone would already give shortest solutions; the derived
/// lexicographic `Ord` is what the frontier consumes.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Rank {
    hamming: u32,
    manhattan: u32,
}

/// `BinaryHeap` is a max-heap, so entries carry `Reverse<Rank>` to pop the
/// lowest rank first. Equal ranks are in no particular order.
struct Entry<P> {
    rank: Reverse<Rank>,
    node: Rc<SearchNode<P>>,
}

impl<P> PartialEq for Entry<P> {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl<P> Eq for Entry<P> {}

impl<P> PartialOrd for Entry<P> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<P> Ord for Entry<P> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// Node counters for one solve, summed over both directions of the search.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Nodes extracted and expanded.
    pub expanded: u64,
    /// Nodes pushed onto a frontier, the root included.
    pub generated: u64,
    /// Largest frontier seen.
    pub max_frontier: usize,
}

enum Step<P> {
    Expanded,
    Goal(Rc<SearchNode<P>>),
    Exhausted,
}

/// A single best-first frontier over one start state.
struct Search<P: Puzzle> {
    queue: BinaryHeap<Entry<P>>,
    stats: Stats,
}

impl<P: Puzzle> Search<P> {
    fn seed(start: P) -> Self {
        let root = SearchNode::root(start);
        let mut queue = BinaryHeap::new();
        queue.push(Entry {
            rank: Reverse(root.rank()),
            node: root,
        });
        Search {
            queue,
            stats: Stats {
                expanded: 0,
                generated: 1,
                max_frontier: 1,
            },
        }
    }

    /// Extract the best node; either it is the goal, or its successors join
    /// the frontier. The one neighbor equal to the parent's board is not
    /// re-queued. That is the only duplicate check; a state can still come
    /// back around a longer cycle.
    fn step(&mut self) -> Step<P> {
        let Some(Entry { node, .. }) = self.queue.pop() else {
            return Step::Exhausted;
        };

        if node.board.is_goal() {
            return Step::Goal(node);
        }

        for next in node.board.neighbors() {
            if let Some(prev) = &node.parent {
                if next == prev.board {
                    continue;
                }
            }
            let child = SearchNode::child(&node, next);
            self.queue.push(Entry {
                rank: Reverse(child.rank()),
                node: child,
            });
            self.stats.generated += 1;
        }

        self.stats.expanded += 1;
        self.stats.max_frontier = self.stats.max_frontier.max(self.queue.len());
        Step::Expanded
    }
}

/// Shortest-solution solver for a sliding-tile state.
///
/// The whole search runs inside [`Solver::new`]; afterwards the result is
/// read through [`is_solvable`](Solver::is_solvable),
/// [`moves`](Solver::moves) and [`solution`](Solver::solution).
///
/// The start state and its twin are searched in lockstep, one extraction
/// each per round. Exactly one of the two can reach the goal, so whichever
/// side finishes first settles solvability and the loop always terminates.
pub struct Solver<P: Puzzle> {
    solution: Option<Vec<P>>,
    stats: Stats,
}

impl<P: Puzzle> Solver<P> {
    pub fn new(initial: P) -> Self {
        let mut search = Search::seed(initial.clone());
        let mut twin = Search::seed(initial.twin());

        let goal = loop {
            match search.step() {
                Step::Goal(node) => break Some(node),
                Step::Exhausted => break None,
                Step::Expanded => {}
            }
            match twin.step() {
                // the twin reaching its goal proves the start state cannot
                Step::Goal(_) => break None,
                Step::Exhausted | Step::Expanded => {}
            }

            if search.stats.expanded % 10_000 == 0 {
                debug!(
                    "expanded {} nodes, frontier at {}",
                    search.stats.expanded,
                    search.queue.len()
                );
            }
        };

        let stats = Stats {
            expanded: search.stats.expanded + twin.stats.expanded,
            generated: search.stats.generated + twin.stats.generated,
            max_frontier: search.stats.max_frontier.max(twin.stats.max_frontier),
        };

        match &goal {
            Some(node) => debug!(
                "goal at depth {} after {} expansions",
                node.moves, stats.expanded
            ),
            None => debug!("no solution, settled after {} expansions", stats.expanded),
        }

        Solver {
            solution: goal.map(unwind),
            stats,
        }
    }

    pub fn is_solvable(&self) -> bool {
        self.solution.is_some()
    }

    /// Length of the shortest solution in moves, or -1 when unsolvable.
    pub fn moves(&self) -> i32 {
        match &self.solution {
            Some(path) => path.len() as i32 - 1,
            None => -1,
        }
    }

    /// States from the start to the goal, both included; `None` when
    /// unsolvable.
    pub fn solution(&self) -> Option<&[P]> {
        self.solution.as_deref()
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }
}

/// Walk the ancestry chain back to the root and flip it forward.
fn unwind<P: Puzzle>(goal: Rc<SearchNode<P>>) -> Vec<P> {
    let mut path = Vec::with_capacity(goal.moves as usize + 1);
    let mut node = Some(&goal);
    while let Some(n) = node {
        path.push(n.board.clone());
        node = n.parent.as_ref();
    }
    path.reverse();
    path
}
