// 盤面関連のドメイン層

pub mod cell;
pub mod grid;
pub mod puzzle;
pub mod walls;

pub use cell::Cell;
pub use grid::{Checkpoints, Grid};
pub use puzzle::{Puzzle, PuzzleSpec};
pub use walls::WallSet;
