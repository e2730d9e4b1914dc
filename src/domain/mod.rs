// ドメイン層 - パズルと探索結果の中核モデル

pub mod board;
pub mod error;
pub mod search;

pub use error::{PathViolation, PuzzleError};
