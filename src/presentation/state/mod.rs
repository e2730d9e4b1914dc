// 呼び出し側の状態管理

pub mod solver;

pub use solver::{SolveStatus, SolverState};
