// 探索モジュール

pub mod adjacency;
pub mod dfs;
pub mod pruning;

pub use adjacency::AdjacencyMap;
pub use dfs::{solve, DfsSolver, NoProgress, ProgressSink, StopSignal};
pub use pruning::{within_distance, FloodFill};
