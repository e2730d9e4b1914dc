// アプリケーション層 - 探索の実行と進捗の受け渡し

pub mod progress;
pub mod solver;

pub use progress::{progress_channel, ProgressManager, ProgressSender};
pub use solver::{run_search, ProgressMessage, SolveHandle, SolverService};
