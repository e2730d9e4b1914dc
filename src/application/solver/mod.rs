// ソルバーアプリケーションサービス

pub mod engine;
pub mod event;
pub mod service;

pub use engine::run_search;
pub use event::ProgressMessage;
pub use service::{SolveHandle, SolverService};
