// 探索関連のドメインモデル

pub mod config;
pub mod result;
pub mod verify;

pub use config::{ChannelCapacity, SearchConfig, UpdateInterval};
pub use result::{OutcomeKind, SearchOutcome, SolveSummary};
pub use verify::verify_solution;
