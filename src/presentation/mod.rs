// プレゼンテーション層

pub mod render;
pub mod state;

pub use render::render_board;
pub use state::{SolveStatus, SolverState};
