// Zip 形式パズル（番号順・全セル一筆書き）ソルバー - ライブラリモジュール

pub mod constants;
pub mod domain;         // ドメイン層
pub mod application;    // アプリケーション層
pub mod presentation;   // プレゼンテーション層
pub mod search;
pub mod logging;

// 外部クレートの再エクスポート
pub use anyhow::{anyhow, Context, Result};

// 主要な型を再エクスポート
pub use application::{ProgressManager, ProgressMessage, SolveHandle, SolverService};
pub use domain::board::{Cell, Grid, Puzzle, PuzzleSpec, WallSet};
pub use domain::search::{verify_solution, SearchConfig, SearchOutcome};
pub use domain::PuzzleError;
pub use search::{solve, AdjacencyMap};
