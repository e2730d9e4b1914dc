// ドメインエラー

use thiserror::Error;

use crate::domain::board::Cell;

/// パズル構築時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PuzzleError {
    /// 非ゼロのラベルが1つもない（呼び出し側では自明な終了として扱う）
    #[error("チェックポイントが1つもありません")]
    EmptyPuzzle,

    #[error("盤面が正方形ではありません: {row} 行目の長さ {len}（期待値 {n}）")]
    NotSquare { row: usize, len: usize, n: usize },

    #[error("ラベル {label} が重複しています: {first} と {second}")]
    DuplicateLabel { label: u32, first: Cell, second: Cell },

    #[error("セルが盤面外です: {cell}（N = {n}）")]
    CellOutOfBounds { cell: Cell, n: usize },

    #[error("壁が隣接セル間ではありません: {a} - {b}")]
    WallNotAdjacent { a: Cell, b: Cell },
}

/// 解経路の検証エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathViolation {
    #[error("経路長 {len} が全セル数 {expected} と一致しません")]
    WrongLength { len: usize, expected: usize },

    #[error("セル {0} が盤面外です")]
    OutOfBounds(Cell),

    #[error("セル {0} を2回訪問しています")]
    Revisited(Cell),

    #[error("{from} から {to} へは隣接していません")]
    NotAdjacent { from: Cell, to: Cell },

    #[error("{from} と {to} の間に壁があります")]
    WallCrossed { from: Cell, to: Cell },

    #[error("経路の端点が最小・最大ラベルのセルではありません: {first} → {last}")]
    Endpoints { first: Cell, last: Cell },

    #[error("チェックポイントの順序が不正です: {found} の位置で {expected} を期待")]
    CheckpointOrder { expected: u32, found: u32 },
}
