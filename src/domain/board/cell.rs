// セル座標（ドメイン層）

use std::fmt;

use serde::{Deserialize, Serialize};

/// 盤面上の座標 (row, col)。同一性は位置のみで決まる
///
/// シリアライズ時は `[row, col]` の2要素配列になる。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// 一次元インデックス（row * n + col）からセルを復元
    pub const fn from_index(index: usize, n: usize) -> Self {
        Self {
            row: index / n,
            col: index % n,
        }
    }

    /// 一次元インデックスへ変換
    pub const fn index(self, n: usize) -> usize {
        self.row * n + self.col
    }

    pub const fn in_bounds(self, n: usize) -> bool {
        self.row < n && self.col < n
    }

    /// マンハッタン距離
    pub fn manhattan(self, other: Cell) -> usize {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// 4近傍で隣接しているか
    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl From<Cell> for (usize, usize) {
    fn from(cell: Cell) -> Self {
        (cell.row, cell.col)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
