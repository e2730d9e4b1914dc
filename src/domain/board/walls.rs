// 壁の集合（無向辺）

use std::collections::BTreeSet;

use crate::domain::board::cell::Cell;
use crate::domain::error::PuzzleError;

/// 隣接セル間の壁。(A, B) と (B, A) は同じ壁として扱う
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WallSet {
    edges: BTreeSet<(Cell, Cell)>,
}

#[inline]
fn normalize(a: Cell, b: Cell) -> (Cell, Cell) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

impl WallSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 壁を追加する。新規なら true
    pub fn insert(&mut self, a: Cell, b: Cell) -> Result<bool, PuzzleError> {
        if !a.is_adjacent(b) {
            return Err(PuzzleError::WallNotAdjacent { a, b });
        }
        Ok(self.edges.insert(normalize(a, b)))
    }

    /// 壁の有無を反転する。反転後に壁があれば true
    pub fn toggle(&mut self, a: Cell, b: Cell) -> Result<bool, PuzzleError> {
        if !a.is_adjacent(b) {
            return Err(PuzzleError::WallNotAdjacent { a, b });
        }
        let edge = normalize(a, b);
        if self.edges.remove(&edge) {
            Ok(false)
        } else {
            self.edges.insert(edge);
            Ok(true)
        }
    }

    /// 両方向で判定
    pub fn contains(&self, a: Cell, b: Cell) -> bool {
        self.edges.contains(&normalize(a, b))
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// 正規化済み (小, 大) の順で走査
    pub fn iter(&self) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        self.edges.iter().copied()
    }

    /// (A, B) の組の列から構築
    pub fn from_pairs<I>(pairs: I) -> Result<Self, PuzzleError>
    where
        I: IntoIterator<Item = (Cell, Cell)>,
    {
        let mut walls = Self::new();
        for (a, b) in pairs {
            walls.insert(a, b)?;
        }
        Ok(walls)
    }

    /// すべての壁が N×N 盤面内にあるか検証
    pub fn validate_bounds(&self, n: usize) -> Result<(), PuzzleError> {
        for &(a, b) in &self.edges {
            for cell in [a, b] {
                if !cell.in_bounds(n) {
                    return Err(PuzzleError::CellOutOfBounds { cell, n });
                }
            }
        }
        Ok(())
    }
}
