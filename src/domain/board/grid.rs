// Grid型 - N×N のラベル盤面を表現

use std::collections::BTreeMap;

use crate::domain::board::cell::Cell;
use crate::domain::error::PuzzleError;

/// N×N の盤面。0 は制約なし、正の値はチェックポイントの順番を表す
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    n: usize,
    labels: Vec<u32>,
}

impl Grid {
    /// 全セルが 0 の盤面を作成
    pub fn new(n: usize) -> Self {
        Self {
            n,
            labels: vec![0; n * n],
        }
    }

    /// 行ベクタから盤面を作成（正方形かつ非ゼロラベルが重複しないこと）
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, PuzzleError> {
        let n = rows.len();
        let mut labels = Vec::with_capacity(n * n);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != n {
                return Err(PuzzleError::NotSquare {
                    row,
                    len: values.len(),
                    n,
                });
            }
            labels.extend_from_slice(values);
        }
        let grid = Self { n, labels };
        grid.collect_positions()?;
        Ok(grid)
    }

    /// 一辺の長さ N
    pub fn size(&self) -> usize {
        self.n
    }

    /// 全セル数 N*N
    pub fn cell_count(&self) -> usize {
        self.labels.len()
    }

    /// セルのラベルを取得（範囲外はNone）
    pub fn get(&self, cell: Cell) -> Option<u32> {
        if !cell.in_bounds(self.n) {
            return None;
        }
        Some(self.labels[cell.index(self.n)])
    }

    /// セルのラベルを設定
    pub fn set(&mut self, cell: Cell, label: u32) -> Result<(), PuzzleError> {
        if !cell.in_bounds(self.n) {
            return Err(PuzzleError::CellOutOfBounds { cell, n: self.n });
        }
        self.labels[cell.index(self.n)] = label;
        Ok(())
    }

    /// インデックス指定でのラベル参照（探索のホットループ用）
    #[inline(always)]
    pub(crate) fn label_at(&self, index: usize) -> u32 {
        self.labels[index]
    }

    pub(crate) fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// 行ごとのラベルを返す
    pub fn rows(&self) -> Vec<Vec<u32>> {
        if self.n == 0 {
            return Vec::new();
        }
        self.labels.chunks(self.n).map(|r| r.to_vec()).collect()
    }

    /// チェックポイント情報を導出する
    ///
    /// 非ゼロラベルが無い場合は [`PuzzleError::EmptyPuzzle`]。
    pub fn checkpoints(&self) -> Result<Checkpoints, PuzzleError> {
        let positions = self.collect_positions()?;
        let (&start, &end) = match (positions.keys().next(), positions.keys().next_back()) {
            (Some(s), Some(e)) => (s, e),
            _ => return Err(PuzzleError::EmptyPuzzle),
        };
        Ok(Checkpoints {
            start,
            end,
            positions,
        })
    }

    fn collect_positions(&self) -> Result<BTreeMap<u32, Cell>, PuzzleError> {
        let mut positions = BTreeMap::new();
        for (idx, &label) in self.labels.iter().enumerate() {
            if label == 0 {
                continue;
            }
            let cell = Cell::from_index(idx, self.n);
            if let Some(&first) = positions.get(&label) {
                return Err(PuzzleError::DuplicateLabel {
                    label,
                    first,
                    second: cell,
                });
            }
            positions.insert(label, cell);
        }
        Ok(positions)
    }
}

/// チェックポイントの位置と最小・最大ラベル
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoints {
    start: u32,
    end: u32,
    positions: BTreeMap<u32, Cell>,
}

impl Checkpoints {
    /// 最小ラベル
    pub fn start(&self) -> u32 {
        self.start
    }

    /// 最大ラベル
    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn get(&self, label: u32) -> Option<Cell> {
        self.positions.get(&label).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// ラベル昇順で走査
    pub fn iter(&self) -> impl Iterator<Item = (u32, Cell)> + '_ {
        self.positions.iter().map(|(&l, &c)| (l, c))
    }
}
