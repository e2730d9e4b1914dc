// 隣接表の構築

use crate::constants::NEIGHBOR_OFFSETS;
use crate::domain::board::{Cell, WallSet};

/// 壁を除いた4近傍グラフ。構築後は不変
///
/// 各セルの近傍は (下, 上, 右, 左) の順に並ぶ。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdjacencyMap {
    n: usize,
    neighbors: Vec<Vec<usize>>,
}

impl AdjacencyMap {
    /// N と壁集合から隣接表を作る
    pub fn build(n: usize, walls: &WallSet) -> Self {
        let mut neighbors = Vec::with_capacity(n * n);
        for idx in 0..n * n {
            let cell = Cell::from_index(idx, n);
            let list: Vec<usize> = NEIGHBOR_OFFSETS
                .iter()
                .filter_map(|&(dr, dc)| {
                    let row = cell.row.checked_add_signed(dr)?;
                    let col = cell.col.checked_add_signed(dc)?;
                    let next = Cell::new(row, col);
                    next.in_bounds(n).then_some(next)
                })
                .filter(|&next| !walls.contains(cell, next))
                .map(|next| next.index(n))
                .collect();
            neighbors.push(list);
        }
        Self { n, neighbors }
    }

    /// 一辺の長さ N
    pub fn size(&self) -> usize {
        self.n
    }

    /// インデックス指定の近傍（評価順）
    #[inline(always)]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        &self.neighbors[index]
    }

    /// セル指定の近傍
    pub fn neighbors_of(&self, cell: Cell) -> Vec<Cell> {
        if !cell.in_bounds(self.n) {
            return Vec::new();
        }
        self.neighbors[cell.index(self.n)]
            .iter()
            .map(|&i| Cell::from_index(i, self.n))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(v: &[(usize, usize)]) -> Vec<Cell> {
        v.iter().map(|&p| Cell::from(p)).collect()
    }

    #[test]
    fn order_is_down_up_right_left() {
        let adj = AdjacencyMap::build(3, &WallSet::new());
        assert_eq!(
            adj.neighbors_of(Cell::new(1, 1)),
            cells(&[(2, 1), (0, 1), (1, 2), (1, 0)])
        );
    }

    #[test]
    fn corners_and_edges_are_clipped() {
        let adj = AdjacencyMap::build(3, &WallSet::new());
        assert_eq!(adj.neighbors_of(Cell::new(0, 0)), cells(&[(1, 0), (0, 1)]));
        assert_eq!(adj.neighbors_of(Cell::new(2, 2)), cells(&[(1, 2), (2, 1)]));
        assert_eq!(
            adj.neighbors_of(Cell::new(0, 1)),
            cells(&[(1, 1), (0, 2), (0, 0)])
        );
    }

    #[test]
    fn walls_remove_both_directions() {
        let mut walls = WallSet::new();
        walls.insert(Cell::new(0, 1), Cell::new(0, 0)).unwrap();
        let adj = AdjacencyMap::build(2, &walls);
        assert_eq!(adj.neighbors_of(Cell::new(0, 0)), cells(&[(1, 0)]));
        assert_eq!(adj.neighbors_of(Cell::new(0, 1)), cells(&[(1, 1)]));
        assert_eq!(adj.neighbors_of(Cell::new(1, 0)), cells(&[(0, 0), (1, 1)]));
    }

    #[test]
    fn single_cell_and_empty_grid() {
        let adj = AdjacencyMap::build(1, &WallSet::new());
        assert!(adj.neighbors(0).is_empty());
        let empty = AdjacencyMap::build(0, &WallSet::new());
        assert_eq!(empty.size(), 0);
        assert!(empty.neighbors_of(Cell::new(0, 0)).is_empty());
    }
}
