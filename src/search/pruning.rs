// 枝刈り判定（距離上限と連結性）

use std::collections::VecDeque;

use crate::constants::CellSet;
use crate::domain::board::{Cell, Grid};
use crate::search::adjacency::AdjacencyMap;

/// 距離上限: 次のチェックポイントまでのマンハッタン距離が残りセル数以下か
///
/// `visited_len` は現在セルを含む訪問済みセル数。
#[inline(always)]
pub fn within_distance(current: Cell, target: Cell, cell_count: usize, visited_len: usize) -> bool {
    let remaining = cell_count.saturating_sub(visited_len);
    current.manhattan(target) <= remaining
}

/// 連結性判定用の作業領域
///
/// 訪問印は世代番号（stamp）で管理し、判定ごとの全クリアを避ける。
#[derive(Debug)]
pub struct FloodFill {
    stamp: Vec<u32>,
    epoch: u32,
    queue: VecDeque<usize>,
}

impl FloodFill {
    pub fn new(cell_count: usize) -> Self {
        Self {
            stamp: vec![0; cell_count],
            epoch: 0,
            queue: VecDeque::with_capacity(cell_count),
        }
    }

    fn next_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            self.stamp.iter_mut().for_each(|s| *s = 0);
            self.epoch = 1;
        }
        self.queue.clear();
    }

    /// 必須セルがすべて `start` から到達可能か
    ///
    /// 必須セル = 未訪問かつ（ラベル 0 またはラベル ≥ `next_target`）。
    /// 塗りつぶしは必須セルの中だけを伝播する近似で、訪問済みセルを経由する
    /// 到達は考慮しない。
    pub fn is_connected(
        &mut self,
        grid: &Grid,
        adjacency: &AdjacencyMap,
        start: usize,
        next_target: u32,
        visited: &CellSet,
    ) -> bool {
        let is_required = |idx: usize| {
            if visited.contains(&idx) {
                return false;
            }
            let label = grid.label_at(idx);
            label == 0 || label >= next_target
        };

        let required = (0..grid.cell_count()).filter(|&i| is_required(i)).count();
        if required == 0 {
            return true;
        }

        self.next_epoch();
        let epoch = self.epoch;
        self.stamp[start] = epoch;
        self.queue.push_back(start);
        let mut reached = usize::from(is_required(start));

        while let Some(cur) = self.queue.pop_front() {
            for &nb in adjacency.neighbors(cur) {
                if self.stamp[nb] != epoch && is_required(nb) {
                    self.stamp[nb] = epoch;
                    reached += 1;
                    self.queue.push_back(nb);
                }
            }
        }
        reached == required
    }
}
