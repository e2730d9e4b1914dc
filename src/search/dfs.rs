// 明示スタックによる DFS 探索

use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::info;

use crate::constants::CellSet;
use crate::domain::board::{Cell, Checkpoints, Grid, Puzzle};
use crate::domain::error::PuzzleError;
use crate::domain::search::SearchOutcome;
use crate::search::adjacency::AdjacencyMap;
use crate::search::pruning::{within_distance, FloodFill};
use crate::vlog;

/// 協調的な停止要求。スタックから1フレーム取り出すたびに1回だけ確認される
pub trait StopSignal {
    fn should_stop(&self) -> bool;
}

impl StopSignal for AtomicBool {
    #[inline(always)]
    fn should_stop(&self) -> bool {
        self.load(Ordering::Relaxed)
    }
}

impl<T: StopSignal + ?Sized> StopSignal for Arc<T> {
    #[inline(always)]
    fn should_stop(&self) -> bool {
        (**self).should_stop()
    }
}

impl<T: StopSignal + ?Sized> StopSignal for &T {
    #[inline(always)]
    fn should_stop(&self) -> bool {
        (**self).should_stop()
    }
}

/// 処理済みフレームの通知先
pub trait ProgressSink {
    /// フレームを1つ処理するたびに呼ばれる
    ///
    /// `path` は現在セルを含む経路を組み立てるクロージャで、
    /// 実際に送信するときだけ呼べばよい。
    fn on_checked<F>(&mut self, checked: u64, path: F)
    where
        F: FnOnce() -> Vec<Cell>;
}

/// 進捗を捨てるシンク
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    #[inline(always)]
    fn on_checked<F>(&mut self, _checked: u64, _path: F)
    where
        F: FnOnce() -> Vec<Cell>,
    {
    }
}

/// スタック上の未展開の枝
///
/// `path` と `visited` は不変スナップショットで、兄弟フレーム間でのみ共有する。
/// 常に `visited == set(path)`。
struct SearchFrame {
    cell: usize,
    next_target: u32,
    path: Rc<Vec<usize>>,
    visited: Rc<CellSet>,
}

/// 1パズル分の探索器
pub struct DfsSolver<'a> {
    grid: &'a Grid,
    adjacency: &'a AdjacencyMap,
    checkpoints: &'a Checkpoints,
    flood: FloodFill,
}

impl<'a> DfsSolver<'a> {
    pub fn new(grid: &'a Grid, adjacency: &'a AdjacencyMap, checkpoints: &'a Checkpoints) -> Self {
        Self {
            grid,
            adjacency,
            checkpoints,
            flood: FloodFill::new(grid.cell_count()),
        }
    }

    /// 解が見つかるか、探索し尽くすか、停止要求が来るまで回す
    pub fn solve<S, P>(&mut self, stop: &S, sink: &mut P) -> SearchOutcome
    where
        S: StopSignal + ?Sized,
        P: ProgressSink,
    {
        let n = self.grid.size();
        let cell_count = self.grid.cell_count();
        let (start, end) = (self.checkpoints.start(), self.checkpoints.end());
        let to_cells = |path: &[usize]| -> Vec<Cell> {
            path.iter().map(|&i| Cell::from_index(i, n)).collect()
        };

        let Some(start_cell) = self.checkpoints.get(start) else {
            return SearchOutcome::Exhausted { checked: 0 };
        };
        let mut stack = vec![SearchFrame {
            cell: start_cell.index(n),
            next_target: start,
            path: Rc::new(Vec::new()),
            visited: Rc::new(CellSet::default()),
        }];
        let mut checked: u64 = 0;

        loop {
            if stop.should_stop() {
                return SearchOutcome::Cancelled { checked };
            }
            let Some(frame) = stack.pop() else {
                break;
            };
            // 同じセルを狙うフレームが複数積まれることがある
            if frame.visited.contains(&frame.cell) {
                continue;
            }

            checked += 1;
            sink.on_checked(checked, || {
                let mut path = to_cells(&frame.path);
                path.push(Cell::from_index(frame.cell, n));
                path
            });

            let label = self.grid.label_at(frame.cell);
            let new_target = if label == frame.next_target {
                if frame.next_target == end {
                    if frame.visited.len() + 1 == cell_count {
                        let mut solution = to_cells(&frame.path);
                        solution.push(Cell::from_index(frame.cell, n));
                        return SearchOutcome::Found { solution, checked };
                    }
                    // 最終チェックポイントに早く着きすぎた
                    continue;
                }
                frame.next_target + 1
            } else if label != 0 {
                // 順番違いのチェックポイント
                continue;
            } else {
                frame.next_target
            };

            let mut path = Vec::with_capacity(frame.path.len() + 1);
            path.extend_from_slice(&frame.path);
            path.push(frame.cell);
            let mut visited = (*frame.visited).clone();
            visited.insert(frame.cell);

            let current = Cell::from_index(frame.cell, n);
            if let Some(target) = self.checkpoints.get(new_target) {
                if !within_distance(current, target, cell_count, visited.len()) {
                    continue;
                }
            }
            if !self
                .flood
                .is_connected(self.grid, self.adjacency, frame.cell, new_target, &visited)
            {
                continue;
            }

            let path = Rc::new(path);
            let visited = Rc::new(visited);
            for &next in self.adjacency.neighbors(frame.cell) {
                stack.push(SearchFrame {
                    cell: next,
                    next_target: new_target,
                    path: Rc::clone(&path),
                    visited: Rc::clone(&visited),
                });
            }
        }

        SearchOutcome::Exhausted { checked }
    }
}

/// パズル1問を解く
///
/// チェックポイントが無いパズルは探索せずに `Exhausted { checked: 0 }` を返す。
pub fn solve<S, P>(puzzle: &Puzzle, stop: &S, sink: &mut P) -> SearchOutcome
where
    S: StopSignal + ?Sized,
    P: ProgressSink,
{
    let grid = puzzle.grid();
    let checkpoints = match grid.checkpoints() {
        Ok(cps) => cps,
        Err(PuzzleError::EmptyPuzzle) => {
            vlog!("チェックポイントなし: 探索を省略");
            return SearchOutcome::Exhausted { checked: 0 };
        }
        Err(e) => {
            // Puzzle::new がラベル重複を弾くので通常は到達しない
            tracing::warn!("チェックポイントを導出できません: {e}");
            return SearchOutcome::Exhausted { checked: 0 };
        }
    };
    let adjacency = AdjacencyMap::build(puzzle.size(), puzzle.walls());
    info!(
        n = puzzle.size(),
        checkpoints = checkpoints.len(),
        walls = puzzle.walls().len(),
        "探索開始"
    );

    let outcome = DfsSolver::new(grid, &adjacency, &checkpoints).solve(stop, sink);
    info!(
        outcome = ?outcome.kind(),
        checked = outcome.checked(),
        "探索終了"
    );
    outcome
}
