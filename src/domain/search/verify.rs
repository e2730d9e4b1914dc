// 解経路の検証

use crate::constants::CellSet;
use crate::domain::board::{Cell, Puzzle};
use crate::domain::error::PathViolation;

/// 経路が正しい解かどうかを検証する
///
/// - 全セルをちょうど1回ずつ訪問している
/// - 連続するセルが4近傍で隣接し、間に壁がない
/// - 非ゼロラベルのセルが昇順に現れ、最小ラベルで始まり最大ラベルで終わる
pub fn verify_solution(puzzle: &Puzzle, path: &[Cell]) -> Result<(), PathViolation> {
    let n = puzzle.size();
    let grid = puzzle.grid();
    if path.len() != grid.cell_count() {
        return Err(PathViolation::WrongLength {
            len: path.len(),
            expected: grid.cell_count(),
        });
    }

    let mut seen = CellSet::default();
    for &cell in path {
        if !cell.in_bounds(n) {
            return Err(PathViolation::OutOfBounds(cell));
        }
        if !seen.insert(cell.index(n)) {
            return Err(PathViolation::Revisited(cell));
        }
    }

    for step in path.windows(2) {
        let (from, to) = (step[0], step[1]);
        if !from.is_adjacent(to) {
            return Err(PathViolation::NotAdjacent { from, to });
        }
        if puzzle.walls().contains(from, to) {
            return Err(PathViolation::WallCrossed { from, to });
        }
    }

    if let (Ok(cps), Some(&first), Some(&last)) = (grid.checkpoints(), path.first(), path.last()) {
        if cps.get(cps.start()) != Some(first) || cps.get(cps.end()) != Some(last) {
            return Err(PathViolation::Endpoints { first, last });
        }
    }

    let mut expected: Vec<u32> = grid.labels().iter().copied().filter(|&l| l != 0).collect();
    expected.sort_unstable();
    let found = path
        .iter()
        .filter_map(|&c| grid.get(c))
        .filter(|&l| l != 0);
    for (want, got) in expected.into_iter().zip(found) {
        if want != got {
            return Err(PathViolation::CheckpointOrder {
                expected: want,
                found: got,
            });
        }
    }
    Ok(())
}
