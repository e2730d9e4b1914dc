// 盤面・壁・経路のテキスト描画

use std::fmt::Write;

use crate::constants::CellMap;
use crate::domain::board::{Cell, Puzzle};

fn digits(mut v: u64) -> usize {
    let mut d = 1;
    while v >= 10 {
        v /= 10;
        d += 1;
    }
    d
}

/// 盤面を罫線付きテキストにする
///
/// `path` を渡すと各セルに訪問順（1始まり）を、省略するとラベル（0 は `.`）を表示する。
/// 外周と壁は罫線、壁のない境界は空白になる。
pub fn render_board(puzzle: &Puzzle, path: Option<&[Cell]>) -> String {
    let n = puzzle.size();
    let grid = puzzle.grid();
    let walls = puzzle.walls();

    let steps: CellMap<usize> = path
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, c)| (c.index(n), i + 1))
        .collect();
    let max_label = grid.labels().iter().copied().max().unwrap_or(0) as u64;
    let width = digits(max_label.max((n * n) as u64));
    let rule = "-".repeat(width + 2);
    let blank = " ".repeat(width + 2);

    let mut out = String::new();
    out.push('+');
    for _ in 0..n {
        out.push_str(&rule);
        out.push('+');
    }
    out.push('\n');

    for row in 0..n {
        out.push('|');
        for col in 0..n {
            let cell = Cell::new(row, col);
            let text = match path {
                Some(_) => steps
                    .get(&cell.index(n))
                    .map_or_else(|| ".".to_string(), |s| s.to_string()),
                None => match grid.get(cell) {
                    Some(0) | None => ".".to_string(),
                    Some(label) => label.to_string(),
                },
            };
            let _ = write!(out, " {text:>width$} ");
            let right = Cell::new(row, col + 1);
            if col + 1 == n || walls.contains(cell, right) {
                out.push('|');
            } else {
                out.push(' ');
            }
        }
        out.push('\n');

        out.push('+');
        for col in 0..n {
            let cell = Cell::new(row, col);
            if row + 1 == n || walls.contains(cell, Cell::new(row + 1, col)) {
                out.push_str(&rule);
            } else {
                out.push_str(&blank);
            }
            out.push('+');
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::board::{Grid, WallSet};

    #[test]
    fn renders_labels_without_walls() {
        let grid = Grid::from_rows(&[vec![1, 0], vec![0, 2]]).unwrap();
        let puzzle = Puzzle::new(grid, WallSet::new()).unwrap();
        let expected = "\
+---+---+
| 1   . |
+   +   +
| .   2 |
+---+---+
";
        assert_eq!(render_board(&puzzle, None), expected);
    }

    #[test]
    fn renders_walls_and_steps() {
        let grid = Grid::from_rows(&[vec![1, 0], vec![2, 0]]).unwrap();
        let mut walls = WallSet::new();
        walls.insert(Cell::new(0, 0), Cell::new(1, 0)).unwrap();
        let puzzle = Puzzle::new(grid, walls).unwrap();
        let path = [
            Cell::new(0, 0),
            Cell::new(0, 1),
            Cell::new(1, 1),
            Cell::new(1, 0),
        ];
        let expected = "\
+---+---+
| 1   2 |
+---+   +
| 4   3 |
+---+---+
";
        assert_eq!(render_board(&puzzle, Some(&path)), expected);
    }

    #[test]
    fn wide_labels_widen_cells() {
        let mut grid = Grid::new(2);
        grid.set(Cell::new(0, 0), 12).unwrap();
        let puzzle = Puzzle::new(grid, WallSet::new()).unwrap();
        let text = render_board(&puzzle, None);
        assert!(text.starts_with("+----+----+\n| 12    . |\n"));
    }
}
