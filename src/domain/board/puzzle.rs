// パズル（盤面 + 壁）と入力ドキュメント

use serde::{Deserialize, Serialize};

use crate::domain::board::{Cell, Grid, WallSet};
use crate::domain::error::PuzzleError;

/// 検証済みのパズル。探索開始時にはこの値ごとスナップショットされる
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Puzzle {
    grid: Grid,
    walls: WallSet,
}

impl Puzzle {
    /// ラベルの重複が無く、壁が盤面内にあることを確認して組み立てる
    ///
    /// チェックポイントが1つも無い盤面は受け付ける（探索は即座に終わる）。
    pub fn new(grid: Grid, walls: WallSet) -> Result<Self, PuzzleError> {
        match grid.checkpoints() {
            Ok(_) | Err(PuzzleError::EmptyPuzzle) => {}
            Err(e) => return Err(e),
        }
        walls.validate_bounds(grid.size())?;
        Ok(Self { grid, walls })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn walls(&self) -> &WallSet {
        &self.walls
    }

    /// 一辺の長さ N
    pub fn size(&self) -> usize {
        self.grid.size()
    }
}

/// JSON 等で受け渡すパズル表現
///
/// ```json
/// { "grid": [[1, 0], [0, 2]], "walls": [[[0, 0], [0, 1]]] }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleSpec {
    pub grid: Vec<Vec<u32>>,
    #[serde(default)]
    pub walls: Vec<[Cell; 2]>,
}

impl PuzzleSpec {
    pub fn to_puzzle(&self) -> Result<Puzzle, PuzzleError> {
        let grid = Grid::from_rows(&self.grid)?;
        let walls = WallSet::from_pairs(self.walls.iter().map(|&[a, b]| (a, b)))?;
        Puzzle::new(grid, walls)
    }
}

impl From<&Puzzle> for PuzzleSpec {
    fn from(puzzle: &Puzzle) -> Self {
        Self {
            grid: puzzle.grid.rows(),
            walls: puzzle.walls.iter().map(|(a, b)| [a, b]).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_document() {
        let json = r#"{ "grid": [[1, 0], [0, 2]], "walls": [[[0, 1], [0, 0]]] }"#;
        let spec: PuzzleSpec = serde_json::from_str(json).unwrap();
        let puzzle = spec.to_puzzle().unwrap();
        assert_eq!(puzzle.size(), 2);
        assert!(puzzle.walls().contains(Cell::new(0, 0), Cell::new(0, 1)));
    }

    #[test]
    fn walls_are_optional() {
        let spec: PuzzleSpec = serde_json::from_str(r#"{ "grid": [[1]] }"#).unwrap();
        assert!(spec.to_puzzle().unwrap().walls().is_empty());
    }

    #[test]
    fn rejects_wall_outside_grid() {
        let spec = PuzzleSpec {
            grid: vec![vec![1, 0], vec![0, 2]],
            walls: vec![[Cell::new(1, 1), Cell::new(1, 2)]],
        };
        assert!(matches!(
            spec.to_puzzle(),
            Err(PuzzleError::CellOutOfBounds { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_label_set_after_construction() {
        let mut grid = Grid::new(2);
        grid.set(Cell::new(0, 0), 1).unwrap();
        grid.set(Cell::new(1, 0), 1).unwrap();
        assert!(matches!(
            Puzzle::new(grid, WallSet::new()),
            Err(PuzzleError::DuplicateLabel { label: 1, .. })
        ));
    }

    #[test]
    fn accepts_grid_without_checkpoints() {
        let puzzle = Puzzle::new(Grid::new(3), WallSet::new()).unwrap();
        assert_eq!(puzzle.size(), 3);
    }

    #[test]
    fn document_from_puzzle_preserves_content() {
        let spec = PuzzleSpec {
            grid: vec![vec![1, 0], vec![0, 2]],
            walls: vec![[Cell::new(0, 0), Cell::new(1, 0)]],
        };
        let puzzle = spec.to_puzzle().unwrap();
        assert_eq!(PuzzleSpec::from(&puzzle), spec);
    }
}
