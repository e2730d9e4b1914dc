// 探索結果の定義

use serde::{Deserialize, Serialize};

use crate::domain::board::Cell;

/// 1回の探索の終端結果
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchOutcome {
    /// 全セルを順序通りに巡る経路が見つかった
    Found { solution: Vec<Cell>, checked: u64 },
    /// 探索し尽くしたが解なし
    Exhausted { checked: u64 },
    /// 停止要求により中断
    Cancelled { checked: u64 },
}

impl SearchOutcome {
    /// 処理したフレーム数
    pub fn checked(&self) -> u64 {
        match self {
            Self::Found { checked, .. }
            | Self::Exhausted { checked }
            | Self::Cancelled { checked } => *checked,
        }
    }

    pub fn solution(&self) -> Option<&[Cell]> {
        match self {
            Self::Found { solution, .. } => Some(solution),
            _ => None,
        }
    }

    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Found { .. } => OutcomeKind::Found,
            Self::Exhausted { .. } => OutcomeKind::Exhausted,
            Self::Cancelled { .. } => OutcomeKind::Cancelled,
        }
    }
}

/// 終端結果の種類
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeKind {
    Found,
    Exhausted,
    Cancelled,
}

/// 探索サマリー
#[derive(Clone, Debug, Serialize)]
pub struct SolveSummary {
    pub outcome: OutcomeKind,
    pub checked: u64,
    pub elapsed_seconds: f64,
    pub checks_per_second: f64,
}

impl SolveSummary {
    pub fn new(outcome: &SearchOutcome, elapsed_seconds: f64) -> Self {
        let checked = outcome.checked();
        let checks_per_second = if elapsed_seconds > 0.0 {
            checked as f64 / elapsed_seconds
        } else {
            0.0
        };
        Self {
            outcome: outcome.kind(),
            checked,
            elapsed_seconds,
            checks_per_second,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors_cover_every_variant() {
        let found = SearchOutcome::Found {
            solution: vec![Cell::new(0, 0)],
            checked: 3,
        };
        assert_eq!(found.checked(), 3);
        assert_eq!(found.kind(), OutcomeKind::Found);
        assert_eq!(found.solution(), Some(&[Cell::new(0, 0)][..]));

        let exhausted = SearchOutcome::Exhausted { checked: 7 };
        assert_eq!(exhausted.checked(), 7);
        assert!(exhausted.solution().is_none());

        let cancelled = SearchOutcome::Cancelled { checked: 0 };
        assert_eq!(cancelled.kind(), OutcomeKind::Cancelled);
    }

    #[test]
    fn summary_rate() {
        let summary = SolveSummary::new(&SearchOutcome::Exhausted { checked: 1000 }, 2.0);
        assert_eq!(summary.checked, 1000);
        assert!((summary.checks_per_second - 500.0).abs() < f64::EPSILON);

        let instant = SolveSummary::new(&SearchOutcome::Exhausted { checked: 10 }, 0.0);
        assert_eq!(instant.checks_per_second, 0.0);
    }
}
