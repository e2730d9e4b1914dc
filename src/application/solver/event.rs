// 探索エンジンから呼び出し側へのメッセージ（UI層に依存しない）

use serde::{Deserialize, Serialize};

use crate::domain::board::Cell;
use crate::domain::search::SearchOutcome;

/// 進捗チャネルを流れるメッセージ
///
/// `Progress` は 0 回以上、終端（`Found` / `Exhausted` / `Cancelled`）は
/// 1回の実行につき必ず1回だけ、最後に届く。
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProgressMessage {
    /// 進捗サンプル
    Progress { checked: u64, path: Vec<Cell> },
    /// 解が見つかった
    Found { solution: Vec<Cell>, checked: u64 },
    /// 解なし
    Exhausted { checked: u64 },
    /// 中断
    Cancelled { checked: u64 },
}

impl ProgressMessage {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Progress { .. })
    }

    pub fn checked(&self) -> u64 {
        match self {
            Self::Progress { checked, .. }
            | Self::Found { checked, .. }
            | Self::Exhausted { checked }
            | Self::Cancelled { checked } => *checked,
        }
    }

    /// 終端メッセージなら探索結果に変換
    pub fn into_outcome(self) -> Option<SearchOutcome> {
        match self {
            Self::Progress { .. } => None,
            Self::Found { solution, checked } => Some(SearchOutcome::Found { solution, checked }),
            Self::Exhausted { checked } => Some(SearchOutcome::Exhausted { checked }),
            Self::Cancelled { checked } => Some(SearchOutcome::Cancelled { checked }),
        }
    }
}

impl From<SearchOutcome> for ProgressMessage {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Found { solution, checked } => Self::Found { solution, checked },
            SearchOutcome::Exhausted { checked } => Self::Exhausted { checked },
            SearchOutcome::Cancelled { checked } => Self::Cancelled { checked },
        }
    }
}
