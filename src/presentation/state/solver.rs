// ソルバーの表示状態管理

use crate::application::solver::ProgressMessage;
use crate::domain::board::Cell;

/// 探索の表示状態
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SolveStatus {
    /// 待機中
    #[default]
    Idle,
    /// 探索中
    Solving,
    /// 解あり
    Solved,
    /// 解なし
    NoSolution,
    /// 停止済み
    Stopped,
}

/// 受信したメッセージを畳み込んだ状態
#[derive(Clone, Debug, Default)]
pub struct SolverState {
    pub status: SolveStatus,
    pub checked: u64,
    /// 最新の途中経路
    pub preview: Option<Vec<Cell>>,
    pub solution: Option<Vec<Cell>>,
}

impl SolverState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 探索を開始
    pub fn start(&mut self) {
        *self = Self {
            status: SolveStatus::Solving,
            ..Self::default()
        };
    }

    pub fn is_running(&self) -> bool {
        self.status == SolveStatus::Solving
    }

    /// 1回のポーリングで得たメッセージをまとめて反映（進捗は最新のみ残す）
    pub fn apply_all<I>(&mut self, msgs: I) -> bool
    where
        I: IntoIterator<Item = ProgressMessage>,
    {
        let mut updated = false;
        for msg in msgs {
            updated = true;
            self.apply(msg);
            if !self.is_running() {
                break;
            }
        }
        updated
    }

    pub fn apply(&mut self, msg: ProgressMessage) {
        match msg {
            ProgressMessage::Progress { checked, path } => {
                if self.is_running() {
                    self.checked = checked;
                    self.preview = Some(path);
                }
            }
            ProgressMessage::Found { solution, checked } => {
                self.checked = checked;
                self.preview = None;
                self.solution = Some(solution);
                self.status = SolveStatus::Solved;
            }
            ProgressMessage::Exhausted { checked } => {
                self.checked = checked;
                self.status = SolveStatus::NoSolution;
            }
            ProgressMessage::Cancelled { checked } => {
                self.checked = checked;
                self.status = SolveStatus::Stopped;
            }
        }
    }

    /// ステータス表示文字列
    pub fn status_line(&self) -> String {
        match self.status {
            SolveStatus::Idle => "待機中".to_string(),
            SolveStatus::Solving => format!("探索中... {} 経路を確認", self.checked),
            SolveStatus::Solved => format!("解けました！ {} 回の確認で発見", self.checked),
            SolveStatus::NoSolution => format!("解なし（{} 回確認）", self.checked),
            SolveStatus::Stopped => format!("{} 回確認した時点で停止", self.checked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_idle() {
        let state = SolverState::new();
        assert_eq!(state.status, SolveStatus::Idle);
        assert!(!state.is_running());
        assert_eq!(state.status_line(), "待機中");
    }

    #[test]
    fn keeps_latest_progress() {
        let mut state = SolverState::new();
        state.start();
        let updated = state.apply_all(vec![
            ProgressMessage::Progress {
                checked: 10,
                path: vec![Cell::new(0, 0)],
            },
            ProgressMessage::Progress {
                checked: 20,
                path: vec![Cell::new(0, 0), Cell::new(0, 1)],
            },
        ]);
        assert!(updated);
        assert_eq!(state.checked, 20);
        assert_eq!(state.preview.as_ref().map(Vec::len), Some(2));
        assert_eq!(state.status_line(), "探索中... 20 経路を確認");
    }

    #[test]
    fn terminal_message_ends_run() {
        let mut state = SolverState::new();
        state.start();
        state.apply_all(vec![
            ProgressMessage::Found {
                solution: vec![Cell::new(0, 0)],
                checked: 1,
            },
            // 終端以降は無視
            ProgressMessage::Progress {
                checked: 99,
                path: vec![],
            },
        ]);
        assert_eq!(state.status, SolveStatus::Solved);
        assert_eq!(state.checked, 1);
        assert!(state.solution.is_some());
    }

    #[test]
    fn stopped_and_no_solution_lines() {
        let mut state = SolverState::new();
        state.start();
        state.apply(ProgressMessage::Cancelled { checked: 7 });
        assert_eq!(state.status, SolveStatus::Stopped);
        assert_eq!(state.status_line(), "7 回確認した時点で停止");

        state.start();
        assert_eq!(state.checked, 0);
        state.apply(ProgressMessage::Exhausted { checked: 0 });
        assert_eq!(state.status, SolveStatus::NoSolution);
    }

    #[test]
    fn empty_poll_reports_no_update() {
        let mut state = SolverState::new();
        state.start();
        assert!(!state.apply_all(Vec::new()));
    }
}
