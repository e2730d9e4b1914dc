// 探索エンジン（チャネル配線）

use std::sync::Arc;

use anyhow::{Context, Result};
use crossbeam_channel::Sender;

use crate::application::progress::{ProgressManager, ProgressSender};
use crate::application::solver::event::ProgressMessage;
use crate::domain::board::Puzzle;
use crate::domain::search::{SearchConfig, SearchOutcome};
use crate::search;

/// 1問を探索し、進捗と終端メッセージを `tx` に流す
///
/// 停止要求は `progress` の中断フラグで受け取る。
pub fn run_search(
    puzzle: Puzzle,
    config: &SearchConfig,
    tx: Sender<ProgressMessage>,
    progress: Arc<ProgressManager>,
) -> Result<SearchOutcome> {
    let mut sender = ProgressSender::new(tx, config.update_interval, Arc::clone(&progress));
    let outcome = search::solve(&puzzle, progress.as_ref(), &mut sender);
    sender
        .finish(&outcome)
        .context("終端メッセージの送信に失敗しました")?;
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::progress::progress_channel;
    use crate::domain::board::{Grid, WallSet};
    use crate::domain::search::ChannelCapacity;

    fn puzzle(rows: &[Vec<u32>]) -> Puzzle {
        Puzzle::new(Grid::from_rows(rows).unwrap(), WallSet::new()).unwrap()
    }

    #[test]
    fn terminal_message_is_last() {
        let config = SearchConfig::default().with_update_interval(1).unwrap();
        let (tx, rx) = progress_channel(ChannelCapacity::new(1024).unwrap());
        let progress = Arc::new(ProgressManager::new());
        let outcome = run_search(puzzle(&[vec![1, 0], vec![2, 0]]), &config, tx, progress).unwrap();

        let msgs: Vec<ProgressMessage> = rx.try_iter().collect();
        assert_eq!(msgs.len(), 5);
        assert!(msgs[..4].iter().all(|m| !m.is_terminal()));
        assert_eq!(msgs[4].clone().into_outcome(), Some(outcome));
    }

    #[test]
    fn empty_puzzle_sends_exhausted_zero() {
        let (tx, rx) = progress_channel(ChannelCapacity::default());
        let progress = Arc::new(ProgressManager::new());
        run_search(
            puzzle(&[vec![0, 0], vec![0, 0]]),
            &SearchConfig::default(),
            tx,
            progress,
        )
        .unwrap();
        let msgs: Vec<ProgressMessage> = rx.try_iter().collect();
        assert_eq!(msgs, vec![ProgressMessage::Exhausted { checked: 0 }]);
    }

    #[test]
    fn aborted_manager_cancels() {
        let (tx, rx) = progress_channel(ChannelCapacity::default());
        let progress = Arc::new(ProgressManager::new());
        progress.abort();
        let outcome = run_search(
            puzzle(&[vec![1, 0], vec![2, 0]]),
            &SearchConfig::default(),
            tx,
            progress,
        )
        .unwrap();
        assert_eq!(outcome, SearchOutcome::Cancelled { checked: 0 });
        assert_eq!(rx.recv().unwrap(), ProgressMessage::Cancelled { checked: 0 });
    }
}
