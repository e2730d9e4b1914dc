// ソルバーサービス（ワーカースレッドでの探索実行）

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use crossbeam_channel::{Receiver, RecvTimeoutError, TryRecvError};
use tracing::warn;

use crate::application::progress::{progress_channel, ProgressManager};
use crate::application::solver::engine::run_search;
use crate::application::solver::event::ProgressMessage;
use crate::domain::board::{Grid, Puzzle, WallSet};
use crate::domain::search::{SearchConfig, SearchOutcome, SolveSummary};

/// 実行中フラグをワーカー終了時（パニック含む）に下ろす
struct RunningGuard(Arc<AtomicBool>);

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// 実行中の探索へのハンドル
pub struct SolveHandle {
    rx: Receiver<ProgressMessage>,
    progress: Arc<ProgressManager>,
    worker: Option<JoinHandle<()>>,
    outcome: Option<SearchOutcome>,
}

impl SolveHandle {
    /// 停止を要求（何度呼んでもよい）
    pub fn request_stop(&self) {
        self.progress.abort();
    }

    pub fn is_stop_requested(&self) -> bool {
        self.progress.is_aborted()
    }

    /// 進捗マネージャーへの参照
    pub fn progress(&self) -> &ProgressManager {
        &self.progress
    }

    /// 終端メッセージを受け取ったか
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// 受け取った終端結果
    pub fn outcome(&self) -> Option<&SearchOutcome> {
        self.outcome.as_ref()
    }

    /// 溜まっているメッセージをブロックせずにすべて取り出す
    pub fn poll(&mut self) -> Result<Vec<ProgressMessage>> {
        let mut out = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(msg) => {
                    self.observe(&msg);
                    out.push(msg);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    if self.is_finished() {
                        break;
                    }
                    self.join_worker()?;
                    bail!("終端メッセージを受信する前にワーカーが終了しました");
                }
            }
        }
        if self.is_finished() {
            self.join_worker()?;
        }
        Ok(out)
    }

    /// 最大 `timeout` だけ待って次のメッセージを受け取る
    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<ProgressMessage>> {
        match self.rx.recv_timeout(timeout) {
            Ok(msg) => {
                self.observe(&msg);
                if self.is_finished() {
                    self.join_worker()?;
                }
                Ok(Some(msg))
            }
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                self.join_worker()?;
                Err(anyhow!("終端メッセージを受信する前にワーカーが終了しました"))
            }
        }
    }

    /// 終端メッセージまで待つ
    pub fn wait(mut self) -> Result<SearchOutcome> {
        while self.outcome.is_none() {
            match self.rx.recv() {
                Ok(msg) => self.observe(&msg),
                Err(_) => break,
            }
        }
        self.join_worker()?;
        self.outcome
            .take()
            .ok_or_else(|| anyhow!("終端メッセージを受信する前にワーカーが終了しました"))
    }

    /// 探索サマリーを作成
    pub fn summary(&self, outcome: &SearchOutcome) -> SolveSummary {
        SolveSummary::new(outcome, self.progress.elapsed().as_secs_f64())
    }

    fn observe(&mut self, msg: &ProgressMessage) {
        if msg.is_terminal() && self.outcome.is_none() {
            self.outcome = msg.clone().into_outcome();
        }
    }

    fn join_worker(&mut self) -> Result<()> {
        if let Some(worker) = self.worker.take() {
            worker
                .join()
                .map_err(|_| anyhow!("ソルバースレッドが異常終了しました"))?;
        }
        Ok(())
    }
}

impl Drop for SolveHandle {
    fn drop(&mut self) {
        // 受信側が消えると終端送信は失敗して即座に戻る
        if self.outcome.is_none() {
            self.progress.abort();
        }
    }
}

/// 探索を管理するサービス。同時に走る探索は1つまで
pub struct SolverService {
    config: SearchConfig,
    running: Arc<AtomicBool>,
}

impl SolverService {
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate().context("探索設定が不正です")?;
        Ok(Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// 盤面と壁をスナップショットして探索を開始
    pub fn start(&mut self, grid: &Grid, walls: &WallSet) -> Result<SolveHandle> {
        let puzzle =
            Puzzle::new(grid.clone(), walls.clone()).context("パズルが不正です")?;
        self.start_puzzle(puzzle)
    }

    /// 検証済みパズルで探索を開始
    pub fn start_puzzle(&mut self, puzzle: Puzzle) -> Result<SolveHandle> {
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            bail!("探索が実行中です");
        }
        let guard = RunningGuard(Arc::clone(&self.running));

        let (tx, rx) = progress_channel(self.config.channel_capacity);
        let progress = Arc::new(ProgressManager::new());
        let config = self.config.clone();
        let worker_progress = Arc::clone(&progress);

        let worker = thread::Builder::new()
            .name("zip-solver".into())
            .spawn(move || {
                let _guard = guard;
                if let Err(e) = run_search(puzzle, &config, tx, worker_progress) {
                    warn!("探索スレッド終了時のエラー: {e:?}");
                }
            })
            .context("ソルバースレッドを起動できません")?;

        Ok(SolveHandle {
            rx,
            progress,
            worker: Some(worker),
            outcome: None,
        })
    }
}

impl Default for SolverService {
    fn default() -> Self {
        Self {
            config: SearchConfig::default(),
            running: Arc::new(AtomicBool::new(false)),
        }
    }
}
