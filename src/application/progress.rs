// 進捗管理と進捗チャネル

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::application::solver::event::ProgressMessage;
use crate::domain::board::Cell;
use crate::domain::search::{ChannelCapacity, SearchOutcome, UpdateInterval};
use crate::search::{ProgressSink, StopSignal};
use crate::vlog;

/// 容量付きの進捗チャネルを作る
pub fn progress_channel(
    capacity: ChannelCapacity,
) -> (Sender<ProgressMessage>, Receiver<ProgressMessage>) {
    bounded(capacity.get())
}

/// 進捗マネージャー
///
/// 停止フラグ（呼び出し側が書き、探索側が読む）と、最新の処理数を保持する。
#[derive(Debug)]
pub struct ProgressManager {
    abort_flag: Arc<AtomicBool>,
    checked: AtomicU64,
    dropped_samples: AtomicU64,
    start_time: Instant,
}

impl ProgressManager {
    pub fn new() -> Self {
        Self {
            abort_flag: Arc::new(AtomicBool::new(false)),
            checked: AtomicU64::new(0),
            dropped_samples: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// 探索中断フラグを取得
    pub fn abort_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort_flag)
    }

    /// 探索を中断（何度呼んでもよい）
    pub fn abort(&self) {
        self.abort_flag.store(true, Ordering::Relaxed);
    }

    /// 中断されたかチェック
    pub fn is_aborted(&self) -> bool {
        self.abort_flag.load(Ordering::Relaxed)
    }

    /// 最新の処理数を記録
    pub fn record_checked(&self, checked: u64) {
        self.checked.store(checked, Ordering::Relaxed);
    }

    /// 探索側が処理したフレーム数（フレームごとに更新）
    pub fn checked(&self) -> u64 {
        self.checked.load(Ordering::Relaxed)
    }

    fn record_dropped(&self) {
        self.dropped_samples.fetch_add(1, Ordering::Relaxed);
    }

    /// チャネル満杯で捨てた進捗サンプル数
    pub fn dropped_samples(&self) -> u64 {
        self.dropped_samples.load(Ordering::Relaxed)
    }

    /// 経過時間を取得
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// 探索速度（フレーム/秒）を取得
    pub fn checks_per_second(&self) -> f64 {
        let checked = self.checked() as f64;
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            checked / elapsed
        } else {
            0.0
        }
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl StopSignal for ProgressManager {
    #[inline(always)]
    fn should_stop(&self) -> bool {
        self.is_aborted()
    }
}

/// 探索側の送信口
///
/// 進捗サンプルは `interval` フレームごとに `try_send` し、満杯なら捨てる。
/// 終端メッセージは [`ProgressSender::finish`] で受理されるまでブロックする。
pub struct ProgressSender {
    tx: Sender<ProgressMessage>,
    interval: u64,
    last_update: u64,
    manager: Arc<ProgressManager>,
}

impl ProgressSender {
    pub fn new(
        tx: Sender<ProgressMessage>,
        interval: UpdateInterval,
        manager: Arc<ProgressManager>,
    ) -> Self {
        Self {
            tx,
            interval: interval.get(),
            last_update: 0,
            manager,
        }
    }

    /// 終端メッセージを送る（受信側が居る限り必ず届く）
    pub fn finish(self, outcome: &SearchOutcome) -> Result<()> {
        self.manager.record_checked(outcome.checked());
        self.tx
            .send(ProgressMessage::from(outcome.clone()))
            .map_err(|_| anyhow!("受信側が閉じているため終端メッセージを送れません"))
    }
}

impl ProgressSink for ProgressSender {
    fn on_checked<F>(&mut self, checked: u64, path: F)
    where
        F: FnOnce() -> Vec<Cell>,
    {
        self.manager.record_checked(checked);
        if checked - self.last_update < self.interval {
            return;
        }
        self.last_update = checked;

        let msg = ProgressMessage::Progress {
            checked,
            path: path(),
        };
        match self.tx.try_send(msg) {
            Ok(()) => vlog!(checked, "進捗サンプル送信"),
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => {
                self.manager.record_dropped();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sender(
        interval: u64,
        capacity: usize,
    ) -> (ProgressSender, Receiver<ProgressMessage>, Arc<ProgressManager>) {
        let (tx, rx) = progress_channel(ChannelCapacity::new(capacity).unwrap());
        let manager = Arc::new(ProgressManager::new());
        let sender = ProgressSender::new(
            tx,
            UpdateInterval::new(interval).unwrap(),
            Arc::clone(&manager),
        );
        (sender, rx, manager)
    }

    #[test]
    fn new_manager_starts_clean() {
        let mgr = ProgressManager::new();
        assert!(!mgr.is_aborted());
        assert_eq!(mgr.checked(), 0);
        assert_eq!(mgr.dropped_samples(), 0);
    }

    #[test]
    fn abort_is_idempotent_and_shared() {
        let mgr = ProgressManager::new();
        let flag = mgr.abort_flag();
        mgr.abort();
        mgr.abort();
        assert!(mgr.is_aborted());
        assert!(flag.load(Ordering::Relaxed));
        assert!(mgr.should_stop());
    }

    #[test]
    fn samples_are_throttled() {
        let (mut sender, rx, mgr) = sender(3, 16);
        for checked in 1..=10 {
            sender.on_checked(checked, || vec![Cell::new(0, 0)]);
        }
        let sampled: Vec<u64> = rx.try_iter().map(|m| m.checked()).collect();
        assert_eq!(sampled, vec![3, 6, 9]);
        assert_eq!(mgr.checked(), 10);
    }

    #[test]
    fn path_is_built_only_when_sampled() {
        let (mut sender, _rx, _mgr) = sender(5, 16);
        let mut built = 0;
        for checked in 1..=10 {
            sender.on_checked(checked, || {
                built += 1;
                Vec::new()
            });
        }
        assert_eq!(built, 2);
    }

    #[test]
    fn full_channel_drops_progress_but_not_terminal() {
        let (mut sender, rx, mgr) = sender(1, 1);
        sender.on_checked(1, Vec::new);
        sender.on_checked(2, Vec::new);
        assert_eq!(mgr.dropped_samples(), 1);
        assert_eq!(rx.try_recv().unwrap().checked(), 1);

        sender
            .finish(&SearchOutcome::Exhausted { checked: 2 })
            .unwrap();
        assert_eq!(rx.try_recv().unwrap(), ProgressMessage::Exhausted { checked: 2 });
        assert_eq!(mgr.checked(), 2);
    }

    #[test]
    fn checked_count_tracks_every_frame() {
        let (mut sender, rx, mgr) = sender(100, 4);
        for checked in 1..=42 {
            sender.on_checked(checked, Vec::new);
        }
        assert_eq!(mgr.checked(), 42);
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn terminal_waits_for_room_in_full_channel() {
        let (mut sender, rx, mgr) = sender(1, 1);
        sender.on_checked(1, || vec![Cell::new(0, 0)]);
        assert!(rx.is_full());

        let worker = std::thread::spawn(move || {
            sender.finish(&SearchOutcome::Exhausted { checked: 1 })
        });
        std::thread::sleep(Duration::from_millis(50));
        assert!(!worker.is_finished());

        assert_eq!(
            rx.recv().unwrap(),
            ProgressMessage::Progress {
                checked: 1,
                path: vec![Cell::new(0, 0)],
            }
        );
        assert_eq!(rx.recv().unwrap(), ProgressMessage::Exhausted { checked: 1 });
        worker.join().unwrap().unwrap();
        assert_eq!(mgr.dropped_samples(), 0);
    }

    #[test]
    fn finish_fails_without_receiver() {
        let (sender, rx, _mgr) = sender(1, 1);
        drop(rx);
        assert!(sender
            .finish(&SearchOutcome::Cancelled { checked: 0 })
            .is_err());
    }

    #[test]
    fn checks_per_second_calculation() {
        let mgr = ProgressManager::new();
        mgr.record_checked(1000);
        std::thread::sleep(Duration::from_millis(20));
        assert!(mgr.checks_per_second() > 0.0);
    }
}
