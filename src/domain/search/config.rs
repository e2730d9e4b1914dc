// 探索設定のValue Objects

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CHANNEL_CAPACITY, DEFAULT_POLL_INTERVAL_MS, DEFAULT_UPDATE_INTERVAL_CHECKS,
};

/// 進捗サンプルの送信間隔（処理フレーム数）を表すValue Object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct UpdateInterval(u64);

impl UpdateInterval {
    pub fn new(checks: u64) -> Result<Self> {
        if checks == 0 {
            return Err(anyhow!("進捗間隔は1以上である必要があります"));
        }
        Ok(Self(checks))
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl Default for UpdateInterval {
    fn default() -> Self {
        Self(DEFAULT_UPDATE_INTERVAL_CHECKS)
    }
}

impl TryFrom<u64> for UpdateInterval {
    type Error = anyhow::Error;

    fn try_from(value: u64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<UpdateInterval> for u64 {
    fn from(v: UpdateInterval) -> Self {
        v.0
    }
}

/// 進捗チャネル容量を表すValue Object
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct ChannelCapacity(usize);

impl ChannelCapacity {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(anyhow!("チャネル容量は1以上である必要があります"));
        }
        if capacity > 1 << 20 {
            return Err(anyhow!("チャネル容量が大きすぎます: {}", capacity));
        }
        Ok(Self(capacity))
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for ChannelCapacity {
    fn default() -> Self {
        Self(DEFAULT_CHANNEL_CAPACITY)
    }
}

impl TryFrom<usize> for ChannelCapacity {
    type Error = anyhow::Error;

    fn try_from(value: usize) -> Result<Self> {
        Self::new(value)
    }
}

impl From<ChannelCapacity> for usize {
    fn from(v: ChannelCapacity) -> Self {
        v.0
    }
}

/// 探索設定のValue Object
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub update_interval: UpdateInterval,
    pub channel_capacity: ChannelCapacity,
    /// 呼び出し側のポーリング間隔（ミリ秒）
    pub poll_interval_ms: u64,
}

impl SearchConfig {
    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            return Err(anyhow!("ポーリング間隔は1ms以上である必要があります"));
        }
        Ok(())
    }

    pub fn with_update_interval(mut self, checks: u64) -> Result<Self> {
        self.update_interval = UpdateInterval::new(checks)?;
        Ok(self)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            update_interval: UpdateInterval::default(),
            channel_capacity: ChannelCapacity::default(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}
