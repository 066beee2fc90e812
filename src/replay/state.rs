//! 发送端套接字状态
//!
//! 回放过程中的全部显式记忆；只由回放引擎修改，观察者在回调中只读。

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// 一个被 SACK 的字节区间 `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SackedByteRange {
    pub start: u64,
    pub end: u64,
}

impl SackedByteRange {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

#[derive(Debug, Clone, Default)]
pub struct SocketState {
    /// 当前回放时间（最近一个包的抓包时间戳，秒）
    pub time: f64,
    /// 发送过的最高 seq
    pub high_tx_mark: u64,
    /// 最近一次（快速）重传的 seq；退出恢复时清零
    pub high_rtx: u64,
    /// 进入恢复时记录的 high_tx_mark；不在恢复中时为 0
    pub recovery_point: u64,
    pub in_recovery: bool,
    /// 恢复期编号，每进入一次恢复加一
    pub recovery_number: u64,
    /// 观察到的最高累计 ACK
    pub last_acked_seq: u64,
    /// 连续重复 ACK 计数（饱和于阈值）
    pub dup_ack: u32,
    /// 当前通告的 SACK 区间（按 start 升序）
    pub sacked_bytes: Vec<SackedByteRange>,
    /// 推断丢失段起始偏移 -> 等效重复 ACK 计数（饱和于阈值）
    pub sack_dupacks: HashMap<u64, u32>,
    /// 已确认交付（累计或 SACK）的段偏移
    pub scoreboard: HashSet<u64>,
    /// seq -> 最近一次发送时间
    pub last_sent_timestamps: HashMap<u64, f64>,
    pub last_send_timestamp: f64,
    pub last_ack_timestamp: f64,
    /// seq -> 重传时所处的恢复期编号
    pub retransmitted: HashMap<u64, u64>,
}

impl SocketState {
    /// 某个推断丢失段的等效重复 ACK 计数（不存在视为 0）
    pub fn sack_dupacks_for(&self, segment: u64) -> u32 {
        self.sack_dupacks.get(&segment).copied().unwrap_or(0)
    }
}
