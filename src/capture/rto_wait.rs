//! RTO 等待时间
//!
//! 每次超时重传时，累加“被超时的包的发送时刻”与“上一次发送任何东西的时刻”之差。

use crate::replay::{ReplayObserver, SocketState, UNSENT_BYTES_THRESHOLD};
use crate::trace::Packet;

#[derive(Debug, Default)]
pub struct WaitTimeAfterRto {
    /// 累计等待时间（秒）
    pub wait_time: f64,
}

impl ReplayObserver for WaitTimeAfterRto {
    fn on_retransmission_timeout(&mut self, packet: &Packet, state: &SocketState) {
        self.wait_time += packet.time - state.last_send_timestamp;
    }
}

/// 只统计发送量尚未达到阈值时的 RTO，即卡住了尚未发送数据的超时
#[derive(Debug)]
pub struct RtoWaitingForUnsent {
    threshold_bytes: u64,
    pub wait_time: f64,
}

impl RtoWaitingForUnsent {
    pub fn new(threshold_bytes: u64) -> Self {
        Self {
            threshold_bytes,
            wait_time: 0.0,
        }
    }

    pub fn threshold_bytes(&self) -> u64 {
        self.threshold_bytes
    }
}

impl Default for RtoWaitingForUnsent {
    fn default() -> Self {
        Self::new(UNSENT_BYTES_THRESHOLD)
    }
}

impl ReplayObserver for RtoWaitingForUnsent {
    fn on_retransmission_timeout(&mut self, packet: &Packet, state: &SocketState) {
        if state.high_tx_mark < self.threshold_bytes {
            self.wait_time += packet.time - state.last_send_timestamp;
        }
    }
}
