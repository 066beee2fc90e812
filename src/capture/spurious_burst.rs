//! 乱序导致的伪重传突发
//!
//! 输入一组已由跨抓包分析确认为“因乱序引起的伪重传”的包；
//! 统计两次超时之间连续出现的此类重传个数，并记录以超时结束的最长一段。

use std::collections::HashSet;

use crate::replay::{ReplayObserver, SocketState};
use crate::trace::{Packet, PacketKey};

#[derive(Debug, Default)]
pub struct SpuriousOooRtoCapture {
    spurious_ooo_packets: HashSet<PacketKey>,
    burst: u64,
    /// 以超时结束的最长连续伪重传段
    pub longest_spurious_ooo_burst_count: u64,
    /// 回放中出现的此类重传总数
    pub spurious_ooo_retransmissions: u64,
}

impl SpuriousOooRtoCapture {
    pub fn new(spurious_ooo_packets: impl IntoIterator<Item = PacketKey>) -> Self {
        Self {
            spurious_ooo_packets: spurious_ooo_packets.into_iter().collect(),
            ..Self::default()
        }
    }

    /// 当前未结束的连续段长度
    pub fn current_burst(&self) -> u64 {
        self.burst
    }
}

impl ReplayObserver for SpuriousOooRtoCapture {
    fn on_retransmission(&mut self, packet: &Packet, _state: &SocketState) {
        if self.spurious_ooo_packets.contains(&packet.key()) {
            self.burst += 1;
            self.spurious_ooo_retransmissions += 1;
        } else {
            self.burst = 0;
        }
    }

    fn on_retransmission_timeout(&mut self, _packet: &Packet, _state: &SocketState) {
        self.longest_spurious_ooo_burst_count =
            self.longest_spurious_ooo_burst_count.max(self.burst);
        self.burst = 0;
    }
}
