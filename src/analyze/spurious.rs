//! 伪重传
//!
//! 在最终被交付的发送包中，同一 seq 出现多次说明接收端收到了重复数据。

use std::collections::{HashMap, HashSet};
use std::net::IpAddr;

use crate::trace::{Capture, Packet};

use super::PacketAnalyzer;
use super::reorder::{PacketOutOfOrderAnalyzer, delivered_sent_packets};

/// 一般伪重传：按发送顺序，同一 seq 从第二次出现起都算伪重传
#[derive(Debug, Clone, Copy)]
pub struct SpuriousRetransmissionAnalyzer<'a> {
    pub sender: &'a Capture,
    pub receiver: &'a Capture,
}

impl<'a> SpuriousRetransmissionAnalyzer<'a> {
    pub fn new(sender: &'a Capture, receiver: &'a Capture) -> Self {
        Self { sender, receiver }
    }
}

impl PacketAnalyzer for SpuriousRetransmissionAnalyzer<'_> {
    fn name(&self) -> &str {
        "Spurious Retransmission"
    }

    fn filter_packets(&self, source: IpAddr, _destination: IpAddr) -> Vec<Packet> {
        let mut already_transmitted = HashSet::new();
        delivered_sent_packets(self.sender, self.receiver, source)
            .into_iter()
            .filter(|p| !already_transmitted.insert(p.seq))
            .cloned()
            .collect()
    }
}

/// 乱序引起的伪重传：只考虑出现在乱序集合中的 seq。
///
/// 每个 seq 的倒计数从 2 开始，第一次出现（原始发送）被放过，之后的每次出现都算伪重传。
#[derive(Debug, Clone, Copy)]
pub struct SpuriousReorderRetransmissionAnalyzer<'a> {
    pub sender: &'a Capture,
    pub receiver: &'a Capture,
}

impl<'a> SpuriousReorderRetransmissionAnalyzer<'a> {
    pub fn new(sender: &'a Capture, receiver: &'a Capture) -> Self {
        Self { sender, receiver }
    }
}

impl PacketAnalyzer for SpuriousReorderRetransmissionAnalyzer<'_> {
    fn name(&self) -> &str {
        "Spurious Retransmission From Reordering"
    }

    fn filter_packets(&self, source: IpAddr, destination: IpAddr) -> Vec<Packet> {
        let out_of_order: HashSet<u64> = PacketOutOfOrderAnalyzer::new(self.sender, self.receiver)
            .filter_packets(source, destination)
            .into_iter()
            .map(|p| p.seq)
            .collect();

        let mut countdown: HashMap<u64, u32> = HashMap::new();
        delivered_sent_packets(self.sender, self.receiver, source)
            .into_iter()
            .filter(|p| {
                if !out_of_order.contains(&p.seq) {
                    return false;
                }
                let remaining = countdown.entry(p.seq).or_insert(2);
                *remaining = remaining.saturating_sub(1);
                *remaining == 0
            })
            .cloned()
            .collect()
    }
}
