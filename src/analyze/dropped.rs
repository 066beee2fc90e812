//! 丢包：发送端标识集合与接收端标识集合之差

use std::collections::HashSet;
use std::net::IpAddr;

use crate::trace::{Capture, Packet, PacketKey};

use super::PacketAnalyzer;

#[derive(Debug, Clone, Copy)]
pub struct DroppedPacketsAnalyzer<'a> {
    pub sender: &'a Capture,
    pub receiver: &'a Capture,
}

impl<'a> DroppedPacketsAnalyzer<'a> {
    pub fn new(sender: &'a Capture, receiver: &'a Capture) -> Self {
        Self { sender, receiver }
    }
}

impl PacketAnalyzer for DroppedPacketsAnalyzer<'_> {
    fn name(&self) -> &str {
        "Dropped Packets"
    }

    fn filter_packets(&self, source: IpAddr, _destination: IpAddr) -> Vec<Packet> {
        let received: HashSet<PacketKey> = self
            .receiver
            .packets_from(source)
            .into_iter()
            .map(Packet::key)
            .collect();

        // 同一标识只报告一次，保持发送顺序
        let mut seen = HashSet::new();
        self.sender
            .packets_from(source)
            .into_iter()
            .filter(|p| !received.contains(&p.key()) && seen.insert(p.key()))
            .cloned()
            .collect()
    }
}
