//! 传输中的乱序
//!
//! 把最终被交付的发送包（发送顺序）与接收端的包（交付顺序）逐位配对，
//! 标识不一致的位置即发生了乱序。

use std::collections::HashSet;
use std::net::IpAddr;

use crate::trace::{Capture, Packet, PacketKey};

use super::PacketAnalyzer;

#[derive(Debug, Clone, Copy)]
pub struct PacketOutOfOrderAnalyzer<'a> {
    pub sender: &'a Capture,
    pub receiver: &'a Capture,
}

impl<'a> PacketOutOfOrderAnalyzer<'a> {
    pub fn new(sender: &'a Capture, receiver: &'a Capture) -> Self {
        Self { sender, receiver }
    }
}

/// 发送端抓包中最终到达接收端的数据段（保持发送顺序）。
///
/// 不带载荷的包（如握手的第三个 ACK）与首个数据段同 seq，不参与比对。
pub(crate) fn delivered_sent_packets<'a>(
    sender: &'a Capture,
    receiver: &Capture,
    source: IpAddr,
) -> Vec<&'a Packet> {
    let received: HashSet<PacketKey> = receiver
        .packets_from(source)
        .into_iter()
        .map(Packet::key)
        .collect();
    sender
        .packets_from(source)
        .into_iter()
        .filter(|p| p.payload && received.contains(&p.key()))
        .collect()
}

impl PacketAnalyzer for PacketOutOfOrderAnalyzer<'_> {
    fn name(&self) -> &str {
        "Packet Out of Order"
    }

    fn filter_packets(&self, source: IpAddr, _destination: IpAddr) -> Vec<Packet> {
        let sent = delivered_sent_packets(self.sender, self.receiver, source);
        let received = self
            .receiver
            .packets_from(source)
            .into_iter()
            .filter(|p| p.payload);
        sent.into_iter()
            .zip(received)
            .filter(|(s, r)| s.key() != r.key())
            .map(|(s, _)| s.clone())
            .collect()
    }
}
