//! 借助回放引擎的 SACK 重传分析

use std::collections::HashSet;
use std::net::IpAddr;

use crate::capture::{FastRetransmitSackCapture, SingleDupAckRetransmitCapture};
use crate::replay::TcpSourceReplayer;
use crate::trace::{Capture, Packet, PacketKey};

use super::PacketAnalyzer;
use super::spurious::SpuriousRetransmissionAnalyzer;

/// RFC 6675 IsLost 推断触发的快速重传
#[derive(Debug, Clone, Copy)]
pub struct FastRetransmitSackAnalyzer<'a> {
    pub sender: &'a Capture,
}

impl<'a> FastRetransmitSackAnalyzer<'a> {
    pub fn new(sender: &'a Capture) -> Self {
        Self { sender }
    }
}

impl PacketAnalyzer for FastRetransmitSackAnalyzer<'_> {
    fn name(&self) -> &str {
        "SACK Fast Retransmit"
    }

    fn filter_packets(&self, source: IpAddr, destination: IpAddr) -> Vec<Packet> {
        let mut capture = FastRetransmitSackCapture::default();
        TcpSourceReplayer::new(self.sender.packets(), source, destination, &mut capture).run();
        capture.packets
    }
}

/// 单个重复 ACK 即触发、且事后被确认为伪重传的 SACK 重传
#[derive(Debug, Clone, Copy)]
pub struct SingleDupAckRetransmitSackAnalyzer<'a> {
    pub sender: &'a Capture,
    pub receiver: &'a Capture,
}

impl<'a> SingleDupAckRetransmitSackAnalyzer<'a> {
    pub fn new(sender: &'a Capture, receiver: &'a Capture) -> Self {
        Self { sender, receiver }
    }
}

impl PacketAnalyzer for SingleDupAckRetransmitSackAnalyzer<'_> {
    fn name(&self) -> &str {
        "Single Dup Ack Fast Retransmit"
    }

    fn filter_packets(&self, source: IpAddr, destination: IpAddr) -> Vec<Packet> {
        let spurious: HashSet<PacketKey> =
            SpuriousRetransmissionAnalyzer::new(self.sender, self.receiver)
                .filter_packets(source, destination)
                .iter()
                .map(Packet::key)
                .collect();

        let mut capture = SingleDupAckRetransmitCapture::default();
        TcpSourceReplayer::new(self.sender.packets(), source, destination, &mut capture).run();
        capture
            .packets
            .into_iter()
            .filter(|p| spurious.contains(&p.key()))
            .collect()
    }
}
