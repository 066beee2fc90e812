//! 真实在途段数
//!
//! 发送（新发送/重传/超时重传）且不在“已知丢失”集合中的包计入在途；
//! 每个 ACK 与重复 ACK 减一。每次变化都记录一个 (时间, 段数) 采样。

use std::collections::HashSet;

use crate::replay::{ReplayObserver, SocketState};
use crate::trace::{Packet, PacketKey};

/// (时间, 数量) 采样
pub type AmountAtTime = (f64, u64);

#[derive(Debug, Default)]
pub struct TrueBytesInFlightCapture {
    lost_packets: HashSet<PacketKey>,
    in_flight: u64,
    pub samples: Vec<AmountAtTime>,
}

impl TrueBytesInFlightCapture {
    pub fn new(lost_packets: impl IntoIterator<Item = PacketKey>) -> Self {
        Self {
            lost_packets: lost_packets.into_iter().collect(),
            in_flight: 0,
            samples: Vec::new(),
        }
    }

    pub fn in_flight(&self) -> u64 {
        self.in_flight
    }

    fn on_sent(&mut self, packet: &Packet) {
        if self.lost_packets.contains(&packet.key()) {
            return;
        }
        self.in_flight += 1;
        self.samples.push((packet.time, self.in_flight));
    }

    fn on_acked(&mut self, packet: &Packet) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.samples.push((packet.time, self.in_flight));
    }
}

impl ReplayObserver for TrueBytesInFlightCapture {
    fn on_new_send(&mut self, packet: &Packet, _state: &SocketState) {
        self.on_sent(packet);
    }

    fn on_retransmission(&mut self, packet: &Packet, _state: &SocketState) {
        self.on_sent(packet);
    }

    fn on_retransmission_timeout(&mut self, packet: &Packet, _state: &SocketState) {
        self.on_sent(packet);
    }

    fn on_ack(&mut self, packet: &Packet, _state: &SocketState) {
        self.on_acked(packet);
    }

    fn on_dup_ack(&mut self, packet: &Packet, _state: &SocketState) {
        self.on_acked(packet);
    }
}
