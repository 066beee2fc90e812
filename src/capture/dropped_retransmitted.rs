//! 重传后再次丢失的包
//!
//! 记住每个被（快速）重传的包；若之后同一 seq 发生超时重传，说明那次重传也丢了。

use std::collections::HashMap;

use crate::replay::{ReplayObserver, SocketState};
use crate::trace::Packet;

#[derive(Debug, Default)]
pub struct DroppedRetransmittedPacketCapture {
    /// seq -> 最近一次重传的包
    retransmitted: HashMap<u64, Packet>,
    /// 被重传后又丢失的包（按发现顺序）
    pub dropped_packets: Vec<Packet>,
}

impl DroppedRetransmittedPacketCapture {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReplayObserver for DroppedRetransmittedPacketCapture {
    fn on_retransmission(&mut self, packet: &Packet, _state: &SocketState) {
        self.retransmitted.insert(packet.seq, packet.clone());
    }

    fn on_retransmission_timeout(&mut self, packet: &Packet, _state: &SocketState) {
        if let Some(lost) = self.retransmitted.remove(&packet.seq) {
            self.dropped_packets.push(lost);
        }
    }
}
