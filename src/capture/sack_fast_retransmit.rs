//! SACK 触发的快速重传
//!
//! 对应 RFC 6675 第 5 节：收到重复 ACK 时，若 `IsLost(HighACK + 1)` 成立则重传。
//! 一个段被判定丢失，当且仅当其上方已有足够多被 SACK 的字节。

use crate::replay::{
    DUPLICATE_ACK_THRESHOLD, ReplayObserver, SMSS, SocketState, sacked_segment_count,
};
use crate::trace::Packet;

/// 该 seq 的等效重复 ACK 计数已达阈值时发生的重传
#[derive(Debug, Default)]
pub struct FastRetransmitSackCapture {
    pub packets: Vec<Packet>,
}

impl ReplayObserver for FastRetransmitSackCapture {
    fn on_retransmission(&mut self, packet: &Packet, state: &SocketState) {
        if state.sack_dupacks_for(packet.seq) == DUPLICATE_ACK_THRESHOLD {
            self.packets.push(packet.clone());
        }
    }
}

/// 重复 ACK 尚未达到阈值、但 SACK 覆盖的段数已达阈值时发生的重传。
///
/// 发送端此时处于 OPEN 状态，第一个重复 ACK 就会触发重传；若该段其实只是被乱序，
/// 这次重传就是伪重传。
#[derive(Debug, Default)]
pub struct SingleDupAckRetransmitCapture {
    pub packets: Vec<Packet>,
}

impl ReplayObserver for SingleDupAckRetransmitCapture {
    fn on_retransmission(&mut self, packet: &Packet, state: &SocketState) {
        if state.dup_ack != DUPLICATE_ACK_THRESHOLD
            && sacked_segment_count(&state.sacked_bytes, SMSS) >= u64::from(DUPLICATE_ACK_THRESHOLD)
        {
            self.packets.push(packet.clone());
        }
    }
}
