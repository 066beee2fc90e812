//! 回放事件观察者
//!
//! 回放引擎在每个协议事件上调用这些钩子；默认实现只输出诊断日志，
//! 具体观察者只覆盖自己关心的钩子。状态以只读引用传入，观察者须在回调内同步读取。

use tracing::debug;

use crate::trace::Packet;

use super::state::{SackedByteRange, SocketState};

pub trait ReplayObserver {
    /// 新数据首次发送（此时 `high_tx_mark` 尚未更新）
    fn on_new_send(&mut self, packet: &Packet, state: &SocketState) {
        debug!(seq = packet.seq, high_tx_mark = state.high_tx_mark, "新发送");
    }

    /// 快速/SACK 触发的重传
    fn on_retransmission(&mut self, packet: &Packet, state: &SocketState) {
        debug!(
            seq = packet.seq,
            recovery_number = state.recovery_number,
            "重传"
        );
    }

    /// 超时重传
    fn on_retransmission_timeout(&mut self, packet: &Packet, state: &SocketState) {
        debug!(
            seq = packet.seq,
            last_ack_timestamp = state.last_ack_timestamp,
            "超时重传"
        );
    }

    /// 新的累计 ACK（此时 `last_acked_seq` 尚未更新）
    fn on_ack(&mut self, packet: &Packet, state: &SocketState) {
        debug!(ack = packet.ack, last_acked_seq = state.last_acked_seq, "ACK");
    }

    fn on_dup_ack(&mut self, packet: &Packet, state: &SocketState) {
        debug!(ack = packet.ack, dup_ack = state.dup_ack, "重复 ACK");
    }

    /// SACK 区间集合发生变化（此时 `sacked_bytes` 仍是旧值）
    fn on_new_sack(&mut self, ranges: &[SackedByteRange], state: &SocketState) {
        debug!(?ranges, previous = ?state.sacked_bytes, "新的 SACK 区间");
    }

    fn on_clear_dup_acks(&mut self, state: &SocketState) {
        debug!(dup_ack = state.dup_ack, "清除重复 ACK 计数");
    }

    /// 段首次加入记分板
    fn on_scoreboard_add(&mut self, segment: u64, _state: &SocketState) {
        debug!(segment, "记分板新增");
    }

    /// 进入恢复（状态字段已更新）
    fn on_enter_recovery(&mut self, state: &SocketState) {
        debug!(
            recovery_point = state.recovery_point,
            high_rtx = state.high_rtx,
            "进入恢复"
        );
    }

    /// 退出恢复（状态字段尚未清零）
    fn on_exit_recovery(&mut self, state: &SocketState) {
        debug!(recovery_point = state.recovery_point, "退出恢复");
    }
}

impl<O: ReplayObserver + ?Sized> ReplayObserver for &mut O {
    fn on_new_send(&mut self, packet: &Packet, state: &SocketState) {
        (**self).on_new_send(packet, state)
    }

    fn on_retransmission(&mut self, packet: &Packet, state: &SocketState) {
        (**self).on_retransmission(packet, state)
    }

    fn on_retransmission_timeout(&mut self, packet: &Packet, state: &SocketState) {
        (**self).on_retransmission_timeout(packet, state)
    }

    fn on_ack(&mut self, packet: &Packet, state: &SocketState) {
        (**self).on_ack(packet, state)
    }

    fn on_dup_ack(&mut self, packet: &Packet, state: &SocketState) {
        (**self).on_dup_ack(packet, state)
    }

    fn on_new_sack(&mut self, ranges: &[SackedByteRange], state: &SocketState) {
        (**self).on_new_sack(ranges, state)
    }

    fn on_clear_dup_acks(&mut self, state: &SocketState) {
        (**self).on_clear_dup_acks(state)
    }

    fn on_scoreboard_add(&mut self, segment: u64, state: &SocketState) {
        (**self).on_scoreboard_add(segment, state)
    }

    fn on_enter_recovery(&mut self, state: &SocketState) {
        (**self).on_enter_recovery(state)
    }

    fn on_exit_recovery(&mut self, state: &SocketState) {
        (**self).on_exit_recovery(state)
    }
}

/// 扇出：同一事件流依次交给两个观察者
impl<A: ReplayObserver, B: ReplayObserver> ReplayObserver for (A, B) {
    fn on_new_send(&mut self, packet: &Packet, state: &SocketState) {
        self.0.on_new_send(packet, state);
        self.1.on_new_send(packet, state);
    }

    fn on_retransmission(&mut self, packet: &Packet, state: &SocketState) {
        self.0.on_retransmission(packet, state);
        self.1.on_retransmission(packet, state);
    }

    fn on_retransmission_timeout(&mut self, packet: &Packet, state: &SocketState) {
        self.0.on_retransmission_timeout(packet, state);
        self.1.on_retransmission_timeout(packet, state);
    }

    fn on_ack(&mut self, packet: &Packet, state: &SocketState) {
        self.0.on_ack(packet, state);
        self.1.on_ack(packet, state);
    }

    fn on_dup_ack(&mut self, packet: &Packet, state: &SocketState) {
        self.0.on_dup_ack(packet, state);
        self.1.on_dup_ack(packet, state);
    }

    fn on_new_sack(&mut self, ranges: &[SackedByteRange], state: &SocketState) {
        self.0.on_new_sack(ranges, state);
        self.1.on_new_sack(ranges, state);
    }

    fn on_clear_dup_acks(&mut self, state: &SocketState) {
        self.0.on_clear_dup_acks(state);
        self.1.on_clear_dup_acks(state);
    }

    fn on_scoreboard_add(&mut self, segment: u64, state: &SocketState) {
        self.0.on_scoreboard_add(segment, state);
        self.1.on_scoreboard_add(segment, state);
    }

    fn on_enter_recovery(&mut self, state: &SocketState) {
        self.0.on_enter_recovery(state);
        self.1.on_enter_recovery(state);
    }

    fn on_exit_recovery(&mut self, state: &SocketState) {
        self.0.on_exit_recovery(state);
        self.1.on_exit_recovery(state);
    }
}
