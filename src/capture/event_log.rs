//! 回放事件记录（用于离线查看/比对）
//!
//! 每个钩子记录为一条结构化 JSON 事件，而不是解析文本日志。

use serde::{Deserialize, Serialize};

use crate::replay::{ReplayObserver, SackedByteRange, SocketState};
use crate::trace::Packet;

/// 回放事件类型
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReplayEventKind {
    NewSend { seq: u64 },
    Retransmission { seq: u64, recovery_number: u64 },
    RetransmissionTimeout { seq: u64 },
    Ack { ack: u64 },
    DupAck { ack: u64, dup_ack: u32 },
    NewSack { ranges: Vec<SackedByteRange> },
    ClearDupAcks,
    ScoreboardAdd { segment: u64 },
    EnterRecovery {
        recovery_point: u64,
        recovery_number: u64,
    },
    ExitRecovery { recovery_point: u64 },
}

/// 一条事件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayEvent {
    /// 回放时间（秒）
    pub t: f64,
    #[serde(flatten)]
    pub kind: ReplayEventKind,
}

/// 把所有事件按发生顺序收集在内存里，回放结束后可整体写出
#[derive(Debug, Default)]
pub struct EventLog {
    pub events: Vec<ReplayEvent>,
}

impl EventLog {
    pub fn push(&mut self, t: f64, kind: ReplayEventKind) {
        self.events.push(ReplayEvent { t, kind });
    }

    /// 某一类事件的个数
    pub fn count(&self, pred: impl Fn(&ReplayEventKind) -> bool) -> usize {
        self.events.iter().filter(|ev| pred(&ev.kind)).count()
    }
}

impl ReplayObserver for EventLog {
    fn on_new_send(&mut self, packet: &Packet, state: &SocketState) {
        self.push(state.time, ReplayEventKind::NewSend { seq: packet.seq });
    }

    fn on_retransmission(&mut self, packet: &Packet, state: &SocketState) {
        self.push(
            state.time,
            ReplayEventKind::Retransmission {
                seq: packet.seq,
                recovery_number: state.recovery_number,
            },
        );
    }

    fn on_retransmission_timeout(&mut self, packet: &Packet, state: &SocketState) {
        self.push(
            state.time,
            ReplayEventKind::RetransmissionTimeout { seq: packet.seq },
        );
    }

    fn on_ack(&mut self, packet: &Packet, state: &SocketState) {
        self.push(state.time, ReplayEventKind::Ack { ack: packet.ack });
    }

    fn on_dup_ack(&mut self, packet: &Packet, state: &SocketState) {
        self.push(
            state.time,
            ReplayEventKind::DupAck {
                ack: packet.ack,
                dup_ack: state.dup_ack,
            },
        );
    }

    fn on_new_sack(&mut self, ranges: &[SackedByteRange], state: &SocketState) {
        self.push(
            state.time,
            ReplayEventKind::NewSack {
                ranges: ranges.to_vec(),
            },
        );
    }

    fn on_clear_dup_acks(&mut self, state: &SocketState) {
        self.push(state.time, ReplayEventKind::ClearDupAcks);
    }

    fn on_scoreboard_add(&mut self, segment: u64, state: &SocketState) {
        self.push(state.time, ReplayEventKind::ScoreboardAdd { segment });
    }

    fn on_enter_recovery(&mut self, state: &SocketState) {
        self.push(
            state.time,
            ReplayEventKind::EnterRecovery {
                recovery_point: state.recovery_point,
                recovery_number: state.recovery_number,
            },
        );
    }

    fn on_exit_recovery(&mut self, state: &SocketState) {
        self.push(
            state.time,
            ReplayEventKind::ExitRecovery {
                recovery_point: state.recovery_point,
            },
        );
    }
}
