//! 发送端 TCP 回放引擎
//!
//! 单遍、事件驱动地走一条流的发送端抓包：维护 [`SocketState`]，
//! 把每个包归类为固定的协议事件之一，并通知观察者。
//!
//! 重发的分类是整个回放中最容易出错的部分：一次重传与一次超时重传在线上看起来完全一样。
//! 这里同时使用两个信号判定超时：
//! - **位置回退**：seq 低于 `high_rtx`、此前已被重传过，且发送时刻不与最近一次 ACK 重合；
//! - **空闲**：距最近一次 ACK 已超过空闲阈值。
//!
//! 两者任一成立即为超时，否则为快速/SACK 重传。

use std::net::IpAddr;

use tracing::{debug, info, trace};

use crate::trace::Packet;

use super::config::ReplayConfig;
use super::observer::ReplayObserver;
use super::sack::{dropped_segments, parse_sack_ranges, segments_covered};
use super::state::SocketState;

pub struct TcpSourceReplayer<'a, O: ReplayObserver> {
    packets: &'a [Packet],
    source: IpAddr,
    destination: IpAddr,
    observer: O,
    cfg: ReplayConfig,
    state: SocketState,
}

impl<'a, O: ReplayObserver> TcpSourceReplayer<'a, O> {
    pub fn new(packets: &'a [Packet], source: IpAddr, destination: IpAddr, observer: O) -> Self {
        Self::with_config(packets, source, destination, observer, ReplayConfig::default())
    }

    pub fn with_config(
        packets: &'a [Packet],
        source: IpAddr,
        destination: IpAddr,
        observer: O,
        cfg: ReplayConfig,
    ) -> Self {
        Self {
            packets,
            source,
            destination,
            observer,
            cfg,
            state: SocketState::default(),
        }
    }

    /// 最近一次 `run` 结束时的状态（只读）
    pub fn state(&self) -> &SocketState {
        &self.state
    }

    /// 按抓包顺序回放全部数据包；每次调用都从全新的状态开始。
    #[tracing::instrument(skip(self), fields(source = %self.source, destination = %self.destination))]
    pub fn run(&mut self) {
        self.state = SocketState::default();
        info!(packets = self.packets.len(), "▶️  开始回放");

        let packets = self.packets;
        let mut repeated_sends = 0_u64;
        for packet in packets {
            self.state.time = packet.time;
            if packet.dst == self.source {
                if !packet.flags.is_ack() {
                    trace!(packet = %packet.summary(), "跳过无 ACK 标志的控制包");
                    continue;
                }
                self.handle_ack(packet);
            } else if packet.src == self.source {
                if self.handle_send(packet) {
                    repeated_sends += 1;
                }
            } else {
                trace!(packet = %packet.summary(), "忽略不属于该流的包");
            }
        }

        info!(
            repeated_sends,
            high_tx_mark = self.state.high_tx_mark,
            recoveries = self.state.recovery_number,
            "✅ 回放完成"
        );
    }

    fn is_dup_ack(&self, packet: &Packet) -> bool {
        packet.flags.is_ack() && packet.ack == self.state.last_acked_seq
    }

    fn increment_dup_ack(&mut self) {
        if self.state.dup_ack < self.cfg.dup_ack_threshold {
            self.state.dup_ack += 1;
        }
    }

    fn clear_dup_acks(&mut self) {
        self.observer.on_clear_dup_acks(&self.state);
        self.state.dup_ack = 0;
        self.state.sack_dupacks.clear();
    }

    fn update_scoreboard(&mut self, segment: u64) {
        if !self.state.scoreboard.contains(&segment) {
            self.observer.on_scoreboard_add(segment, &self.state);
            self.state.scoreboard.insert(segment);
        }
    }

    /// 从旧的累计 ACK 到新 ACK（含）按段长逐段加入记分板
    fn cumulative_ack(&mut self, from: u64, to: u64) {
        let smss = self.cfg.smss.max(1);
        let end = to.saturating_add(smss);
        let mut segment = from;
        while segment < end {
            self.update_scoreboard(segment);
            segment = segment.saturating_add(smss);
        }
    }

    fn handle_sacks(&mut self, packet: &Packet) {
        let sacks = parse_sack_ranges(packet);
        for segment in segments_covered(&sacks, self.cfg.smss) {
            self.update_scoreboard(segment);
        }
        for dropped in dropped_segments(&sacks, self.cfg.smss) {
            let count = self.state.sack_dupacks.entry(dropped).or_insert(0);
            if *count < self.cfg.dup_ack_threshold {
                *count += 1;
            }
        }
        self.increment_dup_ack();

        if sacks != self.state.sacked_bytes {
            self.observer.on_new_sack(&sacks, &self.state);
            self.state.sacked_bytes = sacks;
        }
    }

    fn handle_dup_ack(&mut self, packet: &Packet) {
        self.observer.on_dup_ack(packet, &self.state);
        self.handle_sacks(packet);
    }

    fn handle_new_ack(&mut self, packet: &Packet) {
        self.observer.on_ack(packet, &self.state);
        if self.state.in_recovery && packet.ack > self.state.recovery_point {
            self.exit_recovery();
        }
        self.clear_dup_acks();

        let previous = self.state.last_acked_seq;
        if packet.ack < previous {
            // 乱序到达的旧 ACK：last_acked_seq 不回退
            return;
        }
        self.state.last_acked_seq = packet.ack;
        self.cumulative_ack(previous, packet.ack);
    }

    fn handle_ack(&mut self, packet: &Packet) {
        if self.is_dup_ack(packet) {
            self.handle_dup_ack(packet);
        } else {
            self.handle_new_ack(packet);
        }
        self.state.last_ack_timestamp = packet.time;
    }

    fn handle_new_transmission(&mut self, packet: &Packet) {
        self.observer.on_new_send(packet, &self.state);
        self.state.high_tx_mark = packet.seq;
    }

    fn enter_recovery(&mut self, packet: &Packet) {
        self.state.high_rtx = packet.seq;
        self.state.recovery_point = self.state.high_tx_mark;
        self.state.in_recovery = true;
        self.state.recovery_number += 1;
        self.observer.on_enter_recovery(&self.state);
    }

    fn exit_recovery(&mut self) {
        self.observer.on_exit_recovery(&self.state);
        self.reset_recovery();
    }

    fn reset_recovery(&mut self) {
        self.state.high_rtx = 0;
        self.state.recovery_point = 0;
        self.state.in_recovery = false;
    }

    fn handle_retransmission(&mut self, packet: &Packet) {
        if !self.state.in_recovery {
            self.enter_recovery(packet);
        }
        self.state.high_rtx = self.state.high_rtx.max(packet.seq);
        self.observer.on_retransmission(packet, &self.state);
        self.state
            .retransmitted
            .insert(packet.seq, self.state.recovery_number);
    }

    fn handle_retransmission_timeout(&mut self, packet: &Packet) {
        self.observer.on_retransmission_timeout(packet, &self.state);
        // 超时总会结束当前恢复期；未处于恢复时只清理字段，不发退出事件
        if self.state.in_recovery {
            self.exit_recovery();
        } else {
            self.reset_recovery();
        }
    }

    /// 位置回退或空闲超时，任一成立即判为超时重传
    fn is_retransmission_timeout(&self, packet: &Packet) -> bool {
        let since_ack = packet.time - self.state.last_ack_timestamp;
        let previously_retransmitted = self.state.retransmitted.contains_key(&packet.seq);
        let regressed = packet.seq < self.state.high_rtx
            && previously_retransmitted
            && since_ack.abs() > self.cfg.timestamp_tolerance;
        let idle = since_ack > self.cfg.rto_idle_threshold;

        debug!(
            seq = packet.seq,
            high_rtx = self.state.high_rtx,
            previously_retransmitted,
            since_ack,
            regressed,
            idle,
            "重发分类"
        );
        regressed || idle
    }

    /// 返回该包是否为重发
    fn handle_send(&mut self, packet: &Packet) -> bool {
        if !packet.payload {
            return false;
        }

        let repeated = packet.seq <= self.state.high_tx_mark;
        if !repeated {
            self.handle_new_transmission(packet);
        } else if self.is_retransmission_timeout(packet) {
            self.handle_retransmission_timeout(packet);
        } else {
            self.handle_retransmission(packet);
        }

        self.state
            .last_sent_timestamps
            .insert(packet.seq, packet.time);
        self.state.last_send_timestamp = packet.time;
        repeated
    }
}
