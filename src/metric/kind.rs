use serde::{Deserialize, Serialize};

use crate::capture::{
    DroppedRetransmittedPacketCapture, RecoveryDurationCapture, RtoCounter, RtoWaitingForUnsent,
    SpuriousOooRtoCapture, WaitTimeAfterRto,
};

use super::flow_run::FlowRun;

/// 可计算的指标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    FlowCompletionTime,
    PacketLoss,
    PacketsLost,
    RtoWaitTime,
    RtoWaitTimeForUnsent,
    RtoCount,
    RecoveryTime,
    DroppedRetransmittedPackets,
    LongestSpuriousRetransmissionsBeforeRto,
    SpuriousRetransmissionsFromReordering,
}

fn packet_loss_percent(at_source: usize, at_destination: usize) -> Option<f64> {
    if at_source == 0 {
        return None;
    }
    Some((1.0 - at_destination as f64 / at_source as f64) * 100.0)
}

impl Metric {
    pub const ALL: [Metric; 10] = [
        Metric::FlowCompletionTime,
        Metric::PacketLoss,
        Metric::PacketsLost,
        Metric::RtoWaitTime,
        Metric::RtoWaitTimeForUnsent,
        Metric::RtoCount,
        Metric::RecoveryTime,
        Metric::DroppedRetransmittedPackets,
        Metric::LongestSpuriousRetransmissionsBeforeRto,
        Metric::SpuriousRetransmissionsFromReordering,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Metric::FlowCompletionTime => "Flow Completion Time",
            Metric::PacketLoss => "Packet Loss",
            Metric::PacketsLost => "Packets Lost",
            Metric::RtoWaitTime => "RTO Wait Time",
            Metric::RtoWaitTimeForUnsent => "RTO Wait Time for Unsent",
            Metric::RtoCount => "RTO Count",
            Metric::RecoveryTime => "Recovery Time",
            Metric::DroppedRetransmittedPackets => "Dropped Retransmitted Packets",
            Metric::LongestSpuriousRetransmissionsBeforeRto => {
                "Longest Spurious Retransmissions Before RTO"
            }
            Metric::SpuriousRetransmissionsFromReordering => {
                "Spurious Retransmissions From Reordering"
            }
        }
    }

    /// 计算该指标；无定义时（例如流未结束、没有发送任何包）返回 `None`
    pub fn calculate(self, run: &FlowRun<'_>) -> Option<f64> {
        match self {
            Metric::FlowCompletionTime => run
                .receiver
                .flow_completion_time(run.addresses.source, run.addresses.destination),
            Metric::PacketLoss => packet_loss_percent(
                run.packets_sent_by_source(),
                run.packets_received_from_source(),
            ),
            Metric::PacketsLost => {
                let sent = run.packets_sent_by_source() as f64;
                let received = run.packets_received_from_source() as f64;
                Some(sent - received)
            }
            Metric::RtoWaitTime => {
                let mut capture = WaitTimeAfterRto::default();
                run.replay(&mut capture);
                Some(capture.wait_time)
            }
            Metric::RtoWaitTimeForUnsent => {
                let mut capture = RtoWaitingForUnsent::new(run.unsent_bytes_threshold);
                run.replay(&mut capture);
                Some(capture.wait_time)
            }
            Metric::RtoCount => {
                let mut capture = RtoCounter::default();
                run.replay(&mut capture);
                Some(capture.count as f64)
            }
            Metric::RecoveryTime => {
                let mut capture = RecoveryDurationCapture::default();
                run.replay(&mut capture);
                Some(capture.total_time)
            }
            Metric::DroppedRetransmittedPackets => {
                let mut capture = DroppedRetransmittedPacketCapture::new();
                run.replay(&mut capture);
                Some(capture.dropped_packets.len() as f64)
            }
            Metric::LongestSpuriousRetransmissionsBeforeRto => {
                let mut capture =
                    SpuriousOooRtoCapture::new(run.spurious_ooo_packets().iter().copied());
                run.replay(&mut capture);
                Some(capture.longest_spurious_ooo_burst_count as f64)
            }
            Metric::SpuriousRetransmissionsFromReordering => {
                let mut capture =
                    SpuriousOooRtoCapture::new(run.spurious_ooo_packets().iter().copied());
                run.replay(&mut capture);
                Some(capture.spurious_ooo_retransmissions as f64)
            }
        }
    }
}
