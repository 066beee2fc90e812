use std::cell::OnceCell;
use std::collections::HashSet;

use crate::analyze::{PacketAnalyzer, SpuriousReorderRetransmissionAnalyzer};
use crate::replay::{ReplayConfig, ReplayObserver, TcpSourceReplayer, UNSENT_BYTES_THRESHOLD};
use crate::trace::{Capture, Communication, PacketKey};

/// 一条流的一次运行
#[derive(Debug)]
pub struct FlowRun<'a> {
    pub sender: &'a Capture,
    pub receiver: &'a Capture,
    pub addresses: Communication,
    pub cfg: ReplayConfig,
    /// unsent RTO 等待时间的字节阈值
    pub unsent_bytes_threshold: u64,
    spurious_ooo: OnceCell<HashSet<PacketKey>>,
}

impl<'a> FlowRun<'a> {
    pub fn new(sender: &'a Capture, receiver: &'a Capture, addresses: Communication) -> Self {
        Self {
            sender,
            receiver,
            addresses,
            cfg: ReplayConfig::default(),
            unsent_bytes_threshold: UNSENT_BYTES_THRESHOLD,
            spurious_ooo: OnceCell::new(),
        }
    }

    pub fn with_config(mut self, cfg: ReplayConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn with_unsent_bytes_threshold(mut self, bytes: u64) -> Self {
        self.unsent_bytes_threshold = bytes;
        self
    }

    /// 用发送端抓包回放一遍，事件交给 `observer`
    pub fn replay<O: ReplayObserver>(&self, observer: O) {
        TcpSourceReplayer::with_config(
            self.sender.packets(),
            self.addresses.source,
            self.addresses.destination,
            observer,
            self.cfg.clone(),
        )
        .run();
    }

    /// 乱序引起的伪重传（首次使用时计算）
    pub fn spurious_ooo_packets(&self) -> &HashSet<PacketKey> {
        self.spurious_ooo.get_or_init(|| {
            SpuriousReorderRetransmissionAnalyzer::new(self.sender, self.receiver)
                .filter_packets(self.addresses.source, self.addresses.destination)
                .iter()
                .map(|p| p.key())
                .collect()
        })
    }

    pub fn packets_sent_by_source(&self) -> usize {
        self.sender
            .number_of_packets_from_source(self.addresses.source)
    }

    pub fn packets_received_from_source(&self) -> usize {
        self.receiver
            .number_of_packets_from_source(self.addresses.source)
    }
}
