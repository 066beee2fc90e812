//! 多个分析器结果合并为带标签的包集合
//!
//! 按分析器顺序依次筛选；一个包只归入第一个报告它的分析器。

use std::collections::HashSet;
use std::net::IpAddr;

use tracing::debug;

use crate::trace::Packet;

use super::PacketAnalyzer;

/// 一个分析器名下的包
#[derive(Debug, Clone)]
pub struct Condition {
    pub name: String,
    pub packets: Vec<Packet>,
}

pub fn build_conditions(
    analyzers: &[&dyn PacketAnalyzer],
    source: IpAddr,
    destination: IpAddr,
) -> Vec<Condition> {
    // (seq, ack, 抓包时间比特位)
    let mut filtered: HashSet<(u64, u64, u64)> = HashSet::new();
    let mut conditions = Vec::with_capacity(analyzers.len());

    for analyzer in analyzers {
        let packets = analyzer.filter_packets(source, destination);
        let identity = |p: &Packet| (p.seq, p.ack, p.time.to_bits());
        let fresh: Vec<Packet> = packets
            .iter()
            .filter(|p| !filtered.contains(&identity(*p)))
            .cloned()
            .collect();
        filtered.extend(packets.iter().map(identity));

        debug!(
            analyzer = analyzer.name(),
            reported = packets.len(),
            kept = fresh.len(),
            "条件筛选"
        );
        conditions.push(Condition {
            name: analyzer.name().to_string(),
            packets: fresh,
        });
    }
    conditions
}
