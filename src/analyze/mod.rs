//! 跨抓包分析器
//!
//! 直接比较发送端与接收端的抓包（不经过回放状态机），给出丢包、乱序、
//! 伪重传等“真实”标签；部分分析器借助回放引擎筛选发送端事件。
//! 这些结果作为已知集合输入给观察者，与回放引擎的分类相互校验。

use std::net::IpAddr;

use crate::trace::Packet;

mod conditions;
mod dropped;
mod reorder;
mod sack;
mod spurious;

pub use conditions::{Condition, build_conditions};
pub use dropped::DroppedPacketsAnalyzer;
pub use reorder::PacketOutOfOrderAnalyzer;
pub use sack::{FastRetransmitSackAnalyzer, SingleDupAckRetransmitSackAnalyzer};
pub use spurious::{SpuriousReorderRetransmissionAnalyzer, SpuriousRetransmissionAnalyzer};

/// 包分析器：从一条流中筛出满足某种条件的包
pub trait PacketAnalyzer {
    fn name(&self) -> &str;
    fn filter_packets(&self, source: IpAddr, destination: IpAddr) -> Vec<Packet>;
}
