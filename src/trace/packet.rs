//! 数据包记录
//!
//! 已由外部解码层解析好的 IP/TCP 字段；回放引擎只读使用。

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use super::flags::TcpFlags;
use super::id::PacketKey;

/// TCP 时间戳选项：`(TSval, TSecr)`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TcpTimestamp(pub u32, pub u32);

/// 回放关心的 TCP 选项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TcpOptions {
    /// SACK 块：原始 `(left edge, right edge)` 字节区间（左闭右开），顺序同线上
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sack: Option<Vec<(u64, u64)>>,
    /// 时间戳选项；用于区分同 seq 的不同副本
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<TcpTimestamp>,
}

/// 一个已解码的 TCP/IP 数据包
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    pub src: IpAddr,
    pub dst: IpAddr,
    pub seq: u64,
    pub ack: u64,
    #[serde(default)]
    pub flags: TcpFlags,
    #[serde(default)]
    pub options: TcpOptions,
    /// 是否携带应用层载荷
    #[serde(default)]
    pub payload: bool,
    /// 抓包时间戳（秒）
    pub time: f64,
}

impl Packet {
    /// 跨抓包比对用的标识 `(seq, ack, timestamp)`
    pub fn key(&self) -> PacketKey {
        PacketKey {
            seq: self.seq,
            ack: self.ack,
            timestamp: self.options.timestamp,
        }
    }

    /// 简短摘要（用于日志）
    pub fn summary(&self) -> String {
        format!(
            "{} > {} seq={} ack={} flags={:#06x} payload={} t={:.6}",
            self.src, self.dst, self.seq, self.ack, self.flags.bits(), self.payload, self.time
        )
    }
}
