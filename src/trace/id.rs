//! 标识符类型
//!
//! 定义跨抓包比对的包标识与流的地址对。

use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use super::packet::TcpTimestamp;

/// 包标识：重传副本共享 seq，但时间戳选项不同，因此三元组可代替真正的包 ID。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PacketKey {
    pub seq: u64,
    pub ack: u64,
    pub timestamp: Option<TcpTimestamp>,
}

/// 一条流的 (源, 目的) 地址对
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Communication {
    pub source: IpAddr,
    pub destination: IpAddr,
}
