//! 抓包文件
//!
//! 一个链路端点上的全部数据包（按抓包顺序），以及按源地址过滤等查询。

use std::collections::BTreeSet;
use std::fs;
use std::net::IpAddr;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::TraceError;
use super::flags::TcpFlags;
use super::id::Communication;
use super::packet::Packet;

/// 内存中的抓包（已完全物化，回放前一次性读入）
#[derive(Debug, Clone, Default)]
pub struct Capture {
    path: Option<PathBuf>,
    packets: Vec<Packet>,
}

impl Capture {
    pub fn new(packets: Vec<Packet>) -> Self {
        Self {
            path: None,
            packets,
        }
    }

    /// 从 JSON 数组加载（每个元素是一个 [`Packet`]）
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref().to_path_buf();
        let raw = fs::read_to_string(&path).map_err(|source| TraceError::Io {
            path: path.clone(),
            source,
        })?;
        let packets: Vec<Packet> =
            serde_json::from_str(&raw).map_err(|source| TraceError::Decode {
                path: path.clone(),
                source,
            })?;
        debug!(path = %path.display(), packets = packets.len(), "加载抓包");
        Ok(Self {
            path: Some(path),
            packets,
        })
    }

    /// 来源文件（若从磁盘加载）
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn packets(&self) -> &[Packet] {
        &self.packets
    }

    pub fn len(&self) -> usize {
        self.packets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// 源地址为 `source` 的全部数据包（保持抓包顺序）
    pub fn packets_from(&self, source: IpAddr) -> Vec<&Packet> {
        self.packets.iter().filter(|p| p.src == source).collect()
    }

    pub fn number_of_packets_from_source(&self, source: IpAddr) -> usize {
        self.packets.iter().filter(|p| p.src == source).count()
    }

    /// 第一个包的 (源, 目的)；空抓包返回 `None`
    pub fn first_addresses(&self) -> Option<Communication> {
        self.packets.first().map(|p| Communication {
            source: p.src,
            destination: p.dst,
        })
    }

    /// 出现过的全部源地址（去重、有序）
    pub fn addresses(&self) -> Vec<IpAddr> {
        self.packets
            .iter()
            .map(|p| p.src)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// 流完成时间：目的端发往源端的第一个 FIN+ACK 包的抓包时间
    pub fn flow_completion_time(&self, source: IpAddr, destination: IpAddr) -> Option<f64> {
        let fin_ack = TcpFlags::FIN | TcpFlags::ACK;
        self.packets
            .iter()
            .find(|p| p.src == destination && p.dst == source && p.flags.contains(fin_ack))
            .map(|p| p.time)
    }
}
