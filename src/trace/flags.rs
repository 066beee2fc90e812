//! TCP 标志位
//!
//! 与抓包中 TCP 头部 flags 字段同口径的位集合；JSON 中按原始整数读写。

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// TCP 头部标志位（保留未命名的比特位）。
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(from = "u16", into = "u16")]
    pub struct TcpFlags: u16 {
        const FIN = 0b00_0000_0001;
        const SYN = 0b00_0000_0010;
        const PSH = 0b00_0000_1000;
        const ACK = 0b00_0001_0000;
    }
}

impl TcpFlags {
    pub fn is_ack(self) -> bool {
        self.contains(TcpFlags::ACK)
    }
}

impl Default for TcpFlags {
    fn default() -> Self {
        TcpFlags::empty()
    }
}

impl From<u16> for TcpFlags {
    fn from(bits: u16) -> Self {
        TcpFlags::from_bits_retain(bits)
    }
}

impl From<TcpFlags> for u16 {
    fn from(flags: TcpFlags) -> Self {
        flags.bits()
    }
}
