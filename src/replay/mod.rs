//! 发送端回放模块
//!
//! 此模块包含回放核心组件：发送端套接字状态、SACK/记分板工具函数、
//! 事件观察者接口与回放引擎本身。

// 子模块声明
mod config;
mod observer;
mod replayer;
mod sack;
mod state;

// 重新导出公共接口
pub use config::{
    DUPLICATE_ACK_THRESHOLD, RTO_IDLE_THRESHOLD, ReplayConfig, SMSS, TIMESTAMP_TOLERANCE,
    UNSENT_BYTES_THRESHOLD,
};
pub use observer::ReplayObserver;
pub use replayer::TcpSourceReplayer;
pub use sack::{dropped_segments, parse_sack_ranges, sacked_segment_count, segments_covered};
pub use state::{SackedByteRange, SocketState};
