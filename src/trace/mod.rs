//! 抓包轨迹模块
//!
//! 此模块定义回放所需的已解码数据包记录、TCP 标志/选项、
//! 跨抓包比对用的包标识，以及内存中的抓包文件（支持 JSON 加载）。

// 子模块声明
mod capture;
mod error;
mod flags;
mod id;
mod packet;

// 重新导出公共接口
pub use capture::Capture;
pub use error::TraceError;
pub use flags::TcpFlags;
pub use id::{Communication, PacketKey};
pub use packet::{Packet, TcpOptions, TcpTimestamp};
