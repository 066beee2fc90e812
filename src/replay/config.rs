//! 回放参数
//!
//! 这些常量与既有实验结果保持兼容，修改默认值会改变分类结果。

/// 发送端最大报文段长度（字节）
pub const SMSS: u64 = 1446;
/// 重复 ACK 阈值
pub const DUPLICATE_ACK_THRESHOLD: u32 = 3;
/// 距上次 ACK 超过该时长（秒）的重发一律视为超时重传
pub const RTO_IDLE_THRESHOLD: f64 = 0.5;
/// 判断“发送时刻与 ACK 时刻重合”的绝对容差（秒）
pub const TIMESTAMP_TOLERANCE: f64 = 0.001;
/// “未发送数据”阈值（字节）：high_tx_mark 低于该值时的 RTO 才计入 unsent 等待时间
pub const UNSENT_BYTES_THRESHOLD: u64 = 997_000;

#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// 报文段长度（字节），用于记分板与 SACK 空洞的分段
    pub smss: u64,
    /// 重复 ACK 阈值（dup_ack 与 sack_dupacks 的饱和值）
    pub dup_ack_threshold: u32,
    /// 空闲超时阈值（秒）
    pub rto_idle_threshold: f64,
    /// 时间戳邻近容差（秒）
    pub timestamp_tolerance: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            smss: SMSS,
            dup_ack_threshold: DUPLICATE_ACK_THRESHOLD,
            rto_idle_threshold: RTO_IDLE_THRESHOLD,
            timestamp_tolerance: TIMESTAMP_TOLERANCE,
        }
    }
}
