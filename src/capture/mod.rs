//! 观察者实现（capture 变体）
//!
//! 每个变体只覆盖与其指标相关的钩子，并把结果累积在自己的字段里；
//! 回放结束后由调用方读取。

mod bytes_in_flight;
mod dropped_retransmitted;
mod event_log;
mod recovery;
mod rto_count;
mod rto_wait;
mod sack_fast_retransmit;
mod spurious_burst;

pub use bytes_in_flight::{AmountAtTime, TrueBytesInFlightCapture};
pub use dropped_retransmitted::DroppedRetransmittedPacketCapture;
pub use event_log::{EventLog, ReplayEvent, ReplayEventKind};
pub use recovery::RecoveryDurationCapture;
pub use rto_count::RtoCounter;
pub use rto_wait::{RtoWaitingForUnsent, WaitTimeAfterRto};
pub use sack_fast_retransmit::{FastRetransmitSackCapture, SingleDupAckRetransmitCapture};
pub use spurious_burst::SpuriousOooRtoCapture;
