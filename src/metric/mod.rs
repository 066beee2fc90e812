//! 单次运行的指标
//!
//! 一次运行 = 同一条流在发送端与接收端的两份抓包。每个指标把它归约为一个数值；
//! 多个指标共用的分析结果在 [`FlowRun`] 中首次使用时计算并缓存。

mod flow_run;
mod kind;

pub use flow_run::FlowRun;
pub use kind::Metric;
