//! 恢复期时长
//!
//! 以进入/退出恢复的成对事件打点，累计处于恢复状态的总时长。

use crate::replay::{ReplayObserver, SocketState};

#[derive(Debug, Default)]
pub struct RecoveryDurationCapture {
    entered_at: Option<f64>,
    /// 已结束恢复期的总时长（秒）
    pub total_time: f64,
    /// 已结束的恢复期个数
    pub episodes: u64,
}

impl RecoveryDurationCapture {
    /// 回放结束时仍未退出的恢复期起点
    pub fn open_since(&self) -> Option<f64> {
        self.entered_at
    }
}

impl ReplayObserver for RecoveryDurationCapture {
    fn on_enter_recovery(&mut self, state: &SocketState) {
        self.entered_at = Some(state.time);
    }

    fn on_exit_recovery(&mut self, state: &SocketState) {
        if let Some(start) = self.entered_at.take() {
            self.total_time += state.time - start;
            self.episodes += 1;
        }
    }
}
