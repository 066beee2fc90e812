use crate::replay::{ReplayObserver, SocketState};
use crate::trace::Packet;

/// 超时重传次数
#[derive(Debug, Default)]
pub struct RtoCounter {
    pub count: u64,
}

impl ReplayObserver for RtoCounter {
    fn on_retransmission_timeout(&mut self, _packet: &Packet, _state: &SocketState) {
        self.count += 1;
    }
}
