use super::basics::Frame;
use log::{debug, warn};
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};

/// Anything that can show a picture of the screen. The scheduler hands over
/// a copy whenever the screen changed, so implementations are free to keep
/// it around. `render` runs on the tick thread and must not block for long.
pub trait Renderer {
    fn render(&mut self, frame: Frame);
}

/// Passes frames to another thread through a bounded channel. When the
/// consumer falls behind, new frames are dropped instead of stalling the
/// machine.
pub struct ChannelRenderer {
    sender: SyncSender<Frame>,
    dropped: u64,
}

impl ChannelRenderer {
    pub fn new(capacity: usize) -> (ChannelRenderer, Receiver<Frame>) {
        let (sender, receiver) = mpsc::sync_channel(capacity);
        (ChannelRenderer { sender, dropped: 0 }, receiver)
    }

    /// Frames thrown away because the channel was full or closed.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

impl Renderer for ChannelRenderer {
    fn render(&mut self, frame: Frame) {
        match self.sender.try_send(frame) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                self.dropped += 1;
                debug!("renderer busy, dropped frame ({} so far)", self.dropped);
            }
            Err(TrySendError::Disconnected(_)) => {
                self.dropped += 1;
                warn!("renderer disconnected, dropped frame");
            }
        }
    }
}
