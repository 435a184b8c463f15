//! Player input events and the queue that carries them to the tick thread
//!
//! Events can be produced from any thread through an [`InputSender`]. The
//! tick side keeps the [`InputQueue`] and drains it once at the start of each
//! tick, so a tick never sees half of a burst of input.

use crossbeam_channel::{Receiver, Sender, TrySendError, unbounded};
use serde::{Deserialize, Serialize};

/// Discrete input delivered to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputEvent {
    /// Set vertical velocity to the jump impulse (ignored after game over)
    Jump,
    /// Start a new round (only meaningful after game over)
    Restart,
}

impl InputEvent {
    /// Map a key name from a text front-end. Unknown keys map to `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "" | "space" | "j" | "jump" | "tap" => Some(InputEvent::Jump),
            "r" | "restart" => Some(InputEvent::Restart),
            _ => None,
        }
    }
}

/// Receiving end, owned by whoever ticks the game
#[derive(Debug)]
pub struct InputQueue {
    sender: Sender<InputEvent>,
    receiver: Receiver<InputEvent>,
}

/// Cloneable producer handle
#[derive(Debug, Clone)]
pub struct InputSender {
    sender: Sender<InputEvent>,
}

impl InputSender {
    /// Queue an event. Returns false once the receiving side is gone.
    pub fn send(&self, event: InputEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InputQueue {
    pub fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> InputSender {
        InputSender {
            sender: self.sender.clone(),
        }
    }

    /// Take everything queued so far, in arrival order
    pub fn drain(&self) -> Vec<InputEvent> {
        self.receiver.try_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }
}
