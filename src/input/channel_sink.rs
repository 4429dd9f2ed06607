//! Channel-backed input sink
//!
//! Forwards every raised event over a bounded `crossbeam-channel`, so a
//! consumer on another thread can process them. Sending never blocks: when
//! the channel is full or closed the event is dropped with a warning.

use super::{
    HandleAllocator, Handedness, InputEvent, InputSink, InputSource, InputSourceType, PointerHandle,
    SupportedControllerType,
};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, warn};

pub struct ChannelInputSink {
    allocator: HandleAllocator,
    sender: Sender<InputEvent>,
    dropped: usize,
}

impl ChannelInputSink {
    /// Create a sink and the receiver for its events
    pub fn new(capacity: usize, pointers_per_controller: usize) -> (Self, Receiver<InputEvent>) {
        let (sender, receiver) = bounded(capacity);
        let sink = Self {
            allocator: HandleAllocator::new(pointers_per_controller),
            sender,
            dropped: 0,
        };
        (sink, receiver)
    }

    /// Number of events dropped because the channel was full or closed
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl InputSink for ChannelInputSink {
    fn request_pointers(
        &mut self,
        controller_type: SupportedControllerType,
        handedness: Handedness,
    ) -> Vec<PointerHandle> {
        debug!("Allocating pointers for {} {}", controller_type, handedness);
        self.allocator.pointers()
    }

    fn request_input_source(
        &mut self,
        name: &str,
        pointers: Vec<PointerHandle>,
        source_type: InputSourceType,
    ) -> InputSource {
        self.allocator.source(name, pointers, source_type)
    }

    fn raise(&mut self, event: InputEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                self.dropped += 1;
                warn!("Event channel full, dropping {:?}", event);
            }
            Err(TrySendError::Disconnected(_)) => {
                self.dropped += 1;
                warn!("Event channel disconnected");
            }
        }
    }
}
