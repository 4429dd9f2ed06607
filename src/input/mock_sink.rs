//! Mock input sink for testing.
//!
//! This sink logs and records raised events instead of delivering them to a
//! host input system. It also keeps every pointer it handed out, so tests can
//! check the controller back-references.

use super::{
    HandleAllocator, Handedness, InputEvent, InputSink, InputSource, InputSourceType, PointerHandle,
    SupportedControllerType,
};
use log::info;

/// Default number of pointers handed out per controller
pub const DEFAULT_POINTERS_PER_CONTROLLER: usize = 2;

/// Mock sink that records events instead of delivering them.
#[derive(Debug)]
pub struct MockInputSink {
    allocator: HandleAllocator,
    events: Vec<InputEvent>,
    issued_pointers: Vec<PointerHandle>,
}

impl MockInputSink {
    /// Create a new mock sink.
    pub fn new() -> Self {
        Self::with_pointers(DEFAULT_POINTERS_PER_CONTROLLER)
    }

    /// Create a mock sink handing out `count` pointers per controller.
    pub fn with_pointers(count: usize) -> Self {
        Self {
            allocator: HandleAllocator::new(count),
            events: Vec::new(),
            issued_pointers: Vec::new(),
        }
    }

    /// Events recorded so far, oldest first.
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Take the recorded events, leaving the log empty.
    pub fn take_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Every pointer handed out so far.
    pub fn issued_pointers(&self) -> &[PointerHandle] {
        &self.issued_pointers
    }

    /// Count recorded events matching a predicate.
    pub fn count(&self, pred: impl Fn(&InputEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl Default for MockInputSink {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSink for MockInputSink {
    fn request_pointers(
        &mut self,
        controller_type: SupportedControllerType,
        handedness: Handedness,
    ) -> Vec<PointerHandle> {
        let pointers = self.allocator.pointers();
        info!(
            "[MOCK SINK] {} pointer(s) for {} {}",
            pointers.len(),
            controller_type,
            handedness
        );
        self.issued_pointers.extend(pointers.iter().cloned());
        pointers
    }

    fn request_input_source(
        &mut self,
        name: &str,
        pointers: Vec<PointerHandle>,
        source_type: InputSourceType,
    ) -> InputSource {
        let source = self.allocator.source(name, pointers, source_type);
        info!("[MOCK SINK] New input source {:?}: {}", source.id, source.name);
        source
    }

    fn raise(&mut self, event: InputEvent) {
        info!("[MOCK SINK] {:?}", event);
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{InputAction, SourceId};

    #[test]
    fn mock_sink_records_in_order() {
        let mut sink = MockInputSink::new();
        let pointers = sink.request_pointers(SupportedControllerType::GenericOpenVr, Handedness::Left);
        assert_eq!(pointers.len(), DEFAULT_POINTERS_PER_CONTROLLER);

        let source = sink.request_input_source("test", pointers, InputSourceType::Controller);
        sink.raise_input_down(&source, Handedness::Left, InputAction::SELECT);
        sink.raise_input_up(&source, Handedness::Left, InputAction::SELECT);

        assert_eq!(
            sink.take_events(),
            vec![
                InputEvent::InputDown { source: SourceId(1), handedness: Handedness::Left, action: InputAction::SELECT },
                InputEvent::InputUp { source: SourceId(1), handedness: Handedness::Left, action: InputAction::SELECT },
            ]
        );
        assert!(sink.events().is_empty());
    }

    #[test]
    fn mock_sink_without_pointers() {
        let mut sink = MockInputSink::with_pointers(0);
        let pointers = sink.request_pointers(SupportedControllerType::GenericOpenVr, Handedness::Other);
        assert!(pointers.is_empty());
        assert!(sink.issued_pointers().is_empty());
    }
}
