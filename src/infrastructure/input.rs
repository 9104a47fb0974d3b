use crate::application::use_cases::InputSource;
use crate::domain::{chart::ScreenPoint, events::InputEvent};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// FIFO input source. Clones share the same queue, so event callbacks can
/// push while the frame loop drains.
#[derive(Debug, Clone, Default)]
pub struct QueuedInput {
    events: Rc<RefCell<VecDeque<InputEvent>>>,
    pointer: Rc<Cell<ScreenPoint>>,
}

impl QueuedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue pre-filled with `events`, pointer at the origin
    pub fn scripted(events: impl IntoIterator<Item = InputEvent>) -> Self {
        let input = Self::new();
        input.extend(events);
        input
    }

    pub fn push(&self, event: InputEvent) {
        self.events.borrow_mut().push_back(event);
    }

    pub fn extend(&self, events: impl IntoIterator<Item = InputEvent>) {
        self.events.borrow_mut().extend(events);
    }

    pub fn set_pointer_position(&self, position: ScreenPoint) {
        self.pointer.set(position);
    }

    pub fn pending(&self) -> usize {
        self.events.borrow().len()
    }
}

impl InputSource for QueuedInput {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.events.borrow_mut().pop_front()
    }

    fn pointer_position(&self) -> ScreenPoint {
        self.pointer.get()
    }
}
