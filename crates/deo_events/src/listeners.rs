//! Registry of input listeners.
//!
//! Several observers can watch the same event stream (the input store, a
//! debug overlay, a recorder in tests) without overwriting each other.

use crate::InputEvent;

/// Token returned by [`InputListeners::subscribe`]; pass it back to
/// [`InputListeners::unsubscribe`] to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&InputEvent)>;

#[derive(Default)]
pub struct InputListeners {
    next_id: u64,
    entries: Vec<(ListenerId, Listener)>,
}

impl InputListeners {
    pub fn new() -> Self {
        Default::default()
    }

    /// Register a listener.  Listeners run in subscription order.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&InputEvent) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener; returns `false` if the id was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn dispatch(&mut self, event: &InputEvent) {
        for (_, listener) in self.entries.iter_mut() {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
