//! Global key listener registration.
//!
//! The palette holds a [`KeyboardSubscription`] only while it is open; dropping
//! the guard detaches the listener, so release is tied to visibility rather
//! than to the lifetime of the palette itself.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct KeyboardHub {
    listeners: Arc<AtomicUsize>,
}

impl KeyboardHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> KeyboardSubscription {
        self.listeners.fetch_add(1, Ordering::SeqCst);
        KeyboardSubscription { listeners: Arc::clone(&self.listeners) }
    }

    pub fn active_listeners(&self) -> usize {
        self.listeners.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct KeyboardSubscription {
    listeners: Arc<AtomicUsize>,
}

impl Drop for KeyboardSubscription {
    fn drop(&mut self) {
        self.listeners.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_the_guard_detaches() {
        let hub = KeyboardHub::new();
        let first = hub.subscribe();
        let second = hub.clone().subscribe();
        assert_eq!(hub.active_listeners(), 2);
        drop(first);
        assert_eq!(hub.active_listeners(), 1);
        drop(second);
        assert_eq!(hub.active_listeners(), 0);
    }
}
