//! String-topic publish/subscribe
//!
//! Used by the session for exactly one signal: the quit request.

use std::collections::HashMap;

/// Topic published when the player asks to quit
pub const QUIT_TOPIC: &str = "Shutdown";

type Handler = Box<dyn FnMut(&str) -> bool>;

/// Synchronous event bus
#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<String, Vec<Handler>>,
    /// Topics published since the last `take_published`
    published: Vec<String>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for `topic`. Handlers run in subscription order; one
    /// returning `true` consumes the event and stops propagation.
    pub fn subscribe(&mut self, topic: &str, handler: impl FnMut(&str) -> bool + 'static) {
        self.subscribers
            .entry(topic.to_string())
            .or_default()
            .push(Box::new(handler));
    }

    /// Deliver `topic` to its subscribers; returns whether any consumed it
    pub fn publish(&mut self, topic: &str) -> bool {
        log::debug!("Event published: {}", topic);
        self.published.push(topic.to_string());
        let Some(handlers) = self.subscribers.get_mut(topic) else {
            return false;
        };
        handlers.iter_mut().any(|handler| handler(topic))
    }

    /// Drain the record of published topics
    pub fn take_published(&mut self) -> Vec<String> {
        std::mem::take(&mut self.published)
    }

    pub fn was_published(&self, topic: &str) -> bool {
        self.published.iter().any(|t| t == topic)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("topics", &self.subscribers.keys().collect::<Vec<_>>())
            .field("published", &self.published)
            .finish()
    }
}
