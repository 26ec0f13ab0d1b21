//! Event handler registry implementing [`IEventSink`]. Subscribers are
//! invoked synchronously in registration order; handlers must not block.

use ircore_core::events::Event;
use ircore_core::traits::IEventSink;
use tracing::{debug, error, warn};

pub type EventHandler = Box<dyn Fn(&Event) + Send + Sync>;

#[derive(Default)]
pub struct HandlerRegistry {
    handlers: Vec<EventHandler>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, handler: EventHandler) {
        self.handlers.push(handler);
    }

    fn log_event(event: &Event) {
        match event {
            Event::RebuildError { reason } | Event::VacuumError { reason } => {
                error!(event = event.name(), reason = %reason, "indexing error event");
            }
            Event::ContentChangeError { path, reason } => {
                error!(event = event.name(), path = %path, reason = %reason, "content change error");
            }
            Event::QueueWarning { depth, threshold } => {
                warn!(event = event.name(), depth, threshold, "queue depth warning");
            }
            Event::HealthWarning { component, detail } => {
                warn!(event = event.name(), component = %component, detail = %detail, "health warning");
            }
            Event::HealthCritical { component, detail } => {
                error!(event = event.name(), component = %component, detail = %detail, "health critical");
            }
            other => {
                debug!(event = other.name(), "event");
            }
        }
    }
}

impl IEventSink for HandlerRegistry {
    fn emit(&self, event: Event) {
        Self::log_event(&event);
        for handler in &self.handlers {
            handler(&event);
        }
    }
}
