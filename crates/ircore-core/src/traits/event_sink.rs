use crate::events::Event;

/// Event-emission port. `ircore-observability` provides the real handler
/// registry; engines upstream of it only need this to stay decoupled from
/// its dependency on a concrete subscriber set.
pub trait IEventSink: Send + Sync {
    fn emit(&self, event: Event);
}

/// No-op sink used as the default when a caller doesn't wire one up.
pub struct NullEventSink;

impl IEventSink for NullEventSink {
    fn emit(&self, _event: Event) {}
}
