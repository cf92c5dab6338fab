use std::any::{Any, TypeId};
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::Mutex;

/// System-wide event bus
#[derive(Clone)]
pub struct EventBus {
    handlers: Arc<Mutex<AHashMap<TypeId, Vec<Box<dyn EventHandler>>>>>,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send + Sync {
    fn handle(&mut self, event: &dyn Event);
}

/// Import wizard events
pub mod events {
    use super::Event;

    /// The wizard moved between steps
    #[derive(Debug, Clone)]
    pub struct ImportStepChanged {
        pub from: String,
        pub to: String,
    }

    /// Schema inference produced tables for the current file
    #[derive(Debug, Clone)]
    pub struct SchemaInferred {
        pub file_name: String,
        pub table_count: usize,
        pub column_count: usize,
    }

    /// An import step failed
    #[derive(Debug, Clone)]
    pub struct ImportFailed {
        pub step: String,
        pub error: String,
    }

    /// A submission was accepted by the conversion service
    #[derive(Debug, Clone)]
    pub struct ImportCompleted {
        pub display_name: String,
        pub dataset_key: Option<String>,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(ImportStepChanged, SchemaInferred, ImportFailed, ImportCompleted);
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
        }
    }

    /// Subscribe a raw handler to events of a specific type
    pub fn subscribe_handler<E: Event>(&self, handler: Box<dyn EventHandler>) {
        let mut handlers = self.handlers.lock();
        handlers.entry(TypeId::of::<E>()).or_default().push(handler);
    }

    /// Subscribe a closure to events of a specific type
    pub fn subscribe<E, F>(&self, f: F)
    where
        E: Event,
        F: FnMut(&E) + Send + Sync + 'static,
    {
        self.subscribe_handler::<E>(Box::new(TypedHandler {
            handler: f,
            _event: std::marker::PhantomData::<fn(&E)>,
        }));
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        tracing::trace!("Publishing {}", std::any::type_name::<E>());
        let mut handlers = self.handlers.lock();

        if let Some(event_handlers) = handlers.get_mut(&TypeId::of::<E>()) {
            for handler in event_handlers.iter_mut() {
                handler.handle(&event);
            }
        }
    }

    /// Number of handlers registered for an event type
    pub fn handler_count<E: Event>(&self) -> usize {
        self.handlers
            .lock()
            .get(&TypeId::of::<E>())
            .map(Vec::len)
            .unwrap_or(0)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Adapts a closure over a concrete event type to `EventHandler`
struct TypedHandler<E, F> {
    handler: F,
    _event: std::marker::PhantomData<fn(&E)>,
}

impl<E, F> EventHandler for TypedHandler<E, F>
where
    E: Event,
    F: FnMut(&E) + Send + Sync,
{
    fn handle(&mut self, event: &dyn Event) {
        if let Some(event) = event.as_any().downcast_ref::<E>() {
            (self.handler)(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::events::{ImportFailed, ImportStepChanged};
    use super::*;

    #[test]
    fn test_publish_reaches_typed_subscribers_only() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = seen.clone();
        bus.subscribe::<ImportStepChanged, _>(move |event| {
            sink.lock().push(format!("{}->{}", event.from, event.to));
        });

        bus.publish(ImportStepChanged {
            from: "name".into(),
            to: "type".into(),
        });
        bus.publish(ImportFailed {
            step: "upload".into(),
            error: "boom".into(),
        });

        assert_eq!(*seen.lock(), vec!["name->type".to_string()]);
        assert_eq!(bus.handler_count::<ImportStepChanged>(), 1);
        assert_eq!(bus.handler_count::<ImportFailed>(), 0);
    }
}
