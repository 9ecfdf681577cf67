use std::{
    any::{Any, TypeId},
    collections::{BTreeMap, HashMap},
    marker::PhantomData,
};

/// Abstraction for event connected to the D domain.
pub trait Event: Any + Send + Sync {
    type Domain: 'static;
}

/// Handle event synchronously with the event publish.
pub trait EventHandler<E>: Send + Sync + 'static
where
    E: Event,
{
    fn handle(&mut self, event: &E);
}

impl<E, F> EventHandler<E> for F
where
    E: Event,
    F: FnMut(&E) + Send + Sync + 'static,
{
    fn handle(&mut self, event: &E) {
        self(event)
    }
}

/// Subscription handle returned by [`EventBus::subscribe`]. Ids are increasing in subscription order.
#[derive(Eq, Hash, PartialEq, PartialOrd, Ord, Clone, Copy, Debug, Default)]
pub struct EventHandlerId(usize);

type BoxedHandler = Box<dyn FnMut(&dyn Any) + Send + Sync>;
type HandlerMap = BTreeMap<EventHandlerId, BoxedHandler>;

/// Typed publish/subscribe hub. Every event type has its own subscription list and
/// handlers of a list are called in subscription order.
///
/// Publishing borrows the bus mutably, thus handlers cannot alter the subscriptions while an
/// event is delivered.
pub struct EventBus<D: Send + Sync + 'static> {
    next_handler_id: usize,
    event_handlers: HashMap<TypeId, HandlerMap>,
    domain: PhantomData<D>,
}

impl<D> Default for EventBus<D>
where
    D: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<D> EventBus<D>
where
    D: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            next_handler_id: 1,
            event_handlers: HashMap::new(),
            domain: PhantomData,
        }
    }

    pub fn subscribe<E, H>(&mut self, mut handler: H) -> EventHandlerId
    where
        E: Event<Domain = D>,
        H: EventHandler<E>,
    {
        let handler: BoxedHandler = Box::new(move |e: &dyn Any| match e.downcast_ref::<E>() {
            Some(e) => handler.handle(e),
            None => log::error!("Event type mismatch for {}", std::any::type_name::<E>()),
        });

        let handler_id = EventHandlerId(self.next_handler_id);
        self.next_handler_id += 1;

        self.event_handlers
            .entry(TypeId::of::<E>())
            .or_default()
            .insert(handler_id, handler);

        handler_id
    }

    /// Remove a handler. Return false if the id was not subscribed.
    pub fn unsubscribe(&mut self, handler_id: &EventHandlerId) -> bool {
        let mut removed = false;
        for handlers in self.event_handlers.values_mut() {
            removed |= handlers.remove(handler_id).is_some();
        }
        self.event_handlers.retain(|_, handlers| !handlers.is_empty());
        removed
    }

    /// Publish an event and return the number of handlers it was delivered to.
    pub fn publish<E>(&mut self, event: &E) -> usize
    where
        E: Event<Domain = D>,
    {
        let event: &dyn Any = event;

        if let Some(handlers) = self.event_handlers.get_mut(&TypeId::of::<E>()) {
            for handler in handlers.values_mut() {
                (handler)(event);
            }
            handlers.len()
        } else {
            0
        }
    }

    /// Number of handlers subscribed to the event type.
    pub fn handler_count<E>(&self) -> usize
    where
        E: Event<Domain = D>,
    {
        self.event_handlers
            .get(&TypeId::of::<E>())
            .map(|handlers| handlers.len())
            .unwrap_or(0)
    }

    pub fn total_handler_count(&self) -> usize {
        self.event_handlers.values().map(|handlers| handlers.len()).sum()
    }

    pub fn clear(&mut self) {
        self.event_handlers.clear();
    }
}
