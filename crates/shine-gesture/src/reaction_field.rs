use crate::{event_bus::EventHandlerId, ActionTrigger, ArgumentTrigger, GestureBus, GestureEvent};
use std::sync::{Arc, Mutex};

type ActionCallback = Arc<Mutex<dyn FnMut(ActionTrigger) + Send>>;
type ArgumentCallback = Arc<Mutex<dyn FnMut(ArgumentTrigger, &GestureEvent) + Send>>;

/// A group of triggers forwarded to a shared pair of callbacks.
///
/// Triggers without a matching callback are not subscribed.
#[derive(Default)]
pub struct ReactionField {
    actions: Vec<ActionTrigger>,
    arguments: Vec<ArgumentTrigger>,
    on_action: Option<ActionCallback>,
    on_argument: Option<ArgumentCallback>,
    subscriptions: Vec<EventHandlerId>,
}

impl ReactionField {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field listening to every topic.
    pub fn all() -> Self {
        Self {
            actions: ActionTrigger::ALL.to_vec(),
            arguments: ArgumentTrigger::ALL.to_vec(),
            ..Default::default()
        }
    }

    pub fn with_action(mut self, trigger: ActionTrigger) -> Self {
        if !self.actions.contains(&trigger) {
            self.actions.push(trigger);
        }
        self
    }

    pub fn with_argument(mut self, trigger: ArgumentTrigger) -> Self {
        if !self.arguments.contains(&trigger) {
            self.arguments.push(trigger);
        }
        self
    }

    pub fn on_action<F>(mut self, callback: F) -> Self
    where
        F: FnMut(ActionTrigger) + Send + 'static,
    {
        self.on_action = Some(Arc::new(Mutex::new(callback)));
        self
    }

    pub fn on_argument<F>(mut self, callback: F) -> Self
    where
        F: FnMut(ArgumentTrigger, &GestureEvent) + Send + 'static,
    {
        self.on_argument = Some(Arc::new(Mutex::new(callback)));
        self
    }

    pub fn actions(&self) -> &[ActionTrigger] {
        &self.actions
    }

    pub fn arguments(&self) -> &[ArgumentTrigger] {
        &self.arguments
    }

    pub fn is_active(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Subscribe the triggers to the bus. A field that is already set up is shut down first.
    pub fn setup(&mut self, bus: &mut GestureBus) {
        if self.is_active() {
            self.shutdown(bus);
        }

        if let Some(callback) = &self.on_action {
            for trigger in &self.actions {
                let callback = callback.clone();
                let id = trigger.subscribe(bus, move |trigger| match callback.lock() {
                    Ok(mut callback) => (&mut *callback)(trigger),
                    Err(_) => log::error!("Action callback of {trigger:?} is poisoned"),
                });
                self.subscriptions.push(id);
            }
        }

        if let Some(callback) = &self.on_argument {
            for trigger in &self.arguments {
                let callback = callback.clone();
                let id = trigger.subscribe(bus, move |trigger, event| match callback.lock() {
                    Ok(mut callback) => (&mut *callback)(trigger, event),
                    Err(_) => log::error!("Argument callback of {trigger:?} is poisoned"),
                });
                self.subscriptions.push(id);
            }
        }

        log::debug!(
            "Reaction field set up: {} action(s), {} argument(s), {} subscription(s)",
            self.actions.len(),
            self.arguments.len(),
            self.subscriptions.len()
        );
    }

    /// Remove exactly the subscriptions created by the last setup.
    pub fn shutdown(&mut self, bus: &mut GestureBus) {
        for id in self.subscriptions.drain(..) {
            if !bus.unsubscribe(&id) {
                log::warn!("Subscription {id:?} was already removed from the bus");
            }
        }
    }
}

/// A list of reaction fields managed together.
#[derive(Default)]
pub struct GestureReaction {
    fields: Vec<ReactionField>,
}

impl GestureReaction {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field(mut self, field: ReactionField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push(&mut self, field: ReactionField) {
        self.fields.push(field);
    }

    pub fn fields(&self) -> &[ReactionField] {
        &self.fields
    }

    pub fn setup(&mut self, bus: &mut GestureBus) {
        log::info!("Setting up {} reaction field(s)", self.fields.len());
        for field in &mut self.fields {
            field.setup(bus);
        }
    }

    pub fn shutdown(&mut self, bus: &mut GestureBus) {
        log::info!("Shutting down {} reaction field(s)", self.fields.len());
        for field in &mut self.fields {
            field.shutdown(bus);
        }
    }
}
