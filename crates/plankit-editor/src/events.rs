//! Explicit observer hook for editor state changes.
//!
//! Renderers subscribe here instead of polling. Notification is synchronous
//! and runs on the event-processing thread; observers must not start a new
//! gesture from inside a callback.

use std::fmt;
use std::rc::Rc;

use uuid::Uuid;

use crate::element::ElementId;
use crate::tools::ToolName;

/// Something a renderer may care about.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    ToolChanged { tool: ToolName },
    SelectionChanged,
    ElementsChanged,
    ElementCommitted { id: ElementId },
    PreviewChanged,
    ViewChanged,
}

/// Coarse grouping used by subscription filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    Tool,
    Selection,
    Elements,
    Preview,
    View,
}

impl EditorEvent {
    pub fn category(&self) -> EventCategory {
        match self {
            Self::ToolChanged { .. } => EventCategory::Tool,
            Self::SelectionChanged => EventCategory::Selection,
            Self::ElementsChanged | Self::ElementCommitted { .. } => EventCategory::Elements,
            Self::PreviewChanged => EventCategory::Preview,
            Self::ViewChanged => EventCategory::View,
        }
    }
}

/// What a subscriber wants to hear about.
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    #[default]
    All,
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    fn matches(&self, event: &EditorEvent) -> bool {
        match self {
            Self::All => true,
            Self::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

/// Handle returned by [`Observers::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

type Callback = Rc<dyn Fn(&EditorEvent)>;

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    callback: Callback,
}

/// Registry of event subscribers.
#[derive(Default)]
pub struct Observers {
    subscriptions: Vec<Subscription>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, filter: EventFilter, callback: F) -> SubscriptionId
    where
        F: Fn(&EditorEvent) + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscriptions.push(Subscription {
            id,
            filter,
            callback: Rc::new(callback),
        });
        id
    }

    /// Removes a subscription; returns whether it existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Synchronously invokes every matching subscriber.
    pub fn notify(&self, event: &EditorEvent) {
        // Clone the callbacks first so a subscriber may unsubscribe others
        // without invalidating the iteration.
        let callbacks: Vec<Callback> = self
            .subscriptions
            .iter()
            .filter(|s| s.filter.matches(event))
            .map(|s| Rc::clone(&s.callback))
            .collect();
        for callback in callbacks {
            callback(event);
        }
    }
}

impl fmt::Debug for Observers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observers")
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn filtered_subscription_only_sees_its_categories() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut observers = Observers::new();

        let sink = Rc::clone(&seen);
        observers.subscribe(
            EventFilter::Categories(vec![EventCategory::Selection]),
            move |event| sink.borrow_mut().push(event.clone()),
        );

        observers.notify(&EditorEvent::SelectionChanged);
        observers.notify(&EditorEvent::ViewChanged);

        assert_eq!(seen.borrow().as_slice(), &[EditorEvent::SelectionChanged]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut observers = Observers::new();

        let sink = Rc::clone(&count);
        let id = observers.subscribe(EventFilter::All, move |_| *sink.borrow_mut() += 1);

        observers.notify(&EditorEvent::ViewChanged);
        assert!(observers.unsubscribe(id));
        assert!(!observers.unsubscribe(id));
        observers.notify(&EditorEvent::ViewChanged);

        assert_eq!(*count.borrow(), 1);
    }
}
