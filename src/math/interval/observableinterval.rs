use std::sync::Arc;

use tracing::{
    debug,
    warn
};

use crate::math::interval::doubleinterval::DoubleInterval;
use crate::math::interval::intervalerror::IntervalError;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Bound {
    Lower,
    Upper
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum IntervalEvent {
    BoundChanged {
        bound: Bound,
        previous: DoubleInterval,
        current: DoubleInterval
    },
    LengthChanged {
        previous: f64,
        current: f64
    }
}

pub trait IntervalObserver: Send + Sync {
    fn on_event(&self, event: &IntervalEvent);
}

impl<F> IntervalObserver for F where
    F: Fn(&IntervalEvent) + Send + Sync {
    fn on_event(&self, event: &IntervalEvent) {
        self(event)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct SubscriptionId(usize);

/// Wraps a `DoubleInterval` for binding layers that need change
/// notifications. Every successful write emits `BoundChanged` followed by
/// `LengthChanged`; a rejected write emits nothing.
///
/// Mutation takes `&mut self` and is not synchronized.
pub struct ObservableInterval {
    interval: DoubleInterval,
    observers: Vec<(SubscriptionId, Arc<dyn IntervalObserver>)>,
    next_id: usize
}

impl ObservableInterval {
    pub fn new(interval: DoubleInterval) -> ObservableInterval {
        ObservableInterval {
            interval,
            observers: Vec::new(),
            next_id: 0
        }
    }

    pub fn interval(&self) -> &DoubleInterval {
        &self.interval
    }

    pub fn into_inner(self) -> DoubleInterval {
        self.interval
    }

    pub fn subscribe(&mut self, observer: Arc<dyn IntervalObserver>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let count = self.observers.len();
        self.observers.retain(|(observer_id, _)| *observer_id != id);
        self.observers.len() != count
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn set_lower_bound(&mut self, value: f64) -> Result<bool, IntervalError> {
        self.write(Bound::Lower, value)
    }

    pub fn set_upper_bound(&mut self, value: f64) -> Result<bool, IntervalError> {
        self.write(Bound::Upper, value)
    }

    fn write(&mut self, bound: Bound, value: f64) -> Result<bool, IntervalError> {
        let previous = self.interval;
        let result = match bound {
            Bound::Lower => self.interval.set_lower_bound(value),
            Bound::Upper => self.interval.set_upper_bound(value)
        };
        let changed = result.inspect_err(|error| {
            warn!(?bound, value, %error, "rejected interval bound update");
        })?;
        self.notify(&IntervalEvent::BoundChanged {
            bound,
            previous,
            current: self.interval
        });
        self.notify(&IntervalEvent::LengthChanged {
            previous: previous.length(),
            current: self.interval.length()
        });
        Ok(changed)
    }

    fn notify(&self, event: &IntervalEvent) {
        debug!(?event, observers = self.observers.len(), "emitting interval event");
        for (_, observer) in self.observers.iter() {
            observer.on_event(event);
        }
    }
}
