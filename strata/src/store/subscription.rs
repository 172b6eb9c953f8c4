//! Change notification around any store.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Weak};
use std::sync::mpsc::{self, Receiver, RecvError, RecvTimeoutError, SyncSender, TryRecvError};
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;

use super::{ConfigStore, LayeredStore};
use crate::nested::{self, ConfigMap};
use crate::resolver::Resolver;
use crate::{ConfigLevel, StrataError, StrataResult};

/// A single write observed by a subscriber.
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    /// Full key that was written.
    pub key: String,
    /// Value written at `key`.
    pub value: Value,
}

/// Receiving end of a subscription.
///
/// Handles are cheap to clone; every clone draws from the same queue.
#[derive(Clone, Debug)]
pub struct Subscription {
    receiver: Arc<Mutex<Receiver<Event>>>,
}

impl Subscription {
    /// Block until the next event. Fails once the subscription is closed.
    ///
    /// # Errors
    ///
    /// Returns [`RecvError`] when the store has dropped the channel.
    pub fn recv(&self) -> Result<Event, RecvError> {
        self.receiver.lock().recv()
    }

    /// Take the next event if one is already queued.
    ///
    /// # Errors
    ///
    /// Returns [`TryRecvError::Empty`] when nothing is queued and
    /// [`TryRecvError::Disconnected`] once the subscription is closed.
    pub fn try_recv(&self) -> Result<Event, TryRecvError> {
        self.receiver.lock().try_recv()
    }

    /// Wait up to `timeout` for the next event.
    ///
    /// # Errors
    ///
    /// Returns [`RecvTimeoutError`] on timeout or once closed.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Event, RecvTimeoutError> {
        self.receiver.lock().recv_timeout(timeout)
    }

    /// Drain every event currently queued.
    #[must_use]
    pub fn drain(&self) -> Vec<Event> {
        let receiver = self.receiver.lock();
        std::iter::from_fn(|| receiver.try_recv().ok()).collect()
    }
}

/// The store keeps only a weak handle on the receiver, so dropping every
/// [`Subscription`] clone disconnects the channel.
struct Channel {
    sender: SyncSender<Event>,
    receiver: Weak<Mutex<Receiver<Event>>>,
}

/// Publishes every write to subscribers of the written key and each of its
/// ancestors, including the root key `""`.
///
/// With the default buffer of zero, publishing blocks until each
/// subscriber receives the event. A write to a key nobody listens to never
/// blocks. Do not write from the thread that consumes a rendezvous
/// subscription. A subscription whose handles have all been dropped is
/// removed on the next write that targets it; one that is held but never
/// read stalls those writers.
pub struct SubscriptionStore<S = LayeredStore> {
    inner: S,
    channels: HashMap<String, Channel>,
    buffer: usize,
}

impl<S: fmt::Debug> fmt::Debug for SubscriptionStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionStore")
            .field("inner", &self.inner)
            .field("subscriptions", &self.channels.keys().collect::<Vec<_>>())
            .field("buffer", &self.buffer)
            .finish()
    }
}

impl<S: Default> Default for SubscriptionStore<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

impl<S> SubscriptionStore<S> {
    /// Wrap `inner` with unbuffered channels.
    pub fn new(inner: S) -> Self {
        Self::with_buffer(inner, 0)
    }

    /// Wrap `inner` with channels queueing up to `buffer` events.
    pub fn with_buffer(inner: S, buffer: usize) -> Self {
        Self {
            inner,
            channels: HashMap::new(),
            buffer,
        }
    }

    /// Subscribe to writes at `key` and below. Subscribing again while a
    /// handle for `key` is alive returns a handle to the same queue.
    pub fn subscribe(&mut self, key: &str) -> Subscription {
        if let Some(receiver) = self
            .channels
            .get(key)
            .and_then(|channel| channel.receiver.upgrade())
        {
            return Subscription { receiver };
        }
        let (sender, receiver) = mpsc::sync_channel(self.buffer);
        let receiver = Arc::new(Mutex::new(receiver));
        self.channels.insert(
            key.to_owned(),
            Channel {
                sender,
                receiver: Arc::downgrade(&receiver),
            },
        );
        Subscription { receiver }
    }

    /// Stop publishing to `key`. Pending receivers observe disconnection.
    ///
    /// # Errors
    ///
    /// Returns [`StrataError::NoSuchSubscription`] when `key` has no
    /// subscription.
    pub fn unsubscribe(&mut self, key: &str) -> StrataResult<()> {
        self.channels.remove(key).map(|_| ()).ok_or_else(|| {
            Arc::new(StrataError::NoSuchSubscription {
                key: key.to_owned(),
            })
        })
    }

    /// Drop every subscription.
    pub fn close(&mut self) {
        self.channels.clear();
    }

    /// Number of subscribed keys. Abandoned subscriptions count until a
    /// write prunes them.
    #[must_use]
    pub fn subscriptions(&self) -> usize {
        self.channels.len()
    }

    /// The wrapped store.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    fn publish(&mut self, key: &str, value: &Value, delimiter: char) {
        if self.channels.is_empty() {
            return;
        }
        let mut stale = Vec::new();
        for target in ancestors(key, delimiter) {
            let Some(channel) = self.channels.get(target) else {
                continue;
            };
            let event = Event {
                key: key.to_owned(),
                value: value.clone(),
            };
            if channel.sender.send(event).is_err() {
                stale.push(target.to_owned());
            }
        }
        for target in stale {
            tracing::debug!(target: "strata::store", key = %target, "dropping disconnected subscription");
            self.channels.remove(&target);
        }
    }
}

/// `key` and every prefix of it ending at a delimiter, longest first, then
/// the root key.
fn ancestors(key: &str, delimiter: char) -> Vec<&str> {
    let mut out = vec![key];
    out.extend(
        key.rmatch_indices(delimiter)
            .filter_map(|(at, _)| key.get(..at)),
    );
    if !key.is_empty() {
        out.push("");
    }
    out
}

impl<S: ConfigStore> ConfigStore for SubscriptionStore<S> {
    fn register_resolver(&mut self, level: ConfigLevel, resolver: Arc<dyn Resolver>) {
        self.inner.register_resolver(level, resolver);
    }

    fn set_level(&mut self, level: ConfigLevel, key: &str, value: Value) -> StrataResult<()> {
        self.inner.set_level(level, key, value.clone())?;
        let delimiter = self.inner.delimiter();
        self.publish(key, &value, delimiter);
        Ok(())
    }

    fn merge(&mut self, level: ConfigLevel, data: ConfigMap) {
        let delimiter = self.inner.delimiter();
        let written = nested::leaves(&data, delimiter);
        self.inner.merge(level, data);
        for (key, value) in written {
            self.publish(&key, &value, delimiter);
        }
    }

    fn alias(&mut self, from: &str, to: &str) {
        self.inner.alias(from, to);
    }

    fn find(&self, key: &str) -> Option<Value> {
        self.inner.find(key)
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn debug(&self) -> String {
        self.inner.debug()
    }

    fn size(&self) -> usize {
        self.inner.size()
    }

    fn delimiter(&self) -> char {
        self.inner.delimiter()
    }
}
