//! [`Field`]: an observable value holder.
//!
//! A field always holds exactly one value.  `set` replaces it wholesale and
//! pushes the new value to every live [`Subscription`] while still holding
//! the field's lock, so all subscribers see writes in the order they happened.
//!
//! ```rust
//! use tts_client::store::Field;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let text = Field::new("text", None::<String>);
//! let mut sub = text.subscribe();
//!
//! text.set(Some("hello".into()));
//!
//! assert_eq!(sub.recv().await, Some(None));                   // value at subscribe time
//! assert_eq!(sub.recv().await, Some(Some("hello".into())));   // then every write
//! # }
//! ```

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tokio::sync::mpsc;

struct Inner<T> {
    value: T,
    subscribers: Vec<(u64, mpsc::UnboundedSender<T>)>,
    next_id: u64,
}

type Shared<T> = Arc<Mutex<Inner<T>>>;

fn lock<T>(inner: &Mutex<Inner<T>>) -> MutexGuard<'_, Inner<T>> {
    // Every mutation is a single assignment or Vec operation, so a poisoned
    // lock still guards a consistent `Inner`.
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A named, observable value.
///
/// Cloning a `Field` yields another handle to the same value.
pub struct Field<T> {
    name: &'static str,
    inner: Shared<T>,
}

impl<T: Clone + Send + 'static> Field<T> {
    pub fn new(name: &'static str, initial: T) -> Self {
        Self {
            name,
            inner: Arc::new(Mutex::new(Inner {
                value: initial,
                subscribers: Vec::new(),
                next_id: 0,
            })),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current value.
    pub fn get(&self) -> T {
        lock(&self.inner).value.clone()
    }

    /// Run `f` on a snapshot of the current value.
    ///
    /// The lock is released before `f` runs, so `f` may use this same field.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let snapshot = self.get();
        f(&snapshot)
    }

    /// Replace the current value and notify every subscriber.
    pub fn set(&self, value: T) {
        let mut inner = lock(&self.inner);
        inner.value = value;
        let Inner {
            value, subscribers, ..
        } = &mut *inner;
        subscribers.retain(|(_, tx)| tx.send(value.clone()).is_ok());
        log::trace!("store: {} updated ({} subscribers)", self.name, subscribers.len());
    }

    /// Start observing: the returned subscription yields the current value
    /// first, then every later value until it is dropped.
    pub fn subscribe(&self) -> Subscription<T> {
        let mut inner = lock(&self.inner);
        let id = inner.next_id;
        inner.next_id += 1;

        let (tx, rx) = mpsc::unbounded_channel();
        // Receiver is alive, so this cannot fail.
        let _ = tx.send(inner.value.clone());
        inner.subscribers.push((id, tx));

        Subscription {
            id,
            rx,
            field: Arc::downgrade(&self.inner),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        lock(&self.inner).subscribers.len()
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// A live observation of one [`Field`].  Dropping it unsubscribes.
pub struct Subscription<T> {
    id: u64,
    rx: mpsc::UnboundedReceiver<T>,
    field: Weak<Mutex<Inner<T>>>,
}

impl<T> Subscription<T> {
    /// Wait for the next value.  Returns `None` once the field is gone and
    /// every pending value has been read.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Take the next already-delivered value, if any.
    pub fn try_recv(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Drain every value delivered so far.
    pub fn drain(&mut self) -> Vec<T> {
        std::iter::from_fn(|| self.try_recv()).collect()
    }

    /// Stop observing.  Equivalent to dropping the subscription.
    pub fn unsubscribe(self) {}
}

impl<T> Drop for Subscription<T> {
    fn drop(&mut self) {
        if let Some(inner) = self.field.upgrade() {
            lock(&inner).subscribers.retain(|(id, _)| *id != self.id);
        }
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_initial_value() {
        let field = Field::new("flag", false);
        assert!(!field.get());
        assert_eq!(field.name(), "flag");
    }

    #[test]
    fn set_replaces_value() {
        let field = Field::new("items", vec![1, 2, 3]);
        field.set(vec![9]);
        assert_eq!(field.get(), vec![9]);
        assert_eq!(field.with(|v| v.len()), 1);
    }

    #[test]
    fn with_may_write_the_same_field() {
        let field = Field::new("n", 1u32);
        let mut sub = field.subscribe();

        let seen = field.with(|n| {
            field.set(n + 1);
            *n
        });

        assert_eq!(seen, 1);
        assert_eq!(field.get(), 2);
        assert_eq!(sub.drain(), vec![1, 2]);
    }

    #[test]
    fn subscribe_delivers_current_value_immediately() {
        let field = Field::new("text", String::from("a"));
        field.set("b".into());

        let mut sub = field.subscribe();
        assert_eq!(sub.try_recv().as_deref(), Some("b"));
        assert_eq!(sub.try_recv(), None);
    }

    #[test]
    fn every_write_is_delivered_in_order() {
        let field = Field::new("n", 0u32);
        let mut sub = field.subscribe();

        for n in 1..=5 {
            field.set(n);
        }

        assert_eq!(sub.drain(), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn independent_subscribers_see_the_same_sequence() {
        let field = Field::new("n", 0u32);
        let mut early = field.subscribe();
        field.set(1);
        let mut late = field.subscribe();
        field.set(2);

        assert_eq!(early.drain(), vec![0, 1, 2]);
        assert_eq!(late.drain(), vec![1, 2]);
    }

    #[test]
    fn dropping_a_subscription_unsubscribes() {
        let field = Field::new("n", 0u32);
        let sub = field.subscribe();
        let _other = field.subscribe();
        assert_eq!(field.subscriber_count(), 2);

        sub.unsubscribe();
        assert_eq!(field.subscriber_count(), 1);

        field.set(7);
        assert_eq!(field.subscriber_count(), 1);
    }

    #[test]
    fn clones_share_the_value() {
        let field = Field::new("flag", false);
        let handle = field.clone();
        let mut sub = field.subscribe();

        handle.set(true);

        assert!(field.get());
        assert_eq!(sub.drain(), vec![false, true]);
    }

    #[test]
    fn fields_are_independent() {
        let a = Field::new("a", 0u8);
        let b = Field::new("b", 0u8);
        let mut sub_b = b.subscribe();

        a.set(1);

        assert_eq!(b.get(), 0);
        assert_eq!(sub_b.drain(), vec![0]);
    }

    #[tokio::test]
    async fn recv_ends_after_field_is_dropped() {
        let field = Field::new("n", 1u8);
        let mut sub = field.subscribe();
        field.set(2);
        drop(field);

        assert_eq!(sub.recv().await, Some(1));
        assert_eq!(sub.recv().await, Some(2));
        assert_eq!(sub.recv().await, None);
    }

    #[tokio::test]
    async fn writes_from_another_task_arrive_in_order() {
        let field = Field::new("n", 0u32);
        let mut sub = field.subscribe();
        let writer = field.clone();

        tokio::spawn(async move {
            for n in 1..=100 {
                writer.set(n);
            }
        })
        .await
        .unwrap();

        let mut seen = Vec::new();
        while seen.len() < 101 {
            seen.push(sub.recv().await.unwrap());
        }
        assert_eq!(seen, (0..=100).collect::<Vec<_>>());
    }
}
