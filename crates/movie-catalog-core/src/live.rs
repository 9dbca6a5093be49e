use tokio::sync::watch;

/// Current value plus change notification.
///
/// Subscribers see the value current at subscription time and then every newer
/// value. Only the latest value is kept: a subscriber that falls behind skips
/// straight to the newest snapshot.
pub struct LiveValue<T> {
    sender: watch::Sender<T>,
}

impl<T: Clone> LiveValue<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Replace the value and notify subscribers. Succeeds with no subscribers too.
    pub fn publish(&self, value: T) {
        self.sender.send_replace(value);
    }

    pub fn current(&self) -> T {
        self.sender.borrow().clone()
    }

    /// Read the current value without cloning it
    pub fn with_current<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.sender.borrow())
    }

    pub fn subscribe(&self) -> Subscription<T> {
        Subscription {
            receiver: self.sender.subscribe(),
            primed: false,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

pub struct Subscription<T> {
    receiver: watch::Receiver<T>,
    primed: bool,
}

impl<T: Clone> Subscription<T> {
    /// First call yields the value current at subscription; later calls wait for
    /// the next change. `None` once the publishing side is gone.
    pub async fn next(&mut self) -> Option<T> {
        if !self.primed {
            self.primed = true;
            return Some(self.latest());
        }
        if self.changed().await {
            Some(self.latest())
        } else {
            None
        }
    }

    /// Current value, marking it as seen
    pub fn latest(&mut self) -> T {
        self.primed = true;
        self.receiver.borrow_and_update().clone()
    }

    /// Whether a value newer than the last one seen is waiting
    pub fn has_pending(&self) -> bool {
        !self.primed || self.receiver.has_changed().unwrap_or(false)
    }

    /// Wait for a change; false when the publisher was dropped
    pub(crate) async fn changed(&mut self) -> bool {
        self.receiver.changed().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_gets_current_then_future() {
        let live = LiveValue::new(1);
        live.publish(2);

        let mut sub = live.subscribe();
        assert_eq!(sub.next().await, Some(2));
        assert!(!sub.has_pending());

        live.publish(3);
        assert!(sub.has_pending());
        assert_eq!(sub.next().await, Some(3));
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_only_latest() {
        let live = LiveValue::new(vec![0]);
        live.publish(vec![1]);
        live.publish(vec![2]);

        let mut sub = live.subscribe();
        assert_eq!(sub.next().await, Some(vec![2]));
    }

    #[tokio::test]
    async fn test_closed_after_publisher_dropped() {
        let live = LiveValue::new("a".to_string());
        let mut sub = live.subscribe();
        assert_eq!(sub.next().await.as_deref(), Some("a"));
        drop(live);
        assert_eq!(sub.next().await, None);
    }

    #[test]
    fn test_publish_without_subscribers() {
        let live = LiveValue::new(0u8);
        live.publish(5);
        assert_eq!(live.current(), 5);
        assert_eq!(live.subscriber_count(), 0);
        assert_eq!(live.with_current(|v| *v + 1), 6);
    }
}
