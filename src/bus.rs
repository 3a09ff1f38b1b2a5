//! In-process command bus with bounded per-subscription queues.
//!
//! Publishers hand commands to named topics; each subscription owns a
//! bounded queue drained by a single delivery thread. When a queue is full
//! the oldest message is dropped, so a depth-1 subscription always sees the
//! newest command, never a backlog.
//!
//! Callbacks run on the delivery thread, one message at a time, with no bus
//! lock held. A callback may therefore block (or take the subscriber's own
//! lock) without stalling publishers.
//!
//! Subscriptions are RAII: dropping the [`Subscriber`] handle unsubscribes.

use std::collections::VecDeque;
use std::sync::{Arc, Condvar, Mutex, Weak};
use std::thread::JoinHandle;

use crate::msg::{ControlCommand, ControlCommandStamped};

type Callback = Arc<dyn Fn(ControlCommandStamped) + Send + Sync>;

struct SubscriptionSlot {
    id: u64,
    topic: String,
    depth: usize,
    queue: VecDeque<ControlCommandStamped>,
    callback: Callback,
}

struct BusState {
    subscriptions: Vec<SubscriptionSlot>,
    next_id: u64,
    shutdown: bool,
}

struct BusInner {
    state: Mutex<BusState>,
    wakeup: Condvar,
}

/// Topic-based publish/subscribe bus for control commands.
pub struct CommandBus {
    inner: Arc<BusInner>,
    delivery: Option<JoinHandle<()>>,
}

impl CommandBus {
    /// Create a bus and spawn its delivery thread.
    pub fn new() -> Self {
        let inner = Arc::new(BusInner {
            state: Mutex::new(BusState {
                subscriptions: Vec::new(),
                next_id: 0,
                shutdown: false,
            }),
            wakeup: Condvar::new(),
        });

        let worker = Arc::clone(&inner);
        // A bus without its delivery thread can never deliver anything, so
        // failing to spawn is fatal at construction
        let delivery = std::thread::Builder::new()
            .name("command-bus".into())
            .spawn(move || delivery_loop(&worker))
            .expect("failed to spawn command bus delivery thread");

        Self {
            inner,
            delivery: Some(delivery),
        }
    }

    /// Register `callback` for messages on `topic`.
    ///
    /// At most `depth` messages are buffered between callback invocations;
    /// older messages are discarded when the buffer is full. The returned
    /// handle unsubscribes on drop.
    pub fn subscribe<F>(&self, topic: &str, depth: usize, callback: F) -> Subscriber
    where
        F: Fn(ControlCommandStamped) + Send + Sync + 'static,
    {
        let mut state = lock_state(&self.inner);
        let id = state.next_id;
        state.next_id += 1;
        state.subscriptions.push(SubscriptionSlot {
            id,
            topic: topic.to_owned(),
            depth: depth.max(1),
            queue: VecDeque::new(),
            callback: Arc::new(callback),
        });
        Subscriber {
            id,
            bus: Arc::downgrade(&self.inner),
        }
    }

    /// Publish a command to `topic`, stamping it with the current time.
    ///
    /// Messages to topics without subscribers are silently discarded.
    pub fn publish(&self, topic: &str, cmd: ControlCommand) {
        let stamped = ControlCommandStamped::now(cmd);
        let mut state = lock_state(&self.inner);
        let mut queued = false;
        for slot in state.subscriptions.iter_mut().filter(|s| s.topic == topic) {
            if slot.queue.len() >= slot.depth {
                slot.queue.pop_front();
            }
            slot.queue.push_back(stamped);
            queued = true;
        }
        drop(state);
        if queued {
            self.inner.wakeup.notify_all();
        }
    }
}

impl Default for CommandBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for CommandBus {
    fn drop(&mut self) {
        lock_state(&self.inner).shutdown = true;
        self.inner.wakeup.notify_all();
        if let Some(handle) = self.delivery.take() {
            handle.join().ok();
        }
    }
}

/// RAII subscription handle. Dropping it removes the subscription.
pub struct Subscriber {
    id: u64,
    bus: Weak<BusInner>,
}

impl Drop for Subscriber {
    fn drop(&mut self) {
        if let Some(inner) = self.bus.upgrade() {
            lock_state(&inner).subscriptions.retain(|s| s.id != self.id);
        }
    }
}

// A poisoned bus mutex means a callback panicked on the delivery thread;
// the queues themselves are still structurally sound, so keep going.
fn lock_state(inner: &BusInner) -> std::sync::MutexGuard<'_, BusState> {
    match inner.state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn delivery_loop(inner: &BusInner) {
    let mut state = lock_state(inner);
    loop {
        if state.shutdown {
            return;
        }

        // Take at most one message per subscription, then release the lock
        // before running callbacks so publishers are never blocked on them
        let batch: Vec<(Callback, ControlCommandStamped)> = state
            .subscriptions
            .iter_mut()
            .filter_map(|slot| {
                slot.queue
                    .pop_front()
                    .map(|msg| (Arc::clone(&slot.callback), msg))
            })
            .collect();

        if batch.is_empty() {
            state = match inner.wakeup.wait(state) {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            continue;
        }

        drop(state);
        for (callback, msg) in batch {
            callback(msg);
        }
        state = lock_state(inner);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::time::Duration;

    use super::*;

    const RECV_TIMEOUT: Duration = Duration::from_secs(2);

    fn cmd(steering_angle: f32) -> ControlCommand {
        ControlCommand {
            steering_angle,
            linear_velocity: 0.0,
        }
    }

    #[test]
    fn test_delivers_published_message() {
        let bus = CommandBus::new();
        let (tx, rx) = mpsc::channel();
        let _sub = bus.subscribe("/vehicle_cmd", 1, move |msg| {
            tx.send(msg).unwrap();
        });

        bus.publish("/vehicle_cmd", cmd(0.5));

        let received = rx.recv_timeout(RECV_TIMEOUT).unwrap();
        assert_eq!(received.cmd.steering_angle, 0.5);
    }

    #[test]
    fn test_topic_isolation() {
        let bus = CommandBus::new();
        let (tx, rx) = mpsc::channel();
        let _sub = bus.subscribe("/vehicle_cmd", 1, move |msg| {
            tx.send(msg).unwrap();
        });

        bus.publish("/other_topic", cmd(1.0));
        bus.publish("/vehicle_cmd", cmd(2.0));

        let received = rx.recv_timeout(RECV_TIMEOUT).unwrap();
        assert_eq!(received.cmd.steering_angle, 2.0, "Only the subscribed topic should arrive");
        assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
    }

    #[test]
    fn test_depth_one_drops_oldest() {
        let bus = CommandBus::new();
        let (tx, rx) = mpsc::channel();
        // The gate blocks the delivery thread inside the first callback so
        // later messages pile up in the (depth 1) queue
        let (gate_tx, gate_rx) = mpsc::channel::<()>();
        let gate = Mutex::new(gate_rx);

        let _sub = bus.subscribe("/vehicle_cmd", 1, move |msg| {
            tx.send(msg).unwrap();
            if let Ok(gate) = gate.lock() {
                gate.recv_timeout(RECV_TIMEOUT).ok();
            }
        });

        bus.publish("/vehicle_cmd", cmd(1.0));
        // Wait until the callback for the first message is running
        let first = rx.recv_timeout(RECV_TIMEOUT).unwrap();
        assert_eq!(first.cmd.steering_angle, 1.0);

        // Both land while delivery is blocked; the queue keeps only the newer
        bus.publish("/vehicle_cmd", cmd(2.0));
        bus.publish("/vehicle_cmd", cmd(3.0));
        gate_tx.send(()).unwrap();

        let second = rx.recv_timeout(RECV_TIMEOUT).unwrap();
        assert_eq!(second.cmd.steering_angle, 3.0, "Overflow should discard the older message");
        gate_tx.send(()).unwrap();
        assert!(
            rx.recv_timeout(Duration::from_millis(200)).is_err(),
            "The dropped message must never be delivered"
        );
    }

    #[test]
    fn test_drop_unsubscribes() {
        let bus = CommandBus::new();
        let (tx, rx) = mpsc::channel();
        let sub = bus.subscribe("/vehicle_cmd", 1, move |msg| {
            tx.send(msg).unwrap();
        });

        bus.publish("/vehicle_cmd", cmd(1.0));
        rx.recv_timeout(RECV_TIMEOUT).unwrap();

        drop(sub);
        bus.publish("/vehicle_cmd", cmd(2.0));
        assert!(
            rx.recv_timeout(Duration::from_millis(200)).is_err(),
            "No delivery after the handle is dropped"
        );
    }

    #[test]
    fn test_publish_without_subscribers() {
        let bus = CommandBus::new();

        // Must not panic or leak; nothing to observe beyond that
        bus.publish("/vehicle_cmd", cmd(0.0));
    }

    #[test]
    fn test_subscriber_outliving_bus_is_harmless() {
        let bus = CommandBus::new();
        let sub = bus.subscribe("/vehicle_cmd", 1, |_| {});

        drop(bus);
        drop(sub);
    }
}
