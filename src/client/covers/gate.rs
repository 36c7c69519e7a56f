use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Page-wide delay before any cover loading starts
pub const IMAGE_LOAD_DELAY: Duration = Duration::from_secs(5);

/// View-scoped gate that opens a fixed delay after mount.
///
/// Every card on a page shares one gate, which bounds the burst of outbound
/// requests at initial load. The timer is owned by the [`GateHandle`]; when
/// the view goes away the handle drops, the timer is cancelled, and waiters
/// observe a gate that will never open.
#[derive(Clone)]
pub struct LoadGate {
    rx: watch::Receiver<bool>,
}

/// Owns the gate's delay timer; dropping it releases the timer
pub struct GateHandle {
    task: JoinHandle<()>,
}

impl Drop for GateHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

impl LoadGate {
    /// Gate that opens after `delay`
    pub fn after(delay: Duration) -> (GateHandle, LoadGate) {
        let (tx, rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(true);
        });
        (GateHandle { task }, LoadGate { rx })
    }

    /// Gate that is already open
    pub fn open() -> LoadGate {
        let (_, rx) = watch::channel(true);
        LoadGate { rx }
    }

    /// Waits for the gate to open. Returns `false` if the owning view went
    /// away before that happened.
    pub async fn wait_open(&mut self) -> bool {
        if *self.rx.borrow() {
            return true;
        }
        while self.rx.changed().await.is_ok() {
            if *self.rx.borrow() {
                return true;
            }
        }
        *self.rx.borrow()
    }
}

/// Per-card visibility signal.
///
/// Lookups only run for cards that have actually been on screen; off-screen
/// cards never trigger external calls.
#[derive(Clone)]
pub struct Visibility {
    rx: watch::Receiver<bool>,
}

/// Marks the paired [`Visibility`] as having entered the viewport
pub struct VisibilitySignal {
    tx: watch::Sender<bool>,
}

impl VisibilitySignal {
    pub fn mark_visible(&self) {
        let _ = self.tx.send(true);
    }
}

impl Visibility {
    /// Visibility that has not happened yet
    pub fn deferred() -> (VisibilitySignal, Visibility) {
        let (tx, rx) = watch::channel(false);
        (VisibilitySignal { tx }, Visibility { rx })
    }

    /// Card that is already on screen
    pub fn visible() -> Visibility {
        let (_, rx) = watch::channel(true);
        Visibility { rx }
    }

    /// Waits until the card has been visible. Returns `false` if the signal
    /// side was dropped without the card ever appearing.
    pub async fn wait_visible(&mut self) -> bool {
        if *self.rx.borrow() {
            return true;
        }
        while self.rx.changed().await.is_ok() {
            if *self.rx.borrow() {
                return true;
            }
        }
        *self.rx.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_gate_opens_after_delay() {
        let (_handle, mut gate) = LoadGate::after(Duration::from_secs(5));
        assert!(gate.wait_open().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gate_not_open_before_delay() {
        let (_handle, gate) = LoadGate::after(Duration::from_secs(5));
        // Nothing is polling the timer yet, so the gate must still be shut.
        assert!(!*gate.rx.borrow());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_handle_never_opens() {
        let (handle, mut gate) = LoadGate::after(Duration::from_secs(5));
        drop(handle);
        assert!(!gate.wait_open().await);
    }

    #[tokio::test]
    async fn test_open_gate_is_immediate() {
        let mut gate = LoadGate::open();
        assert!(gate.wait_open().await);
    }

    #[tokio::test]
    async fn test_visibility_signal() {
        let (signal, mut visibility) = Visibility::deferred();

        let waiter = tokio::spawn(async move { visibility.wait_visible().await });
        signal.mark_visible();

        assert!(waiter.await.unwrap());
    }

    #[tokio::test]
    async fn test_visibility_dropped_signal_is_false() {
        let (signal, mut visibility) = Visibility::deferred();
        drop(signal);
        assert!(!visibility.wait_visible().await);
    }
}
