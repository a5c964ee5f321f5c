//! Frame queue: hands complete frames from the transport to the engine.
//!
//! The producer half collects loose events and sends them as one frame
//! when it sees a flush. A shared counter tracks frames sent but not yet
//! replayed, so the consumer drains exactly what was complete when it
//! looked.

use super::events::RedrawEvent;
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// An ordered batch of events ending with [`RedrawEvent::Flush`].
pub type Frame = Vec<RedrawEvent>;

/// The receiving side went away; the event was not queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("frame queue receiver dropped")]
pub struct QueueClosed;

/// Create a connected producer/consumer pair.
pub fn frame_queue() -> (FrameSender, FrameReceiver) {
    let (tx, rx) = unbounded();
    let buffered = Arc::new(AtomicUsize::new(0));
    let source_lost = Arc::new(AtomicBool::new(false));
    (
        FrameSender {
            tx,
            pending: Vec::new(),
            buffered: buffered.clone(),
            source_lost: source_lost.clone(),
        },
        FrameReceiver {
            rx,
            buffered,
            source_lost,
        },
    )
}

/// Producer half. Owned by the transport thread.
///
/// Dropping the sender, or calling [`FrameSender::connection_lost`],
/// signals the consumer that no more frames will come.
#[derive(Debug)]
pub struct FrameSender {
    tx: Sender<Frame>,
    pending: Vec<RedrawEvent>,
    buffered: Arc<AtomicUsize>,
    source_lost: Arc<AtomicBool>,
}

impl FrameSender {
    /// Add one event to the frame being built. A flush completes the frame
    /// and sends it.
    ///
    /// # Errors
    ///
    /// Returns [`QueueClosed`] if the receiver has been dropped.
    pub fn push(&mut self, event: RedrawEvent) -> Result<(), QueueClosed> {
        let flush = matches!(event, RedrawEvent::Flush);
        self.pending.push(event);
        if flush {
            let frame = std::mem::take(&mut self.pending);
            let len = frame.len();
            self.tx.send(frame).map_err(|_| QueueClosed)?;
            let buffered = self.buffered.fetch_add(1, Ordering::SeqCst) + 1;
            debug!(events = len, buffered, "frame queued");
        }
        Ok(())
    }

    /// Push every event of a batch in order.
    ///
    /// # Errors
    ///
    /// Returns [`QueueClosed`] if the receiver has been dropped.
    pub fn extend<I>(&mut self, events: I) -> Result<(), QueueClosed>
    where
        I: IntoIterator<Item = RedrawEvent>,
    {
        events.into_iter().try_for_each(|event| self.push(event))
    }

    /// Events collected for the frame not yet flushed.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Signal that the editor connection is gone. An unfinished frame is
    /// discarded.
    pub fn connection_lost(&self) {
        if !self.pending.is_empty() {
            warn!(events = self.pending.len(), "discarding unflushed frame");
        }
        self.source_lost.store(true, Ordering::SeqCst);
    }
}

impl Drop for FrameSender {
    fn drop(&mut self) {
        self.connection_lost();
    }
}

/// Consumer half. Owned by the engine.
#[derive(Debug)]
pub struct FrameReceiver {
    rx: Receiver<Frame>,
    buffered: Arc<AtomicUsize>,
    source_lost: Arc<AtomicBool>,
}

impl FrameReceiver {
    /// Complete frames sent and not yet replayed.
    pub fn buffered(&self) -> usize {
        self.buffered.load(Ordering::SeqCst)
    }

    /// Take the next frame without blocking.
    pub fn try_recv(&self) -> Option<Frame> {
        match self.rx.try_recv() {
            Ok(frame) => Some(frame),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Record that one received frame has been fully applied.
    pub fn mark_replayed(&self) {
        let _ = self
            .buffered
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1));
    }

    /// Whether the producer is gone and every frame it sent has been
    /// replayed.
    pub fn is_exhausted(&self) -> bool {
        self.source_lost.load(Ordering::SeqCst) && self.buffered() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_sent_on_flush() {
        let (mut tx, rx) = frame_queue();
        tx.push(RedrawEvent::MouseOn).unwrap();
        tx.push(RedrawEvent::GridClear { grid: 1 }).unwrap();
        assert_eq!(rx.buffered(), 0);
        assert_eq!(tx.pending(), 2);

        tx.push(RedrawEvent::Flush).unwrap();
        assert_eq!(rx.buffered(), 1);
        assert_eq!(tx.pending(), 0);

        let frame = rx.try_recv().unwrap();
        assert_eq!(frame.len(), 3);
        assert_eq!(frame.last(), Some(&RedrawEvent::Flush));
        rx.mark_replayed();
        assert_eq!(rx.buffered(), 0);
    }

    #[test]
    fn test_frames_fifo() {
        let (mut tx, rx) = frame_queue();
        tx.extend([
            RedrawEvent::SetTitle { title: "a".into() },
            RedrawEvent::Flush,
            RedrawEvent::SetTitle { title: "b".into() },
            RedrawEvent::Flush,
        ])
        .unwrap();
        assert_eq!(rx.buffered(), 2);
        assert_eq!(rx.try_recv().unwrap()[0].name(), "set_title");
        let second = rx.try_recv().unwrap();
        assert_eq!(second[0], RedrawEvent::SetTitle { title: "b".into() });
        assert!(rx.try_recv().is_none());
    }

    #[test]
    fn test_drop_marks_exhausted_after_drain() {
        let (mut tx, rx) = frame_queue();
        tx.extend([RedrawEvent::BusyStart, RedrawEvent::Flush]).unwrap();
        tx.push(RedrawEvent::BusyStop).unwrap();
        drop(tx);

        assert!(!rx.is_exhausted());
        assert!(rx.try_recv().is_some());
        rx.mark_replayed();
        assert!(rx.is_exhausted());
        assert!(rx.try_recv().is_none());
    }

    #[test]
    fn test_push_after_receiver_dropped() {
        let (mut tx, rx) = frame_queue();
        drop(rx);
        assert_eq!(tx.push(RedrawEvent::Flush), Err(QueueClosed));
    }

    #[test]
    fn test_mark_replayed_saturates() {
        let (_tx, rx) = frame_queue();
        rx.mark_replayed();
        assert_eq!(rx.buffered(), 0);
    }
}
