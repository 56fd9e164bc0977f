use log::{debug, warn};
use rtrb::{Consumer, Producer, PushError, RingBuffer};

use crate::{error::HandoffError, graph::Graph};

/*
Graph Handoff
=============

The control thread builds a replacement graph (parsed from state, or edited
by the user) while the audio thread keeps evaluating the active one. Two
single-producer single-consumer rings connect them:

    control thread                               audio thread
    ──────────────                               ────────────
    publish(graph) ───► [ pending, 1 slot ] ───► swap_pending(&mut active)
    reclaim()      ◄─── [ retire, N slots ] ◄─── old active graph

  * The audio thread never allocates or frees a graph. It swaps boxes and
    pushes the old one onto the retire ring.
  * If the retire ring is full the swap waits for a later block; the
    active graph stays valid in the meantime.
  * A publish while the previous graph is still pending is refused and
    the graph handed back, so the caller decides whether to retry.
*/

/// Graphs the audio thread may retire before the control side reclaims them.
pub const RETIRE_CAPACITY: usize = 4;

/// Control-thread end of the handoff.
pub struct GraphPublisher {
    pending: Producer<Box<Graph>>,
    retired: Consumer<Box<Graph>>,
}

/// Audio-thread end of the handoff.
pub struct GraphReceiver {
    pending: Consumer<Box<Graph>>,
    retired: Producer<Box<Graph>>,
}

/// Create a connected publisher/receiver pair.
pub fn graph_channel() -> (GraphPublisher, GraphReceiver) {
    let (pending_tx, pending_rx) = RingBuffer::new(1);
    let (retired_tx, retired_rx) = RingBuffer::new(RETIRE_CAPACITY);

    (
        GraphPublisher {
            pending: pending_tx,
            retired: retired_rx,
        },
        GraphReceiver {
            pending: pending_rx,
            retired: retired_tx,
        },
    )
}

impl GraphPublisher {
    /// Queue `graph` to replace the audio thread's active graph.
    ///
    /// Reclaims retired graphs first. Fails with [`HandoffError::Pending`]
    /// when the previous graph has not been picked up yet.
    pub fn publish(&mut self, graph: Box<Graph>) -> Result<(), HandoffError> {
        self.reclaim();

        match self.pending.push(graph) {
            Ok(()) => {
                debug!("graph published to audio thread");
                Ok(())
            }
            Err(PushError::Full(graph)) => {
                warn!("graph handoff slot still occupied, publish refused");
                Err(HandoffError::Pending(graph))
            }
        }
    }

    /// Drop graphs the audio thread has retired. Returns how many.
    pub fn reclaim(&mut self) -> usize {
        let mut count = 0;
        while self.retired.pop().is_ok() {
            count += 1;
        }
        count
    }

    /// Whether a published graph is still waiting to be swapped in.
    pub fn is_pending(&self) -> bool {
        self.pending.is_full()
    }
}

impl GraphReceiver {
    /// Swap a pending graph into `active`, if there is one.
    ///
    /// Non-blocking and allocation-free. The replacement takes over the
    /// warp settings of the graph it replaces. Returns whether a swap
    /// happened.
    pub fn swap_pending(&mut self, active: &mut Box<Graph>) -> bool {
        if self.retired.is_full() {
            return false;
        }

        let mut incoming = match self.pending.pop() {
            Ok(graph) => graph,
            Err(_) => return false,
        };

        incoming.copy_warps_from(active);
        std::mem::swap(active, &mut incoming);

        let retired = self.retired.push(incoming).is_ok();
        debug_assert!(retired, "retire ring filled after capacity check");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{dsp::warp::WarpType, graph::Vertex};

    fn triangle() -> Box<Graph> {
        Box::new(
            Graph::from_vertices(&[
                Vertex::linear(0.0, 0.0),
                Vertex::linear(0.5, 1.0),
                Vertex::linear(1.0, 0.0),
            ])
            .expect("valid triangle"),
        )
    }

    #[test]
    fn test_publish_then_swap() {
        let (mut publisher, mut receiver) = graph_channel();
        let mut active = Box::new(Graph::new());

        assert!(!receiver.swap_pending(&mut active));

        publisher.publish(triangle()).expect("empty slot");
        assert!(publisher.is_pending());
        assert!(receiver.swap_pending(&mut active));
        assert_eq!(active.vertex_count(), 3);
        assert!(!publisher.is_pending());

        // The old graph comes back on the retire ring
        assert_eq!(publisher.reclaim(), 1);
        assert_eq!(publisher.reclaim(), 0);
    }

    #[test]
    fn test_second_publish_is_refused() {
        let (mut publisher, _receiver) = graph_channel();
        publisher.publish(triangle()).expect("empty slot");

        let err = publisher
            .publish(Box::new(Graph::new()))
            .expect_err("slot occupied");
        assert_eq!(err.into_graph().vertex_count(), 2);
    }

    #[test]
    fn test_swap_keeps_active_warps() {
        let (mut publisher, mut receiver) = graph_channel();
        let mut active = Box::new(Graph::new());
        active.set_vertical_warp_type(WarpType::SkewMinus);
        active.set_vertical_warp_amount(0.3);

        publisher.publish(triangle()).expect("empty slot");
        receiver.swap_pending(&mut active);

        assert_eq!(active.vertical_warp().kind, WarpType::SkewMinus);
        assert_eq!(active.vertical_warp().amount, 0.3);
    }

    #[test]
    fn test_full_retire_ring_defers_swap() {
        let (mut publisher, mut receiver) = graph_channel();
        let mut active = Box::new(Graph::new());

        // Fill the retire ring without reclaiming
        for _ in 0..RETIRE_CAPACITY {
            assert!(publisher.pending.push(triangle()).is_ok());
            assert!(receiver.swap_pending(&mut active));
        }

        assert!(publisher.pending.push(Box::new(Graph::new())).is_ok());
        assert!(!receiver.swap_pending(&mut active));
        assert_eq!(active.vertex_count(), 3);

        // Once reclaimed, the deferred swap goes through
        assert_eq!(publisher.reclaim(), RETIRE_CAPACITY);
        assert!(receiver.swap_pending(&mut active));
        assert_eq!(active.vertex_count(), 2);
    }
}
