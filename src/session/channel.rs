//! The peer channel boundary.
//!
//! The real transport (signalling, NAT traversal, reconnection) lives
//! outside this crate; it is assumed to expose a reliable ordered pipe with
//! connect/send/receive/close primitives. The session only needs [`send`]
//! outbound and a stream of [`PeerEvent`]s inbound, delivered by the host
//! environment one at a time (single event queue, no preemption).
//!
//! [`send`]: PeerChannel::send

use super::protocol::PeerMessage;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Inbound event from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeerEvent {
    /// The connection to the peer is established.
    Open,
    /// A decoded message arrived from the peer.
    Message(PeerMessage),
    /// The connection closed; terminal for the match.
    Closed,
}

/// Outbound send failure.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("peer channel send failed: {}", reason)]
pub struct ChannelError {
    /// Human-readable failure description.
    pub reason: String,
}

/// Opaque bidirectional message pipe to the other peer.
pub trait PeerChannel {
    /// Queues a message for delivery to the peer.
    fn send(&mut self, message: &PeerMessage) -> Result<(), ChannelError>;
}

/// One end of an in-memory loopback pipe.
///
/// `Rc<RefCell<..>>` rather than `Arc<Mutex<..>>` on purpose: the whole
/// engine runs on a single cooperative event queue, so the pipe is only ever
/// touched from one thread.
#[derive(Debug, Clone)]
pub struct LoopbackEnd {
    outbound: Rc<RefCell<VecDeque<PeerMessage>>>,
    inbound: Rc<RefCell<VecDeque<PeerMessage>>>,
}

impl LoopbackEnd {
    /// Drains messages the other end has sent, in order.
    pub fn drain(&self) -> Vec<PeerMessage> {
        self.inbound.borrow_mut().drain(..).collect()
    }

    /// Number of messages waiting to be drained.
    pub fn pending(&self) -> usize {
        self.inbound.borrow().len()
    }
}

impl PeerChannel for LoopbackEnd {
    fn send(&mut self, message: &PeerMessage) -> Result<(), ChannelError> {
        self.outbound.borrow_mut().push_back(message.clone());
        Ok(())
    }
}

/// Creates a connected pair of in-memory channel ends, for tests and the
/// duel demo.
pub fn loopback() -> (LoopbackEnd, LoopbackEnd) {
    let a_to_b = Rc::new(RefCell::new(VecDeque::new()));
    let b_to_a = Rc::new(RefCell::new(VecDeque::new()));
    (
        LoopbackEnd {
            outbound: Rc::clone(&a_to_b),
            inbound: Rc::clone(&b_to_a),
        },
        LoopbackEnd {
            outbound: b_to_a,
            inbound: a_to_b,
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback_is_full_duplex() {
        let (mut a, mut b) = loopback();
        a.send(&PeerMessage::ScoreUpdate { score: 5 }).unwrap();
        b.send(&PeerMessage::GameOver).unwrap();

        assert_eq!(b.drain(), vec![PeerMessage::ScoreUpdate { score: 5 }]);
        assert_eq!(a.drain(), vec![PeerMessage::GameOver]);
        assert_eq!(a.pending(), 0);
    }

    #[test]
    fn test_drain_preserves_order() {
        let (mut a, b) = loopback();
        a.send(&PeerMessage::ScoreUpdate { score: 1 }).unwrap();
        a.send(&PeerMessage::ScoreUpdate { score: 2 }).unwrap();
        let received = b.drain();
        assert_eq!(
            received,
            vec![
                PeerMessage::ScoreUpdate { score: 1 },
                PeerMessage::ScoreUpdate { score: 2 },
            ]
        );
    }
}
