use crossbeam_channel::{Receiver, Sender, TryRecvError, unbounded};
use tracing::{trace, warn};

use super::message::{Inbound, Outbound, Topic};

/// The widget side of a bus. Implementations must never block.
pub trait Bus: std::fmt::Debug {
    fn send(&self, message: Outbound);

    /// Registers interest in an inbound topic. Unsubscribed topics are dropped.
    fn listen(&mut self, topic: Topic);

    fn is_listening(&self, topic: Topic) -> bool;

    /// Next pending inbound message on a subscribed topic, if any.
    fn poll(&mut self) -> Option<Inbound>;
}

/// Creates a connected widget/host endpoint pair.
pub fn channel() -> (WidgetBus, HostBus) {
    let (outbound_tx, outbound_rx) = unbounded();
    let (inbound_tx, inbound_rx) = unbounded();
    (
        WidgetBus {
            outbound: outbound_tx,
            inbound: inbound_rx,
            topics: Vec::new(),
        },
        HostBus {
            outbound: outbound_rx,
            inbound: inbound_tx,
        },
    )
}

#[derive(Debug)]
pub struct WidgetBus {
    outbound: Sender<Outbound>,
    inbound: Receiver<Inbound>,
    topics: Vec<Topic>,
}

impl Bus for WidgetBus {
    fn send(&self, message: Outbound) {
        trace!(?message, "widget -> host");
        if self.outbound.send(message).is_err() {
            warn!("host endpoint dropped; outbound message discarded");
        }
    }

    fn listen(&mut self, topic: Topic) {
        if !self.topics.contains(&topic) {
            self.topics.push(topic);
        }
    }

    fn is_listening(&self, topic: Topic) -> bool {
        self.topics.contains(&topic)
    }

    fn poll(&mut self) -> Option<Inbound> {
        loop {
            match self.inbound.try_recv() {
                Ok(message) if self.topics.contains(&message.topic()) => {
                    trace!(?message, "host -> widget");
                    return Some(message);
                }
                Ok(message) => {
                    trace!(?message, "no subscription for inbound message; dropped");
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }
}

#[derive(Debug)]
pub struct HostBus {
    outbound: Receiver<Outbound>,
    inbound: Sender<Inbound>,
}

impl HostBus {
    /// Queues a command for the widget. Returns false once the widget is gone.
    pub fn send(&self, message: Inbound) -> bool {
        self.inbound.send(message).is_ok()
    }

    pub fn try_recv(&self) -> Option<Outbound> {
        self.outbound.try_recv().ok()
    }

    pub fn drain(&self) -> Vec<Outbound> {
        self.outbound.try_iter().collect()
    }
}
