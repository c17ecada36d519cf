//! Queued event delivery.
//!
//! [`EventBus::emit`] only enqueues on a `std::sync::mpsc` channel, so the
//! solver's hot loop never calls into a sink. [`EventBus::flush`] drains the
//! queue and hands each event to every sink, in emission order and in sink
//! registration order.

use std::sync::mpsc::{channel, Receiver, Sender};

use crate::events::SimulationEvent;
use crate::sinks::EventSink;

/// Telemetry fan-out from one producer to many sinks.
pub struct EventBus {
    tx: Sender<SimulationEvent>,
    rx: Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    enabled: bool,
    delivered: u64,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            tx,
            rx,
            sinks: Vec::new(),
            enabled: true,
            delivered: 0,
        }
    }

    /// Builder form of [`EventBus::add_sink`].
    pub fn with_sink(mut self, sink: impl EventSink + 'static) -> Self {
        self.add_sink(Box::new(sink));
        self
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        tracing::trace!(sink = sink.name(), "telemetry sink registered");
        self.sinks.push(sink);
    }

    /// While disabled, [`EventBus::emit`] drops events.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn emit(&self, event: SimulationEvent) {
        if self.enabled {
            // `rx` is owned by `self`; the channel cannot be disconnected.
            let _ = self.tx.send(event);
        }
    }

    /// Delivers every queued event.
    pub fn flush(&mut self) {
        for event in self.rx.try_iter() {
            for sink in self.sinks.iter_mut() {
                sink.handle(&event);
            }
            self.delivered += 1;
        }
    }

    /// Final flush followed by [`EventSink::finalize`] on every sink.
    pub fn finish(&mut self) {
        self.flush();
        self.sinks.iter_mut().for_each(|s| s.finalize());
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Events delivered since creation.
    pub fn delivered(&self) -> u64 {
        self.delivered
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
