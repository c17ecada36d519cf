//! Integration tests for drape-telemetry.

use drape_telemetry::bus::EventBus;
use drape_telemetry::events::{EventKind, SimulationEvent};
use drape_telemetry::sinks::{EventSink, TracingSink, VecSink};

fn begin(step: u32) -> SimulationEvent {
    SimulationEvent::new(step, EventKind::TimestepBegin { sim_time: step as f64 * 0.01 })
}

// ─── Bus Tests ────────────────────────────────────────────────

#[test]
fn flush_delivers_in_emission_order() {
    let sink = VecSink::new();
    let events = sink.events();
    let mut bus = EventBus::new().with_sink(sink);

    bus.emit(begin(0));
    bus.emit(SimulationEvent::new(0, EventKind::TimestepEnd { wall_time: 0.001 }));
    assert!(events.lock().unwrap().is_empty(), "emit only queues");

    bus.flush();
    let got = events.lock().unwrap();
    assert_eq!(got.len(), 2);
    assert!(matches!(got[0].kind, EventKind::TimestepBegin { .. }));
    assert!(matches!(got[1].kind, EventKind::TimestepEnd { .. }));
    assert_eq!(bus.delivered(), 2);
}

#[test]
fn disabled_bus_drops_events() {
    let sink = VecSink::new();
    let events = sink.events();
    let mut bus = EventBus::new().with_sink(sink);
    bus.set_enabled(false);
    assert!(!bus.is_enabled());

    bus.emit(begin(0));
    bus.flush();
    assert!(events.lock().unwrap().is_empty());
    assert_eq!(bus.delivered(), 0);
}

#[test]
fn every_sink_sees_every_event() {
    let (a, b) = (VecSink::new(), VecSink::new());
    let (ea, eb) = (a.events(), b.events());
    let mut bus = EventBus::new().with_sink(a).with_sink(b);
    assert_eq!(bus.sink_count(), 2);

    for step in 0..3 {
        bus.emit(begin(step));
    }
    bus.emit(SimulationEvent::new(3, EventKind::Energy { kinetic: 0.5 }));
    bus.finish();

    let ea = ea.lock().unwrap();
    assert_eq!(ea.len(), 4);
    assert_eq!(*ea, *eb.lock().unwrap());
    assert_eq!(ea.iter().map(|e| e.timestep).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
}

// ─── Event Tests ──────────────────────────────────────────────

#[test]
fn event_json_roundtrip() {
    let event = SimulationEvent::new(
        5,
        EventKind::ContactDetection {
            contact_count: 12,
            max_penetration: 0.004,
        },
    );
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("ContactDetection"));
    let recovered: SimulationEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(recovered, event);
}

// ─── Sink Tests ───────────────────────────────────────────────

#[test]
fn tracing_sink_handles_every_level() {
    for level in [tracing::Level::TRACE, tracing::Level::INFO, tracing::Level::ERROR] {
        let mut sink = TracingSink::new(level);
        sink.handle(&SimulationEvent::new(
            1,
            EventKind::Convergence {
                iterations: 20,
                final_residual: 1e-7,
            },
        ));
        sink.finalize();
        assert_eq!(sink.name(), "tracing_sink");
    }
}
