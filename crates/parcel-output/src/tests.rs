//! Unit tests for the event producers.

use std::fs;

use parcel_core::{EventKind, GeoPoint, LocationId, SimTime, TrackingEvent};

use crate::{ChannelProducer, CsvProducer, JsonLinesProducer, Producer, ProducerError};

fn event(package_id: &str, time: i64, kind: EventKind) -> TrackingEvent {
    TrackingEvent {
        package_id: package_id.into(),
        time: SimTime(time),
        kind,
        location: LocationId(3),
        position: GeoPoint::new(47.6, -122.3),
    }
}

// ── CSV ───────────────────────────────────────────────────────────────────────

#[test]
fn csv_writes_header_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.csv");

    let mut producer = CsvProducer::new(&path).unwrap();
    producer.send(&event("PKG-1", 100, EventKind::PickedUp)).unwrap();
    producer.send(&event("PKG-2", 200, EventKind::Delivered)).unwrap();
    producer.close().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "package_id,time,event,location,lat,lon");
    assert!(lines[1].starts_with("PKG-1,100,picked_up,3,"));
    assert!(lines[2].starts_with("PKG-2,200,delivered,3,"));
}

#[test]
fn csv_close_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let mut producer = CsvProducer::new(&dir.path().join("events.csv")).unwrap();
    producer.send(&event("PKG-1", 1, EventKind::PickedUp)).unwrap();
    producer.close().unwrap();
    producer.close().unwrap();
}

// ── JSON lines ────────────────────────────────────────────────────────────────

#[test]
fn json_lines_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");

    let mut producer = JsonLinesProducer::new(&path).unwrap();
    let sent = vec![
        event("PKG-1", 100, EventKind::PickedUp),
        event("PKG-1", 900, EventKind::ArrivedAt),
    ];
    for e in &sent {
        producer.send(e).unwrap();
    }
    producer.close().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let got: Vec<TrackingEvent> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(got.len(), 2);
    assert_eq!(got[0].package_id, "PKG-1");
    assert_eq!(got[0].kind, EventKind::PickedUp);
    assert_eq!(got[1].time, SimTime(900));
}

// ── Channel ───────────────────────────────────────────────────────────────────

#[test]
fn channel_delivers_in_order() {
    let (mut producer, rx) = ChannelProducer::bounded(16);
    producer.send(&event("A", 1, EventKind::PickedUp)).unwrap();
    producer.send(&event("B", 2, EventKind::PickedUp)).unwrap();
    producer.close().unwrap();
    drop(producer);

    let ids: Vec<String> = rx.iter().map(|e| e.package_id).collect();
    assert_eq!(ids, vec!["A", "B"]);
}

#[test]
fn channel_send_fails_once_receiver_is_gone() {
    let (mut producer, rx) = ChannelProducer::bounded(1);
    drop(rx);

    match producer.send(&event("A", 1, EventKind::PickedUp)) {
        Err(ProducerError::Closed) => {}
        other => panic!("expected Closed, got {other:?}"),
    }
}

#[test]
fn multiple_producers_feed_one_receiver() {
    // One producer per worker, all wrapping clones of the same sender.
    let (tx, rx) = std::sync::mpsc::sync_channel(16);
    let mut producer_a = ChannelProducer::from_sender(tx.clone());
    let mut producer_b = ChannelProducer::from_sender(tx);

    producer_a.send(&event("A", 1, EventKind::PickedUp)).unwrap();
    producer_b.send(&event("B", 2, EventKind::PickedUp)).unwrap();
    drop(producer_a);
    drop(producer_b);

    let ids: Vec<String> = rx.iter().map(|e| e.package_id).collect();
    assert_eq!(ids, vec!["A", "B"]);
}
