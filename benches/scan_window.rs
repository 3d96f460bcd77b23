use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use planet_alert::observers::locations::resolve_location;
use planet_alert::visibility::classifier::classify_bodies;
use planet_alert::visibility::crossing::scan;
use planet_alert::visibility::SearchConfig;
use planet_alert::{AltitudeOracle, Body, EphemerisOracle, Instant};

fn setup() -> (EphemerisOracle, Instant) {
    let site = resolve_location("winnipeg", &BTreeMap::new()).unwrap();
    let now = Instant::parse("2026-10-14T21:30:00-05:00", site.time_zone).unwrap();
    (EphemerisOracle::new(&site), now)
}

/// One altitude query, the unit cost of every scan.
fn bench_altitude(c: &mut Criterion) {
    let (oracle, now) = setup();

    c.bench_function("ephemeris/altitude_jupiter", |b| {
        b.iter(|| black_box(oracle.altitude(black_box(Body::Jupiter), &now).unwrap()))
    });
}

/// Primary scan of a body that is up at the reference.
fn bench_full_window(c: &mut Criterion) {
    let (oracle, now) = setup();
    let config = SearchConfig::default();

    c.bench_function("scan/saturn_2.5min", |b| {
        b.iter(|| black_box(scan(&oracle, Body::Saturn, black_box(&now), &config).unwrap()))
    });
}

/// Every planet, as one run does it.
fn bench_classify_all(c: &mut Criterion) {
    let (oracle, now) = setup();
    let config = SearchConfig::default();

    c.bench_function("classify/all_planets", |b| {
        b.iter(|| {
            let rows = classify_bodies(&oracle, &Body::PLANETS, black_box(&now), &config).unwrap();
            black_box(rows);
        })
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default().sample_size(20);
    targets = bench_altitude, bench_full_window, bench_classify_all
);
criterion_main!(benches);
