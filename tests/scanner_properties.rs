mod common;

use approx::assert_abs_diff_eq;
use common::{hours_between, reference, SyntheticSky};
use planet_alert::visibility::crossing::{find_set_after, scan, Crossing};
use planet_alert::visibility::SearchConfig;
use planet_alert::Body;

const STEP_HOURS: f64 = 2.5 / 60.0;

#[test]
fn test_single_arc_gives_one_rise_and_one_set() {
    let now = reference();
    let sky = SyntheticSky::new(now).with_body(
        Body::Jupiter,
        &[(-48.0, -40.0), (10.01, 30.0), (48.0, -40.0)],
    );
    let result = scan(&sky, Body::Jupiter, &now, &SearchConfig::default()).unwrap();

    let rise = result.last_rise_before.expect("past rise");
    let set = result.next_set_after.expect("future set");
    assert_eq!(result.next_rise_after, None);
    assert!(rise < set);
    // crossings at -15.27 h and +26.56 h
    assert_abs_diff_eq!(hours_between(&now, &rise), -15.27, epsilon = STEP_HOURS + 0.01);
    assert_abs_diff_eq!(hours_between(&now, &set), 26.56, epsilon = STEP_HOURS + 0.01);
}

#[test]
fn test_scan_stops_after_set_following_future_rise() {
    let now = reference();
    let sky = SyntheticSky::new(now).with_body(
        Body::Mars,
        &[(-48.0, -40.0), (2.01, -40.0), (5.01, 20.0), (9.01, -40.0)],
    );
    let result = scan(&sky, Body::Mars, &now, &SearchConfig::default()).unwrap();

    assert_abs_diff_eq!(
        hours_between(&now, &result.next_rise_after.unwrap()),
        4.0,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        hours_between(&now, &result.next_set_after.unwrap()),
        154.0 / 24.0,
        epsilon = 1e-9
    );
    // first sample at -48 h, last one at the set sample
    assert_eq!(sky.queries(), 1 + 48 * 24 + 154);
}

#[test]
fn test_scan_covers_whole_window_without_future_rise() {
    let now = reference();
    let sky = SyntheticSky::new(now).with_body(
        Body::Saturn,
        &[(-48.0, 20.0), (3.0, 20.0), (4.0, -20.0)],
    );
    let result = scan(&sky, Body::Saturn, &now, &SearchConfig::default()).unwrap();
    assert!(result.next_set_after.is_some());
    assert_eq!(result.last_rise_before, None);
    // no rise after the set: the scan runs to the end of the 96 h window
    assert_eq!(sky.queries(), 1 + 96 * 24);
}

#[test]
fn test_plateau_on_threshold_is_one_transition() {
    let now = reference();
    let sky = SyntheticSky::new(now).with_body(
        Body::Venus,
        &[
            (1.0, -10.0),
            (1.5, -0.5),
            (3.0, -0.5),
            (4.0, 10.0),
            (6.0, 10.0),
            (7.0, -0.5),
            (9.0, -0.5),
            (10.0, -10.0),
        ],
    );
    let result = scan(&sky, Body::Venus, &now, &SearchConfig::default()).unwrap();

    let rise = hours_between(&now, &result.next_rise_after.unwrap());
    let set = hours_between(&now, &result.next_set_after.unwrap());
    assert!((1.49..1.55).contains(&rise), "rise = {rise}");
    assert!(set > 9.0 && set <= 9.0 + STEP_HOURS + 1e-9, "set = {set}");
    assert_eq!(result.last_rise_before, None);
}

#[test]
fn test_samples_on_threshold_never_double_count() {
    let samples = [-10.0, -0.5, -0.5, -0.5, 3.0, -0.5, -0.5, -0.6];
    let crossings: Vec<Crossing> = samples
        .windows(2)
        .filter_map(|w| Crossing::between(w[0], w[1], -0.5))
        .collect();
    assert_eq!(crossings, vec![Crossing::Rise, Crossing::Set]);
}

#[test]
fn test_latest_past_rise_wins() {
    let now = reference();
    let sky = SyntheticSky::new(now).with_body(
        Body::Uranus,
        &[
            (-48.0, -20.0),
            (-40.0, 20.0),
            (-30.0, -20.0),
            (-10.0, -20.0),
            (-8.0, 20.0),
        ],
    );
    let result = scan(&sky, Body::Uranus, &now, &SearchConfig::default()).unwrap();
    let rise = hours_between(&now, &result.last_rise_before.unwrap());
    // rises near -44.1 h and -9.025 h
    assert_abs_diff_eq!(rise, -9.025, epsilon = STEP_HOURS + 0.01);
    assert_eq!(result.next_set_after, None);
    assert_eq!(result.next_rise_after, None);
}

#[test]
fn test_scan_is_idempotent() {
    let now = reference();
    let sky = SyntheticSky::new(now).with_body(
        Body::Neptune,
        &[(-30.0, -5.0), (-20.0, 5.0), (0.0, 2.0), (6.0, -3.0), (20.0, 4.0), (30.0, -4.0)],
    );
    let config = SearchConfig::default();

    let first = scan(&sky, Body::Neptune, &now, &config).unwrap();
    let first_queries = sky.queries();
    sky.reset_queries();
    let second = scan(&sky, Body::Neptune, &now, &config).unwrap();

    assert_eq!(first, second);
    assert_eq!(first_queries, sky.queries());
}

#[test]
fn test_coarser_step_keeps_event_within_one_step() {
    let now = reference();
    let sky = SyntheticSky::new(now).with_body(
        Body::Mars,
        &[(-48.0, -40.0), (2.01, -40.0), (5.01, 20.0), (9.01, -40.0)],
    );
    let config = SearchConfig {
        step_minutes: 10.0,
        ..Default::default()
    };
    let result = scan(&sky, Body::Mars, &now, &config).unwrap();
    let rise = hours_between(&now, &result.next_rise_after.unwrap());
    // true crossing at 3.985 h
    assert!(rise >= 3.985 && rise < 3.985 + 10.0 / 60.0, "rise = {rise}");
}

#[test]
fn test_secondary_search_reaches_past_primary_window() {
    let now = reference();
    let sky = SyntheticSky::new(now).with_body(
        Body::Saturn,
        &[(39.01, -20.0), (40.01, 20.0), (60.01, 20.0), (61.01, -20.0)],
    );
    let config = SearchConfig::default();

    let primary = scan(&sky, Body::Saturn, &now, &config).unwrap();
    let rise = primary.next_rise_after.unwrap();
    assert_eq!(primary.next_set_after, None);

    let set = find_set_after(&sky, Body::Saturn, &rise, &config)
        .unwrap()
        .unwrap();
    assert_abs_diff_eq!(hours_between(&now, &set), 1453.0 / 24.0, epsilon = 1e-9);
}
