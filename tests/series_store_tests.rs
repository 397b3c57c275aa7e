use approx::assert_relative_eq;
use chrono::DateTime;
use linechart_rs::core::{Sample, SeriesStore};
use linechart_rs::render::Color;
use rust_decimal::Decimal;

fn store_with(samples: &[(f64, f64)]) -> SeriesStore {
    let mut store = SeriesStore::new("cpu", Color::rgb(1.0, 0.0, 0.0));
    for &(time, value) in samples {
        assert!(store.append(value, time), "sample ({time}, {value}) accepted");
    }
    store
}

#[test]
fn buckets_hold_one_sample_each_on_aligned_grid() {
    let mut store = store_with(&[(0.0, 10.0), (1000.0, 20.0), (2000.0, 10.0)]);

    assert_eq!(
        store.query(0.0, 1000.0, 3),
        &[Some(10.0), Some(20.0), Some(10.0)]
    );
}

#[test]
fn shorter_window_keeps_bucket_boundaries() {
    let mut store = store_with(&[(0.0, 10.0), (1000.0, 20.0), (2000.0, 10.0)]);

    assert_eq!(store.query(0.0, 1000.0, 2), &[Some(10.0), Some(20.0)]);
}

#[test]
fn buckets_average_every_sample_they_contain() {
    let mut store = store_with(&[(0.0, 1.0), (1.0, 3.0), (2.0, 5.0), (5.0, 7.0)]);

    assert_eq!(store.query(0.0, 3.0, 2), &[Some(3.0), Some(7.0)]);
}

#[test]
fn tied_timestamps_are_accepted_and_averaged() {
    let mut store = store_with(&[(5.0, 1.0), (5.0, 3.0)]);

    assert_eq!(store.len(), 2);
    assert_eq!(store.query(5.0, 1.0, 1), &[Some(2.0)]);
}

#[test]
fn empty_edge_buckets_are_interpolated() {
    let mut store = store_with(&[(0.0, 0.0), (10.0, 100.0)]);

    let values = store.query(2.0, 2.0, 4).to_vec();
    assert_eq!(values.len(), 4);
    assert_relative_eq!(values[0].expect("first slot"), 20.0);
    assert_eq!(values[1], None);
    assert_eq!(values[2], None);
    assert_relative_eq!(values[3].expect("last slot"), 80.0);
}

#[test]
fn only_empty_edges_are_interpolated() {
    let mut store = store_with(&[(0.0, 0.0), (100.0, 100.0)]);

    let values = store.query(0.0, 10.0, 3).to_vec();
    assert_eq!(values[0], Some(0.0));
    assert_eq!(values[1], None);
    assert_relative_eq!(values[2].expect("last slot"), 20.0);
}

#[test]
fn single_slot_window_interpolates_inside_a_gap() {
    let mut store = store_with(&[(0.0, 0.0), (10.0, 100.0)]);

    let values = store.query(5.0, 1.0, 1).to_vec();
    assert_relative_eq!(values[0].expect("slot"), 50.0);
}

#[test]
fn edges_without_neighbors_on_both_sides_stay_empty() {
    let mut store = store_with(&[(10.0, 5.0), (20.0, 7.0)]);

    assert_eq!(store.query(0.0, 5.0, 2), &[None, None]);
    assert_eq!(store.query(30.0, 5.0, 2), &[None, None]);
}

#[test]
fn repeated_query_is_served_from_cache() {
    let mut store = store_with(&[(0.0, 1.0), (1.0, 2.0)]);

    let first = store.query(0.0, 1.0, 2).to_vec();
    let second = store.query(0.0, 1.0, 2).to_vec();
    assert_eq!(first, second);

    let max = store.query_max(0.0, 1.0, 2);
    assert_eq!(max, 2.0);

    let stats = store.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 2);
    assert_eq!(stats.scans, 1);
}

#[test]
fn cache_holds_a_single_parameter_set() {
    let mut store = store_with(&[(0.0, 1.0), (1.0, 2.0)]);

    store.query(0.0, 1.0, 2);
    store.query(0.0, 2.0, 1);
    store.query(0.0, 1.0, 2);

    let stats = store.cache_stats();
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.hits, 0);
}

#[test]
fn append_invalidates_cached_result() {
    let mut store = store_with(&[(0.0, 10.0)]);
    assert_eq!(store.query(0.0, 10.0, 1), &[Some(10.0)]);

    assert!(store.append(30.0, 5.0));
    assert_eq!(store.query(0.0, 10.0, 1), &[Some(20.0)]);
    assert_eq!(store.cache_stats().scans, 2);
}

#[test]
fn out_of_order_sample_is_dropped() {
    let mut store = store_with(&[(10.0, 1.0)]);

    assert!(!store.append(2.0, 5.0));
    assert_eq!(store.samples(), &[Sample::new(10.0, 1.0)]);
    assert!(store.try_append(2.0, 5.0).is_err());
}

#[test]
fn non_finite_samples_are_dropped() {
    let mut store = store_with(&[]);

    assert!(!store.append(f64::NAN, 1.0));
    assert!(!store.append(1.0, f64::INFINITY));
    assert!(!store.append(f64::NEG_INFINITY, 2.0));
    assert!(store.is_empty());
}

#[test]
fn rejected_append_keeps_cache_warm() {
    let mut store = store_with(&[(10.0, 1.0)]);
    store.query(0.0, 20.0, 1);

    assert!(!store.append(2.0, 5.0));
    store.query(0.0, 20.0, 1);
    assert_eq!(store.cache_stats().hits, 1);
}

#[test]
fn degenerate_queries_do_not_panic() {
    let mut store = store_with(&[(0.0, 1.0)]);

    assert!(store.query(0.0, 1.0, 0).is_empty());
    assert_eq!(store.query(0.0, 0.0, 2), &[None, None]);
    assert_eq!(store.query(0.0, -1.0, 1), &[None]);
    assert_eq!(store.query(f64::NAN, 1.0, 1), &[None]);
}

#[test]
fn max_ignores_empty_buckets_and_defaults_to_zero() {
    let mut store = store_with(&[(0.0, 3.0), (25.0, 7.0)]);
    // Slot 1 of the two-slot window is interpolated at t=10.
    assert_relative_eq!(store.query_max(0.0, 10.0, 2), 4.6);
    assert_eq!(store.query(0.0, 10.0, 3), &[Some(3.0), None, Some(7.0)]);
    assert_eq!(store.query_max(0.0, 10.0, 3), 7.0);

    let mut empty = store_with(&[]);
    assert_eq!(empty.query(0.0, 1.0, 3), &[None, None, None]);
    assert_eq!(empty.query_max(0.0, 1.0, 3), 0.0);
}

#[test]
fn metadata_and_history_accessors() {
    let mut store = store_with(&[(1.0, 4.0), (2.0, 5.0), (8.0, 6.0)]);

    assert_eq!(store.title(), "cpu");
    assert_eq!(store.color(), Color::rgb(1.0, 0.0, 0.0));
    assert_eq!(store.time_range(), Some((1.0, 8.0)));
    assert_eq!(store.latest_sample(), Some(Sample::new(8.0, 6.0)));
    assert_eq!(store.samples_in_window(2.0, 8.0).len(), 2);

    assert!(store.is_visible());
    store.set_visible(false);
    assert!(!store.is_visible());

    assert_eq!(store_with(&[]).time_range(), None);
}

#[test]
fn chrono_and_decimal_ingestion_use_unix_millis() {
    let mut store = store_with(&[]);
    let first = DateTime::from_timestamp_millis(1_500).expect("timestamp");
    let second = DateTime::from_timestamp_millis(2_500).expect("timestamp");

    assert!(store.append_at(1.0, first));
    store
        .append_decimal(Decimal::new(125, 1), second)
        .expect("decimal sample");

    assert_eq!(
        store.samples(),
        &[Sample::new(1_500.0, 1.0), Sample::new(2_500.0, 12.5)]
    );
    assert!(!store.append_at(1.0, first));
}
