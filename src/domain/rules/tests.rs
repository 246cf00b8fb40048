// Unit tests for region rules

use super::*;

fn freezes(pairs: &[(f64, f64)]) -> Vec<FreezeRegion> {
    pairs
        .iter()
        .map(|&(start, end)| FreezeRegion::new(start, end).unwrap())
        .collect()
}

fn spans(keep: &[KeepRegion]) -> Vec<(f64, f64)> {
    keep.iter().map(|k| (k.start, k.end)).collect()
}

#[test]
fn test_keep_regions_with_no_freezes() {
    let keep = compute_keep_regions(&[], 100.0);
    assert_eq!(spans(&keep), vec![(0.0, 100.0)]);
}

#[test]
fn test_keep_regions_whole_video_frozen() {
    let keep = compute_keep_regions(&freezes(&[(0.0, 100.0)]), 100.0);
    assert!(keep.is_empty());
}

#[test]
fn test_keep_regions_freeze_at_start() {
    let keep = compute_keep_regions(&freezes(&[(0.0, 10.0)]), 100.0);
    assert_eq!(spans(&keep), vec![(10.0, 100.0)]);
}

#[test]
fn test_keep_regions_freeze_at_end() {
    let keep = compute_keep_regions(&freezes(&[(90.0, 100.0)]), 100.0);
    assert_eq!(spans(&keep), vec![(0.0, 90.0)]);
}

#[test]
fn test_keep_regions_freeze_in_middle() {
    let keep = compute_keep_regions(&freezes(&[(40.0, 60.0)]), 100.0);
    assert_eq!(spans(&keep), vec![(0.0, 40.0), (60.0, 100.0)]);
}

#[test]
fn test_keep_regions_multiple_freezes() {
    let keep = compute_keep_regions(&freezes(&[(10.0, 20.0), (50.0, 60.0)]), 100.0);
    assert_eq!(spans(&keep), vec![(0.0, 10.0), (20.0, 50.0), (60.0, 100.0)]);
}

#[test]
fn test_keep_regions_adjacent_freezes() {
    let keep = compute_keep_regions(&freezes(&[(10.0, 20.0), (20.0, 30.0)]), 100.0);
    assert_eq!(spans(&keep), vec![(0.0, 10.0), (30.0, 100.0)]);
}

#[test]
fn test_keep_regions_freeze_past_duration() {
    // Probe duration can be slightly shorter than the last reported freeze end
    let keep = compute_keep_regions(&freezes(&[(80.0, 90.4)]), 90.0);
    assert_eq!(spans(&keep), vec![(0.0, 80.0)]);
}

#[test]
fn test_keep_regions_two_freezes_on_ninety_seconds() {
    let keep = compute_keep_regions(&freezes(&[(10.0, 15.0), (45.2, 50.7)]), 90.0);
    assert_eq!(spans(&keep), vec![(0.0, 10.0), (15.0, 45.2), (50.7, 90.0)]);
}

#[test]
fn test_keep_and_freeze_lengths_partition_duration() {
    let cases: Vec<(Vec<(f64, f64)>, f64)> = vec![
        (vec![], 42.0),
        (vec![(0.0, 3.5)], 42.0),
        (vec![(1.25, 2.5), (2.5, 7.75), (30.0, 42.0)], 42.0),
        (vec![(10.0, 15.0), (45.2, 50.7)], 90.0),
        (vec![(0.1, 0.2), (0.3, 0.4), (0.5, 0.6), (88.8, 99.9)], 123.456),
    ];

    for (pairs, duration) in cases {
        let freezes = freezes(&pairs);
        let keep = compute_keep_regions(&freezes, duration);
        let summary = RegionSummary::new(&freezes, &keep, duration);
        let total = summary.kept_seconds + summary.removed_seconds;
        assert!(
            (total - duration).abs() < 1e-9,
            "kept + removed = {} for duration {}",
            total,
            duration
        );
        assert!(keep.iter().all(|k| k.start < k.end));
    }
}

#[test]
fn test_ensure_ordered_accepts_ascending_and_adjacent() {
    assert!(ensure_ordered(&[]).is_ok());
    assert!(ensure_ordered(&freezes(&[(10.0, 20.0), (20.0, 30.0), (45.0, 50.0)])).is_ok());
}

#[test]
fn test_ensure_ordered_rejects_overlap() {
    let err = ensure_ordered(&freezes(&[(10.0, 20.0), (15.0, 30.0)])).unwrap_err();
    match err {
        FreezecutError::UnorderedRegions {
            index,
            start,
            previous_end,
        } => {
            assert_eq!(index, 1);
            assert_eq!(start, 15.0);
            assert_eq!(previous_end, 20.0);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_ensure_ordered_rejects_descending() {
    assert!(ensure_ordered(&freezes(&[(50.0, 60.0), (10.0, 20.0)])).is_err());
}

#[test]
fn test_region_summary_percentages() {
    let freezes = freezes(&[(10.0, 20.0), (50.0, 60.0)]);
    let keep = compute_keep_regions(&freezes, 100.0);
    let summary = RegionSummary::new(&freezes, &keep, 100.0);

    assert_eq!(summary.freeze_count, 2);
    assert_eq!(summary.keep_count, 3);
    assert!((summary.kept_percent() - 80.0).abs() < 1e-9);
    assert!((summary.removed_percent() - 20.0).abs() < 1e-9);
}

#[test]
fn test_region_summary_zero_duration() {
    let summary = RegionSummary::new(&[], &[], 0.0);
    assert_eq!(summary.kept_percent(), 0.0);
    assert_eq!(summary.removed_percent(), 0.0);
}
