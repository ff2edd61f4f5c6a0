use approx::assert_abs_diff_eq;
use chart_scales::core::ticks::{nice_linear_domain, nice_time_domain};
use chart_scales::core::{BandScale, LinearScale, TimeScale, XValue};
use proptest::prelude::*;

#[test]
fn nice_linear_rounds_outward_to_tick_step() {
    assert_eq!(nice_linear_domain(0.13, 9.7, 10), (0.0, 10.0));
    assert_eq!(nice_linear_domain(3.0, 97.0, 10), (0.0, 100.0));
}

#[test]
fn nice_time_snaps_to_day_boundaries() {
    use chrono::{TimeZone, Utc};

    let start = Utc.with_ymd_and_hms(2024, 3, 1, 7, 30, 0).single().expect("start");
    let end = Utc.with_ymd_and_hms(2024, 3, 9, 18, 0, 0).single().expect("end");
    let (lo, hi) = nice_time_domain(
        start.timestamp_millis() as f64,
        end.timestamp_millis() as f64,
        10,
    );
    let day_start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single().expect("lo");
    let day_end = Utc.with_ymd_and_hms(2024, 3, 10, 0, 0, 0).single().expect("hi");
    assert_eq!(lo, day_start.timestamp_millis() as f64);
    assert_eq!(hi, day_end.timestamp_millis() as f64);
}

proptest! {
    #[test]
    fn linear_scale_round_trips_pixels(
        start in -1_000_000.0f64..1_000_000.0,
        span in 0.001f64..1_000_000.0,
        width in 1.0f64..4_000.0,
        ratio in 0.0f64..1.0,
    ) {
        let scale = LinearScale::new(start, start + span, 0.0, width).expect("scale");
        let value = start + span * ratio;
        let pixel = scale.domain_to_pixel(value).expect("pixel");
        let back = scale.pixel_to_domain(pixel).expect("value");
        prop_assert!((back - value).abs() <= span * 1e-9 + 1e-6);
    }

    #[test]
    fn inverted_y_range_keeps_order_reversed(
        max in 1.0f64..10_000.0,
        height in 10.0f64..2_000.0,
    ) {
        let scale = LinearScale::new(0.0, max, height, 0.0).expect("scale");
        prop_assert_eq!(scale.domain_to_pixel(0.0).expect("zero"), height);
        prop_assert!(scale.domain_to_pixel(max).expect("max").abs() <= 1e-9);
    }

    #[test]
    fn nice_linear_contains_original_domain(
        start in -10_000.0f64..10_000.0,
        span in 0.01f64..10_000.0,
    ) {
        let (lo, hi) = nice_linear_domain(start, start + span, 10);
        prop_assert!(lo <= start + 1e-9);
        prop_assert!(hi >= start + span - 1e-9);
    }

    #[test]
    fn time_scale_round_trips_millis(
        start in 0.0f64..4_000_000_000_000.0,
        span in 1_000.0f64..100_000_000_000.0,
        ratio in 0.0f64..1.0,
    ) {
        let scale = TimeScale::new(start, start + span, 0.0, 800.0).expect("scale");
        let millis = start + span * ratio;
        let pixel = scale.millis_to_pixel(millis).expect("pixel");
        let back = scale.pixel_to_millis(pixel).expect("millis");
        assert_abs_diff_eq!(back, millis, epsilon = 0.01 + span * 1e-9);
        prop_assert!(back.is_finite());
    }

    #[test]
    fn nice_time_contains_original_domain(
        start in 0.0f64..4_000_000_000_000.0,
        span in 1_000.0f64..100_000_000_000.0,
    ) {
        let (lo, hi) = nice_time_domain(start, start + span, 10);
        prop_assert!(lo <= start);
        prop_assert!(hi >= start + span);
    }

    #[test]
    fn band_brush_covers_requested_slots(count in 2usize..30, first in 0usize..30, len in 0usize..30) {
        let first = first % count;
        let last = (first + len).min(count - 1);
        let domain: Vec<XValue> = (0..count).map(|i| XValue::from(format!("c{i}"))).collect();
        let scale = BandScale::band(domain.clone(), (0.0, 600.0), 0.2).expect("scale");
        let step = scale.step();

        let selected = scale.values_for_pixels(step * (first as f64 + 0.5), step * (last as f64 + 0.5));
        prop_assert_eq!(selected, domain[first..=last].to_vec());
    }
}
