//! End-to-end checks of the public engine surface.
//!
//! Run with: `cargo test -p expocalc-core`

use proptest::prelude::*;

use expocalc_core::common_values::{
    format_common_f_number, parse_common_f_number, parse_common_iso, parse_common_shutter_speed,
};
use expocalc_core::table::one_d::DEDUP_TOLERANCE;
use expocalc_core::units::{
    av_to_f_number, f_number_to_av, iso_to_sensitivity, sensitivity_to_iso, shutter_speed_to_tv,
    tv_to_shutter_speed,
};
use expocalc_core::{
    ExposureValues, Param, PartialExposure, RangeConfig, calculate_missing_value,
    generate_1d_table_data, generate_matrix_table_data, generate_steps,
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "got {actual}, expected {expected}, diff {diff} > {tol}"
    );
}

fn relative_close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0)
}

proptest! {
    #[test]
    fn solver_matches_each_rearrangement(
        ev in -20.0f64..20.0,
        av in -5.0f64..15.0,
        tv in -10.0f64..20.0,
        iso in -5.0f64..15.0,
    ) {
        let known = PartialExposure::empty()
            .with(Param::Av, av)
            .with(Param::Tv, tv)
            .with(Param::Iso, iso);
        prop_assert_eq!(calculate_missing_value(&known, Param::Ev), Ok(av + tv - iso));

        let known = PartialExposure::empty()
            .with(Param::Ev, ev)
            .with(Param::Tv, tv)
            .with(Param::Iso, iso);
        prop_assert_eq!(calculate_missing_value(&known, Param::Av), Ok(ev - tv + iso));

        let known = PartialExposure::empty()
            .with(Param::Ev, ev)
            .with(Param::Av, av)
            .with(Param::Iso, iso);
        prop_assert_eq!(calculate_missing_value(&known, Param::Tv), Ok(ev - av + iso));

        let known = PartialExposure::empty()
            .with(Param::Ev, ev)
            .with(Param::Av, av)
            .with(Param::Tv, tv);
        prop_assert_eq!(calculate_missing_value(&known, Param::Iso), Ok(av + tv - ev));
    }

    #[test]
    fn unit_conversions_round_trip(x in -30.0f64..30.0) {
        prop_assert!(relative_close(f_number_to_av(av_to_f_number(x)), x));
        prop_assert!(relative_close(shutter_speed_to_tv(tv_to_shutter_speed(x)), x));
        prop_assert!(relative_close(sensitivity_to_iso(iso_to_sensitivity(x)), x));
    }

    #[test]
    fn steps_are_ascending_and_bounded(
        min in -10.0f64..10.0,
        span in 0.0f64..10.0,
        which in 0usize..3,
    ) {
        let step = [1.0, 0.5, 1.0 / 3.0][which];
        let max = min + span;
        let steps = generate_steps(min, max, step);
        prop_assert!(!steps.is_empty());
        for pair in steps.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }
    }
}

#[test]
fn ev_from_known_values() {
    let known = PartialExposure::empty()
        .with(Param::Av, 5.0)
        .with(Param::Tv, 7.0)
        .with(Param::Iso, 0.0);
    assert_eq!(calculate_missing_value(&known, Param::Ev), Ok(12.0));
}

#[test]
fn step_sequences() {
    assert_eq!(generate_steps(0.0, 3.0, 1.0), vec![0.0, 1.0, 2.0, 3.0]);
    let thirds = generate_steps(0.0, 1.0, 1.0 / 3.0);
    assert_eq!(thirds.len(), 4);
    assert_close(thirds[1], 0.333, 1e-3);
    assert_close(thirds[2], 0.667, 1e-3);
    assert_close(thirds[3], 1.0, 1e-12);
}

#[test]
fn snapped_aperture_and_parsed_shutter() {
    assert_eq!(format_common_f_number(f_number_to_av(2.83)), "f/2.8");

    let tv = parse_common_shutter_speed("1/125").expect("1/125 should parse");
    assert_close(tv_to_shutter_speed(tv), 1.0 / 125.0, 1e-12);
    assert_eq!(parse_common_shutter_speed("abc"), None);

    let av = parse_common_f_number("f/8").expect("f/8 should parse");
    assert_close(av, 6.0, 1e-12);
    let iso = parse_common_iso("ISO 1600").expect("ISO 1600 should parse");
    assert_close(iso, 4.0, 1e-12);
}

#[test]
fn one_d_table_rows_are_consistent_in_range_and_distinct() {
    let ranges = RangeConfig::default();
    let values = ExposureValues::new(12.0, 5.0, 7.0, 0.0);

    for step in [1.0, 0.5, 1.0 / 3.0] {
        let table = generate_1d_table_data(Param::Av, Param::Tv, &values, &ranges, step)
            .expect("distinct fixed params");
        assert!(!table.combinations.is_empty());

        for row in &table.combinations {
            assert_close(row.ev, row.av + row.tv - row.iso, 1e-9);
            for p in Param::ALL {
                assert!(ranges.get(p).contains(row.get(p)), "{p} out of range in {row:?}");
            }
        }
        for (i, a) in table.combinations.iter().enumerate() {
            for b in &table.combinations[i + 1..] {
                assert!(!a.approx_eq(b, DEDUP_TOLERANCE));
            }
        }
    }
}

#[test]
fn matrix_table_dimensions_and_cells() {
    let ranges = RangeConfig::default();
    let values = ExposureValues::new(12.0, 5.0, 7.0, 0.0);

    for step in [1.0, 0.5, 1.0 / 3.0] {
        let data = generate_matrix_table_data(Param::Iso, Param::Ev, &values, &ranges, step)
            .expect("distinct fixed/output params");

        assert_eq!(data.grid.len(), data.row_values.len());
        assert!(data.grid.iter().all(|row| row.len() == data.col_values.len()));
        assert!(data.filled_cells() > 0);

        for (r, row) in data.grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let Some(ev) = cell else { continue };
                let av = data.row_values[r];
                let tv = data.col_values[c];
                assert_close(*ev, av + tv - data.fixed_value, 1e-9);
                assert!(ranges.ev.contains(*ev));
            }
        }
    }
}

#[test]
fn table_results_serialize_for_the_ui() {
    let data = generate_matrix_table_data(
        Param::Av,
        Param::Tv,
        &ExposureValues::default(),
        &RangeConfig::default(),
        1.0,
    )
    .expect("distinct fixed/output params");
    let json = serde_json::to_value(&data).expect("matrix data serializes");
    assert_eq!(json["fixed_param"], "av");
    assert_eq!(json["row_param"], "ev");
    assert_eq!(json["col_param"], "iso");
}
