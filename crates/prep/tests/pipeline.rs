//! End-to-end properties of the inventory preparation pipeline.
#![allow(missing_docs)]

use std::collections::{BTreeMap, HashSet};

use shelfgrid_prep::{InventoryPrep, PrepConfig, PrepError};
use shelfgrid_primitives::{Date, InventoryRecord, Measure, Observation, StoreSku};

fn day(d: u32) -> Date {
    Date::from_ymd_opt(2024, 1, d).unwrap()
}

fn series(records: &[InventoryRecord], key: StoreSku) -> Vec<&InventoryRecord> {
    records.iter().filter(|r| r.key() == key).collect()
}

/// Three keys in two stores, sparse and out of order.
fn sample() -> Vec<Observation> {
    vec![
        Observation::new(day(4), StoreSku::from((1, 100)), "snacks")
            .with(Measure::OnHandInventoryUnits, 40)
            .with(Measure::TotalSalesUnits, 6)
            .with(Measure::UnitsUnderPromotion, 2),
        Observation::new(day(1), StoreSku::from((1, 100)), "snacks")
            .with(Measure::OnHandInventoryUnits, 46)
            .with(Measure::ShelfCapacity, 60)
            .with(Measure::ReplenishmentUnits, 12),
        Observation::new(day(2), StoreSku::from((1, 200)), "dairy")
            .with(Measure::OnHandInventoryUnits, 9)
            .with(Measure::UnitsInTransit, 4),
        Observation::new(day(6), StoreSku::from((2, 100)), "snacks")
            .with(Measure::ShelfCapacity, 30)
            .with(Measure::UnitsOnOrder, 10),
        Observation::new(day(3), StoreSku::from((2, 100)), "snacks")
            .with(Measure::OnHandInventoryUnits, 15),
    ]
}

#[test]
fn row_count_is_days_times_keys() {
    let records = InventoryPrep::new().prepare_records(&sample()).unwrap();

    assert_eq!(records.len(), 6 * 3);

    let unique: HashSet<(Date, StoreSku)> = records.iter().map(|r| (r.date, r.key())).collect();
    assert_eq!(unique.len(), records.len());
}

#[test]
fn observations_appear_unchanged_exactly_once() {
    let observations = sample();
    let records = InventoryPrep::new().prepare_records(&observations).unwrap();

    for obs in &observations {
        let matches: Vec<&InventoryRecord> =
            records.iter().filter(|r| r.date == obs.date && r.key() == obs.key()).collect();
        assert_eq!(matches.len(), 1);
        for measure in Measure::ALL {
            if let Some(value) = obs.measure(measure) {
                assert_eq!(matches[0].measure(measure), Some(value), "{measure} on {}", obs.date);
            }
        }
    }
}

#[test]
fn state_values_come_from_nearest_earlier_observation() {
    let observations = sample();
    let records = InventoryPrep::new().prepare_records(&observations).unwrap();

    let mut by_key: BTreeMap<StoreSku, Vec<&Observation>> = BTreeMap::new();
    for obs in &observations {
        by_key.entry(obs.key()).or_default().push(obs);
    }

    for (key, mut observed) in by_key {
        observed.sort_by_key(|o| o.date);
        for record in series(&records, key) {
            for measure in [Measure::OnHandInventoryUnits, Measure::ShelfCapacity] {
                let expected = observed
                    .iter()
                    .filter(|o| o.date <= record.date)
                    .filter_map(|o| o.measure(measure))
                    .last();
                assert_eq!(record.measure(measure), expected, "{key} {measure} on {}", record.date);
            }
        }
    }
}

#[test]
fn flow_fields_never_null_and_flags_match() {
    let records = InventoryPrep::new().prepare_records(&sample()).unwrap();

    for record in &records {
        for measure in Measure::ALL {
            if measure.default_kind() == shelfgrid_primitives::MeasureKind::Flow {
                assert!(record.measure(measure).is_some());
            }
        }
        assert_eq!(record.promotion_flag, record.units_under_promotion > 0);
        assert_eq!(record.replenishment_flag, record.replenishment_units > 0);
    }

    let promoted: Vec<Date> = records.iter().filter(|r| r.promotion_flag).map(|r| r.date).collect();
    assert_eq!(promoted, vec![day(4)]);
}

#[test]
fn carry_forward_between_two_observations() {
    let key = StoreSku::from((1, 100));
    let observations = vec![
        Observation::new(day(1), key, "snacks")
            .with(Measure::OnHandInventoryUnits, 50)
            .with(Measure::ShelfCapacity, 10),
        Observation::new(day(5), key, "snacks").with(Measure::OnHandInventoryUnits, 30),
    ];

    let records = InventoryPrep::new().prepare_records(&observations).unwrap();
    assert_eq!(records.len(), 5);

    for record in &records[1..4] {
        assert_eq!(record.on_hand_inventory_units, Some(50));
        assert_eq!(record.shelf_capacity, Some(10));
        assert_eq!(record.total_sales_units, 0);
        assert_eq!(record.replenishment_units, 0);
        assert_eq!(record.inventory_pipeline, 0);
        assert_eq!(record.units_in_transit, 0);
        assert_eq!(record.units_in_dc, 0);
        assert_eq!(record.units_on_order, 0);
        assert_eq!(record.units_under_promotion, 0);
    }
    assert_eq!(records[4].on_hand_inventory_units, Some(30));
    assert_eq!(records[4].shelf_capacity, Some(10));
}

#[test]
fn unknown_prior_state_stays_null() {
    let late = StoreSku::from((1, 200));
    let observations = vec![
        Observation::new(day(1), StoreSku::from((1, 100)), "snacks")
            .with(Measure::OnHandInventoryUnits, 5),
        Observation::new(day(5), StoreSku::from((1, 100)), "snacks"),
        Observation::new(day(3), late, "dairy").with(Measure::TotalSalesUnits, 2),
    ];

    let records = InventoryPrep::new().prepare_records(&observations).unwrap();
    let late_series = series(&records, late);
    assert_eq!(late_series.len(), 5);

    for record in &late_series[0..3] {
        assert_eq!(record.on_hand_inventory_units, None);
    }
    for record in &late_series[0..2] {
        assert_eq!(record.total_sales_units, 0);
        assert_eq!(record.units_on_order, 0);
    }
    assert_eq!(late_series[2].total_sales_units, 2);
    assert_eq!(late_series[2].product_category, "dairy");
}

#[test]
fn state_fallback_replaces_unknown_prior_state() {
    let mut config = PrepConfig::default();
    config.imputer.state_fallback = Some(0);
    let prep = InventoryPrep::with_config(config).unwrap();

    let observations = vec![
        Observation::new(day(1), StoreSku::from((1, 100)), "snacks"),
        Observation::new(day(2), StoreSku::from((1, 100)), "snacks")
            .with(Measure::OnHandInventoryUnits, 7),
    ];

    let records = prep.prepare_records(&observations).unwrap();
    assert_eq!(records[0].on_hand_inventory_units, Some(0));
    assert_eq!(records[0].shelf_capacity, Some(0));
    assert_eq!(records[1].on_hand_inventory_units, Some(7));
}

#[test]
fn single_day_single_key() {
    let observations = vec![Observation::new(day(9), StoreSku::from((4, 400)), "bakery")];
    let records = InventoryPrep::new().prepare_records(&observations).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date, day(9));
}

#[test]
fn rerun_on_output_is_idempotent() {
    let prep = InventoryPrep::new();
    let first = prep.prepare_records(&sample()).unwrap();

    let projected: Vec<Observation> = first.iter().map(InventoryRecord::to_observation).collect();
    let second = prep.prepare_records(&projected).unwrap();

    assert_eq!(first, second);
}

#[test]
fn duplicate_observation_fails_whole_run() {
    let key = StoreSku::from((1, 100));
    let observations =
        vec![Observation::new(day(1), key, "snacks"), Observation::new(day(1), key, "snacks")];

    let err = InventoryPrep::new().prepare_records(&observations).unwrap_err();
    assert!(matches!(err, PrepError::DuplicateObservation { count: 2, .. }));
    assert!(err.is_data_error());
}

#[test]
fn custom_state_group_rejected_or_filled_up_front() {
    let state = vec![Measure::OnHandInventoryUnits, Measure::ShelfCapacity, Measure::InventoryPipeline];
    let flow: Vec<Measure> = Measure::ALL.into_iter().filter(|m| !state.contains(m)).collect();
    let mut config = PrepConfig::default();
    config.imputer.state = state;
    config.imputer.flow = flow;

    let err = InventoryPrep::with_config(config.clone()).unwrap_err();
    assert!(matches!(err, PrepError::InvalidFieldClassification(_)));
    assert!(!err.is_data_error());

    config.imputer.state_fallback = Some(0);
    let records = InventoryPrep::with_config(config).unwrap().prepare_records(&sample()).unwrap();
    assert_eq!(records.len(), 6 * 3);

    // (1, 200) is first seen on day 2 and never reports a pipeline value.
    let late = series(&records, StoreSku::from((1, 200)));
    assert_eq!(late[0].inventory_pipeline, 0);
    assert_eq!(late[0].on_hand_inventory_units, Some(0));
    assert_eq!(late[1].on_hand_inventory_units, Some(9));
    assert_eq!(late[5].on_hand_inventory_units, Some(9));
}
