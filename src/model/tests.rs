use super::*;

#[test]
fn dataset_keys_roundtrip_their_storage_names() {
    for key in DatasetKey::ALL {
        assert_eq!(key.key().parse::<DatasetKey>().unwrap(), key);
    }
    assert!("felt_4_ring".parse::<DatasetKey>().is_err());

    assert_eq!(DatasetKey::Jeans2Ring.label(), "Jeans 2 Ring");
    assert_eq!(DatasetKey::Jeans2Ring.substrate(), Substrate::Jeans);
    assert_eq!(DatasetKey::Jeans2Ring.ring_count(), 2);
}

#[test]
fn new_table_is_anchor_seeded() {
    let table = SweepTable::new();
    let levels: Vec<f64> = table.rows.iter().map(|r| r.glucose).collect();
    assert_eq!(levels, GLUCOSE_ANCHORS.to_vec());
    assert_eq!(table.rows[0].s11, PortSample::default());
}

#[test]
fn row_editing() {
    let mut table = SweepTable::empty();
    table.add_row();
    table.add_row();

    table.set_glucose(1, 72.0).unwrap();
    table.set_value(1, SweepField::S11Frequency, 2.45).unwrap();
    table.set_value(1, SweepField::S21Amplitude, -12.5).unwrap();

    assert_eq!(table.rows[1].glucose, 72.0);
    assert_eq!(table.rows[1].s11.frequency, 2.45);
    assert_eq!(table.rows[1].s21.amplitude, -12.5);

    table.delete_row(0).unwrap();
    assert_eq!(table.rows.len(), 1);
    assert!(matches!(
        table.delete_row(5),
        Err(TableError::RowOutOfRange(5))
    ));
}

#[test]
fn row_editing_rejects_bad_values() {
    let mut table = SweepTable::empty();
    table.add_row();

    assert!(table.set_glucose(0, -1.0).is_err());
    assert!(table.set_glucose(0, f64::NAN).is_err());
    assert!(table.set_value(0, SweepField::S11Frequency, 0.0).is_err());
    assert!(table.set_value(0, SweepField::S11Frequency, -2.4).is_err());
    assert!(table
        .set_value(0, SweepField::S11Amplitude, f64::INFINITY)
        .is_err());
    // Negative dB is normal for amplitudes.
    table.set_value(0, SweepField::S11Amplitude, -40.0).unwrap();

    assert!(matches!(
        table.set_value(9, SweepField::S11Amplitude, -1.0),
        Err(TableError::RowOutOfRange(9))
    ));
}

#[test]
fn bulk_pairs_fill_rows_in_order() {
    let mut table = SweepTable::new();
    let pairs = [
        PortSample {
            frequency: 2.45,
            amplitude: -10.0,
        },
        PortSample {
            frequency: 2.40,
            amplitude: -14.0,
        },
    ];

    table.apply_pairs(Port::S21, &pairs);

    assert_eq!(table.rows[0].s21.frequency, 2.45);
    assert_eq!(table.rows[1].s21.amplitude, -14.0);
    // Rows beyond the pair count keep their values; S11 untouched.
    assert_eq!(table.rows[2].s21, PortSample::default());
    assert_eq!(table.rows[0].s11, PortSample::default());
}

#[test]
fn csv_roundtrip() {
    let mut table = SweepTable::empty();
    table.add_row();
    table.set_glucose(0, 216.0).unwrap();
    table.set_value(0, SweepField::S11Frequency, 2.45).unwrap();
    table.set_value(0, SweepField::S11Amplitude, -10.5).unwrap();
    table.set_value(0, SweepField::S21Frequency, 3.02).unwrap();
    table.set_value(0, SweepField::S21Amplitude, -7.25).unwrap();

    let mut buffer = Vec::new();
    table.to_csv_writer(&mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert!(text.starts_with("glucose,s11_freq,s11_amp,s21_freq,s21_amp"));

    let restored = SweepTable::from_csv_reader(text.as_bytes()).unwrap();
    assert_eq!(restored, table);
}

#[test]
fn csv_rejects_non_numeric_cells() {
    let csv = "glucose,s11_freq,s11_amp,s21_freq,s21_amp\n0,abc,-10,3.0,-7\n";
    assert!(matches!(
        SweepTable::from_csv_reader(csv.as_bytes()),
        Err(TableError::Csv(_))
    ));
}

#[test]
fn default_parameters_match_the_drawings() {
    let params = AntennaParameters::default();
    assert_eq!(params.substrate, Substrate::Felt);
    assert_eq!(params.ring_count, 2);
    assert_eq!(params.h, 1.0);
    assert_eq!(params.t, 0.035);
    assert_eq!(params.w1, 3.57);
    assert_eq!(params.ls, 98.0);
    params.validate().unwrap();
}

#[test]
fn negative_geometry_is_listed_by_field() {
    let params = AntennaParameters {
        g2: -1.0,
        l5: -0.5,
        ..Default::default()
    };
    let err = params.validate().unwrap_err();
    assert_eq!(err.fields, vec!["g2", "l5"]);
    assert!(err.to_string().contains("g2"));

    // t is deliberately outside the checked set.
    let params = AntennaParameters {
        t: -0.035,
        ..Default::default()
    };
    params.validate().unwrap();
}

#[test]
fn run_input_lifecycle() {
    let mut run = Run::new("Run 1");
    assert_eq!(run.name, "Run 1");
    assert_eq!(run.metrics, RunMetrics::default());

    run.apply_input("2.45 -10\n2.40 -14\n2.31 -19").unwrap();
    assert_eq!(run.records.len(), 3);
    let shift = run.metrics.shift.expect("references present");
    assert!((shift - (2.31 - 2.45)).abs() < 1e-12);
    assert!(run.metrics.sensitivity.is_some());
    let delta = run.metrics.amplitude_delta.expect("references present");
    assert_eq!(delta, -9.0);

    // A failed parse keeps the previous records but the new raw text.
    let err = run.apply_input("garbage").unwrap_err();
    assert_eq!(err.line(), 1);
    assert_eq!(run.records.len(), 3);
    assert_eq!(run.raw_input, "garbage");

    run.clear();
    assert!(run.raw_input.is_empty());
    assert!(run.records.is_empty());
    assert_eq!(run.metrics, RunMetrics::default());
}

#[test]
fn run_parameters_are_validated_on_set() {
    let mut run = Run::new("Run 1");
    let err = run
        .set_parameters(AntennaParameters {
            ws: -50.0,
            ..Default::default()
        })
        .unwrap_err();
    assert_eq!(err.fields, vec!["ws"]);
    // Rejected geometry is not applied.
    assert_eq!(run.parameters.ws, 50.0);

    run.set_parameters(AntennaParameters {
        w1: 4.28,
        ..Default::default()
    })
    .unwrap();
    assert_eq!(run.parameters.w1, 4.28);
}

#[test]
fn single_record_metrics_are_unavailable() {
    let mut run = Run::new("Run 1");
    run.apply_input("2.45 -10").unwrap();
    assert_eq!(run.metrics.shift, None);
    assert_eq!(run.metrics.sensitivity, None);
    assert_eq!(run.metrics.amplitude_delta, None);
}
