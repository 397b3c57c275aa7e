use linechart_rs::ChartError;
use linechart_rs::api::{ChartRegionConfig, DEFAULT_SAMPLE_RATE};
use linechart_rs::core::{UnitKind, UnitTable};

#[test]
fn empty_json_object_takes_defaults() {
    let config = ChartRegionConfig::from_json_str("{}").expect("config");

    assert_eq!(config, ChartRegionConfig::default());
    assert_eq!(config.sample_rate, DEFAULT_SAMPLE_RATE);
    assert_eq!(config.max_vertical_label_num, 6);
    assert_eq!(config.label_precision, 2);
}

#[test]
fn partial_json_overrides_named_fields_only() {
    let input = r#"{"sample_rate":4.0,"max_vertical_label_num":9}"#;
    let config = ChartRegionConfig::from_json_str(input).expect("config");

    assert_eq!(config.sample_rate, 4.0);
    assert_eq!(config.max_vertical_label_num, 9);
    assert_eq!(
        config.min_label_vertical_spacing,
        ChartRegionConfig::default().min_label_vertical_spacing
    );
}

#[test]
fn json_round_trip_preserves_config() {
    let config = ChartRegionConfig::default()
        .with_sample_rate(3.0)
        .with_label_limits(6.0, 8)
        .with_label_precision(1);

    let json = config.to_json_string().expect("serialize");
    assert_eq!(ChartRegionConfig::from_json_str(&json).expect("parse"), config);
}

#[test]
fn invalid_values_are_rejected() {
    for input in [
        r#"{"sample_rate":0.0}"#,
        r#"{"sample_rate":-2.0}"#,
        r#"{"min_label_vertical_spacing":-1.0}"#,
        r#"{"max_vertical_label_num":1}"#,
        r#"{"label_precision":13}"#,
    ] {
        assert!(
            matches!(
                ChartRegionConfig::from_json_str(input),
                Err(ChartError::InvalidConfig(_))
            ),
            "{input} should be rejected"
        );
    }
}

#[test]
fn malformed_json_reports_parse_error() {
    assert!(matches!(
        ChartRegionConfig::from_json_str("{not json"),
        Err(ChartError::Json(_))
    ));
}

#[test]
fn unit_tables_load_from_json_and_kind_names() {
    let table: UnitTable =
        serde_json::from_str(r#"{"units":["m","km"],"unit_scale":1000.0}"#).expect("table");
    let table = table.validate().expect("valid table");
    assert_eq!(table.units(), &["m", "km"]);

    let kind: UnitKind = serde_json::from_str(r#""frequency""#).expect("kind");
    assert_eq!(UnitTable::for_kind(kind).unit(1), "kHz");
    assert_eq!(kind.to_string(), "frequency");
}
