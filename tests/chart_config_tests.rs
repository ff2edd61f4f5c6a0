use chart_scales::api::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartConfig, ChartEngine, ChartKind, ChartSnapshot,
    PanningMode, resolve_chart_frame, resolve_view_dimensions,
};
use chart_scales::core::{
    ContinuousDomain, DataPoint, LegendKind, LegendPosition, Series, TimelineOptions, Viewport,
    XDomain, XValue,
};
use chart_scales::interaction::ActiveEntry;
use chart_scales::render::NullRenderer;
use chrono::{TimeZone, Utc};

#[test]
fn config_json_round_trip_keeps_time_overrides() {
    let min = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().expect("min");
    let config = ChartConfig::new(ChartKind::AreaStacked, Viewport::new(800, 400))
        .with_panning(PanningMode::Timeline)
        .with_round_domains(true)
        .with_x_scale_bounds(Some(XValue::Time(min)), None)
        .with_y_scale_bounds(None, Some(0.0))
        .with_legend(LegendKind::Ordinal, LegendPosition::Right)
        .with_timeline(TimelineOptions {
            height: 60.0,
            padding: 5.0,
        });

    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains("\"timeline\""));
    let restored = ChartConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
    assert_eq!(restored.x_scale_min, Some(XValue::Time(min)));
}

#[test]
fn invalid_config_json_reports_invalid_data() {
    let err = ChartConfig::from_json_str("{ not json").expect_err("parse must fail");
    assert!(format!("{err}").contains("failed to parse chart config"));

    let lenient = ChartConfig::from_json_str(
        r#"{ "kind": "line", "viewport": { "width": 10, "height": 10 }, "barPadding": 0 }"#,
    );
    // Unknown keys are ignored; the default padding stays valid.
    assert!(lenient.is_ok());

    let err = ChartConfig::from_json_str(
        r#"{ "kind": "line", "viewport": { "width": 10, "height": 10 }, "bar_padding": 0 }"#,
    )
    .expect_err("zero bar padding");
    assert!(format!("{err}").contains("bar padding"));
}

#[test]
fn legend_and_axes_shrink_plot() {
    let config = ChartConfig::new(ChartKind::Line, Viewport::new(600, 400))
        .with_legend(LegendKind::Ordinal, LegendPosition::Right)
        .with_x_axis(20.0, false)
        .with_y_axis(30.0, false);

    let dims = resolve_view_dimensions(&config);
    // 10 of 12 columns minus margins, then the axis gaps.
    assert_eq!(dims.width, 425.0);
    assert_eq!(dims.height, 355.0);
    assert_eq!(dims.x_offset, 60.0);
}

#[test]
fn bar_y_ticks_widen_domain() {
    let config = ChartConfig::new(ChartKind::BarVertical, Viewport::new(440, 300))
        .with_y_axis_ticks(vec![-5.0, 0.0, 50.0]);
    let results = vec![Series::new(
        "s",
        vec![DataPoint::new("a", 10.0), DataPoint::new("b", -2.0)],
    )];
    let frame = resolve_chart_frame(&config, &results, None).expect("frame");
    assert_eq!(frame.y_domain, (-5.0, 50.0));
    assert_eq!(
        frame.original_x_domain,
        XDomain::Ordinal(vec![XValue::from("a"), XValue::from("b")])
    );
}

#[test]
fn snapshot_contract_round_trips() {
    let config = ChartConfig::new(ChartKind::Line, Viewport::new(440, 300))
        .with_panning(PanningMode::OnChart);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine");
    engine
        .set_results(vec![
            Series::new("a", vec![DataPoint::new(0.0, 1.0), DataPoint::new(10.0, 2.0)]),
            Series::new("b", vec![DataPoint::new(5.0, 3.0)]),
        ])
        .expect("bind");
    engine.activate(ActiveEntry::new("a", 0.0));

    let json = engine.snapshot_json_contract_v1_pretty().expect("contract");
    assert!(json.contains(&format!("\"schema_version\": {CHART_SNAPSHOT_JSON_SCHEMA_V1}")));

    let restored = ChartSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(restored, engine.snapshot());
    assert_eq!(restored.series_points.get("a"), Some(&2));
    assert_eq!(restored.series_points.keys().collect::<Vec<_>>(), vec!["a", "b"]);

    let bare = serde_json::to_string(&engine.snapshot()).expect("bare snapshot");
    assert_eq!(
        ChartSnapshot::from_json_compat_str(&bare).expect("parse bare"),
        restored
    );

    let future = json.replace(
        &format!("\"schema_version\": {CHART_SNAPSHOT_JSON_SCHEMA_V1}"),
        "\"schema_version\": 99",
    );
    assert!(ChartSnapshot::from_json_compat_str(&future).is_err());
}

#[test]
fn snapshot_filter_must_lie_inside_original_domain() {
    let config = ChartConfig::new(ChartKind::Line, Viewport::new(440, 300))
        .with_panning(PanningMode::OnChart);
    let mut engine = ChartEngine::new(NullRenderer::default(), config).expect("engine");
    engine
        .set_results(vec![Series::new(
            "a",
            vec![DataPoint::new(0.0, 1.0), DataPoint::new(10.0, 2.0)],
        )])
        .expect("bind");
    engine
        .apply_filter_domain(XDomain::Continuous(ContinuousDomain::linear(2.0, 8.0)))
        .expect("apply filter");

    let json = engine.snapshot_json_contract_v1_pretty().expect("contract");
    let restored = ChartSnapshot::from_json_compat_str(&json).expect("parse contract");
    assert_eq!(
        restored.filtered_domain,
        Some(XDomain::Continuous(ContinuousDomain::linear(2.0, 8.0)))
    );

    let mut outside = engine.snapshot();
    outside.filtered_domain = Some(XDomain::Continuous(ContinuousDomain::linear(20.0, 40.0)));
    let bare = serde_json::to_string(&outside).expect("bare snapshot");
    let err = ChartSnapshot::from_json_compat_str(&bare).expect_err("filter outside original");
    assert!(format!("{err}").contains("outside the original x domain"));

    let mut wrong_kind = engine.snapshot();
    wrong_kind.filtered_domain = Some(XDomain::Ordinal(vec![XValue::from("a")]));
    let err = wrong_kind.validate_filter().expect_err("kind mismatch");
    assert!(format!("{err}").contains("domain kind mismatch"));

    let mut orphan = engine.snapshot();
    orphan.original_x_domain = None;
    assert!(orphan.validate_filter().is_err());
}
