//! End-to-end matching behavior through the public API
//!
//! Pools are built the way a caller would after header normalization: mixed
//! raw and master frames, numbers stored as text or numbers, gaps in fields.

use calib_solver::parsing::json::parse_pool_json;
use calib_solver::{
    find_all, find_bias, find_dark, find_flat, CalibrationKind, CalibrationPool, FrameMetadata,
    MatchingConfig, MatchingEngine,
};

fn light() -> FrameMetadata {
    FrameMetadata::new()
        .with("camera", "X")
        .with("exposureseconds", 90.0)
        .with("gain", 100)
        .with("offset", 10)
        .with("settemp", -10.0)
        .with("filter", "Ha")
        .with("date", "2024-01-15")
}

fn frame(kind: &str) -> FrameMetadata {
    FrameMetadata::new()
        .with("type", kind)
        .with("camera", "X")
        .with("gain", 100)
        .with("offset", 10)
}

fn dark(exposure: f64) -> FrameMetadata {
    frame("DARK")
        .with("exposureseconds", exposure)
        .with("settemp", -10.0)
}

fn flat(filter: &str, date: &str) -> FrameMetadata {
    frame("MASTER FLAT").with("filter", filter).with("date", date)
}

fn with_tolerance(days: u32) -> MatchingConfig {
    MatchingConfig {
        date_tolerance_days: Some(days),
        ..MatchingConfig::default()
    }
}

#[test]
fn test_dark_shortest_long_enough() {
    let pool = CalibrationPool::new()
        .with("dark_60.fits", dark(60.0))
        .with("dark_120.fits", dark(120.0));

    let light = FrameMetadata::new()
        .with("camera", "X")
        .with("exposureseconds", 90)
        .with("gain", 100);

    assert_eq!(
        find_dark(&light, &pool, &MatchingConfig::default()),
        Some("dark_120.fits")
    );
}

#[test]
fn test_dark_none_long_enough() {
    let pool = CalibrationPool::new()
        .with("dark_60.fits", dark(60.0))
        .with("dark_120.fits", dark(120.0));

    let light = FrameMetadata::new()
        .with("camera", "X")
        .with("exposureseconds", 300);

    assert_eq!(find_dark(&light, &pool, &MatchingConfig::default()), None);
}

#[test]
fn test_dark_never_shorter_than_light() {
    let exposures = [30.0, 60.0, 89.999, 90.0, 180.0, 600.0];
    let pool = exposures
        .iter()
        .enumerate()
        .fold(CalibrationPool::new(), |pool, (i, &e)| {
            pool.with(format!("dark_{i}.fits"), dark(e))
        });

    for light_exposure in [1.0, 45.0, 90.0, 90.5, 200.0, 600.0] {
        let light = light().with("exposureseconds", light_exposure);
        let Some(id) = find_dark(&light, &pool, &MatchingConfig::default()) else {
            continue;
        };
        let chosen = pool.get(id).unwrap().get_f64("exposureseconds").unwrap();
        assert!(chosen >= light_exposure, "{id} shorter than {light_exposure}");
    }
}

#[test]
fn test_dark_exact_preferred_over_longer() {
    // Exact match is listed last and is on the edge of the temperature window
    let pool = CalibrationPool::new()
        .with("dark_100.fits", dark(100.0))
        .with("dark_90.fits", dark(90.0).with("settemp", -5.0));

    assert_eq!(
        find_dark(&light(), &pool, &MatchingConfig::default()),
        Some("dark_90.fits")
    );
}

#[test]
fn test_dark_temperature_boundary_is_inclusive() {
    let pool = CalibrationPool::new()
        .with("too_warm.fits", dark(90.0).with("settemp", -4.9))
        .with("edge.fits", dark(120.0).with("settemp", -15.0));

    assert_eq!(
        find_dark(&light(), &pool, &MatchingConfig::default()),
        Some("edge.fits")
    );
}

#[test]
fn test_dark_temperature_unchecked_without_light_settemp() {
    // Far outside any tolerance, but the light records no set temperature
    let pool = CalibrationPool::new().with("dark_warm.fits", dark(90.0).with("settemp", 20.0));

    let light = FrameMetadata::new()
        .with("camera", "X")
        .with("exposureseconds", 90.0)
        .with("gain", 100)
        .with("offset", 10);
    let strict = MatchingConfig {
        temperature_tolerance: 0.0,
        ..MatchingConfig::default()
    };

    assert_eq!(find_dark(&light, &pool, &strict), Some("dark_warm.fits"));
    let cold_light = light.with("settemp", -10.0);
    assert_eq!(find_dark(&cold_light, &pool, &strict), None);
}

#[test]
fn test_gain_requirement_toggles() {
    let pool = CalibrationPool::new().with("dark_200.fits", dark(90.0).with("gain", 200));

    assert_eq!(find_dark(&light(), &pool, &MatchingConfig::default()), None);

    let relaxed = MatchingConfig {
        require_gain_match: false,
        ..MatchingConfig::default()
    };
    assert_eq!(find_dark(&light(), &pool, &relaxed), Some("dark_200.fits"));
}

#[test]
fn test_offset_requirement_toggles() {
    let pool = CalibrationPool::new().with("bias_off.fits", frame("BIAS").with("offset", 30));

    assert_eq!(find_bias(&light(), &pool, &MatchingConfig::default()), None);

    let relaxed = MatchingConfig {
        require_offset_match: false,
        ..MatchingConfig::default()
    };
    assert_eq!(find_bias(&light(), &pool, &relaxed), Some("bias_off.fits"));
}

#[test]
fn test_bias_first_in_pool_order() {
    let first = CalibrationPool::new()
        .with("bias_a.fits", frame("BIAS"))
        .with("bias_b.fits", frame("MASTER BIAS"));
    let reversed = CalibrationPool::new()
        .with("bias_b.fits", frame("MASTER BIAS"))
        .with("bias_a.fits", frame("BIAS"));

    let config = MatchingConfig::default();
    assert_eq!(find_bias(&light(), &first, &config), Some("bias_a.fits"));
    assert_eq!(find_bias(&light(), &reversed, &config), Some("bias_b.fits"));
}

#[test]
fn test_flat_closest_date_within_tolerance() {
    let pool = CalibrationPool::new()
        .with("flat_0101.fits", flat("Ha", "2024-01-01"))
        .with("flat_0114.fits", flat("Ha", "2024-01-14"));

    assert_eq!(
        find_flat(&light(), &pool, &with_tolerance(7)),
        Some("flat_0114.fits")
    );
}

#[test]
fn test_flat_outside_tolerance() {
    let pool = CalibrationPool::new().with("flat_0101.fits", flat("Ha", "2024-01-01"));
    assert_eq!(find_flat(&light(), &pool, &with_tolerance(5)), None);
}

#[test]
fn test_flat_tolerance_boundary_and_mixed_formats() {
    let pool = CalibrationPool::new()
        .with("flat_compact.fits", flat("Ha", "20240108"))
        .with("flat_oiii.fits", flat("OIII", "2024-01-15"));

    // Seven days exactly, compact date on the flat
    assert_eq!(
        find_flat(&light(), &pool, &with_tolerance(7)),
        Some("flat_compact.fits")
    );
    assert_eq!(find_flat(&light(), &pool, &with_tolerance(6)), None);
}

#[test]
fn test_flat_requires_filter() {
    let pool = CalibrationPool::new().with("flat_ha.fits", flat("Ha", "2024-01-15"));
    let no_filter = FrameMetadata::new().with("camera", "X");
    assert_eq!(find_flat(&no_filter, &pool, &MatchingConfig::default()), None);
}

#[test]
fn test_empty_pool_matches_nothing() {
    let pool = CalibrationPool::new();
    let result = find_all(&light(), &pool, &with_tolerance(30));
    assert_eq!(result.dark, None);
    assert_eq!(result.bias, None);
    assert_eq!(result.flat, None);
    assert_eq!(result.missing(), CalibrationKind::ALL.to_vec());
}

#[test]
fn test_find_all_equals_individual_matchers() {
    let pool = parse_pool_json(
        r#"{
            "bias_hi.fits": {"type": "BIAS", "camera": "X", "gain": 300},
            "master_bias.fits": {"type": "master bias", "camera": "X", "gain": "100"},
            "dark_120.fits": {"type": "DARK", "camera": "X", "exposureseconds": "120", "settemp": -10},
            "dark_90.fits": {"type": "MASTER DARK", "camera": "X", "exposureseconds": 90.0, "settemp": -12},
            "flat_ha.fits": {"type": "FLAT", "camera": "X", "filter": "Ha", "date": "2024-01-12T21:04:00"},
            "flat_ha_old.fits": {"type": "FLAT", "camera": "X", "filter": "Ha", "date": "2023-12-01"},
            "other_cam.fits": {"type": "DARK", "camera": "Y", "exposureseconds": 90}
        }"#,
    )
    .unwrap();

    for config in [
        MatchingConfig::default(),
        with_tolerance(5),
        MatchingConfig {
            prefer_exact_exposure: false,
            require_gain_match: false,
            ..MatchingConfig::default()
        },
    ] {
        let result = find_all(&light(), &pool, &config);
        assert_eq!(result.dark, find_dark(&light(), &pool, &config));
        assert_eq!(result.bias, find_bias(&light(), &pool, &config));
        assert_eq!(result.flat, find_flat(&light(), &pool, &config));
    }

    let engine = MatchingEngine::with_config(&pool, with_tolerance(5));
    let result = engine.find_all(&light());
    assert_eq!(result.dark, Some("dark_90.fits"));
    assert_eq!(result.bias, Some("master_bias.fits"));
    assert_eq!(result.flat, Some("flat_ha.fits"));
    assert!(result.is_complete());
}

#[test]
fn test_results_are_pool_keys() {
    let pool = CalibrationPool::new()
        .with("/data/cal/Dark 90s.fits", dark(90.0))
        .with("/data/cal/Bias.fits", frame("BIAS"))
        .with("/data/cal/Flat Ha.fits", flat("Ha", "2024-01-15"));

    let engine = MatchingEngine::new(&pool);
    let result = engine.find_all(&light());
    for kind in CalibrationKind::ALL {
        let id = result.get(kind).unwrap();
        assert!(pool.contains(id));
    }
}
