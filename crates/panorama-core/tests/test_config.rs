use std::io::Write;

use panorama_core::catalog::{ResolutionCatalog, Tier};
use panorama_core::config::ViewerConfig;
use panorama_core::error::PanoramaError;

#[test]
fn test_defaults_match_reference_viewer() {
    let config = ViewerConfig::default();
    assert_eq!(config.zoom.min_scale, 1.0);
    assert_eq!(config.zoom.max_scale, 10.0);
    assert_eq!(config.zoom.wheel_zoom_in, 1.1);
    assert_eq!(config.zoom.wheel_zoom_out, 0.9);
    assert_eq!(config.timing.deferred_warm_delay_ms, 2000);
    assert_eq!(config.timing.progress_tick_ms, 100);
    assert_eq!(config.timing.progress_step_percent, 5);
    assert_eq!(config.timing.progress_ceiling_percent, 90);
    assert_eq!(config.timing.swap_delay_ms, 200);
    assert_eq!(config.preload.priority, vec![Tier::Hd, Tier::FourK]);

    let widths: Vec<u32> = config.tiers.iter().map(|t| t.width).collect();
    assert_eq!(widths, vec![1920, 3840, 6400, 10240, 16384]);
    let qualities: Vec<u8> = config.tiers.iter().map(|t| t.quality).collect();
    assert_eq!(qualities, vec![85, 90, 92, 96, 94]);
    assert!(config.validate().is_ok());
}

#[test]
fn test_partial_toml_fills_defaults() {
    let config = ViewerConfig::from_toml_str(
        r#"
        [zoom]
        min_scale = 1.0
        max_scale = 6.0
        wheel_zoom_in = 1.2
        wheel_zoom_out = 0.8
        "#,
    )
    .unwrap();
    assert_eq!(config.zoom.max_scale, 6.0);
    assert_eq!(config.timing.swap_delay_ms, 200);
    assert_eq!(config.tiers.len(), 5);
}

#[test]
fn test_custom_tier_table() {
    let config = ViewerConfig::from_toml_str(
        r#"
        [[tiers]]
        tier = "hd"
        locator = "tiles/a.jpg"
        min_scale = 1.0
        width = 1000
        quality = 80

        [[tiers]]
        tier = "4k"
        locator = "tiles/b.jpg"
        min_scale = 2.0
        width = 2000
        quality = 80

        [[tiers]]
        tier = "6k"
        locator = "tiles/c.jpg"
        min_scale = 3.0
        width = 3000
        quality = 80

        [[tiers]]
        tier = "8k"
        locator = "tiles/d.jpg"
        min_scale = 5.0
        width = 4000
        quality = 80

        [[tiers]]
        tier = "ultra"
        locator = "tiles/e.jpg"
        min_scale = 8.0
        width = 5000
        quality = 80
        "#,
    )
    .unwrap();
    let catalog = ResolutionCatalog::from_config(&config).unwrap();
    assert_eq!(catalog.tier_for_scale(1.9), Tier::Hd);
    assert_eq!(catalog.tier_for_scale(4.0), Tier::SixK);
    assert_eq!(catalog.locator(Tier::Ultra), "tiles/e.jpg");
}

#[test]
fn test_unknown_tier_name_fails_to_parse() {
    let result = ViewerConfig::from_toml_str(
        r#"
        [preload]
        priority = ["hd", "16k"]
        "#,
    );
    assert!(matches!(result, Err(PanoramaError::ConfigParse(_))));
}

#[test]
fn test_inverted_zoom_range_is_rejected() {
    let mut config = ViewerConfig::default();
    config.zoom.max_scale = 0.5;
    assert!(matches!(config.validate(), Err(PanoramaError::InvalidConfig(_))));
}

#[test]
fn test_zero_tick_is_rejected() {
    let mut config = ViewerConfig::default();
    config.timing.progress_tick_ms = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_serialized_default_parses_back() {
    let text = toml::to_string_pretty(&ViewerConfig::default()).unwrap();
    assert!(text.contains("[[tiers]]"));
    let parsed = ViewerConfig::from_toml_str(&text).unwrap();
    assert_eq!(parsed.tiers.len(), 5);
    assert_eq!(parsed.tiers[4].locator, "img/img-ultra.jpg");
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("create temp file");
    writeln!(file, "[timing]").unwrap();
    writeln!(file, "deferred_warm_delay_ms = 500").unwrap();
    writeln!(file, "progress_tick_ms = 50").unwrap();
    writeln!(file, "progress_step_percent = 10").unwrap();
    writeln!(file, "progress_ceiling_percent = 80").unwrap();
    writeln!(file, "swap_delay_ms = 0").unwrap();
    file.flush().unwrap();

    let config = ViewerConfig::load(file.path()).unwrap();
    assert_eq!(config.timing.progress_tick_ms, 50);
    assert_eq!(config.timing.swap_delay_ms, 0);
}

#[test]
fn test_missing_file_is_io_error() {
    let result = ViewerConfig::load(std::path::Path::new("/nonexistent/panorama.toml"));
    assert!(matches!(result, Err(PanoramaError::Io(_))));
}
