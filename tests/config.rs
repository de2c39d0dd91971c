use tilequad::*;

#[test]
fn default_options_match_reference_layering() {
    let opts = BuildOptions::default();
    assert_eq!(opts.z_bias, 0.01);
    assert_eq!(opts.z_base, 0.0);
    assert_eq!(opts.out_of_range, OutOfRangePolicy::Reject);
    assert!((opts.row_depth(14) - 0.14).abs() < 1e-6);
}

#[test]
fn empty_json_yields_defaults() {
    let cfg = GeometryConfig::from_json("{}").unwrap();
    assert_eq!(cfg, GeometryConfig::default());
    assert_eq!(cfg.tile_size, DEFAULT_TILE_SIZE);
    assert_eq!(cfg.iterations, 300);
}

#[test]
fn partial_options_keep_other_defaults() {
    let cfg = GeometryConfig::from_json(r#"{ "options": { "out_of_range": "wrap" } }"#).unwrap();
    assert_eq!(cfg.options.out_of_range, OutOfRangePolicy::Wrap);
    assert_eq!(cfg.options.z_bias, 0.01);
}

#[test]
fn unknown_policy_is_json_error() {
    let err = GeometryConfig::from_json(r#"{ "options": { "out_of_range": "clamp" } }"#)
        .unwrap_err();
    assert!(matches!(err, TileError::Json(_)));
}

#[test]
fn resolve_sheet_uses_layout() {
    let cfg = GeometryConfig::from_json(r#"{ "tile_size": 16, "sheet": { "columns": 8, "rows": 4 } }"#)
        .unwrap();
    let sheet = cfg.resolve_sheet().unwrap();
    assert_eq!((sheet.columns(), sheet.rows(), sheet.tile_size()), (8, 4, 16));
}

#[test]
fn resolve_sheet_rejects_zero_columns() {
    let cfg = GeometryConfig::from_json(r#"{ "sheet": { "columns": 0, "rows": 4 } }"#).unwrap();
    assert!(matches!(cfg.resolve_sheet(), Err(TileError::InvalidSheetConfig { .. })));
}

#[test]
fn resolve_map_defaults_to_demo() {
    let cfg = GeometryConfig::default();
    assert_eq!(cfg.resolve_map().unwrap(), TileMap::demo());
}

#[test]
fn resolve_map_and_sheet_from_files() {
    let dir = std::env::temp_dir().join(format!("tilequad-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let map_path = dir.join("map.json");
    std::fs::write(&map_path, "[[1, 2, 3]]").unwrap();
    let img_path = dir.join("sheet.png");
    image::RgbaImage::new(128, 64).save(&img_path).unwrap();

    let cfg = GeometryConfig {
        tile_size: 32,
        sheet_image: Some(img_path),
        map: Some(map_path),
        ..GeometryConfig::default()
    };
    let sheet = cfg.resolve_sheet().unwrap();
    assert_eq!((sheet.columns(), sheet.rows()), (4, 2));
    let map = cfg.resolve_map().unwrap();
    assert_eq!(map.tiles(), &[1, 2, 3]);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn config_file_round_trips_through_json() {
    let cfg = GeometryConfig {
        tile_size: 24,
        options: BuildOptions { z_bias: 0.02, z_base: 0.5, out_of_range: OutOfRangePolicy::Wrap },
        ..GeometryConfig::default()
    };
    let text = serde_json::to_string(&cfg).unwrap();
    assert_eq!(GeometryConfig::from_json(&text).unwrap(), cfg);
}
