use tilequad::*;

fn sheet16() -> TileSheet {
    TileSheet::new(16, 16, 32).unwrap()
}

#[test]
fn new_cache_has_static_geometry_but_no_uvs() {
    let cache = TileGeometryCache::new(20, 15, 32, BuildOptions::default()).unwrap();
    assert_eq!(cache.vertex_count(), 1200);
    assert_eq!(cache.index_count(), 1800);
    assert_eq!(cache.positions().len(), 300 * 12);
    assert!(cache.uvs().is_empty());
    assert!(cache.interleaved().is_empty());
}

#[test]
fn first_put_builds_uvs() {
    let map = TileMap::demo();
    let sheet = sheet16();
    let mut cache = TileGeometryCache::new(20, 15, 32, BuildOptions::default()).unwrap();
    assert!(cache.put_map(&map, &sheet).unwrap());
    let expected = build_uv_stream(&map, &sheet, &BuildOptions::default()).unwrap();
    assert_eq!(cache.uvs(), expected.as_slice());
}

#[test]
fn unchanged_map_skips_rebuild() {
    let map = TileMap::demo();
    let sheet = sheet16();
    let mut cache = TileGeometryCache::for_map(&map, &sheet, 32, BuildOptions::default()).unwrap();
    assert!(!cache.put_map(&map, &sheet).unwrap());
    assert!(!cache.put_map(&map.clone(), &sheet).unwrap());
}

#[test]
fn edited_map_rebuilds_only_uvs() {
    let mut map = TileMap::demo();
    let sheet = sheet16();
    let mut cache = TileGeometryCache::for_map(&map, &sheet, 32, BuildOptions::default()).unwrap();
    let positions_before = cache.positions().to_vec();
    let indices_before = cache.indices().to_vec();

    map.set(3, 3, 100);
    assert!(cache.put_map(&map, &sheet).unwrap());

    assert_eq!(cache.positions(), positions_before.as_slice());
    assert_eq!(cache.indices(), indices_before.as_slice());
    let expected = build_uv_stream(&map, &sheet, &BuildOptions::default()).unwrap();
    assert_eq!(cache.uvs(), expected.as_slice());
}

#[test]
fn wrong_size_map_is_dimension_mismatch() {
    let sheet = sheet16();
    let mut cache = TileGeometryCache::new(20, 15, 32, BuildOptions::default()).unwrap();
    let small = TileMap::filled(10, 15, 0).unwrap();
    match cache.put_map(&small, &sheet).unwrap_err() {
        TileError::DimensionMismatch { expected, found } => {
            assert_eq!(expected, (20, 15));
            assert_eq!(found, (10, 15));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn failed_put_keeps_previous_uvs() {
    let mut map = TileMap::filled(2, 2, 1).unwrap();
    let sheet = sheet16();
    let mut cache = TileGeometryCache::for_map(&map, &sheet, 32, BuildOptions::default()).unwrap();
    let before = cache.uvs().to_vec();

    map.set(0, 0, 5000);
    assert!(matches!(
        cache.put_map(&map, &sheet),
        Err(TileError::TileIndexOutOfRange { index: 5000, .. })
    ));
    assert_eq!(cache.uvs(), before.as_slice());

    // Restoring the original content is a no-op again.
    map.set(0, 0, 1);
    assert!(!cache.put_map(&map, &sheet).unwrap());
}

#[test]
fn interleaved_matches_immediate_quads() {
    let map = TileMap::demo();
    let sheet = sheet16();
    let opts = BuildOptions::default();
    let cache = TileGeometryCache::for_map(&map, &sheet, 32, opts).unwrap();
    let quads = build_quads(&map, &sheet, 32, &opts).unwrap();
    let flat: Vec<TileVertex> = quads.iter().flat_map(|q| q.corners).collect();
    assert_eq!(cache.interleaved(), flat);
}

#[test]
fn changing_sheet_forces_rebuild() {
    let map = TileMap::filled(2, 2, 3).unwrap();
    let mut cache =
        TileGeometryCache::for_map(&map, &sheet16(), 32, BuildOptions::default()).unwrap();
    let other = TileSheet::new(4, 4, 32).unwrap();
    assert!(cache.put_map(&map, &other).unwrap());
}

#[test]
fn wrap_policy_cache_folds_out_of_range_tiles() {
    let sheet = sheet16();
    let opts = BuildOptions { out_of_range: OutOfRangePolicy::Wrap, ..BuildOptions::default() };
    let mut map = TileMap::from_rows(&[[0, 1], [2, 3]]).unwrap();
    let mut cache = TileGeometryCache::for_map(&map, &sheet, 32, opts).unwrap();

    map.set(0, 0, 300);
    map.set(1, 1, -1);
    assert!(cache.put_map(&map, &sheet).unwrap());

    let direct = TileMap::from_rows(&[[44, 1], [2, 255]]).unwrap();
    let expected = build_uv_stream(&direct, &sheet, &opts).unwrap();
    assert_eq!(cache.uvs(), expected.as_slice());
}

#[test]
fn reject_policy_cache_reports_tile_location() {
    let sheet = sheet16();
    let mut map = TileMap::filled(3, 2, 0).unwrap();
    let mut cache = TileGeometryCache::for_map(&map, &sheet, 32, BuildOptions::default()).unwrap();
    map.set(2, 1, -1);
    match cache.put_map(&map, &sheet).unwrap_err() {
        TileError::TileIndexOutOfRange { index, x, y, .. } => assert_eq!((index, x, y), (-1, 2, 1)),
        other => panic!("unexpected error: {other}"),
    }
}
