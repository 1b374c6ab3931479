//! Tests for tile keys and the memory, disk and generation lookup chain

#[cfg(test)]
mod tests {
    use illusionlab::StimulusError;
    use illusionlab::pattern::cache::{CachePolicy, PatternCache, TileKey};
    use illusionlab::pattern::tiles::TileSpec;

    fn small_spec(ring: usize) -> TileSpec {
        TileSpec {
            ring,
            stripe_angle: 30.0,
            spacing: 0.1,
            line_width: 8.0,
            size_px: 16,
        }
    }

    fn resized(ring: usize, size_px: u32) -> TileSpec {
        TileSpec {
            size_px,
            ..small_spec(ring)
        }
    }

    const OFFLINE: CachePolicy = CachePolicy {
        force_regenerate: false,
        generate_on_miss: false,
    };

    // Tests file names number rings from one and carry every rendering parameter
    // Verified by numbering rings from zero
    #[test]
    fn test_tile_key_file_name() {
        assert_eq!(
            TileKey::new(30.0, 4, &small_spec(0)).file_name(),
            "hatch_background_1_30_d4_s0.1_16px.png"
        );
        assert_eq!(
            TileKey::new(-12.5, 2, &small_spec(3)).file_name(),
            "hatch_background_4_-12.5_d2_s0.1_16px.png"
        );
    }

    // Tests keys compare by rounded angle, ring and density
    // Verified by keying on the raw float bits
    #[test]
    fn test_tile_key_identity() {
        let key = TileKey::new(30.0, 4, &small_spec(1));

        assert_eq!(key, TileKey::new(30.000_000_1, 4, &small_spec(1)));
        assert_ne!(key, TileKey::new(-30.0, 4, &small_spec(1)));
        assert_ne!(key, TileKey::new(30.0, 4, &small_spec(2)));
        assert_ne!(key, TileKey::new(30.0, 2, &small_spec(1)));
        assert_ne!(key, TileKey::new(30.0, 4, &resized(1, 32)));
        let respaced = TileSpec {
            spacing: 0.2,
            ..small_spec(1)
        };
        assert_ne!(key, TileKey::new(30.0, 4, &respaced));
        assert_eq!(key.ring(), 1);
        assert_eq!(key.size_px(), 16);
        assert!((key.spacing() - 0.1).abs() < 1e-12);
        assert_eq!(key.density(), 4);
        assert!((key.angle() - 30.0).abs() < 1e-12);
    }

    // Tests a second lookup is served from memory
    // Verified by rendering on every lookup
    #[test]
    fn test_memory_hit() {
        let mut cache = PatternCache::new(CachePolicy::default());
        let key = TileKey::new(30.0, 4, &small_spec(0));

        cache.get_or_generate(key, &small_spec(0)).expect("Tile should render");
        cache.get_or_generate(key, &small_spec(0)).expect("Tile should be cached");

        assert_eq!(cache.stats.generated, 1);
        assert_eq!(cache.stats.hits, 1);
        assert_eq!(cache.stats.misses, 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.contains(&key));
        assert!(cache.root().is_none());
    }

    // Tests rendered tiles are written to disk and reused by a fresh cache
    // Verified by skipping the disk lookup
    #[test]
    fn test_disk_reuse() {
        let dir = tempfile::tempdir().expect("Temporary directory should be created");
        let key = TileKey::new(30.0, 4, &small_spec(2));

        let mut writer =
            PatternCache::with_root(dir.path(), CachePolicy::default()).expect("Root should attach");
        let rendered = writer
            .get_or_generate(key, &small_spec(2))
            .expect("Tile should render")
            .clone();
        let path = writer.tile_path(&key).expect("Root is attached");
        assert!(path.is_file());

        let mut reader = PatternCache::with_root(dir.path(), OFFLINE).expect("Root should attach");
        let loaded = reader
            .get_or_generate(key, &small_spec(2))
            .expect("Tile should load from disk");

        assert_eq!(*loaded, rendered);
        assert_eq!(reader.stats.loaded, 1);
        assert_eq!(reader.stats.generated, 0);
    }

    // Tests an absent tile fails with its expected path when generation is disabled
    // Verified by generating regardless of the policy
    #[test]
    fn test_missing_asset() {
        let dir = tempfile::tempdir().expect("Temporary directory should be created");
        let mut cache = PatternCache::with_root(dir.path(), OFFLINE).expect("Root should attach");
        let key = TileKey::new(50.0, 4, &small_spec(0));

        match cache.get_or_generate(key, &small_spec(0)) {
            Err(StimulusError::MissingAsset { path }) => {
                assert_eq!(path, dir.path().join("hatch_background_1_50_d4_s0.1_16px.png"));
            }
            _ => unreachable!("Expected MissingAsset error type"),
        }
        assert!(cache.is_empty());
    }

    // Tests forced regeneration renders on every lookup
    // Verified by serving forced lookups from memory
    #[test]
    fn test_force_regenerate() {
        let mut cache = PatternCache::new(CachePolicy {
            force_regenerate: true,
            generate_on_miss: true,
        });
        let key = TileKey::new(70.0, 4, &small_spec(1));

        for _ in 0..3 {
            cache.get_or_generate(key, &small_spec(1)).expect("Tile should render");
        }

        assert_eq!(cache.stats.generated, 3);
        assert_eq!(cache.stats.hits, 0);
        assert_eq!(cache.len(), 1);
    }

    // Tests clearing memory keeps persisted tiles available
    // Verified by deleting files on clear
    #[test]
    fn test_clear_keeps_disk() {
        let dir = tempfile::tempdir().expect("Temporary directory should be created");
        let mut cache =
            PatternCache::with_root(dir.path(), CachePolicy::default()).expect("Root should attach");
        let key = TileKey::new(10.0, 4, &small_spec(3));
        cache.get_or_generate(key, &small_spec(3)).expect("Tile should render");

        cache.clear();
        cache.set_policy(OFFLINE);
        assert!(cache.is_empty());
        assert_eq!(cache.policy(), OFFLINE);

        cache.get_or_generate(key, &small_spec(3)).expect("Tile should load");
        assert_eq!(cache.stats.loaded, 1);
    }

    // Tests tiles persisted for another raster size are not reused
    // Verified by keying tiles on angle, ring and density only
    #[test]
    fn test_shared_folder_different_size() {
        let dir = tempfile::tempdir().expect("Temporary directory should be created");
        let mut small =
            PatternCache::with_root(dir.path(), CachePolicy::default()).expect("Root should attach");
        small
            .get_or_generate(TileKey::new(30.0, 4, &small_spec(0)), &small_spec(0))
            .expect("Tile should render");

        let large_spec = resized(0, 48);
        let mut large =
            PatternCache::with_root(dir.path(), CachePolicy::default()).expect("Root should attach");
        let tile = large
            .get_or_generate(TileKey::new(30.0, 4, &large_spec), &large_spec)
            .expect("Tile should render");

        assert_eq!(tile.dimensions(), (48, 48));
        assert_eq!(large.stats.loaded, 0);
        assert_eq!(large.stats.generated, 1);
    }
}
