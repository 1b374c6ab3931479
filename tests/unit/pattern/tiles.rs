//! Tests for striped tile specification and rasterization

#[cfg(test)]
mod tests {
    use illusionlab::StimulusError;
    use illusionlab::io::configuration::TILE_OFFSETS;
    use illusionlab::pattern::tiles::{
        TileSpec, default_tile_sizes, generate, render_tile, stripe_lines, tile_specs,
    };

    const SMALL_SIZES: [u32; 4] = [40, 30, 20, 10];

    // Tests tile rasters shrink by a quarter of the cell per ring
    // Verified by keeping every tile at full size
    #[test]
    fn test_default_tile_sizes() {
        assert_eq!(default_tile_sizes(), [700, 525, 350, 175]);
    }

    // Tests stripe angles alternate and line widths grow ring by ring
    // Verified by keeping the stripe angle fixed
    #[test]
    fn test_tile_specs_sequence() {
        let specs = tile_specs(30.0, 4, &TILE_OFFSETS, &SMALL_SIZES).expect("Valid parameters");

        let angles: Vec<f64> = specs.iter().map(|spec| spec.stripe_angle).collect();
        let widths: Vec<f64> = specs.iter().map(|spec| spec.line_width).collect();
        let rings: Vec<usize> = specs.iter().map(|spec| spec.ring).collect();

        for (angle, want) in angles.iter().zip([30.0, 120.0, 30.0, 120.0]) {
            assert!((angle - want).abs() < 1e-12);
        }
        for (width, want) in widths.iter().zip([8.0, 9.0, 10.0, 11.0]) {
            assert!((width - want).abs() < 1e-12);
        }
        assert_eq!(rings, vec![0, 1, 2, 3]);
    }

    // Tests lower densities widen the stripe spacing
    // Verified by ignoring the density when scaling offsets
    #[test]
    fn test_density_scales_spacing() {
        let reference = tile_specs(20.0, 4, &TILE_OFFSETS, &SMALL_SIZES).expect("Valid parameters");
        let sparse = tile_specs(20.0, 2, &TILE_OFFSETS, &SMALL_SIZES).expect("Valid parameters");

        for ((dense, wide), offset) in reference.iter().zip(&sparse).zip(TILE_OFFSETS) {
            assert!((dense.spacing - offset).abs() < 1e-12);
            assert!((wide.spacing - 2.0 * offset).abs() < 1e-12);
        }
    }

    // Tests invalid parameters are rejected before rendering
    // Verified by rendering with a zero density
    #[test]
    fn test_tile_specs_invalid() {
        assert!(tile_specs(30.0, 0, &TILE_OFFSETS, &SMALL_SIZES).is_err());
        assert!(tile_specs(f64::NAN, 4, &TILE_OFFSETS, &SMALL_SIZES).is_err());
        assert!(tile_specs(30.0, 4, &[0.03, 0.05], &SMALL_SIZES).is_err());
        assert!(tile_specs(30.0, 4, &[0.03, -0.05, 0.08, 0.21], &SMALL_SIZES).is_err());
        assert!(matches!(
            tile_specs(30.0, 4, &TILE_OFFSETS, &[40, 0, 20, 10]),
            Err(StimulusError::InvalidParameter { parameter: "size", .. })
        ));
    }

    // Tests stripes of a positive angle fall to the right and perpendicular sets rise
    // Verified by drawing stripes at the tile angle itself
    #[test]
    fn test_stripe_slope() {
        let spec = |stripe_angle| TileSpec {
            ring: 0,
            stripe_angle,
            spacing: 0.3,
            line_width: 8.0,
            size_px: 64,
        };

        let falling = stripe_lines(&spec(10.0));
        assert!(!falling.is_empty());
        for line in &falling {
            let slope = (line.end.y - line.start.y) / (line.end.x - line.start.x);
            assert!((slope + 10.0_f64.to_radians().tan()).abs() < 1e-9, "slope {slope}");
        }

        for line in stripe_lines(&spec(-10.0)) {
            let slope = (line.end.y - line.start.y) / (line.end.x - line.start.x);
            assert!(slope > 0.0);
        }
    }

    // Tests a rendered tile has the requested size and contains both ink and paper
    // Verified by skipping the stripe drawing
    #[test]
    fn test_render_tile() {
        let spec = TileSpec {
            ring: 0,
            stripe_angle: 45.0,
            spacing: 0.5,
            line_width: 8.0,
            size_px: 64,
        };

        let image = render_tile(&spec).expect("Tile should render");

        assert_eq!(image.dimensions(), (64, 64));
        assert!(image.pixels().any(|p| p.0 == [0, 0, 0, 255]));
        assert!(image.pixels().any(|p| p.0 == [255, 255, 255, 255]));
        assert!(image.pixels().all(|p| p.0[3] == 255));
    }

    // Tests a generated set pairs every tile with its specification
    // Verified by rendering every tile at the first size
    #[test]
    fn test_generate_set() {
        let tiles = generate(-40.0, 4, &TILE_OFFSETS, &SMALL_SIZES).expect("Tiles should render");

        assert_eq!(tiles.len(), 4);
        for (tile, size) in tiles.iter().zip(SMALL_SIZES) {
            assert_eq!(tile.image.width(), size);
            assert_eq!(tile.spec.size_px, size);
        }
    }
}
