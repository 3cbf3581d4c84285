use whiteboard_marker::core::PixelSurface;
use whiteboard_marker::math::Rgba;
use whiteboard_marker::DrawError;

const INK: Rgba = Rgba::rgb(10, 20, 30);

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_surface_is_white() {
    let surface = PixelSurface::new(2048, 2048).unwrap();
    assert_eq!(surface.pixels().len(), 2048 * 2048);
    assert_eq!(surface.ink_coverage(Rgba::WHITE), 0);
    assert_eq!(surface.display_bytes().len(), 2048 * 2048 * 4);
}

#[test]
fn test_zero_dimensions_fail_fast() {
    for (w, h) in [(0, 0), (0, 5), (5, 0)] {
        assert_eq!(
            PixelSurface::new(w, h).unwrap_err(),
            DrawError::InvalidDimension { width: w, height: h }
        );
    }
}

// ============================================================================
// Bounds Clamping
// ============================================================================

#[test]
fn test_block_writes_never_leave_bounds() {
    let (width, height) = (23u32, 17u32);

    for pen in [1u32, 4, 5, 17, 30] {
        for x in [-40i32, -1, 0, 5, 18, 19, 22, 23, 100] {
            for y in [-3i32, 0, 12, 13, 16, 17, 90] {
                let mut surface = PixelSurface::new(width, height).unwrap();
                surface.write_block(x, y, pen, pen, INK);

                let rect = surface.clamp_block(x, y, pen, pen).unwrap();
                assert!(rect.x + rect.width <= width && rect.y + rect.height <= height);

                // Every inked cell is one the clamped rectangle covers
                let expected = (rect.width * rect.height) as usize;
                assert_eq!(surface.ink_coverage(Rgba::WHITE), expected, "pen {} at ({}, {})", pen, x, y);
                assert_eq!(surface.pixels().len(), (width * height) as usize);
            }
        }
    }
}

#[test]
fn test_edge_stamp_keeps_full_size() {
    let mut surface = PixelSurface::new(100, 100).unwrap();
    surface.write_block(98, 97, 5, 5, INK);

    assert_eq!(surface.ink_coverage(Rgba::WHITE), 25);
    assert_eq!(surface.pixel(95, 95), Some(INK));
    assert_eq!(surface.pixel(99, 99), Some(INK));
    assert_eq!(surface.pixel(94, 95), Some(Rgba::WHITE));
}

// ============================================================================
// Commit
// ============================================================================

#[test]
fn test_commit_is_the_only_path_to_display() {
    let mut surface = PixelSurface::new(16, 16).unwrap();
    surface.write_block(4, 4, 2, 2, INK);
    surface.write_block(10, 10, 2, 2, INK);

    assert_eq!(surface.displayed_pixel(4, 4), Some(Rgba::WHITE));
    assert!(surface.is_dirty());

    assert!(surface.commit());
    assert_eq!(surface.displayed_pixel(4, 4), Some(INK));
    assert_eq!(surface.displayed_pixel(11, 11), Some(INK));
    assert!(!surface.is_dirty());
}

#[test]
fn test_clear_then_commit() {
    let mut surface = PixelSurface::new(8, 8).unwrap();
    surface.write_block(0, 0, 8, 8, INK);
    surface.commit();

    surface.clear(Rgba::WHITE);
    assert!(surface.commit());
    assert_eq!(surface.displayed_pixel(3, 3), Some(Rgba::WHITE));
    assert_eq!(surface.commit_count(), 2);
}
