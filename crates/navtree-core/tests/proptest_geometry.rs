//! Property checks for pixel geometry used by drop-zone hit testing.

use navtree_core::geometry::{Point, Rect};
use proptest::prelude::*;

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (
        -500.0f64..500.0,
        -500.0f64..500.0,
        0.0f64..400.0,
        0.0f64..400.0,
    )
        .prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

proptest! {
    #[test]
    fn contained_points_have_in_bounds_offsets(
        rect in rect_strategy(),
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
    ) {
        let p = Point::new(rect.x + rect.width * fx, rect.y + rect.height * fy);
        if rect.contains(p) {
            prop_assert!(rect.relative_x(p) >= 0.0);
            prop_assert!(rect.relative_x(p) < rect.width);
            prop_assert!(rect.relative_y(p) >= 0.0);
            prop_assert!(rect.relative_y(p) < rect.height);
        }
    }

    #[test]
    fn offsets_are_translation_invariant(
        rect in rect_strategy(),
        px in -500.0f64..500.0,
        py in -500.0f64..500.0,
        dx in -100.0f64..100.0,
        dy in -100.0f64..100.0,
    ) {
        let p = Point::new(px, py);
        let moved = Rect::new(rect.x + dx, rect.y + dy, rect.width, rect.height);
        let moved_p = Point::new(px + dx, py + dy);
        prop_assert!((rect.relative_x(p) - moved.relative_x(moved_p)).abs() < 1e-6);
        prop_assert!((rect.relative_y(p) - moved.relative_y(moved_p)).abs() < 1e-6);
    }

    #[test]
    fn empty_rects_contain_nothing(x in -100.0f64..100.0, y in -100.0f64..100.0, w in 0.0f64..50.0) {
        let rect = Rect::new(x, y, w, 0.0);
        prop_assert!(!rect.contains(Point::new(x, y)));
    }
}
