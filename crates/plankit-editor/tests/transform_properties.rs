//! Property tests for the transform pipeline and banding geometry.

use plankit_core::Point;
use plankit_editor::{EditorView, PointerEvent, PreviewEngine};
use proptest::prelude::*;

proptest! {
    #[test]
    fn zoom_never_leaves_bounds(deltas in prop::collection::vec(-2000.0f64..2000.0, 1..50)) {
        let mut view = EditorView::new();
        for delta in deltas {
            view.zoom(delta);
            prop_assert!(view.scale() >= 0.1);
            prop_assert!(view.scale() <= 3.0);
        }
    }

    #[test]
    fn zoom_scale_keeps_two_decimal_places(delta in -280.0f64..80.0) {
        let mut view = EditorView::new();
        view.zoom(delta);
        let scaled = view.scale() * 100.0;
        prop_assert!((scaled - scaled.round()).abs() < 1e-9);
    }

    #[test]
    fn to_world_yields_integer_coordinates(
        x in -5000.0f64..5000.0,
        y in -5000.0f64..5000.0,
        pan_x in -1000.0f64..1000.0,
        pan_y in -1000.0f64..1000.0,
    ) {
        let mut view = EditorView::new();
        view.pan = Point::new(pan_x, pan_y);
        let world = view.to_world(&PointerEvent::at(x, y));
        prop_assert_eq!(world.x, world.x.round());
        prop_assert_eq!(world.y, world.y.round());
    }

    #[test]
    fn banding_rect_is_normalized(
        ax in -1000.0f64..1000.0,
        ay in -1000.0f64..1000.0,
        bx in -1000.0f64..1000.0,
        by in -1000.0f64..1000.0,
    ) {
        let mut engine = PreviewEngine::new();
        engine.arm(Point::new(ax, ay));
        engine.redraw(Point::new(bx, by)).unwrap();

        let rect = engine.rect().unwrap();
        prop_assert!(rect.width >= 0.0);
        prop_assert!(rect.height >= 0.0);
        prop_assert_eq!(rect.tl_x, ax.min(bx));
        prop_assert_eq!(rect.tl_y, ay.min(by));

        // Both defining points sit inside the inclusive bounds.
        prop_assert!(engine.contains_point(Point::new(ax, ay)));
        prop_assert!(engine.contains_point(Point::new(bx, by)));
    }

    #[test]
    fn corner_points_agree_with_banding_rect(
        ax in -1000.0f64..1000.0,
        ay in -1000.0f64..1000.0,
        bx in -1000.0f64..1000.0,
        by in -1000.0f64..1000.0,
    ) {
        let mut engine = PreviewEngine::new();
        engine.arm(Point::new(ax, ay));
        engine.redraw(Point::new(bx, by)).unwrap();

        let corners = engine.to_rectangle_points().unwrap();
        for corner in corners {
            prop_assert!(engine.contains_point(corner));
        }
        prop_assert_eq!(corners[0].x, corners[3].x);
        prop_assert_eq!(corners[1].x, corners[2].x);
        prop_assert_eq!(corners[0].y, corners[1].y);
        prop_assert_eq!(corners[2].y, corners[3].y);
    }
}
