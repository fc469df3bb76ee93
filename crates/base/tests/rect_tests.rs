use base::{Rect, Vec2};

fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect<f32> {
    Rect::new(Vec2::new(x, y), Vec2::new(w, h))
}

#[test]
fn test_from_center() {
    let r = Rect::from_center(Vec2::new(50.0, 40.0), Vec2::new(20.0, 10.0));
    assert_eq!(r, rect(40.0, 35.0, 20.0, 10.0));
    assert_eq!(r.max(), Vec2::new(60.0, 45.0));
}

#[test]
fn test_intersection_partial() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(5.0, 5.0, 10.0, 10.0);
    assert_eq!(a.intersection(b), Some(rect(5.0, 5.0, 5.0, 5.0)));
}

#[test]
fn test_intersection_disjoint() {
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(20.0, 20.0, 5.0, 5.0);
    assert_eq!(a.intersection(b), None);
}

#[test]
fn test_iou_identical() {
    let a = rect(3.0, 4.0, 10.0, 10.0);
    assert!((a.iou(&a) - 1.0).abs() < 1e-6);
}

#[test]
fn test_iou_partial() {
    // intersection 25, union 175
    let a = rect(0.0, 0.0, 10.0, 10.0);
    let b = rect(5.0, 5.0, 10.0, 10.0);
    assert!((a.iou(&b) - 25.0 / 175.0).abs() < 1e-5);
}

#[test]
fn test_iou_zero_area() {
    let a = rect(0.0, 0.0, 0.0, 10.0);
    let b = rect(0.0, 0.0, 10.0, 10.0);
    assert_eq!(a.iou(&b), 0.0);
}

#[test]
fn test_clamp_to_bounds() {
    let bounds = rect(0.0, 0.0, 100.0, 50.0);
    let r = rect(-10.0, 40.0, 30.0, 30.0).clamp_to(bounds);
    assert_eq!(r, rect(0.0, 40.0, 20.0, 10.0));
}

#[test]
fn test_clamp_outside_collapses() {
    let bounds = rect(0.0, 0.0, 100.0, 50.0);
    let r = rect(200.0, 10.0, 30.0, 10.0).clamp_to(bounds);
    assert_eq!(r.size.x, 0.0);
    assert_eq!(r.origin.x, 100.0);
}

#[test]
fn test_contains_point_half_open() {
    let r = Rect::new(Vec2::new(0usize, 0), Vec2::new(4, 4));
    assert!(r.contains_point(Vec2::new(3, 3)));
    assert!(!r.contains_point(Vec2::new(4, 0)));
}
