use crate::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect<T> {
    pub origin: Vec2<T>,
    pub size: Vec2<T>,
}

impl<T: Default> Default for Rect<T> {
    fn default() -> Self {
        Self {
            origin: Vec2::zero(),
            size: Vec2::zero(),
        }
    }
}

impl<T> Rect<T> {
    pub fn new(origin: Vec2<T>, size: Vec2<T>) -> Self {
        Self { origin, size }
    }
}

impl<T: std::ops::Add<Output = T> + Copy> Rect<T> {
    pub fn min(&self) -> Vec2<T> {
        self.origin
    }

    pub fn max(&self) -> Vec2<T> {
        self.origin + self.size
    }
}

impl<T: std::ops::Mul<Output = T> + Copy> Rect<T> {
    pub fn area(&self) -> T {
        self.size.x * self.size.y
    }
}

impl<T: std::ops::Sub<Output = T> + Copy> Rect<T> {
    pub fn from_min_max(min: Vec2<T>, max: Vec2<T>) -> Self {
        Self {
            origin: min,
            size: max - min,
        }
    }
}

impl<T: std::ops::Add<Output = T> + PartialOrd + Copy> Rect<T> {
    pub fn contains_point(&self, point: Vec2<T>) -> bool {
        let max = self.max();
        point.x >= self.origin.x
            && point.y >= self.origin.y
            && point.x < max.x
            && point.y < max.y
    }

    pub fn intersects(&self, other: Rect<T>) -> bool {
        let self_max = self.max();
        let other_max = other.max();
        self.origin.x < other_max.x
            && other.origin.x < self_max.x
            && self.origin.y < other_max.y
            && other.origin.y < self_max.y
    }
}

fn partial_max<T: PartialOrd>(a: T, b: T) -> T {
    if a > b { a } else { b }
}

fn partial_min<T: PartialOrd>(a: T, b: T) -> T {
    if a < b { a } else { b }
}

impl<T: std::ops::Add<Output = T> + std::ops::Sub<Output = T> + PartialOrd + Copy> Rect<T> {
    pub fn intersection(&self, other: Rect<T>) -> Option<Rect<T>> {
        if !self.intersects(other) {
            return None;
        }
        let min = Vec2::new(
            partial_max(self.origin.x, other.origin.x),
            partial_max(self.origin.y, other.origin.y),
        );
        let max = Vec2::new(
            partial_min(self.max().x, other.max().x),
            partial_min(self.max().y, other.max().y),
        );
        Some(Rect::from_min_max(min, max))
    }

    /// Clip this rectangle to `bounds`. A rectangle fully outside collapses
    /// to zero size at the nearest edge.
    pub fn clamp_to(&self, bounds: Rect<T>) -> Rect<T> {
        let lo = bounds.min();
        let hi = bounds.max();
        let clamp = |v: T, lo: T, hi: T| partial_min(partial_max(v, lo), hi);
        let min = Vec2::new(clamp(self.origin.x, lo.x, hi.x), clamp(self.origin.y, lo.y, hi.y));
        let max = Vec2::new(clamp(self.max().x, lo.x, hi.x), clamp(self.max().y, lo.y, hi.y));
        Rect::from_min_max(min, max)
    }
}

impl Rect<f32> {
    /// Intersection over union. Zero-area boxes never overlap.
    pub fn iou(&self, other: &Rect<f32>) -> f32 {
        if self.size.x <= 0.0 || self.size.y <= 0.0 || other.size.x <= 0.0 || other.size.y <= 0.0
        {
            return 0.0;
        }

        let intersection_area = self.intersection(*other).map_or(0.0, |r| r.area());
        let union_area = self.area() + other.area() - intersection_area;
        if union_area <= 0.0 {
            return 0.0;
        }

        intersection_area / union_area
    }

    /// Build a box from YOLO center format.
    pub fn from_center(center: Vec2<f32>, size: Vec2<f32>) -> Self {
        Self {
            origin: center - size / 2.0,
            size,
        }
    }
}
