use folio_protocol::Point;

/// One smoothing step: move `current` a `factor` fraction toward `target`.
pub fn lerp(current: f64, target: f64, factor: f64) -> f64 {
    current + (target - current) * factor
}

pub fn lerp_point(current: Point, target: Point, factor: f64) -> Point {
    Point::new(
        lerp(current.x, target.x, factor),
        lerp(current.y, target.y, factor),
    )
}
