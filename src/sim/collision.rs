//! Contact detection between circles and axis-aligned rectangles
//!
//! Every query returns the signed penetration along the separating normal,
//! so callers can treat slightly separated bodies as still touching.

use glam::Vec2;

use super::body::{Body, Shape};

/// Contact between body `a` and body `b`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Unit normal pointing from `b` toward `a` (push `a` along this to separate)
    pub normal: Vec2,
    /// Overlap depth; negative values are the gap between the bodies
    pub penetration: f32,
}

/// Contact between two bodies of any shape
pub fn contact(a: &Body, b: &Body) -> Contact {
    match (a.shape, b.shape) {
        (Shape::Circle { radius }, Shape::Rectangle { half }) => {
            circle_rect_contact(a.pos, radius, b.pos, half)
        }
        (Shape::Rectangle { half }, Shape::Circle { radius }) => {
            let c = circle_rect_contact(b.pos, radius, a.pos, half);
            Contact {
                normal: -c.normal,
                penetration: c.penetration,
            }
        }
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
            circle_circle_contact(a.pos, ra, b.pos, rb)
        }
        (Shape::Rectangle { half: ha }, Shape::Rectangle { half: hb }) => {
            rect_rect_contact(a.pos, ha, b.pos, hb)
        }
    }
}

/// Circle against an axis-aligned rectangle
pub fn circle_rect_contact(center: Vec2, radius: f32, rect_center: Vec2, half: Vec2) -> Contact {
    let local = center - rect_center;
    let closest = local.clamp(-half, half);
    let d = local - closest;
    let dist = d.length();

    if dist > 0.0 {
        return Contact {
            normal: d / dist,
            penetration: radius - dist,
        };
    }

    // Center inside the rectangle: leave through the nearest face
    let depth = half - local.abs();
    if depth.x < depth.y {
        Contact {
            normal: Vec2::new(sign(local.x), 0.0),
            penetration: radius + depth.x,
        }
    } else {
        Contact {
            normal: Vec2::new(0.0, sign(local.y)),
            penetration: radius + depth.y,
        }
    }
}

pub fn circle_circle_contact(a: Vec2, ra: f32, b: Vec2, rb: f32) -> Contact {
    let d = a - b;
    let dist = d.length();
    Contact {
        normal: if dist > 0.0 { d / dist } else { Vec2::Y },
        penetration: ra + rb - dist,
    }
}

/// Two axis-aligned rectangles, separated along the axis of least overlap
pub fn rect_rect_contact(a: Vec2, ha: Vec2, b: Vec2, hb: Vec2) -> Contact {
    let d = a - b;
    let overlap = ha + hb - d.abs();
    if overlap.x < overlap.y {
        Contact {
            normal: Vec2::new(sign(d.x), 0.0),
            penetration: overlap.x,
        }
    } else {
        Contact {
            normal: Vec2::new(0.0, sign(d.y)),
            penetration: overlap.y,
        }
    }
}

#[inline]
fn sign(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_rect_side_contact() {
        // Rect 10x10 at origin, circle of radius 4 just left of it
        let c = circle_rect_contact(Vec2::new(-8.0, 0.0), 4.0, Vec2::ZERO, Vec2::splat(5.0));
        assert_eq!(c.normal, Vec2::new(-1.0, 0.0));
        assert!((c.penetration - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_rect_separated() {
        let c = circle_rect_contact(Vec2::new(0.0, 20.0), 4.0, Vec2::ZERO, Vec2::splat(5.0));
        assert_eq!(c.normal, Vec2::Y);
        assert!((c.penetration + 11.0).abs() < 1e-5);
    }

    #[test]
    fn test_circle_rect_corner() {
        let c = circle_rect_contact(Vec2::new(8.0, 9.0), 6.0, Vec2::ZERO, Vec2::splat(5.0));
        assert!((c.penetration - 1.0).abs() < 1e-5);
        assert!((c.normal - Vec2::new(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn test_circle_center_inside_rect() {
        // Thin horizontal wall, ball center slightly below its centerline
        let c = circle_rect_contact(Vec2::new(3.0, 1.0), 4.0, Vec2::ZERO, Vec2::new(50.0, 2.5));
        assert_eq!(c.normal, Vec2::Y);
        assert!((c.penetration - 5.5).abs() < 1e-5);
    }

    #[test]
    fn test_circle_circle() {
        let c = circle_circle_contact(Vec2::new(3.0, 0.0), 2.0, Vec2::ZERO, 2.0);
        assert_eq!(c.normal, Vec2::X);
        assert!((c.penetration - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_rect_rect_least_overlap_axis() {
        let c = rect_rect_contact(
            Vec2::new(0.0, 9.0),
            Vec2::new(10.0, 5.0),
            Vec2::ZERO,
            Vec2::new(10.0, 5.0),
        );
        assert_eq!(c.normal, Vec2::Y);
        assert!((c.penetration - 1.0).abs() < 1e-5);
    }
}
