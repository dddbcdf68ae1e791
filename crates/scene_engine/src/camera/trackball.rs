//! Trackball mapping
//!
//! Projects a pixel position onto a unit sphere centred on the viewport so
//! that two successive mouse positions describe a rotation.

use crate::foundation::math::{constants, Unit, Vec2, Vec3};

/// Rotation extracted from a pair of trackball points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackballRotation {
    /// Rotation axis in trackball (view) space
    pub axis: Unit<Vec3>,
    /// Rotation angle in radians, before sensitivity scaling
    pub angle: f32,
}

/// Map a pixel position to a point on the unit trackball sphere
///
/// `x` runs left to right and `y` top to bottom, as window systems report
/// them. Points outside the unit disk are pulled onto its rim with `z = 0`.
pub fn map_to_sphere(point: Vec2, width: u32, height: u32) -> Vec3 {
    let width = width.max(1) as f32;
    let height = height.max(1) as f32;

    let x = (2.0 * point.x - width) / width;
    let y = (height - 2.0 * point.y) / height;

    let d_squared = x * x + y * y;
    if d_squared < 1.0 {
        Vec3::new(x, y, (1.0 - d_squared).sqrt())
    } else {
        let d = d_squared.sqrt();
        Vec3::new(x / d, y / d, 0.0)
    }
}

/// Rotation carrying sphere point `from` to sphere point `to`
///
/// Returns `None` when the points are identical or antipodal, where the
/// cross product has no usable direction.
pub fn rotation_between(from: Vec3, to: Vec3) -> Option<TrackballRotation> {
    let axis = Unit::try_new(from.cross(&to), constants::DEGENERATE_EPSILON)?;
    let cos = (from.dot(&to) / (from.magnitude() * to.magnitude())).clamp(-1.0, 1.0);
    let angle = cos.acos();
    if !angle.is_finite() {
        return None;
    }
    Some(TrackballRotation { axis, angle })
}
