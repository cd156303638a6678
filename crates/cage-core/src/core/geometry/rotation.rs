use super::GeometryError;
use nalgebra::{Point3, Quaternion, Vector3};

/// Minimum squared norm below which an axis direction is considered degenerate.
const AXIS_EPSILON_SQ: f64 = 1e-24;

/// Unit-vector dot products this close to 1 are treated as exactly parallel.
const PARALLEL_DOT_EPSILON: f64 = 1e-12;

/// Calculates the rotation axis and angle that align `v1` with `v2`.
///
/// Both vectors are normalized before the cross and dot products are taken, so
/// the returned angle is the true angle between them. The axis is the raw cross
/// product of the unit vectors and is *not* normalized.
///
/// Parallel vectors report an angle of exactly `0.0` (with a degenerate axis):
/// the dot product is clamped into the inverse-cosine domain, and dots within
/// [`PARALLEL_DOT_EPSILON`] of 1 are snapped to a zero angle, since rounding
/// leaves the dot of exactly-parallel unit vectors a few ulps below 1 and
/// acos would turn that into a spurious ~1e-8 angle. Callers must treat a
/// zero angle as "no rotation needed" and skip the rotation entirely.
pub fn align(v1: &Vector3<f64>, v2: &Vector3<f64>) -> (Vector3<f64>, f64) {
    let u1 = v1.normalize();
    let u2 = v2.normalize();
    let axis = u1.cross(&u2);
    let dot = u1.dot(&u2).clamp(-1.0, 1.0);
    if dot.is_nan() || dot >= 1.0 - PARALLEL_DOT_EPSILON {
        (axis, 0.0)
    } else {
        (axis, dot.acos())
    }
}

/// Rotates `point` about the axis through `axis_a` and `axis_b` by `angle`
/// radians, using the quaternion sandwich product.
///
/// The point is translated into the axis-relative frame, conjugated with the
/// half-angle rotation quaternion built from the unit axis direction, and
/// translated back. The rotation quaternion is unit-norm by construction, and
/// the point is represented as a pure (w = 0) quaternion.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateAxis`] when `axis_a` and `axis_b`
/// coincide or the axis direction is not finite, since the rotation is then
/// undefined.
pub fn rotate_about_line(
    point: &Point3<f64>,
    axis_a: &Point3<f64>,
    axis_b: &Point3<f64>,
    angle: f64,
) -> Result<Point3<f64>, GeometryError> {
    let direction = axis_b - axis_a;
    // Written so a NaN norm also fails the comparison and is rejected.
    if !(direction.norm_squared() >= AXIS_EPSILON_SQ) {
        return Err(GeometryError::DegenerateAxis);
    }
    let unit = direction.normalize();

    let (half_sin, half_cos) = (angle / 2.0).sin_cos();
    let q_rot = Quaternion::new(
        half_cos,
        half_sin * unit.x,
        half_sin * unit.y,
        half_sin * unit.z,
    );
    let q_point = Quaternion::from_imag(point - axis_b);

    // q_rot is unit-norm by construction, so its conjugate is its inverse.
    let rotated = q_rot * q_point * q_rot.conjugate();

    Ok(axis_b + rotated.imag())
}

/// Rotates `point` about an axis direction through the origin by `angle`
/// radians.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateAxis`] for a zero-length axis.
pub fn rotate_about_axis(
    point: &Point3<f64>,
    axis: &Vector3<f64>,
    angle: f64,
) -> Result<Point3<f64>, GeometryError> {
    rotate_about_line(point, &Point3::origin(), &Point3::from(*axis), angle)
}

/// Returns the index of the candidate closest to `target` by Euclidean
/// distance, or `None` for an empty candidate list.
///
/// Ties are resolved by first occurrence in input order.
pub fn find_closest(target: &Point3<f64>, candidates: &[Point3<f64>]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, candidate) in candidates.iter().enumerate() {
        let dist = (candidate - target).norm();
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((index, dist)),
        }
    }
    best.map(|(index, _)| index)
}
