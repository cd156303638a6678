use super::GeometryError;
use super::rotation;
use nalgebra::{Point3, Vector3};
use std::str::FromStr;

/// Minimum squared norm below which a plane normal is considered degenerate.
const NORMAL_EPSILON_SQ: f64 = 1e-24;

/// One of the three canonical coordinate planes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalPlane {
    /// The z = 0 plane.
    Xy,
    /// The y = 0 plane.
    Xz,
    /// The x = 0 plane.
    Yz,
}

impl FromStr for CanonicalPlane {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "xy" => Ok(CanonicalPlane::Xy),
            "xz" => Ok(CanonicalPlane::Xz),
            "yz" => Ok(CanonicalPlane::Yz),
            _ => Err(()),
        }
    }
}

/// Specifies how a mirror plane is defined.
///
/// The two construction shapes are resolved once, at [`Mirror::new`]; there is
/// no runtime dispatch on argument shape afterwards.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaneSpec {
    /// A plane through three explicit, non-collinear points.
    ThreePoints(Point3<f64>, Point3<f64>, Point3<f64>),
    /// A canonical coordinate plane spanned at the given size.
    Canonical(CanonicalPlane, f64),
}

/// A reflection plane in 3D, defined by three points.
///
/// The plane satisfies `a·x + b·y + c·z = d` where `(a, b, c)` is the normal
/// derived from the defining points. Collinear points are rejected at
/// construction, which makes [`Mirror::reflect`] infallible.
#[derive(Debug, Clone, PartialEq)]
pub struct Mirror {
    name: String,
    p1: Point3<f64>,
    p2: Point3<f64>,
    p3: Point3<f64>,
    normal: Vector3<f64>,
    d: f64,
}

impl Mirror {
    /// Builds a mirror from a [`PlaneSpec`].
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::CollinearPlanePoints`] when the three defining
    /// points do not span a plane.
    pub fn new(spec: PlaneSpec) -> Result<Self, GeometryError> {
        let (name, p1, p2, p3) = match spec {
            PlaneSpec::ThreePoints(p1, p2, p3) => {
                let name = format!("p1: {} p2: {} p3: {}", p1, p2, p3);
                (name, p1, p2, p3)
            }
            PlaneSpec::Canonical(plane, size) => {
                let s = size;
                let (name, p1, p2, p3) = match plane {
                    CanonicalPlane::Xy => (
                        "xy",
                        Point3::origin(),
                        Point3::new(s, 0.0, 0.0),
                        Point3::new(s, s, 0.0),
                    ),
                    CanonicalPlane::Xz => (
                        "xz",
                        Point3::origin(),
                        Point3::new(s, 0.0, 0.0),
                        Point3::new(s, 0.0, s),
                    ),
                    CanonicalPlane::Yz => (
                        "yz",
                        Point3::origin(),
                        Point3::new(0.0, 0.0, s),
                        Point3::new(0.0, s, s),
                    ),
                };
                (name.to_string(), p1, p2, p3)
            }
        };

        let normal = (p3 - p1).cross(&(p2 - p1));
        if normal.norm_squared() < NORMAL_EPSILON_SQ {
            return Err(GeometryError::CollinearPlanePoints);
        }
        let d = normal.dot(&p3.coords);

        Ok(Self {
            name,
            p1,
            p2,
            p3,
            normal,
            d,
        })
    }

    /// Builds a mirror from three points, each multiplied by `scale` before the
    /// plane is derived.
    pub fn from_points(
        p1: Point3<f64>,
        p2: Point3<f64>,
        p3: Point3<f64>,
        scale: f64,
    ) -> Result<Self, GeometryError> {
        Self::new(PlaneSpec::ThreePoints(p1 * scale, p2 * scale, p3 * scale))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The (unnormalized) plane normal `(a, b, c)`.
    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    pub fn unit_normal(&self) -> Vector3<f64> {
        self.normal.normalize()
    }

    /// The plane offset `d` with `a·x + b·y + c·z = d` for on-plane points.
    pub fn offset(&self) -> f64 {
        self.d
    }

    /// Center of the plane patch spanned by the defining points.
    pub fn center(&self) -> Point3<f64> {
        self.p1 + (self.p3 - self.p1) / 2.0
    }

    /// Reflects a point through the mirror plane.
    pub fn reflect(&self, point: &Point3<f64>) -> Point3<f64> {
        let s0 = (self.normal.dot(&point.coords) - self.d) / self.normal.norm_squared();
        point - 2.0 * s0 * self.normal
    }

    /// Returns the mirror shifted by `offset`.
    pub fn translated(&self, offset: Vector3<f64>) -> Mirror {
        let mut moved = self.clone();
        moved.p1 += offset;
        moved.p2 += offset;
        moved.p3 += offset;
        // The normal is translation-invariant; only the offset changes.
        moved.d = moved.normal.dot(&moved.p3.coords);
        moved
    }

    /// Returns the mirror with every defining point multiplied by `factor`.
    pub fn scaled(&self, factor: f64) -> Result<Mirror, GeometryError> {
        Self::new(PlaneSpec::ThreePoints(
            self.p1 * factor,
            self.p2 * factor,
            self.p3 * factor,
        ))
    }

    /// Returns the mirror rotated about the axis through `axis_a` and `axis_b`
    /// by `angle` radians.
    ///
    /// # Errors
    ///
    /// Fails on a degenerate axis, or if rounding were ever to collapse the
    /// rotated points (rotation preserves collinearity, so the latter cannot
    /// occur for a valid mirror).
    pub fn rotated(
        &self,
        axis_a: &Point3<f64>,
        axis_b: &Point3<f64>,
        angle: f64,
    ) -> Result<Mirror, GeometryError> {
        let p1 = rotation::rotate_about_line(&self.p1, axis_a, axis_b, angle)?;
        let p2 = rotation::rotate_about_line(&self.p2, axis_a, axis_b, angle)?;
        let p3 = rotation::rotate_about_line(&self.p3, axis_a, axis_b, angle)?;
        Self::new(PlaneSpec::ThreePoints(p1, p2, p3))
    }

    /// Lazily yields the (n+1)×(n+1) grid of points interpolated over the
    /// plane patch spanned by the three defining points.
    ///
    /// The iterator is finite and restartable. This exists for visualization
    /// export only; the assembly and energy paths never touch it. A grid size
    /// of 0 degenerates to the single point `p1`.
    pub fn grid_points(&self, grid_size: usize) -> impl Iterator<Item = Point3<f64>> + '_ {
        // max(1) keeps the interpolation denominator non-zero for size 0.
        let g = grid_size.max(1) as f64;
        (0..=grid_size).flat_map(move |m| {
            (0..=grid_size).map(move |n| {
                let (m, n) = (m as f64, n as f64);
                let coords = (g - n) / g * self.p1.coords
                    + (n - m) / g * self.p2.coords
                    + m / g * self.p3.coords;
                Point3::from(coords)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn points_approx_equal(a: &Point3<f64>, b: &Point3<f64>) -> bool {
        (a - b).norm() < TOLERANCE
    }

    fn xy_mirror() -> Mirror {
        Mirror::new(PlaneSpec::Canonical(CanonicalPlane::Xy, 10.0)).unwrap()
    }

    #[test]
    fn canonical_plane_parses_case_insensitively() {
        assert_eq!(CanonicalPlane::from_str("XY"), Ok(CanonicalPlane::Xy));
        assert_eq!(CanonicalPlane::from_str("xz"), Ok(CanonicalPlane::Xz));
        assert_eq!(CanonicalPlane::from_str("Yz"), Ok(CanonicalPlane::Yz));
        assert_eq!(CanonicalPlane::from_str("zz"), Err(()));
    }

    #[test]
    fn reflection_through_xy_plane_negates_z() {
        let mirror = xy_mirror();
        let reflected = mirror.reflect(&Point3::new(1.0, 2.0, 3.0));
        assert!(points_approx_equal(&reflected, &Point3::new(1.0, 2.0, -3.0)));
    }

    #[test]
    fn reflection_is_self_inverse() {
        let mirror = Mirror::new(PlaneSpec::ThreePoints(
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.5, 0.0),
            Point3::new(-0.3, 1.0, 0.2),
        ))
        .unwrap();
        let point = Point3::new(4.0, -2.0, 7.5);
        let twice = mirror.reflect(&mirror.reflect(&point));
        assert!(points_approx_equal(&twice, &point));
    }

    #[test]
    fn on_plane_points_are_fixed_by_reflection() {
        let mirror = xy_mirror();
        let on_plane = Point3::new(3.0, -1.0, 0.0);
        assert!(points_approx_equal(&mirror.reflect(&on_plane), &on_plane));
    }

    #[test]
    fn collinear_points_are_rejected() {
        let result = Mirror::new(PlaneSpec::ThreePoints(
            Point3::origin(),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(2.0, 2.0, 2.0),
        ));
        assert_eq!(result, Err(GeometryError::CollinearPlanePoints));
    }

    #[test]
    fn from_points_applies_the_scale_before_deriving_the_plane() {
        let mirror = Mirror::from_points(
            Point3::origin(),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            5.0,
        )
        .unwrap();
        assert!(points_approx_equal(
            &mirror.center(),
            &Point3::new(2.5, 2.5, 0.0)
        ));
    }

    #[test]
    fn translated_mirror_reflects_about_the_shifted_plane() {
        let mirror = xy_mirror().translated(Vector3::new(0.0, 0.0, 1.0));
        let reflected = mirror.reflect(&Point3::new(0.0, 0.0, 3.0));
        assert!(points_approx_equal(&reflected, &Point3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn rotated_mirror_turns_xy_into_xz() {
        // Rotating the xy plane a quarter turn about x maps z-reflection to
        // y-reflection.
        let mirror = xy_mirror()
            .rotated(
                &Point3::origin(),
                &Point3::new(1.0, 0.0, 0.0),
                std::f64::consts::PI / 2.0,
            )
            .unwrap();
        let reflected = mirror.reflect(&Point3::new(0.0, 2.0, 0.0));
        assert!(points_approx_equal(&reflected, &Point3::new(0.0, -2.0, 0.0)));
    }

    #[test]
    fn grid_points_yields_a_full_grid_and_restarts() {
        let mirror = xy_mirror();
        let n = 4;
        assert_eq!(mirror.grid_points(n).count(), (n + 1) * (n + 1));
        // Restartable: a second pass yields the same first point.
        let first_a = mirror.grid_points(n).next().unwrap();
        let first_b = mirror.grid_points(n).next().unwrap();
        assert!(points_approx_equal(&first_a, &first_b));
    }

    #[test]
    fn zero_grid_size_degenerates_to_the_first_point() {
        let mirror = xy_mirror();
        let points: Vec<_> = mirror.grid_points(0).collect();
        assert_eq!(points.len(), 1);
        assert!(points[0].iter().all(|c| c.is_finite()));
        assert!(points_approx_equal(&points[0], &Point3::origin()));
    }

    #[test]
    fn grid_points_stay_on_the_plane() {
        let mirror = xy_mirror();
        for point in mirror.grid_points(5) {
            assert!(point.z.abs() < TOLERANCE);
        }
    }
}
