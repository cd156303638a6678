use super::GeometryError;
use nalgebra::Point3;

/// A crystallographic unit cell used for Cartesian/fractional conversions and
/// periodic-boundary wrapping.
///
/// Angles are given in degrees. The fractional-cell volume factor is computed
/// once at construction and reused by every conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitCell {
    lengths: [f64; 3],
    angles_deg: [f64; 3],
    frac_volume: f64,
}

impl UnitCell {
    /// Creates a unit cell from edge lengths (a, b, c) and angles
    /// (alpha, beta, gamma) in degrees.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegenerateCell`] for non-positive edge lengths
    /// or an angle combination with vanishing cell volume.
    pub fn new(lengths: [f64; 3], angles_deg: [f64; 3]) -> Result<Self, GeometryError> {
        if lengths.iter().any(|&l| l <= 0.0) {
            return Err(GeometryError::DegenerateCell(format!(
                "edge lengths must be positive, got {:?}",
                lengths
            )));
        }

        let [alp, bet, gam] = angles_deg.map(f64::to_radians);
        let volume_sq = 1.0 - alp.cos().powi(2) - bet.cos().powi(2) - gam.cos().powi(2)
            + 2.0 * alp.cos() * bet.cos() * gam.cos();
        if volume_sq <= f64::EPSILON {
            return Err(GeometryError::DegenerateCell(format!(
                "cell angles {:?} give a vanishing volume",
                angles_deg
            )));
        }

        Ok(Self {
            lengths,
            angles_deg,
            frac_volume: volume_sq.sqrt(),
        })
    }

    pub fn lengths(&self) -> [f64; 3] {
        self.lengths
    }

    pub fn angles_deg(&self) -> [f64; 3] {
        self.angles_deg
    }

    /// The precomputed fractional-cell volume factor.
    pub fn frac_volume(&self) -> f64 {
        self.frac_volume
    }

    /// Converts a Cartesian point to fractional coordinates.
    pub fn to_fractional(&self, point: &Point3<f64>) -> Point3<f64> {
        let [a, b, c] = self.lengths;
        let [alp, bet, gam] = self.angles_deg.map(f64::to_radians);
        let v = self.frac_volume;

        let x_frac = point.x / a - gam.cos() / (a * gam.sin()) * point.y
            + (alp.cos() * gam.cos() - bet.cos()) / (a * v * gam.sin()) * point.z;
        let y_frac = point.y / (b * gam.sin())
            + (bet.cos() * gam.cos() - alp.cos()) / (b * v * gam.sin()) * point.z;
        let z_frac = gam.sin() / (c * v) * point.z;

        Point3::new(x_frac, y_frac, z_frac)
    }

    /// Converts a fractional point to Cartesian coordinates.
    pub fn to_cartesian(&self, point: &Point3<f64>) -> Point3<f64> {
        let [a, b, c] = self.lengths;
        let [alp, bet, gam] = self.angles_deg.map(f64::to_radians);
        let v = self.frac_volume;

        let x = a * point.x + b * gam.cos() * point.y + c * bet.cos() * point.z;
        let y = b * gam.sin() * point.y
            + c * (alp.cos() - bet.cos() * gam.cos()) / gam.sin() * point.z;
        let z = c * v / gam.sin() * point.z;

        Point3::new(x, y, z)
    }

    /// Reduces each fractional component into [0, 1).
    pub fn wrap_fractional(point: &Point3<f64>) -> Point3<f64> {
        Point3::new(
            point.x - point.x.floor(),
            point.y - point.y.floor(),
            point.z - point.z.floor(),
        )
    }

    /// Applies periodic-boundary wrapping to a Cartesian point: converts to
    /// fractional coordinates, reduces into [0, 1), and converts back.
    pub fn wrap(&self, point: &Point3<f64>) -> Point3<f64> {
        let frac = self.to_fractional(point);
        self.to_cartesian(&Self::wrap_fractional(&frac))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    fn points_approx_equal(a: &Point3<f64>, b: &Point3<f64>) -> bool {
        (a - b).norm() < TOLERANCE
    }

    fn orthorhombic() -> UnitCell {
        UnitCell::new([26.0, 26.0, 26.0], [90.0, 90.0, 90.0]).unwrap()
    }

    #[test]
    fn orthorhombic_cell_has_unit_volume_factor() {
        assert!((orthorhombic().frac_volume() - 1.0).abs() < TOLERANCE);
    }

    #[test]
    fn fractional_conversion_divides_by_edge_length_in_orthorhombic_cells() {
        let cell = orthorhombic();
        let frac = cell.to_fractional(&Point3::new(13.0, 26.0, -6.5));
        assert!(points_approx_equal(&frac, &Point3::new(0.5, 1.0, -0.25)));
    }

    #[test]
    fn cartesian_and_fractional_conversions_round_trip() {
        let cell = UnitCell::new([10.0, 12.0, 15.0], [80.0, 95.0, 102.0]).unwrap();
        let point = Point3::new(3.7, -4.1, 9.2);
        let back = cell.to_cartesian(&cell.to_fractional(&point));
        assert!(points_approx_equal(&back, &point));
    }

    #[test]
    fn wrap_fractional_reduces_components_into_unit_interval() {
        let wrapped = UnitCell::wrap_fractional(&Point3::new(0.23, 2.21, -1.33));
        assert!(points_approx_equal(&wrapped, &Point3::new(0.23, 0.21, 0.67)));
    }

    #[test]
    fn wrap_moves_outside_points_into_the_cell() {
        let cell = orthorhombic();
        let wrapped = cell.wrap(&Point3::new(27.0, -1.0, 52.5));
        assert!(points_approx_equal(&wrapped, &Point3::new(1.0, 25.0, 0.5)));
    }

    #[test]
    fn non_positive_edge_length_is_rejected() {
        let result = UnitCell::new([0.0, 1.0, 1.0], [90.0, 90.0, 90.0]);
        assert!(matches!(result, Err(GeometryError::DegenerateCell(_))));
    }

    #[test]
    fn flat_cell_angles_are_rejected() {
        let result = UnitCell::new([1.0, 1.0, 1.0], [0.0, 90.0, 90.0]);
        assert!(matches!(result, Err(GeometryError::DegenerateCell(_))));
    }
}
