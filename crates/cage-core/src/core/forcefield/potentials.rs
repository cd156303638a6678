/// Lorentz-Berthelot combining rule: arithmetic-mean sigma, geometric-mean
/// epsilon.
#[inline]
pub fn lb_mix(sigma1: f64, sigma2: f64, eps1: f64, eps2: f64) -> (f64, f64) {
    ((sigma1 + sigma2) / 2.0, (eps1 * eps2).sqrt())
}

/// 12-6 Lennard-Jones potential in the sigma/epsilon form,
/// 4ε[(σ/r)¹² − (σ/r)⁶]. Energy in kB units.
#[inline]
pub fn lennard_jones(dist: f64, sigma: f64, eps: f64) -> f64 {
    let rho6 = (sigma / dist).powi(6);
    4.0 * eps * (rho6 * rho6 - rho6)
}
