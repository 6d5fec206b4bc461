use glam::Vec3A;
use std::f32::consts::FRAC_1_SQRT_2;

/// Returns a unit vector orthogonal to `n`, which must be non-zero.
///
/// The component of largest magnitude picks the construction plane so the
/// result stays well conditioned for any input direction.
pub fn any_unit_orthogonal(n: Vec3A) -> Vec3A {
    if n.z.abs() > FRAC_1_SQRT_2 {
        // choose a vector in the y-z plane
        let a = n.y * n.y + n.z * n.z;
        let k = 1. / a.sqrt();
        Vec3A::new(0., -n.z * k, n.y * k)
    } else {
        // choose a vector in the x-y plane
        let a = n.x * n.x + n.y * n.y;
        let k = 1. / a.sqrt();
        Vec3A::new(-n.y * k, n.x * k, 0.)
    }
}
