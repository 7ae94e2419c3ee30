//! Great-circle interpolation between waypoints.
//!
//! Coordinates are lifted onto the unit sphere and slerped so the
//! leading edge of the drawn path follows the arc a map renders for a
//! segment, not a chord through the globe.

use crate::waypoint::Waypoint;

/// Interpolate between `a` and `b` along the great circle through
/// them, at `fraction` (clamped to `[0, 1]`) of the arc.
pub fn interpolate(a: Waypoint, b: Waypoint, fraction: f64) -> Waypoint {
    let t = fraction.clamp(0.0, 1.0);
    let v = slerp_unit(unit_vector(a), unit_vector(b), t);
    to_waypoint(v)
}

fn unit_vector(w: Waypoint) -> [f64; 3] {
    let lat = w.lat.to_radians();
    let lng = w.lng.to_radians();
    [lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin()]
}

fn to_waypoint(v: [f64; 3]) -> Waypoint {
    let lat = v[2].clamp(-1.0, 1.0).asin().to_degrees();
    let lng = v[1].atan2(v[0]).to_degrees();
    Waypoint::new(lat, lng)
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn normalize(a: [f64; 3]) -> [f64; 3] {
    let n = dot(a, a).sqrt();
    if n <= 0.0 {
        [0.0, 0.0, 0.0]
    } else {
        [a[0] / n, a[1] / n, a[2] / n]
    }
}

fn slerp_unit(a: [f64; 3], b: [f64; 3], t: f64) -> [f64; 3] {
    let a = normalize(a);
    let b = normalize(b);
    let d = dot(a, b).clamp(-1.0, 1.0);

    // Nearly identical or antipodal endpoints: the sine weights are
    // numerically useless, fall back to normalized lerp.
    let omega = d.acos();
    let sin_omega = omega.sin();
    if d > 0.9995 || sin_omega.abs() < f64::EPSILON {
        let v = [
            a[0] + (b[0] - a[0]) * t,
            a[1] + (b[1] - a[1]) * t,
            a[2] + (b[2] - a[2]) * t,
        ];
        return normalize(v);
    }

    let s0 = ((1.0 - t) * omega).sin() / sin_omega;
    let s1 = (t * omega).sin() / sin_omega;
    normalize([
        a[0] * s0 + b[0] * s1,
        a[1] * s0 + b[1] * s1,
        a[2] * s0 + b[2] * s1,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn endpoints_are_exact() {
        let a = Waypoint::new(48.8566, 2.3522);
        let b = Waypoint::new(52.52, 13.405);
        let p0 = interpolate(a, b, 0.0);
        let p1 = interpolate(a, b, 1.0);
        assert_abs_diff_eq!(p0.lat, a.lat, epsilon = 1e-9);
        assert_abs_diff_eq!(p0.lng, a.lng, epsilon = 1e-9);
        assert_abs_diff_eq!(p1.lat, b.lat, epsilon = 1e-9);
        assert_abs_diff_eq!(p1.lng, b.lng, epsilon = 1e-9);
    }

    #[test]
    fn equator_midpoint() {
        let a = Waypoint::new(0.0, 0.0);
        let b = Waypoint::new(0.0, 90.0);
        let mid = interpolate(a, b, 0.5);
        assert_abs_diff_eq!(mid.lat, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mid.lng, 45.0, epsilon = 1e-9);
    }

    #[test]
    fn meridian_midpoint() {
        let a = Waypoint::new(0.0, 10.0);
        let b = Waypoint::new(60.0, 10.0);
        let mid = interpolate(a, b, 0.5);
        assert_abs_diff_eq!(mid.lat, 30.0, epsilon = 1e-9);
        assert_abs_diff_eq!(mid.lng, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn coincident_endpoints_stay_put() {
        let a = Waypoint::new(12.34, 56.78);
        let mid = interpolate(a, a, 0.5);
        assert_abs_diff_eq!(mid.lat, a.lat, epsilon = 1e-9);
        assert_abs_diff_eq!(mid.lng, a.lng, epsilon = 1e-9);
    }

    #[test]
    fn fraction_is_clamped() {
        let a = Waypoint::new(0.0, 0.0);
        let b = Waypoint::new(0.0, 90.0);
        let before = interpolate(a, b, -1.0);
        let after = interpolate(a, b, 2.0);
        assert_abs_diff_eq!(before.lng, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(after.lng, 90.0, epsilon = 1e-9);
    }

    #[test]
    fn arc_follows_the_great_circle() {
        // Two points at the same latitude: the great-circle midpoint
        // bulges poleward of the parallel between them.
        let a = Waypoint::new(45.0, -30.0);
        let b = Waypoint::new(45.0, 30.0);
        let mid = interpolate(a, b, 0.5);
        assert!(mid.lat > 45.0);
        assert_abs_diff_eq!(mid.lng, 0.0, epsilon = 1e-9);
    }
}
