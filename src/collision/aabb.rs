use bevy::prelude::*;

/// Axis-aligned box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    /// World box enclosing a box of `size` rotated by `yaw` around Y.
    pub fn from_yawed_box(center: Vec3, size: Vec3, yaw: f32) -> Self {
        let half = size * 0.5;
        let (sin, cos) = yaw.sin_cos();
        let half_x = (half.x * cos).abs() + (half.z * sin).abs();
        let half_z = (half.x * sin).abs() + (half.z * cos).abs();
        Self::from_center_half_extents(center, Vec3::new(half_x, half.y, half_z))
    }

    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Touching faces count as intersecting.
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn union(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Distance along `direction` at which a ray from `origin` enters the box.
    pub fn ray_entry(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;

        for axis in 0..3 {
            let o = origin[axis];
            let d = direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_at(x: f32, z: f32) -> Aabb {
        Aabb::from_center_half_extents(Vec3::new(x, 0.5, z), Vec3::splat(0.5))
    }

    #[test]
    fn overlapping_boxes_intersect() {
        assert!(unit_at(0.0, 0.0).intersects(&unit_at(0.5, 0.5)));
    }

    #[test]
    fn touching_boxes_intersect() {
        assert!(unit_at(0.0, 0.0).intersects(&unit_at(1.0, 0.0)));
    }

    #[test]
    fn separated_boxes_do_not_intersect() {
        assert!(!unit_at(0.0, 0.0).intersects(&unit_at(1.01, 0.0)));
        assert!(!unit_at(0.0, 0.0).intersects(&unit_at(0.0, -3.0)));
    }

    #[test]
    fn yawed_box_swaps_extents_at_quarter_turn() {
        let b = Aabb::from_yawed_box(Vec3::ZERO, Vec3::new(4.0, 1.0, 2.0), std::f32::consts::FRAC_PI_2);
        assert!((b.max.x - 1.0).abs() < 1e-5, "{b:?}");
        assert!((b.max.z - 2.0).abs() < 1e-5, "{b:?}");
    }

    #[test]
    fn ray_hits_box_in_front() {
        let b = unit_at(0.0, -5.0);
        let t = b.ray_entry(Vec3::new(0.0, 0.5, 0.0), Vec3::NEG_Z);
        assert!((t.unwrap() - 4.5).abs() < 1e-5);
    }

    #[test]
    fn ray_misses_box_behind_or_beside() {
        let b = unit_at(0.0, -5.0);
        assert_eq!(b.ray_entry(Vec3::new(0.0, 0.5, 0.0), Vec3::Z), None);
        assert_eq!(b.ray_entry(Vec3::new(3.0, 0.5, 0.0), Vec3::NEG_Z), None);
    }
}
