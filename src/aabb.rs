//! Axis-aligned box primitive and its slab-method ray intersection.

use glam::Vec3A;

use crate::ray::Ray;

/// Axis-aligned bounding box defined by its min and max corners.
///
/// Invariant: `min[i] <= max[i]` on every axis. Scene files specify boxes by
/// center and full size, see [`Aabb::from_center_size`].
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Corner with the smallest coordinate on every axis.
    pub min: Vec3A,
    /// Corner with the largest coordinate on every axis.
    pub max: Vec3A,
}

/// Outcome of the per-axis slab scan.
enum Entry {
    /// The ray points away from the box on some outside axis.
    Miss,
    /// The ray origin lies inside the box on all three axes.
    Inside,
    /// Entry face: parameter along the ray and the outward face normal.
    Face { t: f32, normal: Vec3A },
}

impl Aabb {
    /// Create a box from explicit min and max corners.
    pub fn new(min: Vec3A, max: Vec3A) -> Self {
        Self { min, max }
    }

    /// Create a box from its center point and full extent per axis.
    pub fn from_center_size(center: Vec3A, size: Vec3A) -> Self {
        Self {
            min: center - size / 2.0,
            max: center + size / 2.0,
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec3A) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Per-axis slab scan.
    ///
    /// For each axis where the origin lies outside the slab, the ray must move
    /// toward the box or the test fails outright (a zero direction component
    /// counts as moving away, which also keeps the division safe). The entry
    /// face is the axis with the largest entry parameter; ties keep the earlier
    /// axis in x, y, z order.
    fn entry(&self, ray: &Ray) -> Entry {
        let o = ray.origin.to_array();
        let d = ray.direction.to_array();
        let min = self.min.to_array();
        let max = self.max.to_array();

        // -1 marks an axis whose slab already contains the origin; real entry
        // parameters are always >= 0 so the sentinel never wins the max.
        let mut t = [-1.0_f32; 3];
        let mut sign = [0.0_f32; 3];
        let mut inside = true;

        for i in 0..3 {
            if o[i] < min[i] {
                if d[i] <= 0.0 {
                    return Entry::Miss;
                }
                t[i] = (min[i] - o[i]) / d[i];
                sign[i] = -1.0;
                inside = false;
            } else if max[i] < o[i] {
                if d[i] >= 0.0 {
                    return Entry::Miss;
                }
                t[i] = (max[i] - o[i]) / d[i];
                sign[i] = 1.0;
                inside = false;
            }
        }

        if inside {
            return Entry::Inside;
        }

        let mut axis = 0;
        if t[axis] < t[1] {
            axis = 1;
        }
        if t[axis] < t[2] {
            axis = 2;
        }

        let normal = match axis {
            0 => Vec3A::new(sign[0], 0.0, 0.0),
            1 => Vec3A::new(0.0, sign[1], 0.0),
            _ => Vec3A::new(0.0, 0.0, sign[2]),
        };
        Entry::Face { t: t[axis], normal }
    }

    /// The entry-axis component of a slab hit was solved from the face plane,
    /// so pin it to that exact coordinate. Evaluating `at(t)` can round it a
    /// fraction outside the box, which would fail the containment check.
    fn snap_to_face(&self, mut p: Vec3A, normal: Vec3A) -> Vec3A {
        for i in 0..3 {
            if normal[i] < 0.0 {
                p[i] = self.min[i];
            } else if normal[i] > 0.0 {
                p[i] = self.max[i];
            }
        }
        p
    }

    /// Ray-box intersection, point only.
    ///
    /// A ray starting inside the box reports its own origin as the hit; no
    /// surface normal is derivable in that case, use
    /// [`Aabb::intersect_with_normal`] when one is needed.
    pub fn intersect(&self, ray: &Ray) -> Option<Vec3A> {
        match self.entry(ray) {
            Entry::Miss => None,
            Entry::Inside => Some(ray.origin),
            Entry::Face { t, normal } => {
                let p = self.snap_to_face(ray.at(t), normal);
                // Guards floating-point misses past an edge of the entry face.
                self.contains(p).then_some(p)
            }
        }
    }

    /// Ray-box intersection returning the hit point and the outward normal of
    /// the face that was hit.
    ///
    /// An inside origin is resolved by a single bounded retry: the origin is
    /// pushed forward past the box's summed extent, the direction negated, and
    /// the slab scan re-run once. The reversed ray lands on the exit face, so
    /// interior rays report that face and its outward normal.
    pub fn intersect_with_normal(&self, ray: &Ray) -> Option<(Vec3A, Vec3A)> {
        let mut probe = *ray;
        for _attempt in 0..2 {
            match self.entry(&probe) {
                Entry::Miss => return None,
                Entry::Inside => {
                    let size = self.max - self.min;
                    let advance = size.x + size.y + size.z;
                    probe = Ray::new(probe.origin + probe.direction * advance, -probe.direction);
                }
                Entry::Face { t, normal } => {
                    let p = self.snap_to_face(probe.at(t), normal);
                    if !self.contains(p) {
                        return None;
                    }
                    return Some((p, normal));
                }
            }
        }
        // The retried origin lies outside the box by construction, so the
        // second pass cannot report Inside again.
        None
    }
}
