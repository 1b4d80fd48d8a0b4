/// Generic axis-aligned bounding box for N-dimensional space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox<const D: usize> {
    pub min: [f64; D],
    pub max: [f64; D],
}

impl<const D: usize> BoundingBox<D> {
    pub fn new(min: [f64; D], max: [f64; D]) -> Self {
        Self { min, max }
    }

    /// An inverted box that any `include` call will snap onto.
    pub fn empty() -> Self {
        Self {
            min: [f64::INFINITY; D],
            max: [f64::NEG_INFINITY; D],
        }
    }

    /// Smallest box containing every point of a flat `[x, y, z, x, y, z, ...]` buffer.
    ///
    /// Returns `None` for an empty buffer.
    pub fn from_flat(points: &[f64]) -> Option<Self> {
        if points.len() < D {
            return None;
        }
        let mut bounds = Self::empty();
        for p in points.chunks_exact(D) {
            for i in 0..D {
                bounds.include_coord(i, p[i]);
            }
        }
        Some(bounds)
    }

    #[inline]
    pub fn include_coord(&mut self, axis: usize, v: f64) {
        if v < self.min[axis] { self.min[axis] = v; }
        if v > self.max[axis] { self.max[axis] = v; }
    }

    pub fn size(&self) -> [f64; D] {
        let mut s = [0.0; D];
        for i in 0..D {
            s[i] = self.max[i] - self.min[i];
        }
        s
    }

    /// Axis with the largest extent. Ties resolve towards the lower axis.
    pub fn longest_axis(&self) -> usize {
        let size = self.size();
        let mut axis = 0;
        for i in 1..D {
            if size[axis] < size[i] {
                axis = i;
            }
        }
        axis
    }

    pub fn contains(&self, point: &[f64; D]) -> bool {
        (0..D).all(|i| point[i] >= self.min[i] && point[i] <= self.max[i])
    }

    /// The point inside the box nearest to `point` (the point itself if it is inside).
    pub fn closest_point(&self, point: &[f64; D]) -> [f64; D] {
        let mut c = *point;
        for i in 0..D {
            if c[i] < self.min[i] { c[i] = self.min[i]; }
            else if c[i] > self.max[i] { c[i] = self.max[i]; }
        }
        c
    }

    /// Squared distance from `point` to the box, zero when inside.
    pub fn dist_sq(&self, point: &[f64; D]) -> f64 {
        let mut d2 = 0.0;
        for i in 0..D {
            let v = point[i];
            if v < self.min[i] { d2 += (self.min[i] - v).powi(2); }
            else if v > self.max[i] { d2 += (v - self.max[i]).powi(2); }
        }
        d2
    }
}

#[inline]
pub(crate) fn dist_sq<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
    let mut d2 = 0.0;
    for i in 0..D {
        let d = a[i] - b[i];
        d2 += d * d;
    }
    d2
}
