/// Axis-aligned bounds and the clip bounds tracker
use std::fmt;
use std::str::FromStr;

use crate::config::ClipConfig;
use crate::error::ClipViewError;

/// One of the three coordinate axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// The axis after this one, wrapping Z back to X
    pub fn next(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::Z,
            Axis::Z => Axis::X,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        f.write_str(name)
    }
}

impl FromStr for Axis {
    type Err = ClipViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            _ => Err(ClipViewError::UnknownAxis(s.to_string())),
        }
    }
}

/// Min/max along a single axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    pub fn center(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp into `limits`, then restore at least `separation` between min and max.
    ///
    /// `limits` must be at least `separation` wide.
    pub fn clamped(self, limits: AxisBounds, separation: f64) -> AxisBounds {
        let mut min = self.min.clamp(limits.min, limits.max);
        let mut max = self.max.clamp(limits.min, limits.max);
        // Gaps within rounding error of the separation are left alone
        if max - min < separation - 1e-9 {
            max = (min + separation).min(limits.max);
            min = max - separation;
        }
        AxisBounds { min, max }
    }
}

/// Axis-aligned box: `[xmin, xmax, ymin, ymax, zmin, zmax]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxBounds {
    pub x: AxisBounds,
    pub y: AxisBounds,
    pub z: AxisBounds,
}

impl BoxBounds {
    pub fn new(x: AxisBounds, y: AxisBounds, z: AxisBounds) -> Self {
        Self { x, y, z }
    }

    /// The unit cube `[0, 1]` on every axis
    pub fn unit() -> Self {
        let unit = AxisBounds::new(0.0, 1.0);
        Self::new(unit, unit, unit)
    }

    pub fn from_array(b: [f64; 6]) -> Self {
        Self {
            x: AxisBounds::new(b[0], b[1]),
            y: AxisBounds::new(b[2], b[3]),
            z: AxisBounds::new(b[4], b[5]),
        }
    }

    pub fn to_array(&self) -> [f64; 6] {
        [
            self.x.min, self.x.max, self.y.min, self.y.max, self.z.min, self.z.max,
        ]
    }

    pub fn axis(&self, axis: Axis) -> AxisBounds {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }

    pub fn axis_mut(&mut self, axis: Axis) -> &mut AxisBounds {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }

    pub fn min_corner(&self) -> [f64; 3] {
        [self.x.min, self.y.min, self.z.min]
    }

    pub fn max_corner(&self) -> [f64; 3] {
        [self.x.max, self.y.max, self.z.max]
    }

    pub fn center(&self) -> [f64; 3] {
        [self.x.center(), self.y.center(), self.z.center()]
    }

    pub fn contains(&self, p: [f64; 3]) -> bool {
        self.x.contains(p[0]) && self.y.contains(p[1]) && self.z.contains(p[2])
    }

    /// The eight corners, ordered by (x, y, z) bits of the index
    pub fn corners(&self) -> [[f64; 3]; 8] {
        let lo = self.min_corner();
        let hi = self.max_corner();
        let mut out = [[0.0; 3]; 8];
        for (i, corner) in out.iter_mut().enumerate() {
            *corner = [
                if i & 1 == 0 { lo[0] } else { hi[0] },
                if i & 2 == 0 { lo[1] } else { hi[1] },
                if i & 4 == 0 { lo[2] } else { hi[2] },
            ];
        }
        out
    }
}

/// The full bounding box of the loaded source mesh. Read-only once created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshExtent {
    bounds: BoxBounds,
}

impl MeshExtent {
    pub fn new(bounds: BoxBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> BoxBounds {
        self.bounds
    }

    pub fn axis(&self, axis: Axis) -> AxisBounds {
        self.bounds.axis(axis)
    }
}

/// Current clip bounds plus the extent they are allowed to range over
#[derive(Debug, Clone)]
pub struct BoundsTracker {
    extent: Option<MeshExtent>,
    limits: BoxBounds,
    bounds: BoxBounds,
    epsilon: f64,
    separation: f64,
    snap: f64,
}

impl BoundsTracker {
    pub fn new(config: &ClipConfig) -> Self {
        Self {
            extent: None,
            limits: BoxBounds::unit(),
            bounds: BoxBounds::unit(),
            epsilon: config.epsilon,
            separation: config.min_separation,
            snap: config.snap_resolution,
        }
    }

    /// Adopt a new mesh extent and open the bounds to the padded full range.
    pub fn set_extent(&mut self, extent: MeshExtent) {
        let mut limits = extent.bounds();
        for axis in Axis::ALL {
            *limits.axis_mut(axis) = self.pad(extent.axis(axis));
        }
        self.extent = Some(extent);
        self.limits = limits;
        self.bounds = limits;
    }

    /// Padded range for an axis: snapped outward to the snap resolution, then
    /// widened by epsilon on each side. Keeps zero-size axes usable.
    fn pad(&self, axis: AxisBounds) -> AxisBounds {
        let steps = (1.0 / self.snap).round();
        let lo = (axis.min * steps).floor() / steps - self.epsilon;
        let hi = (axis.max * steps).ceil() / steps + self.epsilon;
        AxisBounds::new(lo, hi)
    }

    pub fn extent(&self) -> Option<&MeshExtent> {
        self.extent.as_ref()
    }

    pub fn bounds(&self) -> BoxBounds {
        self.bounds
    }

    /// The widened range an axis may take
    pub fn limits(&self, axis: Axis) -> AxisBounds {
        self.limits.axis(axis)
    }

    /// Accept new bounds, clamped into the limits with min < max restored.
    pub fn set_bounds(&mut self, bounds: BoxBounds) -> BoxBounds {
        let mut next = bounds;
        for axis in Axis::ALL {
            let clamped = bounds.axis(axis).clamped(self.limits(axis), self.separation);
            *next.axis_mut(axis) = clamped;
        }
        self.bounds = next;
        next
    }

    /// Set the bounds to exactly the mesh extent. No-op without a mesh.
    pub fn reset_to_extent(&mut self) -> Option<BoxBounds> {
        let extent = self.extent?;
        let mut bounds = extent.bounds();
        // A flat axis is widened so min < max still holds.
        for axis in Axis::ALL {
            let b = bounds.axis(axis);
            if b.max - b.min <= 0.0 {
                *bounds.axis_mut(axis) = b.clamped(self.limits(axis), self.separation);
            }
        }
        self.bounds = bounds;
        Some(bounds)
    }

    /// Forget the extent and fall back to the unit cube.
    pub fn reset(&mut self) {
        self.extent = None;
        self.limits = BoxBounds::unit();
        self.bounds = BoxBounds::unit();
    }
}
