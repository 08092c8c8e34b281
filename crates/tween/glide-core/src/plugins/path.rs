//! Path plugin: moves a 3D point along waypoints at constant speed.
//!
//! The path always begins at the tween's captured start value. Progress is
//! reparametrized by arc length using `resolution` samples per segment, so equal
//! eased increments cover equal distance.

use serde::{Deserialize, Serialize};

use super::ValuePlugin;
use crate::error::TweenError;
use crate::interp::functions::{add_n, length_n, lerp_n, scale_n, sub_n};
use crate::Result;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PathType {
    /// Straight segments between waypoints.
    #[default]
    Linear,
    /// Uniform Catmull-Rom spline through every waypoint.
    CatmullRom,
}

/// Waypoint geometry plus its arc-length table.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    kind: PathType,
    waypoints: Vec<[f32; 3]>,
    resolution: u32,
    points: Vec<[f32; 3]>,
    /// (segment parameter, cumulative length), ascending in both.
    table: Vec<(f32, f32)>,
    length: f32,
}

impl Path {
    pub fn new(kind: PathType, waypoints: Vec<[f32; 3]>, resolution: u32) -> Result<Self> {
        if waypoints.is_empty() {
            return Err(TweenError::invalid("path needs at least one waypoint"));
        }
        if resolution == 0 {
            return Err(TweenError::invalid("path resolution must be at least 1"));
        }
        if waypoints.iter().flatten().any(|c| !c.is_finite()) {
            return Err(TweenError::invalid("path waypoints must be finite"));
        }
        Ok(Self {
            kind,
            waypoints,
            resolution,
            points: Vec::new(),
            table: Vec::new(),
            length: 0.0,
        })
    }

    pub fn kind(&self) -> PathType {
        self.kind
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Total arc length; 0 until the path has been built.
    pub fn length(&self) -> f32 {
        self.length
    }

    /// Points the path passes through, starting with the origin it was built from.
    pub fn points(&self) -> &[[f32; 3]] {
        &self.points
    }

    /// Lay the path out from `origin`, offsetting waypoints by it when `relative`.
    pub fn build(&mut self, origin: [f32; 3], relative: bool) {
        let mut points = Vec::with_capacity(self.waypoints.len() + 1);
        points.push(origin);
        points.extend(self.waypoints.iter().map(|wp| {
            if relative {
                add_n(&origin, wp)
            } else {
                *wp
            }
        }));
        self.points = points;

        let segments = self.points.len() - 1;
        let res = self.resolution as usize;
        let mut table = Vec::with_capacity(segments * res + 1);
        table.push((0.0, 0.0));
        let mut total = 0.0;
        let mut prev = self.points[0];
        for seg in 0..segments {
            for step in 1..=res {
                let u = seg as f32 + step as f32 / res as f32;
                let p = self.point_at_param(u);
                total += length_n(&sub_n(&p, &prev));
                table.push((u, total));
                prev = p;
            }
        }
        self.table = table;
        self.length = total;
    }

    pub fn last_point(&self) -> [f32; 3] {
        self.points
            .last()
            .or_else(|| self.waypoints.last())
            .copied()
            .unwrap_or_default()
    }

    /// Point at segment parameter `u` in `[0, segments]`.
    pub fn point_at_param(&self, u: f32) -> [f32; 3] {
        let pts = &self.points;
        let segments = pts.len().saturating_sub(1);
        if segments == 0 {
            return pts.first().copied().unwrap_or_default();
        }
        let u = u.clamp(0.0, segments as f32);
        let seg = (u.floor() as usize).min(segments - 1);
        let s = u - seg as f32;
        match self.kind {
            PathType::Linear => lerp_n(&pts[seg], &pts[seg + 1], s),
            PathType::CatmullRom => {
                let p1 = pts[seg];
                let p2 = pts[seg + 1];
                let p0 = if seg == 0 {
                    sub_n(&scale_n(&p1, 2.0), &p2)
                } else {
                    pts[seg - 1]
                };
                let p3 = if seg + 2 < pts.len() {
                    pts[seg + 2]
                } else {
                    sub_n(&scale_n(&p2, 2.0), &p1)
                };
                catmull_rom(p0, p1, p2, p3, s)
            }
        }
    }

    /// Point at fraction `p` of the total arc length.
    pub fn point_at_percentage(&self, p: f32) -> [f32; 3] {
        if self.table.len() < 2 || self.length <= 0.0 {
            return self.point_at_param(p.clamp(0.0, 1.0) * self.segment_count() as f32);
        }
        let target = p.clamp(0.0, 1.0) * self.length;
        let idx = self
            .table
            .partition_point(|&(_, dist)| dist < target)
            .clamp(1, self.table.len() - 1);
        let (u0, d0) = self.table[idx - 1];
        let (u1, d1) = self.table[idx];
        let span = d1 - d0;
        let u = if span > 0.0 {
            u0 + (u1 - u0) * (target - d0) / span
        } else {
            u1
        };
        self.point_at_param(u)
    }

    fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

fn catmull_rom(p0: [f32; 3], p1: [f32; 3], p2: [f32; 3], p3: [f32; 3], t: f32) -> [f32; 3] {
    let t2 = t * t;
    let t3 = t2 * t;
    std::array::from_fn(|i| {
        0.5 * (2.0 * p1[i]
            + (-p0[i] + p2[i]) * t
            + (2.0 * p0[i] - 5.0 * p1[i] + 4.0 * p2[i] - p3[i]) * t2
            + (-p0[i] + 3.0 * p1[i] - 3.0 * p2[i] + p3[i]) * t3)
    })
}

/// Drives a `[f32; 3]` accessor along a [`Path`].
///
/// The end value is the last waypoint; incremental loops shift the whole path
/// by `last - first` per cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct PathPlugin {
    path: Path,
}

impl PathPlugin {
    pub fn new(path: Path) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ValuePlugin for PathPlugin {
    type Value = [f32; 3];
    type Stored = [f32; 3];

    fn name(&self) -> &'static str {
        "path"
    }

    fn validate(&self) -> Result<()> {
        if self.path.waypoints.is_empty() || self.path.resolution == 0 {
            return Err(TweenError::invalid("path needs waypoints and resolution >= 1"));
        }
        Ok(())
    }

    fn to_stored(&self, value: [f32; 3]) -> [f32; 3] {
        value
    }

    fn to_value(&self, stored: &[f32; 3]) -> [f32; 3] {
        *stored
    }

    fn add(&self, a: &[f32; 3], b: &[f32; 3]) -> [f32; 3] {
        add_n(a, b)
    }

    fn subtract(&self, a: &[f32; 3], b: &[f32; 3]) -> [f32; 3] {
        sub_n(a, b)
    }

    fn scale(&self, a: &[f32; 3], k: f32) -> [f32; 3] {
        scale_n(a, k)
    }

    fn prepare(&mut self, start: &[f32; 3], relative: bool) {
        self.path.build(*start, relative);
    }

    fn resolve_end(&self, _start: &[f32; 3], _end: &[f32; 3], _relative: bool) -> [f32; 3] {
        self.path.last_point()
    }

    fn interpolate(&self, start: &[f32; 3], _change: &[f32; 3], eased: f32) -> [f32; 3] {
        let origin = self.path.points.first().copied().unwrap_or(*start);
        let on_path = self.path.point_at_percentage(eased);
        add_n(start, &sub_n(&on_path, &origin))
    }
}
