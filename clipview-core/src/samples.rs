/// Procedural demo meshes
use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use nalgebra::{Point3, Vector3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::ClipViewError;
use crate::geometry::{Mesh, Triangle, Vertex};

const TERRAIN_SEED: u64 = 0x5eed_c11f;

/// The meshes the viewer can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleMesh {
    Cube,
    Tube,
    Terrain,
    Torus,
}

impl SampleMesh {
    pub const ALL: [SampleMesh; 4] = [
        SampleMesh::Cube,
        SampleMesh::Tube,
        SampleMesh::Terrain,
        SampleMesh::Torus,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SampleMesh::Cube => "cube",
            SampleMesh::Tube => "tube",
            SampleMesh::Terrain => "terrain",
            SampleMesh::Torus => "torus",
        }
    }

    pub fn generate(self) -> Mesh {
        match self {
            SampleMesh::Cube => cube(),
            SampleMesh::Tube => helical_tube(),
            SampleMesh::Terrain => terrain(TERRAIN_SEED),
            SampleMesh::Torus => torus(3.0, 1.0, 48, 24),
        }
    }
}

impl fmt::Display for SampleMesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SampleMesh {
    type Err = ClipViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SampleMesh::ALL
            .into_iter()
            .find(|sample| sample.name() == wanted)
            .ok_or_else(|| ClipViewError::UnknownSample(s.to_string()))
    }
}

/// A 10-unit cube with one corner on the origin
fn cube() -> Mesh {
    let mut mesh = Mesh::cube(10.0);
    mesh.translate(Vector3::new(5.0, 5.0, 5.0));
    mesh
}

/// A tube swept along a helix, its radius swelling towards the middle
fn helical_tube() -> Mesh {
    const POINTS: usize = 100;
    const SEGMENTS: usize = 20;

    let path: Vec<Point3<f32>> = (0..POINTS)
        .map(|i| {
            let s = i as f32 / (POINTS - 1) as f32;
            let theta = -4.0 * PI + s * 8.0 * PI;
            // Shifted by one so every coordinate is non-negative
            Point3::new(theta.cos() + 1.0, theta.sin() + 1.0, s * 8.0 + 1.0)
        })
        .collect();

    // log10 profile over the first half, mirrored over the second
    let half = POINTS / 2;
    let radii: Vec<f32> = (0..POINTS)
        .map(|i| {
            let k = if i < half { i } else { POINTS - 1 - i };
            let x = 2.0 + 8.0 * k as f32 / (half - 1) as f32;
            x.log10() / 2.0
        })
        .collect();

    let rings = sweep_rings(&path, &radii, SEGMENTS);
    let mut mesh = Mesh::with_capacity((POINTS - 1) * SEGMENTS * 2);
    for pair in rings.windows(2) {
        let (ring, next) = (&pair[0], &pair[1]);
        for j in 0..SEGMENTS {
            let k = (j + 1) % SEGMENTS;
            mesh.add_triangle(Triangle::new(ring[j], ring[k], next[k]));
            mesh.add_triangle(Triangle::new(ring[j], next[k], next[j]));
        }
    }
    mesh
}

/// Rings of vertices around `path`, framed by parallel transport
fn sweep_rings(path: &[Point3<f32>], radii: &[f32], segments: usize) -> Vec<Vec<Vertex>> {
    let n = path.len();
    let mut rings = Vec::with_capacity(n);
    let mut normal: Option<Vector3<f32>> = None;

    for i in 0..n {
        let ahead = path[(i + 1).min(n - 1)];
        let behind = path[i.saturating_sub(1)];
        let tangent = (ahead - behind).normalize();

        let seed = normal.unwrap_or_else(|| {
            if tangent.z.abs() < 0.9 {
                Vector3::z()
            } else {
                Vector3::x()
            }
        });
        let n_i = (seed - tangent * tangent.dot(&seed)).normalize();
        let b_i = tangent.cross(&n_i);
        normal = Some(n_i);

        let ring = (0..segments)
            .map(|j| {
                let a = 2.0 * PI * j as f32 / segments as f32;
                let radial = n_i * a.cos() + b_i * a.sin();
                Vertex::from_parts(path[i] + radial * radii[i], radial)
            })
            .collect();
        rings.push(ring);
    }
    rings
}

/// A 100x100 height field: sparse bumps everywhere plus taller peaks in a
/// central block, smoothed with a 3x3 box filter
fn terrain(seed: u64) -> Mesh {
    const SIZE: usize = 100;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut heights = vec![0.0f32; SIZE * SIZE];
    for i in 0..SIZE {
        for j in 0..SIZE {
            let outer = gaussian(&mut rng, 20.0);
            let outer = if outer < 5.0 { 0.0 } else { outer };
            let inner = gaussian(&mut rng, 50.0);
            let in_block = (30..70).contains(&i) && (30..70).contains(&j);
            let inner = if inner < 15.0 || !in_block { 0.0 } else { inner };
            heights[i * SIZE + j] = outer + inner;
        }
    }
    let heights = box_filter(&heights, SIZE);

    let at = |i: usize, j: usize| heights[i * SIZE + j];
    let vertex = |i: usize, j: usize| {
        let dx = at((i + 1).min(SIZE - 1), j) - at(i.saturating_sub(1), j);
        let dy = at(i, (j + 1).min(SIZE - 1)) - at(i, j.saturating_sub(1));
        let normal = Vector3::new(-dx * 0.5, -dy * 0.5, 1.0).normalize();
        Vertex::from_parts(Point3::new(i as f32, j as f32, at(i, j)), normal)
    };

    let mut mesh = Mesh::with_capacity((SIZE - 1) * (SIZE - 1) * 2);
    for i in 0..SIZE - 1 {
        for j in 0..SIZE - 1 {
            let (p00, p10, p11, p01) = (
                vertex(i, j),
                vertex(i + 1, j),
                vertex(i + 1, j + 1),
                vertex(i, j + 1),
            );
            mesh.add_triangle(Triangle::new(p00, p10, p11));
            mesh.add_triangle(Triangle::new(p00, p11, p01));
        }
    }
    mesh
}

/// Zero-mean normal sample (sum of twelve uniforms)
fn gaussian(rng: &mut StdRng, sigma: f32) -> f32 {
    let sum: f32 = (0..12).map(|_| rng.gen::<f32>()).sum();
    (sum - 6.0) * sigma
}

fn box_filter(values: &[f32], size: usize) -> Vec<f32> {
    let mut out = vec![0.0; values.len()];
    for i in 0..size {
        for j in 0..size {
            let mut total = 0.0;
            for di in -1i32..=1 {
                for dj in -1i32..=1 {
                    let ii = (i as i32 + di).clamp(0, size as i32 - 1) as usize;
                    let jj = (j as i32 + dj).clamp(0, size as i32 - 1) as usize;
                    total += values[ii * size + jj];
                }
            }
            out[i * size + j] = total / 9.0;
        }
    }
    out
}

/// Parametric torus around the Z axis
fn torus(major: f32, minor: f32, rings: usize, sides: usize) -> Mesh {
    let vertex = |i: usize, j: usize| {
        let u = 2.0 * PI * (i % rings) as f32 / rings as f32;
        let v = 2.0 * PI * (j % sides) as f32 / sides as f32;
        let normal = Vector3::new(v.cos() * u.cos(), v.cos() * u.sin(), v.sin());
        let centre = Vector3::new(u.cos(), u.sin(), 0.0) * major;
        Vertex::from_parts(Point3::from(centre + normal * minor), normal)
    };

    let mut mesh = Mesh::with_capacity(rings * sides * 2);
    for i in 0..rings {
        for j in 0..sides {
            let (a, b, c, d) = (
                vertex(i, j),
                vertex(i + 1, j),
                vertex(i + 1, j + 1),
                vertex(i, j + 1),
            );
            mesh.add_triangle(Triangle::new(a, b, c));
            mesh.add_triangle(Triangle::new(a, c, d));
        }
    }
    mesh
}
