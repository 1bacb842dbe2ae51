/// Geometry primitives and box clipping
use nalgebra::{Point3, Vector3};

use crate::bounds::{AxisBounds, BoxBounds, MeshExtent};

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn from_parts(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }

    /// Linear interpolation of position and normal
    fn lerp(&self, other: &Vertex, t: f32) -> Vertex {
        let position = self.position + (other.position - self.position) * t;
        let normal = self.normal.lerp(&other.normal, t);
        let normal = normal.try_normalize(1e-6).unwrap_or(self.normal);
        Vertex { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Face normal from the winding of the vertices. Zero for degenerate faces.
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2).try_normalize(1e-12).unwrap_or_else(Vector3::zeros)
    }
}

/// A 3D mesh composed of triangles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Axis-aligned bounds of every vertex, or `None` for an empty mesh
    pub fn bounds(&self) -> Option<BoxBounds> {
        let mut lo = [f64::INFINITY; 3];
        let mut hi = [f64::NEG_INFINITY; 3];
        for vertex in self.triangles.iter().flat_map(|t| t.vertices.iter()) {
            for i in 0..3 {
                let c = f64::from(vertex.position[i]);
                lo[i] = lo[i].min(c);
                hi[i] = hi[i].max(c);
            }
        }
        if self.triangles.is_empty() {
            return None;
        }
        Some(BoxBounds::new(
            AxisBounds::new(lo[0], hi[0]),
            AxisBounds::new(lo[1], hi[1]),
            AxisBounds::new(lo[2], hi[2]),
        ))
    }

    pub fn extent(&self) -> Option<MeshExtent> {
        self.bounds().map(MeshExtent::new)
    }

    /// Move every vertex by `offset`
    pub fn translate(&mut self, offset: Vector3<f32>) {
        for triangle in &mut self.triangles {
            for vertex in &mut triangle.vertices {
                vertex.position += offset;
            }
        }
    }

    /// Cut the mesh with an axis-aligned box.
    ///
    /// With `invert == false` the part inside the box is kept, otherwise the
    /// part outside. Triangles straddling a face are split along it.
    pub fn clip_to_box(&self, bounds: &BoxBounds, invert: bool) -> Mesh {
        let planes = box_planes(bounds);
        let mut result = Mesh::with_capacity(self.triangles.len());

        for triangle in &self.triangles {
            let mut remaining: Vec<Vertex> = triangle.vertices.to_vec();
            for plane in &planes {
                let (inside, outside) = split_polygon(&remaining, plane);
                if invert {
                    push_fan(&mut result, &outside);
                }
                remaining = inside;
                if remaining.len() < 3 {
                    break;
                }
            }
            if !invert {
                push_fan(&mut result, &remaining);
            }
        }

        result
    }

    /// Create a simple cube mesh centred on the origin
    pub fn cube(size: f32) -> Self {
        let half = size / 2.0;
        let mut mesh = Self::with_capacity(12);

        // (normal, two in-plane directions): each face is a quad split in two
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
            ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ];

        for (n, u, v) in faces {
            let n = Vector3::from(n);
            let u = Vector3::from(u);
            let v = Vector3::from(v);
            let corner = |su: f32, sv: f32| {
                let p = n * half + u * (su * half) + v * (sv * half);
                Vertex::from_parts(Point3::from(p), n)
            };
            let (a, b, c, d) = (
                corner(-1.0, -1.0),
                corner(1.0, -1.0),
                corner(1.0, 1.0),
                corner(-1.0, 1.0),
            );
            mesh.add_triangle(Triangle::new(a, b, c));
            mesh.add_triangle(Triangle::new(a, c, d));
        }

        mesh
    }
}

/// A half-space `sign * (p[axis] - offset) >= 0`
#[derive(Debug, Clone, Copy)]
struct Plane {
    axis: usize,
    offset: f32,
    sign: f32,
}

impl Plane {
    fn distance(&self, p: &Point3<f32>) -> f32 {
        self.sign * (p[self.axis] - self.offset)
    }
}

fn box_planes(bounds: &BoxBounds) -> [Plane; 6] {
    let lo = bounds.min_corner();
    let hi = bounds.max_corner();
    let mut planes = [Plane {
        axis: 0,
        offset: 0.0,
        sign: 1.0,
    }; 6];
    for axis in 0..3 {
        planes[axis * 2] = Plane {
            axis,
            offset: lo[axis] as f32,
            sign: 1.0,
        };
        planes[axis * 2 + 1] = Plane {
            axis,
            offset: hi[axis] as f32,
            sign: -1.0,
        };
    }
    planes
}

/// Split a convex polygon into the parts in front of and behind a plane.
/// Vertices on the plane belong to both parts.
fn split_polygon(polygon: &[Vertex], plane: &Plane) -> (Vec<Vertex>, Vec<Vertex>) {
    let mut inside = Vec::with_capacity(polygon.len() + 2);
    let mut outside = Vec::with_capacity(polygon.len() + 2);
    let n = polygon.len();

    for i in 0..n {
        let current = &polygon[i];
        let next = &polygon[(i + 1) % n];
        let dc = plane.distance(&current.position);
        let dn = plane.distance(&next.position);

        if dc >= 0.0 {
            inside.push(*current);
        }
        if dc <= 0.0 {
            outside.push(*current);
        }
        if (dc > 0.0 && dn < 0.0) || (dc < 0.0 && dn > 0.0) {
            let crossing = current.lerp(next, dc / (dc - dn));
            inside.push(crossing);
            outside.push(crossing);
        }
    }

    (inside, outside)
}

/// Triangulate a convex polygon as a fan around its first vertex
fn push_fan(mesh: &mut Mesh, polygon: &[Vertex]) {
    if polygon.len() < 3 {
        return;
    }
    for i in 1..polygon.len() - 1 {
        let triangle = Triangle::new(polygon[0], polygon[i], polygon[i + 1]);
        if triangle.calculate_normal() != Vector3::zeros() {
            mesh.add_triangle(triangle);
        }
    }
}
