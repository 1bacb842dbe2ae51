/// ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Point3, Vector3};
use std::io::Write;
use clipview_core::{BoxBounds, Camera, Mesh, Triangle};

use crate::widget::box_edges;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Lines within this NDC depth of a surface still show through it
const LINE_DEPTH_BIAS: f32 = 2e-3;

/// World-space pieces a line is cut into when an end leaves the view
const LINE_PIECES: usize = 16;

/// How an overlay line is drawn
#[derive(Debug, Clone, Copy)]
pub struct Stroke {
    pub glyph: char,
    pub color: Color,
    /// Hidden by nearer surfaces when set
    pub depth_test: bool,
}

impl Stroke {
    pub const OUTLINE: Stroke = Stroke {
        glyph: 'o',
        color: Color::Yellow,
        depth_test: false,
    };
    pub const OUTLINE_ACTIVE: Stroke = Stroke {
        glyph: 'O',
        color: Color::Magenta,
        depth_test: false,
    };
    pub const BOUNDING_BOX: Stroke = Stroke {
        glyph: '~',
        color: Color::Green,
        depth_test: true,
    };
    pub const GRID: Stroke = Stroke {
        glyph: '\'',
        color: Color::DarkBlue,
        depth_test: true,
    };
}

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
    color_buffer: Vec<Color>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
            color_buffer: vec![Color::White; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        *self = Self::new(width, height);
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
        self.color_buffer.fill(Color::White);
    }

    pub fn char_at(&self, x: usize, y: usize) -> Option<char> {
        (x < self.width && y < self.height).then(|| self.char_buffer[y * self.width + x])
    }

    /// Number of cells holding anything other than a blank
    pub fn coverage(&self) -> usize {
        self.char_buffer.iter().filter(|&&c| c != ' ').count()
    }

    pub fn render_mesh(&mut self, mesh: &Mesh, model_matrix: &Matrix4<f32>, camera: &Camera) {
        for triangle in &mesh.triangles {
            self.render_triangle(triangle, model_matrix, camera);
        }
    }

    fn render_triangle(&mut self, triangle: &Triangle, model_matrix: &Matrix4<f32>, camera: &Camera) {
        let mut screen_coords = [(0.0, 0.0, 0.0); 3];
        for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
            match camera.project_to_screen(
                &vertex.position,
                model_matrix,
                self.width as u32,
                self.height as u32,
            ) {
                Some(projected) => *slot = projected,
                None => return,
            }
        }

        // Shade in world space so rotation and scale both count
        let world: Vec<Point3<f32>> = triangle
            .vertices
            .iter()
            .map(|v| model_matrix.transform_point(&v.position))
            .collect();
        let normal = (world[1] - world[0])
            .cross(&(world[2] - world[0]))
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros);
        let light_dir = (camera.position - camera.target)
            .try_normalize(1e-6)
            .unwrap_or_else(Vector3::z);
        // Two-sided: clipped meshes expose their inner faces
        let brightness = normal.dot(&light_dir).abs();

        let char_index = 1 + (brightness * (LUMINOSITY_RAMP.len() - 2) as f32) as usize;
        let char_index = char_index.min(LUMINOSITY_RAMP.len() - 1);
        let character = LUMINOSITY_RAMP[char_index];

        self.rasterize_triangle(&screen_coords, character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char) {
        let (v0, v1, v2) = (coords[0], coords[1], coords[2]);

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) =
                    barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
                {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let idx = y as usize * self.width + x as usize;
                        if depth < self.depth_buffer[idx] {
                            self.depth_buffer[idx] = depth;
                            self.char_buffer[idx] = character;
                            self.color_buffer[idx] = shade_color(character);
                        }
                    }
                }
            }
        }
    }

    /// Draw a straight world-space segment
    pub fn draw_line(
        &mut self,
        from: [f64; 3],
        to: [f64; 3],
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        stroke: Stroke,
    ) {
        let a = to_point(from);
        let b = to_point(to);
        let (w, h) = (self.width as u32, self.height as u32);

        if let (Some(pa), Some(pb)) = (
            camera.project_to_screen(&a, model_matrix, w, h),
            camera.project_to_screen(&b, model_matrix, w, h),
        ) {
            self.plot_segment(pa, pb, stroke);
            return;
        }

        // Partly out of view: draw the pieces that project
        let step = (b - a) / LINE_PIECES as f32;
        for i in 0..LINE_PIECES {
            let p0 = a + step * i as f32;
            let p1 = p0 + step;
            if let (Some(s0), Some(s1)) = (
                camera.project_to_screen(&p0, model_matrix, w, h),
                camera.project_to_screen(&p1, model_matrix, w, h),
            ) {
                self.plot_segment(s0, s1, stroke);
            }
        }
    }

    fn plot_segment(&mut self, a: (f32, f32, f32), b: (f32, f32, f32), stroke: Stroke) {
        let steps = (b.0 - a.0).abs().max((b.1 - a.1).abs()).ceil().max(1.0) as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = a.0 + (b.0 - a.0) * t;
            let y = a.1 + (b.1 - a.1) * t;
            let depth = a.2 + (b.2 - a.2) * t;
            if x < 0.0 || y < 0.0 {
                continue;
            }
            let (x, y) = (x as usize, y as usize);
            if x >= self.width || y >= self.height {
                continue;
            }
            let idx = y * self.width + x;
            if stroke.depth_test && depth > self.depth_buffer[idx] + LINE_DEPTH_BIAS {
                continue;
            }
            self.depth_buffer[idx] = self.depth_buffer[idx].min(depth);
            self.char_buffer[idx] = stroke.glyph;
            self.color_buffer[idx] = stroke.color;
        }
    }

    /// Wireframe of an axis-aligned box
    pub fn draw_box(
        &mut self,
        bounds: &BoxBounds,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
        stroke: Stroke,
    ) {
        for (a, b) in box_edges(bounds) {
            self.draw_line(a, b, model_matrix, camera, stroke);
        }
    }

    /// Grid on the floor (lowest y) of `bounds`, `divisions` cells a side
    pub fn draw_grid(
        &mut self,
        bounds: &BoxBounds,
        divisions: usize,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) {
        let divisions = divisions.max(1);
        let y = bounds.y.min;
        for i in 0..=divisions {
            let t = i as f64 / divisions as f64;
            let x = bounds.x.min + bounds.x.span() * t;
            let z = bounds.z.min + bounds.z.span() * t;
            self.draw_line(
                [x, y, bounds.z.min],
                [x, y, bounds.z.max],
                model_matrix,
                camera,
                Stroke::GRID,
            );
            self.draw_line(
                [bounds.x.min, y, z],
                [bounds.x.max, y, z],
                model_matrix,
                camera,
                Stroke::GRID,
            );
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                writer.queue(SetForegroundColor(self.color_buffer[idx]))?;
                writer.queue(Print(self.char_buffer[idx]))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

fn to_point(p: [f64; 3]) -> Point3<f32> {
    Point3::new(p[0] as f32, p[1] as f32, p[2] as f32)
}

/// Color based on character intensity
fn shade_color(c: char) -> Color {
    match c {
        ' ' | '.' | ':' => Color::DarkGrey,
        '-' | '=' => Color::Grey,
        '+' | '*' => Color::White,
        '#' | '%' | '@' => Color::Cyan,
        _ => Color::White,
    }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
