/// Terminal front-end for the clip viewer
use crossterm::{
    cursor,
    event::{self, Event},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use clipview_core::{
    share, Axis, BoxBounds, ClipConfig, ClipPanel, DisplayOptions, RotationState, SampleMesh,
    ScaleConfig, ScaleController, Scene, SharedScene, Transform,
};

pub mod input;
pub mod renderer;
pub mod scene;
pub mod widget;

pub use input::{map_key, Command};
pub use renderer::{AsciiRenderer, Stroke};
pub use scene::TerminalScene;
pub use widget::BoxOutline;

/// Field change per nudge key press, in mesh units
const FIELD_STEP: f64 = 0.1;

/// Share of the axis range a grabbed box moves per key press
const BOX_STEP_FRACTION: f64 = 0.02;

const GRID_DIVISIONS: usize = 10;

/// Rows reserved at the top for the status line
const STATUS_ROWS: u16 = 1;

/// Start-up options for the viewer
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub clip: ClipConfig,
    pub scale: ScaleConfig,
    pub initial_mesh: Option<SampleMesh>,
}

/// Main application struct for terminal clip viewing
pub struct TerminalApp {
    scene: SharedScene<TerminalScene>,
    panel: ClipPanel<TerminalScene, BoxOutline>,
    scale: ScaleController<TerminalScene>,
    display: DisplayOptions<TerminalScene>,
    renderer: AsciiRenderer,
    rotation: RotationState,
    axis: Axis,
    mesh: Option<SampleMesh>,
    grabbed: bool,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Build the viewer for a `width` x `height` cell terminal.
    pub fn new(options: AppOptions, width: u16, height: u16) -> clipview_core::Result<Self> {
        options.clip.validate()?;
        options.scale.validate()?;

        let view_height = height.saturating_sub(STATUS_ROWS).max(1);
        let scene = share(TerminalScene::new(u32::from(width), u32::from(view_height)));
        let panel = ClipPanel::new(scene.clone(), BoxOutline::new(), &options.clip);
        let scale = ScaleController::new(scene.clone(), options.scale);
        let display = DisplayOptions::new(scene.clone());

        let mut app = Self {
            scene,
            panel,
            scale,
            display,
            renderer: AsciiRenderer::new(usize::from(width), usize::from(view_height)),
            rotation: RotationState::new(0.4, -0.6, 0.0),
            axis: Axis::X,
            mesh: None,
            grabbed: false,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        };
        if let Some(sample) = options.initial_mesh {
            app.apply(Command::SelectMesh(sample));
        }
        Ok(app)
    }

    pub fn scene(&self) -> &SharedScene<TerminalScene> {
        &self.scene
    }

    pub fn panel(&self) -> &ClipPanel<TerminalScene, BoxOutline> {
        &self.panel
    }

    pub fn scale(&self) -> &ScaleController<TerminalScene> {
        &self.scale
    }

    pub fn display(&self) -> &DisplayOptions<TerminalScene> {
        &self.display
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn mesh(&self) -> Option<SampleMesh> {
        self.mesh
    }

    pub fn is_grabbed(&self) -> bool {
        self.grabbed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Carry out one user command
    pub fn apply(&mut self, command: Command) {
        debug!(?command, "Command");
        match command {
            Command::SelectMesh(sample) => self.select_mesh(Some(sample)),
            Command::ClearMesh => self.select_mesh(None),
            Command::SelectAxis(axis) => self.axis = axis,
            Command::MoveLowHandle(delta) => self.step_handle(delta, 0),
            Command::MoveHighHandle(delta) => self.step_handle(0, delta),
            Command::NudgeMin(delta) => {
                let value = self.panel.axis(self.axis).value().min + f64::from(delta) * FIELD_STEP;
                self.panel.edit_min(self.axis, value);
            }
            Command::NudgeMax(delta) => {
                let value = self.panel.axis(self.axis).value().max + f64::from(delta) * FIELD_STEP;
                self.panel.edit_max(self.axis, value);
            }
            Command::ToggleGrab => self.toggle_grab(),
            Command::MoveBox(delta) => self.move_box(delta),
            Command::ResetClip => self.panel.reset(),
            Command::ToggleLiveUpdate => {
                let live = !self.panel.controller().live_update();
                self.panel.set_live_update(live);
                info!(live, "Live update toggled");
            }
            Command::ToggleGrid => self.display.toggle_grid(),
            Command::ToggleBoundingBox => self.display.toggle_bounds(),
            Command::Scale(delta) => {
                let position = self.scale.slider(self.axis) as i64 + i64::from(delta);
                self.scale
                    .on_slider_changed(self.axis, position.max(0) as u32);
            }
            Command::ResetScale => self.scale.reset_all(),
            Command::Rotate { pitch, yaw } => self.rotation.rotate(pitch, yaw, 0.0),
            Command::Quit => self.running = false,
        }
    }

    fn select_mesh(&mut self, sample: Option<SampleMesh>) {
        if self.grabbed {
            self.toggle_grab();
        }
        self.mesh = sample;
        self.panel.load_mesh(sample.map(SampleMesh::generate));
        self.display.set_enabled(self.panel.is_enabled());
        if let Some(sample) = sample {
            info!(mesh = %sample, "Sample selected");
        }
    }

    /// Keyboard slider steps act like a short press and release
    fn step_handle(&mut self, low_delta: i32, high_delta: i32) {
        if !self.panel.is_enabled() {
            return;
        }
        let sync = self.panel.axis(self.axis);
        let steps = i64::from(sync.steps());
        let slider = sync.slider();
        let low = (i64::from(slider.low) + i64::from(low_delta)).clamp(0, steps) as u32;
        let high = (i64::from(slider.high) + i64::from(high_delta)).clamp(0, steps) as u32;

        self.panel.begin_drag();
        self.panel.slide(self.axis, low, high);
        self.panel.end_drag();
    }

    fn toggle_grab(&mut self) {
        if self.grabbed {
            self.grabbed = false;
            self.panel.end_drag();
        } else if self.panel.is_enabled() {
            self.grabbed = true;
            self.panel.begin_drag();
        }
    }

    /// Slide the grabbed box along the active axis, keeping its size
    fn move_box(&mut self, delta: i32) {
        if !self.grabbed {
            return;
        }
        let controller = self.panel.controller();
        let limits = controller.tracker().limits(self.axis);
        let mut bounds: BoxBounds = controller.bounds();
        let current = bounds.axis(self.axis);

        let offset = f64::from(delta) * limits.span() * BOX_STEP_FRACTION;
        let offset = offset.max(limits.min - current.min).min(limits.max - current.max);
        let moved = bounds.axis_mut(self.axis);
        moved.min += offset;
        moved.max += offset;

        self.panel.drag_box(bounds);
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            while event::poll(Duration::from_millis(0))? {
                self.handle_event(event::read()?);
            }

            if self.scene.borrow_mut().take_redraw() {
                self.render()?;
            }

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                if let Some(command) = map_key(key) {
                    self.apply(command);
                }
                // The status line changes with every key
                self.scene.borrow_mut().request_redraw();
            }
            Event::Resize(width, height) => {
                let view_height = height.saturating_sub(STATUS_ROWS).max(1);
                self.renderer
                    .resize(usize::from(width), usize::from(view_height));
                self.scene
                    .borrow_mut()
                    .resize(u32::from(width), u32::from(view_height));
            }
            _ => {}
        }
    }

    /// Draw the scene into the off-screen character buffer
    pub fn rasterize(&mut self) {
        let scene = self.scene.borrow();
        let camera = scene.camera();
        let model = Transform::model_matrix(&self.rotation, scene.scale(), &camera.target);

        self.renderer.clear();
        for mesh in scene.actors() {
            self.renderer.render_mesh(mesh, &model, camera);
        }

        if let Some(bounds) = scene.scene_bounds() {
            if scene.grid_visible() {
                self.renderer
                    .draw_grid(&bounds, GRID_DIVISIONS, &model, camera);
            }
            if scene.bounds_visible() {
                self.renderer
                    .draw_box(&bounds, &model, camera, Stroke::BOUNDING_BOX);
            }
        }

        if self.panel.is_enabled() {
            let outline = self.panel.controller().widget();
            if let Some(bounds) = outline.bounds() {
                let stroke = if outline.is_highlighted() {
                    Stroke::OUTLINE_ACTIVE
                } else {
                    Stroke::OUTLINE
                };
                self.renderer.draw_box(&bounds, &model, camera, stroke);
            }
        }
    }

    pub fn renderer(&self) -> &AsciiRenderer {
        &self.renderer
    }

    /// One line describing the viewer state
    pub fn status_line(&self) -> String {
        let mesh = self.mesh.map_or("none", SampleMesh::name);
        if !self.panel.is_enabled() {
            return format!("clipview | mesh: {mesh} | 1-4 load a mesh, q quits");
        }
        let sync = self.panel.axis(self.axis);
        let value = sync.value();
        let slider = sync.slider();
        let [sx, sy, sz] = self.scale.factors();
        format!(
            "clipview | {mesh} | axis {axis}: [{min:.2}, {max:.2}] slider {lo}..{hi} | live {live} | grab {grab} | scale {sx:.1} {sy:.1} {sz:.1} | {fps:.0} fps",
            axis = self.axis,
            min = value.min,
            max = value.max,
            lo = slider.low,
            hi = slider.high,
            live = on_off(self.panel.controller().live_update()),
            grab = on_off(self.grabbed),
            fps = self.fps,
        )
    }

    fn render(&mut self) -> io::Result<()> {
        self.rasterize();

        let mut stdout = stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Yellow),
            Print(self.status_line()),
            ResetColor,
            cursor::MoveTo(0, STATUS_ROWS)
        )?;
        self.renderer.draw(&mut stdout)?;

        stdout.flush()?;
        Ok(())
    }
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}
