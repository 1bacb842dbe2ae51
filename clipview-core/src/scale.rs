/// Per-axis visual scaling
///
/// Each axis has a factor edited through a spin field and a slider
/// (`slider = factor * slider_per_unit`). Axes are independent; every change
/// pushes the full `(x, y, z)` scale to the scene.
use tracing::debug;

use crate::bounds::Axis;
use crate::config::ScaleConfig;
use crate::control::Control;
use crate::scene::{Scene, SharedScene};

pub struct ScaleController<S: Scene> {
    scene: SharedScene<S>,
    config: ScaleConfig,
    factors: [f64; 3],
    spins: [Control<f64>; 3],
    sliders: [Control<u32>; 3],
    syncing: bool,
}

impl<S: Scene> ScaleController<S> {
    pub fn new(scene: SharedScene<S>, config: ScaleConfig) -> Self {
        let default = config.default;
        let position = (default * config.slider_per_unit).round() as u32;
        Self {
            scene,
            factors: [default; 3],
            spins: std::array::from_fn(|_| Control::new(default)),
            sliders: std::array::from_fn(|_| Control::new(position)),
            config,
            syncing: false,
        }
    }

    pub fn factor(&self, axis: Axis) -> f64 {
        self.factors[axis.index()]
    }

    pub fn factors(&self) -> [f64; 3] {
        self.factors
    }

    pub fn spin(&self, axis: Axis) -> f64 {
        self.spins[axis.index()].value()
    }

    pub fn slider(&self, axis: Axis) -> u32 {
        self.sliders[axis.index()].value()
    }

    /// Slider positions matching the factor range, inclusive
    pub fn slider_range(&self) -> (u32, u32) {
        (
            self.to_position(self.config.min),
            self.to_position(self.config.max),
        )
    }

    pub fn pending_notifications(&self) -> usize {
        self.spins
            .iter()
            .map(Control::pending_notifications)
            .chain(self.sliders.iter().map(Control::pending_notifications))
            .sum()
    }

    fn to_position(&self, factor: f64) -> u32 {
        (factor * self.config.slider_per_unit).round().max(0.0) as u32
    }

    /// Set one axis factor, clamped to the allowed range, and redraw.
    /// The camera is not refit.
    pub fn set_factor(&mut self, axis: Axis, value: f64) {
        self.store(axis, value);
        let mut scene = self.scene.borrow_mut();
        scene.set_nonuniform_scale(self.factors);
        scene.request_redraw();
    }

    /// Restore one axis to the default factor and refit the camera.
    pub fn reset(&mut self, axis: Axis) {
        self.store(axis, self.config.default);
        let mut scene = self.scene.borrow_mut();
        scene.set_nonuniform_scale(self.factors);
        scene.reframe_camera();
    }

    /// Restore every axis, pushing the scale and refitting the camera once.
    pub fn reset_all(&mut self) {
        for axis in Axis::ALL {
            self.store(axis, self.config.default);
        }
        let mut scene = self.scene.borrow_mut();
        scene.set_nonuniform_scale(self.factors);
        scene.reframe_camera();
    }

    /// The user edited the spin field of an axis.
    pub fn on_spin_changed(&mut self, axis: Axis, value: f64) {
        if self.syncing {
            return;
        }
        self.set_factor(axis, value);
    }

    /// The user moved the slider of an axis.
    pub fn on_slider_changed(&mut self, axis: Axis, position: u32) {
        if self.syncing {
            return;
        }
        let (lo, hi) = self.slider_range();
        let position = position.clamp(lo, hi);
        self.set_factor(axis, f64::from(position) / self.config.slider_per_unit);
    }

    fn store(&mut self, axis: Axis, value: f64) {
        let factor = self.config.clamp(value);
        let position = self.to_position(factor);
        let i = axis.index();
        self.factors[i] = factor;

        self.syncing = true;
        self.spins[i].block_signals(true);
        self.sliders[i].block_signals(true);
        self.spins[i].set_value(factor);
        self.sliders[i].set_value(position);
        self.spins[i].block_signals(false);
        self.sliders[i].block_signals(false);
        self.syncing = false;

        debug!(axis = %axis, factor, "Scale factor updated");
    }
}
