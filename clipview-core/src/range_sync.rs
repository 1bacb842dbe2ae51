/// Coarse range slider <-> fine min/max fields synchronisation
///
/// Each clip axis is edited through two numeric fields and a two-handle range
/// slider. The fields hold the canonical values; the slider is a rounded view
/// over `[floor, ceil]` in `steps` integer positions. Every write the
/// synchroniser makes is done with the target controls' signals blocked, so an
/// update of one representation never echoes back through the other.
use crate::bounds::AxisBounds;
use crate::config::ClipConfig;
use crate::control::Control;

const SEPARATION_TOLERANCE: f64 = 1e-9;

/// Positions of the two range slider handles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderValue {
    pub low: u32,
    pub high: u32,
}

impl SliderValue {
    pub fn new(low: u32, high: u32) -> Self {
        Self { low, high }
    }
}

/// Which field the user edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    Min,
    Max,
}

/// Keeps a range slider and a min/max field pair consistent for one axis
#[derive(Debug, Clone)]
pub struct RangeInputSync {
    floor: f64,
    ceil: f64,
    span: f64,
    steps: u32,
    separation: f64,
    min_field: Control<f64>,
    max_field: Control<f64>,
    slider: Control<SliderValue>,
    syncing: bool,
}

impl RangeInputSync {
    pub fn new(config: &ClipConfig) -> Self {
        let steps = config.slider_steps;
        let mut sync = Self {
            floor: 0.0,
            ceil: 10.0,
            span: 10.0,
            steps,
            separation: config.min_separation,
            min_field: Control::new(0.0),
            max_field: Control::new(10.0),
            slider: Control::new(SliderValue::new(0, steps)),
            syncing: false,
        };
        sync.update_range(0.0, 10.0);
        sync
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn ceil(&self) -> f64 {
        self.ceil
    }

    pub fn span(&self) -> f64 {
        self.span
    }

    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// The canonical (min, max) pair held by the fields
    pub fn value(&self) -> AxisBounds {
        AxisBounds::new(self.min_field.value(), self.max_field.value())
    }

    pub fn slider(&self) -> SliderValue {
        self.slider.value()
    }

    /// Range the min field accepts
    pub fn min_field_limits(&self) -> AxisBounds {
        AxisBounds::new(self.floor, self.ceil - self.separation)
    }

    /// Range the max field accepts
    pub fn max_field_limits(&self) -> AxisBounds {
        AxisBounds::new(self.floor + self.separation, self.ceil)
    }

    /// Change notifications emitted by the controls and not yet drained
    pub fn pending_notifications(&self) -> usize {
        self.min_field.pending_notifications()
            + self.max_field.pending_notifications()
            + self.slider.pending_notifications()
    }

    /// Map field values onto slider positions
    pub fn from_fields(&self, min: f64, max: f64) -> SliderValue {
        SliderValue::new(self.to_position(min), self.to_position(max))
    }

    fn to_position(&self, value: f64) -> u32 {
        let steps = f64::from(self.steps);
        let position = ((value - self.floor) / self.span * steps).round();
        position.clamp(0.0, steps) as u32
    }

    /// Map slider positions back to field values.
    ///
    /// The end positions snap to exactly `floor` and `ceil` so the extremes
    /// never drift.
    pub fn from_slider(&self, slider: SliderValue) -> (f64, f64) {
        let low = slider.low.min(self.steps);
        let high = slider.high.min(self.steps);
        let min = if low == 0 {
            self.floor
        } else {
            self.to_value(low)
        };
        let max = if high == self.steps {
            self.ceil
        } else {
            self.to_value(high)
        };
        (min, max)
    }

    fn to_value(&self, position: u32) -> f64 {
        f64::from(position) / f64::from(self.steps) * self.span + self.floor
    }

    /// Rescale to a new range and open both fields to it.
    pub fn update_range(&mut self, new_min: f64, new_max: f64) {
        if !new_min.is_finite() || !new_max.is_finite() {
            return;
        }
        let floor = new_min.min(new_max);
        let ceil = new_max.max(new_min).max(floor + self.separation);
        self.floor = floor;
        self.ceil = ceil;
        self.span = ceil - floor;
        self.reset_to_extremes();
    }

    /// Fields to `(floor, ceil)`, slider to its end positions.
    pub fn reset_to_extremes(&mut self) {
        let (floor, ceil, steps) = (self.floor, self.ceil, self.steps);
        self.sync(|s| {
            s.slider.set_value(SliderValue::new(0, steps));
            s.min_field.set_value(floor);
            s.max_field.set_value(ceil);
        });
    }

    /// Reflect bounds changed elsewhere (e.g. a dragged box) without
    /// notifying anyone.
    pub fn show_bounds(&mut self, bounds: AxisBounds) {
        let (min, max) = self.clamp_fields(bounds.min, bounds.max);
        let (min, max) = self.separate(min, max, FieldEdit::Min);
        self.sync(|s| s.write_fields(min, max));
    }

    /// The user typed a new min value.
    pub fn on_min_field_changed(&mut self, value: f64) -> Option<AxisBounds> {
        self.on_field_changed(FieldEdit::Min, value)
    }

    /// The user typed a new max value.
    pub fn on_max_field_changed(&mut self, value: f64) -> Option<AxisBounds> {
        self.on_field_changed(FieldEdit::Max, value)
    }

    fn on_field_changed(&mut self, edit: FieldEdit, value: f64) -> Option<AxisBounds> {
        if self.syncing || value.is_nan() {
            return None;
        }
        let before = self.value();
        let (min, max) = match edit {
            FieldEdit::Min => {
                let limits = self.min_field_limits();
                (value.clamp(limits.min, limits.max), before.max)
            }
            FieldEdit::Max => {
                let limits = self.max_field_limits();
                (before.min, value.clamp(limits.min, limits.max))
            }
        };
        let (min, max) = self.separate(min, max, edit);
        self.sync(|s| s.write_fields(min, max));
        self.changed_from(before)
    }

    /// The user moved the range slider.
    pub fn on_slider_changed(&mut self, low: u32, high: u32) -> Option<AxisBounds> {
        if self.syncing {
            return None;
        }
        let before = self.value();
        let previous = self.slider.value();
        let high = high.min(self.steps);
        let low = low.min(high);
        let slider = SliderValue::new(low, high);

        let (min, max) = self.from_slider(slider);
        let (min, max) = self.clamp_fields(min, max);
        let edit = if low != previous.low {
            FieldEdit::Min
        } else {
            FieldEdit::Max
        };
        let (min, max) = self.separate(min, max, edit);

        // The handles follow the fields when clamping or separation moved them
        self.sync(|s| s.write_fields(min, max));
        self.changed_from(before)
    }

    fn clamp_fields(&self, min: f64, max: f64) -> (f64, f64) {
        let min_limits = self.min_field_limits();
        let max_limits = self.max_field_limits();
        (
            min.clamp(min_limits.min, min_limits.max),
            max.clamp(max_limits.min, max_limits.max),
        )
    }

    fn changed_from(&self, before: AxisBounds) -> Option<AxisBounds> {
        let after = self.value();
        (after != before).then_some(after)
    }

    /// Push the field that was not edited so the pair keeps its minimum gap.
    fn separate(&self, mut min: f64, mut max: f64, edited: FieldEdit) -> (f64, f64) {
        if max - min >= self.separation - SEPARATION_TOLERANCE {
            return (min, max);
        }
        match edited {
            FieldEdit::Min => {
                max = min + self.separation;
                if max > self.ceil {
                    max = self.ceil;
                    min = self.ceil - self.separation;
                }
            }
            FieldEdit::Max => {
                min = max - self.separation;
                if min < self.floor {
                    min = self.floor;
                    max = self.floor + self.separation;
                }
            }
        }
        (min, max)
    }

    fn write_fields(&mut self, min: f64, max: f64) {
        self.min_field.set_value(min);
        self.max_field.set_value(max);
        let slider = self.from_fields(min, max);
        self.slider.set_value(slider);
    }

    /// Run one synchronisation pass with every control's signals blocked.
    /// Returns false, doing nothing, if a pass is already running.
    fn sync<F: FnOnce(&mut Self)>(&mut self, pass: F) -> bool {
        if self.syncing {
            return false;
        }
        self.syncing = true;
        self.set_blocked(true);
        pass(self);
        self.set_blocked(false);
        self.syncing = false;
        true
    }

    fn set_blocked(&mut self, block: bool) {
        self.min_field.block_signals(block);
        self.max_field.block_signals(block);
        self.slider.block_signals(block);
    }
}
