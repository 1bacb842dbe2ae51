//! Panel flows: typed fields, slider drags and box drags.

mod common;

use approx::assert_relative_eq;
use clipview_core::{
    share, Axis, BoxBounds, ClipConfig, ClipPanel, SampleMesh, ScaleConfig, ScaleController,
    SharedScene,
};
use common::{mesh_within, RecordingScene, RecordingWidget};

type Panel = ClipPanel<RecordingScene, RecordingWidget>;

fn panel(config: &ClipConfig) -> (Panel, SharedScene<RecordingScene>) {
    let scene = share(RecordingScene::default());
    let mut panel = ClipPanel::new(scene.clone(), RecordingWidget::default(), config);
    panel.load_mesh(Some(SampleMesh::Cube.generate()));
    (panel, scene)
}

#[test]
fn ranges_follow_the_padded_extent() {
    let (panel, _scene) = panel(&ClipConfig::default());

    for axis in Axis::ALL {
        let sync = panel.axis(axis);
        assert_relative_eq!(sync.floor(), -0.1, epsilon = 1e-12);
        assert_relative_eq!(sync.ceil(), 10.1, epsilon = 1e-12);
        assert_eq!(sync.slider().low, 0);
        assert_eq!(sync.slider().high, sync.steps());
    }
    assert!(panel.is_enabled());
}

#[test]
fn typed_fields_clamp_to_the_range() {
    let (mut panel, scene) = panel(&ClipConfig::default());

    let applied = panel.edit_min(Axis::X, 3.0).unwrap();
    assert_relative_eq!(applied.x.min, 3.0);
    assert_eq!(scene.borrow().clip_calls.get(), 1);

    // Already at the ceiling after clamping, so nothing changes
    assert!(panel.edit_max(Axis::X, 12.0).is_none());

    let x = panel.axis(Axis::X).value();
    assert_relative_eq!(x.min, 3.0);
    assert_relative_eq!(x.max, 10.1, epsilon = 1e-12);
    assert_eq!(scene.borrow().clip_calls.get(), 1);
    assert!(mesh_within(
        scene.borrow().displayed(),
        &panel.controller().bounds(),
        1e-4
    ));
}

#[test]
fn crossing_fields_push_the_other_one() {
    let (mut panel, _scene) = panel(&ClipConfig::default());
    panel.edit_max(Axis::Y, 4.0);
    panel.edit_min(Axis::Y, 6.0);

    let y = panel.axis(Axis::Y).value();
    assert_relative_eq!(y.min, 6.0);
    assert_relative_eq!(y.max, 6.1, epsilon = 1e-9);
    assert_eq!(panel.controller().bounds().y, y);
}

#[test]
fn field_edit_with_live_update_clips_once() {
    let config = ClipConfig::default().with_live_update(true);
    let (mut panel, scene) = panel(&config);
    panel.edit_min(Axis::Z, 2.0);

    assert_eq!(scene.borrow().clip_calls.get(), 1);
}

#[test]
fn slider_drag_clips_on_release() {
    let (mut panel, scene) = panel(&ClipConfig::default());

    panel.begin_drag();
    for low in [10, 20, 30, 40] {
        panel.slide(Axis::X, low, 100);
    }
    assert_eq!(scene.borrow().clip_calls.get(), 0);
    panel.end_drag();

    let bounds = panel.controller().bounds();
    assert_relative_eq!(bounds.x.min, 0.4 * 10.2 - 0.1, epsilon = 1e-9);
    assert_relative_eq!(bounds.x.max, 10.1, epsilon = 1e-12);

    let scene = scene.borrow();
    assert_eq!(scene.clip_calls.get(), 1);
    assert_eq!(scene.last_clip_bounds.get(), Some(bounds));
    assert!(mesh_within(scene.displayed(), &bounds, 1e-4));
}

#[test]
fn dragging_the_box_updates_the_controls_silently() {
    let (mut panel, scene) = panel(&ClipConfig::default());
    let target = BoxBounds::from_array([1.0, 9.0, 2.0, 8.0, 3.0, 7.0]);

    panel.begin_drag();
    panel.drag_box(target);
    panel.end_drag();

    assert_eq!(panel.field_bounds(), target);
    for axis in Axis::ALL {
        assert_eq!(panel.axis(axis).pending_notifications(), 0);
    }
    let y = panel.axis(Axis::Y).slider();
    assert_eq!(y.low, 21);
    assert_eq!(y.high, 79);
    assert_eq!(scene.borrow().clip_calls.get(), 1);
}

#[test]
fn reset_opens_every_axis() {
    let (mut panel, scene) = panel(&ClipConfig::default());
    panel.edit_min(Axis::X, 4.0);
    panel.edit_max(Axis::Z, 5.0);

    panel.reset();

    for axis in Axis::ALL {
        let sync = panel.axis(axis);
        assert_eq!(sync.value().min, sync.floor());
        assert_eq!(sync.value().max, sync.ceil());
    }
    let extent = panel.controller().extent().copied().unwrap();
    assert_eq!(panel.controller().bounds(), extent.bounds());
    assert_eq!(scene.borrow().displayed().len(), 12);
}

#[test]
fn idle_panel_ignores_input() {
    let scene = share(RecordingScene::default());
    let mut panel = ClipPanel::new(scene.clone(), RecordingWidget::default(), &ClipConfig::default());

    assert!(!panel.is_enabled());
    assert!(panel.edit_min(Axis::X, 2.0).is_none());
    assert!(panel.slide(Axis::Y, 10, 50).is_none());
    panel.reset();

    panel.load_mesh(Some(SampleMesh::Cube.generate()));
    panel.load_mesh(None);
    assert!(!panel.is_enabled());
    assert!(panel.edit_max(Axis::Z, 2.0).is_none());
    assert_eq!(scene.borrow().clip_calls.get(), 0);
    assert_eq!(scene.borrow().actor_count(), 0);
}

#[test]
fn scale_only_touches_the_scene_transform() {
    let scene = share(RecordingScene::default());
    let mut panel = ClipPanel::new(scene.clone(), RecordingWidget::default(), &ClipConfig::default());
    panel.load_mesh(Some(SampleMesh::Cube.generate()));
    let mut scale = ScaleController::new(scene.clone(), ScaleConfig::default());

    let before = panel.controller().bounds();
    scale.set_factor(Axis::X, 2.0);
    scale.set_factor(Axis::Y, 3.0);

    assert_eq!(scene.borrow().scales.last(), Some(&[2.0, 3.0, 1.0]));
    assert_eq!(scene.borrow().reframes, 1);
    assert_eq!(panel.controller().bounds(), before);

    scale.reset(Axis::X);
    assert_eq!(scene.borrow().scales.last(), Some(&[1.0, 3.0, 1.0]));
    assert_eq!(scene.borrow().reframes, 2);
}
