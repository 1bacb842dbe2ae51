//! Clip controller behaviour against a recording scene.

mod common;

use approx::assert_relative_eq;
use clipview_core::{share, Axis, BoxBounds, ClipConfig, ClipController, Mesh, SampleMesh, SharedScene};
use common::{mesh_within, RecordingScene, RecordingWidget};

type Controller = ClipController<RecordingScene, RecordingWidget>;

fn controller(config: &ClipConfig) -> (Controller, SharedScene<RecordingScene>) {
    let scene = share(RecordingScene::default());
    let clip = ClipController::new(scene.clone(), RecordingWidget::default(), config);
    (clip, scene)
}

fn loaded(config: &ClipConfig) -> (Controller, SharedScene<RecordingScene>) {
    let (mut clip, scene) = controller(config);
    clip.load_mesh(SampleMesh::Cube.generate());
    (clip, scene)
}

#[test]
fn idle_operations_are_noops() {
    let (mut clip, scene) = controller(&ClipConfig::default());

    assert!(clip
        .on_bounds_changed(BoxBounds::from_array([1.0, 2.0, 1.0, 2.0, 1.0, 2.0]))
        .is_none());
    clip.recompute_clip();
    clip.on_drag_start();
    clip.on_drag_end();
    clip.reset_clip();
    clip.clear();

    let scene = scene.borrow();
    assert_eq!(scene.actor_count(), 0);
    assert_eq!(scene.clip_calls.get(), 0);
    assert_eq!(scene.reframes, 0);
    assert!(clip.widget().placements.is_empty());
    assert!(!clip.state().active);
    assert_eq!(clip.bounds(), BoxBounds::unit());
}

#[test]
fn loading_shows_the_full_mesh() {
    let (clip, scene) = loaded(&ClipConfig::default());

    let state = clip.state();
    assert!(state.active);
    assert!(!state.live_update);
    assert_relative_eq!(state.current_bounds.x.min, -0.1, epsilon = 1e-12);
    assert_relative_eq!(state.current_bounds.z.max, 10.1, epsilon = 1e-12);

    let scene = scene.borrow();
    assert_eq!(scene.actor_count(), 1);
    assert_eq!(scene.displayed().len(), 12);
    assert_eq!(scene.reframes, 1);
    assert_eq!(clip.widget().placements.last(), Some(&state.current_bounds));
}

#[test]
fn loading_an_empty_mesh_clears() {
    let (mut clip, scene) = loaded(&ClipConfig::default());
    clip.load_mesh(Mesh::new());

    assert!(!clip.is_active());
    assert_eq!(scene.borrow().actor_count(), 0);
    assert!(clip.extent().is_none());
}

#[test]
fn loading_replaces_the_previous_actor() {
    let (mut clip, scene) = loaded(&ClipConfig::default());
    clip.load_mesh(SampleMesh::Torus.generate());

    assert_eq!(scene.borrow().actor_count(), 1);
    assert_relative_eq!(clip.extent().unwrap().axis(Axis::X).max, 4.0, epsilon = 1e-5);
}

#[test]
fn drag_without_live_update_recomputes_once_at_the_end() {
    let (mut clip, scene) = loaded(&ClipConfig::default());

    clip.on_drag_start();
    assert!(clip.widget().opaque);
    assert!(clip.is_dragging());

    let mut last = BoxBounds::unit();
    for step in 0..5 {
        let lo = 1.0 + f64::from(step) * 0.5;
        last = BoxBounds::from_array([lo, 8.0, 0.0, 10.0, lo, 9.0]);
        clip.on_bounds_changed(last);
    }
    assert_eq!(scene.borrow().clip_calls.get(), 0);

    clip.on_drag_end();
    assert!(!clip.widget().opaque);
    assert!(!clip.is_dragging());

    let scene = scene.borrow();
    assert_eq!(scene.clip_calls.get(), 1);
    assert_eq!(scene.last_clip_bounds.get(), Some(last));
    assert_eq!(scene.actor_count(), 1);
    assert!(mesh_within(scene.displayed(), &last, 1e-4));
}

#[test]
fn live_update_recomputes_every_change() {
    let config = ClipConfig::default().with_live_update(true);
    let (mut clip, scene) = loaded(&config);

    clip.on_drag_start();
    for step in 0..5 {
        let hi = 9.0 - f64::from(step);
        clip.on_bounds_changed(BoxBounds::from_array([0.0, hi, 0.0, hi, 0.0, hi]));
    }
    assert_eq!(scene.borrow().clip_calls.get(), 5);

    clip.on_drag_end();
    assert_eq!(scene.borrow().clip_calls.get(), 6);
    assert_eq!(scene.borrow().actor_count(), 1);
}

#[test]
fn toggling_live_update_takes_effect_immediately() {
    let (mut clip, scene) = loaded(&ClipConfig::default());
    clip.set_live_update(true);
    clip.on_bounds_changed(BoxBounds::from_array([1.0, 9.0, 1.0, 9.0, 1.0, 9.0]));

    assert!(clip.state().live_update);
    assert_eq!(scene.borrow().clip_calls.get(), 1);
}

#[test]
fn bounds_are_clamped_before_use() {
    let (mut clip, _scene) = loaded(&ClipConfig::default());
    let applied = clip
        .on_bounds_changed(BoxBounds::from_array([-50.0, 50.0, 6.0, 2.0, 3.0, 4.0]))
        .unwrap();

    assert_relative_eq!(applied.x.min, -0.1, epsilon = 1e-12);
    assert_relative_eq!(applied.x.max, 10.1, epsilon = 1e-12);
    assert!(applied.y.max - applied.y.min >= 0.1 - 1e-9);
    assert_eq!(clip.widget().placements.last(), Some(&applied));
}

#[test]
fn recompute_never_moves_the_camera() {
    let (mut clip, scene) = loaded(&ClipConfig::default());
    let before = scene.borrow().reframes;

    clip.on_bounds_changed(BoxBounds::from_array([2.0, 8.0, 2.0, 8.0, 2.0, 8.0]));
    clip.recompute_clip();
    clip.on_drag_start();
    clip.on_drag_end();

    assert_eq!(scene.borrow().reframes, before);
}

#[test]
fn reset_restores_the_exact_extent() {
    let (mut clip, scene) = loaded(&ClipConfig::default());
    clip.on_drag_start();
    clip.on_bounds_changed(BoxBounds::from_array([3.0, 4.0, 3.0, 4.0, 3.0, 4.0]));
    clip.on_drag_end();
    clip.on_bounds_changed(BoxBounds::from_array([1.0, 2.0, 5.0, 6.0, 7.0, 8.0]));
    clip.recompute_clip();

    clip.reset_clip();

    let extent = clip.extent().copied().unwrap();
    assert_eq!(clip.state().current_bounds, extent.bounds());
    let scene = scene.borrow();
    assert_eq!(scene.actor_count(), 1);
    assert_eq!(scene.displayed().len(), 12);
    // Once on load, once on reset
    assert_eq!(scene.reframes, 2);
}

#[test]
fn clearing_returns_to_idle() {
    let (mut clip, scene) = loaded(&ClipConfig::default());
    clip.clear();

    assert!(!clip.is_active());
    assert!(clip.actor().is_none());
    assert_eq!(scene.borrow().actor_count(), 0);

    clip.on_drag_end();
    assert_eq!(scene.borrow().clip_calls.get(), 0);
}
