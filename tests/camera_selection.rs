//! Integration tests for camera transitions driven by selection.

mod common;

use bevy::math::DVec3;
use orrery::camera::{
    CameraDirector, CameraPose, DistanceHint, FOLLOW_SMOOTHING, OVERVIEW_POSITION,
};
use orrery::selection::Selection;
use orrery::types::{BodyKey, CameraMode, SelectableCategory, SimulationSettings};

use common::{TICK, assert_close, seeded_orrery, settle_camera};

#[test]
fn test_busy_transition_rejects_second_move() {
    let mut camera = CameraDirector::new(CameraPose::OVERVIEW);
    let a = DVec3::new(25.0, 0.0, 0.0);
    let b = DVec3::new(-80.0, 0.0, 10.0);

    let first = camera.move_to(a, a, DistanceHint::Star);
    assert!(first.is_some());
    camera.step(0.1);
    assert!(camera.move_to(b, b, DistanceHint::Star).is_none());

    let mut completed = None;
    for _ in 0..19 {
        completed = completed.or(camera.step(0.1));
    }
    assert_eq!(completed, first);
    assert_close(camera.pose().position, a + DVec3::new(20.0, 15.0, 20.0), 1e-9);
    assert_close(camera.pose().look_at, a, 1e-9);
}

#[test]
fn test_reference_selection_twice_moves_once() {
    let mut orrery = seeded_orrery();
    let settings = SimulationSettings::default();

    assert!(orrery.select_by_reference(SelectableCategory::Planet, "earth"));
    orrery.tick(TICK, &settings);
    assert!(orrery.camera.is_transitioning());
    let first = orrery.camera.transition().map(|t| t.id);
    settle_camera(&mut orrery, &settings);

    assert!(!orrery.select_by_reference(SelectableCategory::Planet, "earth"));
    orrery.tick(TICK, &settings);
    assert!(!orrery.camera.is_transitioning());
    assert!(first.is_some());
}

#[test]
fn test_list_reselect_after_other_category() {
    let mut orrery = seeded_orrery();
    let settings = SimulationSettings::default();

    orrery.select_by_reference(SelectableCategory::Planet, "earth");
    orrery.tick(TICK, &settings);
    settle_camera(&mut orrery, &settings);
    orrery.select_by_reference(SelectableCategory::Moon, "io");
    orrery.tick(TICK, &settings);
    settle_camera(&mut orrery, &settings);

    orrery.select_by_reference(SelectableCategory::Planet, "earth");
    orrery.tick(TICK, &settings);
    assert_eq!(orrery.selection.selection(), &Selection::Planet("earth".into()));
    assert_eq!(
        orrery.selected_body().map(|body| body.key.clone()),
        Some(BodyKey::planet("earth"))
    );
}

#[test]
fn test_list_reselect_after_clicks() {
    let mut orrery = seeded_orrery();
    let mut settings = SimulationSettings::default();
    settings.paused = true;

    let earth = BodyKey::planet("earth");
    let earth_pos = orrery.position(&earth).unwrap();
    orrery.select_by_click(&earth, earth_pos).unwrap();
    settle_camera(&mut orrery, &settings);
    let iss = BodyKey::satellite("iss");
    let iss_pos = orrery.position(&iss).unwrap();
    orrery.select_by_click(&iss, iss_pos).unwrap();
    settle_camera(&mut orrery, &settings);

    orrery.select_by_reference(SelectableCategory::Planet, "earth");
    settings.camera_mode = CameraMode::Follow;
    let look_at = orrery.camera.pose().look_at;
    orrery.tick(TICK, &settings);

    assert_eq!(orrery.selection.selection(), &Selection::Planet("earth".into()));
    // Follow now tracks earth, not the spacecraft
    assert_close(
        orrery.camera.pose().look_at,
        look_at + (earth_pos - look_at) * FOLLOW_SMOOTHING,
        1e-9,
    );
}

#[test]
fn test_click_leaves_other_categories_empty() {
    let mut orrery = seeded_orrery();
    let iss = BodyKey::satellite("iss");
    let position = orrery.position(&iss).unwrap();
    orrery.select_by_click(&iss, position).unwrap();

    let selection = orrery.selection.selection();
    assert_eq!(selection, &Selection::Satellite("iss".into()));
    assert_eq!(selection.get(SelectableCategory::Planet), None);
    assert_eq!(selection.get(SelectableCategory::Moon), None);
}

#[test]
fn test_click_beats_same_tick_reference() {
    let mut orrery = seeded_orrery();
    let settings = SimulationSettings::default();
    let moon = BodyKey::moon("europa");
    let position = orrery.position(&moon).unwrap();

    orrery.select_by_reference(SelectableCategory::Planet, "saturn");
    orrery.select_by_click(&moon, position).unwrap();
    settle_camera(&mut orrery, &settings);

    assert_eq!(orrery.selection.selection(), &Selection::Moon("europa".into()));
    assert_close(orrery.camera.pose().look_at, position, 1e-9);
}

#[test]
fn test_reset_returns_to_overview_and_clears() {
    let mut orrery = seeded_orrery();
    let settings = SimulationSettings::default();
    orrery.select_by_reference(SelectableCategory::Moon, "titan");
    orrery.tick(TICK, &settings);
    settle_camera(&mut orrery, &settings);

    assert!(orrery.recenter().is_some());
    assert!(orrery.selection.selection().is_none());
    settle_camera(&mut orrery, &settings);
    assert_eq!(orrery.camera.pose().position, OVERVIEW_POSITION);
    assert_eq!(orrery.camera.pose().look_at, DVec3::ZERO);
}

#[test]
fn test_follow_pulls_look_at_five_percent() {
    let mut orrery = seeded_orrery();
    let mut settings = SimulationSettings::default();
    settings.paused = true;

    let mars = BodyKey::planet("mars");
    let position = orrery.position(&mars).unwrap();
    orrery.select_by_click(&mars, position).unwrap();

    // Follow is suspended while the transition runs
    settings.camera_mode = CameraMode::Follow;
    orrery.tick(TICK, &settings);
    assert!(orrery.camera.is_transitioning());
    assert!(!orrery.camera.follow(Some(DVec3::ZERO)));
    settle_camera(&mut orrery, &settings);
    assert_close(orrery.camera.pose().look_at, position, 1e-9);

    // Unpaused, mars moves and the look-at trails it by one smoothing step
    settings.paused = false;
    let look_at = orrery.camera.pose().look_at;
    let camera_position = orrery.camera.pose().position;
    orrery.tick(TICK, &settings);
    let moved = orrery.position(&mars).unwrap();
    assert_ne!(moved, position);
    assert_close(
        orrery.camera.pose().look_at,
        look_at + (moved - look_at) * FOLLOW_SMOOTHING,
        1e-9,
    );
    assert_eq!(orrery.camera.pose().position, camera_position);
}

#[test]
fn test_free_mode_leaves_look_at() {
    let mut orrery = seeded_orrery();
    let settings = SimulationSettings::default();
    let mars = BodyKey::planet("mars");
    let position = orrery.position(&mars).unwrap();
    orrery.select_by_click(&mars, position).unwrap();
    settle_camera(&mut orrery, &settings);

    let look_at = orrery.camera.pose().look_at;
    orrery.tick(TICK, &settings);
    assert_eq!(orrery.camera.pose().look_at, look_at);
}

#[test]
fn test_user_drag_pauses_motion() {
    let mut orrery = seeded_orrery();
    let mut settings = SimulationSettings::default();
    settings.camera_interacting = true;
    let earth = BodyKey::planet("earth");
    let before = orrery.position(&earth);
    for _ in 0..60 {
        orrery.tick(TICK, &settings);
    }
    assert_eq!(orrery.position(&earth), before);
}
