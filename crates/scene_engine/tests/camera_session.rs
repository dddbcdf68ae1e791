//! Mouse-driven camera sessions through the scene input state machine

use approx::assert_relative_eq;
use scene_engine::foundation::logging;
use scene_engine::foundation::math::Point3;
use scene_engine::prelude::*;

const EPSILON: f32 = 1e-2;

fn scene() -> Scene {
    Scene::new(&ViewerConfig::default())
}

#[test]
fn test_orbit_drag_keeps_distance_and_target() {
    logging::init_for_tests();
    let mut scene = scene();
    let distance = scene.camera().distance();
    let target = scene.camera().target();

    scene.press(MouseButton::Left, Vec2::new(320.0, 240.0));
    for step in 1..=20 {
        scene.cursor_moved(Vec2::new(320.0 + step as f32 * 5.0, 240.0 - step as f32 * 2.0));
    }
    scene.release(MouseButton::Left);

    assert_eq!(scene.drag_mode(), DragMode::Idle);
    assert_relative_eq!(scene.camera().distance(), distance, epsilon = EPSILON);
    assert_relative_eq!(scene.camera().target(), target, epsilon = EPSILON);

    // View still looks straight at the target
    let in_view = scene.camera().view_matrix().transform_point(&Point3::from(target));
    assert_relative_eq!(in_view.x, 0.0, epsilon = EPSILON);
    assert_relative_eq!(in_view.y, 0.0, epsilon = EPSILON);
    assert_relative_eq!(in_view.z, -distance, epsilon = EPSILON);
}

#[test]
fn test_stationary_drag_changes_nothing() {
    let mut scene = scene();
    let view = scene.camera().view_matrix();

    scene.press(MouseButton::Left, Vec2::new(100.0, 80.0));
    scene.cursor_moved(Vec2::new(100.0, 80.0));
    scene.cursor_moved(Vec2::new(100.0, 80.0));
    scene.release(MouseButton::Left);

    assert_eq!(scene.camera().view_matrix(), view);
}

#[test]
fn test_pan_preserves_viewing_direction() {
    let mut scene = scene();
    let direction = scene.camera().target() - scene.camera().eye();

    scene.press(MouseButton::Right, Vec2::new(300.0, 200.0));
    scene.cursor_moved(Vec2::new(340.0, 260.0));
    scene.cursor_moved(Vec2::new(200.0, 100.0));
    scene.release(MouseButton::Right);

    assert_relative_eq!(scene.camera().target() - scene.camera().eye(), direction, epsilon = EPSILON);
    assert_ne!(scene.camera().target(), Vec3::zeros());
}

#[test]
fn test_second_button_does_not_hijack_drag() {
    let mut scene = scene();
    let target = scene.camera().target();

    scene.press(MouseButton::Left, Vec2::new(320.0, 240.0));
    scene.press(MouseButton::Right, Vec2::new(320.0, 240.0));
    scene.release(MouseButton::Right);
    assert_eq!(scene.drag_mode(), DragMode::Rotating);

    scene.cursor_moved(Vec2::new(360.0, 240.0));
    // Rotation, not pan: the target stays put
    assert_relative_eq!(scene.camera().target(), target, epsilon = EPSILON);
}

#[test]
fn test_scroll_zoom_floor() {
    let mut scene = scene();
    for _ in 0..100 {
        scene.scroll(50.0);
    }
    let camera = scene.camera();
    assert_relative_eq!(camera.distance(), camera.min_distance, epsilon = EPSILON);
    // Eye is still on the original side of the target
    assert!(camera.eye().z > camera.target().z);
}

#[test]
fn test_follow_mode_tracks_object() {
    let mut scene = scene();
    let id = scene.spawn("car", std::sync::Arc::new(MeshAsset::empty()), MaterialId::Default);
    scene.object_mut(id).unwrap().set_translation(Vec3::new(100.0, 1.0, 100.0));
    scene.set_camera_mode(CameraMode::Follow(id)).unwrap();

    let offset = scene.camera().eye() - scene.camera().target();
    scene.tick(0.1, &[MoveCommand::Forward], None);

    let position = scene.object(id).unwrap().translation();
    assert_relative_eq!(scene.camera().target(), position, epsilon = EPSILON);
    assert_relative_eq!(scene.camera().eye() - scene.camera().target(), offset, epsilon = EPSILON);
}
