//! Headless scene viewer
//!
//! Drives the scene core through a short scripted session: load a mesh,
//! spawn a few objects, steer one of them into another while orbiting,
//! panning and zooming the camera, and log what a renderer would receive.
//!
//! Usage: `scene_viewer [mesh.obj] [config.toml|config.ron]`

use std::path::{Path, PathBuf};
use std::sync::Arc;

use scene_engine::foundation::logging;
use scene_engine::prelude::*;
use scene_engine::render::UniformRecorder;
use thiserror::Error;

const FRAME_TIME: f32 = 1.0 / 60.0;
const FRAMES: u32 = 180;

const DEMO_CUBE: &str = "\
v -1 -1 -1
v 1 -1 -1
v 1 1 -1
v -1 1 -1
v -1 -1 1
v 1 -1 1
v 1 1 1
v -1 1 1
vn 0 0 -1
vn 0 0 1
vn 0 -1 0
vn 0 1 0
vn -1 0 0
vn 1 0 0
f 1//1 3//1 2//1
f 1//1 4//1 3//1
f 5//2 6//2 7//2
f 5//2 7//2 8//2
f 1//3 2//3 6//3
f 1//3 6//3 5//3
f 4//4 8//4 7//4
f 4//4 7//4 3//4
f 1//5 5//5 8//5
f 1//5 8//5 4//5
f 2//6 3//6 7//6
f 2//6 7//6 6//6
";

#[derive(Error, Debug)]
enum ViewerError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("scene: {0}")]
    Scene(#[from] SceneError),

    #[error("could not write demo mesh: {0}")]
    DemoMesh(#[from] std::io::Error),

    #[error("mesh {0} has no drawable geometry")]
    EmptyMesh(PathBuf),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let mesh_path = args.next().map(PathBuf::from);
    let config_path = args.next().map_or_else(|| PathBuf::from("viewer.toml"), PathBuf::from);

    if let Err(e) = run(mesh_path, &config_path) {
        log::error!("Viewer failed: {}", e);
        return Err(e.into());
    }
    Ok(())
}

fn run(mesh_path: Option<PathBuf>, config_path: &Path) -> Result<(), ViewerError> {
    let config = ViewerConfig::load_or_default(config_path)?;
    config.validate()?;

    let mesh_path = match mesh_path {
        Some(path) => path,
        None => {
            let path = std::env::temp_dir().join("scene_viewer_demo_cube.obj");
            std::fs::write(&path, DEMO_CUBE)?;
            log::info!("No mesh given; using demo cube at {}", path.display());
            path
        }
    };

    let mesh = ObjLoader::load_obj(&mesh_path);
    if mesh.is_empty() {
        return Err(ViewerError::EmptyMesh(mesh_path));
    }
    let mesh = Arc::new(mesh);

    let mut scene = Scene::new(&config);
    let mut backend = HeadlessBackend::new();

    let player = scene.spawn("player", Arc::clone(&mesh), MaterialId::PolishedGold);
    let rock = scene.spawn("rock", Arc::clone(&mesh), MaterialId::Obsidian);
    let statue = scene.spawn("statue", Arc::clone(&mesh), MaterialId::Jade);

    scene.object_mut(player)?.set_translation(Vec3::new(20.0, 1.0, 20.0));
    scene.object_mut(rock)?.set_translation(Vec3::new(20.0, 1.0, 60.0));
    scene.object_mut(statue)?.set_translation(Vec3::new(80.0, 1.0, 80.0));
    for (_, object) in scene.objects() {
        log::debug!("{} at {:?}", object.name(), object.translation());
    }

    scene.upload_all(&mut backend)?;
    log::info!("Uploaded {} buffers ({} bytes)", backend.live_count(), backend.live_bytes());

    // Slow the player down so the approach takes a couple of seconds
    scene.object_mut(player)?.speed = 20.0;

    let terrain = FlatTerrain::new(0.0);
    let mut clock = FrameClock::new();
    let mut was_colliding = false;

    for frame in 0..FRAMES {
        clock.advance(FRAME_TIME);
        let dt = clock.delta_time();

        script_input(&mut scene, frame);

        let commands: &[MoveCommand] = match frame {
            0..=19 => &[MoveCommand::TurnLeft],
            20..=39 => &[MoveCommand::TurnRight],
            _ => &[MoveCommand::Forward],
        };
        let colliding = scene.tick(dt, commands, Some(&terrain)).is_colliding(player);

        if colliding != was_colliding {
            let position = scene.object(player)?.translation();
            if colliding {
                log::info!("Frame {}: player hit something at {:?}", frame, position);
            } else {
                log::info!("Frame {}: player is clear at {:?}", frame, position);
            }
            was_colliding = colliding;
        }
    }

    let mut recorder = UniformRecorder::new();
    for ((_, object), uniforms) in scene.objects().zip(scene.draw_list()) {
        recorder.clear();
        uniforms.apply(&mut recorder);
        log::info!(
            "{}: collisionFlag={:?} toon_shade={:?} uniforms={}",
            object.name(),
            recorder.get_i32("collisionFlag"),
            recorder.get_i32("toon_shade"),
            recorder.names().count()
        );
    }

    let camera = scene.camera();
    log::info!(
        "Camera after {:.2}s: eye {:?}, target {:?}, distance {:.2}",
        clock.total_time(),
        camera.eye(),
        camera.target(),
        camera.distance()
    );

    scene.teardown(&mut backend);
    log::info!("Released {} buffers, {} still live", backend.released_count(), backend.live_count());
    Ok(())
}

/// Mouse activity a user might produce over the session
fn script_input(scene: &mut Scene, frame: u32) {
    let (width, height) = scene.camera().viewport();
    let center = Vec2::new(width as f32 / 2.0, height as f32 / 2.0);
    let t = frame as f32;

    match frame {
        10 => scene.press(MouseButton::Left, center),
        11..=40 => scene.cursor_moved(center + Vec2::new(t - 10.0, (t - 10.0) * 0.3) * 2.0),
        41 => scene.release(MouseButton::Left),
        60 => scene.press(MouseButton::Right, center),
        61..=70 => scene.cursor_moved(center + Vec2::new(0.0, t - 60.0)),
        71 => scene.release(MouseButton::Right),
        90..=99 => scene.scroll(1.0),
        120 => {
            let enabled = scene.toggle_toon_shade();
            log::info!("Toon shading {}", if enabled { "on" } else { "off" });
        }
        _ => {}
    }
}
