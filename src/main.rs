use clap::Parser;
use log::info;
use nalgebra::{Point3, Vector3};
use softrast::core::math::transform::TransformFactory;
use softrast::io::config::Config;
use softrast::io::image::save_framebuffer;
use softrast::pipeline::renderer::Renderer;
use softrast::scene::camera::{Camera, CameraInput};
use softrast::scene::material::{Checkerboard, FlatColor, Material};
use softrast::scene::mesh::Mesh;
use std::sync::Arc;

/// Headless software rasterizer: renders the demo scene to PNG.
#[derive(Parser, Debug)]
#[command(name = "softrast")]
#[command(about = "Software triangle rasterizer")]
struct Cli {
    /// Configuration file path (TOML).
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Output path; a frame index is appended when rendering more than one
    /// frame.
    #[arg(short, long, default_value = "output.png")]
    output: String,

    /// Overrides the configured frame count.
    #[arg(long)]
    frames: Option<u32>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let width = config.render.width;
    let height = config.render.height;
    let settings = config.settings();
    let background = config.background();

    let mut renderer = Renderer::new(width, height);
    let mut camera = Camera::new(
        Point3::from(config.camera.origin),
        config.camera.fov_degrees,
        width as f32 / height as f32,
    );

    let mut mesh = demo_mesh();

    let frames = cli.frames.unwrap_or(config.animation.frames);
    let delta_time = config.animation.frame_time;
    let spin = config.animation.rotation_degrees_per_second.to_radians();

    info!("Rendering {frames} frame(s) at {width}x{height}");

    for frame in 0..frames {
        camera.update(delta_time, &CameraInput::default());

        renderer.clear(background);
        renderer.draw_mesh(&mesh, &camera, &settings);

        let path = if frames == 1 {
            cli.output.clone()
        } else {
            frame_path(&cli.output, frame)
        };
        save_framebuffer(&renderer.framebuffer, &path);
        info!("Wrote {path}");

        // Spin the mesh in object space between frames, never mid-draw.
        mesh.set_world(mesh.world() * TransformFactory::rotation_y(spin * delta_time));
    }

    Ok(())
}

/// A checkerboard cube sitting on the optical axis, 50 units out.
fn demo_mesh() -> Mesh {
    let material = Material {
        diffuse: Arc::new(Checkerboard {
            cells: 4.0,
            even: Vector3::new(0.85, 0.65, 0.25),
            odd: Vector3::new(0.15, 0.15, 0.2),
        }),
        normal: Arc::new(FlatColor(Vector3::new(0.5, 0.5, 1.0))),
        specular: Arc::new(FlatColor(Vector3::new(0.4, 0.4, 0.4))),
        glossiness: Arc::new(FlatColor(Vector3::new(0.6, 0.6, 0.6))),
    };

    let mut mesh = Mesh::cube(20.0, material);
    mesh.set_world(TransformFactory::translation(&Vector3::new(0.0, 0.0, 50.0)));
    mesh
}

fn frame_path(base: &str, frame: u32) -> String {
    match base.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}_{frame:04}.{ext}"),
        None => format!("{base}_{frame:04}"),
    }
}
