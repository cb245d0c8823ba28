//! glint - render a scene description to a PNG.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use glint_core::{Material, PrimitiveConfig, SceneConfig, ShapeConfig, StripePattern};
use glint_math::Vec3;
use glint_renderer::{render, render_parallel, Camera, Scene};

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Whitted ray tracer: scene JSON in, PNG out", long_about = None)]
struct Cli {
    /// Scene description (JSON). Renders the built-in demo scene if omitted.
    scene: Option<PathBuf>,

    /// Output image path
    #[arg(short, long, default_value = "render.png")]
    output: PathBuf,

    /// Render single-threaded instead of bucketed over all cores
    #[arg(long)]
    serial: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.scene {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("loading scene {}", path.display()))?,
        None => demo_scene(),
    };

    let scene = Scene::from_config(&config);
    let camera = Camera::new(&config.camera);
    log::info!(
        "Rendering {} primitives at {}x{}",
        scene.len(),
        config.camera.image_width,
        config.camera.image_height
    );

    let start = std::time::Instant::now();
    let image = if cli.serial {
        render(&scene, &camera, &config.render)
    } else {
        render_parallel(&scene, &camera, &config.render)
    };
    log::info!("Rendered in {:?}", start.elapsed());

    image
        .save_png(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    println!("wrote {}", cli.output.display());

    Ok(())
}

/// The built-in demo scene: a reflective sphere, a refractive and a
/// transparent sphere, a striped floor, a red octahedron of eight
/// triangles, and a cylinder.
fn demo_scene() -> SceneConfig {
    let mut primitives = Vec::new();

    // Blue reflective sphere
    primitives.push(PrimitiveConfig {
        shape: ShapeConfig::Sphere {
            center: Vec3::new(0.0, 0.0, -130.0),
            radius: 15.0,
        },
        material: Material::new(Vec3::new(0.0, 0.0, 1.0)).with_reflectivity(0.8),
    });

    // Cyan refractive sphere
    primitives.push(PrimitiveConfig {
        shape: ShapeConfig::Sphere {
            center: Vec3::new(5.0, -11.0, -110.0),
            radius: 4.0,
        },
        material: Material::new(Vec3::new(0.0, 1.0, 1.0)).with_refraction(1.01),
    });

    // Striped floor
    primitives.push(PrimitiveConfig {
        shape: ShapeConfig::Plane {
            vertices: vec![
                Vec3::new(-50.0, -15.0, -40.0),
                Vec3::new(50.0, -15.0, -40.0),
                Vec3::new(50.0, -15.0, -200.0),
                Vec3::new(-50.0, -15.0, -200.0),
            ],
        },
        material: Material::default()
            .with_specular(false)
            .with_pattern(StripePattern::new(
                5.0,
                Vec3::new(1.0, 1.0, 0.5),
                Vec3::new(0.0, 1.0, 0.0),
            )),
    });

    // Red octahedron: four upper and four lower triangles around
    // (-5, 0, -65)
    let apex_top = Vec3::new(-5.0, 10.0, -65.0);
    let apex_bottom = Vec3::new(-5.0, -10.0, -65.0);
    let rim = [
        Vec3::new(-10.0, 0.0, -60.0),
        Vec3::new(0.0, 0.0, -60.0),
        Vec3::new(0.0, 0.0, -70.0),
        Vec3::new(-10.0, 0.0, -70.0),
    ];
    for i in 0..4 {
        let a = rim[i];
        let b = rim[(i + 1) % 4];
        primitives.push(octahedron_face(a, b, apex_top));
        primitives.push(octahedron_face(b, a, apex_bottom));
    }

    // Blue cylinder
    primitives.push(PrimitiveConfig {
        shape: ShapeConfig::Cylinder {
            center: Vec3::new(15.0, -15.0, -70.0),
            radius: 5.0,
            height: 5.0,
        },
        material: Material::new(Vec3::new(0.0, 0.0, 1.0)),
    });

    // Cyan transparent sphere
    primitives.push(PrimitiveConfig {
        shape: ShapeConfig::Sphere {
            center: Vec3::new(0.0, -11.0, -70.0),
            radius: 4.0,
        },
        material: Material::new(Vec3::new(0.0, 1.0, 1.0)).with_transparency(1.0),
    });

    SceneConfig {
        primitives,
        ..Default::default()
    }
}

fn octahedron_face(a: Vec3, b: Vec3, apex: Vec3) -> PrimitiveConfig {
    PrimitiveConfig {
        shape: ShapeConfig::Plane {
            vertices: vec![a, b, apex],
        },
        material: Material::new(Vec3::new(1.0, 0.0, 0.0)),
    }
}
