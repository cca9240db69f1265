//! Render a JSON scene description to an image file.
//!
//! Usage: render_scene [scene.json] [output.png] [--wireframe] [--axis]

use std::fs::File;
use std::io::BufReader;

use anyhow::Context;
use prism_renderer::{
    ImageDisplay, RenderConfig, RenderMode, Renderer, SceneDescription,
};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut paths = Vec::new();
    let mut config = RenderConfig::default();
    let mut show_axis = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--wireframe" => config.mode = RenderMode::Wireframe,
            "--axis" => show_axis = true,
            _ => paths.push(arg),
        }
    }
    let scene_path = paths.first().map_or("assets/pyramid.json", String::as_str);
    let output = paths.get(1).map_or("output.png", String::as_str);

    println!("Prism Software Rasterizer");
    println!("=========================");

    let start = std::time::Instant::now();
    let file = File::open(scene_path).with_context(|| format!("Failed to open {scene_path}"))?;
    let described = SceneDescription::from_reader(BufReader::new(file))
        .and_then(SceneDescription::into_scene)
        .with_context(|| format!("Failed to load {scene_path}"))?;
    println!("Scene loaded in {:?}", start.elapsed());

    let mut renderer = Renderer::from_description(described, config)?;
    if show_axis {
        renderer.show_axis();
    }

    let projection = renderer.projection();
    println!(
        "Rendering {}x{} ({:?})...",
        projection.width(),
        projection.height(),
        renderer.config().mode
    );

    let mut display = ImageDisplay::new();
    let start = std::time::Instant::now();
    renderer.render_to(&mut display)?;
    println!("Rendered in {:?}", start.elapsed());

    let stats = renderer.stats();
    println!(
        "{} vertices, {} of {} primitives visible, {} fragments",
        stats.vertices,
        stats.visible(),
        stats.primitives,
        stats.fragments
    );

    display.save(output)?;
    println!("Saved to {output}");
    Ok(())
}
