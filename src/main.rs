use std::error::Error;
use std::fs;
use std::time::Instant;

use clap::Parser;
use image::{ImageBuffer, Rgb, RgbImage};
use log::{debug, info};
use rayon::prelude::*;

mod raytracing;
use raytracing::camera::generate_rays;
use raytracing::core::{trace, Scene, NO_SHAPE};
use raytracing::math::Vec3;
use raytracing::parser::SceneParser;
use raytracing::scenes;

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// the built-in scene to render
    #[arg(short, long, default_value_t = 1)]
    scene: u32,
    /// switch the built-in scenes to their refractive variants
    #[arg(long, default_value_t = false)]
    refraction: bool,
    /// render a scene described by a text file instead of a built-in one
    #[arg(long)]
    scene_file: Option<String>,
    /// render a wavefront OBJ model with a default material
    #[arg(long)]
    obj: Option<String>,
    /// the path where the rendered image is saved
    #[arg(short, long, default_value = "output.png")]
    output: String,
    #[arg(long, default_value_t = 800)]
    width: u32,
    #[arg(long, default_value_t = 800)]
    height: u32,
    /// bounce budget for reflective and refractive rays
    #[arg(short, long, default_value_t = 10)]
    depth: i32,
    /// viewpoint offset "x,y,z" shearing the view off-axis
    #[arg(long, default_value = "0,0,0", value_parser = parse_viewpoint)]
    viewpoint: Vec3,
    /// apply gamma correction to the final image
    #[arg(long, default_value_t = false)]
    gamma_correction: bool,
}

fn parse_viewpoint(input: &str) -> Result<Vec3, String> {
    let components: Vec<&str> = input.split(',').collect();
    if components.len() != 3 {
        return Err(format!("'{}' is not of the form x,y,z", input));
    }
    let mut parsed = [0.0; 3];
    for (slot, component) in parsed.iter_mut().zip(&components) {
        *slot = component
            .trim()
            .parse::<f64>()
            .map_err(|err| format!("'{}': {}", component, err))?;
    }
    Ok(Vec3::new(parsed[0], parsed[1], parsed[2]))
}

impl From<Vec3> for Rgb<u8> {
    fn from(value: Vec3) -> Self {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0) as u8;
        Rgb([channel(value.x), channel(value.y), channel(value.z)])
    }
}

fn gamma_correction(value: f64) -> f64 {
    if value > 0.0 {
        value.powf(1.0 / 2.2)
    } else {
        0.0
    }
}

fn build_scene(args: &Args) -> Result<Scene, Box<dyn Error>> {
    if let Some(path) = &args.scene_file {
        let content = fs::read_to_string(path)?;
        let mut parser = SceneParser::new(&content);
        match parser.parse_scene() {
            Ok(scene) => Ok(scene),
            Err(parser_error) => {
                parser_error.print_error_location(&content);
                Err(Box::from(format!("cannot parse {}: {}", path, parser_error)))
            }
        }
    } else if let Some(path) = &args.obj {
        scenes::from_obj_file(path)
    } else {
        scenes::select(args.scene, args.refraction)
            .ok_or_else(|| Box::from(format!("there is no built-in scene {}", args.scene)))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let scene = build_scene(&args)?;
    debug!(
        "scene holds {} shapes, light at ({}, {}, {})",
        scene.shapes.len(),
        scene.light_position.x,
        scene.light_position.y,
        scene.light_position.z
    );

    let rays = generate_rays(args.viewpoint, args.width, args.height);

    let start = Instant::now();
    let pixels: Vec<(u32, u32, Vec3)> = rays
        .par_iter()
        .map(|r| (r.x, r.y, trace(&scene, &r.ray, args.depth, NO_SHAPE)))
        .collect();
    info!(
        "traced {}x{} pixels in {:?}",
        args.width,
        args.height,
        start.elapsed()
    );

    let mut buffer: RgbImage = ImageBuffer::new(args.width, args.height);
    for (x, y, mut color) in pixels {
        if args.gamma_correction {
            color.x = gamma_correction(color.x);
            color.y = gamma_correction(color.y);
            color.z = gamma_correction(color.z);
        }
        // ray space grows upward, image files store the top row first
        buffer.put_pixel(x, args.height - 1 - y, color.into());
    }

    buffer.save(&args.output)?;
    info!("saved {}", args.output);
    Ok(())
}
