/// Example: Load an OBJ file and print its derived geometry
///
/// Usage: cargo run --example inspect_obj -- path/to/model.obj

use std::env;
use std::process::ExitCode;

use objview_core::{obj, Camera, OrbitState};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <obj-file>", args[0]);
        return ExitCode::FAILURE;
    }

    let mesh = match obj::load_obj_file(&args[1]) {
        Ok(mesh) => mesh,
        Err(error) => {
            eprintln!("Could not load \"{}\": {}", args[1], error);
            return ExitCode::FAILURE;
        }
    };

    let statistics = mesh.statistics();
    println!("Vertices: {}", statistics.vertices);
    println!("Normals: {}", statistics.normals);
    println!("Texture coordinates: {}", statistics.texture_coordinates);
    println!("Faces: {}", statistics.faces);

    let extents = mesh.extents();
    println!("Extents: {:?} .. {:?}", extents.min, extents.max);
    println!("Center: {:?}", extents.center());

    let mut camera = Camera::new(640, 480);
    let distance = camera.frame(&extents);
    let orbit = OrbitState::new(640.0, 480.0, distance);
    println!("Framing distance: {:.3}", distance);
    println!("Drag sensitivity: {:.4} deg/px", orbit.sensitivity());

    match mesh.buffer_data() {
        Ok(buffer) => println!(
            "Render buffer: {} bytes, {} vertices",
            buffer.byte_len(),
            buffer.vertex_count()
        ),
        Err(error) => println!("Mesh is not renderable through the packed path: {}", error),
    }

    ExitCode::SUCCESS
}
