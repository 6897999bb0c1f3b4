/// OBJVIEW Terminal - ASCII OBJ viewer
///
/// Usage: objview-terminal OBJ_FILE
/// Controls:
///   - Left mouse drag: orbit the model
///   - Mouse wheel: zoom
///   - Q/ESC: quit

use std::env;
use std::process::ExitCode;

use objview_core::obj;
use objview_terminal::TerminalApp;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} OBJ_FILE", args[0]);
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

    let mut app = match TerminalApp::new(mesh) {
        Ok(app) => app,
        Err(error) => {
            eprintln!("Could not prepare mesh for rendering: {}", error);
            return ExitCode::FAILURE;
        }
    };

    if let Err(error) = app.run() {
        eprintln!("Renderer error: {}", error);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
