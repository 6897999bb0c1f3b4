/// Terminal-based ASCII viewer for parsed OBJ meshes
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::Point3;
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

use objview_core::{Camera, Mesh, MeshResult, OrbitState, RenderBuffer, Transform};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Main application struct for terminal OBJ viewing
pub struct TerminalApp {
    buffer: RenderBuffer,
    center: Point3<f32>,
    orbit: OrbitState,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    last_pointer: Option<(u16, u16)>,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Packs the mesh into a render buffer and frames the camera from its
    /// extents. Fails when the mesh cannot be packed (missing normals or
    /// out-of-range face indices).
    pub fn new(mesh: Mesh) -> MeshResult<Self> {
        let (width, height) = terminal::size()?;

        let buffer = mesh.buffer_data()?;
        let extents = mesh.extents();

        let mut camera = Camera::new(width as u32, height as u32);
        let distance = camera.frame(&extents);
        let orbit = OrbitState::new(width as f32, height as f32, distance);

        Ok(Self {
            buffer,
            center: extents.center(),
            orbit,
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            last_pointer: None,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => {
                if matches!(code, KeyCode::Char('q') | KeyCode::Esc) {
                    self.running = false;
                }
            }
            Event::Mouse(MouseEvent {
                kind, column, row, ..
            }) => self.handle_mouse(kind, column, row),
            Event::Resize(width, height) => {
                self.orbit.handle_resize(width as f32, height as f32);
                self.camera.aspect = self.orbit.aspect();
                self.renderer.resize(width as usize, height as usize);
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        match kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Terminals have no relative-motion mode to toggle; the
                // pointer anchor reset plays that role here.
                if self.orbit.handle_button(true) {
                    self.last_pointer = Some((column, row));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if self.orbit.handle_button(false) {
                    self.last_pointer = None;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some((last_column, last_row)) = self.last_pointer {
                    let dx = column as f32 - last_column as f32;
                    let dy = row as f32 - last_row as f32;
                    self.orbit.handle_motion(dx, dy);
                }
                self.last_pointer = Some((column, row));
            }
            MouseEventKind::ScrollUp => self.orbit.handle_wheel(1.0),
            MouseEventKind::ScrollDown => self.orbit.handle_wheel(-1.0),
            _ => {}
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.camera.position = Point3::new(0.0, 0.0, self.orbit.distance());
        let model = Transform::model_matrix(&self.orbit, self.center);

        // Clear renderer
        self.renderer.clear();

        // Render the packed corner stream
        self.renderer.render_buffer(&self.buffer, &model, &self.camera);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "OBJVIEW | FPS: {:.1} | Controls: Drag=Orbit Wheel=Zoom Q=Quit",
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
