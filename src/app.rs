use std::sync::Arc;

use glam::Vec2;
use instant::Instant;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::assets::Assets;
use crate::audio::{AudioSink, LogAudio};
use crate::ecs::systems;
use crate::input::InputState;
use crate::render;
use crate::render::canvas::Canvas;
use crate::world::WorldState;

/// Initial window size.
const WINDOW_W: u32 = 960;
const WINDOW_H: u32 = 540;
/// Frame time folded into one pacing log line (ms).
const PACING_WINDOW_MS: f32 = 5000.0;
/// Environment variable that pins the session seed.
const SEED_ENV: &str = "CATGLADE_SEED";
/// Background music volume once the first click lands.
const MUSIC_VOLUME: f32 = 0.5;

// ---------------------------------------------------------------------------
// Frame pacing
// ---------------------------------------------------------------------------

/// Rolling frame-time bookkeeping. Windows close on accumulated frame
/// time rather than wall time, and reporting is left to the caller.
struct FramePacer {
    total_frames: u64,
    window_frames: u32,
    window_ms: f32,
    worst_ms: f32,
}

/// One closed pacing window.
struct PacerReport {
    fps: f32,
    avg_ms: f32,
    worst_ms: f32,
    total_frames: u64,
}

impl FramePacer {
    fn new() -> Self {
        Self {
            total_frames: 0,
            window_frames: 0,
            window_ms: 0.0,
            worst_ms: 0.0,
        }
    }

    /// Fold in one frame. Hands back a report whenever a window closes.
    fn record(&mut self, dt_ms: f32) -> Option<PacerReport> {
        self.total_frames += 1;
        self.window_frames += 1;
        self.window_ms += dt_ms;
        self.worst_ms = self.worst_ms.max(dt_ms);
        if self.window_ms < PACING_WINDOW_MS {
            return None;
        }
        let report = PacerReport {
            fps: self.window_frames as f32 * 1000.0 / self.window_ms,
            avg_ms: self.window_ms / self.window_frames as f32,
            worst_ms: self.worst_ms,
            total_frames: self.total_frames,
        };
        self.window_frames = 0;
        self.window_ms = 0.0;
        self.worst_ms = 0.0;
        Some(report)
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

fn session_rng() -> fastrand::Rng {
    match std::env::var(SEED_ENV)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
    {
        Some(seed) => {
            log::info!("world seeded from {SEED_ENV}={seed}");
            fastrand::Rng::with_seed(seed)
        }
        None => fastrand::Rng::new(),
    }
}

/// Top-level application state.
struct App {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    world: Option<WorldState>,

    assets: Assets,
    input: InputState,
    audio: LogAudio,

    /// The menu gate. The simulation runs behind the menu, but input
    /// only reaches it after the first click.
    started: bool,

    last_frame_time: Option<Instant>,
    pacer: FramePacer,

    screen_w: u32,
    screen_h: u32,
}

impl App {
    fn new() -> Self {
        Self {
            window: None,
            pixels: None,
            world: None,
            assets: Assets::generate(),
            input: InputState::new(),
            audio: LogAudio,
            started: false,
            last_frame_time: None,
            pacer: FramePacer::new(),
            screen_w: WINDOW_W,
            screen_h: WINDOW_H,
        }
    }

    /// The tracked size changes only once the surface and the buffer
    /// both accept the new one; a failed resize leaves the old frame
    /// and viewport in effect.
    fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Some(pixels) = &mut self.pixels {
            if let Err(err) = pixels.resize_surface(width, height) {
                log::error!("surface resize failed: {err}");
                return;
            }
            if let Err(err) = pixels.resize_buffer(width, height) {
                log::error!("buffer resize failed: {err}");
                return;
            }
        }
        self.screen_w = width;
        self.screen_h = height;
        if let Some(world) = &mut self.world {
            world.viewport = Vec2::new(width as f32, height as f32);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title("CatGlade")
            .with_inner_size(LogicalSize::new(WINDOW_W as f64, WINDOW_H as f64));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .expect("failed to create window"),
        );

        let size = window.inner_size();
        self.screen_w = size.width.max(1);
        self.screen_h = size.height.max(1);
        log::info!("window created: {}x{}", self.screen_w, self.screen_h);

        let surface_texture = SurfaceTexture::new(self.screen_w, self.screen_h, window.clone());
        let pixels = PixelsBuilder::new(self.screen_w, self.screen_h, surface_texture)
            .build()
            .expect("failed to create pixel surface");
        self.pixels = Some(pixels);

        self.world = Some(WorldState::new(
            Vec2::new(self.screen_w as f32, self.screen_h as f32),
            session_rng(),
        ));

        event_loop.set_control_flow(ControlFlow::Poll);
        self.window = Some(window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, exiting");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                self.resize(new_size.width, new_size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let pressed = event.state.is_pressed();
                match event.physical_key {
                    PhysicalKey::Code(KeyCode::Escape) if pressed => {
                        log::info!("escape pressed, exiting");
                        event_loop.exit();
                    }
                    PhysicalKey::Code(KeyCode::KeyA) | PhysicalKey::Code(KeyCode::ArrowLeft)
                        if self.started =>
                    {
                        self.input.left_held = pressed;
                    }
                    PhysicalKey::Code(KeyCode::KeyD) | PhysicalKey::Code(KeyCode::ArrowRight)
                        if self.started =>
                    {
                        self.input.right_held = pressed;
                    }
                    PhysicalKey::Code(KeyCode::Space)
                        if self.started && pressed && !event.repeat =>
                    {
                        self.input.spawn_requested();
                    }
                    _ => {}
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input
                    .pointer_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed => {
                    if self.started {
                        self.input.pointer_pressed();
                    }
                }
                ElementState::Released => {
                    if self.started {
                        self.input.pointer_released();
                    } else {
                        // the click that dismisses the menu is swallowed
                        self.started = true;
                        self.audio.start_music(MUSIC_VOLUME);
                        log::info!("menu dismissed, input live");
                    }
                }
            },
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let mut dt_ms = 0.0_f32;
                if let Some(last) = self.last_frame_time {
                    dt_ms = now.duration_since(last).as_secs_f32() * 1000.0;
                    if let Some(report) = self.pacer.record(dt_ms) {
                        log::info!(
                            "{:.0} fps | avg {:.2}ms | worst {:.2}ms | {} frames",
                            report.fps,
                            report.avg_ms,
                            report.worst_ms,
                            report.total_frames,
                        );
                    }
                }
                self.last_frame_time = Some(now);

                if let (Some(world), Some(pixels)) =
                    (self.world.as_mut(), self.pixels.as_mut())
                {
                    // the snapshot clears edge flags; they keep waiting
                    // until a frame the tick will actually consume
                    if dt_ms > 0.0 {
                        let frame = self.input.snapshot();
                        systems::tick(world, &frame, dt_ms, &mut self.audio);
                    }

                    {
                        let mut canvas =
                            Canvas::new(pixels.frame_mut(), self.screen_w, self.screen_h);
                        render::draw(world, &self.assets, &mut canvas);
                        if !self.started {
                            render::draw_start_overlay(&mut canvas);
                        }
                    }
                    if let Err(err) = pixels.render() {
                        log::error!("render failed: {err}");
                        event_loop.exit();
                    }
                }
            }
            _ => {}
        }
    }
}

/// Entry point: create the event loop and run until close.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_pacer_reports_once_per_window() {
        let mut pacer = FramePacer::new();
        for _ in 0..299 {
            assert!(pacer.record(16.7).is_none());
        }
        let report = pacer.record(16.7).unwrap();
        assert_eq!(report.total_frames, 300);
        assert!((report.avg_ms - 16.7).abs() < 0.01);
        assert_eq!(report.worst_ms, 16.7);
        assert!(report.fps > 59.0 && report.fps < 61.0);

        // the next window starts from scratch
        assert!(pacer.record(16.7).is_none());
    }

    #[test]
    fn the_worst_frame_headlines_its_window() {
        let mut pacer = FramePacer::new();
        assert!(pacer.record(80.0).is_none());
        for _ in 0..600 {
            if let Some(report) = pacer.record(10.0) {
                assert_eq!(report.worst_ms, 80.0);
                assert_eq!(report.total_frames, 493);
                return;
            }
        }
        panic!("the window never closed");
    }
}
