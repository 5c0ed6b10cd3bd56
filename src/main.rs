use std::collections::HashSet;
use std::num::NonZeroU32;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use log::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use maze_caster::config::Args;
use maze_caster::input::{self, Intent};
use maze_caster::scaler::{ScaleLut, stretch_bilinear};
use maze_caster::session::{Session, ViewMode};

const MAX_TICK: Duration = Duration::from_millis(100);
const MIN_FB_WIDTH: usize = 80;

struct App {
    window: Option<Rc<Window>>,
    surface: Option<softbuffer::Surface<Rc<Window>, Rc<Window>>>,
    session: Session,
    shown_stage: u32,

    // FPS log
    frame_counter: u32,
    last_fps_print: Instant,

    // Low resolution framebuffer, stretched onto the window
    fb_small: Vec<u32>,
    fb_w: usize,
    fb_h: usize,
    scale_lut: ScaleLut,

    // Input
    keys_down: HashSet<KeyCode>,
    look_accum: f32,
    mouse_sensitivity: f32,
    last_tick: Instant,
}

impl App {
    fn new(args: &Args, session: Session) -> Self {
        let fb_h = args.render_height;
        let fb_w = fb_h * 4 / 3;
        Self {
            window: None,
            surface: None,
            shown_stage: session.stage(),
            session,

            frame_counter: 0,
            last_fps_print: Instant::now(),

            fb_small: vec![0; fb_w * fb_h],
            fb_w,
            fb_h,
            scale_lut: ScaleLut::default(),

            keys_down: HashSet::new(),
            look_accum: 0.0,
            mouse_sensitivity: args.mouse_sensitivity,
            last_tick: Instant::now(),
        }
    }

    fn title(&self) -> String {
        format!("Maze Caster - stage {}", self.session.stage())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let attributes = Window::default_attributes()
            .with_title(self.title())
            .with_inner_size(LogicalSize::new(960.0, 720.0));

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Rc::new(w),
            Err(e) => {
                error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };
        let surface = softbuffer::Context::new(window.clone())
            .and_then(|context| softbuffer::Surface::new(&context, window.clone()));
        let surface = match surface {
            Ok(s) => s,
            Err(e) => {
                error!("Failed to create drawing surface: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        info!("Window created at {}x{}", size.width, size.height);
        self.rebuild_internal_fb_and_lut(size.width as usize, size.height as usize);

        window.request_redraw();
        self.surface = Some(surface);
        self.window = Some(window);
        self.last_tick = Instant::now();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                info!("Close requested, stopping");
                event_loop.exit();
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state,
                        repeat,
                        ..
                    },
                ..
            } => match state {
                ElementState::Pressed => {
                    if input::QUIT.contains(&code) {
                        event_loop.exit();
                    } else if input::TOGGLE_MAP.contains(&code) && !repeat {
                        self.session.toggle_mode();
                    }
                    self.keys_down.insert(code);
                }
                ElementState::Released => {
                    self.keys_down.remove(&code);
                }
            },

            WindowEvent::Focused(false) => self.keys_down.clear(),

            WindowEvent::RedrawRequested => {
                if let Err(e) = self.tick() {
                    error!("Failed to build the next stage: {e}");
                    event_loop.exit();
                    return;
                }
                self.present(id);
            }

            WindowEvent::Resized(new_size) => {
                let (dw, dh) = (new_size.width as usize, new_size.height as usize);
                self.rebuild_internal_fb_and_lut(dw, dh);
            }
            _ => (),
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _id: DeviceId, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta: (dx, _) } = event {
            self.look_accum += dx as f32 * self.mouse_sensitivity;
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl App {
    /// Movement and stage check; must run before this frame is drawn
    fn tick(&mut self) -> Result<(), maze_caster::error::MazeError> {
        // Cap dt so a stalled window does not teleport the player
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick).min(MAX_TICK);
        self.last_tick = now;

        let intent = Intent::from_keys(&self.keys_down, std::mem::take(&mut self.look_accum));
        self.session.update(&intent, dt.as_secs_f32())?;

        if self.session.stage() != self.shown_stage {
            self.shown_stage = self.session.stage();
            if let Some(window) = &self.window {
                window.set_title(&self.title());
            }
        }
        Ok(())
    }

    fn present(&mut self, id: WindowId) {
        let Some(window) = self.window.as_ref().filter(|w| w.id() == id) else {
            return;
        };

        let size = window.inner_size();
        let (Some(nw), Some(nh)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) else {
            return; // Minimized window, skip drawing
        };
        if (size.width as usize, size.height as usize) != self.scale_lut.dst_size() {
            self.rebuild_internal_fb_and_lut(size.width as usize, size.height as usize);
        }
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        if let Err(e) = surface.resize(nw, nh) {
            warn!("Surface resize failed: {e}");
            return;
        }

        self.session.render(&mut self.fb_small, self.fb_w, self.fb_h);

        match surface.buffer_mut() {
            Ok(mut buf) => {
                stretch_bilinear(&mut buf, &self.fb_small, self.fb_w, &self.scale_lut);
                if let Err(e) = buf.present() {
                    warn!("Present failed: {e}");
                }
            }
            Err(e) => warn!("Could not map surface buffer: {e}"),
        }

        self.frame_counter += 1;
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_print).as_secs_f32();
        if elapsed >= 1.0 {
            debug!("FPS: {:.1}", self.frame_counter as f32 / elapsed);
            self.frame_counter = 0;
            self.last_fps_print = now;
        }
    }

    fn rebuild_internal_fb_and_lut(&mut self, dst_w: usize, dst_h: usize) {
        if dst_w == 0 || dst_h == 0 {
            warn!("Ignoring resize to {dst_w}x{dst_h}");
            return;
        }
        // Internal height is fixed, width follows the window aspect
        let target_h = self.fb_h;
        let aspect = dst_w as f32 / dst_h as f32;
        let target_w = ((target_h as f32 * aspect).round() as usize).max(MIN_FB_WIDTH);

        if target_w != self.fb_w {
            self.fb_w = target_w;
            self.fb_small = vec![0u32; self.fb_w * self.fb_h];
        }
        self.scale_lut = ScaleLut::new(dst_w, dst_h, self.fb_w, self.fb_h);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    args.validate()?;
    info!("Starting with {args:?}");

    let mut session = Session::new(args.session_config()).context("Failed to generate the first maze")?;
    if args.map {
        session.set_mode(ViewMode::Map);
    }

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    // Redraws are requested every frame from about_to_wait
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(&args, session);
    event_loop.run_app(&mut app).context("Event loop terminated with an error")?;
    Ok(())
}
