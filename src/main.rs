//! driftfx - decorative particle effects over a window surface

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use driftfx::config::AppConfig;
use driftfx::systems::{RenderError, RenderSystem, WindowSystem};
use driftfx_core::{EffectConfig, EffectDriver, EffectKind, EffectStage, StageScene};
use driftfx_input::PointerTracker;

/// Main application state
struct App {
    config: AppConfig,
    window: Option<WindowSystem>,
    render: Option<RenderSystem>,
    stage: EffectStage,
    pointer: PointerTracker,
    paused: bool,
    last_frame: std::time::Instant,
    last_stats: std::time::Instant,
}

impl App {
    fn new() -> Self {
        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        });

        let mut stage = EffectStage::new();
        match StageScene::load(&config.effects.scene_path) {
            Ok(scene) => {
                log::info!(
                    "Loaded scene '{}' with {} effect(s)",
                    scene.name,
                    scene.effects.len()
                );
                for template in &scene.effects {
                    let mut effect = template.to_config();
                    if let Some(seed) = config.effects.seed_override {
                        effect = effect.with_seed(seed);
                    }
                    stage.mount(EffectDriver::new(effect));
                }
            }
            Err(e) => {
                log::warn!(
                    "Failed to load scene '{}': {}. Mounting default dust effect.",
                    config.effects.scene_path,
                    e
                );
                stage.mount(EffectDriver::new(EffectConfig::dust()));
            }
        }

        Self {
            config,
            window: None,
            render: None,
            stage,
            pointer: PointerTracker::new(),
            paused: false,
            last_frame: std::time::Instant::now(),
            last_stats: std::time::Instant::now(),
        }
    }

    /// Scale a window-space pointer position into framebuffer space
    fn pointer_in_canvas(&self) -> Option<driftfx_math::Vec2> {
        let render = self.render.as_ref()?;
        let position = self.pointer.sample()?;
        let (sw, _) = render.size();
        let (cw, _) = render.canvas_size_px();
        let scale = cw as f32 / sw.max(1) as f32;
        Some(position * scale)
    }

    /// Replace every mounted effect with a single fresh one
    fn switch_effect(&mut self, kind: EffectKind) {
        let Some(render) = self.render.as_mut() else {
            return;
        };
        self.stage.stop_all(render.canvas_mut());
        for key in self.stage.keys().collect::<Vec<_>>() {
            self.stage.unmount(key);
        }
        self.stage.mount(EffectDriver::new(EffectConfig::for_kind(kind)));

        let (cw, ch) = render.canvas_size_px();
        self.stage
            .start_all(cw, ch, self.config.accessibility.reduced_motion);
        log::info!("Switched to {:?} effect", kind);
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = WindowSystem::create(event_loop, &self.config.window)
            .expect("Failed to create window");

        let render = RenderSystem::new(
            window.window().clone(),
            self.config.rendering.pixel_scale,
            self.config.window.vsync,
        );

        let (cw, ch) = render.canvas_size_px();
        self.stage
            .start_all(cw, ch, self.config.accessibility.reduced_motion);
        log::info!(
            "Stage running: {} effect(s), {} particles",
            self.stage.effect_count(),
            self.stage.total_particles()
        );

        window.request_redraw();
        self.window = Some(window);
        self.render = Some(render);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if self.pointer.process_window_event(&event) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                if let Some(render) = self.render.as_mut() {
                    self.stage.stop_all(render.canvas_mut());
                }
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(render) = self.render.as_mut() {
                    render.resize(physical_size.width, physical_size.height);
                    let (cw, ch) = render.canvas_size_px();
                    self.stage.resize_all(cw, ch);
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let PhysicalKey::Code(key) = event.physical_key {
                    match key {
                        KeyCode::Escape => {
                            if let Some(render) = self.render.as_mut() {
                                self.stage.stop_all(render.canvas_mut());
                            }
                            event_loop.exit();
                        }
                        KeyCode::Digit1 => self.switch_effect(EffectKind::Dust),
                        KeyCode::Digit2 => self.switch_effect(EffectKind::Petals),
                        KeyCode::Digit3 => self.switch_effect(EffectKind::Fireworks),
                        KeyCode::Space => {
                            self.paused = !self.paused;
                            log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
                        }
                        KeyCode::KeyF => {
                            if let Some(window) = &self.window {
                                window.toggle_fullscreen();
                            }
                        }
                        _ => {}
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let now = std::time::Instant::now();
                let raw_dt = (now - self.last_frame).as_secs_f32();
                // Cap dt to avoid a huge first step after focus loss
                let dt = raw_dt.min(1.0 / 30.0);
                self.last_frame = now;

                let pointer = self.pointer_in_canvas();
                if let Some(render) = self.render.as_mut() {
                    if !self.paused {
                        self.stage.tick_all(dt, render.canvas_mut(), pointer);
                    }

                    match render.present() {
                        Ok(()) => {}
                        Err(RenderError::SurfaceLost) => render.recover_surface(),
                        Err(RenderError::OutOfMemory) => {
                            event_loop.exit();
                            return;
                        }
                        Err(e) => log::warn!("Surface error: {}", e),
                    }
                }

                if self.config.debug.show_stats
                    && (now - self.last_stats).as_secs_f32() >= 1.0
                {
                    self.last_stats = now;
                    log::debug!(
                        "{} effect(s), {} particles",
                        self.stage.effect_count(),
                        self.stage.total_particles()
                    );
                    if let Some(window) = &self.window {
                        window.update_title(
                            &self.config.window.title,
                            self.stage.effect_count(),
                            self.stage.total_particles(),
                        );
                    }
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Starting driftfx");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
