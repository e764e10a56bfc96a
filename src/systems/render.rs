//! GPU presentation system
//!
//! Owns the render context, the CPU framebuffer the effects draw into,
//! and the blit pipeline that puts it on screen each frame.

use std::sync::Arc;
use winit::window::Window;

use driftfx_render::{context::RenderContext, pipeline::BlitPipeline, Canvas, PixelCanvas};

/// Render error types
#[derive(Debug)]
pub enum RenderError {
    /// Surface was lost (window resized, minimized, etc.)
    SurfaceLost,
    /// GPU out of memory
    OutOfMemory,
    /// Other surface error
    Other(String),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::SurfaceLost => write!(f, "Surface lost"),
            RenderError::OutOfMemory => write!(f, "Out of memory"),
            RenderError::Other(msg) => write!(f, "Render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

/// Manages GPU presentation of the effect framebuffer
pub struct RenderSystem {
    context: RenderContext,
    blit: BlitPipeline,
    canvas: PixelCanvas,
    pixel_scale: u32,
}

impl RenderSystem {
    /// Create render system from window and config
    pub fn new(window: Arc<Window>, pixel_scale: u32, vsync: bool) -> Self {
        let context = pollster::block_on(RenderContext::with_vsync(window, vsync));
        let blit = BlitPipeline::new(&context.device, context.config.format);

        let pixel_scale = pixel_scale.max(1);
        let (cw, ch) = Self::canvas_size(context.size.width, context.size.height, pixel_scale);
        let canvas = PixelCanvas::new(cw, ch);

        Self {
            context,
            blit,
            canvas,
            pixel_scale,
        }
    }

    fn canvas_size(width: u32, height: u32, scale: u32) -> (u32, u32) {
        ((width / scale).max(1), (height / scale).max(1))
    }

    /// The framebuffer effects draw into
    pub fn canvas_mut(&mut self) -> &mut PixelCanvas {
        &mut self.canvas
    }

    /// Framebuffer size in pixels
    pub fn canvas_size_px(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    /// Handle window resize
    pub fn resize(&mut self, width: u32, height: u32) {
        self.context
            .resize(winit::dpi::PhysicalSize::new(width, height));
        let (cw, ch) = Self::canvas_size(width, height, self.pixel_scale);
        self.canvas.resize(cw, ch);
    }

    /// Upload the framebuffer and present one frame
    pub fn present(&mut self) -> Result<(), RenderError> {
        self.blit.ensure_texture(
            &self.context.device,
            self.canvas.width(),
            self.canvas.height(),
        );
        self.blit.upload(&self.context.queue, self.canvas.data());

        let output = match self.context.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost) => return Err(RenderError::SurfaceLost),
            Err(wgpu::SurfaceError::OutOfMemory) => return Err(RenderError::OutOfMemory),
            Err(e) => return Err(RenderError::Other(format!("{:?}", e))),
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .context
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });

        self.blit.render(&mut encoder, &view);

        self.context.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    /// Get current surface size
    pub fn size(&self) -> (u32, u32) {
        (self.context.size.width, self.context.size.height)
    }

    /// Reconfigure the surface after a lost-surface error
    pub fn recover_surface(&mut self) {
        let size = self.context.size;
        self.context.resize(size);
    }
}
