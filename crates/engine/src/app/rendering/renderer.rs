use std::sync::Arc;

use pixels::{Error, Pixels, SurfaceTexture};
use winit::window::Window;

use crate::app::{RenderableKind, SceneWorld};

use super::{world_to_screen, Viewport, PIXELS_PER_WORLD};

const CLEAR_COLOR: [u8; 4] = [18, 20, 26, 255];
const PLACEHOLDER_COLOR: [u8; 4] = [220, 220, 240, 255];
const ENTITY_HALF_SIZE_PX: i32 = 10;

pub struct Renderer {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    viewport: Viewport,
}

impl Renderer {
    pub fn new(window: Arc<Window>) -> Result<Self, Error> {
        let size = window.inner_size();
        let pixels = Self::build_pixels(Arc::clone(&window), size.width, size.height)?;
        Ok(Self {
            window,
            pixels,
            viewport: Viewport {
                width: size.width,
                height: size.height,
            },
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), Error> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels = Self::build_pixels(Arc::clone(&self.window), width, height)?;
        self.viewport = Viewport { width, height };
        Ok(())
    }

    fn build_pixels(
        window: Arc<Window>,
        width: u32,
        height: u32,
    ) -> Result<Pixels<'static>, Error> {
        let surface = SurfaceTexture::new(width, height, window);
        Pixels::new(width, height, surface)
    }

    pub(crate) fn render_world(
        &mut self,
        world: &SceneWorld,
        screen_tint: Option<[u8; 4]>,
    ) -> Result<(), Error> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Ok(());
        }

        let viewport = self.viewport;
        let frame = self.pixels.frame_mut();
        draw_world(frame, viewport, world);
        if let Some(tint) = screen_tint {
            blend_tint(frame, tint);
        }

        self.pixels.render()
    }
}

fn draw_world(frame: &mut [u8], viewport: Viewport, world: &SceneWorld) {
    for chunk in frame.chunks_exact_mut(4) {
        chunk.copy_from_slice(&CLEAR_COLOR);
    }

    for entity in world.entities() {
        let color = match entity.renderable.kind {
            RenderableKind::Placeholder => PLACEHOLDER_COLOR,
            RenderableKind::Solid(color) => color,
        };
        let (cx, cy) = world_to_screen(
            entity.transform.position,
            world.camera(),
            viewport,
            PIXELS_PER_WORLD,
        );
        fill_square(frame, viewport, cx, cy, ENTITY_HALF_SIZE_PX, color);
    }
}

fn fill_square(
    frame: &mut [u8],
    viewport: Viewport,
    cx: i32,
    cy: i32,
    half_size: i32,
    color: [u8; 4],
) {
    let width = viewport.width as i32;
    let height = viewport.height as i32;
    let x0 = (cx - half_size).max(0);
    let x1 = (cx + half_size).min(width);
    let y0 = (cy - half_size).max(0);
    let y1 = (cy + half_size).min(height);

    for y in y0..y1 {
        for x in x0..x1 {
            let offset = ((y * width + x) * 4) as usize;
            frame[offset..offset + 4].copy_from_slice(&color);
        }
    }
}

/// Alpha-blends `tint` over every pixel; the tint's alpha channel is its opacity.
fn blend_tint(frame: &mut [u8], tint: [u8; 4]) {
    let alpha = u16::from(tint[3]);
    if alpha == 0 {
        return;
    }
    let inverse = 255 - alpha;
    for chunk in frame.chunks_exact_mut(4) {
        for channel in 0..3 {
            let blended =
                (u16::from(chunk[channel]) * inverse + u16::from(tint[channel]) * alpha) / 255;
            chunk[channel] = blended as u8;
        }
    }
}
