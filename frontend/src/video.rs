use oberon_core::control::render::Surface;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, TextureCreator};
use sdl2::video::{Window, WindowContext};

use crate::error::FrontendError;

pub struct Video {
    canvas: Canvas<Window>,
    texture_creator: TextureCreator<WindowContext>,
    width: u32,
    height: u32,
}

impl Video {
    /// Create an SDL window and renderer for the given native resolution.
    pub fn new(
        sdl_video: &sdl2::VideoSubsystem,
        title: &str,
        native_width: u32,
        native_height: u32,
        scale: u32,
    ) -> Result<Self, FrontendError> {
        let scaled = |native: u32| {
            native.checked_mul(scale).ok_or_else(|| {
                FrontendError::Sdl(format!("window size {native} x{scale} overflows"))
            })
        };
        let window = sdl_video
            .window(title, scaled(native_width)?, scaled(native_height)?)
            .position_centered()
            .build()
            .map_err(|e| FrontendError::Sdl(e.to_string()))?;

        let canvas = window
            .into_canvas()
            .accelerated()
            .present_vsync()
            .build()
            .map_err(|e| FrontendError::Sdl(e.to_string()))?;

        let texture_creator = canvas.texture_creator();

        Ok(Self {
            canvas,
            texture_creator,
            width: native_width,
            height: native_height,
        })
    }

    /// Upload an RGB24 frame to a texture and present it, scaled to the window.
    fn upload(&mut self, rgb: &[u8]) -> Result<(), String> {
        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::RGB24, self.width, self.height)
            .map_err(|e| e.to_string())?;

        texture
            .update(None, rgb, (self.width * 3) as usize)
            .map_err(|e| e.to_string())?;

        self.canvas.clear();
        self.canvas.copy(&texture, None, None)?;
        self.canvas.present();
        Ok(())
    }
}

impl Surface for Video {
    fn set_title(&mut self, title: &str) {
        if self.canvas.window().title() == title {
            return;
        }
        if let Err(e) = self.canvas.window_mut().set_title(title) {
            log::warn!("failed to set window title: {e}");
        }
    }

    fn present(&mut self, rgb: &[u8]) {
        if let Err(e) = self.upload(rgb) {
            log::error!("failed to present frame: {e}");
        }
    }
}
