//! Font atlas textures

use std::rc::Rc;

use glow::{Context, HasContext};
use tracing::debug;

use super::{GlTexture, GlowError, GlowResult};
use crate::draw::TextureId;
use crate::platform::NativeTexture;

/// RGBA texture owned by a window's GUI context
///
/// The GL object is deleted when the value is dropped, so the context's
/// `gl` must still be current at that point.
pub struct GlowTexture {
    gl: Rc<Context>,
    texture: GlTexture,
    size: [u32; 2],
}

impl GlowTexture {
    /// Upload tightly packed RGBA8 pixels
    pub fn from_rgba(gl: Rc<Context>, width: u32, height: u32, pixels: &[u8]) -> GlowResult<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(GlowError::PixelDataSize {
                expected,
                actual: pixels.len(),
            });
        }

        let texture = unsafe {
            let texture = gl.create_texture().map_err(GlowError::CreateTexture)?;
            let mut last_texture = [0];
            gl.get_parameter_i32_slice(glow::TEXTURE_BINDING_2D, &mut last_texture);

            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(pixels)),
            );

            let restored = std::num::NonZeroU32::new(last_texture[0] as u32).map(glow::NativeTexture);
            gl.bind_texture(glow::TEXTURE_2D, restored);
            texture
        };

        debug!("Uploaded {}x{} RGBA texture {}", width, height, texture.0);
        Ok(Self {
            gl,
            texture,
            size: [width, height],
        })
    }

    pub fn raw(&self) -> GlTexture {
        self.texture
    }

    pub fn size(&self) -> [u32; 2] {
        self.size
    }
}

impl NativeTexture for GlowTexture {
    fn texture_id(&self) -> TextureId {
        TextureId::new(u64::from(self.texture.0.get()))
    }
}

impl Drop for GlowTexture {
    fn drop(&mut self) {
        unsafe { self.gl.delete_texture(self.texture) };
    }
}

impl std::fmt::Debug for GlowTexture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlowTexture")
            .field("texture", &self.texture)
            .field("size", &self.size)
            .finish()
    }
}
