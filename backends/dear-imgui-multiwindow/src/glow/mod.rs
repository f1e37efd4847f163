//! OpenGL render target built on `glow`
//!
//! [`GlowRenderTarget`] implements [`RenderTarget`] for one window's GL
//! context and [`GlowTexture`] is a font atlas texture that platforms can
//! hand out from [`Platform::create_texture`](crate::Platform::create_texture).
//!
//! GL objects are deleted in whichever GL context is current when they are
//! dropped. Make a window's GL context current before
//! [`Registry::shutdown_window`](crate::Registry::shutdown_window) or
//! [`Registry::shutdown`](crate::Registry::shutdown) drops its font texture;
//! unshared contexts reuse texture names, so a wrong context loses another
//! window's texture.
//!
//! ```rust,ignore
//! let gl = Rc::new(unsafe { glow::Context::from_loader_function(loader) });
//! let mut target = GlowRenderTarget::new(gl.clone())?;
//! registry.render(&window, &mut target)?;
//!
//! // in the application's Platform impl
//! fn create_texture(&self, width: u32, height: u32, rgba: &[u8]) -> Result<GlowTexture, String> {
//!     GlowTexture::from_rgba(self.gl.clone(), width, height, rgba).map_err(|err| err.to_string())
//! }
//! ```

use std::rc::Rc;

use glow::{Context, HasContext};
use tracing::debug;

use crate::draw::{DrawData, DrawIdx, DrawList, DrawVert, TextureId};
use crate::renderer::RenderTarget;
use crate::runtime::BackendFlags;

mod error;
mod shaders;
mod state;
mod texture;
mod versions;

pub use error::*;
pub use shaders::Shaders;
pub use state::GlStateBackup;
pub use texture::GlowTexture;
pub use versions::GlVersion;

pub type GlBuffer = <Context as HasContext>::Buffer;
pub type GlTexture = <Context as HasContext>::Texture;
pub type GlVertexArray = <Context as HasContext>::VertexArray;
pub type GlProgram = <Context as HasContext>::Program;
pub type GlUniformLocation = <Context as HasContext>::UniformLocation;

fn to_byte_slice<T>(slice: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(slice.as_ptr() as *const u8, size_of_val(slice)) }
}

/// Replays draw data into the GL context it was created for
pub struct GlowRenderTarget {
    gl: Rc<Context>,
    gl_version: GlVersion,
    shaders: Shaders,
    vbo: GlBuffer,
    ebo: GlBuffer,
    #[cfg(feature = "bind_vertex_array_support")]
    vao: Option<GlVertexArray>,
}

impl GlowRenderTarget {
    /// Create the program and buffers; the GL context must be current
    pub fn new(gl: Rc<Context>) -> GlowResult<Self> {
        let gl_version = GlVersion::read(&gl);
        debug!(
            "Creating glow render target for GL {}.{}{}",
            gl_version.major,
            gl_version.minor,
            if gl_version.is_es { " ES" } else { "" }
        );

        let shaders = Shaders::new(&gl, gl_version)?;
        let buffers = unsafe {
            gl.create_buffer().and_then(|vbo| match gl.create_buffer() {
                Ok(ebo) => Ok((vbo, ebo)),
                Err(err) => {
                    gl.delete_buffer(vbo);
                    Err(err)
                }
            })
        };
        let (vbo, ebo) = match buffers {
            Ok(buffers) => buffers,
            Err(err) => {
                shaders.destroy(&gl);
                return Err(GlowError::CreateBufferObject(err));
            }
        };

        #[cfg(feature = "bind_vertex_array_support")]
        let vao = if gl_version.bind_vertex_array_support() {
            match unsafe { gl.create_vertex_array() } {
                Ok(vao) => Some(vao),
                Err(err) => {
                    unsafe {
                        gl.delete_buffer(vbo);
                        gl.delete_buffer(ebo);
                    }
                    shaders.destroy(&gl);
                    return Err(GlowError::CreateVertexArray(err));
                }
            }
        } else {
            None
        };

        Ok(Self {
            gl,
            gl_version,
            shaders,
            vbo,
            ebo,
            #[cfg(feature = "bind_vertex_array_support")]
            vao,
        })
    }

    pub fn gl(&self) -> &Rc<Context> {
        &self.gl
    }

    pub fn gl_version(&self) -> GlVersion {
        self.gl_version
    }

    /// Renderer capabilities to merge into the context's backend flags
    pub fn backend_flags(&self) -> BackendFlags {
        if self.vertex_offset_support() {
            BackendFlags::RENDERER_HAS_VTX_OFFSET
        } else {
            BackendFlags::empty()
        }
    }

    fn vertex_offset_support(&self) -> bool {
        cfg!(feature = "vertex_offset_support") && self.gl_version.vertex_offset_support()
    }
}

impl RenderTarget for GlowRenderTarget {
    type StateBackup = GlStateBackup;

    fn backup_state(&mut self) -> GlStateBackup {
        GlStateBackup::capture(&self.gl, self.gl_version)
    }

    fn restore_state(&mut self, backup: GlStateBackup) {
        backup.restore(&self.gl, self.gl_version);
    }

    fn set_up_render_state(&mut self, draw_data: &DrawData, framebuffer_size: [i32; 2]) {
        let gl = &self.gl;
        unsafe {
            gl.enable(glow::BLEND);
            gl.blend_equation(glow::FUNC_ADD);
            gl.blend_func_separate(
                glow::SRC_ALPHA,
                glow::ONE_MINUS_SRC_ALPHA,
                glow::ONE,
                glow::ONE_MINUS_SRC_ALPHA,
            );
            gl.disable(glow::CULL_FACE);
            gl.disable(glow::DEPTH_TEST);
            gl.disable(glow::STENCIL_TEST);
            gl.enable(glow::SCISSOR_TEST);

            #[cfg(feature = "polygon_mode_support")]
            if self.gl_version.polygon_mode_support() {
                gl.polygon_mode(glow::FRONT_AND_BACK, glow::FILL);
            }

            gl.viewport(0, 0, framebuffer_size[0], framebuffer_size[1]);

            let l = draw_data.display_pos[0];
            let r = draw_data.display_pos[0] + draw_data.display_size[0];
            let t = draw_data.display_pos[1];
            let b = draw_data.display_pos[1] + draw_data.display_size[1];
            let ortho_projection = [
                [2.0 / (r - l), 0.0, 0.0, 0.0],
                [0.0, 2.0 / (t - b), 0.0, 0.0],
                [0.0, 0.0, -1.0, 0.0],
                [(r + l) / (l - r), (t + b) / (b - t), 0.0, 1.0],
            ];

            gl.use_program(Some(self.shaders.program));
            if let Some(location) = &self.shaders.tex_location {
                gl.uniform_1_i32(Some(location), 0);
            }
            if let Some(location) = &self.shaders.proj_mtx_location {
                gl.uniform_matrix_4_f32_slice(Some(location), false, &ortho_projection.concat());
            }

            #[cfg(feature = "bind_vertex_array_support")]
            if let Some(vao) = self.vao {
                gl.bind_vertex_array(Some(vao));
            }

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(self.vbo));
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(self.ebo));
            gl.enable_vertex_attrib_array(self.shaders.position_location);
            gl.enable_vertex_attrib_array(self.shaders.uv_location);
            gl.enable_vertex_attrib_array(self.shaders.color_location);

            let stride = size_of::<DrawVert>() as i32;
            gl.vertex_attrib_pointer_f32(
                self.shaders.position_location,
                2,
                glow::FLOAT,
                false,
                stride,
                memoffset::offset_of!(DrawVert, pos) as i32,
            );
            gl.vertex_attrib_pointer_f32(
                self.shaders.uv_location,
                2,
                glow::FLOAT,
                false,
                stride,
                memoffset::offset_of!(DrawVert, uv) as i32,
            );
            // Packed color read as four normalized bytes
            gl.vertex_attrib_pointer_f32(
                self.shaders.color_location,
                4,
                glow::UNSIGNED_BYTE,
                true,
                stride,
                memoffset::offset_of!(DrawVert, col) as i32,
            );
        }
    }

    fn upload_draw_list(&mut self, draw_list: &DrawList) {
        unsafe {
            self.gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                to_byte_slice(draw_list.vtx_buffer()),
                glow::STREAM_DRAW,
            );
            self.gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                to_byte_slice(draw_list.idx_buffer()),
                glow::STREAM_DRAW,
            );
        }
    }

    fn set_scissor(&mut self, scissor: [i32; 4]) {
        let [x, y, width, height] = scissor;
        unsafe { self.gl.scissor(x, y, width, height) };
    }

    fn draw_elements(&mut self, texture_id: TextureId, count: usize, idx_offset: usize, vtx_offset: usize) {
        let texture = std::num::NonZeroU32::new(texture_id.id() as u32).map(glow::NativeTexture);
        let byte_offset = (idx_offset * size_of::<DrawIdx>()) as i32;
        unsafe {
            self.gl.bind_texture(glow::TEXTURE_2D, texture);
            if self.vertex_offset_support() {
                self.gl.draw_elements_base_vertex(
                    glow::TRIANGLES,
                    count as i32,
                    glow::UNSIGNED_SHORT,
                    byte_offset,
                    vtx_offset as i32,
                );
            } else {
                self.gl
                    .draw_elements(glow::TRIANGLES, count as i32, glow::UNSIGNED_SHORT, byte_offset);
            }
        }
    }
}

impl Drop for GlowRenderTarget {
    fn drop(&mut self) {
        let gl = &self.gl;
        self.shaders.destroy(gl);
        unsafe {
            gl.delete_buffer(self.vbo);
            gl.delete_buffer(self.ebo);
            #[cfg(feature = "bind_vertex_array_support")]
            if let Some(vao) = self.vao {
                gl.delete_vertex_array(vao);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_vert_attribute_offsets() {
        assert_eq!(memoffset::offset_of!(DrawVert, pos), 0);
        assert_eq!(memoffset::offset_of!(DrawVert, uv), 8);
        assert_eq!(memoffset::offset_of!(DrawVert, col), 16);
    }

    #[test]
    fn test_byte_slice_covers_whole_buffer() {
        let indices: [DrawIdx; 3] = [0, 1, 2];
        assert_eq!(to_byte_slice(&indices).len(), 6);
    }
}
