//! OpenGL state saved around a GUI replay

use std::num::NonZeroU32;

use glow::{Context, HasContext};

use super::{GlBuffer, GlProgram, GlTexture, GlVersion};
#[cfg(feature = "bind_vertex_array_support")]
use super::GlVertexArray;

/// Every piece of GL state the replay touches
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GlStateBackup {
    blend_enabled: bool,
    blend_src_rgb: u32,
    blend_dst_rgb: u32,
    blend_src_alpha: u32,
    blend_dst_alpha: u32,
    blend_equation_rgb: u32,
    blend_equation_alpha: u32,

    viewport: [i32; 4],
    scissor_test_enabled: bool,
    scissor_box: [i32; 4],

    array_buffer_binding: Option<GlBuffer>,
    element_array_buffer_binding: Option<GlBuffer>,
    #[cfg(feature = "bind_vertex_array_support")]
    vertex_array_binding: Option<GlVertexArray>,

    active_texture: u32,
    texture_2d_binding: Option<GlTexture>,
    current_program: Option<GlProgram>,

    cull_face_enabled: bool,
    depth_test_enabled: bool,
    stencil_test_enabled: bool,

    #[cfg(feature = "polygon_mode_support")]
    polygon_mode: [i32; 2],
}

/// Read an object binding; 0 means nothing is bound
unsafe fn binding<T>(gl: &Context, parameter: u32, wrap: fn(NonZeroU32) -> T) -> Option<T> {
    let name = unsafe { gl.get_parameter_i32(parameter) };
    NonZeroU32::new(name as u32).map(wrap)
}

unsafe fn set_capability(gl: &Context, capability: u32, enabled: bool) {
    unsafe {
        if enabled {
            gl.enable(capability);
        } else {
            gl.disable(capability);
        }
    }
}

impl GlStateBackup {
    /// Snapshot the current GL state
    pub fn capture(gl: &Context, gl_version: GlVersion) -> Self {
        let _ = gl_version;
        let mut backup = Self::default();
        unsafe {
            backup.active_texture = gl.get_parameter_i32(glow::ACTIVE_TEXTURE) as u32;
            // The replay binds textures on unit 0
            gl.active_texture(glow::TEXTURE0);
            backup.texture_2d_binding = binding(gl, glow::TEXTURE_BINDING_2D, glow::NativeTexture);
            backup.current_program = binding(gl, glow::CURRENT_PROGRAM, glow::NativeProgram);
            backup.array_buffer_binding = binding(gl, glow::ARRAY_BUFFER_BINDING, glow::NativeBuffer);
            backup.element_array_buffer_binding =
                binding(gl, glow::ELEMENT_ARRAY_BUFFER_BINDING, glow::NativeBuffer);

            #[cfg(feature = "bind_vertex_array_support")]
            if gl_version.bind_vertex_array_support() {
                backup.vertex_array_binding =
                    binding(gl, glow::VERTEX_ARRAY_BINDING, glow::NativeVertexArray);
            }

            #[cfg(feature = "polygon_mode_support")]
            if gl_version.polygon_mode_support() {
                gl.get_parameter_i32_slice(glow::POLYGON_MODE, &mut backup.polygon_mode);
            }

            gl.get_parameter_i32_slice(glow::VIEWPORT, &mut backup.viewport);
            gl.get_parameter_i32_slice(glow::SCISSOR_BOX, &mut backup.scissor_box);

            backup.blend_src_rgb = gl.get_parameter_i32(glow::BLEND_SRC_RGB) as u32;
            backup.blend_dst_rgb = gl.get_parameter_i32(glow::BLEND_DST_RGB) as u32;
            backup.blend_src_alpha = gl.get_parameter_i32(glow::BLEND_SRC_ALPHA) as u32;
            backup.blend_dst_alpha = gl.get_parameter_i32(glow::BLEND_DST_ALPHA) as u32;
            backup.blend_equation_rgb = gl.get_parameter_i32(glow::BLEND_EQUATION_RGB) as u32;
            backup.blend_equation_alpha = gl.get_parameter_i32(glow::BLEND_EQUATION_ALPHA) as u32;

            backup.blend_enabled = gl.is_enabled(glow::BLEND);
            backup.cull_face_enabled = gl.is_enabled(glow::CULL_FACE);
            backup.depth_test_enabled = gl.is_enabled(glow::DEPTH_TEST);
            backup.stencil_test_enabled = gl.is_enabled(glow::STENCIL_TEST);
            backup.scissor_test_enabled = gl.is_enabled(glow::SCISSOR_TEST);
        }
        backup
    }

    /// Put the snapshot back, in the reverse order of [`capture`](Self::capture)
    pub fn restore(&self, gl: &Context, gl_version: GlVersion) {
        let _ = gl_version;
        unsafe {
            set_capability(gl, glow::SCISSOR_TEST, self.scissor_test_enabled);
            set_capability(gl, glow::STENCIL_TEST, self.stencil_test_enabled);
            set_capability(gl, glow::DEPTH_TEST, self.depth_test_enabled);
            set_capability(gl, glow::CULL_FACE, self.cull_face_enabled);
            set_capability(gl, glow::BLEND, self.blend_enabled);

            gl.blend_equation_separate(self.blend_equation_rgb, self.blend_equation_alpha);
            gl.blend_func_separate(
                self.blend_src_rgb,
                self.blend_dst_rgb,
                self.blend_src_alpha,
                self.blend_dst_alpha,
            );

            let [x, y, width, height] = self.scissor_box;
            gl.scissor(x, y, width, height);
            let [x, y, width, height] = self.viewport;
            gl.viewport(x, y, width, height);

            #[cfg(feature = "polygon_mode_support")]
            if gl_version.polygon_mode_support() {
                gl.polygon_mode(glow::FRONT_AND_BACK, self.polygon_mode[0] as u32);
            }

            #[cfg(feature = "bind_vertex_array_support")]
            if gl_version.bind_vertex_array_support() {
                gl.bind_vertex_array(self.vertex_array_binding);
            }

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, self.element_array_buffer_binding);
            gl.bind_buffer(glow::ARRAY_BUFFER, self.array_buffer_binding);
            gl.use_program(self.current_program);
            gl.bind_texture(glow::TEXTURE_2D, self.texture_2d_binding);
            gl.active_texture(self.active_texture);
        }
    }
}
