//! Shader program drawing GUI vertices

use glow::{Context, HasContext};

use super::{GlProgram, GlUniformLocation, GlVersion, GlowError, GlowResult};

/// Linked program plus the locations the render state needs
pub struct Shaders {
    pub program: GlProgram,
    pub tex_location: Option<GlUniformLocation>,
    pub proj_mtx_location: Option<GlUniformLocation>,
    pub position_location: u32,
    pub uv_location: u32,
    pub color_location: u32,
}

impl Shaders {
    /// Compile and link the program for the context's GLSL dialect
    pub fn new(gl: &Context, gl_version: GlVersion) -> GlowResult<Self> {
        let vertex_source = vertex_shader_source(gl_version);
        let fragment_source = fragment_shader_source(gl_version);

        unsafe {
            let vertex_shader = compile(gl, glow::VERTEX_SHADER, &vertex_source, "Vertex")?;
            let fragment_shader =
                match compile(gl, glow::FRAGMENT_SHADER, &fragment_source, "Fragment") {
                    Ok(shader) => shader,
                    Err(err) => {
                        gl.delete_shader(vertex_shader);
                        return Err(err);
                    }
                };

            let program = gl.create_program().map_err(GlowError::CreateShader)?;
            gl.attach_shader(program, vertex_shader);
            gl.attach_shader(program, fragment_shader);
            gl.link_program(program);
            let linked = gl.get_program_link_status(program);

            gl.detach_shader(program, vertex_shader);
            gl.detach_shader(program, fragment_shader);
            gl.delete_shader(vertex_shader);
            gl.delete_shader(fragment_shader);

            if !linked {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(GlowError::LinkProgram(log));
            }

            let attribute = |name: &'static str| {
                gl.get_attrib_location(program, name)
                    .ok_or(GlowError::MissingAttribute(name))
            };
            let located = (attribute("Position"), attribute("UV"), attribute("Color"));
            let (position_location, uv_location, color_location) = match located {
                (Ok(position), Ok(uv), Ok(color)) => (position, uv, color),
                (Err(err), _, _) | (_, Err(err), _) | (_, _, Err(err)) => {
                    gl.delete_program(program);
                    return Err(err);
                }
            };

            Ok(Self {
                program,
                tex_location: gl.get_uniform_location(program, "Texture"),
                proj_mtx_location: gl.get_uniform_location(program, "ProjMtx"),
                position_location,
                uv_location,
                color_location,
            })
        }
    }

    pub fn destroy(&self, gl: &Context) {
        unsafe { gl.delete_program(self.program) };
    }
}

unsafe fn compile(
    gl: &Context,
    shader_type: u32,
    source: &str,
    stage: &str,
) -> GlowResult<<Context as HasContext>::Shader> {
    unsafe {
        let shader = gl.create_shader(shader_type).map_err(GlowError::CreateShader)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if gl.get_shader_compile_status(shader) {
            Ok(shader)
        } else {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            Err(GlowError::CompileShader(format!("{stage} shader: {log}")))
        }
    }
}

fn precision(gl_version: GlVersion) -> &'static str {
    if gl_version.is_es {
        "precision mediump float;"
    } else {
        ""
    }
}

fn vertex_shader_source(gl_version: GlVersion) -> String {
    let (input, output) = if gl_version.legacy_glsl() {
        ("attribute", "varying")
    } else {
        ("in", "out")
    };
    format!(
        r#"{version}
{precision}
uniform mat4 ProjMtx;
{input} vec2 Position;
{input} vec2 UV;
{input} vec4 Color;
{output} vec2 Frag_UV;
{output} vec4 Frag_Color;

void main()
{{
    Frag_UV = UV;
    Frag_Color = Color;
    gl_Position = ProjMtx * vec4(Position.xy, 0, 1);
}}
"#,
        version = gl_version.glsl_header(),
        precision = precision(gl_version),
    )
}

fn fragment_shader_source(gl_version: GlVersion) -> String {
    let version = gl_version.glsl_header();
    let precision = precision(gl_version);
    if gl_version.legacy_glsl() {
        format!(
            r#"{version}
{precision}
uniform sampler2D Texture;
varying vec2 Frag_UV;
varying vec4 Frag_Color;

void main()
{{
    gl_FragColor = Frag_Color * texture2D(Texture, Frag_UV.st);
}}
"#
        )
    } else {
        format!(
            r#"{version}
{precision}
uniform sampler2D Texture;
in vec2 Frag_UV;
in vec4 Frag_Color;
out vec4 Out_Color;

void main()
{{
    Out_Color = Frag_Color * texture(Texture, Frag_UV.st);
}}
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_sources_use_attribute_qualifiers() {
        let version = GlVersion::parse("2.1 Mesa");
        let vertex = vertex_shader_source(version);
        assert!(vertex.starts_with("#version 120"));
        assert!(vertex.contains("attribute vec2 Position;"));
        assert!(fragment_shader_source(version).contains("gl_FragColor"));
    }

    #[test]
    fn test_es3_sources_declare_precision() {
        let version = GlVersion::parse("OpenGL ES 3.0");
        let fragment = fragment_shader_source(version);
        assert!(fragment.starts_with("#version 300 es"));
        assert!(fragment.contains("precision mediump float;"));
        assert!(fragment.contains("out vec4 Out_Color;"));
        assert!(vertex_shader_source(version).contains("in vec4 Color;"));
    }
}
