//! OpenGL version detection and the matching GLSL dialect

use glow::{Context, HasContext};

/// OpenGL version of the target's context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlVersion {
    pub major: u32,
    pub minor: u32,
    pub is_es: bool,
}

impl GlVersion {
    /// Read the OpenGL version from the current context
    pub fn read(gl: &Context) -> Self {
        let version_string = unsafe { gl.get_parameter_string(glow::VERSION) };
        Self::parse(&version_string)
    }

    /// Parse a `GL_VERSION` string
    ///
    /// Desktop strings start with the number ("4.6.0 NVIDIA 460.89"), ES and
    /// WebGL strings carry a prefix ("OpenGL ES 3.0 ...", "WebGL 2.0 ...").
    pub fn parse(version_string: &str) -> Self {
        let is_es = version_string.contains("OpenGL ES") || version_string.contains("WebGL");
        let parsed = Self::first_number_pair(version_string);

        let (major, minor) = if version_string.contains("WebGL 2.0") {
            (3, 0)
        } else if version_string.contains("WebGL 1.0") {
            (2, 0)
        } else if is_es {
            parsed.unwrap_or((2, 0))
        } else {
            parsed.unwrap_or((2, 1))
        };

        Self {
            major,
            minor,
            is_es,
        }
    }

    fn first_number_pair(version_string: &str) -> Option<(u32, u32)> {
        version_string.split_whitespace().find_map(|word| {
            let mut parts = word.split('.');
            let major = parts.next()?.parse().ok()?;
            let minor = parts.next()?.parse().ok()?;
            Some((major, minor))
        })
    }

    fn at_least(self, major: u32, minor: u32) -> bool {
        (self.major, self.minor) >= (major, minor)
    }

    /// Vertex array objects (GL 3.0+, ES 3.0+)
    pub fn bind_vertex_array_support(self) -> bool {
        self.major >= 3
    }

    /// `glDrawElementsBaseVertex` (GL 3.2+, not on ES)
    pub fn vertex_offset_support(self) -> bool {
        !self.is_es && self.at_least(3, 2)
    }

    /// `glPolygonMode` (desktop only)
    pub fn polygon_mode_support(self) -> bool {
        !self.is_es
    }

    /// `#version` line for the shaders
    pub fn glsl_header(self) -> &'static str {
        if self.is_es {
            return if self.major >= 3 {
                "#version 300 es"
            } else {
                "#version 100"
            };
        }
        match (self.major, self.minor) {
            (4, 1..) | (5.., _) => "#version 410 core",
            (3, 3..) | (4, 0) => "#version 330 core",
            (3, 2) => "#version 150",
            (3, _) => "#version 130",
            _ => "#version 120",
        }
    }

    /// GLSL without `in`/`out` qualifiers (120 and ES 100)
    pub fn legacy_glsl(self) -> bool {
        self.major < 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_desktop_version() {
        let version = GlVersion::parse("4.6.0 NVIDIA 460.89");
        assert_eq!(
            version,
            GlVersion {
                major: 4,
                minor: 6,
                is_es: false
            }
        );
        assert!(version.vertex_offset_support());
        assert_eq!(version.glsl_header(), "#version 410 core");
    }

    #[test]
    fn test_parse_es_and_webgl() {
        let es = GlVersion::parse("OpenGL ES 3.2 Mesa 23.0");
        assert_eq!((es.major, es.minor, es.is_es), (3, 2, true));
        assert!(!es.vertex_offset_support());
        assert!(!es.polygon_mode_support());
        assert_eq!(es.glsl_header(), "#version 300 es");

        let webgl = GlVersion::parse("WebGL 1.0 (OpenGL ES 2.0 Chromium)");
        assert_eq!((webgl.major, webgl.minor), (2, 0));
        assert!(webgl.legacy_glsl());
    }

    #[test]
    fn test_unparseable_version_falls_back_to_gl_21() {
        let version = GlVersion::parse("garbage");
        assert_eq!((version.major, version.minor, version.is_es), (2, 1, false));
        assert_eq!(version.glsl_header(), "#version 120");
        assert!(!version.bind_vertex_array_support());
    }
}
