//! Draw-command lists produced by the GUI runtime at the end of a frame

use std::fmt;
use std::rc::Rc;

/// Opaque texture identifier carried by draw commands
///
/// Render targets decide what the value means; the glow target stores the
/// OpenGL texture name in it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextureId(u64);

impl TextureId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn id(self) -> u64 {
        self.0
    }
}

impl From<u64> for TextureId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Vertex index type
pub type DrawIdx = u16;

/// One vertex of a draw list
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct DrawVert {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    /// Packed RGBA, one byte per channel, red in the lowest byte
    pub col: u32,
}

/// Parameters shared by element and callback commands
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawCmdParams {
    /// `[min_x, min_y, max_x, max_y]` in display coordinates
    pub clip_rect: [f32; 4],
    pub texture_id: TextureId,
    pub vtx_offset: usize,
    pub idx_offset: usize,
}

/// User render hook embedded in a draw list
#[derive(Clone)]
pub struct DrawCallback(Rc<dyn Fn(&DrawList, &DrawCmdParams)>);

impl DrawCallback {
    pub fn new(callback: impl Fn(&DrawList, &DrawCmdParams) + 'static) -> Self {
        Self(Rc::new(callback))
    }

    pub fn call(&self, draw_list: &DrawList, params: &DrawCmdParams) {
        (self.0)(draw_list, params)
    }
}

impl fmt::Debug for DrawCallback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DrawCallback(..)")
    }
}

/// A single draw command
#[derive(Clone, Debug)]
pub enum DrawCmd {
    /// Draw `count` indices with the given parameters
    Elements {
        count: usize,
        cmd_params: DrawCmdParams,
    },
    /// Re-apply the GUI render state before the next command
    ResetRenderState,
    /// Hand control to user code
    Callback {
        callback: DrawCallback,
        cmd_params: DrawCmdParams,
    },
}

/// Vertex and index buffers plus the commands drawing from them
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub vtx_buffer: Vec<DrawVert>,
    pub idx_buffer: Vec<DrawIdx>,
    pub commands: Vec<DrawCmd>,
}

impl DrawList {
    pub fn vtx_buffer(&self) -> &[DrawVert] {
        &self.vtx_buffer
    }

    pub fn idx_buffer(&self) -> &[DrawIdx] {
        &self.idx_buffer
    }

    pub fn commands(&self) -> impl Iterator<Item = &DrawCmd> {
        self.commands.iter()
    }
}

/// All draw lists of one finished frame
#[derive(Clone, Debug)]
pub struct DrawData {
    /// Top-left of the displayed region, usually `[0, 0]`
    pub display_pos: [f32; 2],
    pub display_size: [f32; 2],
    /// Pixels per display unit, `[1, 1]` unless on a high-DPI surface
    pub framebuffer_scale: [f32; 2],
    pub draw_lists: Vec<DrawList>,
}

impl Default for DrawData {
    fn default() -> Self {
        Self {
            display_pos: [0.0, 0.0],
            display_size: [0.0, 0.0],
            framebuffer_scale: [1.0, 1.0],
            draw_lists: Vec::new(),
        }
    }
}

impl DrawData {
    pub fn draw_lists(&self) -> impl Iterator<Item = &DrawList> {
        self.draw_lists.iter()
    }

    pub fn draw_lists_count(&self) -> usize {
        self.draw_lists.len()
    }

    /// Framebuffer size in whole pixels
    pub fn framebuffer_size(&self) -> [i32; 2] {
        [
            (self.display_size[0] * self.framebuffer_scale[0]) as i32,
            (self.display_size[1] * self.framebuffer_scale[1]) as i32,
        ]
    }

    pub fn total_vtx_count(&self) -> usize {
        self.draw_lists.iter().map(|list| list.vtx_buffer.len()).sum()
    }

    pub fn total_idx_count(&self) -> usize {
        self.draw_lists.iter().map(|list| list.idx_buffer.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::const_assert_eq;

    const_assert_eq!(std::mem::size_of::<DrawVert>(), 20);

    #[test]
    fn test_framebuffer_size_truncates() {
        let draw_data = DrawData {
            display_size: [100.5, 50.0],
            framebuffer_scale: [2.0, 1.5],
            ..Default::default()
        };
        assert_eq!(draw_data.framebuffer_size(), [201, 75]);
    }

    #[test]
    fn test_callback_receives_list_and_params() {
        use std::cell::Cell;

        let seen = Rc::new(Cell::new(0usize));
        let seen_in_callback = Rc::clone(&seen);
        let callback = DrawCallback::new(move |list, params| {
            seen_in_callback.set(list.vtx_buffer.len() + params.idx_offset);
        });
        let list = DrawList {
            vtx_buffer: vec![DrawVert::default(); 3],
            ..Default::default()
        };
        let params = DrawCmdParams {
            clip_rect: [0.0; 4],
            texture_id: TextureId::new(1),
            vtx_offset: 0,
            idx_offset: 4,
        };
        callback.call(&list, &params);
        assert_eq!(seen.get(), 7);
    }
}
