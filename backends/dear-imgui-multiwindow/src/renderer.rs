//! Draw-list replay against a render target
//!
//! [`render_draw_data`] saves the target's state, draws every command with the
//! GUI render state and restores the saved state, so the target ends up
//! exactly as the caller left it.

use tracing::trace;

use crate::draw::{DrawCmd, DrawData, DrawList, TextureId};

/// Graphics API surface the replay draws through
pub trait RenderTarget {
    /// Snapshot of every piece of state [`set_up_render_state`](Self::set_up_render_state)
    /// and the draw calls may change
    type StateBackup;

    fn backup_state(&mut self) -> Self::StateBackup;

    /// Put back a snapshot, undoing changes in reverse order
    fn restore_state(&mut self, backup: Self::StateBackup);

    /// Blending on; culling, depth and stencil off; scissor on; projection
    /// mapping the display rectangle onto the framebuffer
    fn set_up_render_state(&mut self, draw_data: &DrawData, framebuffer_size: [i32; 2]);

    /// Make the list's vertices and indices the source of the next draws
    fn upload_draw_list(&mut self, draw_list: &DrawList);

    /// `[x, y, width, height]` with a bottom-left origin
    fn set_scissor(&mut self, scissor: [i32; 4]);

    fn draw_elements(&mut self, texture_id: TextureId, count: usize, idx_offset: usize, vtx_offset: usize);
}

/// Project a clip rectangle into framebuffer space
///
/// Returns the scissor box, or `None` when nothing of the rectangle is visible.
pub fn project_clip_rect(
    clip_rect: [f32; 4],
    clip_off: [f32; 2],
    clip_scale: [f32; 2],
    framebuffer_size: [i32; 2],
) -> Option<[i32; 4]> {
    let min_x = (clip_rect[0] - clip_off[0]) * clip_scale[0];
    let min_y = (clip_rect[1] - clip_off[1]) * clip_scale[1];
    let max_x = (clip_rect[2] - clip_off[0]) * clip_scale[0];
    let max_y = (clip_rect[3] - clip_off[1]) * clip_scale[1];

    let [fb_width, fb_height] = framebuffer_size.map(|v| v as f32);
    let visible = min_x < fb_width && min_y < fb_height && max_x >= 0.0 && max_y >= 0.0;
    if !visible || max_x <= min_x || max_y <= min_y {
        return None;
    }

    Some([
        min_x as i32,
        (fb_height - max_y) as i32,
        (max_x - min_x) as i32,
        (max_y - min_y) as i32,
    ])
}

/// Replay a finished frame
pub fn render_draw_data<T: RenderTarget + ?Sized>(target: &mut T, draw_data: &DrawData) {
    if draw_data.draw_lists.is_empty() {
        return;
    }
    let framebuffer_size = draw_data.framebuffer_size();
    if framebuffer_size[0] <= 0 || framebuffer_size[1] <= 0 {
        return;
    }

    trace!(
        "Replaying {} draw lists into {:?}",
        draw_data.draw_lists_count(),
        framebuffer_size
    );

    let backup = target.backup_state();
    target.set_up_render_state(draw_data, framebuffer_size);

    let clip_off = draw_data.display_pos;
    let clip_scale = draw_data.framebuffer_scale;
    for draw_list in draw_data.draw_lists() {
        target.upload_draw_list(draw_list);
        for command in draw_list.commands() {
            match command {
                DrawCmd::Elements { count, cmd_params } => {
                    if let Some(scissor) =
                        project_clip_rect(cmd_params.clip_rect, clip_off, clip_scale, framebuffer_size)
                    {
                        target.set_scissor(scissor);
                        target.draw_elements(
                            cmd_params.texture_id,
                            *count,
                            cmd_params.idx_offset,
                            cmd_params.vtx_offset,
                        );
                    }
                }
                DrawCmd::ResetRenderState => {
                    target.set_up_render_state(draw_data, framebuffer_size);
                }
                DrawCmd::Callback {
                    callback,
                    cmd_params,
                } => callback.call(draw_list, cmd_params),
            }
        }
    }

    target.restore_state(backup);
}
