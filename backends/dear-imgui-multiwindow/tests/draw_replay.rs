//! Draw-list replay against a recording render target

use std::cell::Cell;
use std::rc::Rc;

use dear_imgui_multiwindow::{
    DrawCallback, DrawCmd, DrawCmdParams, DrawData, DrawList, DrawVert, RenderTarget, TextureId,
    render_draw_data,
};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Backup,
    Restore(u32),
    SetUp([i32; 2]),
    Upload { vertices: usize, indices: usize },
    Scissor([i32; 4]),
    Draw {
        texture: u64,
        count: usize,
        idx_offset: usize,
        vtx_offset: usize,
    },
}

#[derive(Default)]
struct RecordingTarget {
    calls: Vec<Call>,
    next_backup: u32,
}

impl RenderTarget for RecordingTarget {
    type StateBackup = u32;

    fn backup_state(&mut self) -> u32 {
        self.calls.push(Call::Backup);
        self.next_backup += 1;
        self.next_backup
    }

    fn restore_state(&mut self, backup: u32) {
        self.calls.push(Call::Restore(backup));
    }

    fn set_up_render_state(&mut self, _draw_data: &DrawData, framebuffer_size: [i32; 2]) {
        self.calls.push(Call::SetUp(framebuffer_size));
    }

    fn upload_draw_list(&mut self, draw_list: &DrawList) {
        self.calls.push(Call::Upload {
            vertices: draw_list.vtx_buffer().len(),
            indices: draw_list.idx_buffer().len(),
        });
    }

    fn set_scissor(&mut self, scissor: [i32; 4]) {
        self.calls.push(Call::Scissor(scissor));
    }

    fn draw_elements(&mut self, texture_id: TextureId, count: usize, idx_offset: usize, vtx_offset: usize) {
        self.calls.push(Call::Draw {
            texture: texture_id.id(),
            count,
            idx_offset,
            vtx_offset,
        });
    }
}

fn params(clip_rect: [f32; 4], texture: u64, idx_offset: usize) -> DrawCmdParams {
    DrawCmdParams {
        clip_rect,
        texture_id: TextureId::new(texture),
        vtx_offset: 0,
        idx_offset,
    }
}

fn quad_list(commands: Vec<DrawCmd>) -> DrawList {
    DrawList {
        vtx_buffer: vec![DrawVert::default(); 4],
        idx_buffer: vec![0, 1, 2, 0, 2, 3],
        commands,
    }
}

fn frame(draw_lists: Vec<DrawList>) -> DrawData {
    DrawData {
        display_size: [200.0, 100.0],
        draw_lists,
        ..DrawData::default()
    }
}

#[test]
fn test_empty_frame_touches_nothing() {
    let mut target = RecordingTarget::default();
    render_draw_data(&mut target, &frame(Vec::new()));
    assert!(target.calls.is_empty());
}

#[test]
fn test_zero_sized_framebuffer_touches_nothing() {
    let mut target = RecordingTarget::default();
    let mut draw_data = frame(vec![quad_list(vec![DrawCmd::Elements {
        count: 6,
        cmd_params: params([0.0, 0.0, 200.0, 100.0], 1, 0),
    }])]);
    draw_data.display_size = [0.0, 100.0];
    render_draw_data(&mut target, &draw_data);
    assert!(target.calls.is_empty());
}

#[test]
fn test_elements_are_scissored_and_state_restored() {
    let mut target = RecordingTarget::default();
    let draw_data = frame(vec![quad_list(vec![
        DrawCmd::Elements {
            count: 3,
            cmd_params: params([0.0, 0.0, 200.0, 100.0], 7, 0),
        },
        // Entirely right of the framebuffer
        DrawCmd::Elements {
            count: 3,
            cmd_params: params([300.0, 0.0, 400.0, 100.0], 7, 3),
        },
        DrawCmd::Elements {
            count: 3,
            cmd_params: params([10.0, 20.0, 60.0, 40.0], 8, 3),
        },
    ])]);

    render_draw_data(&mut target, &draw_data);

    assert_eq!(
        target.calls,
        vec![
            Call::Backup,
            Call::SetUp([200, 100]),
            Call::Upload {
                vertices: 4,
                indices: 6
            },
            Call::Scissor([0, 0, 200, 100]),
            Call::Draw {
                texture: 7,
                count: 3,
                idx_offset: 0,
                vtx_offset: 0
            },
            Call::Scissor([10, 60, 50, 20]),
            Call::Draw {
                texture: 8,
                count: 3,
                idx_offset: 3,
                vtx_offset: 0
            },
            Call::Restore(1),
        ]
    );
}

#[test]
fn test_reset_and_callback_commands() {
    let mut target = RecordingTarget::default();
    let invoked = Rc::new(Cell::new(0));
    let seen = invoked.clone();
    let callback = DrawCallback::new(move |draw_list, cmd_params| {
        assert_eq!(draw_list.idx_buffer().len(), 6);
        assert_eq!(cmd_params.texture_id, TextureId::new(3));
        seen.set(seen.get() + 1);
    });

    let draw_data = frame(vec![
        quad_list(vec![
            DrawCmd::Callback {
                callback,
                cmd_params: params([0.0; 4], 3, 0),
            },
            DrawCmd::ResetRenderState,
        ]),
        quad_list(Vec::new()),
    ]);

    render_draw_data(&mut target, &draw_data);

    assert_eq!(invoked.get(), 1);
    assert_eq!(
        target.calls,
        vec![
            Call::Backup,
            Call::SetUp([200, 100]),
            Call::Upload {
                vertices: 4,
                indices: 6
            },
            Call::SetUp([200, 100]),
            Call::Upload {
                vertices: 4,
                indices: 6
            },
            Call::Restore(1),
        ]
    );
}

#[test]
fn test_framebuffer_scale_applies_to_scissor() {
    let mut target = RecordingTarget::default();
    let mut draw_data = frame(vec![quad_list(vec![DrawCmd::Elements {
        count: 6,
        cmd_params: params([10.0, 10.0, 30.0, 20.0], 1, 0),
    }])]);
    draw_data.framebuffer_scale = [2.0, 2.0];

    render_draw_data(&mut target, &draw_data);

    assert!(target.calls.contains(&Call::SetUp([400, 200])));
    assert!(target.calls.contains(&Call::Scissor([20, 160, 40, 20])));
}
