use crate::context::WindowContext;
use crate::error::Result;
use crate::policy::{drain_gl_errors, ErrorPolicy};
use glow::HasContext;
use std::sync::Arc;

/// Fixed background color, RGBA.
pub const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

/// Render-loop state. `Closing` is terminal: once the close flag has been
/// observed, later polls never re-enter `Running`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Closing,
}

impl LoopState {
    pub fn advance(self, close_requested: bool) -> LoopState {
        match self {
            LoopState::Running if close_requested => LoopState::Closing,
            LoopState::Closing => LoopState::Closing,
            state => state,
        }
    }
}

/// Per-variant frame behavior.
///
/// A scene binds whatever it samples, activates its program, writes its
/// per-frame uniforms, and issues one draw call. `time` is seconds since
/// glfw initialization.
pub trait Scene {
    fn draw(&mut self, time: f64) -> Result<()>;
}

/// The time-varying uniform color used by the pulse scene:
/// `red = cos(t)/2 + 0.5`, `green = sin(t)/2 + 0.5`, `blue = sin(t)/2 + 0.5`.
pub fn pulse_color(time: f64) -> [f32; 4] {
    let red = (time.cos() / 2.0 + 0.5) as f32;
    let green = (time.sin() / 2.0 + 0.5) as f32;
    let blue = (time.sin() / 2.0 + 0.5) as f32;
    [red, green, blue, 1.0]
}

/// Run `scene` until the window close flag is set.
///
/// Each running iteration polls input, clears to [`CLEAR_COLOR`], lets the
/// scene draw, drains the GL error queue per `policy`, and presents. There is
/// no frame pacing.
pub fn run(ctx: &mut WindowContext, scene: &mut dyn Scene, policy: ErrorPolicy) -> Result<()> {
    let mut state = LoopState::Running;
    loop {
        ctx.pump_events();
        state = state.advance(ctx.close_requested());
        if state == LoopState::Closing {
            return Ok(());
        }
        render_frame(ctx, scene, policy)?;
    }
}

/// One full iteration: clear, draw, check, present.
pub fn render_frame(
    ctx: &mut WindowContext,
    scene: &mut dyn Scene,
    policy: ErrorPolicy,
) -> Result<()> {
    draw_frame(ctx, scene, policy)?;
    ctx.present();
    Ok(())
}

/// Clear and draw into the back buffer without presenting, leaving the frame
/// readable by [`capture_frame`](crate::capture_frame).
pub fn draw_frame(ctx: &mut WindowContext, scene: &mut dyn Scene, policy: ErrorPolicy) -> Result<()> {
    let gl = Arc::clone(&ctx.gl);
    unsafe {
        gl.clear_color(CLEAR_COLOR[0], CLEAR_COLOR[1], CLEAR_COLOR[2], CLEAR_COLOR[3]);
        gl.clear(glow::COLOR_BUFFER_BIT);
    }
    scene.draw(ctx.time())?;
    drain_gl_errors(&gl, policy, "frame")
}
