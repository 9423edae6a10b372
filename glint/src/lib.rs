//! A small OpenGL 3.3 scene runtime.
//!
//! glint wraps the pieces every tutorial-scale GL program repeats: a glfw
//! window owning a core-profile context, a compiled and linked shader
//! program, static vertex geometry, an optional 2D texture, and a
//! clear-then-draw render loop.
//!
//! The object model is explicit. Every GPU resource holds a reference to the
//! [`glow::Context`] it was created on and frees itself on drop, and draw
//! operations take the resources they touch as arguments instead of relying
//! on whatever happens to be bound. Failures surface as [`GlintError`]
//! values rather than messages on stderr; what happens when the GL error
//! queue is non-empty mid-loop is decided once by an [`ErrorPolicy`].
//!
//! ## Usage
//! Bootstrap a [`WindowContext`], upload a [`Mesh`], build a
//! [`ShaderProgram`], then hand a [`Scene`] to [`run`]:
//!
//! ```no_run
//! use glint::{ErrorPolicy, Mesh, Scene, ShaderProgram, ShaderSource};
//! use glint::{VertexAttribute, VertexLayout, WindowContext, WindowOptions};
//!
//! struct Triangle {
//!     program: ShaderProgram,
//!     mesh: Mesh,
//! }
//!
//! impl Scene for Triangle {
//!     fn draw(&mut self, _time: f64) -> glint::Result<()> {
//!         self.program.activate();
//!         self.mesh.draw();
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> glint::Result<()> {
//!     let mut ctx = WindowContext::new(&WindowOptions::default())?;
//!     let source = ShaderSource::from_paths("shaders/tri.vert", "shaders/tri.frag")?;
//!     let program = ShaderProgram::build(&ctx.gl, &source)?;
//!     let layout = VertexLayout::new(&[VertexAttribute::new(0, 3)]);
//!     let mesh = Mesh::upload(&ctx.gl, &[0.0, 0.5, 0.0, -0.5, -0.5, 0.0, 0.5, -0.5, 0.0], &layout, None)?;
//!     glint::run(&mut ctx, &mut Triangle { program, mesh }, ErrorPolicy::LogAndContinue)
//! }
//! ```

mod capture;
mod context;
mod error;
mod frame;
mod geometry;
mod policy;
mod shader;
mod texture;

pub use capture::capture_frame;
pub use context::{apply_viewport, WindowContext, WindowOptions};
pub use error::{GlintError, Result};
pub use frame::{draw_frame, pulse_color, render_frame, run, LoopState, Scene, CLEAR_COLOR};
pub use geometry::{Mesh, VertexAttribute, VertexLayout};
pub use policy::{drain_gl_errors, ErrorPolicy};
pub use shader::{ShaderProgram, ShaderSource, ShaderStage, UniformValue};
pub use texture::Texture2D;
