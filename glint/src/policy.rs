use crate::error::{GlintError, Result};
use glow::HasContext;

/// What to do when the GL error queue turns out to be non-empty.
///
/// Replaces the usual debug-build-only assert macro with a choice the caller
/// makes once: production loops log and keep rendering, tests fail fast.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum ErrorPolicy {
    /// Log each pending error and continue.
    #[default]
    LogAndContinue,
    /// Return the first pending error.
    FailFast,
}

/// Drain the GL error queue once.
///
/// Checked once per frame after the draw call and once after each one-shot
/// upload, never per GL call. `context` names the operation being checked.
pub fn drain_gl_errors(
    gl: &glow::Context,
    policy: ErrorPolicy,
    context: &'static str,
) -> Result<()> {
    loop {
        let code = unsafe { gl.get_error() };
        if code == glow::NO_ERROR {
            return Ok(());
        }
        match policy {
            ErrorPolicy::LogAndContinue => log::error!("gl error {code:#06x} during {context}"),
            ErrorPolicy::FailFast => return Err(GlintError::Gl { context, code }),
        }
    }
}
