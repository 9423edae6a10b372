use crate::error::{GlintError, Result};
use glfw::{
    fail_on_errors, Action, Context, Glfw, GlfwReceiver, Key, OpenGlProfileHint, PWindow,
    SwapInterval, WindowEvent, WindowHint, WindowMode,
};
use glow::HasContext;
use std::sync::Arc;

/// Requested context version. The scenes target 3.3 core and nothing newer.
const GL_VERSION: (u32, u32) = (3, 3);

/// Window parameters fixed at creation time.
#[derive(Debug, Clone)]
pub struct WindowOptions {
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Hidden windows still provide a current context; the test harness uses
    /// this to render without anything appearing on screen.
    pub visible: bool,
    pub vsync: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        WindowOptions {
            width: 800,
            height: 600,
            title: String::from("glint"),
            visible: true,
            vsync: false,
        }
    }
}

/// One window, its event stream, and the GL context loaded through it.
///
/// Owns the only thread-visible GL state in the process; everything else
/// borrows `gl` from here.
pub struct WindowContext {
    glfw: Glfw,
    window: PWindow,
    events: GlfwReceiver<(f64, WindowEvent)>,
    pub gl: Arc<glow::Context>,
}

fn debug_callback(_source: u32, _err_type: u32, _id: u32, _severity: u32, message: &str) {
    log::debug!("[gl] {message:?}");
}

impl WindowContext {
    /// Initialize glfw, create the window, make its context current, and
    /// load the GL entry points through the window's address resolver.
    ///
    /// Fails fatally if the window cannot be created; there is no retry.
    pub fn new(options: &WindowOptions) -> Result<Self> {
        let mut glfw = glfw::init(fail_on_errors!())?;

        let (major, minor) = GL_VERSION;
        glfw.window_hint(WindowHint::ContextVersion(major, minor));
        glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
        glfw.window_hint(WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(WindowHint::Visible(options.visible));

        let (mut window, events) = glfw
            .create_window(
                options.width,
                options.height,
                &options.title,
                WindowMode::Windowed,
            )
            .ok_or(GlintError::WindowCreation)?;

        window.make_current();
        window.set_key_polling(true);
        window.set_framebuffer_size_polling(true);

        if options.vsync {
            glfw.set_swap_interval(SwapInterval::Sync(1));
        }

        let mut gl = unsafe {
            glow::Context::from_loader_function(|proc| window.get_proc_address(proc) as _)
        };

        unsafe {
            if gl.supported_extensions().contains("GL_KHR_debug") {
                gl.enable(glow::DEBUG_OUTPUT);
                gl.debug_message_callback(debug_callback);
            }
        }

        log::info!(
            "created {}x{} window with GL {major}.{minor} core context",
            options.width,
            options.height
        );

        Ok(WindowContext {
            glfw,
            window,
            events,
            gl: Arc::new(gl),
        })
    }

    /// Poll pending OS events. Escape requests close; a framebuffer resize
    /// resets the viewport to the new pixel dimensions.
    pub fn pump_events(&mut self) {
        self.glfw.poll_events();
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                    self.window.set_should_close(true)
                }
                WindowEvent::FramebufferSize(width, height) => {
                    apply_viewport(&self.gl, width, height)
                }
                _ => {}
            }
        }
    }

    pub fn close_requested(&self) -> bool {
        self.window.should_close()
    }

    /// Swap the back and front buffers.
    pub fn present(&mut self) {
        self.window.swap_buffers();
    }

    /// Seconds since glfw initialization.
    pub fn time(&self) -> f64 {
        self.glfw.get_time()
    }

    pub fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }
}

/// Reset the viewport to cover `width` x `height` from the origin, regardless
/// of any prior viewport state.
pub fn apply_viewport(gl: &glow::Context, width: i32, height: i32) {
    unsafe { gl.viewport(0, 0, width, height) }
}
