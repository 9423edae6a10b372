use anyhow::Context;
use clap::{Parser, ValueEnum};
use glint::{ErrorPolicy, WindowContext, WindowOptions};
use std::path::PathBuf;

mod scenes;

const WINDOW_TITLE: &str = "glint";

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// The scene to render.
    #[arg(value_enum)]
    scene: SceneKind,
    /// Window width in pixels.
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Window height in pixels.
    #[arg(long, default_value_t = 600)]
    height: u32,
    /// Directory holding the GLSL sources.
    #[arg(long, default_value = "shaders")]
    shader_dir: PathBuf,
    /// Image sampled by the textured scene.
    #[arg(long, default_value = "assets/checker.png")]
    texture: PathBuf,
    /// Render this many frames and exit instead of waiting for close.
    #[arg(long)]
    frames: Option<u64>,
    /// Write the first rendered frame to this path as PNG.
    #[arg(long)]
    capture: Option<PathBuf>,
    /// Stop on the first GL error instead of logging it.
    #[arg(long)]
    strict: bool,
}

#[derive(ValueEnum, Copy, Clone, Debug)]
pub enum SceneKind {
    /// Direct draw of three vertices colored by attribute.
    VertexColor,
    /// Indexed quad colored by a time-varying uniform.
    UniformPulse,
    /// Indexed quad sampling a 2D texture.
    Textured,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let options = WindowOptions {
        width: args.width,
        height: args.height,
        title: String::from(WINDOW_TITLE),
        ..WindowOptions::default()
    };
    let mut ctx = WindowContext::new(&options).context("window bootstrap failed")?;

    let mut scene = scenes::build(&ctx, args.scene, &args.shader_dir, &args.texture)
        .context("scene setup failed")?;

    let policy = if args.strict {
        ErrorPolicy::FailFast
    } else {
        ErrorPolicy::LogAndContinue
    };

    if let Some(path) = &args.capture {
        glint::draw_frame(&mut ctx, scene.as_mut(), policy)?;
        let (width, height) = ctx.framebuffer_size();
        let frame = glint::capture_frame(&ctx.gl, width as u32, height as u32);
        frame
            .save(path)
            .with_context(|| format!("could not write capture to {}", path.display()))?;
        log::info!("wrote first frame to {}", path.display());
        ctx.present();
    }

    match args.frames {
        Some(frames) => {
            for _ in 0..frames {
                ctx.pump_events();
                glint::render_frame(&mut ctx, scene.as_mut(), policy)?;
            }
            Ok(())
        }
        None => Ok(glint::run(&mut ctx, scene.as_mut(), policy)?),
    }
}
