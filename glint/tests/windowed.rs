//! Behavioral tests that need a real window and a GL 3.3 driver.
//!
//! Run with `cargo test -- --ignored` on a machine with a display server.

use glint::{
    apply_viewport, capture_frame, draw_frame, pulse_color, ErrorPolicy, GlintError, Mesh, Scene,
    ShaderProgram, ShaderSource, Texture2D, VertexAttribute, VertexLayout, WindowContext,
    WindowOptions, CLEAR_COLOR,
};
use glow::HasContext;

const SOLID_VERT: &str = "\
#version 330 core
layout (location = 0) in vec3 position;

void main() {
    gl_Position = vec4(position, 1.0);
}
";

const SOLID_FRAG: &str = "\
#version 330 core
out vec4 frag_color;

uniform vec4 fill_color;

void main() {
    frag_color = fill_color;
}
";

const BROKEN_FRAG: &str = "\
#version 330 core
out vec4 frag_color;

void main() {
    frag_color = not_a_value;
}
";

fn boot() -> anyhow::Result<WindowContext> {
    let options = WindowOptions {
        width: 320,
        height: 240,
        visible: false,
        ..WindowOptions::default()
    };
    Ok(WindowContext::new(&options)?)
}

fn expected_clear() -> [u8; 4] {
    let [r, g, b, a] = CLEAR_COLOR;
    [
        (r * 255.0).round() as u8,
        (g * 255.0).round() as u8,
        (b * 255.0).round() as u8,
        (a * 255.0).round() as u8,
    ]
}

fn close_to(actual: &image::Rgba<u8>, expected: [u8; 4]) -> bool {
    actual
        .0
        .iter()
        .zip(expected)
        .all(|(&a, e)| a.abs_diff(e) <= 1)
}

struct Empty;

impl Scene for Empty {
    fn draw(&mut self, _time: f64) -> glint::Result<()> {
        Ok(())
    }
}

struct SolidQuad {
    program: ShaderProgram,
    mesh: Mesh,
}

impl SolidQuad {
    fn new(ctx: &WindowContext) -> anyhow::Result<Self> {
        let source = ShaderSource::new(SOLID_VERT, SOLID_FRAG);
        let program = ShaderProgram::build(&ctx.gl, &source)?;

        #[rustfmt::skip]
        let vertices: &[f32] = &[
             0.5,  0.5, 0.0,
             0.5, -0.5, 0.0,
            -0.5, -0.5, 0.0,
            -0.5,  0.5, 0.0,
        ];
        let layout = VertexLayout::new(&[VertexAttribute::new(0, 3)]);
        let mesh = Mesh::upload(&ctx.gl, vertices, &layout, Some(&[0, 1, 2, 2, 3, 0]))?;
        Ok(SolidQuad { program, mesh })
    }
}

impl Scene for SolidQuad {
    fn draw(&mut self, time: f64) -> glint::Result<()> {
        self.program.activate();
        self.program.set_uniform("fill_color", pulse_color(time))?;
        self.mesh.draw();
        Ok(())
    }
}

#[test]
#[ignore = "requires a display server and a GL 3.3 driver"]
fn background_matches_clear_color_after_one_iteration() -> anyhow::Result<()> {
    let mut ctx = boot()?;
    draw_frame(&mut ctx, &mut Empty, ErrorPolicy::FailFast)?;

    let (width, height) = ctx.framebuffer_size();
    let frame = capture_frame(&ctx.gl, width as u32, height as u32);
    let expected = expected_clear();
    for corner in [
        frame.get_pixel(0, 0),
        frame.get_pixel(width as u32 - 1, height as u32 - 1),
    ] {
        assert!(close_to(corner, expected), "got {corner:?}");
    }
    Ok(())
}

#[test]
#[ignore = "requires a display server and a GL 3.3 driver"]
fn indexed_quad_covers_the_center_but_not_the_corners() -> anyhow::Result<()> {
    let mut ctx = boot()?;
    let mut scene = SolidQuad::new(&ctx)?;
    assert!(scene.mesh.is_indexed());
    // Two triangles from six indices over four vertices.
    assert_eq!(scene.mesh.draw_count() / 3, 2);

    draw_frame(&mut ctx, &mut scene, ErrorPolicy::FailFast)?;

    let (width, height) = ctx.framebuffer_size();
    let frame = capture_frame(&ctx.gl, width as u32, height as u32);
    let expected = expected_clear();
    let center = frame.get_pixel(width as u32 / 2, height as u32 / 2);
    let corner = frame.get_pixel(0, 0);
    assert!(!close_to(center, expected), "quad did not cover the center");
    assert!(close_to(corner, expected), "quad spilled into the corner");
    Ok(())
}

#[test]
#[ignore = "requires a display server and a GL 3.3 driver"]
fn invalid_fragment_source_reports_a_diagnostic() -> anyhow::Result<()> {
    let ctx = boot()?;
    let source = ShaderSource::new(SOLID_VERT, BROKEN_FRAG);
    match ShaderProgram::build(&ctx.gl, &source) {
        Err(GlintError::ShaderCompile { stage, log }) => {
            assert_eq!(stage.to_string(), "fragment");
            assert!(!log.is_empty(), "driver returned an empty info log");
        }
        Err(other) => panic!("expected a compile error, got {other}"),
        Ok(_) => panic!("broken source produced a usable program"),
    }
    Ok(())
}

#[test]
#[ignore = "requires a display server and a GL 3.3 driver"]
fn resize_resets_the_viewport_from_the_origin() -> anyhow::Result<()> {
    let ctx = boot()?;
    unsafe { ctx.gl.viewport(7, 11, 13, 17) };

    apply_viewport(&ctx.gl, 640, 480);

    let mut viewport = [0i32; 4];
    unsafe { ctx.gl.get_parameter_i32_slice(glow::VIEWPORT, &mut viewport) };
    assert_eq!(viewport, [0, 0, 640, 480]);
    Ok(())
}

#[test]
#[ignore = "requires a display server and a GL 3.3 driver"]
fn texture_upload_and_bind_succeed() -> anyhow::Result<()> {
    let ctx = boot()?;
    // 2x2 checker, tightly packed RGBA8.
    let pixels: &[u8] = &[
        255, 255, 255, 255, 0, 0, 0, 255, //
        0, 0, 0, 255, 255, 255, 255, 255,
    ];
    let texture = Texture2D::from_rgba8(&ctx.gl, 2, 2, pixels)?;
    assert_eq!(texture.size(), (2, 2));
    texture.bind(0);
    Ok(())
}
