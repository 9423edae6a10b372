use crate::SceneKind;
use glint::{
    pulse_color, Mesh, Scene, ShaderProgram, ShaderSource, Texture2D, VertexAttribute,
    VertexLayout, WindowContext,
};
use std::path::Path;

/// Texture unit the textured scene samples from.
const SCENE_TEXTURE_UNIT: u32 = 0;

pub fn build(
    ctx: &WindowContext,
    kind: SceneKind,
    shader_dir: &Path,
    texture: &Path,
) -> glint::Result<Box<dyn Scene>> {
    Ok(match kind {
        SceneKind::VertexColor => Box::new(VertexColorScene::new(ctx, shader_dir)?),
        SceneKind::UniformPulse => Box::new(UniformPulseScene::new(ctx, shader_dir)?),
        SceneKind::Textured => Box::new(TexturedScene::new(ctx, shader_dir, texture)?),
    })
}

fn load_program(ctx: &WindowContext, shader_dir: &Path, name: &str) -> glint::Result<ShaderProgram> {
    let source = ShaderSource::from_paths(
        shader_dir.join(format!("{name}.vert")),
        shader_dir.join(format!("{name}.frag")),
    )?;
    ShaderProgram::build(&ctx.gl, &source)
}

/// Direct (non-indexed) draw of three vertices, color fed by attribute.
struct VertexColorScene {
    program: ShaderProgram,
    mesh: Mesh,
}

impl VertexColorScene {
    fn new(ctx: &WindowContext, shader_dir: &Path) -> glint::Result<Self> {
        let program = load_program(ctx, shader_dir, "vertex_color")?;

        // x, y, z, r, g, b
        #[rustfmt::skip]
        let vertices: &[f32] = &[
            0.5, 0.5, 0.0,  1.0, 0.0, 0.0,
            0.5, 0.0, 0.0,  0.0, 1.0, 0.0,
            0.0, 0.0, 0.0,  0.0, 0.0, 1.0,
        ];
        let layout = VertexLayout::new(&[VertexAttribute::new(0, 3), VertexAttribute::new(1, 3)]);
        let mesh = Mesh::upload(&ctx.gl, vertices, &layout, None)?;
        Ok(VertexColorScene { program, mesh })
    }
}

impl Scene for VertexColorScene {
    fn draw(&mut self, _time: f64) -> glint::Result<()> {
        self.program.activate();
        self.mesh.draw();
        Ok(())
    }
}

/// Indexed quad filled with a color that cycles over time.
struct UniformPulseScene {
    program: ShaderProgram,
    mesh: Mesh,
}

impl UniformPulseScene {
    fn new(ctx: &WindowContext, shader_dir: &Path) -> glint::Result<Self> {
        let program = load_program(ctx, shader_dir, "pulse")?;

        #[rustfmt::skip]
        let vertices: &[f32] = &[
             0.5,  0.5, 0.0,
             0.5, -0.5, 0.0,
            -0.5, -0.5, 0.0,
            -0.5,  0.5, 0.0,
        ];
        let layout = VertexLayout::new(&[VertexAttribute::new(0, 3)]);
        let mesh = Mesh::upload(&ctx.gl, vertices, &layout, Some(&[0, 1, 2, 2, 3, 0]))?;
        Ok(UniformPulseScene { program, mesh })
    }
}

impl Scene for UniformPulseScene {
    fn draw(&mut self, time: f64) -> glint::Result<()> {
        self.program.activate();
        self.program.set_uniform("pulse_color", pulse_color(time))?;
        self.mesh.draw();
        Ok(())
    }
}

/// Indexed quad sampling a 2D texture through interpolated UVs.
struct TexturedScene {
    program: ShaderProgram,
    mesh: Mesh,
    texture: Texture2D,
}

impl TexturedScene {
    fn new(ctx: &WindowContext, shader_dir: &Path, texture_path: &Path) -> glint::Result<Self> {
        let program = load_program(ctx, shader_dir, "textured")?;
        let texture = Texture2D::load(&ctx.gl, texture_path)?;

        // The sampler binding never changes; write it once.
        program.activate();
        program.set_uniform("scene_texture", SCENE_TEXTURE_UNIT as i32)?;

        // x, y, z, u, v
        #[rustfmt::skip]
        let vertices: &[f32] = &[
             0.5,  0.5, 0.0,  1.0, 1.0,
             0.5, -0.5, 0.0,  1.0, 0.0,
            -0.5, -0.5, 0.0,  0.0, 0.0,
            -0.5,  0.5, 0.0,  0.0, 1.0,
        ];
        let layout = VertexLayout::new(&[VertexAttribute::new(0, 3), VertexAttribute::new(1, 2)]);
        let mesh = Mesh::upload(&ctx.gl, vertices, &layout, Some(&[0, 1, 2, 2, 3, 0]))?;
        Ok(TexturedScene {
            program,
            mesh,
            texture,
        })
    }
}

impl Scene for TexturedScene {
    fn draw(&mut self, _time: f64) -> glint::Result<()> {
        self.texture.bind(SCENE_TEXTURE_UNIT);
        self.program.activate();
        self.mesh.draw();
        Ok(())
    }
}
