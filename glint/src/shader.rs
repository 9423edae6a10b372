use crate::error::{GlintError, Result};
use glow::HasContext;
use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// A vertex/fragment source pair, read up front so both stages load or fail
/// together.
#[derive(Debug, Clone)]
pub struct ShaderSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        ShaderSource {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Read both stages from disk. Paths are resolved relative to the working
    /// directory like any other file argument.
    pub fn from_paths(vertex: impl AsRef<Path>, fragment: impl AsRef<Path>) -> Result<Self> {
        let read = |path: &Path| {
            fs::read_to_string(path).map_err(|err| GlintError::SourceIo(path.to_path_buf(), err))
        };
        Ok(ShaderSource {
            vertex: read(vertex.as_ref())?,
            fragment: read(fragment.as_ref())?,
        })
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_type(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Values accepted by [`ShaderProgram::set_uniform`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Int(i32),
    Vec3([f32; 3]),
    Vec4([f32; 4]),
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::Int(value)
    }
}

impl From<[f32; 3]> for UniformValue {
    fn from(value: [f32; 3]) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<[f32; 4]> for UniformValue {
    fn from(value: [f32; 4]) -> Self {
        UniformValue::Vec4(value)
    }
}

/// A linked vertex/fragment program.
///
/// Only successfully linked programs exist. Compile and link diagnostics come
/// back through [`GlintError`] with the full driver info log; stage objects
/// are deleted as soon as the link resolves.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    program: glow::Program,
    locations: RefCell<FxHashMap<String, glow::UniformLocation>>,
}

impl ShaderProgram {
    pub fn build(gl: &Arc<glow::Context>, source: &ShaderSource) -> Result<Self> {
        let vertex = compile_stage(gl, ShaderStage::Vertex, &source.vertex)?;
        let fragment = match compile_stage(gl, ShaderStage::Fragment, &source.fragment) {
            Ok(fragment) => fragment,
            Err(err) => {
                unsafe { gl.delete_shader(vertex) };
                return Err(err);
            }
        };

        unsafe {
            let program = gl.create_program().map_err(GlintError::Allocation)?;
            gl.attach_shader(program, vertex);
            gl.attach_shader(program, fragment);
            gl.link_program(program);

            let linked = gl.get_program_link_status(program);
            let log = gl.get_program_info_log(program);

            gl.detach_shader(program, vertex);
            gl.detach_shader(program, fragment);
            gl.delete_shader(vertex);
            gl.delete_shader(fragment);

            if !linked {
                gl.delete_program(program);
                return Err(GlintError::ProgramLink(log));
            }

            Ok(ShaderProgram {
                gl: Arc::clone(gl),
                program,
                locations: RefCell::new(FxHashMap::default()),
            })
        }
    }

    /// Make this program current for subsequent draw calls.
    pub fn activate(&self) {
        unsafe { self.gl.use_program(Some(self.program)) }
    }

    /// Write a uniform by name. The location is resolved once and cached.
    ///
    /// The program must be active. A name the linked program does not expose
    /// (including one the compiler stripped as unused) is an error, so a
    /// misspelled uniform cannot silently write to nothing.
    pub fn set_uniform(&self, name: &str, value: impl Into<UniformValue>) -> Result<()> {
        let location = {
            let mut locations = self.locations.borrow_mut();
            match locations.get(name) {
                Some(location) => location.clone(),
                None => {
                    let location = unsafe {
                        self.gl.get_uniform_location(self.program, name)
                    }
                    .ok_or_else(|| GlintError::UnknownUniform(name.into()))?;
                    locations.insert(name.into(), location.clone());
                    location
                }
            }
        };

        unsafe {
            match value.into() {
                UniformValue::Float(v) => self.gl.uniform_1_f32(Some(&location), v),
                UniformValue::Int(v) => self.gl.uniform_1_i32(Some(&location), v),
                UniformValue::Vec3([x, y, z]) => self.gl.uniform_3_f32(Some(&location), x, y, z),
                UniformValue::Vec4([x, y, z, w]) => {
                    self.gl.uniform_4_f32(Some(&location), x, y, z, w)
                }
            }
        }
        Ok(())
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe { self.gl.delete_program(self.program) }
    }
}

fn compile_stage(gl: &glow::Context, stage: ShaderStage, source: &str) -> Result<glow::Shader> {
    unsafe {
        let shader = gl
            .create_shader(stage.gl_type())
            .map_err(GlintError::Allocation)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);
        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(GlintError::ShaderCompile { stage, log });
        }
        Ok(shader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_values_convert_from_scene_types() {
        assert_eq!(UniformValue::from(1.0f32), UniformValue::Float(1.0));
        assert_eq!(UniformValue::from(0i32), UniformValue::Int(0));
        assert_eq!(
            UniformValue::from([0.2f32, 0.3, 0.3]),
            UniformValue::Vec3([0.2, 0.3, 0.3])
        );
        assert_eq!(
            UniformValue::from([0.2f32, 0.3, 0.3, 1.0]),
            UniformValue::Vec4([0.2, 0.3, 0.3, 1.0])
        );
    }

    #[test]
    fn stages_display_by_name() {
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
        assert_eq!(ShaderStage::Fragment.to_string(), "fragment");
    }

    #[test]
    fn missing_source_file_reports_the_path() {
        let missing = Path::new("no/such/dir/scene.vert");
        let err = ShaderSource::from_paths(missing, "no/such/dir/scene.frag").unwrap_err();
        match err {
            GlintError::SourceIo(path, _) => assert_eq!(path, missing),
            other => panic!("expected SourceIo, got {other:?}"),
        }
    }
}
