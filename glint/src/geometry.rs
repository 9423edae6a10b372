use crate::error::{GlintError, Result};
use glow::HasContext;
use std::sync::Arc;

/// One interleaved attribute: the shader input location it feeds and how many
/// `f32` components it spans.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    pub location: u32,
    pub components: u32,
}

impl VertexAttribute {
    pub fn new(location: u32, components: u32) -> Self {
        VertexAttribute {
            location,
            components,
        }
    }
}

/// How interleaved `f32` vertex data maps onto shader inputs.
///
/// Attributes are packed in declaration order with no padding; stride and
/// byte offsets fall out of the component counts. The layout must agree with
/// the attribute locations the vertex stage declares.
#[derive(Debug, Clone)]
pub struct VertexLayout {
    attributes: Vec<VertexAttribute>,
    floats_per_vertex: usize,
}

impl VertexLayout {
    pub fn new(attributes: &[VertexAttribute]) -> Self {
        let floats_per_vertex = attributes
            .iter()
            .map(|attribute| attribute.components as usize)
            .sum();
        VertexLayout {
            attributes: attributes.to_vec(),
            floats_per_vertex,
        }
    }

    pub fn attributes(&self) -> &[VertexAttribute] {
        &self.attributes
    }

    pub fn floats_per_vertex(&self) -> usize {
        self.floats_per_vertex
    }

    pub fn stride_bytes(&self) -> i32 {
        (self.floats_per_vertex * std::mem::size_of::<f32>()) as i32
    }

    /// Number of whole vertices in `data`. Trailing floats that do not fill a
    /// vertex are rejected rather than silently dropped.
    pub fn vertex_count(&self, data: &[f32]) -> Result<u32> {
        if self.floats_per_vertex == 0 || data.len() % self.floats_per_vertex != 0 {
            return Err(GlintError::MisalignedVertexData {
                len: data.len(),
                floats: self.floats_per_vertex,
            });
        }
        Ok((data.len() / self.floats_per_vertex) as u32)
    }
}

/// GPU-resident static geometry: a VAO, a vertex buffer, and optionally an
/// index buffer. Uploaded once, never mutated.
pub struct Mesh {
    gl: Arc<glow::Context>,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    draw_count: i32,
}

impl Mesh {
    /// Copy `vertices` (and `indices`, when drawing indexed) into fresh GPU
    /// buffers and record the attribute bindings in a VAO.
    ///
    /// Every index must reference an uploaded vertex; an out-of-range index
    /// is rejected before anything touches the GPU, since a bad element
    /// buffer otherwise surfaces as silently corrupt rendering.
    pub fn upload(
        gl: &Arc<glow::Context>,
        vertices: &[f32],
        layout: &VertexLayout,
        indices: Option<&[u32]>,
    ) -> Result<Self> {
        let vertex_count = layout.vertex_count(vertices)?;
        if let Some(indices) = indices {
            validate_indices(indices, vertex_count)?;
        }

        unsafe {
            let vao = gl.create_vertex_array().map_err(GlintError::Allocation)?;
            let vbo = gl.create_buffer().map_err(GlintError::Allocation)?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(vertices),
                glow::STATIC_DRAW,
            );

            let stride = layout.stride_bytes();
            let mut offset = 0;
            for attribute in layout.attributes() {
                gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    attribute.components as i32,
                    glow::FLOAT,
                    false,
                    stride,
                    offset,
                );
                gl.enable_vertex_attrib_array(attribute.location);
                offset += (attribute.components as usize * std::mem::size_of::<f32>()) as i32;
            }

            let ebo = match indices {
                Some(indices) => {
                    let ebo = gl.create_buffer().map_err(GlintError::Allocation)?;
                    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                    gl.buffer_data_u8_slice(
                        glow::ELEMENT_ARRAY_BUFFER,
                        bytemuck::cast_slice(indices),
                        glow::STATIC_DRAW,
                    );
                    Some(ebo)
                }
                None => None,
            };

            // The element buffer binding is VAO state; unbind the VAO first
            // so it stays recorded.
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            let draw_count = match indices {
                Some(indices) => indices.len() as i32,
                None => vertex_count as i32,
            };

            Ok(Mesh {
                gl: Arc::clone(gl),
                vao,
                vbo,
                ebo,
                draw_count,
            })
        }
    }

    /// Bind the recorded attribute state and issue exactly one draw call:
    /// indexed when an element buffer was uploaded, direct otherwise.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            match self.ebo {
                Some(_) => {
                    self.gl
                        .draw_elements(glow::TRIANGLES, self.draw_count, glow::UNSIGNED_INT, 0)
                }
                None => self.gl.draw_arrays(glow::TRIANGLES, 0, self.draw_count),
            }
            self.gl.bind_vertex_array(None);
        }
    }

    pub fn is_indexed(&self) -> bool {
        self.ebo.is_some()
    }

    /// Vertices submitted per draw for direct meshes, indices for indexed.
    pub fn draw_count(&self) -> i32 {
        self.draw_count
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_vertex_array(self.vao);
            self.gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                self.gl.delete_buffer(ebo);
            }
        }
    }
}

fn validate_indices(indices: &[u32], vertex_count: u32) -> Result<()> {
    if let Some(&index) = indices.iter().find(|&&index| index >= vertex_count) {
        return Err(GlintError::IndexOutOfRange {
            index,
            vertex_count,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_packs_attributes_in_order() {
        let layout = VertexLayout::new(&[VertexAttribute::new(0, 3), VertexAttribute::new(1, 3)]);
        assert_eq!(layout.floats_per_vertex(), 6);
        assert_eq!(layout.stride_bytes(), 24);
    }

    #[test]
    fn position_uv_layout_has_five_float_stride() {
        let layout = VertexLayout::new(&[VertexAttribute::new(0, 3), VertexAttribute::new(1, 2)]);
        assert_eq!(layout.floats_per_vertex(), 5);
        assert_eq!(layout.stride_bytes(), 20);
    }

    #[test]
    fn vertex_count_rejects_trailing_floats() {
        let layout = VertexLayout::new(&[VertexAttribute::new(0, 3)]);
        assert_eq!(layout.vertex_count(&[0.0; 9]).unwrap(), 3);
        assert!(matches!(
            layout.vertex_count(&[0.0; 10]),
            Err(GlintError::MisalignedVertexData { len: 10, floats: 3 })
        ));
    }

    #[test]
    fn quad_indices_stay_in_bounds() {
        assert!(validate_indices(&[0, 1, 2, 2, 3, 0], 4).is_ok());
    }

    #[test]
    fn index_equal_to_vertex_count_is_rejected() {
        let err = validate_indices(&[0, 1, 2, 2, 3, 4], 4).unwrap_err();
        assert!(matches!(
            err,
            GlintError::IndexOutOfRange {
                index: 4,
                vertex_count: 4
            }
        ));
    }
}
