//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct, a vertex buffer plus the vertex array object
//! that maps it onto one shader input. Vertex data is tightly packed `f32` components laid
//! out as described by a [`VertexLayout`].

use std::rc::Rc;

use crate::abs::Gpu;
use crate::error::Error;

/// How one float attribute is pulled out of the vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    /// Attribute slot in the linked program.
    pub location: u32,
    /// Components per vertex (1 to 4).
    pub components: i32,
    pub normalized: bool,
}

impl VertexLayout {
    pub fn new(location: u32, components: i32) -> Self {
        Self {
            location,
            components,
            normalized: false,
        }
    }

    /// Number of whole vertices in `len` floats.
    fn vertex_count(&self, len: usize) -> Result<i32, Error> {
        let invalid = || Error::Layout {
            components: self.components,
            len,
        };
        let components = match usize::try_from(self.components) {
            Ok(components @ 1..=4) => components,
            _ => return Err(invalid()),
        };
        if len % components != 0 {
            return Err(invalid());
        }
        i32::try_from(len / components).map_err(|_| invalid())
    }

    /// Enables the slot and describes the currently bound `ARRAY_BUFFER` to it.
    ///
    /// Stride 0 means tightly packed; the data starts at offset 0.
    fn vertex_attribs<G: Gpu>(&self, gl: &G) {
        gl.enable_vertex_attrib_array(self.location);
        gl.vertex_attrib_pointer_f32(
            self.location,
            self.components,
            glow::FLOAT,
            self.normalized,
            0,
            0,
        );
    }
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh<G: Gpu> {
    gl: Rc<G>,
    draw_mode: u32,
    vao: G::VertexArray,
    vbo: G::Buffer,
    vertex_count: i32,
}

impl<G: Gpu> Mesh<G> {
    /// Uploads `data` once with `STATIC_DRAW` usage and records its layout in a new vertex
    /// array object.
    ///
    /// Fails with [`Error::Layout`] before touching the GPU if `data` is not a whole number of
    /// vertices.
    pub fn new(
        gl: &Rc<G>,
        data: &[f32],
        layout: VertexLayout,
        draw_mode: u32,
    ) -> Result<Self, Error> {
        let vertex_count = layout.vertex_count(data.len())?;
        let vbo = gl.create_buffer().map_err(Error::Gpu)?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
        gl.buffer_data(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(data),
            glow::STATIC_DRAW,
        );

        let vao = match gl.create_vertex_array() {
            Ok(vao) => vao,
            Err(e) => {
                gl.delete_buffer(vbo);
                return Err(Error::Gpu(e));
            }
        };
        gl.bind_vertex_array(Some(vao));
        layout.vertex_attribs(&**gl);

        gl.bind_vertex_array(None);
        gl.bind_buffer(glow::ARRAY_BUFFER, None);

        log::debug!("uploaded {vertex_count} vertices to buffer {vbo:?}");

        Ok(Self {
            gl: Rc::clone(gl),
            draw_mode,
            vao,
            vbo,
            vertex_count,
        })
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        self.gl.bind_vertex_array(Some(self.vao));
        self.gl.draw_arrays(self.draw_mode, 0, self.vertex_count);
        self.gl.bind_vertex_array(None);
    }
}

impl<G: Gpu> Drop for Mesh<G> {
    fn drop(&mut self) {
        self.gl.delete_buffer(self.vbo);
        self.gl.delete_vertex_array(self.vao);
    }
}
