//! The hello-triangle scene: one program, one three-vertex buffer, one draw call.

use std::rc::Rc;

use crate::abs::{
    Extent, Gpu, Mesh, Shader, ShaderProgram, ShaderStage, Surface, VertexLayout,
    resize_to_display_size,
};
use crate::error::Error;

/// Three 2D points in clip space.
pub const POSITIONS: [f32; 6] = [
    0.0, 0.0, //
    0.0, 0.5, //
    0.7, 0.0, //
];

pub const POSITION_COMPONENTS: i32 = 2;
pub const POSITION_ATTRIBUTE: &str = "a_position";

/// Transparent black.
pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// GLSL flavour the shader sources are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// `#version 300 es`, for WebGL2.
    WebGl2,
    /// `#version 330 core`, for desktop OpenGL 3.3.
    Core33,
}

impl Dialect {
    /// The dialect of the context this binary creates.
    pub const fn for_target() -> Self {
        if cfg!(target_arch = "wasm32") {
            Dialect::WebGl2
        } else {
            Dialect::Core33
        }
    }

    pub fn vertex_source(self) -> &'static str {
        match self {
            Dialect::WebGl2 => include_str!("shaders/triangle/vert.glsl"),
            Dialect::Core33 => include_str!("shaders/triangle/vert_core.glsl"),
        }
    }

    pub fn fragment_source(self) -> &'static str {
        match self {
            Dialect::WebGl2 => include_str!("shaders/triangle/frag.glsl"),
            Dialect::Core33 => include_str!("shaders/triangle/frag_core.glsl"),
        }
    }
}

/// GPU objects for the triangle. They live as long as this value.
pub struct HelloTriangle<G: Gpu> {
    gl: Rc<G>,
    program: ShaderProgram<G>,
    mesh: Mesh<G>,
}

impl<G: Gpu> HelloTriangle<G> {
    /// Compiles and links the program and uploads [`POSITIONS`].
    pub fn new(gl: &Rc<G>, dialect: Dialect) -> Result<Self, Error> {
        let vert = Shader::new(gl, ShaderStage::Vertex, dialect.vertex_source())?;
        let frag = Shader::new(gl, ShaderStage::Fragment, dialect.fragment_source())?;
        let program = ShaderProgram::new(gl, &[&vert, &frag])?;

        let location = program.attrib_location(POSITION_ATTRIBUTE)?;
        let mesh = Mesh::new(
            gl,
            &POSITIONS,
            VertexLayout::new(location, POSITION_COMPONENTS),
            glow::TRIANGLES,
        )?;

        Ok(Self {
            gl: Rc::clone(gl),
            program,
            mesh,
        })
    }

    /// Sizes `surface` to its display size, clears it and draws the triangle.
    ///
    /// Returns the viewport extent.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, pixel_ratio: f64) -> Extent {
        resize_to_display_size(surface, pixel_ratio);
        let extent = surface.drawing_size();

        let (width, height) = extent.viewport_size();
        self.gl.viewport(0, 0, width, height);

        let [r, g, b, a] = CLEAR_COLOR;
        self.gl.clear_color(r, g, b, a);
        self.gl.clear(glow::COLOR_BUFFER_BIT);

        self.program.use_program();
        self.mesh.draw();

        extent
    }
}
