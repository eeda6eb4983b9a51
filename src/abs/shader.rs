//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for compiling shader
//! stages and linking them into a program. Both log the driver's diagnostic on failure and
//! hand it back as a [`ShaderError`], so a broken stage never reaches the next step.

use std::fmt;
use std::rc::Rc;

use thiserror::Error;

use crate::abs::Gpu;

/// A programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The GL enum passed to `createShader`.
    pub fn gl_enum(self) -> u32 {
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

#[derive(Debug, Error)]
pub enum ShaderError {
    #[error("could not allocate a GPU object: {0}")]
    Create(String),
    #[error("{stage} shader failed to compile: {log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("shader program failed to link: {log}")]
    Link { log: String },
    #[error("attribute `{0}` is not an active input of the program")]
    MissingAttribute(String),
}

/// Represents an individual compiled shader stage.
pub struct Shader<G: Gpu> {
    gl: Rc<G>,
    id: G::Shader,
    stage: ShaderStage,
}

impl<G: Gpu> Shader<G> {
    /// Compiles a new shader from the given source code.
    pub fn new(gl: &Rc<G>, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        let shader = gl.create_shader(stage.gl_enum()).map_err(ShaderError::Create)?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.shader_compile_status(shader) {
            let log = gl.shader_info_log(shader);
            log::error!("{stage} shader compilation failed:\n{log}");
            gl.delete_shader(shader);
            return Err(ShaderError::Compile { stage, log });
        }

        log::debug!("compiled {stage} shader {shader:?}");
        Ok(Self {
            gl: Rc::clone(gl),
            id: shader,
            stage,
        })
    }

    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl<G: Gpu> Drop for Shader<G> {
    fn drop(&mut self) {
        self.gl.delete_shader(self.id);
    }
}

/// Represents a linked shader program.
pub struct ShaderProgram<G: Gpu> {
    gl: Rc<G>,
    id: G::Program,
}

impl<G: Gpu> ShaderProgram<G> {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Rc<G>, shaders: &[&Shader<G>]) -> Result<Self, ShaderError> {
        let program = gl.create_program().map_err(ShaderError::Create)?;

        for shader in shaders {
            gl.attach_shader(program, shader.id);
        }

        gl.link_program(program);

        if !gl.program_link_status(program) {
            let log = gl.program_info_log(program);
            log::error!("shader program link failed:\n{log}");
            gl.delete_program(program);
            return Err(ShaderError::Link { log });
        }

        for shader in shaders {
            gl.detach_shader(program, shader.id);
        }

        log::debug!(
            "linked program {program:?} from stages {:?}",
            shaders.iter().map(|s| s.stage()).collect::<Vec<_>>()
        );
        Ok(Self {
            gl: Rc::clone(gl),
            id: program,
        })
    }

    /// Looks up the binding slot of a vertex input attribute.
    pub fn attrib_location(&self, name: &str) -> Result<u32, ShaderError> {
        self.gl
            .attrib_location(self.id, name)
            .ok_or_else(|| ShaderError::MissingAttribute(name.to_string()))
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        self.gl.use_program(Some(self.id));
    }
}

impl<G: Gpu> Drop for ShaderProgram<G> {
    fn drop(&mut self) {
        self.gl.delete_program(self.id);
    }
}
