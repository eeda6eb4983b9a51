//! A [`Gpu`] that records every call instead of talking to a driver.
//!
//! The fake driver "compiles" a source when it starts with a `#version` line, declares
//! `void main()` and has balanced braces, and "links" a program when a compiled vertex and
//! fragment stage are both attached. Attribute locations are the declaration order of the
//! vertex stage's `in` variables.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::Gpu;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    CreateShader { shader: u32, stage: u32 },
    ShaderSource { shader: u32 },
    CompileShader { shader: u32 },
    DeleteShader { shader: u32 },
    CreateProgram { program: u32 },
    AttachShader { program: u32, shader: u32 },
    DetachShader { program: u32, shader: u32 },
    LinkProgram { program: u32 },
    DeleteProgram { program: u32 },
    UseProgram { program: Option<u32> },
    CreateBuffer { buffer: u32 },
    BindBuffer { target: u32, buffer: Option<u32> },
    BufferData { target: u32, data: Vec<u8>, usage: u32 },
    DeleteBuffer { buffer: u32 },
    CreateVertexArray { vertex_array: u32 },
    BindVertexArray { vertex_array: Option<u32> },
    DeleteVertexArray { vertex_array: u32 },
    EnableVertexAttribArray { index: u32 },
    VertexAttribPointer {
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    },
    Viewport { x: i32, y: i32, width: i32, height: i32 },
    ClearColor { color: [f32; 4] },
    Clear { mask: u32 },
    DrawArrays { mode: u32, first: i32, count: i32 },
}

#[derive(Debug, Default)]
struct FakeShader {
    stage: u32,
    source: String,
    log: Option<String>,
    compiled: bool,
}

#[derive(Debug, Default)]
struct FakeProgram {
    attached: Vec<u32>,
    attributes: Vec<String>,
    log: String,
    linked: bool,
}

#[derive(Debug, Default)]
pub struct RecordingGpu {
    next_id: Cell<u32>,
    refuse_allocation: Cell<bool>,
    calls: RefCell<Vec<Call>>,
    shaders: RefCell<HashMap<u32, FakeShader>>,
    programs: RefCell<HashMap<u32, FakeProgram>>,
    bound_array_buffer: Cell<Option<u32>>,
    buffers: RefCell<HashMap<u32, Vec<u8>>>,
}

impl RecordingGpu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `create_*` call fail, as a lost context would.
    pub fn refuse_allocation(&self) {
        self.refuse_allocation.set(true);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    /// Current contents of a buffer object, decoded as `f32`s.
    pub fn buffer_f32s(&self, buffer: u32) -> Option<Vec<f32>> {
        self.buffers.borrow().get(&buffer).map(|bytes| {
            bytes
                .chunks_exact(4)
                .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                .collect()
        })
    }

    pub fn deleted_shaders(&self) -> Vec<u32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::DeleteShader { shader } => Some(*shader),
                _ => None,
            })
            .collect()
    }

    pub fn deleted_programs(&self) -> Vec<u32> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                Call::DeleteProgram { program } => Some(*program),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn allocate(&self, what: &str) -> Result<u32, String> {
        if self.refuse_allocation.get() {
            return Err(format!("context lost while creating {what}"));
        }
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        Ok(id)
    }
}

fn compile_error(source: &str) -> Option<String> {
    if !source.trim_start().starts_with("#version") {
        return Some("ERROR: 0:1: '' : missing #version directive".to_string());
    }
    if !source.contains("void main()") {
        return Some("ERROR: 0:1: 'main' : function not defined".to_string());
    }
    let opened = source.matches('{').count();
    let closed = source.matches('}').count();
    if opened != closed {
        return Some("ERROR: 0:?: '' : syntax error: unbalanced braces".to_string());
    }
    None
}

fn input_attributes(source: &str) -> Vec<String> {
    source
        .lines()
        .filter_map(|line| {
            let line = line.trim().strip_prefix("in ")?;
            let name = line.split_whitespace().nth(1)?;
            Some(name.trim_end_matches(';').to_string())
        })
        .collect()
}

impl Gpu for RecordingGpu {
    type Shader = u32;
    type Program = u32;
    type Buffer = u32;
    type VertexArray = u32;

    fn create_shader(&self, stage: u32) -> Result<u32, String> {
        let shader = self.allocate("shader")?;
        self.shaders.borrow_mut().insert(
            shader,
            FakeShader {
                stage,
                ..FakeShader::default()
            },
        );
        self.record(Call::CreateShader { shader, stage });
        Ok(shader)
    }

    fn shader_source(&self, shader: u32, source: &str) {
        if let Some(s) = self.shaders.borrow_mut().get_mut(&shader) {
            s.source = source.to_string();
        }
        self.record(Call::ShaderSource { shader });
    }

    fn compile_shader(&self, shader: u32) {
        if let Some(s) = self.shaders.borrow_mut().get_mut(&shader) {
            s.log = compile_error(&s.source);
            s.compiled = s.log.is_none();
        }
        self.record(Call::CompileShader { shader });
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.shaders
            .borrow()
            .get(&shader)
            .is_some_and(|s| s.compiled)
    }

    fn shader_info_log(&self, shader: u32) -> String {
        self.shaders
            .borrow()
            .get(&shader)
            .and_then(|s| s.log.clone())
            .unwrap_or_default()
    }

    fn delete_shader(&self, shader: u32) {
        self.record(Call::DeleteShader { shader });
    }

    fn create_program(&self) -> Result<u32, String> {
        let program = self.allocate("program")?;
        self.programs
            .borrow_mut()
            .insert(program, FakeProgram::default());
        self.record(Call::CreateProgram { program });
        Ok(program)
    }

    fn attach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.programs.borrow_mut().get_mut(&program) {
            p.attached.push(shader);
        }
        self.record(Call::AttachShader { program, shader });
    }

    fn detach_shader(&self, program: u32, shader: u32) {
        if let Some(p) = self.programs.borrow_mut().get_mut(&program) {
            p.attached.retain(|&s| s != shader);
        }
        self.record(Call::DetachShader { program, shader });
    }

    fn link_program(&self, program: u32) {
        let shaders = self.shaders.borrow();
        if let Some(p) = self.programs.borrow_mut().get_mut(&program) {
            let compiled: Vec<&FakeShader> = p
                .attached
                .iter()
                .filter_map(|id| shaders.get(id))
                .filter(|s| s.compiled)
                .collect();
            let attributes = compiled
                .iter()
                .find(|s| s.stage == glow::VERTEX_SHADER)
                .map(|s| input_attributes(&s.source));
            let has_fragment = compiled.iter().any(|s| s.stage == glow::FRAGMENT_SHADER);
            match (attributes, has_fragment) {
                (Some(attributes), true) => {
                    p.attributes = attributes;
                    p.linked = true;
                    p.log.clear();
                }
                _ => {
                    p.linked = false;
                    p.log = "error: program requires a compiled vertex and fragment stage"
                        .to_string();
                }
            }
        }
        self.record(Call::LinkProgram { program });
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.programs
            .borrow()
            .get(&program)
            .is_some_and(|p| p.linked)
    }

    fn program_info_log(&self, program: u32) -> String {
        self.programs
            .borrow()
            .get(&program)
            .map(|p| p.log.clone())
            .unwrap_or_default()
    }

    fn delete_program(&self, program: u32) {
        self.record(Call::DeleteProgram { program });
    }

    fn use_program(&self, program: Option<u32>) {
        self.record(Call::UseProgram { program });
    }

    fn attrib_location(&self, program: u32, name: &str) -> Option<u32> {
        let programs = self.programs.borrow();
        let p = programs.get(&program).filter(|p| p.linked)?;
        p.attributes
            .iter()
            .position(|a| a == name)
            .map(|i| i as u32)
    }

    fn create_buffer(&self) -> Result<u32, String> {
        let buffer = self.allocate("buffer")?;
        self.buffers.borrow_mut().insert(buffer, Vec::new());
        self.record(Call::CreateBuffer { buffer });
        Ok(buffer)
    }

    fn bind_buffer(&self, target: u32, buffer: Option<u32>) {
        if target == glow::ARRAY_BUFFER {
            self.bound_array_buffer.set(buffer);
        }
        self.record(Call::BindBuffer { target, buffer });
    }

    fn buffer_data(&self, target: u32, data: &[u8], usage: u32) {
        if target == glow::ARRAY_BUFFER {
            if let Some(bound) = self.bound_array_buffer.get() {
                self.buffers.borrow_mut().insert(bound, data.to_vec());
            }
        }
        self.record(Call::BufferData {
            target,
            data: data.to_vec(),
            usage,
        });
    }

    fn delete_buffer(&self, buffer: u32) {
        self.record(Call::DeleteBuffer { buffer });
    }

    fn create_vertex_array(&self) -> Result<u32, String> {
        let vertex_array = self.allocate("vertex array")?;
        self.record(Call::CreateVertexArray { vertex_array });
        Ok(vertex_array)
    }

    fn bind_vertex_array(&self, vertex_array: Option<u32>) {
        self.record(Call::BindVertexArray { vertex_array });
    }

    fn delete_vertex_array(&self, vertex_array: u32) {
        self.record(Call::DeleteVertexArray { vertex_array });
    }

    fn enable_vertex_attrib_array(&self, index: u32) {
        self.record(Call::EnableVertexAttribArray { index });
    }

    fn vertex_attrib_pointer_f32(
        &self,
        index: u32,
        size: i32,
        data_type: u32,
        normalized: bool,
        stride: i32,
        offset: i32,
    ) {
        self.record(Call::VertexAttribPointer {
            index,
            size,
            data_type,
            normalized,
            stride,
            offset,
        });
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        self.record(Call::Viewport {
            x,
            y,
            width,
            height,
        });
    }

    fn clear_color(&self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.record(Call::ClearColor {
            color: [red, green, blue, alpha],
        });
    }

    fn clear(&self, mask: u32) {
        self.record(Call::Clear { mask });
    }

    fn draw_arrays(&self, mode: u32, first: i32, count: i32) {
        self.record(Call::DrawArrays { mode, first, count });
    }
}
