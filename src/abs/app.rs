//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2 window and the OpenGL
//! context the triangle is drawn into on desktop targets.

use std::rc::Rc;

use crate::abs::{Extent, Surface};
use crate::config::Config;
use crate::error::Error;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Rc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Opens a resizable window with an OpenGL 3.3 core context made current.
    ///
    /// Any failure here means no rendering context is obtainable.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let sdl = sdl2::init().map_err(Error::NoContext)?;
        let video_subsystem = sdl.video().map_err(Error::NoContext)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .allow_highdpi()
            .build()
            .map_err(|e| Error::NoContext(e.to_string()))?;
        let gl_context = window.gl_create_context().map_err(Error::NoContext)?;
        window
            .gl_make_current(&gl_context)
            .map_err(Error::NoContext)?;
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump().map_err(Error::NoContext)?;
        let (width, height) = window.drawable_size();
        log::info!(
            "opened {}x{} window with OpenGL {:?}",
            width,
            height,
            gl_attr.context_version()
        );

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl: Rc::new(gl),
            event_pump,
        })
    }

    pub fn present(&self) {
        self.window.gl_swap_window();
    }
}

/// SDL sizes the default framebuffer to the window's drawable size and it cannot be
/// resized independently, so the drawing size always reports the real framebuffer.
impl Surface for App {
    fn display_size(&self) -> Extent {
        let (width, height) = self.window.drawable_size();
        Extent::new(width, height)
    }

    fn drawing_size(&self) -> Extent {
        self.display_size()
    }

    fn set_drawing_size(&mut self, extent: Extent) {
        if extent != self.display_size() {
            log::debug!("ignoring drawing size {extent:?}; the window owns its framebuffer");
        }
    }
}
