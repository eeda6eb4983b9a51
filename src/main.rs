//! Draws a single pink triangle on a transparent background.
//!
//! Built for `wasm32` it renders into the page's first `<canvas>` through WebGL2; built for
//! the desktop it opens an SDL2 window with an OpenGL 3.3 core context.

mod abs;
mod config;
mod error;
mod logging;
mod triangle;

use std::rc::Rc;

use crate::config::Config;
use crate::triangle::{Dialect, HelloTriangle};

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use sdl2::event::{Event, WindowEvent};

    use crate::abs::App;

    let config = Config::load()?;
    logging::init_logging(config.level_filter()?)?;

    let mut app = match App::new(&config) {
        Ok(app) => app,
        Err(err) => {
            log::warn!("{err}");
            return Ok(());
        }
    };

    let gl = Rc::clone(&app.gl);
    let triangle = HelloTriangle::new(&gl, Dialect::for_target())?;
    // The drawable size is already in physical pixels.
    let extent = triangle.draw(&mut app, 1.0);
    app.present();
    log::info!("drew triangle at {}x{}", extent.width, extent.height);

    // Nothing changes after the first frame; redraw only when the window needs it.
    loop {
        match app.event_pump.wait_event() {
            Event::Quit { .. } => break,
            Event::Window {
                win_event: WindowEvent::Exposed | WindowEvent::SizeChanged(..),
                ..
            } => {
                triangle.draw(&mut app, 1.0);
                app.present();
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    if let Err(err) = run() {
        log::error!("{err}");
    }
}

#[cfg(target_arch = "wasm32")]
fn run() -> Result<(), error::Error> {
    use crate::abs::Canvas;

    let config = Config::default();
    config.validate()?;
    logging::init_logging(config.level_filter()?)?;

    let mut canvas = Canvas::query("canvas")?;
    let Some(gl) = canvas.webgl2_context() else {
        log::warn!("WebGL2 is not available in this browser");
        return Ok(());
    };
    let gl = Rc::new(gl);

    let triangle = HelloTriangle::new(&gl, Dialect::for_target())?;
    let pixel_ratio = if config.use_device_pixel_ratio {
        canvas.device_pixel_ratio()
    } else {
        config.pixel_ratio
    };
    let extent = triangle.draw(&mut canvas, pixel_ratio);
    log::info!("drew triangle at {}x{}", extent.width, extent.height);
    Ok(())
}
