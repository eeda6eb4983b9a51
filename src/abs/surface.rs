//! Drawing surfaces.
//!
//! A [`Surface`] is whatever the default framebuffer is presented on: a browser canvas or a
//! desktop window. [`resize_to_display_size`] keeps its backing store in step with the size
//! it is displayed at.

/// Pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
}

impl Extent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Scales both axes, truncating toward zero.
    pub fn scaled(self, multiplier: f64) -> Self {
        Self {
            width: (self.width as f64 * multiplier) as u32,
            height: (self.height as f64 * multiplier) as u32,
        }
    }

    /// Width and height as `glViewport` arguments, saturating at `i32::MAX`.
    pub fn viewport_size(self) -> (i32, i32) {
        (
            i32::try_from(self.width).unwrap_or(i32::MAX),
            i32::try_from(self.height).unwrap_or(i32::MAX),
        )
    }
}

pub trait Surface {
    /// Size the surface occupies on screen.
    fn display_size(&self) -> Extent;
    /// Size of the backing store the GPU renders into.
    fn drawing_size(&self) -> Extent;
    fn set_drawing_size(&mut self, extent: Extent);
}

/// Resizes the backing store to the display size times `multiplier`.
///
/// Returns `true` if the drawing size changed.
pub fn resize_to_display_size<S: Surface + ?Sized>(surface: &mut S, multiplier: f64) -> bool {
    let wanted = surface.display_size().scaled(multiplier);
    if surface.drawing_size() == wanted {
        return false;
    }
    log::debug!(
        "resizing drawing surface from {:?} to {:?}",
        surface.drawing_size(),
        wanted
    );
    surface.set_drawing_size(wanted);
    true
}
