/// Drawable size in physical pixels.
///
/// A zero dimension is legal (minimized window); consumers derive the aspect
/// ratio through [`ViewportSize::aspect`], which never divides by zero.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    /// Smallest aspect ratio handed to a projection.
    pub const MIN_ASPECT: f32 = 1.0e-4;

    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// `width / max(height, 1)`, floored at [`Self::MIN_ASPECT`].
    #[inline]
    pub fn aspect(self) -> f32 {
        (self.width as f32 / self.height.max(1) as f32).max(Self::MIN_ASPECT)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl From<winit::dpi::PhysicalSize<u32>> for ViewportSize {
    fn from(size: winit::dpi::PhysicalSize<u32>) -> Self {
        Self::new(size.width, size.height)
    }
}
