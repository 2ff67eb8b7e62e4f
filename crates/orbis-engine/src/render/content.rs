use super::backend::GpuApi;
use super::item::DrawItem;
use crate::coords::ViewportSize;

/// Supplies the line batches for both layers.
///
/// The compositor calls `build_resources` once at configure time and again on
/// every viewport-size change, `update` exactly once per rendered frame, and
/// the item accessors only for layers that are active in the current frame.
/// Returned lists are drawn in order.
pub trait ContentSource<A: GpuApi> {
    /// (Re)builds all GPU buffers for the current content.
    ///
    /// Must replace prior buffers wholesale: the compositor never observes a
    /// partially rebuilt list.
    fn build_resources(&mut self, device: &A::Device, viewport: ViewportSize);

    /// Advances time-driven content by `dt` seconds.
    fn update(&mut self, dt: f32);

    /// HUD-layer batches in draw order.
    fn hud_items(&self) -> &[DrawItem<A::Buffer>];

    /// World-layer batches in draw order.
    fn world_items(&self) -> &[DrawItem<A::Buffer>];
}
