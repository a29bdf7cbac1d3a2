use crate::color::Rgba;

/// The drawing operations a frame needs. Coordinates are CSS pixels and the
/// surface knows its own logical size.
pub trait Surface {
    fn clear(&mut self);

    /// Fills the whole surface with a radial gradient centered at (`x`, `y`),
    /// fading from `inner` at the center to `outer` at `radius`.
    fn radial_glow(&mut self, x: f64, y: f64, radius: f64, inner: Rgba, outer: Rgba);

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64, fill: Rgba);
}
