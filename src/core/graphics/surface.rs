//=========================================================================
// Surface
//=========================================================================
//
// Pixel buffer owned by the window. Scenes draw into it during the render
// phase and the platform backend presents it when the screen is updated.
//
// Layout: row-major, one `0x00RRGGBB` u32 per pixel.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::Rgb;
use crate::core::math::Dimension;

//=== Surface =============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    dimension: Dimension,
    pixels: Vec<u32>,
}

impl Surface {
    /// Creates a black surface.
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            pixels: vec![0; dimension.area()],
        }
    }

    //--- Geometry ---------------------------------------------------------

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    pub fn width(&self) -> u32 {
        self.dimension.x
    }

    pub fn height(&self) -> u32 {
        self.dimension.y
    }

    /// Reallocates the buffer for a new size. Contents are cleared.
    pub fn resize(&mut self, dimension: Dimension) {
        self.dimension = dimension;
        self.pixels.clear();
        self.pixels.resize(dimension.area(), 0);
    }

    //--- Pixels -----------------------------------------------------------

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the surface.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        self.offset(x, y).map(|i| Rgb::from_pixel(self.pixels[i]))
    }

    /// Sets the color at `(x, y)`; ignored outside the surface.
    pub fn set(&mut self, x: u32, y: u32, color: Rgb) {
        if let Some(i) = self.offset(x, y) {
            self.pixels[i] = color.to_pixel();
        }
    }

    /// Paints the whole surface.
    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color.to_pixel());
    }

    /// Blends `color` over the whole surface with opacity `alpha / 255`.
    pub fn blend_fill(&mut self, color: Rgb, alpha: u8) {
        match alpha {
            0 => {}
            255 => self.fill(color),
            _ => {
                for pixel in &mut self.pixels {
                    *pixel = Rgb::from_pixel(*pixel).blend(color, alpha).to_pixel();
                }
            }
        }
    }

    fn offset(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.dimension.x && y < self.dimension.y)
            .then(|| y as usize * self.dimension.x as usize + x as usize)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::Vec2;

    #[test]
    fn new_surface_is_black() {
        let surface = Surface::new(Vec2::new(4, 3));
        assert_eq!(surface.pixels().len(), 12);
        assert!(surface.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn set_and_get() {
        let mut surface = Surface::new(Vec2::new(4, 3));
        surface.set(3, 2, Rgb::RED);

        assert_eq!(surface.get(3, 2), Some(Rgb::RED));
        assert_eq!(surface.get(4, 0), None);
    }

    #[test]
    fn out_of_bounds_writes_are_ignored() {
        let mut surface = Surface::new(Vec2::new(2, 2));
        surface.set(5, 5, Rgb::WHITE);
        assert!(surface.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn fill_and_blend() {
        let mut surface = Surface::new(Vec2::new(2, 2));
        surface.fill(Rgb::WHITE);
        surface.blend_fill(Rgb::BLACK, 255);
        assert_eq!(surface.get(1, 1), Some(Rgb::BLACK));

        surface.fill(Rgb::WHITE);
        surface.blend_fill(Rgb::BLACK, 0);
        assert_eq!(surface.get(0, 0), Some(Rgb::WHITE));
    }

    #[test]
    fn resize_reallocates() {
        let mut surface = Surface::new(Vec2::new(2, 2));
        surface.fill(Rgb::GREEN);
        surface.resize(Vec2::new(3, 5));

        assert_eq!(surface.width(), 3);
        assert_eq!(surface.height(), 5);
        assert_eq!(surface.pixels().len(), 15);
        assert_eq!(surface.get(2, 4), Some(Rgb::BLACK));
    }
}
