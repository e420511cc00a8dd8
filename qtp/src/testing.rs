//! Images shared by the unit tests.

use crate::raster::{Raster, Rgb};

/// Every pixel gets a distinct-ish color depending on its position.
pub fn gradient(side: u32) -> Raster {
    Raster::from_fn(side, side, |x, y| {
        Rgb::new(
            (x * 255 / side) as u8,
            (y * 255 / side) as u8,
            ((x + y) * 127 / side) as u8,
        )
    })
}

/// Four flat quadrants with a noisy bottom right quadrant.
pub fn quadrants(side: u32) -> Raster {
    let half = side / 2;
    Raster::from_fn(side, side, |x, y| match (x < half, y < half) {
        (true, true) => Rgb::new(255, 0, 0),
        (false, true) => Rgb::new(0, 255, 0),
        (true, false) => Rgb::new(0, 0, 255),
        (false, false) => Rgb::new((x * 37 % 256) as u8, (y * 91 % 256) as u8, ((x ^ y) * 13 % 256) as u8),
    })
}

pub fn uniform(side: u32, color: Rgb) -> Raster {
    Raster::from_fn(side, side, |_, _| color)
}
