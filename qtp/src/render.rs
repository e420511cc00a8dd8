use log::debug;

use crate::{raster::Raster, tree::QuadTree};

impl QuadTree {
    /// Reconstruct the image the tree describes.
    ///
    /// The output is always square, with the side length of the root block.
    /// Every terminal node fills its block with its color. For trees built
    /// from images with a power of two side every pixel is written exactly
    /// once; other sizes leave the rows and columns dropped while building
    /// black.
    pub fn render(&self) -> Raster {
        let side = self.side_length();
        let mut raster = Raster::new(side, side);

        if !self.is_empty() {
            self.render_node(&mut raster, 0, 0, 0);
        }
        debug!("rendered {side}x{side} image from {} nodes", self.len());

        raster
    }

    fn render_node(&self, raster: &mut Raster, index: usize, x: u32, y: u32) {
        let node = &self.nodes()[index];
        let size = node.side_length();

        if node.is_terminal() {
            raster.fill_block(x, y, size, node.color);
            return;
        }

        let half = size / 2;
        self.render_node(raster, node.top_left as usize, x, y);
        self.render_node(raster, node.top_right as usize, x + half, y);
        self.render_node(raster, node.bottom_right as usize, x + half, y + half);
        self.render_node(raster, node.bottom_left as usize, x, y + half);
    }
}
