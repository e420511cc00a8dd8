use std::{mem::swap, str::FromStr};

use log::debug;

use crate::tree::QuadTree;

/// The axis to mirror an image along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirror {
    /// Left becomes right.
    Horizontal,

    /// Top becomes bottom.
    Vertical,
}

impl FromStr for Mirror {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "h" => Self::Horizontal,
            "v" => Self::Vertical,
            _ => return Err(format!("invalid mirror direction {s}, expected h or v")),
        })
    }
}

impl QuadTree {
    /// Mirror the image described by the tree in place.
    ///
    /// Only the child links of split nodes are swapped; no node is added,
    /// removed or recolored. Mirroring twice along the same axis gives back
    /// the original tree.
    pub fn mirror(&mut self, mirror: Mirror) {
        if self.is_empty() {
            return;
        }

        self.mirror_node(0, mirror);
        debug!("mirrored quadtree of {} nodes: {mirror:?}", self.len());
    }

    pub fn mirror_horizontal(&mut self) {
        self.mirror(Mirror::Horizontal)
    }

    pub fn mirror_vertical(&mut self) {
        self.mirror(Mirror::Vertical)
    }

    fn mirror_node(&mut self, index: usize, mirror: Mirror) {
        let node = self.nodes()[index];
        if node.is_terminal() {
            return;
        }

        for child in node.children() {
            self.mirror_node(child as usize, mirror);
        }

        let node = &mut self.nodes_mut()[index];
        match mirror {
            Mirror::Horizontal => {
                swap(&mut node.top_left, &mut node.top_right);
                swap(&mut node.bottom_left, &mut node.bottom_right);
            }
            Mirror::Vertical => {
                swap(&mut node.top_left, &mut node.bottom_left);
                swap(&mut node.top_right, &mut node.bottom_right);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{gradient, quadrants};

    #[test]
    fn parse() {
        assert_eq!("h".parse::<Mirror>(), Ok(Mirror::Horizontal));
        assert_eq!("V".parse::<Mirror>(), Ok(Mirror::Vertical));
        assert!("horizontal".parse::<Mirror>().is_err());
        assert!("x".parse::<Mirror>().is_err());
    }

    #[test]
    fn horizontal_flips_image() {
        let raster = gradient(16);
        let mut tree = QuadTree::build(&raster, 0).unwrap();
        tree.mirror_horizontal();

        assert_eq!(tree.render(), raster.flip_horizontal());
    }

    #[test]
    fn vertical_flips_image() {
        let raster = quadrants(16);
        let mut tree = QuadTree::build(&raster, 0).unwrap();
        tree.mirror_vertical();

        assert_eq!(tree.render(), raster.flip_vertical());
    }

    #[test]
    fn lossy_mirror_matches_flipped_render() {
        let raster = quadrants(32);
        let mut tree = QuadTree::build(&raster, 200).unwrap();
        let rendered = tree.render();

        tree.mirror(Mirror::Horizontal);
        assert_eq!(tree.render(), rendered.flip_horizontal());
    }

    #[test]
    fn involution() {
        for threshold in [0, 100] {
            let tree = QuadTree::build(&quadrants(16), threshold).unwrap();

            let mut h = tree.clone();
            h.mirror_horizontal();
            assert_ne!(h, tree);
            h.mirror_horizontal();
            assert_eq!(h, tree);

            let mut v = tree.clone();
            v.mirror_vertical();
            assert_ne!(v, tree);
            v.mirror_vertical();
            assert_eq!(v, tree);
        }
    }

    #[test]
    fn composition_is_rotation() {
        let raster = gradient(32);
        let mut tree = QuadTree::build(&raster, 0).unwrap();
        tree.mirror_vertical();
        tree.mirror_horizontal();

        assert_eq!(tree.render(), raster.rotate_180());
    }

    #[test]
    fn terminal_nodes_untouched() {
        let raster = quadrants(8);
        let tree = QuadTree::build(&raster, 0).unwrap();
        let mut mirrored = tree.clone();
        mirrored.mirror_vertical();

        assert_eq!(mirrored.len(), tree.len());
        assert_eq!(mirrored.terminal_count(), tree.terminal_count());
        for (before, after) in tree.nodes().iter().zip(mirrored.nodes()) {
            assert_eq!(before.color, after.color);
            assert_eq!(before.area, after.area);
            if before.is_terminal() {
                assert_eq!(before, after);
            }
        }
        mirrored.validate().unwrap();
    }

    #[test]
    fn empty_and_single_node() {
        let mut empty = QuadTree::new();
        empty.mirror_horizontal();
        assert!(empty.is_empty());

        let raster = gradient(4);
        let mut flat = QuadTree::build(&raster, u64::MAX).unwrap();
        let before = flat.clone();
        flat.mirror_vertical();
        assert_eq!(flat, before);
    }
}
