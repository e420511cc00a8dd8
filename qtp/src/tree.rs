use log::{debug, trace};

use crate::{
    error::Error,
    node::{QuadNode, NO_CHILD},
    raster::Raster,
    similarity::{block_similarity, BlockSimilarity},
};

/// Largest side length whose area still fits in a node.
const MAX_SIDE: u32 = u16::MAX as u32;

/// A region quadtree stored as a flat table of nodes.
///
/// Node 0 is the root and covers the whole image. Children always come after
/// their parent in the table and are referred to by index, never by reference,
/// so the table can grow freely while it is being built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuadTree {
    nodes: Vec<QuadNode>,
    terminal_count: u32,
}

impl QuadTree {
    /// Create an empty tree, ready to be populated.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decompose an image into a quadtree.
    ///
    /// Blocks with a dispersion score at or below `threshold` become terminal
    /// nodes. A threshold of 0 only stops at perfectly flat blocks, which
    /// reproduces the image exactly.
    pub fn build(raster: &Raster, threshold: u64) -> Result<Self, Error> {
        let mut tree = Self::new();
        tree.populate(raster, threshold)?;

        Ok(tree)
    }

    /// Fill an empty tree from an image, see [`QuadTree::build`].
    ///
    /// The root covers the `width × width` square in the top left corner of
    /// the image, and blocks are halved with integer division. Images whose
    /// side is not a power of two therefore lose a row and column at every
    /// odd halving.
    pub fn populate(&mut self, raster: &Raster, threshold: u64) -> Result<(), Error> {
        if !self.nodes.is_empty() {
            return Err(Error::AlreadyBuilt);
        }

        let side = raster.width();
        if side == 0 || raster.height() == 0 {
            return Err(Error::EmptyImage);
        }
        if raster.height() < side {
            return Err(Error::DimensionMismatch {
                width: raster.width(),
                height: raster.height(),
            });
        }
        if side > MAX_SIDE {
            return Err(Error::TooLarge);
        }

        self.build_node(raster, 0, 0, side, threshold)?;

        debug!(
            "built quadtree for {}x{} image: {} nodes, {} terminal, threshold {threshold}",
            raster.width(),
            raster.height(),
            self.nodes.len(),
            self.terminal_count,
        );

        Ok(())
    }

    /// Append the node for one block and, unless it is flat enough, its
    /// children. Returns the index of the new node.
    fn build_node(
        &mut self,
        raster: &Raster,
        x: u32,
        y: u32,
        size: u32,
        threshold: u64,
    ) -> Result<i32, Error> {
        let index = i32::try_from(self.nodes.len()).map_err(|_| Error::TooLarge)?;
        let BlockSimilarity { color, score } = block_similarity(raster, x, y, size);

        self.nodes.push(QuadNode::terminal(color, size));

        if score <= threshold {
            self.terminal_count += 1;
            return Ok(index);
        }

        trace!("splitting {size}x{size} block at ({x}, {y}), score {score}");

        // The order here decides the node indices, and with them the layout
        // of the compressed file
        let half = size / 2;
        let top_left = self.build_node(raster, x, y, half, threshold)?;
        self.nodes[index as usize].top_left = top_left;

        let top_right = self.build_node(raster, x + half, y, half, threshold)?;
        self.nodes[index as usize].top_right = top_right;

        let bottom_right = self.build_node(raster, x + half, y + half, half, threshold)?;
        self.nodes[index as usize].bottom_right = bottom_right;

        let bottom_left = self.build_node(raster, x, y + half, half, threshold)?;
        self.nodes[index as usize].bottom_left = bottom_left;

        Ok(index)
    }

    /// Create a tree from an existing node table, checking that it is a
    /// well formed quadtree.
    pub fn from_nodes(nodes: Vec<QuadNode>, terminal_count: u32) -> Result<Self, Error> {
        let tree = Self {
            nodes,
            terminal_count,
        };
        tree.validate()?;

        Ok(tree)
    }

    /// Check the structure of the node table.
    ///
    /// Children must come strictly after their parent and every node but the
    /// root must have exactly one parent, so a valid table cannot contain
    /// cycles. Children must also be exactly half the size of their parent,
    /// which keeps every block inside of the rendered image.
    pub fn validate(&self) -> Result<(), Error> {
        let invalid = |index: usize, reason: String| Error::InvalidTree { index, reason };

        let root = self
            .nodes
            .first()
            .ok_or_else(|| invalid(0, "the tree has no nodes".to_string()))?;
        if root.area == 0 {
            return Err(invalid(0, "the root covers no pixels".to_string()));
        }
        let root_side = root.side_length();
        if root_side > MAX_SIDE || root_side * root_side != root.area {
            return Err(invalid(0, format!("root area {} is not a valid image size", root.area)));
        }

        let mut has_parent = vec![false; self.nodes.len()];
        let mut terminals = 0u32;

        for (index, node) in self.nodes.iter().enumerate() {
            if node.is_terminal() {
                if node.children() != [NO_CHILD; 4] {
                    return Err(invalid(index, "terminal node has children".to_string()));
                }
                terminals += 1;
                continue;
            }

            let side = node.side_length();
            if side < 2 {
                return Err(invalid(index, format!("a {side}x{side} block cannot be split")));
            }
            let child_area = (side / 2) * (side / 2);

            for child in node.children() {
                let child_index = usize::try_from(child)
                    .ok()
                    .filter(|&c| c > index && c < self.nodes.len())
                    .ok_or_else(|| invalid(index, format!("bad child index {child}")))?;

                if has_parent[child_index] {
                    return Err(invalid(child_index, "node has more than one parent".to_string()));
                }
                has_parent[child_index] = true;

                if self.nodes[child_index].area != child_area {
                    return Err(invalid(
                        child_index,
                        format!(
                            "area {} does not fit in a parent of side {side}",
                            self.nodes[child_index].area
                        ),
                    ));
                }
            }
        }

        if let Some(orphan) = has_parent.iter().skip(1).position(|&p| !p) {
            return Err(invalid(orphan + 1, "node is not part of the tree".to_string()));
        }

        if terminals != self.terminal_count {
            return Err(invalid(
                0,
                format!(
                    "expected {} terminal nodes, found {terminals}",
                    self.terminal_count
                ),
            ));
        }

        Ok(())
    }

    /// All nodes in table order, root first.
    pub fn nodes(&self) -> &[QuadNode] {
        &self.nodes
    }

    pub fn root(&self) -> Option<&QuadNode> {
        self.nodes.first()
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of terminal nodes.
    pub fn terminal_count(&self) -> u32 {
        self.terminal_count
    }

    /// Side length of the image the tree covers.
    pub fn side_length(&self) -> u32 {
        self.root().map_or(0, QuadNode::side_length)
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [QuadNode] {
        &mut self.nodes
    }
}
