//! QTP (**Q**uad**T**ree **P**icture) is a lossy image format. An image is
//! split into square blocks, and every block whose colors are close enough to
//! their mean is stored as that single color. Blocks that are not close
//! enough are split into four and examined again.
//!
//! Since the image is stored as a tree of blocks, some transformations such
//! as mirroring can be applied to the tree directly, without touching any
//! pixels.
//!
//! Images are read from and written to binary PPM (`P6`) files. They should be
//! square with a power of two side; other sizes lose a row and column of
//! pixels every time an odd sized block is halved.
//!
//! # Example
//! ## Compressing an image
//! ```no_run
//! use qtp::{QuadTree, Raster};
//!
//! let image = Raster::open("my_image.ppm").expect("Could not open the image");
//!
//! // Higher thresholds merge more blocks and give smaller files.
//! let tree = QuadTree::build(&image, 40).expect("Could not build the tree");
//! tree.save("my_image.qtp").expect("Could not save the tree");
//! ```
//!
//! ## Mirroring a compressed image
//! ```no_run
//! use qtp::{Mirror, QuadTree};
//!
//! let mut tree = QuadTree::open("my_image.qtp").expect("Could not open file");
//! tree.mirror(Mirror::Horizontal);
//!
//! tree.render().save("mirrored.ppm").expect("Could not save the image");
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod codec;
mod error;
mod mirror;
mod render;
mod tree;

pub mod header;
pub mod node;
pub mod ops;
pub mod raster;
pub mod similarity;

#[cfg(test)]
mod testing;

// ----------------------- //
// INLINED USEFUL FEATURES //
// ----------------------- //
#[doc(inline)]
pub use tree::QuadTree;

#[doc(inline)]
pub use node::{QuadNode, NO_CHILD};

#[doc(inline)]
pub use raster::{Raster, Rgb};

#[doc(inline)]
pub use mirror::Mirror;

#[doc(inline)]
pub use error::Error;
