//! Whole-file operations, one for each mode of the command line tool.

use std::path::Path;

use log::info;

use crate::{error::Error, mirror::Mirror, raster::Raster, tree::QuadTree};

/// Compress a PPM image into a quadtree file.
pub fn compress_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    threshold: u64,
) -> Result<QuadTree, Error> {
    let raster = Raster::open(input)?;
    let tree = QuadTree::build(&raster, threshold)?;
    tree.save(output)?;

    info!(
        "compressed {}x{} image into {} nodes",
        raster.width(),
        raster.height(),
        tree.len()
    );

    Ok(tree)
}

/// Decompress a quadtree file into a PPM image.
pub fn decompress_file<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<Raster, Error> {
    let raster = QuadTree::open(input)?.render();
    raster.save(output)?;

    Ok(raster)
}

/// Mirror a PPM image, writing the result as a PPM image.
///
/// The image first goes through a lossy compression round trip at
/// `threshold`. The result is decomposed again without loss, mirrored and
/// rendered. The input file is never modified.
pub fn mirror_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    threshold: u64,
    mirror: Mirror,
) -> Result<Raster, Error> {
    let lossy = QuadTree::build(&Raster::open(input)?, threshold)?.render();

    let mut tree = QuadTree::build(&lossy, 0)?;
    tree.mirror(mirror);

    let mirrored = tree.render();
    mirrored.save(output)?;

    info!(
        "mirrored {}x{} image {mirror:?}",
        mirrored.width(),
        mirrored.height()
    );

    Ok(mirrored)
}
