//! Reading and writing quadtrees in the compressed file format.
//!
//! A file is a [`Header`] followed by `node_count` packed [`QuadNode`]
//! records of [`QuadNode::RECORD_LEN`] bytes each. All integers are little
//! endian and nothing is padded.

use std::{
    fs::File,
    io::{BufWriter, Cursor, Read, Write},
    path::Path,
};

use byteorder::WriteBytesExt;
use log::debug;

use crate::{error::Error, header::Header, node::QuadNode, tree::QuadTree};

impl QuadTree {
    /// Encode the tree into anything that implements [Write].
    pub fn encode<O: Write + WriteBytesExt>(&self, mut output: O) -> Result<(), Error> {
        let header = Header {
            terminal_count: self.terminal_count(),
            node_count: u32::try_from(self.len()).map_err(|_| Error::TooLarge)?,
        };

        // Write out the header
        header.write_into(&mut output)?;

        // Write out the nodes
        for node in self.nodes() {
            node.write_into(&mut output)?;
        }

        output.flush()?;

        Ok(())
    }

    /// Decode a tree from anything that implements [Read].
    ///
    /// The whole tree is checked with [`QuadTree::validate`] before it is
    /// returned, so it is safe to render or mirror.
    pub fn decode<I: Read>(mut input: I) -> Result<Self, Error> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;

        if data.len() < Header::LEN {
            return Err(Error::TruncatedData {
                what: "header bytes",
                expected: Header::LEN,
                found: data.len(),
            });
        }

        let mut cursor = Cursor::new(data.as_slice());
        let header = Header::read_from(&mut cursor)?;

        let node_count = header.node_count as usize;
        let available = (data.len() - Header::LEN) / QuadNode::RECORD_LEN;
        if available < node_count {
            return Err(Error::TruncatedData {
                what: "node records",
                expected: node_count,
                found: available,
            });
        }

        let mut nodes = Vec::with_capacity(node_count);
        for _ in 0..node_count {
            nodes.push(QuadNode::read_from(&mut cursor)?);
        }

        QuadTree::from_nodes(nodes, header.terminal_count)
    }

    /// Save the tree to a path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Error> {
        let path = path.as_ref();
        self.encode(BufWriter::new(File::create(path)?))?;
        debug!(
            "wrote quadtree with {} nodes ({} terminal) to {path:?}",
            self.len(),
            self.terminal_count()
        );

        Ok(())
    }

    /// Open a tree from a path.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path = path.as_ref();
        let tree = Self::decode(File::open(path)?)?;
        debug!(
            "read quadtree with {} nodes ({} terminal) from {path:?}",
            tree.len(),
            tree.terminal_count()
        );

        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        raster::{Raster, Rgb},
        testing::{gradient, quadrants},
    };

    #[test]
    fn roundtrip() {
        for threshold in [0, 20, 400] {
            let tree = QuadTree::build(&quadrants(16), threshold).unwrap();

            let mut buf = Vec::new();
            tree.encode(&mut buf).unwrap();
            assert_eq!(buf.len(), Header::LEN + tree.len() * QuadNode::RECORD_LEN);

            let decoded = QuadTree::decode(buf.as_slice()).unwrap();
            assert_eq!(decoded, tree);
            assert_eq!(decoded.terminal_count(), tree.terminal_count());
        }
    }

    #[test]
    fn exact_bytes() {
        let raster = Raster::from_fn(2, 2, |x, y| Rgb::new((x + 2 * y) as u8, 0, 0));
        let tree = QuadTree::build(&raster, 0).unwrap();

        let mut buf = Vec::new();
        tree.encode(&mut buf).unwrap();

        #[rustfmt::skip]
        let expected: Vec<u8> = [
            // 4 terminal nodes, 5 nodes total
            vec![4, 0, 0, 0, 5, 0, 0, 0],
            // Root, mean red (0 + 1 + 2 + 3) / 4 = 1, children 1, 2, 4, 3
            vec![1, 0, 0, 4, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 4, 0, 0, 0, 3, 0, 0, 0],
            // Leaves in build order: (0, 0), (1, 0), (1, 1), (0, 1)
            [vec![0, 0, 0, 1, 0, 0, 0], vec![0xFF; 16]].concat(),
            [vec![1, 0, 0, 1, 0, 0, 0], vec![0xFF; 16]].concat(),
            [vec![3, 0, 0, 1, 0, 0, 0], vec![0xFF; 16]].concat(),
            [vec![2, 0, 0, 1, 0, 0, 0], vec![0xFF; 16]].concat(),
        ]
        .concat();

        assert_eq!(buf, expected);
    }

    #[test]
    fn truncated_header() {
        let err = QuadTree::decode(&[1u8, 0, 0][..]).unwrap_err();
        assert!(matches!(
            err,
            Error::TruncatedData { expected: 8, found: 3, .. }
        ));
    }

    #[test]
    fn truncated_records() {
        let tree = QuadTree::build(&gradient(8), 0).unwrap();
        let mut buf = Vec::new();
        tree.encode(&mut buf).unwrap();

        buf.truncate(buf.len() - 1);
        let err = QuadTree::decode(buf.as_slice()).unwrap_err();
        assert!(matches!(err, Error::TruncatedData { what: "node records", .. }));
    }

    #[test]
    fn corrupt_links() {
        let tree = QuadTree::build(&gradient(4), 0).unwrap();
        let mut buf = Vec::new();
        tree.encode(&mut buf).unwrap();

        // Point the root's top left child back at the root
        let top_left = Header::LEN + 7;
        buf[top_left..top_left + 4].copy_from_slice(&0i32.to_le_bytes());

        let err = QuadTree::decode(buf.as_slice()).unwrap_err();
        assert!(matches!(err, Error::InvalidTree { index: 0, .. }));
    }

    #[test]
    fn oversized_or_non_square_root() {
        for area in [5, u32::MAX] {
            let mut buf = Vec::new();
            Header { terminal_count: 1, node_count: 1 }.write_into(&mut buf).unwrap();
            QuadNode { area, ..QuadNode::terminal(Rgb::new(1, 2, 3), 1) }
                .write_into(&mut buf)
                .unwrap();
            assert_eq!(buf.len(), 31);

            let err = QuadTree::decode(buf.as_slice()).unwrap_err();
            assert!(matches!(err, Error::InvalidTree { index: 0, .. }), "area {area}");
        }
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.qtp");

        let tree = QuadTree::build(&gradient(8), 30).unwrap();
        tree.save(&path).unwrap();
        assert_eq!(QuadTree::open(&path).unwrap(), tree);

        let err = QuadTree::open(dir.path().join("missing.qtp")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
