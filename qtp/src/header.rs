use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt, LE};

/// The header at the beginning of every compressed quadtree file.
///
/// It is followed directly by `node_count` node records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Header {
    /// Number of terminal nodes in the tree. Only informational, the nodes
    /// themselves say whether they are terminal.
    pub terminal_count: u32,

    /// Total number of node records following the header.
    pub node_count: u32,
}

impl Header {
    /// Size of the header in bytes.
    pub const LEN: usize = 8;

    pub fn write_into<T: WriteBytesExt + Write>(&self, output: &mut T) -> Result<(), std::io::Error> {
        output.write_u32::<LE>(self.terminal_count)?;
        output.write_u32::<LE>(self.node_count)?;

        Ok(())
    }

    pub fn read_from<T: Read + ReadBytesExt>(input: &mut T) -> Result<Self, std::io::Error> {
        Ok(Header {
            terminal_count: input.read_u32::<LE>()?,
            node_count: input.read_u32::<LE>()?,
        })
    }
}
