use std::io::{Read, Write};

use byteorder::{ReadBytesExt, WriteBytesExt, LE};

use crate::raster::Rgb;

/// Child index meaning "no such child".
pub const NO_CHILD: i32 = -1;

/// One square block of the image.
///
/// A node is terminal if and only if `top_left` is [`NO_CHILD`], in which case
/// the other three child indices are [`NO_CHILD`] as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadNode {
    /// Mean color of the block.
    pub color: Rgb,

    /// Side length of the block, squared.
    pub area: u32,

    pub top_left: i32,
    pub top_right: i32,
    pub bottom_left: i32,
    pub bottom_right: i32,
}

impl QuadNode {
    /// Size of one node record in the compressed format.
    pub const RECORD_LEN: usize = 23;

    /// A terminal node covering a `side × side` block.
    pub fn terminal(color: Rgb, side: u32) -> Self {
        Self {
            color,
            area: side * side,
            top_left: NO_CHILD,
            top_right: NO_CHILD,
            bottom_left: NO_CHILD,
            bottom_right: NO_CHILD,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.top_left == NO_CHILD
    }

    /// Side length of the block, `round(sqrt(area))`.
    pub fn side_length(&self) -> u32 {
        (self.area as f64).sqrt().round() as u32
    }

    /// Child indices in reading order: top left, top right, bottom left,
    /// bottom right.
    pub fn children(&self) -> [i32; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    pub fn write_into<T: WriteBytesExt + Write>(&self, output: &mut T) -> Result<(), std::io::Error> {
        output.write_u8(self.color.red)?;
        output.write_u8(self.color.green)?;
        output.write_u8(self.color.blue)?;
        output.write_u32::<LE>(self.area)?;

        for child in self.children() {
            output.write_i32::<LE>(child)?;
        }

        Ok(())
    }

    pub fn read_from<T: Read + ReadBytesExt>(input: &mut T) -> Result<Self, std::io::Error> {
        Ok(Self {
            color: Rgb::new(input.read_u8()?, input.read_u8()?, input.read_u8()?),
            area: input.read_u32::<LE>()?,
            top_left: input.read_i32::<LE>()?,
            top_right: input.read_i32::<LE>()?,
            bottom_left: input.read_i32::<LE>()?,
            bottom_right: input.read_i32::<LE>()?,
        })
    }
}
