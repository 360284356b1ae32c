use std::fmt::{Debug, Formatter};
use std::hash::Hash;
use std::sync::Arc;
use std::{fmt, io};

pub use bag_of_cells::*;
use bitstream_io::{BigEndian, BitWrite, BitWriter};
pub use builder::*;
pub use error::*;
use lazy_static::lazy_static;
pub use parser::*;
use sha2::{Digest, Sha256};
pub use snake::*;
pub use state_init::*;
pub use util::*;

use crate::types::DEFAULT_CELL_HASH;
use crate::TonHash;

mod bag_of_cells;
mod builder;
mod error;
mod parser;
mod raw;
mod snake;
mod state_init;
mod util;

pub type ArcCell = Arc<Cell>;

lazy_static! {
    pub static ref EMPTY_CELL: Cell = Cell::default();
    pub static ref EMPTY_ARC_CELL: ArcCell = Arc::new(Cell::default());
}

/// Ordinary cell: up to 1023 data bits and up to 4 references.
///
/// Two cells are equal when their data, bit length and referenced subtrees are equal,
/// which is the same as having the same representation hash.
#[derive(PartialEq, Eq, Clone, Hash)]
pub struct Cell {
    data: Vec<u8>,
    bit_len: usize,
    references: Vec<ArcCell>,
    hash: TonHash,
    depth: u16,
}

impl Cell {
    pub fn new(
        data: Vec<u8>,
        bit_len: usize,
        references: Vec<ArcCell>,
    ) -> Result<Self, TonCellError> {
        if bit_len > data.len() * 8 {
            return Err(TonCellError::InvalidCellData(format!(
                "Bit length {} exceeds data length {} bytes",
                bit_len,
                data.len()
            )));
        }
        let depth = calculate_depth(&references);
        let hash = calculate_hash(&data, bit_len, &references)?;

        Ok(Self {
            data,
            bit_len,
            references,
            hash,
            depth,
        })
    }

    pub fn parser(&self) -> CellParser<'_> {
        CellParser::new(self.bit_len, &self.data, &self.references)
    }

    pub fn parse<F, T>(&self, parse: F) -> Result<T, TonCellError>
    where
        F: FnOnce(&mut CellParser) -> Result<T, TonCellError>,
    {
        let mut parser = self.parser();
        parse(&mut parser)
    }

    pub fn parse_fully<F, T>(&self, parse: F) -> Result<T, TonCellError>
    where
        F: FnOnce(&mut CellParser) -> Result<T, TonCellError>,
    {
        let mut reader = self.parser();
        let res = parse(&mut reader);
        reader.ensure_empty()?;
        res
    }

    pub fn reference(&self, idx: usize) -> Result<&ArcCell, TonCellError> {
        self.references.get(idx).ok_or(TonCellError::InvalidIndex {
            idx,
            ref_count: self.references.len(),
        })
    }

    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn references(&self) -> &[ArcCell] {
        self.references.as_slice()
    }

    pub fn cell_depth(&self) -> u16 {
        self.depth
    }

    pub fn cell_hash(&self) -> TonHash {
        self.hash
    }

    pub fn to_arc(self) -> ArcCell {
        Arc::new(self)
    }
}

impl Debug for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        // `_` only marks an incomplete last byte, the real completion tag is not printed
        let completion_tag = if self.bit_len % 8 != 0 { "_" } else { "" };
        writeln!(
            f,
            "Cell {{ data: [{}{}]\n, bit_len: {}\n, references: [",
            hex::encode_upper(&self.data),
            completion_tag,
            self.bit_len,
        )?;

        for reference in &self.references {
            writeln!(
                f,
                "    {}\n",
                format!("{:?}", reference).replace('\n', "\n    ")
            )?;
        }

        write!(
            f,
            "]\n hash: {}\n depth: {}\n }}",
            hex::encode_upper(self.hash),
            self.depth
        )
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            data: Default::default(),
            bit_len: Default::default(),
            references: Default::default(),
            hash: DEFAULT_CELL_HASH,
            depth: Default::default(),
        }
    }
}

fn calculate_depth(references: &[ArcCell]) -> u16 {
    references
        .iter()
        .map(|reference| reference.depth + 1)
        .max()
        .unwrap_or_default()
}

/// Representation hash of an ordinary cell, see https://docs.ton.org/tvm.pdf 3.1.5
fn calculate_hash(
    data: &[u8],
    bit_len: usize,
    references: &[ArcCell],
) -> Result<TonHash, TonCellError> {
    // descriptors + data + (depth + hash) * refs_count
    let buffer_len = 2 + data.len() + (2 + 32) * references.len();
    let mut writer = BitWriter::endian(Vec::with_capacity(buffer_len), BigEndian);

    writer
        .write(8, get_refs_descriptor(references)?)
        .map_cell_builder_error()?;
    writer
        .write(8, get_bits_descriptor(bit_len)?)
        .map_cell_builder_error()?;
    write_data(&mut writer, data, bit_len).map_cell_builder_error()?;

    for reference in references {
        writer
            .write(16, reference.depth)
            .map_cell_builder_error()?;
    }
    for reference in references {
        writer
            .write_bytes(&reference.hash)
            .map_cell_builder_error()?;
    }

    let repr = writer
        .writer()
        .ok_or_else(|| TonCellError::cell_builder_error("Stream for cell repr is not byte-aligned"))?;

    let hash = Sha256::new_with_prefix(repr.as_slice()).finalize();
    hash[..].try_into().map_err(|error| {
        TonCellError::InternalError(format!(
            "Can't get [u8; 32] from finalized hash with error: {error}"
        ))
    })
}

/// Calculates d1 descriptor for an ordinary cell of level 0
/// See https://docs.ton.org/tvm.pdf 3.1.4 for details
fn get_refs_descriptor(references: &[ArcCell]) -> Result<u8, TonCellError> {
    if references.len() > MAX_CELL_REFERENCES {
        Err(TonCellError::InvalidCellData(format!(
            "Cell should not contain more than {} references",
            MAX_CELL_REFERENCES
        )))
    } else {
        Ok(references.len() as u8)
    }
}

/// Calculates d2 descriptor for cell
/// See https://docs.ton.org/tvm.pdf 3.1.4 for details
fn get_bits_descriptor(bit_len: usize) -> Result<u8, TonCellError> {
    if bit_len > MAX_CELL_BITS {
        Err(TonCellError::InvalidCellData(format!(
            "Cell data length should not contain more than {} bits",
            MAX_CELL_BITS
        )))
    } else {
        Ok((bit_len / 8 + bit_len.div_ceil(8)) as u8)
    }
}

/// Writes cell data with the completion tag appended to an incomplete last byte.
pub(crate) fn write_data(
    writer: &mut BitWriter<Vec<u8>, BigEndian>,
    data: &[u8],
    bit_len: usize,
) -> Result<(), io::Error> {
    let data_len = bit_len.div_ceil(8);
    let rest_bits = bit_len % 8;

    if rest_bits != 0 {
        writer.write_bytes(&data[..data_len - 1])?;
        let last_byte = data[data_len - 1];
        let l = last_byte | 1 << (8 - rest_bits - 1);
        writer.write(8, l)?;
    } else {
        writer.write_bytes(&data[..data_len])?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use super::{get_bits_descriptor, get_refs_descriptor, Cell};
    use crate::cell::CellBuilder;

    #[test]
    fn default_cell() {
        let result = Cell::default();

        let expected = Cell::new(vec![], 0, vec![]).unwrap();

        assert_eq!(result, expected)
    }

    #[test]
    fn empty_cell_hash() {
        let cell = CellBuilder::new().build().unwrap();
        assert_eq!(
            hex::encode(cell.cell_hash()),
            "96a296d224f285c67bee93c30f8a309157f0daa35dc5b87e410b78630a09cfc7"
        );
        assert_eq!(cell.cell_depth(), 0);
    }

    #[test]
    fn depth_follows_deepest_reference() {
        let leaf = Arc::new(CellBuilder::new().store_u8(8, 1).unwrap().build().unwrap());
        let middle = Arc::new(
            CellBuilder::new()
                .store_reference(&leaf)
                .unwrap()
                .build()
                .unwrap(),
        );
        let root = CellBuilder::new()
            .store_reference(&middle)
            .unwrap()
            .store_reference(&leaf)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(root.cell_depth(), 2);
    }

    #[test]
    fn d1_descriptor_test() {
        let empty_cell = Arc::new(CellBuilder::new().build().unwrap());

        assert_eq!(get_refs_descriptor(&[]).unwrap(), 0);
        assert_eq!(get_refs_descriptor(&[empty_cell.clone()]).unwrap(), 1);
        assert!(get_refs_descriptor(vec![empty_cell; 5].as_slice()).is_err());
    }

    #[test]
    fn d2_descriptor_test() {
        let r1 = get_bits_descriptor(0).unwrap();
        assert_eq!(r1, 0);

        let r2 = get_bits_descriptor(1023).unwrap();
        assert_eq!(r2, 255);

        let r3 = get_bits_descriptor(1024).is_err();
        assert!(r3)
    }
}
