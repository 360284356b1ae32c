use std::sync::Arc;

use bitstream_io::{BigEndian, BitWrite, BitWriter};
use num_bigint::BigUint;
use num_traits::Zero;

use crate::cell::error::{MapTonCellError, TonCellError};
use crate::cell::{ArcCell, Cell, SnakeChain};
use crate::TonAddress;

pub const MAX_CELL_BITS: usize = 1023;
pub const MAX_CELL_REFERENCES: usize = 4;

pub struct CellBuilder {
    bit_writer: BitWriter<Vec<u8>, BigEndian>,
    bits_to_write: usize,
    references: Vec<ArcCell>,
}

impl CellBuilder {
    pub fn new() -> CellBuilder {
        let bit_writer = BitWriter::endian(Vec::new(), BigEndian);
        CellBuilder {
            bit_writer,
            bits_to_write: 0,
            references: Vec::new(),
        }
    }

    pub fn store_bit(&mut self, val: bool) -> Result<&mut Self, TonCellError> {
        self.ensure_capacity(1)?;
        self.bit_writer.write_bit(val).map_cell_builder_error()?;
        self.bits_to_write += 1;
        Ok(self)
    }

    pub fn store_u8(&mut self, bit_len: usize, val: u8) -> Result<&mut Self, TonCellError> {
        self.ensure_capacity(bit_len)?;
        self.bit_writer
            .write(bit_len as u32, val)
            .map_cell_builder_error()?;
        self.bits_to_write += bit_len;
        Ok(self)
    }

    pub fn store_u32(&mut self, bit_len: usize, val: u32) -> Result<&mut Self, TonCellError> {
        self.ensure_capacity(bit_len)?;
        self.bit_writer
            .write(bit_len as u32, val)
            .map_cell_builder_error()?;
        self.bits_to_write += bit_len;
        Ok(self)
    }

    pub fn store_u64(&mut self, bit_len: usize, val: u64) -> Result<&mut Self, TonCellError> {
        self.ensure_capacity(bit_len)?;
        self.bit_writer
            .write(bit_len as u32, val)
            .map_cell_builder_error()?;
        self.bits_to_write += bit_len;
        Ok(self)
    }

    /// Stores `val` as a big-endian unsigned integer of exactly `bit_len` bits.
    pub fn store_uint(&mut self, bit_len: usize, val: &BigUint) -> Result<&mut Self, TonCellError> {
        let minimum_bits_needed = if val.is_zero() { 1 } else { val.bits() } as usize;
        if minimum_bits_needed > bit_len {
            return Err(TonCellError::cell_builder_error(format!(
                "Value {} doesn't fit in {} bits (takes {} bits)",
                val, bit_len, minimum_bits_needed
            )));
        }
        self.ensure_capacity(bit_len)?;

        let value_bytes = val.to_bytes_be();
        let value_bits = value_bytes.len() * 8;
        let padding = bit_len.saturating_sub(value_bits);
        for _ in 0..padding {
            self.store_bit(false)?;
        }
        if value_bits > bit_len {
            // leading zero bits of the first byte don't fit, `minimum_bits_needed` guarantees they are zero
            let first_byte_bits = 8 - (value_bits - bit_len);
            self.store_u8(first_byte_bits, value_bytes[0])?;
            self.store_slice(&value_bytes[1..])?;
        } else {
            self.store_slice(&value_bytes)?;
        }
        Ok(self)
    }

    pub fn store_byte(&mut self, val: u8) -> Result<&mut Self, TonCellError> {
        self.store_u8(8, val)
    }

    pub fn store_slice(&mut self, slice: &[u8]) -> Result<&mut Self, TonCellError> {
        for val in slice {
            self.store_byte(*val)?;
        }
        Ok(self)
    }

    pub fn store_string(&mut self, val: &str) -> Result<&mut Self, TonCellError> {
        self.store_slice(val.as_bytes())
    }

    /// Stores `val` as a snake chain: the bytes that fit stay in this cell,
    /// the tail moves into continuation cells linked by the first free reference.
    pub fn store_snake_bytes(&mut self, val: &[u8]) -> Result<&mut Self, TonCellError> {
        let head_capacity = self.remaining_bits() / 8;
        SnakeChain::new(val, head_capacity).store(self)?;
        Ok(self)
    }

    pub fn store_snake_string(&mut self, val: &str) -> Result<&mut Self, TonCellError> {
        self.store_snake_bytes(val.as_bytes())
    }

    /// Stores `VarUInteger 16` amount: 4-bit byte length followed by the value.
    pub fn store_coins(&mut self, val: &BigUint) -> Result<&mut Self, TonCellError> {
        if val.is_zero() {
            self.store_u8(4, 0)
        } else {
            let num_bytes = (val.bits() as usize).div_ceil(8);
            if num_bytes > 15 {
                return Err(TonCellError::cell_builder_error(format!(
                    "Coins value {} doesn't fit in 15 bytes",
                    val
                )));
            }
            self.store_u8(4, num_bytes as u8)?;
            self.store_uint(num_bytes * 8, val)
        }
    }

    /// Stores `addr_std$10 anycast:nothing workchain_id:int8 address:bits256`.
    ///
    /// The zero account id is a regular address and is never collapsed into `addr_none`.
    pub fn store_address(&mut self, val: &TonAddress) -> Result<&mut Self, TonCellError> {
        self.store_u8(2, 0b10u8)?;
        self.store_bit(false)?;
        let wc = (val.workchain & 0xff) as u8;
        self.store_u8(8, wc)?;
        self.store_slice(&val.hash_part)?;
        Ok(self)
    }

    /// Stores `MsgAddress` that may be absent: `None` becomes `addr_none$00`.
    pub fn store_maybe_address(
        &mut self,
        val: Option<&TonAddress>,
    ) -> Result<&mut Self, TonCellError> {
        match val {
            Some(address) => self.store_address(address),
            None => self.store_u8(2, 0),
        }
    }

    /// Adds reference to an existing `Cell`.
    ///
    /// The reference is passed as `ArcCell` so it might be references from other cells.
    pub fn store_reference(&mut self, cell: &ArcCell) -> Result<&mut Self, TonCellError> {
        let ref_count = self.references.len() + 1;
        if ref_count > MAX_CELL_REFERENCES {
            return Err(TonCellError::cell_builder_error(format!(
                "Cell must contain at most {} references, got {}",
                MAX_CELL_REFERENCES, ref_count
            )));
        }
        self.references.push(cell.clone());
        Ok(self)
    }

    pub fn store_references(&mut self, refs: &[ArcCell]) -> Result<&mut Self, TonCellError> {
        for r in refs {
            self.store_reference(r)?;
        }
        Ok(self)
    }

    /// Adds a reference to a newly constructed `Cell`.
    pub fn store_child(&mut self, cell: Cell) -> Result<&mut Self, TonCellError> {
        self.store_reference(&Arc::new(cell))
    }

    // https://docs.ton.org/develop/data-formats/tl-b-types#maybe
    pub fn store_maybe_cell_ref(
        &mut self,
        maybe_cell: &Option<ArcCell>,
    ) -> Result<&mut Self, TonCellError> {
        if let Some(cell) = maybe_cell {
            self.store_bit(true)?;
            self.store_reference(cell)?;
        } else {
            self.store_bit(false)?;
        }

        Ok(self)
    }

    pub fn remaining_bits(&self) -> usize {
        MAX_CELL_BITS - self.bits_to_write
    }

    pub fn remaining_references(&self) -> usize {
        MAX_CELL_REFERENCES - self.references.len()
    }

    pub fn build(&mut self) -> Result<Cell, TonCellError> {
        let mut trailing_zeros = 0;
        while !self.bit_writer.byte_aligned() {
            self.bit_writer.write_bit(false).map_cell_builder_error()?;
            trailing_zeros += 1;
        }

        if let Some(vec) = self.bit_writer.writer() {
            let bit_len = vec.len() * 8 - trailing_zeros;
            Cell::new(vec.clone(), bit_len, self.references.clone())
        } else {
            Err(TonCellError::CellBuilderError(
                "Stream is not byte-aligned".to_string(),
            ))
        }
    }

    fn ensure_capacity(&self, bit_len: usize) -> Result<(), TonCellError> {
        if self.bits_to_write + bit_len > MAX_CELL_BITS {
            return Err(TonCellError::cell_builder_error(format!(
                "Cell must contain at most {} bits, got {}",
                MAX_CELL_BITS,
                self.bits_to_write + bit_len
            )));
        }
        Ok(())
    }
}

impl Default for CellBuilder {
    fn default() -> Self {
        Self::new()
    }
}
