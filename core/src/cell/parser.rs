use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, Numeric};
use num_bigint::BigUint;
use num_traits::identities::Zero;

use crate::cell::util::*;
use crate::cell::{ArcCell, MapTonCellError, TonCellError};
use crate::TonAddress;

pub struct CellParser<'a> {
    pub(crate) bit_len: usize,
    pub(crate) bit_reader: BitReader<Cursor<&'a [u8]>, BigEndian>,
    pub(crate) references: &'a [ArcCell],
    next_ref: usize,
}

impl<'a> CellParser<'a> {
    pub fn new(bit_len: usize, data: &'a [u8], references: &'a [ArcCell]) -> Self {
        let cursor = Cursor::new(data);
        let bit_reader = BitReader::endian(cursor, BigEndian);
        CellParser {
            bit_len,
            bit_reader,
            references,
            next_ref: 0,
        }
    }

    pub fn remaining_bits(&mut self) -> usize {
        let pos = self.bit_reader.position_in_bits().unwrap_or_default() as usize;
        self.bit_len.saturating_sub(pos)
    }

    /// Return number of full bytes remaining
    pub fn remaining_bytes(&mut self) -> usize {
        self.remaining_bits() / 8
    }

    pub fn remaining_refs(&self) -> usize {
        self.references.len() - self.next_ref
    }

    pub fn load_bit(&mut self) -> Result<bool, TonCellError> {
        self.ensure_enough_bits(1)?;
        self.bit_reader.read_bit().map_cell_parser_error()
    }

    pub fn load_u8(&mut self, bit_len: usize) -> Result<u8, TonCellError> {
        self.load_number(bit_len)
    }

    pub fn load_u32(&mut self, bit_len: usize) -> Result<u32, TonCellError> {
        self.load_number(bit_len)
    }

    pub fn load_u64(&mut self, bit_len: usize) -> Result<u64, TonCellError> {
        self.load_number(bit_len)
    }

    pub fn load_uint(&mut self, bit_len: usize) -> Result<BigUint, TonCellError> {
        self.ensure_enough_bits(bit_len)?;
        let num_words = bit_len.div_ceil(32);
        let high_word_bits = if bit_len % 32 == 0 { 32 } else { bit_len % 32 };
        let mut words: Vec<u32> = vec![0_u32; num_words];
        let high_word = self.load_u32(high_word_bits)?;
        words[num_words - 1] = high_word;
        for i in (0..num_words - 1).rev() {
            let word = self.load_u32(32)?;
            words[i] = word;
        }
        Ok(BigUint::new(words))
    }

    pub fn load_byte(&mut self) -> Result<u8, TonCellError> {
        self.load_u8(8)
    }

    pub fn load_slice(&mut self, slice: &mut [u8]) -> Result<(), TonCellError> {
        self.ensure_enough_bits(slice.len() * 8)?;
        self.bit_reader.read_bytes(slice).map_cell_parser_error()
    }

    pub fn load_bytes(&mut self, num_bytes: usize) -> Result<Vec<u8>, TonCellError> {
        let mut res = vec![0_u8; num_bytes];
        self.load_slice(res.as_mut_slice())?;
        Ok(res)
    }

    pub fn load_bits_to_slice(
        &mut self,
        num_bits: usize,
        slice: &mut [u8],
    ) -> Result<(), TonCellError> {
        self.ensure_enough_bits(num_bits)?;
        self.bit_reader.read_bits(num_bits, slice)?;
        Ok(())
    }

    pub fn load_bits(&mut self, num_bits: usize) -> Result<Vec<u8>, TonCellError> {
        let mut res = vec![0_u8; num_bits.div_ceil(8)];
        self.load_bits_to_slice(num_bits, res.as_mut_slice())?;
        Ok(res)
    }

    pub fn load_utf8(&mut self, num_bytes: usize) -> Result<String, TonCellError> {
        let bytes = self.load_bytes(num_bytes)?;
        String::from_utf8(bytes).map_cell_parser_error()
    }

    pub fn load_coins(&mut self) -> Result<BigUint, TonCellError> {
        let num_bytes = self.load_u8(4)?;
        if num_bytes == 0 {
            Ok(BigUint::zero())
        } else {
            self.load_uint(num_bytes as usize * 8)
        }
    }

    /// Loads `addr_std`; `addr_none` is rejected, use [`CellParser::load_maybe_address`] where it is allowed.
    pub fn load_address(&mut self) -> Result<TonAddress, TonCellError> {
        self.load_maybe_address()?.ok_or_else(|| {
            TonCellError::cell_parser_error("Expected addr_std, got addr_none")
        })
    }

    /// Loads `MsgAddress`, mapping `addr_none` to `None`.
    pub fn load_maybe_address(&mut self) -> Result<Option<TonAddress>, TonCellError> {
        self.ensure_enough_bits(2)?;
        let tp = self.bit_reader.read::<u8>(2).map_cell_parser_error()?;
        match tp {
            0 => Ok(None),
            2 => {
                self.ensure_enough_bits(1 + 8 + 32 * 8)?;
                let anycast = self.bit_reader.read_bit().map_cell_parser_error()?;
                if anycast {
                    return Err(TonCellError::cell_parser_error(
                        "Anycast addresses are not supported",
                    ));
                }
                let wc = self.bit_reader.read::<u8>(8).map_cell_parser_error()?;
                let mut hash_part = [0_u8; 32];
                self.bit_reader
                    .read_bytes(&mut hash_part)
                    .map_cell_parser_error()?;
                Ok(Some(TonAddress::new(wc as i8 as i32, &hash_part)))
            }
            _ => Err(TonCellError::InvalidAddressType(tp)),
        }
    }

    /// Takes the next unread reference.
    pub fn next_reference(&mut self) -> Result<ArcCell, TonCellError> {
        let reference = self
            .references
            .get(self.next_ref)
            .ok_or(TonCellError::InvalidIndex {
                idx: self.next_ref,
                ref_count: self.references.len(),
            })?
            .clone();
        self.next_ref += 1;
        Ok(reference)
    }

    // https://docs.ton.org/develop/data-formats/tl-b-types#maybe
    pub fn load_maybe_cell_ref(&mut self) -> Result<Option<ArcCell>, TonCellError> {
        if self.load_bit()? {
            Ok(Some(self.next_reference()?))
        } else {
            Ok(None)
        }
    }

    pub fn ensure_empty(&mut self) -> Result<(), TonCellError> {
        let remaining_bits = self.remaining_bits();
        let remaining_refs = self.remaining_refs();
        if remaining_bits == 0 && remaining_refs == 0 {
            Ok(())
        } else {
            Err(TonCellError::NonEmptyReader {
                remaining_bits,
                remaining_refs,
            })
        }
    }

    pub fn skip_bits(&mut self, num_bits: usize) -> Result<(), TonCellError> {
        self.ensure_enough_bits(num_bits)?;
        self.bit_reader
            .skip(num_bits as u32)
            .map_cell_parser_error()
    }

    fn load_number<N: Numeric>(&mut self, bit_len: usize) -> Result<N, TonCellError> {
        self.ensure_enough_bits(bit_len)?;
        if bit_len == 0 {
            return Ok(N::default());
        }

        self.bit_reader
            .read::<N>(bit_len as u32)
            .map_cell_parser_error()
    }

    fn ensure_enough_bits(&mut self, bit_len: usize) -> Result<(), TonCellError> {
        if self.remaining_bits() < bit_len {
            return Err(TonCellError::CellParserError(
                "Not enough bits to read".to_owned(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;

    use crate::cell::{CellBuilder, CellParser};
    use crate::TonAddress;

    fn create_parser(data: &[u8], bit_len: usize) -> CellParser<'_> {
        CellParser::new(bit_len, data, &[])
    }

    #[test]
    fn test_load_bit() {
        let mut parser = create_parser(&[0b10101010], 4);
        assert!(parser.load_bit().unwrap());
        assert!(!parser.load_bit().unwrap());
        assert!(parser.load_bit().unwrap());
        assert!(!parser.load_bit().unwrap());
        assert!(parser.load_bit().is_err());
    }

    #[test]
    fn test_load_u8() {
        let mut parser = create_parser(&[0b10101010], 4);
        assert_eq!(parser.load_u8(4).unwrap(), 0b1010);
        assert!(parser.load_u8(1).is_err());
    }

    #[test]
    fn test_load_u32() {
        let mut parser = create_parser(&[0b10101010, 0b01010101], 13);
        assert_eq!(parser.load_u32(8).unwrap(), 0b10101010);
        assert!(parser.load_u32(8).is_err());
    }

    #[test]
    fn test_load_uint() {
        let mut parser = create_parser(&[0b10101010, 0b01010101], 14);
        assert_eq!(
            parser.load_uint(10).unwrap(),
            BigUint::from(0b1010101001u64)
        );
        assert!(parser.load_uint(5).is_err());
    }

    #[test]
    fn test_load_bytes() {
        let mut parser = create_parser(
            &[0b10101010, 0b01010101, 0b10101010, 0b10101010, 0b10101010],
            32,
        );
        parser.load_bit().unwrap();
        let slice = parser.load_bytes(2).unwrap();
        assert_eq!(slice, [0b01010100, 0b10101011]);
        assert!(parser.load_bytes(2).is_err());
    }

    #[test]
    fn test_load_bits() {
        let mut parser = create_parser(
            &[0b10101010, 0b01010101, 0b10101010, 0b10101010, 0b10101010],
            25,
        );
        parser.load_bit().unwrap();
        let slice = parser.load_bits(5).unwrap();
        assert_eq!(slice, [0b01010000]);
        let slice = parser.load_bits(15).unwrap();
        assert_eq!(slice, [0b10010101, 0b01101010]);
        assert!(parser.load_bits(5).is_err());
    }

    #[test]
    fn test_load_utf8() {
        let mut parser = create_parser("a1j\0".as_bytes(), 31);
        let string = parser.load_utf8(2).unwrap();
        assert_eq!(string, "a1");
        let string = parser.load_utf8(1).unwrap();
        assert_eq!(string, "j");
        assert!(parser.load_utf8(1).is_err());
    }

    #[test]
    fn test_load_coins() {
        let mut parser = create_parser(
            &[
                0b00011111, 0b11110011, 0b11110011, 0b11110011, 0b11110011, 0b00011111, 0b11110011,
            ],
            48,
        );
        assert_eq!(parser.load_coins().unwrap(), BigUint::from(0b11111111u64));
        assert_eq!(
            parser.load_coins().unwrap(),
            BigUint::from(0b111100111111001111110011u64)
        );
        assert!(parser.load_coins().is_err());
    }

    #[test]
    fn test_load_address() {
        let mut parser = create_parser(&[0], 3);
        assert_eq!(parser.load_maybe_address().unwrap(), None);
        assert!(parser.load_maybe_address().is_err());

        let mut parser = create_parser(&[0], 2);
        assert!(parser.load_address().is_err());
    }

    #[test]
    fn test_load_masterchain_address() {
        let addr = TonAddress::new(-1, &[7u8; 32]);
        let cell = CellBuilder::new().store_address(&addr).unwrap().build().unwrap();
        assert_eq!(cell.parser().load_address().unwrap(), addr);
    }

    #[test]
    fn test_references() {
        let child = CellBuilder::new().store_u8(8, 5).unwrap().build().unwrap().to_arc();
        let cell = CellBuilder::new()
            .store_maybe_cell_ref(&Some(child.clone()))
            .unwrap()
            .store_maybe_cell_ref(&None)
            .unwrap()
            .build()
            .unwrap();
        let mut parser = cell.parser();
        assert_eq!(parser.load_maybe_cell_ref().unwrap(), Some(child));
        assert_eq!(parser.load_maybe_cell_ref().unwrap(), None);
        assert!(parser.next_reference().is_err());
        assert!(parser.ensure_empty().is_ok());
    }

    #[test]
    fn test_ensure_empty() {
        let mut parser = create_parser(&[0b10101010], 7);
        parser.load_u8(4).unwrap();
        assert!(parser.ensure_empty().is_err());
        parser.load_u8(3).unwrap();
        assert!(parser.ensure_empty().is_ok());
    }

    #[test]
    fn test_skip_bits_not_enough_bits() {
        let mut parser = create_parser(&[0b11111001, 0b00001010], 12);
        assert!(parser.skip_bits(5).is_ok());
        assert_eq!(parser.load_bits(5).unwrap(), [0b00100000]);
        assert!(parser.skip_bits(3).is_err());
    }
}
