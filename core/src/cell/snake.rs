use crate::cell::{ArcCell, CellBuilder, CellParser, MapTonCellError, TonCellError, MAX_CELL_BITS};

/// Bytes carried by one continuation cell of a snake chain.
pub const SNAKE_LINK_CAPACITY: usize = MAX_CELL_BITS / 8;

/// Byte string laid out over a bounded head buffer and a chain of continuation cells.
///
/// The head holds at most `head_capacity` bytes and is written into the caller's builder.
/// Each continuation cell holds up to [`SNAKE_LINK_CAPACITY`] bytes and refers to the next
/// one through its only reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnakeChain<'a> {
    head: &'a [u8],
    links: Vec<&'a [u8]>,
}

impl<'a> SnakeChain<'a> {
    pub fn new(bytes: &'a [u8], head_capacity: usize) -> Self {
        let (head, rest) = bytes.split_at(head_capacity.min(bytes.len()));
        SnakeChain {
            head,
            links: rest.chunks(SNAKE_LINK_CAPACITY).collect(),
        }
    }

    pub fn head(&self) -> &[u8] {
        self.head
    }

    pub fn links(&self) -> &[&'a [u8]] {
        &self.links
    }

    pub fn store(&self, builder: &mut CellBuilder) -> Result<(), TonCellError> {
        if !self.links.is_empty() && builder.remaining_references() == 0 {
            return Err(TonCellError::cell_builder_error(
                "No free reference left for snake continuation",
            ));
        }
        builder.store_slice(self.head)?;
        if let Some(first_link) = self.build_links()? {
            builder.store_reference(&first_link)?;
        }
        Ok(())
    }

    // built from the tail so every link can refer to an already finished successor
    fn build_links(&self) -> Result<Option<ArcCell>, TonCellError> {
        let mut next: Option<ArcCell> = None;
        for chunk in self.links.iter().rev() {
            let mut builder = CellBuilder::new();
            builder.store_slice(chunk)?;
            if let Some(successor) = &next {
                builder.store_reference(successor)?;
            }
            next = Some(builder.build()?.to_arc());
        }
        Ok(next)
    }
}

impl CellParser<'_> {
    /// Loads the rest of this cell and all its continuation cells as one byte string.
    pub fn load_snake_bytes(&mut self) -> Result<Vec<u8>, TonCellError> {
        let mut buffer = self.load_snake_link_payload()?;
        let mut next = self.load_snake_continuation()?;
        while let Some(link) = next {
            let mut parser = link.parser();
            buffer.extend(parser.load_snake_link_payload()?);
            next = parser.load_snake_continuation()?;
        }
        Ok(buffer)
    }

    pub fn load_snake_string(&mut self) -> Result<String, TonCellError> {
        let bytes = self.load_snake_bytes()?;
        String::from_utf8(bytes).map_cell_parser_error()
    }

    fn load_snake_link_payload(&mut self) -> Result<Vec<u8>, TonCellError> {
        let remaining_bits = self.remaining_bits();
        if remaining_bits % 8 != 0 {
            return Err(TonCellError::InvalidSnakeChain(format!(
                "link payload is not byte aligned ({} bits)",
                remaining_bits
            )));
        }
        self.load_bytes(remaining_bits / 8)
    }

    fn load_snake_continuation(&mut self) -> Result<Option<ArcCell>, TonCellError> {
        match self.remaining_refs() {
            0 => Ok(None),
            1 => Ok(Some(self.next_reference()?)),
            n => Err(TonCellError::InvalidSnakeChain(format!(
                "found link with {} references",
                n
            ))),
        }
    }
}
