use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::cell::raw::{RawBagOfCells, RawCell};
use crate::cell::*;
use crate::TonHash;

#[derive(PartialEq, Eq, Debug, Clone, Hash)]
pub struct BagOfCells {
    pub roots: Vec<ArcCell>,
}

impl BagOfCells {
    pub fn new(roots: &[ArcCell]) -> BagOfCells {
        BagOfCells {
            roots: roots.to_vec(),
        }
    }

    pub fn from_root(root: Cell) -> BagOfCells {
        BagOfCells {
            roots: vec![Arc::new(root)],
        }
    }

    pub fn num_roots(&self) -> usize {
        self.roots.len()
    }

    pub fn root(&self, idx: usize) -> Result<&ArcCell, TonCellError> {
        self.roots.get(idx).ok_or_else(|| {
            TonCellError::boc_deserialization_error(format!(
                "Invalid root index: {}, BoC contains {} roots",
                idx,
                self.roots.len()
            ))
        })
    }

    pub fn single_root(self) -> Result<ArcCell, TonCellError> {
        let roots_count = self.roots.len();
        match <[ArcCell; 1]>::try_from(self.roots) {
            Ok([root]) => Ok(root),
            Err(_) => Err(TonCellError::CellParserError(format!(
                "Single root expected, got {roots_count}"
            ))),
        }
    }

    pub fn parse(serial: &[u8]) -> Result<BagOfCells, TonCellError> {
        let raw = RawBagOfCells::parse(serial)?;
        let num_cells = raw.cells.len();
        let mut cells: Vec<ArcCell> = Vec::with_capacity(num_cells);

        // children have greater indices, so cells are materialized from the end
        for (cell_index, raw_cell) in raw.cells.into_iter().enumerate().rev() {
            let mut references = Vec::with_capacity(raw_cell.references.len());
            for ref_index in &raw_cell.references {
                if *ref_index <= cell_index || *ref_index >= num_cells {
                    return Err(TonCellError::boc_deserialization_error(format!(
                        "Cell {} has invalid reference to cell {}",
                        cell_index, ref_index
                    )));
                }
                references.push(cells[num_cells - 1 - ref_index].clone());
            }

            let cell = Cell::new(raw_cell.data, raw_cell.bit_len, references)
                .map_boc_deserialization_error()?;
            cells.push(cell.to_arc());
        }

        let roots = raw
            .roots
            .into_iter()
            .map(|r| &cells[num_cells - 1 - r])
            .map(Arc::clone)
            .collect();

        Ok(BagOfCells { roots })
    }

    pub fn parse_hex(hex: &str) -> Result<BagOfCells, TonCellError> {
        let str: String = hex.chars().filter(|c| !c.is_whitespace()).collect();
        let bin = hex::decode(str.as_str()).map_boc_deserialization_error()?;
        Self::parse(&bin)
    }

    pub fn parse_base64(base64: &str) -> Result<BagOfCells, TonCellError> {
        let bin = STANDARD.decode(base64).map_boc_deserialization_error()?;
        Self::parse(&bin)
    }

    pub fn serialize(&self, has_crc32: bool) -> Result<Vec<u8>, TonCellError> {
        let root = match self.roots.as_slice() {
            [root] => root,
            roots => {
                return Err(TonCellError::boc_serialization_error(format!(
                    "Single root expected, got {}",
                    roots.len()
                )))
            }
        };
        raw_boc_from_root(root)?.serialize(has_crc32)
    }

    pub fn to_base64(&self, has_crc32: bool) -> Result<String, TonCellError> {
        Ok(STANDARD.encode(self.serialize(has_crc32)?))
    }
}

fn raw_boc_from_root(root: &ArcCell) -> Result<RawBagOfCells, TonCellError> {
    let ordered = topological_order(root);
    let index_by_hash: HashMap<TonHash, usize> = ordered
        .iter()
        .enumerate()
        .map(|(index, cell)| (cell.cell_hash(), index))
        .collect();

    let cells = ordered
        .iter()
        .map(|cell| {
            let references = cell
                .references()
                .iter()
                .map(|reference| {
                    index_by_hash
                        .get(&reference.cell_hash())
                        .copied()
                        .ok_or_else(|| {
                            TonCellError::boc_serialization_error(format!(
                                "Couldn't find cell with hash {} while searching for references",
                                hex::encode(reference.cell_hash())
                            ))
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RawCell {
                data: cell.data().to_vec(),
                bit_len: cell.bit_len(),
                references,
            })
        })
        .collect::<Result<Vec<_>, TonCellError>>()?;

    Ok(RawBagOfCells {
        cells,
        roots: vec![0],
    })
}

/// Deduplicated cells of the tree, every parent placed before its children.
fn topological_order(root: &ArcCell) -> Vec<ArcCell> {
    fn visit(cell: &ArcCell, visited: &mut HashSet<TonHash>, post_order: &mut Vec<ArcCell>) {
        if !visited.insert(cell.cell_hash()) {
            return;
        }
        for reference in cell.references() {
            visit(reference, visited, post_order);
        }
        post_order.push(cell.clone());
    }

    let mut visited = HashSet::new();
    let mut post_order = Vec::new();
    visit(root, &mut visited, &mut post_order);
    post_order.reverse();
    post_order
}
