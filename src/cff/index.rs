//! CFF INDEX structure (§4.8): `{count: u16, offSize: u8, offsets: [off]*count+1, data}`.

use crate::error::{DecodeError, Result};
use crate::parser::Stream;

/// A decoded, zero-copy CFF INDEX.
#[derive(Clone, Debug)]
pub struct Index<'a> {
    data: &'a [u8],
    offsets: std::vec::Vec<u32>,
}

pub fn parse_index<'a>(s: &mut Stream<'a>) -> Result<Index<'a>> {
    let count: u16 = s.read()?;
    if count == 0 {
        return Ok(Index { data: &[], offsets: std::vec![0] });
    }

    let off_size: u8 = s.read()?;
    if !(1..=4).contains(&off_size) {
        return Err(DecodeError::CffStructure("INDEX offSize outside [1, 4]"));
    }

    let mut offsets = std::vec::Vec::with_capacity(usize::from(count) + 1);
    for _ in 0..=count {
        offsets.push(read_offset(s, off_size)?);
    }

    // Offsets are 1-based; normalize to 0-based so `offsets.last()` is the
    // data blob's length directly.
    for off in offsets.iter_mut() {
        *off = off.checked_sub(1).ok_or(DecodeError::CffStructure("INDEX offset is zero"))?;
    }

    let data_len = *offsets.last().unwrap() as usize;
    let data = s.read_bytes(data_len)?;

    Ok(Index { data, offsets })
}

fn read_offset(s: &mut Stream, off_size: u8) -> Result<u32> {
    match off_size {
        1 => Ok(u32::from(s.read::<u8>()?)),
        2 => Ok(u32::from(s.read::<u16>()?)),
        3 => s.read_u24(),
        4 => s.read::<u32>(),
        _ => unreachable!(),
    }
}

impl<'a> Index<'a> {
    #[inline]
    pub fn len(&self) -> u16 {
        (self.offsets.len() - 1) as u16
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: u16) -> Option<&'a [u8]> {
        let i = usize::from(index);
        if i + 1 >= self.offsets.len() {
            return None;
        }
        let start = self.offsets[i] as usize;
        let end = self.offsets[i + 1] as usize;
        self.data.get(start..end)
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_entry_index() {
        let mut data = Vec::new();
        data.extend_from_slice(&2u16.to_be_bytes()); // count
        data.push(1); // offSize
        data.extend_from_slice(&[1, 3, 5]); // offsets (1-based)
        data.extend_from_slice(&[0xAA, 0xBB, 0xCC, 0xDD]); // data blob

        let mut s = Stream::new(&data);
        let index = parse_index(&mut s).unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.get(0), Some(&[0xAA, 0xBB][..]));
        assert_eq!(index.get(1), Some(&[0xCC, 0xDD][..]));
        assert_eq!(index.get(2), None);
    }
}
