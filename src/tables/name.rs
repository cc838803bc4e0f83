// https://docs.microsoft.com/en-us/typography/opentype/spec/name

use crate::error::{DecodeError, Result};
use crate::parser::{FromData, LazyArray16, Stream};

const WINDOWS_PLATFORM_ID: u16 = 3;
const MACINTOSH_PLATFORM_ID: u16 = 1;
const UNICODE_PLATFORM_ID: u16 = 0;
const WINDOWS_UNICODE_BMP_ENCODING_ID: u16 = 1;
const WINDOWS_EN_US_LANGUAGE_ID: u16 = 0x0409;

pub const FAMILY_NAME_ID: u16 = 1;
pub const POSTSCRIPT_NAME_ID: u16 = 6;

#[derive(Clone, Copy, Debug)]
struct NameRecord {
    platform_id: u16,
    encoding_id: u16,
    language_id: u16,
    name_id: u16,
    length: u16,
    offset: u16,
}

impl FromData for NameRecord {
    const SIZE: usize = 12;

    #[inline]
    fn parse(data: &[u8]) -> Self {
        let mut s = crate::parser::SafeStream::new(data);
        NameRecord {
            platform_id: s.read(),
            encoding_id: s.read(),
            language_id: s.read(),
            name_id: s.read(),
            length: s.read(),
            offset: s.read(),
        }
    }
}

/// Decoded `name` table (C3), format 0 only (§4.3).
#[derive(Clone, Copy, Debug)]
pub struct Table<'a> {
    records: LazyArray16<'a, NameRecord>,
    storage: &'a [u8],
}

pub fn parse(data: &[u8]) -> Result<Table> {
    let mut s = Stream::new(data);
    let format: u16 = s.read()?;
    if format != 0 {
        return Err(DecodeError::UnsupportedFormat("name.format"));
    }
    let count: u16 = s.read()?;
    let storage_offset: u16 = s.read()?;
    let records = s.read_array16::<NameRecord>(count)?;
    let storage = data.get(usize::from(storage_offset)..).unwrap_or(&[]);
    Ok(Table { records, storage })
}

impl<'a> Table<'a> {
    /// Resolution order (§4.3): Windows/UnicodeBMP/en-US, then
    /// Windows/UnicodeBMP any language, then the first Windows record, then
    /// Macintosh, then anything.
    #[cfg(feature = "std")]
    pub fn find(&self, name_id: u16) -> Option<std::string::String> {
        let mut best_windows_any_lang: Option<NameRecord> = None;
        let mut first_windows: Option<NameRecord> = None;
        let mut first_mac: Option<NameRecord> = None;
        let mut any: Option<NameRecord> = None;

        for rec in self.records.iter() {
            if rec.name_id != name_id {
                continue;
            }
            any.get_or_insert(rec);

            if rec.platform_id == WINDOWS_PLATFORM_ID
                && rec.encoding_id == WINDOWS_UNICODE_BMP_ENCODING_ID
            {
                if rec.language_id == WINDOWS_EN_US_LANGUAGE_ID {
                    return self.decode(rec);
                }
                best_windows_any_lang.get_or_insert(rec);
            }

            if rec.platform_id == WINDOWS_PLATFORM_ID {
                first_windows.get_or_insert(rec);
            }

            if rec.platform_id == MACINTOSH_PLATFORM_ID {
                first_mac.get_or_insert(rec);
            }
        }

        best_windows_any_lang
            .or(first_windows)
            .or(first_mac)
            .or(any)
            .and_then(|rec| self.decode(rec))
    }

    #[cfg(feature = "std")]
    fn decode(&self, rec: NameRecord) -> Option<std::string::String> {
        let start = usize::from(rec.offset);
        let end = start.checked_add(usize::from(rec.length))?;
        let bytes = self.storage.get(start..end)?;

        if rec.platform_id == WINDOWS_PLATFORM_ID || rec.platform_id == UNICODE_PLATFORM_ID {
            decode_utf16_be(bytes)
        } else if rec.platform_id == MACINTOSH_PLATFORM_ID {
            Some(decode_mac_roman(bytes))
        } else {
            decode_utf16_be(bytes)
        }
    }
}

#[cfg(feature = "std")]
fn decode_utf16_be(bytes: &[u8]) -> Option<std::string::String> {
    if bytes.len() % 2 != 0 {
        return None;
    }
    let units: std::vec::Vec<u16> =
        bytes.chunks_exact(2).map(|c| u16::from_be_bytes([c[0], c[1]])).collect();
    std::string::String::from_utf16(&units).ok()
}

#[cfg(feature = "std")]
fn decode_mac_roman(bytes: &[u8]) -> std::string::String {
    // Printable ASCII range is identical between Mac Roman and ASCII; the
    // high half of Mac Roman is rare in practice for family/postscript
    // names and is mapped to the Unicode replacement character here.
    bytes
        .iter()
        .map(|&b| if b < 0x80 { b as char } else { '\u{FFFD}' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(records: &[(u16, u16, u16, u16, &str)]) -> Vec<u8> {
        let mut storage = Vec::new();
        let mut entries = Vec::new();
        for &(platform_id, encoding_id, language_id, name_id, text) in records {
            let utf16: Vec<u8> = text.encode_utf16().flat_map(|u| u.to_be_bytes()).collect();
            entries.push((platform_id, encoding_id, language_id, name_id, storage.len() as u16, utf16.len() as u16));
            storage.extend_from_slice(&utf16);
        }

        let mut out = Vec::new();
        out.extend_from_slice(&0u16.to_be_bytes());
        out.extend_from_slice(&(entries.len() as u16).to_be_bytes());
        let storage_offset = 6 + entries.len() * 12;
        out.extend_from_slice(&(storage_offset as u16).to_be_bytes());
        for (platform_id, encoding_id, language_id, name_id, offset, length) in entries {
            out.extend_from_slice(&platform_id.to_be_bytes());
            out.extend_from_slice(&encoding_id.to_be_bytes());
            out.extend_from_slice(&language_id.to_be_bytes());
            out.extend_from_slice(&name_id.to_be_bytes());
            out.extend_from_slice(&length.to_be_bytes());
            out.extend_from_slice(&offset.to_be_bytes());
        }
        out.extend_from_slice(&storage);
        out
    }

    #[test]
    fn prefers_windows_en_us() {
        let data = build(&[
            (1, 0, 0, 1, "MacName"),
            (3, 1, 0x0411, 1, "JapaneseWin"),
            (3, 1, 0x0409, 1, "EnglishWin"),
        ]);
        let table = parse(&data).unwrap();
        assert_eq!(table.find(1).as_deref(), Some("EnglishWin"));
    }

    #[test]
    fn falls_back_to_mac_when_no_windows_record() {
        let data = build(&[(1, 0, 0, 1, "MacOnly")]);
        let table = parse(&data).unwrap();
        assert_eq!(table.find(1).as_deref(), Some("MacOnly"));
    }
}
