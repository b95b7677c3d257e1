// Pixel data in a BODY chunk is either stored raw (one index per pixel) or
// packed with a byte-oriented run-length scheme. Each run starts with a
// signed control byte:
//   control > 0  -> control + 1 literal indices follow
//   control <= 0 -> the next index is repeated 1 - control times
// Runs fill the image row by row and simply continue on the next row when
// they reach the right edge.

use serde::Serialize;
use tracing::{trace, warn};

use crate::binary_utils::EndianCursor;
use crate::error::{Error, Result};

/// Receives decoded palette indices.
pub trait PixelSink {
    fn set_pixel(&mut self, x: u16, y: u16, index: u8);
}

/// Pixel compression declared by the bitmap header.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[repr(u16)]
pub enum Compression {
    #[default]
    None = 0,
    ByteRun = 256,
}

impl TryFrom<u16> for Compression {
    type Error = Error;

    fn try_from(mode: u16) -> Result<Self> {
        match mode {
            0 => Ok(Compression::None),
            256 => Ok(Compression::ByteRun),
            _ => Err(Error::UnsupportedCompression { mode }),
        }
    }
}

/// Decode `length` bytes of pixel data into `sink`.
pub fn decode_pixels<S: PixelSink>(
    cursor: &mut EndianCursor<'_>,
    compression: Compression,
    width: u16,
    height: u16,
    length: u32,
    sink: &mut S,
) -> Result<()> {
    match compression {
        Compression::None => decode_raw(cursor, width, height, length, sink),
        Compression::ByteRun => {
            decode_byterun(cursor, width, height, length, sink);
            Ok(())
        }
    }
}

/// Reject a chunk whose length cannot hold the image. Only raw data has a
/// fixed size; run-length data of any length is accepted.
pub fn check_length(
    compression: Compression,
    width: u16,
    height: u16,
    length: u32,
) -> Result<()> {
    let expected = width as u32 * height as u32;
    if compression == Compression::None && length != expected {
        return Err(Error::SizeMismatch { length, expected });
    }
    Ok(())
}

/// One index per pixel, row-major. `length` must match the image exactly.
pub fn decode_raw<S: PixelSink>(
    cursor: &mut EndianCursor<'_>,
    width: u16,
    height: u16,
    length: u32,
    sink: &mut S,
) -> Result<()> {
    check_length(Compression::None, width, height, length)?;

    for y in 0..height {
        for x in 0..width {
            sink.set_pixel(x, y, cursor.read_u8()?);
        }
    }
    Ok(())
}

/// Run-length decode at most `length` bytes.
///
/// Never fails: input that ends early, or runs that do not fit the chunk,
/// leave the rest of the image untouched. Returns the number of pixel
/// positions that were advanced over.
pub fn decode_byterun<S: PixelSink>(
    cursor: &mut EndianCursor<'_>,
    width: u16,
    height: u16,
    length: u32,
    sink: &mut S,
) -> usize {
    let mut out = RowWriter::new(sink, width, height);
    let mut budget = length as usize;

    while budget > 0 {
        let Ok(control) = cursor.read_i8() else {
            break;
        };
        budget -= 1;
        // A trailing control byte is chunk padding
        if budget == 0 {
            break;
        }

        if control > 0 {
            let count = 1 + control as i16;
            trace!(count, "literal run");
            for _ in 0..count {
                if budget == 0 {
                    warn!("literal run overruns pixel chunk");
                    return out.advanced;
                }
                let Ok(index) = cursor.read_u8() else {
                    warn!("pixel data ends inside a literal run");
                    return out.advanced;
                };
                budget -= 1;
                out.put(index);
            }
        } else {
            let count = 1 - control as i16;
            trace!(count, "repeat run");
            let Ok(index) = cursor.read_u8() else {
                warn!("pixel data ends inside a repeat run");
                return out.advanced;
            };
            budget -= 1;
            for _ in 0..count {
                out.put(index);
            }
        }
    }

    if budget > 0 {
        warn!(missing = budget, "pixel data ends before its declared length");
    }
    out.advanced
}

/// Tracks the write position and wraps it to the next row at the right edge.
struct RowWriter<'s, S> {
    sink: &'s mut S,
    width: u32,
    height: u32,
    x: u32,
    y: u32,
    advanced: usize,
}

impl<'s, S: PixelSink> RowWriter<'s, S> {
    fn new(sink: &'s mut S, width: u16, height: u16) -> Self {
        Self {
            sink,
            width: width as u32,
            height: height as u32,
            x: 0,
            y: 0,
            advanced: 0,
        }
    }

    fn put(&mut self, index: u8) {
        if self.x < self.width && self.y < self.height {
            self.sink.set_pixel(self.x as u16, self.y as u16, index);
        }
        self.advanced += 1;
        self.x += 1;
        if self.x >= self.width {
            self.x = 0;
            self.y = self.y.saturating_add(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Grid {
        width: u16,
        cells: Vec<Option<u8>>,
    }

    impl Grid {
        fn new(width: u16, height: u16) -> Self {
            Self {
                width,
                cells: vec![None; width as usize * height as usize],
            }
        }
    }

    impl PixelSink for Grid {
        fn set_pixel(&mut self, x: u16, y: u16, index: u8) {
            let i = y as usize * self.width as usize + x as usize;
            assert!(self.cells[i].is_none(), "pixel ({}, {}) written twice", x, y);
            self.cells[i] = Some(index);
        }
    }

    #[test]
    fn compression_modes() {
        assert_eq!(Compression::try_from(0).unwrap(), Compression::None);
        assert_eq!(Compression::try_from(256).unwrap(), Compression::ByteRun);
        assert!(matches!(
            Compression::try_from(1),
            Err(Error::UnsupportedCompression { mode: 1 })
        ));
    }

    #[test]
    fn raw_requires_exact_length() {
        let data = [1, 2, 3, 4];
        let mut cursor = EndianCursor::big_endian(&data);
        let mut grid = Grid::new(2, 2);
        assert!(matches!(
            decode_raw(&mut cursor, 2, 2, 3, &mut grid),
            Err(Error::SizeMismatch {
                length: 3,
                expected: 4
            })
        ));
        assert_eq!(cursor.position(), 0);

        decode_raw(&mut cursor, 2, 2, 4, &mut grid).unwrap();
        assert_eq!(
            grid.cells,
            vec![Some(1), Some(2), Some(3), Some(4)]
        );
    }

    #[test]
    fn length_check_only_binds_raw_data() {
        assert!(check_length(Compression::None, 3, 2, 6).is_ok());
        assert!(matches!(
            check_length(Compression::None, u16::MAX, u16::MAX, 0),
            Err(Error::SizeMismatch {
                length: 0,
                expected: 4_294_836_225
            })
        ));
        assert!(check_length(Compression::ByteRun, u16::MAX, u16::MAX, 0).is_ok());
    }

    #[test]
    fn literal_and_repeat_runs_wrap_rows() {
        // 3 literal (control 2), then 3 copies of 9 (control -2)
        let data = [0x02, 7, 8, 6, 0xFE, 9];
        let mut cursor = EndianCursor::big_endian(&data);
        let mut grid = Grid::new(2, 3);

        let advanced = decode_byterun(&mut cursor, 2, 3, data.len() as u32, &mut grid);
        assert_eq!(advanced, 6);
        assert!(cursor.is_at_end());
        assert_eq!(
            grid.cells,
            vec![Some(7), Some(8), Some(6), Some(9), Some(9), Some(9)]
        );
    }

    #[test]
    fn zero_control_repeats_once() {
        let data = [0x00, 5, 0x80, 3];
        let mut cursor = EndianCursor::big_endian(&data);
        let mut grid = Grid::new(130, 1);

        let advanced = decode_byterun(&mut cursor, 130, 1, 4, &mut grid);
        assert_eq!(advanced, 1 + 129);
        assert_eq!(grid.cells[0], Some(5));
        assert!(grid.cells[1..].iter().all(|c| *c == Some(3)));
    }

    #[test]
    fn trailing_pad_byte_is_ignored() {
        // Odd payload padded to even: the pad is read as a control byte and dropped
        let data = [0xFD, 4, 0x00];
        let mut cursor = EndianCursor::big_endian(&data);
        let mut grid = Grid::new(2, 2);

        decode_byterun(&mut cursor, 2, 2, 3, &mut grid);
        assert!(cursor.is_at_end());
        assert_eq!(grid.cells, vec![Some(4); 4]);
    }

    #[test]
    fn runs_never_write_past_last_row() {
        let data = [0xF0, 1];
        let mut cursor = EndianCursor::big_endian(&data);
        let mut grid = Grid::new(2, 2);

        let advanced = decode_byterun(&mut cursor, 2, 2, 2, &mut grid);
        assert_eq!(advanced, 17);
        assert_eq!(grid.cells, vec![Some(1); 4]);
    }

    #[test]
    fn truncated_input_stops_early() {
        let data = [0x03, 1, 2];
        let mut cursor = EndianCursor::big_endian(&data);
        let mut grid = Grid::new(2, 2);

        let advanced = decode_byterun(&mut cursor, 2, 2, 10, &mut grid);
        assert_eq!(advanced, 2);
        assert!(cursor.is_at_end());
        assert_eq!(grid.cells, vec![Some(1), Some(2), None, None]);
    }

    #[test]
    fn literal_run_stays_inside_chunk() {
        // Chunk says 3 bytes but the run wants 4; the next chunk tag is untouched
        let data = [0x03, 1, 2, b'N', b'E', b'X', b'T'];
        let mut cursor = EndianCursor::big_endian(&data);
        let mut grid = Grid::new(2, 2);

        decode_byterun(&mut cursor, 2, 2, 3, &mut grid);
        assert_eq!(cursor.position(), 3);
        assert_eq!(&cursor.read_magic().unwrap(), b"NEXT");
    }
}
