#![allow(dead_code)]

/// Builds LBM files chunk by chunk.
pub struct LbmBuilder {
    chunks: Vec<u8>,
}

impl LbmBuilder {
    pub fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    /// Append a chunk, padding odd payloads with a zero byte.
    pub fn chunk(mut self, tag: &[u8; 4], payload: &[u8]) -> Self {
        self.chunks.extend_from_slice(tag);
        self.chunks
            .extend_from_slice(&(payload.len() as u32).to_be_bytes());
        self.chunks.extend_from_slice(payload);
        if payload.len() % 2 == 1 {
            self.chunks.push(0);
        }
        self
    }

    /// Append a chunk with an explicit declared length and no padding.
    pub fn raw_chunk(mut self, tag: &[u8; 4], length: u32, payload: &[u8]) -> Self {
        self.chunks.extend_from_slice(tag);
        self.chunks.extend_from_slice(&length.to_be_bytes());
        self.chunks.extend_from_slice(payload);
        self
    }

    pub fn header(self, width: u16, height: u16, depth: u16, compression: u16) -> Self {
        let payload = bmhd(width, height, depth, compression);
        self.chunk(b"BMHD", &payload)
    }

    pub fn palette(self, palette: &[u8]) -> Self {
        self.chunk(b"CMAP", palette)
    }

    pub fn body(self, pixels: &[u8]) -> Self {
        self.chunk(b"BODY", pixels)
    }

    pub fn trailing(mut self, bytes: &[u8]) -> Self {
        self.chunks.extend_from_slice(bytes);
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.chunks.len() + 12);
        out.extend_from_slice(b"FORM");
        out.extend_from_slice(&(self.chunks.len() as u32 + 4).to_be_bytes());
        out.extend_from_slice(b"PBM ");
        out.extend_from_slice(&self.chunks);
        out
    }
}

pub fn bmhd(width: u16, height: u16, depth: u16, compression: u16) -> Vec<u8> {
    let mut payload = Vec::with_capacity(12);
    payload.extend_from_slice(&width.to_be_bytes());
    payload.extend_from_slice(&height.to_be_bytes());
    payload.extend_from_slice(&[0; 4]);
    payload.extend_from_slice(&depth.to_be_bytes());
    payload.extend_from_slice(&compression.to_be_bytes());
    payload
}

/// 256 distinct colours: entry i is (i, 255 - i, i / 2).
pub fn test_palette() -> Vec<u8> {
    (0..=255u8).flat_map(|i| [i, 255 - i, i / 2]).collect()
}

/// A run as the encoder emits it.
#[derive(Clone, Debug)]
pub enum Run {
    /// 2..=128 literal indices
    Literal(Vec<u8>),
    /// 1..=129 copies of one index
    Repeat(u8, usize),
}

impl Run {
    pub fn pixel_count(&self) -> usize {
        match self {
            Run::Literal(pixels) => pixels.len(),
            Run::Repeat(_, count) => *count,
        }
    }

    pub fn expand_into(&self, out: &mut Vec<u8>) {
        match self {
            Run::Literal(pixels) => out.extend_from_slice(pixels),
            Run::Repeat(index, count) => out.extend(std::iter::repeat(*index).take(*count)),
        }
    }
}

/// Encode runs with the same control byte rules the decoder uses.
pub fn encode_runs(runs: &[Run]) -> Vec<u8> {
    let mut out = Vec::new();
    for run in runs {
        match run {
            Run::Literal(pixels) => {
                assert!((2..=128).contains(&pixels.len()));
                out.push((pixels.len() - 1) as u8);
                out.extend_from_slice(pixels);
            }
            Run::Repeat(index, count) => {
                assert!((1..=129).contains(count));
                out.push((1 - *count as i16) as i8 as u8);
                out.push(*index);
            }
        }
    }
    out
}
