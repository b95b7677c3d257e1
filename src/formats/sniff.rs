//! # Sound format sniffing
//!
//! Classifies a sound clip from its leading bytes without consuming them.

use tracing::trace;

use crate::binary_utils::EndianCursor;
use crate::items::SoundType;

const HEADER_LEN: usize = 4;

fn is_chunk(header: &[u8; HEADER_LEN], tag: &[u8]) -> bool {
    header.starts_with(tag)
}

/// Detect the sound type at the cursor.
///
/// Returns `None` for a `FORM`/`RIFF` wrapper holding something other than
/// XMIDI or WAVE data. Input that matches no signature is taken to be
/// headerless wave data. The cursor position is always restored.
pub fn classify(cursor: &mut EndianCursor<'_>) -> Option<SoundType> {
    cursor.speculate(|cursor| {
        let mut header = [0u8; HEADER_LEN];
        let available = cursor.peek_up_to(HEADER_LEN);
        header[..available.len()].copy_from_slice(available);

        let detected = if is_chunk(&header, b"FORM") || is_chunk(&header, b"RIFF") {
            classify_wrapped(cursor)
        } else if is_chunk(&header, b"MThd") {
            Some(SoundType::Midi)
        } else if is_chunk(&header, b"OggS") {
            Some(SoundType::Ogg)
        } else if is_chunk(&header, b"ID3") || is_chunk(&header, b"\xFF\xFB") {
            Some(SoundType::Mp3)
        } else {
            Some(SoundType::Wave)
        };

        trace!(?header, ?detected, "sniffed sound header");
        detected
    })
}

fn classify_wrapped(cursor: &mut EndianCursor<'_>) -> Option<SoundType> {
    cursor.skip(HEADER_LEN).ok()?;
    // Container length, unused
    cursor.read_u32().ok()?;
    let sub_tag = cursor.read_magic().ok()?;

    match &sub_tag {
        b"XMID" | b"XDIR" => Some(SoundType::XMidi),
        b"WAVE" => Some(SoundType::Wave),
        _ => None,
    }
}
