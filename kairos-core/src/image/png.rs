//! Minimal PNG decoder into RGB565
//!
//! Supports non-interlaced 8-bit grayscale, grayscale + alpha, RGB and
//! RGBA. Translucent pixels are composited over black. Chunk CRCs are not
//! checked.

use miniz_oxide::inflate::stream::{inflate, InflateState};
use miniz_oxide::{DataFormat, MZError, MZFlush, MZStatus};

use super::ImageError;
use crate::color::Color;

pub const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Widest image the row buffers can hold
pub const MAX_WIDTH: usize = 512;

const MAX_CHANNELS: usize = 4;
const ROW_BYTES_MAX: usize = MAX_WIDTH * MAX_CHANNELS;
const INFLATE_OUT_BYTES: usize = 1024;

/// Parsed IHDR fields we act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    pub width: u32,
    pub height: u32,
    pub color_type: u8,
}

impl Header {
    fn channels(&self) -> usize {
        match self.color_type {
            0 => 1,
            4 => 2,
            2 => 3,
            _ => 4,
        }
    }
}

fn read_u32_be(bytes: &[u8], offset: usize) -> Option<u32> {
    let b = bytes.get(offset..offset + 4)?;
    Some(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
}

/// Validate the signature and read the image size from IHDR
pub fn read_header(png: &[u8]) -> Result<Header, ImageError> {
    if png.len() < SIGNATURE.len() || png[..SIGNATURE.len()] != SIGNATURE {
        return Err(ImageError::InvalidSignature);
    }

    // IHDR must be the first chunk
    let len = read_u32_be(png, 8).ok_or(ImageError::Truncated)?;
    if png.get(12..16) != Some(b"IHDR".as_slice()) || len != 13 {
        return Err(ImageError::InvalidHeader);
    }
    let ihdr = png.get(16..29).ok_or(ImageError::Truncated)?;

    let width = read_u32_be(ihdr, 0).ok_or(ImageError::Truncated)?;
    let height = read_u32_be(ihdr, 4).ok_or(ImageError::Truncated)?;
    let (bit_depth, color_type) = (ihdr[8], ihdr[9]);
    let (compression, filter, interlace) = (ihdr[10], ihdr[11], ihdr[12]);

    if width == 0 || height == 0 || compression != 0 || filter != 0 {
        return Err(ImageError::InvalidHeader);
    }
    if bit_depth != 8 || interlace != 0 || !matches!(color_type, 0 | 2 | 4 | 6) {
        return Err(ImageError::Unsupported);
    }
    if width as usize > MAX_WIDTH {
        return Err(ImageError::Unsupported);
    }

    Ok(Header {
        width,
        height,
        color_type,
    })
}

fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Reverse the per-row filter of `raw` into `out`
fn unfilter(filter: u8, raw: &[u8], prev: &[u8], bpp: usize, out: &mut [u8]) -> bool {
    for i in 0..raw.len() {
        let left = if i >= bpp { out[i - bpp] } else { 0 };
        let up = prev[i];
        let up_left = if i >= bpp { prev[i - bpp] } else { 0 };

        let predicted = match filter {
            0 => 0,
            1 => left,
            2 => up,
            3 => ((left as u16 + up as u16) / 2) as u8,
            4 => paeth_predictor(left, up, up_left),
            _ => return false,
        };
        out[i] = raw[i].wrapping_add(predicted);
    }
    true
}

fn pixel_at(row: &[u8], x: usize, header: &Header) -> u16 {
    let channels = header.channels();
    let p = &row[x * channels..(x + 1) * channels];

    let (r, g, b, a) = match header.color_type {
        0 => (p[0], p[0], p[0], 255),
        4 => (p[0], p[0], p[0], p[1]),
        2 => (p[0], p[1], p[2], 255),
        _ => (p[0], p[1], p[2], p[3]),
    };

    let over_black = |c: u8| ((c as u16 * a as u16) / 255) as u8;
    Color::new(over_black(r), over_black(g), over_black(b)).to_rgb565()
}

/// Decode `png` into `out` as row-major RGB565
///
/// `out` must hold at least `width * height` pixels. Pixels beyond that
/// are left untouched.
pub fn decode(png: &[u8], out: &mut [u16]) -> Result<Header, ImageError> {
    let header = read_header(png)?;
    let width = header.width as usize;
    let height = header.height as usize;

    let pixel_count = width
        .checked_mul(height)
        .ok_or(ImageError::BufferTooSmall)?;
    if pixel_count > out.len() {
        return Err(ImageError::BufferTooSmall);
    }

    let bpp = header.channels();
    let row_len = width * bpp;

    let mut inflater = InflateState::new(DataFormat::Zlib);
    let mut inflate_out = [0u8; INFLATE_OUT_BYTES];
    let mut row_accum = [0u8; ROW_BYTES_MAX + 1];
    let mut row_prev = [0u8; ROW_BYTES_MAX];
    let mut row_cur = [0u8; ROW_BYTES_MAX];
    let mut row_fill = 0usize;
    let mut row_index = 0usize;
    let mut stream_done = false;

    let mut offset = 8usize;
    while offset < png.len() && !stream_done {
        let len = read_u32_be(png, offset).ok_or(ImageError::Truncated)? as usize;
        let kind = png.get(offset + 4..offset + 8).ok_or(ImageError::Truncated)?;
        let data_start = offset + 8;
        let data_end = data_start.checked_add(len).ok_or(ImageError::Truncated)?;
        let data = png.get(data_start..data_end).ok_or(ImageError::Truncated)?;
        offset = data_end + 4;

        if kind == b"IEND" {
            break;
        }
        if kind != b"IDAT" {
            continue;
        }

        let mut in_pos = 0usize;
        while in_pos < data.len() || !stream_done {
            let result = inflate(
                &mut inflater,
                &data[in_pos..],
                &mut inflate_out,
                MZFlush::None,
            );
            in_pos += result.bytes_consumed;

            for &byte in &inflate_out[..result.bytes_written] {
                if row_index >= height {
                    break;
                }
                row_accum[row_fill] = byte;
                row_fill += 1;

                if row_fill == row_len + 1 {
                    let filter = row_accum[0];
                    if !unfilter(
                        filter,
                        &row_accum[1..=row_len],
                        &row_prev[..row_len],
                        bpp,
                        &mut row_cur[..row_len],
                    ) {
                        return Err(ImageError::BadFilter);
                    }

                    let dst = &mut out[row_index * width..(row_index + 1) * width];
                    for (x, px) in dst.iter_mut().enumerate() {
                        *px = pixel_at(&row_cur[..row_len], x, &header);
                    }

                    row_prev[..row_len].copy_from_slice(&row_cur[..row_len]);
                    row_fill = 0;
                    row_index += 1;
                }
            }

            match result.status {
                Ok(MZStatus::StreamEnd) => stream_done = true,
                Ok(_) => {}
                // Input for this chunk is exhausted; continue with the next IDAT
                Err(MZError::Buf) => break,
                Err(_) => return Err(ImageError::Inflate),
            }

            if result.bytes_consumed == 0 && result.bytes_written == 0 {
                break;
            }
        }
    }

    if row_index < height {
        return Err(ImageError::Truncated);
    }

    Ok(header)
}

#[cfg(test)]
pub(crate) mod tests {
    use std::vec::Vec;

    use super::*;

    fn adler32(data: &[u8]) -> u32 {
        let (mut a, mut b) = (1u32, 0u32);
        for &byte in data {
            a = (a + byte as u32) % 65521;
            b = (b + a) % 65521;
        }
        (b << 16) | a
    }

    /// Zlib stream made of a single stored (uncompressed) block
    fn stored_zlib(data: &[u8]) -> Vec<u8> {
        let mut out = vec![0x78, 0x01, 0x01];
        let len = data.len() as u16;
        out.extend_from_slice(&len.to_le_bytes());
        out.extend_from_slice(&(!len).to_le_bytes());
        out.extend_from_slice(data);
        out.extend_from_slice(&adler32(data).to_be_bytes());
        out
    }

    fn chunk(out: &mut Vec<u8>, kind: &[u8; 4], data: &[u8]) {
        out.extend_from_slice(&(data.len() as u32).to_be_bytes());
        out.extend_from_slice(kind);
        out.extend_from_slice(data);
        out.extend_from_slice(&[0, 0, 0, 0]);
    }

    /// Build a PNG from already-filtered scanlines
    pub fn build_png(width: u32, height: u32, color_type: u8, scanlines: &[u8]) -> Vec<u8> {
        let mut png = SIGNATURE.to_vec();

        let mut ihdr = Vec::new();
        ihdr.extend_from_slice(&width.to_be_bytes());
        ihdr.extend_from_slice(&height.to_be_bytes());
        ihdr.extend_from_slice(&[8, color_type, 0, 0, 0]);
        chunk(&mut png, b"IHDR", &ihdr);

        chunk(&mut png, b"IDAT", &stored_zlib(scanlines));
        chunk(&mut png, b"IEND", &[]);
        png
    }

    #[test]
    fn test_rgb_unfiltered() {
        #[rustfmt::skip]
        let scanlines = [
            0, 255, 0, 0,   0, 255, 0,
            0, 0, 0, 255,   255, 255, 255,
        ];
        let png = build_png(2, 2, 2, &scanlines);
        let mut out = [0u16; 4];

        let header = decode(&png, &mut out).unwrap();
        assert_eq!((header.width, header.height), (2, 2));
        assert_eq!(out, [0xF800, 0x07E0, 0x001F, 0xFFFF]);
    }

    #[test]
    fn test_sub_and_up_filters() {
        // Row 0 with Sub: 10, 10+20; row 1 with Up: adds row 0
        #[rustfmt::skip]
        let scanlines = [
            1, 10, 20,
            2, 5, 5,
        ];
        let png = build_png(2, 2, 0, &scanlines);
        let mut out = [0u16; 4];
        decode(&png, &mut out).unwrap();

        let gray = |v: u8| Color::new(v, v, v).to_rgb565();
        assert_eq!(out, [gray(10), gray(30), gray(15), gray(35)]);
    }

    #[test]
    fn test_alpha_over_black() {
        // Gray+alpha: opaque white, then fully transparent white
        let png = build_png(2, 1, 4, &[0, 255, 255, 255, 0]);
        let mut out = [0u16; 2];
        decode(&png, &mut out).unwrap();
        assert_eq!(out, [0xFFFF, 0x0000]);
    }

    #[test]
    fn test_paeth_predictor() {
        assert_eq!(paeth_predictor(10, 20, 10), 20);
        assert_eq!(paeth_predictor(20, 10, 10), 20);
        assert_eq!(paeth_predictor(0, 0, 0), 0);
    }

    #[test]
    fn test_rejects_bad_input() {
        let mut out = [0u16; 16];
        assert_eq!(
            decode(b"not a png at all", &mut out),
            Err(ImageError::InvalidSignature)
        );

        let png = build_png(8, 8, 2, &[0; 8 * 25]);
        assert_eq!(decode(&png, &mut out), Err(ImageError::BufferTooSmall));

        let png = build_png(2, 2, 3, &[0; 6]);
        assert_eq!(decode(&png, &mut out), Err(ImageError::Unsupported));

        let png = build_png(1, 1, 0, &[7, 0]);
        assert_eq!(decode(&png, &mut out), Err(ImageError::BadFilter));

        let png = build_png(2, 2, 0, &[0, 1, 2]);
        assert_eq!(decode(&png, &mut out), Err(ImageError::Truncated));
    }
}
