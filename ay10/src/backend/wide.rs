use super::{PixelBackend, Reference};
use crate::{
    colourspace::{
        alpha_code, alpha_from_code, chroma_code, chroma_from_code, luma_code, luma_from_code,
        to_u8, Coefficients,
    },
    word::{PackedWord, PAIR_BYTES, WORD_BYTES},
};
use std::array::from_fn;

/// Number of pixel pairs converted per step.
const LANES: usize = 4;

/// Size of one step in bytes.
const BLOCK_BYTES: usize = PAIR_BYTES * LANES;

type Lanes = [f64; LANES];

/// Converts [`LANES`] pixel pairs at a time.
///
/// Each component is gathered into its own array, so that the arithmetic is a
/// straight run over fixed-size arrays the compiler can vectorise. Every lane
/// uses exactly the same operations as [Reference], so the output is
/// identical.
///
/// Frames which aren't a multiple of [`LANES`] pairs have the tail converted
/// by [Reference].
#[derive(Debug, Default, Clone, Copy)]
pub struct Wide;

/// Gathers byte `offset` of each pixel pair in the block.
#[inline(always)]
fn gather(i: &[u8], offset: usize) -> Lanes {
    from_fn(|l| f64::from(i[l * PAIR_BYTES + offset]))
}

#[inline(always)]
fn encode_block(c: &Coefficients, i: &[u8], o: &mut [u8]) {
    let r1 = gather(i, 0);
    let g1 = gather(i, 1);
    let b1 = gather(i, 2);
    let a1 = gather(i, 3);
    let r2 = gather(i, 4);
    let g2 = gather(i, 5);
    let b2 = gather(i, 6);
    let a2 = gather(i, 7);

    let y1: Lanes = from_fn(|l| c.luma(r1[l], g1[l], b1[l]));
    let cb: Lanes = from_fn(|l| c.cb(r1[l], g1[l], b1[l]));
    let y2: Lanes = from_fn(|l| c.luma(r2[l], g2[l], b2[l]));
    let cr: Lanes = from_fn(|l| c.cr(r1[l], g1[l], b1[l]));

    let y1 = y1.map(luma_code);
    let cb = cb.map(chroma_code);
    let y2 = y2.map(luma_code);
    let cr = cr.map(chroma_code);
    let a1 = a1.map(alpha_code);
    let a2 = a2.map(alpha_code);

    for (l, o) in o.chunks_exact_mut(PAIR_BYTES).enumerate() {
        PackedWord::from_codes(a1[l], cb[l], y1[l]).write_be(o);
        PackedWord::from_codes(a2[l], cr[l], y2[l]).write_be(&mut o[WORD_BYTES..]);
    }
}

#[inline(always)]
fn decode_block(c: &Coefficients, i: &[u8], o: &mut [u8]) {
    let w1: [PackedWord; LANES] = from_fn(|l| PackedWord::read_be(&i[l * PAIR_BYTES..]));
    let w2: [PackedWord; LANES] =
        from_fn(|l| PackedWord::read_be(&i[l * PAIR_BYTES + WORD_BYTES..]));

    let y1: Lanes = from_fn(|l| luma_from_code(w1[l].luma()));
    let cb: Lanes = from_fn(|l| chroma_from_code(w1[l].chroma()));
    let a1: Lanes = from_fn(|l| alpha_from_code(w1[l].alpha()));
    let y2: Lanes = from_fn(|l| luma_from_code(w2[l].luma()));
    let cr: Lanes = from_fn(|l| chroma_from_code(w2[l].chroma()));
    let a2: Lanes = from_fn(|l| alpha_from_code(w2[l].alpha()));

    let r1: Lanes = from_fn(|l| c.red(y1[l], cr[l]));
    let g1: Lanes = from_fn(|l| c.green(y1[l], cb[l], cr[l]));
    let b1: Lanes = from_fn(|l| c.blue(y1[l], cb[l]));
    let r2: Lanes = from_fn(|l| c.red(y2[l], cr[l]));
    let g2: Lanes = from_fn(|l| c.green(y2[l], cb[l], cr[l]));
    let b2: Lanes = from_fn(|l| c.blue(y2[l], cb[l]));

    for (l, o) in o.chunks_exact_mut(PAIR_BYTES).enumerate() {
        o.copy_from_slice(&[
            to_u8(r1[l]),
            to_u8(g1[l]),
            to_u8(b1[l]),
            to_u8(a1[l]),
            to_u8(r2[l]),
            to_u8(g2[l]),
            to_u8(b2[l]),
            to_u8(a2[l]),
        ]);
    }
}

impl PixelBackend for Wide {
    fn name(&self) -> &'static str {
        "wide"
    }

    fn encode(&self, c: &Coefficients, input: &[u8], output: &mut [u8]) {
        let mut i = input.chunks_exact(BLOCK_BYTES);
        let mut o = output.chunks_exact_mut(BLOCK_BYTES);
        for (i, o) in (&mut i).zip(&mut o) {
            encode_block(c, i, o);
        }

        Reference.encode(c, i.remainder(), o.into_remainder());
    }

    fn decode(&self, c: &Coefficients, input: &[u8], output: &mut [u8]) {
        let mut i = input.chunks_exact(BLOCK_BYTES);
        let mut o = output.chunks_exact_mut(BLOCK_BYTES);
        for (i, o) in (&mut i).zip(&mut o) {
            decode_block(c, i, o);
        }

        Reference.decode(c, i.remainder(), o.into_remainder());
    }
}
