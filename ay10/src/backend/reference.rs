use super::PixelBackend;
use crate::{
    colourspace::{
        alpha_code, alpha_from_code, chroma_code, chroma_from_code, luma_code, luma_from_code,
        to_u8, Coefficients,
    },
    word::{PackedWord, PAIR_BYTES, WORD_BYTES},
};

/// Converts one pixel pair at a time.
///
/// This is always available, and is the baseline other backends are checked
/// against.
#[derive(Debug, Default, Clone, Copy)]
pub struct Reference;

impl Reference {
    /// Converts a pair of RGBA pixels (8 bytes) into two `ay10` words.
    ///
    /// Chroma is taken from the first pixel only.
    #[inline(always)]
    pub fn encode_pair(c: &Coefficients, i: &[u8], o: &mut [u8]) {
        let (r1, g1, b1, a1) = rgba(i);
        let (r2, g2, b2, a2) = rgba(&i[WORD_BYTES..]);

        let y1 = c.luma(r1, g1, b1);
        let cb = c.cb(r1, g1, b1);
        let y2 = c.luma(r2, g2, b2);
        let cr = c.cr(r1, g1, b1);

        PackedWord::from_codes(alpha_code(a1), chroma_code(cb), luma_code(y1)).write_be(o);
        PackedWord::from_codes(alpha_code(a2), chroma_code(cr), luma_code(y2))
            .write_be(&mut o[WORD_BYTES..]);
    }

    /// Converts two `ay10` words into a pair of RGBA pixels (8 bytes).
    #[inline(always)]
    pub fn decode_pair(c: &Coefficients, i: &[u8], o: &mut [u8]) {
        let w1 = PackedWord::read_be(i);
        let w2 = PackedWord::read_be(&i[WORD_BYTES..]);

        let cb = chroma_from_code(w1.chroma());
        let cr = chroma_from_code(w2.chroma());

        write_rgba(c, &w1, cb, cr, o);
        write_rgba(c, &w2, cb, cr, &mut o[WORD_BYTES..]);
    }

    /// Converts a trailing pixel which has no partner.
    ///
    /// Only the first word of a pair is written, so only `cb` is kept.
    fn encode_lone(c: &Coefficients, i: &[u8], o: &mut [u8]) {
        let (r, g, b, a) = rgba(i);
        let y = c.luma(r, g, b);
        let cb = c.cb(r, g, b);
        PackedWord::from_codes(alpha_code(a), chroma_code(cb), luma_code(y)).write_be(o);
    }

    fn decode_lone(c: &Coefficients, i: &[u8], o: &mut [u8]) {
        let w = PackedWord::read_be(i);
        write_rgba(c, &w, chroma_from_code(w.chroma()), 0., o);
    }
}

#[inline(always)]
fn rgba(i: &[u8]) -> (f64, f64, f64, f64) {
    (
        f64::from(i[0]),
        f64::from(i[1]),
        f64::from(i[2]),
        f64::from(i[3]),
    )
}

#[inline(always)]
fn write_rgba(c: &Coefficients, w: &PackedWord, cb: f64, cr: f64, o: &mut [u8]) {
    let y = luma_from_code(w.luma());
    o[0] = to_u8(c.red(y, cr));
    o[1] = to_u8(c.green(y, cb, cr));
    o[2] = to_u8(c.blue(y, cb));
    o[3] = to_u8(alpha_from_code(w.alpha()));
}

impl PixelBackend for Reference {
    fn name(&self) -> &'static str {
        "reference"
    }

    fn encode(&self, c: &Coefficients, input: &[u8], output: &mut [u8]) {
        let mut i = input.chunks_exact(PAIR_BYTES);
        let mut o = output.chunks_exact_mut(PAIR_BYTES);
        for (i, o) in (&mut i).zip(&mut o) {
            Self::encode_pair(c, i, o);
        }

        let i = i.remainder();
        if i.len() >= WORD_BYTES {
            Self::encode_lone(c, i, o.into_remainder());
        }
    }

    fn decode(&self, c: &Coefficients, input: &[u8], output: &mut [u8]) {
        let mut i = input.chunks_exact(PAIR_BYTES);
        let mut o = output.chunks_exact_mut(PAIR_BYTES);
        for (i, o) in (&mut i).zip(&mut o) {
            Self::decode_pair(c, i, o);
        }

        let i = i.remainder();
        if i.len() >= WORD_BYTES {
            Self::decode_lone(c, i, o.into_remainder());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Result;

    fn encode_pair(height: u32, i: &[u8]) -> Vec<u8> {
        let mut o = vec![0; PAIR_BYTES];
        Reference::encode_pair(&Coefficients::for_height(height), i, &mut o);
        o
    }

    fn decode_pair(height: u32, i: &[u8]) -> Vec<u8> {
        let mut o = vec![0; PAIR_BYTES];
        Reference::decode_pair(&Coefficients::for_height(height), i, &mut o);
        o
    }

    #[test]
    fn black_and_white() -> Result {
        // Transparent black
        let i = [0; 8];
        let expected = hex::decode("0408004004080040")?;
        assert_eq!(expected, encode_pair(576, &i));
        assert_eq!(expected, encode_pair(1080, &i));
        assert_eq!(i.as_slice(), decode_pair(576, &expected));

        // Opaque white
        let i = [0xff; 8];
        let expected = hex::decode("3ac803a93ac803a9")?;
        assert_eq!(expected, encode_pair(576, &i));
        assert_eq!(expected, encode_pair(1080, &i));
        assert_eq!(i.as_slice(), decode_pair(1080, &expected));

        Ok(())
    }

    #[test]
    fn bt601_vectors() {
        // (rgba pair, ay10 pair)
        let vectors: [([u8; 8], [u8; 8]); 4] = [
            (
                [28, 69, 148, 247, 117, 221, 18, 95],
                [57, 26, 137, 33, 24, 102, 138, 123],
            ),
            (
                [161, 62, 67, 203, 195, 251, 198, 239],
                [47, 151, 57, 123, 55, 90, 179, 77],
            ),
            (
                [189, 218, 98, 133, 76, 128, 210, 222],
                [32, 148, 254, 221, 51, 183, 189, 225],
            ),
            (
                [105, 85, 41, 102, 106, 19, 8, 133],
                [25, 230, 157, 102, 32, 152, 192, 214],
            ),
        ];

        for (rgba, ay10) in vectors {
            assert_eq!(ay10.as_slice(), encode_pair(576, &rgba));
        }
    }

    #[test]
    fn bt709_vectors() {
        let vectors: [([u8; 8], [u8; 8]); 4] = [
            (
                [28, 69, 148, 247, 117, 221, 18, 95],
                [57, 26, 109, 34, 24, 102, 178, 182],
            ),
            (
                [161, 62, 67, 203, 195, 251, 198, 239],
                [47, 151, 133, 93, 55, 90, 179, 101],
            ),
            (
                [189, 218, 98, 133, 76, 128, 210, 222],
                [32, 148, 234, 247, 51, 183, 133, 228],
            ),
            (
                [105, 85, 41, 102, 106, 19, 8, 133],
                [25, 230, 173, 103, 32, 152, 168, 190],
            ),
        ];

        for (rgba, ay10) in vectors {
            assert_eq!(ay10.as_slice(), encode_pair(1080, &rgba));
        }
    }

    #[test]
    fn first_pixel_survives() {
        // Chroma is sampled from the first pixel of each pair, so it comes
        // back exactly. The second pixel gets the first pixel's chroma.
        let i = [28, 69, 148, 247, 117, 221, 18, 95];
        let o = decode_pair(576, &encode_pair(576, &i));
        assert_eq!(&i[..4], &o[..4]);
        assert_eq!([129, 170, 249, 95], o[4..]);

        let o = decode_pair(1080, &encode_pair(1080, &i));
        assert_eq!(&i[..4], &o[..4]);
        assert_eq!([146, 187, 255, 95], o[4..]);
    }

    #[test]
    fn lone_pixel() {
        let c = Coefficients::for_height(576);
        let i = [0, 0, 0, 0, 0xff, 0xff, 0xff, 0xff, 28, 69, 148, 247];
        let mut o = vec![0; i.len()];
        Reference.encode(&c, &i, &mut o);
        assert_eq!([4, 8, 0, 64, 58, 200, 3, 169, 57, 26, 137, 33], o.as_slice());

        let mut rgba = vec![0xaa; i.len()];
        Reference.decode(&c, &o, &mut rgba);
        assert_eq!(&i[..8], &rgba[..8]);
        // No Cr for the lone pixel, only alpha is exact.
        assert_eq!(247, rgba[11]);
    }
}
