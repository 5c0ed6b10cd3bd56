/// Source sample pair and blend weight for one destination coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Tap {
    lo: usize,
    hi: usize,
    weight: u32, // fixed-point 8.8 weight of `hi`, in [0, 256]
}

/// Precomputed mapping from window pixels to framebuffer neighbors
#[derive(Debug, Clone, Default)]
pub struct ScaleLut {
    cols: Vec<Tap>,
    rows: Vec<Tap>,
}

impl ScaleLut {
    pub fn new(dst_w: usize, dst_h: usize, src_w: usize, src_h: usize) -> Self {
        Self {
            cols: axis_taps(dst_w, src_w),
            rows: axis_taps(dst_h, src_h),
        }
    }

    pub fn dst_size(&self) -> (usize, usize) {
        (self.cols.len(), self.rows.len())
    }
}

fn axis_taps(dst: usize, src: usize) -> Vec<Tap> {
    if src == 0 {
        return Vec::new();
    }
    let ratio = src as f32 / dst.max(1) as f32;
    (0..dst)
        .map(|i| {
            let f = i as f32 * ratio;
            let lo = (f.floor() as usize).min(src - 1);
            let hi = (lo + 1).min(src - 1);
            let weight = ((f - lo as f32) * 256.0).round().clamp(0.0, 256.0) as u32;
            Tap { lo, hi, weight }
        })
        .collect()
}

#[inline]
fn lerp_0rgb(a: u32, b: u32, w256: u32) -> u32 {
    let inv = 256 - w256;
    // red and blue share one multiply (00RR00BB), green goes alone
    let rb = (((a & 0x00FF00FF) * inv + (b & 0x00FF00FF) * w256) >> 8) & 0x00FF00FF;
    let g = (((a & 0x0000FF00) * inv + (b & 0x0000FF00) * w256) >> 8) & 0x0000FF00;
    rb | g
}

/// Bilinear stretch of the internal framebuffer onto the window surface.
/// Rows of `dst` beyond the table size are left untouched.
pub fn stretch_bilinear(dst: &mut [u32], src: &[u32], src_w: usize, lut: &ScaleLut) {
    let dst_w = lut.cols.len();
    if dst_w == 0 {
        return;
    }
    for (row, tap_y) in dst.chunks_exact_mut(dst_w).zip(&lut.rows) {
        let row0 = &src[tap_y.lo * src_w..(tap_y.lo + 1) * src_w];
        let row1 = &src[tap_y.hi * src_w..(tap_y.hi + 1) * src_w];
        for (out, tap_x) in row.iter_mut().zip(&lut.cols) {
            let top = lerp_0rgb(row0[tap_x.lo], row0[tap_x.hi], tap_x.weight);
            let bot = lerp_0rgb(row1[tap_x.lo], row1[tap_x.hi], tap_x.weight);
            *out = lerp_0rgb(top, bot, tap_y.weight);
        }
    }
}
