use crate::projector::{ColumnCommand, Rgb, Span};

pub const CEILING: Rgb = Rgb::new(30, 30, 70);
pub const GROUND: Rgb = Rgb::new(40, 40, 40);

#[inline]
pub fn pack_rgb(c: Rgb) -> u32 {
    // 0RGB, the layout softbuffer expects
    (c.b as u32) | ((c.g as u32) << 8) | ((c.r as u32) << 16)
}

/// Fills the frame with ceiling/ground and paints every column on top
pub fn draw_columns(buf: &mut [u32], width: usize, height: usize, columns: &[ColumnCommand]) {
    if width == 0 {
        return;
    }
    let sky = pack_rgb(CEILING);
    let ground = pack_rgb(GROUND);

    let mid = height / 2;
    for (y, row) in buf.chunks_exact_mut(width).take(height).enumerate() {
        row.fill(if y < mid { sky } else { ground });
    }

    for col in columns {
        if col.x >= width {
            continue;
        }
        if let Some(floor) = col.floor {
            draw_span(buf, width, height, col.x, floor);
        }
        if let Some(wall) = col.wall {
            draw_span(buf, width, height, col.x, wall);
        }
    }
}

fn draw_span(buf: &mut [u32], width: usize, height: usize, x: usize, span: Span) {
    let color = pack_rgb(span.color);
    let bottom = span.bottom.min(height);
    let mut idx = span.top * width + x;
    for _y in span.top..bottom {
        buf[idx] = color;
        idx += width;
    }
}
