use image::{Rgba, imageops::ColorMap};

/// The 256-color Plan 9 palette: a 4x4x4 RGB cube, each cell split into four
/// brightness sub-levels, with the gray ramp where the cube collapses.
#[derive(Clone, Debug)]
pub struct Plan9Palette {
    colors: [[u8; 3]; 256],
}

impl Default for Plan9Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Plan9Palette {
    pub fn new() -> Self {
        let mut colors = [[0u8; 3]; 256];
        let mut i = 0usize;
        for r in 0..4i32 {
            for v in 0..4i32 {
                let mut j = v - r;
                for g in 0..4i32 {
                    for b in 0..4i32 {
                        let den = r.max(g).max(b);
                        let c = if den == 0 {
                            let gray = (17 * v) as u8;
                            [gray, gray, gray]
                        } else {
                            let num = 17 * (4 * den + v);
                            [
                                (r * num / den) as u8,
                                (g * num / den) as u8,
                                (b * num / den) as u8,
                            ]
                        };
                        colors[i + (j & 0x0f) as usize] = c;
                        j += 1;
                    }
                }
                i += 16;
            }
        }
        Self { colors }
    }

    pub fn colors(&self) -> &[[u8; 3]; 256] {
        &self.colors
    }

    fn nearest(&self, rgb: [u8; 3]) -> usize {
        let mut best = 0usize;
        let mut best_dist = u32::MAX;
        for (idx, c) in self.colors.iter().enumerate() {
            let dist: u32 = c
                .iter()
                .zip(rgb.iter())
                .map(|(&a, &b)| {
                    let d = a as i32 - b as i32;
                    (d * d) as u32
                })
                .sum();
            if dist < best_dist {
                best = idx;
                best_dist = dist;
                if dist == 0 {
                    break;
                }
            }
        }
        best
    }
}

impl ColorMap for Plan9Palette {
    type Color = Rgba<u8>;

    fn index_of(&self, color: &Rgba<u8>) -> usize {
        self.nearest([color[0], color[1], color[2]])
    }

    fn lookup(&self, index: usize) -> Option<Rgba<u8>> {
        self.colors
            .get(index)
            .map(|&[r, g, b]| Rgba([r, g, b, 255]))
    }

    fn has_lookup(&self) -> bool {
        true
    }

    fn map_color(&self, color: &mut Rgba<u8>) {
        let [r, g, b] = self.colors[self.index_of(color)];
        *color = Rgba([r, g, b, 255]);
    }
}
