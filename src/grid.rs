/*---- Bit-packed boolean grid ----*/

// Cells are stored row-major, eight to a byte, least significant bit first.
// Shared by the module matrix and the rendered bitmap.
#[derive(Clone, PartialEq, Eq, Hash)]
pub(crate) struct BitGrid {
    width: u32,
    height: u32,
    bits: Vec<u8>,
}

impl BitGrid {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            bits: vec![0u8; cells.div_ceil(8)],
        }
    }

    pub(crate) fn width(&self) -> u32 {
        self.width
    }

    pub(crate) fn height(&self) -> u32 {
        self.height
    }

    // Out-of-bounds coordinates read as false.
    pub(crate) fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let (byteindex, bitindex) = self.locate(x, y);
        (self.bits[byteindex] >> bitindex) & 1 != 0
    }

    pub(crate) fn set(&mut self, x: u32, y: u32, value: bool) {
        assert!(x < self.width && y < self.height, "Cell out of bounds");
        let (byteindex, bitindex) = self.locate(x, y);
        if value {
            self.bits[byteindex] |= 1u8 << bitindex;
        } else {
            self.bits[byteindex] &= !(1u8 << bitindex);
        }
    }

    // Sets every cell in [left, left + w) x [top, top + h), clipped to the grid.
    pub(crate) fn fill_rect(&mut self, left: u32, top: u32, w: u32, h: u32) {
        let right = left.saturating_add(w).min(self.width);
        let bottom = top.saturating_add(h).min(self.height);
        for y in top..bottom {
            for x in left..right {
                let (byteindex, bitindex) = self.locate(x, y);
                self.bits[byteindex] |= 1u8 << bitindex;
            }
        }
    }

    pub(crate) fn count_ones(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    fn locate(&self, x: u32, y: u32) -> (usize, u32) {
        let index = y as usize * self.width as usize + x as usize;
        (index >> 3, (index & 7) as u32)
    }
}
