use super::Rect;

/// Shelf (row) packer with a square size limit.
///
/// Rectangles are placed tallest-first, left to right, wrapping to a new row
/// when the current one is full. The same input always yields the same layout.
#[derive(Debug, Clone, Copy)]
pub struct ShelfPacker {
    max_dimension: u32,
}

/// Where one input rectangle ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Position of the rectangle in the packer's input slice
    pub index: usize,
    pub rect: Rect,
}

/// Result of a packing pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShelfLayout {
    pub width: u32,
    pub height: u32,
    /// Placements in packing order (tallest first)
    pub placements: Vec<Placement>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackError {
    /// Input `index` is wider or taller than the maximum dimension
    TooLarge { index: usize },
    /// Input `index` would extend the sheet to `bottom`, past the maximum dimension
    Exhausted { index: usize, bottom: u64 },
}

impl ShelfPacker {
    pub fn new(max_dimension: u32) -> Self {
        Self { max_dimension }
    }

    /// Pack `(width, height)` pairs given in discovery order.
    pub fn pack(&self, sizes: &[(u32, u32)]) -> Result<ShelfLayout, PackError> {
        let max = u64::from(self.max_dimension);

        // Reject oversized input before placing anything
        if let Some(index) = sizes
            .iter()
            .position(|&(w, h)| w > self.max_dimension || h > self.max_dimension)
        {
            return Err(PackError::TooLarge { index });
        }

        // Stable sort keeps discovery order among equal heights
        let mut order: Vec<usize> = (0..sizes.len()).collect();
        order.sort_by(|&a, &b| sizes[b].1.cmp(&sizes[a].1));

        let mut x = 0u64;
        let mut y = 0u64;
        let mut row_height = 0u64;
        let mut sheet_width = 0u64;
        let mut placements = Vec::with_capacity(sizes.len());

        for index in order {
            let (w, h) = sizes[index];
            let (w64, h64) = (u64::from(w), u64::from(h));

            if x + w64 > max {
                x = 0;
                y += row_height;
                row_height = 0;
            }

            if y + h64 > max {
                return Err(PackError::Exhausted {
                    index,
                    bottom: y + h64,
                });
            }

            // x + w and y + h are both <= max_dimension here
            placements.push(Placement {
                index,
                rect: Rect::new(narrow(x), narrow(y), w, h),
            });

            x += w64;
            row_height = row_height.max(h64);
            sheet_width = sheet_width.max(x);
        }

        Ok(ShelfLayout {
            width: narrow(sheet_width),
            height: narrow(y + row_height),
            placements,
        })
    }
}

/// Values passed here never exceed `max_dimension`, which is a u32.
fn narrow(v: u64) -> u32 {
    u32::try_from(v).unwrap_or(u32::MAX)
}
