/// Pixel dimensions of a working buffer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    pub height: u32,
    pub width: u32,
}

impl Grid {
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    pub fn square(side: u32) -> Self {
        Self {
            height: side,
            width: side,
        }
    }

    pub fn len(&self) -> usize {
        self.height as usize * self.width as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
