use crate::side::Side;

/// Goals per side. Only ever incremented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub a: u32,
    pub b: u32,
}

impl Score {
    pub fn record(&mut self, side: Side) {
        match side {
            Side::A => self.a += 1,
            Side::B => self.b += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    pub fn total(&self) -> u32 {
        self.a + self.b
    }
}
