use std::ops::Add;

/// A screen coordinate, zero based.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub struct Pos {
    pub x: u16,
    pub y: u16,
}

#[macro_export]
macro_rules! pos {
    ($x:expr, $y:expr) => {
        Pos { x: $x, y: $y }
    };
}

impl Add for Pos {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        pos!(self.x.saturating_add(rhs.x), self.y.saturating_add(rhs.y))
    }
}

#[test]
fn test_add() {
    assert_eq!(pos!(1, 1) + pos!(4, 2), pos!(5, 3));
    assert_eq!(pos!(u16::MAX, 0) + pos!(1, 0), pos!(u16::MAX, 0));
}
