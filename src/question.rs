use std::fmt;

/// Largest operand whose square still fits an `i64` answer
pub const MAX_OPERAND: u32 = 3_037_000_499;

/// A single multiplication problem shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    pub x: u32,
    pub y: u32,
}

impl Question {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Text rendered in front of the answer field, e.g. `"3 x 4 = "`
    pub fn prompt(&self) -> String {
        format!("{} x {} = ", self.x, self.y)
    }

    pub fn expected(&self) -> u64 {
        u64::from(self.x) * u64::from(self.y)
    }

    /// Any integer is a legal answer; only the exact product matches.
    pub fn is_correct(&self, answer: i64) -> bool {
        u64::try_from(answer).is_ok_and(|a| a == self.expected())
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prompt())
    }
}
