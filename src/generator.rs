use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::question::Question;

/// Source of question operands.
///
/// Implementations must return a value in `1..=upper`; `upper` is always at least 1.
pub trait OperandSource {
    fn next_operand(&mut self, upper: u32) -> u32;
}

/// Production source: uniform operands from any `rand` generator
#[derive(Debug, Clone)]
pub struct RandomOperands<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomOperands<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomOperands<StdRng> {
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Same seed, same question sequence
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> OperandSource for RandomOperands<R> {
    fn next_operand(&mut self, upper: u32) -> u32 {
        self.rng.gen_range(1..=upper.max(1))
    }
}

/// Test source: replays a fixed list of operands in order, wrapping around
#[derive(Debug, Clone)]
pub struct FixedOperands {
    values: Vec<u32>,
    pos: usize,
}

impl FixedOperands {
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, pos: 0 }
    }
}

impl OperandSource for FixedOperands {
    fn next_operand(&mut self, upper: u32) -> u32 {
        let upper = upper.max(1);
        if self.values.is_empty() {
            return 1;
        }
        let value = self.values[self.pos % self.values.len()];
        self.pos += 1;
        value.clamp(1, upper)
    }
}

/// Build `count` questions with both operands drawn from `1..=upper`, `x` before `y`.
pub fn generate_questions<S: OperandSource + ?Sized>(
    upper: u32,
    count: usize,
    source: &mut S,
) -> Vec<Question> {
    (0..count)
        .map(|_| {
            let x = source.next_operand(upper);
            let y = source.next_operand(upper);
            Question::new(x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_operands_stay_in_range() {
        let mut source = RandomOperands::seeded(7);
        for upper in [1u32, 3, 4, 14] {
            for _ in 0..500 {
                let v = source.next_operand(upper);
                assert!((1..=upper).contains(&v), "{v} outside 1..={upper}");
            }
        }
    }

    #[test]
    fn test_random_operands_cover_whole_range() {
        let mut source = RandomOperands::seeded(42);
        let mut seen = [false; 5];
        for _ in 0..1000 {
            seen[(source.next_operand(4) - 1) as usize] = true;
        }
        assert_eq!(seen, [true, true, true, true, false]);
    }

    #[test]
    fn test_seeded_sources_are_reproducible() {
        let a = generate_questions(14, 20, &mut RandomOperands::seeded(1234));
        let b = generate_questions(14, 20, &mut RandomOperands::seeded(1234));
        assert_eq!(a, b);
    }

    #[test]
    fn test_fixed_operands_cycle() {
        let mut source = FixedOperands::new(vec![3, 4]);
        assert_eq!(source.next_operand(10), 3);
        assert_eq!(source.next_operand(10), 4);
        assert_eq!(source.next_operand(10), 3);
    }

    #[test]
    fn test_fixed_operands_clamped_to_upper() {
        let mut source = FixedOperands::new(vec![9, 0]);
        assert_eq!(source.next_operand(3), 3);
        assert_eq!(source.next_operand(3), 1);
    }

    #[test]
    fn test_fixed_operands_empty() {
        let mut source = FixedOperands::new(vec![]);
        assert_eq!(source.next_operand(5), 1);
    }

    #[test]
    fn test_generate_questions_order_and_count() {
        let mut source = FixedOperands::new(vec![1, 2, 3, 4]);
        let questions = generate_questions(4, 3, &mut source);
        assert_eq!(
            questions,
            vec![
                Question::new(1, 2),
                Question::new(3, 4),
                Question::new(1, 2)
            ]
        );
    }

    #[test]
    fn test_generate_zero_questions() {
        let mut source = FixedOperands::new(vec![1]);
        assert!(generate_questions(3, 0, &mut source).is_empty());
    }
}
