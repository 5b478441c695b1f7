use std::fmt;

use crate::random::Randomness;

/// Built-in greetings, in catalogue order.
pub const GREETINGS: [&str; 4] = [
    "Hello world!",
    "Bonjour monde!",
    "Hallo Welt!",
    "Hola Mundo!",
];

/// One greeting from the catalogue. Identity is the string value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Greeting(&'static str);

impl Greeting {
    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for Greeting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// Ordered, non-empty set of greetings. Built once at start-up, read-only after.
#[derive(Debug, Clone)]
pub struct GreetingCatalog {
    greetings: Vec<Greeting>,
}

impl GreetingCatalog {
    /// The four built-in greetings.
    pub fn standard() -> Self {
        Self {
            greetings: GREETINGS.iter().map(|&g| Greeting(g)).collect(),
        }
    }

    pub fn contains(&self, s: &str) -> bool {
        self.greetings.iter().any(|g| g.0 == s)
    }

    /// Uniform pick, independent per call.
    pub fn pick(&self, rng: &dyn Randomness) -> Greeting {
        let idx = rng.gen_range(0..self.greetings.len() as u64) as usize;
        // idx < len by construction; fall back to the first entry regardless.
        self.greetings
            .get(idx)
            .or_else(|| self.greetings.first())
            .copied()
            .unwrap_or(Greeting(GREETINGS[0]))
    }
}

impl Default for GreetingCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SeededRandomness;

    #[test]
    fn standard_keeps_order() {
        let c = GreetingCatalog::standard();
        let all: Vec<&str> = c.greetings.iter().map(|g| g.as_str()).collect();
        assert_eq!(all, GREETINGS);
    }

    #[test]
    fn pick_stays_in_catalog() {
        let c = GreetingCatalog::standard();
        let rng = SeededRandomness::new(3);
        for _ in 0..100 {
            assert!(c.contains(c.pick(&rng).as_str()));
        }
    }
}
