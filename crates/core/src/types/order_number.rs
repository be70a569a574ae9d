//! Human-readable generated order identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Alphabet for generated order numbers.
///
/// Crockford-style base32: no `I`, `L`, `O`, or `U`, so numbers survive
/// being read over the phone to customer support.
const ALPHABET: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Length of the random portion of an order number.
const TOKEN_LENGTH: usize = 8;

/// Prefix shared by all order numbers.
const PREFIX: &str = "AD-";

/// A generated order identifier, e.g. `AD-7F3K9Q2M`.
///
/// Orders are keyed by these strings rather than serial integers. They are
/// generated at checkout and never reused; the `shop_order` primary key
/// enforces uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Generate a fresh order number.
    #[must_use]
    pub fn generate() -> Self {
        use rand::Rng;

        let mut rng = rand::rng();
        let mut value = String::with_capacity(PREFIX.len() + TOKEN_LENGTH);
        value.push_str(PREFIX);
        for _ in 0..TOKEN_LENGTH {
            let idx = rng.random_range(0..ALPHABET.len());
            value.push(char::from(ALPHABET[idx]));
        }
        Self(value)
    }

    /// Parse an order number from a path segment or stored value.
    ///
    /// Accepts the `AD-` prefix followed by 8 alphabet characters.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let token = s.strip_prefix(PREFIX)?;
        if token.len() != TOKEN_LENGTH {
            return None;
        }
        if !token.bytes().all(|b| ALPHABET.contains(&b)) {
            return None;
        }
        Some(Self(s.to_owned()))
    }

    /// Returns the order number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `OrderNumber` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for OrderNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_numbers_parse_back() {
        for _ in 0..100 {
            let number = OrderNumber::generate();
            assert!(
                OrderNumber::parse(number.as_str()).is_some(),
                "generated number should parse: {number}"
            );
        }
    }

    #[test]
    fn generated_numbers_have_expected_shape() {
        let number = OrderNumber::generate();
        let s = number.as_str();
        assert!(s.starts_with("AD-"));
        assert_eq!(s.len(), 11);
    }

    #[test]
    fn rejects_wrong_prefix_and_length() {
        assert!(OrderNumber::parse("XX-7F3K9Q2M").is_none());
        assert!(OrderNumber::parse("AD-7F3K").is_none());
        assert!(OrderNumber::parse("AD-7F3K9Q2MZZ").is_none());
    }

    #[test]
    fn rejects_ambiguous_characters() {
        // 'O' and 'L' are not in the alphabet
        assert!(OrderNumber::parse("AD-7F3K9Q2O").is_none());
        assert!(OrderNumber::parse("AD-LLLLLLLL").is_none());
    }

    #[test]
    fn consecutive_numbers_differ() {
        let a = OrderNumber::generate();
        let b = OrderNumber::generate();
        // 32^8 possibilities; a collision here means the RNG is broken
        assert_ne!(a, b);
    }
}
