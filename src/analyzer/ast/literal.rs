/// Literals are defined constants within a program. Divided by their
/// representation in text, as written by the scanner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal {
    /// Form: %d
    Integer(i64),

    /// Form: %d.%d
    Float(f64),
}

impl Literal {
    /// True for an integer literal whose rendered text is exactly `0`.
    /// Division/modulus-by-zero detection is a textual check against this,
    /// never constant folding (see Decision D4).
    pub fn is_zero(&self) -> bool {
        match self {
            Literal::Integer(value) => *value == 0,
            Literal::Float(_) => false,
        }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Literal::Integer(value) => write!(f, "{}", value),
            Literal::Float(value) => write!(f, "{}", value),
        }
    }
}
