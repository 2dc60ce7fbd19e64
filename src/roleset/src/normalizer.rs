//! Role name normalization

/// Turns a role name into the key the store indexes it under.
///
/// Implementations must be deterministic and must match whatever the store
/// applied when the roles were saved.
pub trait LookupNormalizer: Send + Sync {
    /// Normalize a role name
    fn normalize_name(&self, name: &str) -> String;
}

/// Upper-cases names one character at a time, locale-independent.
///
/// Characters whose upper case is more than one character ("ß", "ŉ",
/// ligatures) are kept as they are, matching the keys the identity
/// framework writes to its roles table.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpperInvariantNormalizer;

impl LookupNormalizer for UpperInvariantNormalizer {
    fn normalize_name(&self, name: &str) -> String {
        name.chars().map(simple_uppercase).collect()
    }
}

fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

impl<F> LookupNormalizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn normalize_name(&self, name: &str) -> String {
        self(name)
    }
}
