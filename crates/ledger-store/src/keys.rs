//! Composite key construction.
//!
//! Multi-field keys (the endorsement table) are flattened into a single
//! string key: namespace and parts joined by a separator. The separator is
//! rejected inside parts so distinct field tuples can never collide.

use crate::errors::LedgerError;

/// Separator between the namespace and each part of a composite key.
pub const COMPOSITE_SEPARATOR: char = '~';

/// Build a deterministic composite key: `namespace~part1~part2~...`.
///
/// Fails with [`LedgerError::InvalidCompositeKey`] if the namespace or any
/// part contains the separator.
pub fn composite_key(namespace: &str, parts: &[&str]) -> Result<String, LedgerError> {
    let mut key = String::with_capacity(
        namespace.len() + parts.iter().map(|p| p.len() + 1).sum::<usize>(),
    );

    for piece in std::iter::once(&namespace).chain(parts.iter()) {
        if piece.contains(COMPOSITE_SEPARATOR) {
            return Err(LedgerError::InvalidCompositeKey {
                part: (*piece).to_string(),
                separator: COMPOSITE_SEPARATOR,
            });
        }
    }

    key.push_str(namespace);
    for part in parts {
        key.push(COMPOSITE_SEPARATOR);
        key.push_str(part);
    }
    Ok(key)
}
