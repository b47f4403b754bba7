//! Input pattern expansion for the CLI.

use std::path::PathBuf;

use crate::error::Result;

/// Expand input patterns into filesystem paths, preserving order.
///
/// Each pattern is run through `glob`; patterns that match nothing are kept
/// as literal paths so a typo surfaces as a readable read error downstream
/// instead of vanishing.
pub fn resolve_paths<T>(patterns: T) -> Result<Vec<PathBuf>>
where
    T: IntoIterator,
    T::Item: AsRef<str>,
{
    let mut resolved = Vec::new();

    for pattern in patterns {
        let pattern = pattern.as_ref();
        let mut matched = false;

        for entry in glob::glob(pattern)? {
            resolved.push(entry?);
            matched = true;
        }

        if !matched {
            resolved.push(PathBuf::from(pattern));
        }
    }

    Ok(resolved)
}
