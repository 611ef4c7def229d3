//! Materialization: snapshots and JSON export.
//!
//! [`Collection::to_array`] drains a traversal into an [`Array`]. For a
//! single-pass collection this is the only way to look at the data more
//! than once: snapshot first, then derive further collections from the
//! snapshot.

use crate::array::Array;
use crate::collection::Collection;
#[cfg(feature = "json")]
use crate::error::Result;
#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// JSON output options for [`Collection::to_json`].
///
/// The default writes compact JSON with `/` and non-ASCII characters left
/// unescaped.
#[cfg(feature = "json")]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonOptions {
    pub pretty: bool,
    /// Write `/` as `\/`.
    pub escape_slashes: bool,
    /// Write non-ASCII characters as `\uXXXX` escapes.
    pub escape_unicode: bool,
}

#[cfg(feature = "json")]
impl JsonOptions {
    pub fn pretty() -> Self {
        Self {
            pretty: true,
            ..Self::default()
        }
    }
}

/// Post-process serializer output. Only string contents can hold `/` or
/// non-ASCII characters, so a character-level pass is safe.
#[cfg(feature = "json")]
fn apply_escapes(json: String, opts: &JsonOptions) -> String {
    if !opts.escape_slashes && !opts.escape_unicode {
        return json;
    }
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '/' if opts.escape_slashes => out.push_str("\\/"),
            c if opts.escape_unicode && !c.is_ascii() => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04x}"));
                }
            }
            c => out.push(c),
        }
    }
    out
}

impl Collection {
    /// Drain into an [`Array`]; for repeated keys the last value wins at the
    /// first key's position.
    pub fn to_array(&self) -> Array {
        let array: Array = match self.cursor().backing() {
            Some(data) => Array::clone(&data),
            None => self.iter().collect(),
        };
        tracing::trace!(len = array.len(), "materialized collection");
        array
    }

    /// Same as [`to_array`](Self::to_array).
    pub fn get_data(&self) -> Array {
        self.to_array()
    }

    /// A re-startable copy of the current contents.
    #[must_use]
    pub fn snapshot(&self) -> Collection {
        Collection::from_array(self.to_array())
    }

    /// JSON text of the materialized contents.
    ///
    /// Arrays keyed `0..n` encode as JSON arrays, anything else as objects;
    /// model objects encode as their exported attributes.
    #[cfg(feature = "json")]
    pub fn to_json(&self, opts: &JsonOptions) -> Result<String> {
        let data = self.to_array();
        let json = if opts.pretty {
            serde_json::to_string_pretty(&data)?
        } else {
            serde_json::to_string(&data)?
        };
        Ok(apply_escapes(json, opts))
    }
}

#[cfg(all(test, feature = "json"))]
mod tests {
    use super::*;

    #[test]
    fn escapes_are_opt_in() {
        let raw = r#"["a/b","é"]"#.to_string();
        assert_eq!(apply_escapes(raw.clone(), &JsonOptions::default()), raw);
        let opts = JsonOptions {
            escape_slashes: true,
            escape_unicode: true,
            ..JsonOptions::default()
        };
        assert_eq!(apply_escapes(raw, &opts), r#"["a\/b","\u00e9"]"#);
    }

    #[test]
    fn astral_characters_use_surrogate_pairs() {
        let opts = JsonOptions {
            escape_unicode: true,
            ..JsonOptions::default()
        };
        assert_eq!(apply_escapes("\"😀\"".into(), &opts), r#""\ud83d\ude00""#);
    }
}
