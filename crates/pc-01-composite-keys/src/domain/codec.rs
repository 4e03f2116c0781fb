//! # Composite Key Codec
//!
//! Order-preserving, prefix-free encoding of `(namespace, attributes...)`.
//!
//! Each component is escaped (`0x00` -> `0x00 0xFF`) and terminated by
//! `0x00 0x01`. Because the terminator sorts below every escaped or literal
//! continuation byte, a shorter component always sorts before any longer
//! component it is a prefix of, and no encoded component is a byte prefix of
//! a different one.

use super::errors::KeyError;
use std::fmt;

/// First byte of every composite key. Keeps composite keys apart from simple
/// keys written directly to the world state.
pub const COMPOSITE_KEY_MARKER: u8 = 0x00;

const ESCAPE: u8 = 0x00;
const ESCAPED_NUL: u8 = 0xFF;
const TERMINATOR: u8 = 0x01;

fn push_component(out: &mut Vec<u8>, component: &[u8]) {
    for &byte in component {
        if byte == ESCAPE {
            out.push(ESCAPE);
            out.push(ESCAPED_NUL);
        } else {
            out.push(byte);
        }
    }
    out.push(ESCAPE);
    out.push(TERMINATOR);
}

/// Encode a namespace and ordered attributes into one sortable key.
///
/// # Errors
///
/// * `KeyError::EmptyNamespace` - If `namespace` is empty
pub fn encode<S: AsRef<str>>(namespace: &str, attributes: &[S]) -> Result<Vec<u8>, KeyError> {
    if namespace.is_empty() {
        return Err(KeyError::EmptyNamespace);
    }

    let capacity = 1
        + namespace.len()
        + 2
        + attributes
            .iter()
            .map(|a| a.as_ref().len() + 2)
            .sum::<usize>();
    let mut key = Vec::with_capacity(capacity);
    key.push(COMPOSITE_KEY_MARKER);
    push_component(&mut key, namespace.as_bytes());
    for attribute in attributes {
        push_component(&mut key, attribute.as_ref().as_bytes());
    }
    Ok(key)
}

/// Encode the range-scan prefix for keys whose first attributes equal
/// `leading`.
///
/// The prefix is byte-identical to the head of every full key with the same
/// leading attributes, and to no other key.
pub fn encode_prefix<S: AsRef<str>>(namespace: &str, leading: &[S]) -> Result<Vec<u8>, KeyError> {
    encode(namespace, leading)
}

/// Decode a key produced by [`encode`] back into its namespace and attributes.
///
/// # Errors
///
/// Any structural violation of the key layout (missing marker, truncated
/// component, unknown escape, non-UTF-8 component).
pub fn decode(key: &[u8]) -> Result<(String, Vec<String>), KeyError> {
    let Some((&marker, body)) = key.split_first() else {
        return Err(KeyError::MissingMarker);
    };
    if marker != COMPOSITE_KEY_MARKER {
        return Err(KeyError::MissingMarker);
    }

    let mut components: Vec<String> = Vec::new();
    let mut current: Vec<u8> = Vec::new();
    let mut i = 0;

    while i < body.len() {
        let byte = body[i];
        if byte != ESCAPE {
            current.push(byte);
            i += 1;
            continue;
        }

        match body.get(i + 1) {
            Some(&ESCAPED_NUL) => current.push(0x00),
            Some(&TERMINATOR) => {
                let index = components.len();
                let text = String::from_utf8(std::mem::take(&mut current))
                    .map_err(|_| KeyError::InvalidUtf8 { index })?;
                components.push(text);
            }
            // +1 for the marker, +1 for the escape byte itself
            Some(&other) => {
                return Err(KeyError::InvalidEscape {
                    offset: i + 2,
                    byte: other,
                })
            }
            None => return Err(KeyError::Truncated { offset: key.len() }),
        }
        i += 2;
    }

    if !current.is_empty() {
        return Err(KeyError::Truncated { offset: key.len() });
    }

    let mut components = components.into_iter();
    let namespace = components
        .next()
        .ok_or(KeyError::Truncated { offset: key.len() })?;
    if namespace.is_empty() {
        return Err(KeyError::EmptyNamespace);
    }

    Ok((namespace, components.collect()))
}

/// A decoded composite key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositeKey {
    /// Index namespace, e.g. `clid~fileid`.
    pub namespace: String,
    /// Ordered attribute values.
    pub attributes: Vec<String>,
}

impl CompositeKey {
    /// Create a composite key.
    pub fn new<S: Into<String>>(namespace: impl Into<String>, attributes: Vec<S>) -> Self {
        Self {
            namespace: namespace.into(),
            attributes: attributes.into_iter().map(Into::into).collect(),
        }
    }

    /// Encode to world-state key bytes.
    pub fn encode(&self) -> Result<Vec<u8>, KeyError> {
        encode(&self.namespace, &self.attributes)
    }

    /// Decode from world-state key bytes.
    pub fn decode(key: &[u8]) -> Result<Self, KeyError> {
        let (namespace, attributes) = decode(key)?;
        Ok(Self {
            namespace,
            attributes,
        })
    }

    /// Attribute at `index`, if present.
    #[must_use]
    pub fn attribute(&self, index: usize) -> Option<&str> {
        self.attributes.get(index).map(String::as_str)
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.namespace, self.attributes.join(", "))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_plain() {
        let key = encode("clid~fileid", &["C1", "F1"]).unwrap();
        let (ns, attrs) = decode(&key).unwrap();

        assert_eq!(ns, "clid~fileid");
        assert_eq!(attrs, vec!["C1", "F1"]);
    }

    #[test]
    fn test_round_trip_with_separator_bytes() {
        let awkward = [
            "",
            "\u{0}",
            "a\u{0}b",
            "\u{0}\u{0}",
            "\u{0}\u{1}",
            "~",
            "clid~fileid",
            "\u{ff}",
            "ünïcødé",
        ];

        for a in awkward {
            for b in awkward {
                let key = encode("ns\u{0}x", &[a, b]).unwrap();
                let (ns, attrs) = decode(&key).unwrap();
                assert_eq!(ns, "ns\u{0}x");
                assert_eq!(attrs, vec![a.to_string(), b.to_string()], "a={a:?} b={b:?}");
            }
        }
    }

    #[test]
    fn test_round_trip_no_attributes() {
        let key = encode::<&str>("clid~fileid", &[]).unwrap();
        assert_eq!(decode(&key).unwrap(), ("clid~fileid".to_string(), vec![]));
    }

    #[test]
    fn test_key_order_matches_tuple_order() {
        let mut tuples: Vec<Vec<&str>> = vec![
            vec!["C1", "f2"],
            vec!["C1", "f10"],
            vec!["C1", "f1"],
            vec!["C1\u{0}", "a"],
            vec!["C10", "a"],
            vec!["C1", ""],
            vec!["C1", "f1\u{0}"],
            vec!["C"],
            vec!["C", "zz"],
            vec!["D"],
        ];

        let mut keys: Vec<Vec<u8>> = tuples
            .iter()
            .map(|t| encode("clid~fileid", t).unwrap())
            .collect();

        tuples.sort();
        keys.sort();

        let decoded: Vec<Vec<String>> = keys.iter().map(|k| decode(k).unwrap().1).collect();
        let expected: Vec<Vec<String>> = tuples
            .iter()
            .map(|t| t.iter().map(|s| (*s).to_string()).collect())
            .collect();
        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_prefix_matches_exactly_leading_attribute() {
        let prefix = encode_prefix("clid~fileid", &["C1"]).unwrap();

        let inside = [
            encode("clid~fileid", &["C1", "F1"]).unwrap(),
            encode("clid~fileid", &["C1", ""]).unwrap(),
            encode("clid~fileid", &["C1", "\u{0}"]).unwrap(),
        ];
        let outside = [
            encode("clid~fileid", &["C10", "F1"]).unwrap(),
            encode("clid~fileid", &["C1\u{0}x", "F1"]).unwrap(),
            encode("clid~fileid", &["C", "1"]).unwrap(),
            encode("clid~mspid~fileid", &["C1", "ORG1", "F1"]).unwrap(),
        ];

        for key in &inside {
            assert!(key.starts_with(&prefix), "{:?}", decode(key));
        }
        for key in &outside {
            assert!(!key.starts_with(&prefix), "{:?}", decode(key));
        }
    }

    #[test]
    fn test_empty_namespace_rejected() {
        assert_eq!(encode("", &["a"]), Err(KeyError::EmptyNamespace));
    }

    #[test]
    fn test_decode_rejects_malformed_keys() {
        assert_eq!(decode(&[]), Err(KeyError::MissingMarker));
        assert_eq!(decode(b"plain-key"), Err(KeyError::MissingMarker));
        assert_eq!(decode(&[0x00]), Err(KeyError::Truncated { offset: 1 }));
        assert_eq!(
            decode(&[0x00, b'n', b's']),
            Err(KeyError::Truncated { offset: 3 })
        );
        assert_eq!(
            decode(&[0x00, b'n', 0x00]),
            Err(KeyError::Truncated { offset: 3 })
        );
        assert_eq!(
            decode(&[0x00, b'n', 0x00, 0x02]),
            Err(KeyError::InvalidEscape {
                offset: 3,
                byte: 0x02
            })
        );
        assert_eq!(
            decode(&[0x00, 0xC3, 0x28, 0x00, 0x01]),
            Err(KeyError::InvalidUtf8 { index: 0 })
        );
        assert_eq!(decode(&[0x00, 0x00, 0x01]), Err(KeyError::EmptyNamespace));
    }

    #[test]
    fn test_composite_key_struct() {
        let key = CompositeKey::new("clid~fileid~mspid", vec!["C1", "F1", "ORG1"]);
        let bytes = key.encode().unwrap();

        let back = CompositeKey::decode(&bytes).unwrap();
        assert_eq!(back, key);
        assert_eq!(back.attribute(2), Some("ORG1"));
        assert_eq!(back.attribute(3), None);
        assert_eq!(back.to_string(), "clid~fileid~mspid(C1, F1, ORG1)");
    }
}
