use crate::error::{Error, Result};

/// A raw catalog cell as delivered by the driver.
///
/// Depending on server negotiation the same column may arrive as text or as
/// an undecoded byte sequence, and NULL must stay distinguishable from an
/// empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    Bytes(Vec<u8>),
    Null,
}

/// Coerce a raw cell into its canonical text form.
///
/// Text passes through unchanged, byte sequences are decoded as UTF-8, and
/// NULL is preserved as `None` so "no default" renders correctly downstream.
pub fn normalize(value: RawValue) -> Result<Option<String>> {
    match value {
        RawValue::Text(text) => Ok(Some(text)),
        RawValue::Bytes(bytes) => String::from_utf8(bytes)
            .map(Some)
            .map_err(|err| Error::Encoding(err.into_bytes())),
        RawValue::Null => Ok(None),
    }
}

/// Normalize a cell that the catalog guarantees to be non-NULL.
///
/// A NULL here means the catalog broke its contract, so it is an error
/// rather than a silent empty string.
pub fn normalize_required(value: RawValue) -> Result<String> {
    normalize(value)?.ok_or(Error::MissingValue)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_identity() {
        let out = normalize(RawValue::Text("varchar(255)".to_string())).unwrap();
        assert_eq!(out.as_deref(), Some("varchar(255)"));
    }

    #[test]
    fn bytes_decode_as_utf8() {
        let out = normalize(RawValue::Bytes("users".as_bytes().to_vec())).unwrap();
        assert_eq!(out.as_deref(), Some("users"));
    }

    #[test]
    fn null_stays_distinct_from_empty_string() {
        assert_eq!(normalize(RawValue::Null).unwrap(), None);
        assert_eq!(
            normalize(RawValue::Text(String::new())).unwrap(),
            Some(String::new())
        );
    }

    #[test]
    fn required_null_is_an_error_not_an_empty_string() {
        let err = normalize_required(RawValue::Null).unwrap_err();
        assert!(matches!(err, Error::MissingValue));
        assert_eq!(
            normalize_required(RawValue::Text(String::new())).unwrap(),
            ""
        );
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let err = normalize(RawValue::Bytes(vec![0xff, 0xfe])).unwrap_err();
        match err {
            Error::Encoding(bytes) => assert_eq!(bytes, vec![0xff, 0xfe]),
            other => panic!("expected encoding error, got {other}"),
        }
    }
}
