//! Encoding for array-valued columns. SQLite rows have no list type, so
//! genre ids, genre objects and watched-episode lists are stored as JSON
//! text. Absent or empty text decodes to an empty list; malformed text is
//! a corruption error, never an empty default.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::StoreError;

pub fn encode_list<T: Serialize>(values: &[T]) -> anyhow::Result<String> {
    Ok(serde_json::to_string(values)?)
}

pub fn encode_opt_list<T: Serialize>(values: Option<&[T]>) -> anyhow::Result<Option<String>> {
    values.map(|v| encode_list(v)).transpose()
}

/// Decodes a JSON-array column. `None` and `""` mean "no entries".
pub fn decode_list<T: DeserializeOwned>(
    table: &'static str,
    column: &'static str,
    raw: Option<&str>,
) -> Result<Vec<T>, StoreError> {
    match raw {
        None => Ok(Vec::new()),
        Some(text) if text.is_empty() => Ok(Vec::new()),
        Some(text) => serde_json::from_str(text).map_err(|e| StoreError::Corrupted {
            table,
            column,
            detail: e.to_string(),
        }),
    }
}

/// Like [`decode_list`] but keeps "absent" distinct from "empty list".
pub fn decode_opt_list<T: DeserializeOwned>(
    table: &'static str,
    column: &'static str,
    raw: Option<&str>,
) -> Result<Option<Vec<T>>, StoreError> {
    match raw {
        None => Ok(None),
        Some(text) if text.is_empty() => Ok(None),
        Some(text) => serde_json::from_str(text)
            .map(Some)
            .map_err(|e| StoreError::Corrupted {
                table,
                column,
                detail: e.to_string(),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::media::Genre;

    #[test]
    fn absent_and_empty_decode_to_empty() {
        let ids: Vec<i64> = decode_list("t", "c", None).unwrap();
        assert!(ids.is_empty());
        let ids: Vec<i64> = decode_list("t", "c", Some("")).unwrap();
        assert!(ids.is_empty());
        assert!(decode_opt_list::<i64>("t", "c", None).unwrap().is_none());
    }

    #[test]
    fn round_trip_preserves_order() {
        let encoded = encode_list(&[3, 1, 2]).unwrap();
        let decoded: Vec<i64> = decode_list("t", "c", Some(&encoded)).unwrap();
        assert_eq!(decoded, vec![3, 1, 2]);
    }

    #[test]
    fn malformed_text_is_corruption_not_default() {
        let err = decode_list::<i64>("watched_shows", "episodes_watched", Some("[1, 2,"))
            .unwrap_err();
        match err {
            StoreError::Corrupted { table, column, .. } => {
                assert_eq!(table, "watched_shows");
                assert_eq!(column, "episodes_watched");
            }
            other => panic!("expected Corrupted, got {other:?}"),
        }
    }

    #[test]
    fn genre_objects_round_trip() {
        let genres = vec![Genre {
            id: 18,
            name: "Drama".to_string(),
        }];
        let encoded = encode_opt_list(Some(genres.as_slice())).unwrap().unwrap();
        let decoded = decode_opt_list::<Genre>("t", "c", Some(&encoded))
            .unwrap()
            .unwrap();
        assert_eq!(decoded, genres);
    }
}
