use rand::{Rng, distr::Alphanumeric};
use serde::Deserialize;
use surrealdb::{RecordId, Surreal, engine::any::Any};

use crate::errors::{Error, Result};

pub const CODE_LEN: usize = 8;

const MAX_CODE_ATTEMPTS: usize = 5;

/// Short human-shareable token, fixed alphanumeric alphabet.
pub fn generate_code() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(CODE_LEN)
        .map(char::from)
        .collect::<String>()
}

#[derive(Deserialize, Debug)]
struct CodeHit {
    #[allow(dead_code)]
    id: RecordId,
}

/// Re-rolls on collision against the stored codes; collisions are never
/// surfaced to the caller.
pub async fn unique_code(sdb: &Surreal<Any>, table: &'static str, field: &'static str) -> Result<String> {
    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_code();
        let hits: Vec<CodeHit> = sdb
            .query(format!(
                "SELECT id FROM type::table($table) WHERE {field} = $code;"
            ))
            .bind(("table", table))
            .bind(("code", code.clone()))
            .await?
            .take(0)?;
        if hits.is_empty() {
            return Ok(code);
        }
    }
    Err(Error::Internal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_shape() {
        let code = generate_code();
        assert_eq!(code.len(), CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_codes_differ() {
        assert_ne!(generate_code(), generate_code());
    }
}
