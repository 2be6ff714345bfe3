use ::redis::{AsyncCommands, Client};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::error::AppResult;

const RESET_TOKEN_PREFIX: &str = "password_reset:";

/// Only the digest of a reset token is ever stored.
pub fn token_digest(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}

fn token_key(token: &str) -> String {
    format!("{}{}", RESET_TOKEN_PREFIX, token_digest(token))
}

/// Generates a one-time reset token for `employee_id` that expires after
/// `ttl` seconds, and returns the plain token.
pub async fn issue_reset_token(client: &Client, employee_id: i32, ttl: u64) -> AppResult<String> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    let token = Uuid::new_v4().simple().to_string();

    let _: () = conn.set_ex(token_key(&token), employee_id, ttl).await?;
    tracing::debug!(employee_id, ttl, "Password reset token stored");

    Ok(token)
}

/// A reset token taken out of the store, with the lifetime it had left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetClaim {
    pub employee_id: i32,
    ttl: u64,
}

/// Seconds left on a key as reported by `TTL`; missing keys (-2) and keys
/// without expiry (-1) have no usable lifetime.
fn remaining_ttl(ttl: i64) -> Option<u64> {
    u64::try_from(ttl).ok().filter(|secs| *secs > 0)
}

/// Atomically takes the token out of the store. Unknown or expired tokens
/// yield `None`. A failed reset hands the claim back to
/// [`restore_reset_token`] so the link stays usable.
pub async fn consume_reset_token(client: &Client, token: &str) -> AppResult<Option<ResetClaim>> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    let key = token_key(token);

    let (employee_id, ttl, _deleted): (Option<i32>, i64, i32) = ::redis::pipe()
        .atomic()
        .get(&key)
        .ttl(&key)
        .del(&key)
        .query_async(&mut conn)
        .await?;

    Ok(employee_id
        .zip(remaining_ttl(ttl))
        .map(|(employee_id, ttl)| ResetClaim { employee_id, ttl }))
}

/// Puts a claimed token back with the lifetime it had when it was taken.
pub async fn restore_reset_token(client: &Client, token: &str, claim: &ResetClaim) -> AppResult<()> {
    let mut conn = client.get_multiplexed_async_connection().await?;
    let _: () = conn
        .set_ex(token_key(token), claim.employee_id, claim.ttl)
        .await?;
    tracing::debug!(employee_id = claim.employee_id, ttl = claim.ttl, "Password reset token restored");
    Ok(())
}
