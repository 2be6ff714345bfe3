pub mod reset_tokens;

pub use reset_tokens::{ResetClaim, consume_reset_token, issue_reset_token, restore_reset_token};
