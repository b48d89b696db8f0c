//! Test data factories. Use the closure parameter to override fields.

use chrono::{SubsecRound, Utc};

use crate::{application::use_cases::token::generate_token, domain::entities::token::Token};

/// Create a non-admin token with a fresh random value.
pub fn create_test_token(overrides: impl FnOnce(&mut Token)) -> Token {
    let mut token = Token {
        token: generate_token(),
        is_admin: false,
        created_at: Utc::now().trunc_subsecs(6),
    };
    overrides(&mut token);
    token
}
