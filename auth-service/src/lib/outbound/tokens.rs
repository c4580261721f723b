use auth::JwtError;
use auth::TokenManager;
use auth::TokenPair;

use crate::domain::auth::ports::TokenProvider;

impl TokenProvider for TokenManager {
    fn issue_token_pair(&self, user_id: &str, email: &str) -> Result<TokenPair, JwtError> {
        TokenManager::issue_token_pair(self, user_id, email)
    }

    fn rotate_tokens(&self, refresh_token: &str) -> Result<TokenPair, JwtError> {
        TokenManager::rotate_tokens(self, refresh_token)
    }
}
