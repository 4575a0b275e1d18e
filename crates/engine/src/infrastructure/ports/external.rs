//! External service port traits (signature verification, portfolio data).

use async_trait::async_trait;

use heroquest_domain::{CommunityInsight, PortfolioSnapshot, UserId, WalletAddress};

use super::error::{PortfolioError, SignatureError};

/// Verifies detached signatures over social proofs.
#[cfg_attr(test, mockall::automock)]
pub trait SignatureVerifierPort: Send + Sync {
    /// Returns `Ok(false)` for a well-formed signature that does not match
    /// `signer`, and `Err` when either input cannot be decoded.
    fn verify(
        &self,
        message: &str,
        signature: &str,
        signer: &WalletAddress,
    ) -> Result<bool, SignatureError>;
}

/// Source of portfolio positions and community sentiment.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PortfolioDataPort: Send + Sync {
    async fn fetch_portfolio(&self, user_id: &UserId) -> Result<PortfolioSnapshot, PortfolioError>;

    async fn fetch_community_insights(&self) -> Result<Vec<CommunityInsight>, PortfolioError>;
}
