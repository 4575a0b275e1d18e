//! Error types for port operations.
//!
//! Contract errors that reach a trigger are turned into the failure message
//! shown to the user, so their `Display` text is user-facing.

/// Errors reported by contract capability ports.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContractError {
    /// The contract client could not be reached.
    #[error("Contrato no disponible: {0}")]
    Unavailable(String),

    /// The requested record does not exist on-chain.
    #[error("{entity_type} no encontrado: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// The call reached the contract but was rejected.
    #[error("Transacción revertida en {method}: {reason}")]
    Reverted {
        method: &'static str,
        reason: String,
    },
}

impl ContractError {
    pub fn unavailable(message: impl ToString) -> Self {
        Self::Unavailable(message.to_string())
    }

    /// Create a NotFound error with entity type and ID context.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    pub fn reverted(method: &'static str, reason: impl ToString) -> Self {
        Self::Reverted {
            method,
            reason: reason.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Errors from decoding or checking a detached signature.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignatureError {
    #[error("Firma mal formada: {0}")]
    MalformedSignature(String),
    #[error("Clave pública mal formada: {0}")]
    MalformedKey(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PortfolioError {
    #[error("Portfolio not found for user {0}")]
    NotFound(String),
    #[error("Portfolio data source failed: {0}")]
    Source(String),
}
