//! Response envelopes shared by handlers.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::SafeUser;

/// `{ user }`
#[derive(Debug, Serialize, ToSchema)]
pub struct UserEnvelope {
    pub user: SafeUser,
}

/// `{ message, user }`
#[derive(Debug, Serialize, ToSchema)]
pub struct UserMessage {
    #[schema(example = "Perfil atualizado com sucesso")]
    pub message: String,
    pub user: SafeUser,
}

/// `{ message }`
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
