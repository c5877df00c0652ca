//! Inputs accepted by the account service

#[derive(Debug, Clone, Default)]
pub struct UpdateDetailsInput {
    pub full_name: String,
    pub email: String,
}
