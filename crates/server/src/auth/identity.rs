/// The authenticated caller, injected into request extensions by the
/// auth middleware after token validation.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub email: String,
}
