use uuid::Uuid;

/// Verified bearer identity for one request, produced by the transport
/// layer before any resolver runs. Operations requiring authentication
/// take this value instead of re-deriving it from headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub user_id: Uuid,
}
