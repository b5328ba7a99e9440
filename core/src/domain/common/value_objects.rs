use uuid::Uuid;

/// The authenticated caller. Passed explicitly into every service call;
/// the core holds no ambient "current user" state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    user_id: Uuid,
}

impl Identity {
    pub fn new(user_id: Uuid) -> Self {
        Self { user_id }
    }

    pub fn id(&self) -> Uuid {
        self.user_id
    }
}
