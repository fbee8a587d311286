use uuid::Uuid;

/// Read access to the authenticated identity.
pub trait SessionProvider: Send + Sync {
    /// Owner id of the current session, or `None` when logged out.
    fn current_owner(&self) -> Option<Uuid>;

    fn is_logged_in(&self) -> bool {
        self.current_owner().is_some()
    }
}
