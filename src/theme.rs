//! Theme
//!
//! Dark mode preference. A stored choice wins; without one the system colour
//! scheme decides.

use tracing::debug;

use crate::{persistence, storage::Storage};

/// Dark mode state for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DarkMode {
    enabled: bool,
}

impl DarkMode {
    /// Resolve the preference from `storage`, falling back to
    /// `system_prefers_dark` when nothing usable is stored.
    pub fn load<S: Storage + ?Sized>(storage: &S, system_prefers_dark: bool) -> Self {
        let enabled = persistence::load_dark_mode(storage).unwrap_or(system_prefers_dark);

        Self { enabled }
    }

    /// Whether dark mode is on.
    pub fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Flip the preference and persist the new value, returning it.
    pub fn toggle<S: Storage + ?Sized>(&mut self, storage: &mut S) -> bool {
        self.enabled = !self.enabled;

        persistence::save_dark_mode(storage, self.enabled);

        debug!(enabled = self.enabled, "dark mode toggled");

        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;
    use crate::{persistence::DARK_MODE_KEY, storage::MemoryStorage};

    #[test]
    fn falls_back_to_system_preference() {
        let storage = MemoryStorage::new();

        assert!(DarkMode::load(&storage, true).is_enabled());
        assert!(!DarkMode::load(&storage, false).is_enabled());
    }

    #[test]
    fn stored_choice_overrides_system() -> TestResult {
        let mut storage = MemoryStorage::new();
        storage.set(DARK_MODE_KEY, "false")?;

        assert!(!DarkMode::load(&storage, true).is_enabled());

        Ok(())
    }

    #[test]
    fn toggle_persists() -> TestResult {
        let mut storage = MemoryStorage::new();
        let mut mode = DarkMode::load(&storage, false);

        assert!(mode.toggle(&mut storage));
        assert_eq!(storage.get(DARK_MODE_KEY)?.as_deref(), Some("true"));
        assert!(DarkMode::load(&storage, false).is_enabled());

        assert!(!mode.toggle(&mut storage));
        assert_eq!(storage.get(DARK_MODE_KEY)?.as_deref(), Some("false"));

        Ok(())
    }
}
