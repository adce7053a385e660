//! Baseline tracking for the managed record.

/// The last IP the reconciler believes is stored at the registrar.
///
/// `None` means the baseline is unknown, which never matches a resolved IP.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciliationState {
    cached_registrar_ip: Option<String>,
}

impl ReconciliationState {
    /// Creates a state with the given baseline.
    #[must_use]
    pub const fn new(baseline: Option<String>) -> Self {
        Self {
            cached_registrar_ip: baseline,
        }
    }

    /// Returns the current baseline, if known.
    #[must_use]
    pub fn baseline(&self) -> Option<&str> {
        self.cached_registrar_ip.as_deref()
    }

    /// Returns true if `ip` equals the baseline byte for byte.
    #[must_use]
    pub fn matches(&self, ip: &str) -> bool {
        self.baseline() == Some(ip)
    }

    /// Records that the registrar now holds `ip`.
    pub(super) fn synced(&mut self, ip: &str) {
        self.cached_registrar_ip = Some(ip.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_baseline_matches_nothing() {
        let state = ReconciliationState::default();

        assert!(!state.matches("1.2.3.4"));
        assert!(!state.matches(""));
    }

    #[test]
    fn comparison_is_exact() {
        let state = ReconciliationState::new(Some("1.2.3.4".to_string()));

        assert!(state.matches("1.2.3.4"));
        assert!(!state.matches("1.2.3.4 "));
        assert!(!state.matches("01.2.3.4"));
    }

    #[test]
    fn synced_replaces_baseline() {
        let mut state = ReconciliationState::new(Some("1.2.3.4".to_string()));

        state.synced("5.6.7.8");

        assert_eq!(state.baseline(), Some("5.6.7.8"));
    }
}
