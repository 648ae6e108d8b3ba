//! Event wiring for field controllers.

use super::Field;

/// A host-delivered event on a bound control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// The control lost focus
    Blur,
    /// The value was edited
    Input,
    /// The edited value was committed
    Change,
}

impl Field {
    /// Route a host event to the matching check.
    ///
    /// Losing focus marks the field touched; editing marks it dirty and,
    /// like committing, clears any previously-set custom validity so a
    /// stale custom error never survives into a fresh check cycle.
    pub async fn handle_event(&self, event: ControlEvent) {
        match event {
            ControlEvent::Blur => self.check(false, true).await,
            ControlEvent::Input => {
                self.clear_custom_validity();
                self.check(true, false).await;
            }
            ControlEvent::Change => {
                self.clear_custom_validity();
                self.check(false, false).await;
            }
        }
    }
}
