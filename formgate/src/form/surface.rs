//! Submission surface and gate.

use std::fmt;
use std::sync::{Arc, RwLock};

use crate::form::FormState;
use crate::store::Store;

/// Decision produced by the submission gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The form was valid (or no form is attached); the submission proceeds
    Submitted,
    /// The form was invalid; the attempt was cancelled
    Suppressed,
}

/// Internal state for a FormSurface
struct SurfaceInner {
    /// The host's own block-on-invalid behavior is disabled
    no_validate: bool,
    /// Gate installed by an attached form
    gate: Option<Store<FormState>>,
    /// Number of submissions that went through
    submissions: u64,
}

/// A submission surface.
///
/// Models the host's submit target: submission attempts are routed through
/// [`request_submit`](FormSurface::request_submit), which consults the
/// attached form's state and either lets the attempt through or suppresses
/// it. The surface itself sends nothing; it only gates and counts.
pub struct FormSurface {
    inner: Arc<RwLock<SurfaceInner>>,
}

impl FormSurface {
    /// Create a new unbound surface
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SurfaceInner {
                no_validate: false,
                gate: None,
                submissions: 0,
            })),
        }
    }

    /// Whether the host's own block-on-invalid behavior is disabled.
    ///
    /// Set when a form attaches and left in place afterwards, matching the
    /// host convention of not re-enabling native validation on teardown.
    pub fn no_validate(&self) -> bool {
        self.inner
            .read()
            .map(|guard| guard.no_validate)
            .unwrap_or(false)
    }

    /// Attempt a submission.
    ///
    /// Suppressed when an attached form is currently invalid; the per-field
    /// messages are expected to be surfaced already via the fields' `show`
    /// policy. With no form attached the attempt always proceeds.
    pub fn request_submit(&self) -> SubmitOutcome {
        let gate = self.inner.read().ok().and_then(|guard| guard.gate.clone());
        if let Some(gate) = gate
            && !gate.get().valid
        {
            log::debug!("surface: submission suppressed, form is invalid");
            return SubmitOutcome::Suppressed;
        }

        if let Ok(mut guard) = self.inner.write() {
            guard.submissions += 1;
        }
        SubmitOutcome::Submitted
    }

    /// Number of submissions that went through the gate
    pub fn submission_count(&self) -> u64 {
        self.inner
            .read()
            .map(|guard| guard.submissions)
            .unwrap_or(0)
    }

    pub(crate) fn bind(&self, gate: Store<FormState>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.no_validate = true;
            guard.gate = Some(gate);
        }
    }

    pub(crate) fn unbind(&self) {
        if let Ok(mut guard) = self.inner.write() {
            guard.gate = None;
        }
    }
}

impl Clone for FormSurface {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl Default for FormSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FormSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSurface")
            .field("no_validate", &self.no_validate())
            .field("submissions", &self.submission_count())
            .finish_non_exhaustive()
    }
}
