//! Live module facts reported by the host.

/// Whether a module runs on its own or attaches to a host module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// Regular module; expected to reach [`ActivationState::Active`].
    Normal,
    /// Fragment attached to another module; expected to reach [`ActivationState::Resolved`].
    Fragment,
}

/// Activation state of a live module, as far as readiness cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationState {
    Active,
    Resolved,
    /// Installed, starting, stopping, or anything else.
    Other,
}

/// A module as seen at one point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleFact {
    /// Symbolic name matched against required patterns.
    pub symbolic_name: String,
    pub kind: ModuleKind,
    pub state: ActivationState,
}

impl ModuleFact {
    /// Creates a fact for a regular module.
    pub fn normal(name: impl Into<String>, state: ActivationState) -> Self {
        Self {
            symbolic_name: name.into(),
            kind: ModuleKind::Normal,
            state,
        }
    }

    /// Creates a fact for a fragment.
    pub fn fragment(name: impl Into<String>, state: ActivationState) -> Self {
        Self {
            symbolic_name: name.into(),
            kind: ModuleKind::Fragment,
            state,
        }
    }

    #[inline]
    pub fn is_fragment(&self) -> bool {
        self.kind == ModuleKind::Fragment
    }

    /// The state this module must be in to count as operational.
    #[inline]
    pub fn expected_state(&self) -> ActivationState {
        match self.kind {
            ModuleKind::Normal => ActivationState::Active,
            ModuleKind::Fragment => ActivationState::Resolved,
        }
    }

    /// Returns true if the module is in its expected state.
    #[inline]
    pub fn is_operational(&self) -> bool {
        self.state == self.expected_state()
    }
}
