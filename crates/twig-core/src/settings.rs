/// Limits and policies applied to every render pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    /// How many thunks may return thunks before the chain counts as unresolvable.
    pub max_thunk_depth: usize,
    /// Maximum nesting depth of a virtual tree.
    pub max_depth: usize,
    /// Leave the `value` property of the focused element alone during reconciliation.
    pub protect_focused_value: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            max_thunk_depth: 64,
            max_depth: 512,
            protect_focused_value: true,
        }
    }
}

impl RenderSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_thunk_depth(mut self, depth: usize) -> Self {
        self.max_thunk_depth = depth;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn with_protect_focused_value(mut self, protect: bool) -> Self {
        self.protect_focused_value = protect;
        self
    }
}
