//! The fixed set of foundation models served by the gateway.

/// Foundation models available through the Databricks serving gateway.
///
/// The identifier strings are what the gateway expects in generation
/// requests; the set itself is deployment configuration and can change
/// without touching the surrounding orchestration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelSelection {
    /// DBRX Instruct, the default selection
    DbrxInstruct,
    /// Meta Llama 3 70B Instruct
    MetaLlama3_70bInstruct,
    /// Mixtral 8x7B Instruct
    Mixtral8x7bInstruct,
    /// Llama 2 70B Chat
    Llama2_70bChat,
}

impl ModelSelection {
    /// All selectable models, in picker display order.
    pub const ALL: [Self; 4] = [
        Self::DbrxInstruct,
        Self::MetaLlama3_70bInstruct,
        Self::Mixtral8x7bInstruct,
        Self::Llama2_70bChat,
    ];

    /// Returns the gateway identifier for this model.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DbrxInstruct => "databricks-dbrx-instruct",
            Self::MetaLlama3_70bInstruct => "databricks-meta-llama-3-70b-instruct",
            Self::Mixtral8x7bInstruct => "databricks-mixtral-8x7b-instruct",
            Self::Llama2_70bChat => "databricks-llama-2-70b-chat",
        }
    }

    /// Parse from a gateway identifier string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "databricks-dbrx-instruct" => Some(Self::DbrxInstruct),
            "databricks-meta-llama-3-70b-instruct" => Some(Self::MetaLlama3_70bInstruct),
            "databricks-mixtral-8x7b-instruct" => Some(Self::Mixtral8x7bInstruct),
            "databricks-llama-2-70b-chat" => Some(Self::Llama2_70bChat),
            _ => None,
        }
    }

    /// Returns the next model in picker order, wrapping at the end.
    pub fn next(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|m| *m == self)
            .expect("model is a member of ALL");
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Returns the previous model in picker order, wrapping at the start.
    pub fn previous(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|m| *m == self)
            .expect("model is a member of ALL");
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Default for ModelSelection {
    fn default() -> Self {
        Self::DbrxInstruct
    }
}

impl std::fmt::Display for ModelSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
