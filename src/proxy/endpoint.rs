// src/proxy/endpoint.rs

/// The two read endpoints the engine exposes per simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationEndpoint {
    Status,
    Result,
}

impl SimulationEndpoint {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Result => "result",
        }
    }

    pub fn suffix(&self) -> &'static str {
        self.name()
    }

    /// Label carried in the `error` field when forwarding fails.
    pub fn error_label(&self) -> &'static str {
        match self {
            Self::Status => "Failed to fetch simulation status",
            Self::Result => "Failed to fetch simulation result",
        }
    }

    /// Engine path for a run. The run id is inserted verbatim.
    pub fn downstream_path(&self, run_id: &str) -> String {
        format!("/simulation/{}/{}", run_id, self.suffix())
    }
}

impl std::fmt::Display for SimulationEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
