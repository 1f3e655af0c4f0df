use kernel::id::{Id, markers};

/// Externally assigned application identifier
pub type AppId = Id<markers::App>;
