use std::convert::Infallible;

use serde::{Deserialize, Serialize};

/// One stream to check. `name` is for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeTarget {
    pub name: String,
    pub url: String,
}

impl ProbeTarget {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Supplies the ordered target list for a run.
///
/// A failure here is fatal to the run: no probes are issued.
pub trait TargetSource {
    type Error: std::error::Error + Send + Sync + 'static;

    fn targets(&self) -> Result<Vec<ProbeTarget>, Self::Error>;
}

impl TargetSource for Vec<ProbeTarget> {
    type Error = Infallible;

    fn targets(&self) -> Result<Vec<ProbeTarget>, Self::Error> {
        Ok(self.clone())
    }
}

impl TargetSource for [ProbeTarget] {
    type Error = Infallible;

    fn targets(&self) -> Result<Vec<ProbeTarget>, Self::Error> {
        Ok(self.to_vec())
    }
}
