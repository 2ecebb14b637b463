use thiserror::Error;

/// A defect in the seed dataset found before any remote call is made
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetProblem {
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },
    #[error("menu item '{item}' references unknown category '{category}'")]
    UnknownCategory { item: String, category: String },
    #[error("menu item '{item}' references unknown customization '{customization}'")]
    UnknownCustomization { item: String, customization: String },
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("seed dataset is invalid: {}", format_problems(.0))]
    InvalidDataset(Vec<DatasetProblem>),
    #[error("stage '{stage}' failed")]
    Stage {
        stage: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

impl SeedError {
    pub fn stage(stage: &'static str) -> impl FnOnce(anyhow::Error) -> SeedError {
        move |source| SeedError::Stage { stage, source }
    }

    /// Name of the stage that failed, if the error came from a remote stage
    pub fn failed_stage(&self) -> Option<&'static str> {
        match self {
            SeedError::Stage { stage, .. } => Some(stage),
            SeedError::InvalidDataset(_) => None,
        }
    }
}

fn format_problems(problems: &[DatasetProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
