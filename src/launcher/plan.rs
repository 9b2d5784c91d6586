//! Record of the steps a launch took (or would take).

use std::fmt;
use std::path::PathBuf;

use crate::requirements::DependencyStatus;

/// One step of the launch sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchStep {
    /// The marker file was found.
    Guard { marker: PathBuf },
    /// The isolated environment was activated.
    Activate { env: PathBuf },
    /// The dependency check ran (or was skipped for an absent env).
    CheckDependencies { status: DependencyStatus },
    /// The isolated environment was created.
    CreateEnvironment { env: PathBuf },
    /// The manifest was installed.
    Install { manifest: PathBuf },
    /// Dependencies were checked again after installing.
    Verify { status: DependencyStatus },
    /// Control was handed to the main program.
    Delegate { command: String },
}

impl LaunchStep {
    /// Short label for the step kind.
    pub fn label(&self) -> &'static str {
        match self {
            LaunchStep::Guard { .. } => "guard",
            LaunchStep::Activate { .. } => "activate",
            LaunchStep::CheckDependencies { .. } => "check",
            LaunchStep::CreateEnvironment { .. } => "create",
            LaunchStep::Install { .. } => "install",
            LaunchStep::Verify { .. } => "verify",
            LaunchStep::Delegate { .. } => "delegate",
        }
    }
}

impl fmt::Display for LaunchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchStep::Guard { marker } => write!(f, "found {}", marker.display()),
            LaunchStep::Activate { env } => write!(f, "activate {}", env.display()),
            LaunchStep::CheckDependencies { status } => write!(f, "check dependencies: {}", status),
            LaunchStep::CreateEnvironment { env } => write!(f, "create {}", env.display()),
            LaunchStep::Install { manifest } => write!(f, "install from {}", manifest.display()),
            LaunchStep::Verify { status } => write!(f, "verify dependencies: {}", status),
            LaunchStep::Delegate { command } => write!(f, "run {}", command),
        }
    }
}

/// Ordered steps of one launch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchPlan {
    steps: Vec<LaunchStep>,
}

impl LaunchPlan {
    /// Create an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step.
    pub fn push(&mut self, step: LaunchStep) {
        tracing::debug!("Launch step: {}", step);
        self.steps.push(step);
    }

    /// Steps in order.
    pub fn steps(&self) -> &[LaunchStep] {
        &self.steps
    }

    /// Step labels in order.
    pub fn labels(&self) -> Vec<&'static str> {
        self.steps.iter().map(LaunchStep::label).collect()
    }

    /// Whether the plan includes any remediation (create or install).
    pub fn remediates(&self) -> bool {
        self.steps.iter().any(|s| {
            matches!(
                s,
                LaunchStep::CreateEnvironment { .. } | LaunchStep::Install { .. }
            )
        })
    }
}

/// What a launch ended with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchReport {
    /// Steps taken, or planned under dry run.
    pub plan: LaunchPlan,

    /// Exit code of the delegate; `None` under dry run.
    pub exit_code: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_push_order() {
        let mut plan = LaunchPlan::new();
        plan.push(LaunchStep::Guard {
            marker: PathBuf::from("src/app.py"),
        });
        plan.push(LaunchStep::Delegate {
            command: "python src/app.py".to_string(),
        });
        assert_eq!(plan.labels(), vec!["guard", "delegate"]);
        assert!(!plan.remediates());
    }

    #[test]
    fn install_counts_as_remediation() {
        let mut plan = LaunchPlan::new();
        plan.push(LaunchStep::Install {
            manifest: PathBuf::from("requirements.txt"),
        });
        assert!(plan.remediates());
    }

    #[test]
    fn step_display_is_readable() {
        let step = LaunchStep::CheckDependencies {
            status: DependencyStatus::Missing {
                modules: vec!["dotenv".to_string()],
            },
        };
        assert_eq!(step.to_string(), "check dependencies: missing dotenv");
    }
}
