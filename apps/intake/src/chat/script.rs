//! Stage Machine — the linear wizard script.
//!
//! `Script::transition` is pure: it maps `(stage, message)` to the reply, the
//! next stage and the single store action the caller must perform. Vendor
//! resolution needs the store, so it is returned as `Action::SelectVendor` and
//! the caller falls back to `Script::vendor_rejected` when the name is unknown.

use crate::config::IntakeMode;
use crate::models::candidate::CandidateField;

pub const REPLY_COMPANY: &str = "Which company are you applying for?";
pub const REPLY_NAME: &str = "Your full name?";
pub const REPLY_EMAIL: &str = "Email?";
pub const REPLY_EXPERIENCE: &str = "Years of experience?";
pub const REPLY_UPLOAD: &str = "Upload CV below.";
pub const REPLY_WAITING: &str = "Waiting for CV upload.";

/// Store interaction required by a transition. At most one write per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    /// Start of a fresh session: no record exists yet, any client id is dropped.
    Reset,
    /// Resolve the vendor by name and, if it exists, create a linked record.
    SelectVendor { name: String },
    /// Create an unlinked record.
    Create,
    Update { field: CandidateField, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub reply: String,
    pub next_stage: u32,
    pub action: Action,
}

/// A stage that stores the previous answer in `field` and asks the next question.
struct FieldStep {
    stage: u32,
    field: CandidateField,
    next_prompt: &'static str,
}

const VENDOR_STEPS: &[FieldStep] = &[
    FieldStep { stage: 2, field: CandidateField::Company, next_prompt: REPLY_NAME },
    FieldStep { stage: 3, field: CandidateField::Name, next_prompt: REPLY_EMAIL },
    FieldStep { stage: 4, field: CandidateField::Email, next_prompt: REPLY_EXPERIENCE },
    FieldStep { stage: 5, field: CandidateField::Experience, next_prompt: REPLY_UPLOAD },
];

const SIMPLE_STEPS: &[FieldStep] = &[
    FieldStep { stage: 1, field: CandidateField::Name, next_prompt: REPLY_EMAIL },
    FieldStep { stage: 2, field: CandidateField::Email, next_prompt: REPLY_EXPERIENCE },
    FieldStep { stage: 3, field: CandidateField::Experience, next_prompt: REPLY_UPLOAD },
];

#[derive(Debug, Clone)]
pub struct Script {
    mode: IntakeMode,
    vendor_names: Vec<String>,
}

impl Script {
    /// `vendor_names` feed the vendor prompts; vendors never change after seeding.
    pub fn new(mode: IntakeMode, vendor_names: Vec<String>) -> Self {
        Self { mode, vendor_names }
    }

    /// First stage at which the wizard only waits for the upload.
    pub fn terminal_stage(&self) -> u32 {
        match self.mode {
            IntakeMode::Vendor => 6,
            IntakeMode::Simple => 4,
        }
    }

    pub fn transition(&self, stage: u32, message: &str) -> Transition {
        match (self.mode, stage) {
            (IntakeMode::Vendor, 0) => Transition {
                reply: self.vendor_prompt(),
                next_stage: 1,
                action: Action::Reset,
            },
            (IntakeMode::Vendor, 1) => Transition {
                reply: REPLY_COMPANY.to_string(),
                next_stage: 2,
                action: Action::SelectVendor {
                    name: message.trim().to_string(),
                },
            },
            (IntakeMode::Simple, 0) => Transition {
                reply: REPLY_NAME.to_string(),
                next_stage: 1,
                action: Action::Create,
            },
            (mode, stage) => {
                let steps = match mode {
                    IntakeMode::Vendor => VENDOR_STEPS,
                    IntakeMode::Simple => SIMPLE_STEPS,
                };
                match steps.iter().find(|step| step.stage == stage) {
                    Some(step) => Transition {
                        reply: step.next_prompt.to_string(),
                        next_stage: stage + 1,
                        action: Action::Update {
                            field: step.field,
                            value: message.to_string(),
                        },
                    },
                    None => Transition {
                        reply: REPLY_WAITING.to_string(),
                        next_stage: stage,
                        action: Action::None,
                    },
                }
            }
        }
    }

    /// Re-prompt for an unknown vendor: the stage does not advance.
    pub fn vendor_rejected(&self) -> Transition {
        Transition {
            reply: format!("Invalid vendor. Please type {}.", self.vendor_choices(" or ")),
            next_stage: 1,
            action: Action::None,
        }
    }

    fn vendor_prompt(&self) -> String {
        format!(
            "Which vendor are you applying through? ({})",
            self.vendor_choices(" / ")
        )
    }

    fn vendor_choices(&self, separator: &str) -> String {
        self.vendor_names.join(separator)
    }
}
