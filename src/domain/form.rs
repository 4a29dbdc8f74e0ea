//! Form state and the vocabulary the controller uses to talk to a view.

use super::entities::{ClassifierModel, TrainingConfig};

/// Where an alert is shown. Field alerts sit next to their input;
/// `Register` and `Query` are the per-form placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Username,
    Register,
    Query,
    From,
    To,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Username => "username",
            Self::Register => "registration",
            Self::Query => "query",
            Self::From => "from",
            Self::To => "to",
        }
    }
}

/// The two independent workflows, each with its own loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Workflow {
    Register,
    Query,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Success,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Success,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            kind: AlertKind::Danger,
            message: message.into(),
        }
    }
}

/// Application state: the pending input of both forms.
///
/// Constructed once at start-up and owned by the view; handlers read it
/// through the view instead of reaching for globals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormState {
    pub username: String,
    pub token: String,
    pub from: String,
    pub to: String,
    pub classifier_model: ClassifierModel,
    pub training_config: TrainingConfig,
    pub query_form_visible: bool,
}

impl FormState {
    pub fn with_defaults(classifier_model: ClassifierModel, training_config: TrainingConfig) -> Self {
        Self {
            classifier_model,
            training_config,
            ..Self::default()
        }
    }

    pub fn query_form(&self) -> QueryForm {
        QueryForm {
            token: self.token.clone(),
            from: self.from.clone(),
            to: self.to.clone(),
            classifier_model: self.classifier_model,
            training_config: self.training_config,
        }
    }
}

/// Raw (unvalidated) query input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryForm {
    pub token: String,
    pub from: String,
    pub to: String,
    pub classifier_model: ClassifierModel,
    pub training_config: TrainingConfig,
}
