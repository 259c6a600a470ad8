//! Preferences: language, and the default prep supplier.

use shopkeep_inventory::{CatalogCommand, CatalogEvent, SetPrepSupplier};

use super::{FlowContext, FlowState, Input, Transition, classify, language};
use crate::outcome::{ChatError, Outcome, SupplierChoice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesState {
    pub step: PreferencesStep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreferencesStep {
    Menu,
    PrepSupplier { choices: Vec<SupplierChoice> },
}

impl PreferencesState {
    pub fn menu() -> Self {
        Self {
            step: PreferencesStep::Menu,
        }
    }
}

impl FlowState for PreferencesState {
    fn prompt(&self) -> Outcome {
        match &self.step {
            PreferencesStep::Menu => Outcome::PreferencesMenu,
            PreferencesStep::PrepSupplier { choices } => Outcome::AskPrepSupplier {
                choices: choices.clone(),
            },
        }
    }
}

pub fn start() -> Transition {
    Transition::prompt(PreferencesState::menu())
}

pub(crate) fn advance(state: PreferencesState, text: &str, ctx: &FlowContext<'_>) -> Transition {
    let input = classify(text);
    if input == Input::Cancel {
        return Transition::idle(Outcome::Cancelled);
    }

    match (state.step.clone(), input) {
        (PreferencesStep::Menu, Input::Back) => Transition::idle(Outcome::Cancelled),
        (PreferencesStep::Menu, Input::Text("1")) => language::start(true),
        (PreferencesStep::Menu, Input::Text("2")) => {
            let catalog = match ctx.snapshot() {
                Ok(catalog) => catalog,
                Err(e) => return Transition::reprompt(state, e),
            };
            let choices = SupplierChoice::all(&catalog);
            if choices.is_empty() {
                return Transition::reprompt(state, ChatError::NoSuppliers);
            }
            Transition::prompt(PreferencesState {
                step: PreferencesStep::PrepSupplier { choices },
            })
        }
        (PreferencesStep::Menu, _) => Transition::reprompt(state, ChatError::InvalidSelection),

        (PreferencesStep::PrepSupplier { .. }, Input::Back) => {
            Transition::prompt(PreferencesState::menu())
        }
        (PreferencesStep::PrepSupplier { choices }, Input::Text(selection)) => {
            match SupplierChoice::pick(&choices, selection).cloned() {
                Some(choice) => set_prep_supplier(state, choice, ctx),
                None => Transition::reprompt(state, ChatError::InvalidSelection),
            }
        }
        (PreferencesStep::PrepSupplier { .. }, _) => {
            Transition::reprompt(state, ChatError::InvalidSelection)
        }
    }
}

fn set_prep_supplier(
    state: PreferencesState,
    choice: SupplierChoice,
    ctx: &FlowContext<'_>,
) -> Transition {
    let command = CatalogCommand::SetPrepSupplier(SetPrepSupplier {
        supplier_id: choice.id,
    });
    match ctx.commit(&[command]) {
        Ok(events) => {
            let repointed = events
                .iter()
                .find_map(|e| match e {
                    CatalogEvent::PrepSupplierSet { repointed, .. } => Some(repointed.len()),
                    _ => None,
                })
                .unwrap_or_default();
            Transition::idle(Outcome::PrepSupplierSet {
                supplier: choice.company_name,
                repointed,
            })
        }
        Err(e) => Transition::commit_failed(state, e),
    }
}
