//! Supplier-Add flow: company → contact → number → create.

use shopkeep_inventory::{AddSupplier, CatalogCommand, CatalogEvent};

use super::{FlowContext, FlowState, Input, Transition, classify_text};
use crate::outcome::{ChatError, Outcome};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierAddState {
    pub step: SupplierAddStep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SupplierAddStep {
    Company,
    Contact { company: String },
    Number { company: String, contact: String },
}

impl FlowState for SupplierAddState {
    fn prompt(&self) -> Outcome {
        match &self.step {
            SupplierAddStep::Company => Outcome::AskCompanyName,
            SupplierAddStep::Contact { company } => Outcome::AskContactName {
                company: company.clone(),
            },
            SupplierAddStep::Number { company, contact } => Outcome::AskContactNumber {
                company: company.clone(),
                contact: contact.clone(),
            },
        }
    }
}

fn at(step: SupplierAddStep) -> SupplierAddState {
    SupplierAddState { step }
}

pub fn start() -> Transition {
    Transition::prompt(at(SupplierAddStep::Company))
}

pub(crate) fn advance(state: SupplierAddState, text: &str, ctx: &FlowContext<'_>) -> Transition {
    let input = classify_text(text);
    let value = match input {
        Input::Cancel => return Transition::idle(Outcome::Cancelled),
        Input::Back => return back(state),
        Input::Text(value) if !value.is_empty() => value.to_string(),
        _ => return Transition::reprompt(state, ChatError::EmptyText),
    };

    match state.step.clone() {
        SupplierAddStep::Company => Transition::prompt(at(SupplierAddStep::Contact { company: value })),
        SupplierAddStep::Contact { company } => Transition::prompt(at(SupplierAddStep::Number {
            company,
            contact: value,
        })),
        SupplierAddStep::Number { company, contact } => {
            let command = CatalogCommand::AddSupplier(AddSupplier {
                company_name: company,
                contact_name: contact,
                contact_number: value,
            });
            match ctx.commit(&[command]) {
                Ok(events) => match events.into_iter().find_map(|e| match e {
                    CatalogEvent::SupplierAdded { supplier } => Some(supplier),
                    _ => None,
                }) {
                    Some(supplier) => {
                        tracing::info!(supplier_id = %supplier.id, "supplier added");
                        Transition::idle(Outcome::SupplierAdded { supplier })
                    }
                    None => Transition::idle(Outcome::Cancelled),
                },
                Err(e) => Transition::commit_failed(state, e),
            }
        }
    }
}

fn back(state: SupplierAddState) -> Transition {
    match state.step {
        SupplierAddStep::Company => Transition::idle(Outcome::Cancelled),
        SupplierAddStep::Contact { .. } => Transition::prompt(at(SupplierAddStep::Company)),
        SupplierAddStep::Number { company, .. } => {
            Transition::prompt(at(SupplierAddStep::Contact { company }))
        }
    }
}
