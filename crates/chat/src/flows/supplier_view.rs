use shopkeep_core::SupplierId;

use super::{FlowContext, FlowState, Input, Transition, classify};
use crate::outcome::{ChatError, Outcome, SupplierChoice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierViewState {
    pub choices: Vec<SupplierChoice>,
}

impl FlowState for SupplierViewState {
    fn prompt(&self) -> Outcome {
        Outcome::SupplierList {
            choices: self.choices.clone(),
        }
    }
}

/// `Sup` lists suppliers; `Sup <n>` shows one directly.
pub fn start(selection: &str, ctx: &FlowContext<'_>) -> Transition {
    let catalog = match ctx.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Transition::idle(Outcome::rejected(e)),
    };
    let choices = SupplierChoice::all(&catalog);
    if choices.is_empty() {
        return Transition::idle(Outcome::rejected(ChatError::NoSuppliers));
    }

    let state = SupplierViewState { choices };
    if selection.trim().is_empty() {
        return Transition::prompt(state);
    }
    show(state, selection, ctx)
}

pub(crate) fn advance(state: SupplierViewState, text: &str, ctx: &FlowContext<'_>) -> Transition {
    match classify(text) {
        Input::Cancel | Input::Back => Transition::idle(Outcome::Cancelled),
        Input::Text(selection) => show(state, selection, ctx),
        Input::Yes | Input::No => Transition::reprompt(state, ChatError::InvalidSelection),
    }
}

fn show(state: SupplierViewState, selection: &str, ctx: &FlowContext<'_>) -> Transition {
    let Some(id) = SupplierChoice::pick(&state.choices, selection).map(|c| c.id) else {
        return Transition::reprompt(state, ChatError::InvalidSelection);
    };
    details(state, id, ctx)
}

fn details(state: SupplierViewState, id: SupplierId, ctx: &FlowContext<'_>) -> Transition {
    let catalog = match ctx.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Transition::reprompt(state, e),
    };
    match catalog.supplier(id) {
        Some(supplier) => Transition::idle(Outcome::SupplierDetails {
            supplier: supplier.clone(),
        }),
        None => Transition::reprompt(state, ChatError::InvalidSelection),
    }
}
