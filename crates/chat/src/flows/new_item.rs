//! New-item flow: confirm → type → supplier → create.
//!
//! An implicit Low (bare item name) asks for confirmation first; an explicit
//! `Low <item>` skips straight to the type question.

use shopkeep_core::display_name;
use shopkeep_infra::{AuditRecord, AuditStatus};
use shopkeep_inventory::{CatalogCommand, CreateItem, ItemType};

use super::{FlowContext, FlowState, Input, Transition, classify, reported};
use crate::outcome::{ChatError, Outcome, SupplierChoice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItemState {
    /// Display-normalized item name.
    pub item: String,
    pub quantity: u32,
    /// Started by an explicit `Low`; there is no confirmation step to go back to.
    pub explicit: bool,
    pub step: NewItemStep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewItemStep {
    AskConfirm,
    AskType,
    AskSupplier { choices: Vec<SupplierChoice> },
}

impl FlowState for NewItemState {
    fn prompt(&self) -> Outcome {
        match &self.step {
            NewItemStep::AskConfirm => Outcome::ConfirmNewItem {
                item: self.item.clone(),
                quantity: self.quantity,
            },
            NewItemStep::AskType => Outcome::AskItemType {
                item: self.item.clone(),
            },
            NewItemStep::AskSupplier { choices } => Outcome::AskSupplier {
                item: self.item.clone(),
                choices: choices.clone(),
            },
        }
    }
}

pub fn start(name: &str, quantity: u32, explicit: bool) -> Transition {
    let step = if explicit {
        NewItemStep::AskType
    } else {
        NewItemStep::AskConfirm
    };
    Transition::prompt(NewItemState {
        item: display_name(name),
        quantity,
        explicit,
        step,
    })
}

pub(crate) fn advance(state: NewItemState, text: &str, ctx: &FlowContext<'_>) -> Transition {
    let input = classify(text);
    if input == Input::Cancel {
        return Transition::idle(Outcome::Cancelled);
    }

    match (state.step.clone(), input) {
        (NewItemStep::AskConfirm, Input::Yes) => Transition::prompt(NewItemState {
            step: NewItemStep::AskType,
            ..state
        }),
        (NewItemStep::AskConfirm, Input::No | Input::Back) => Transition::idle(Outcome::Cancelled),
        (NewItemStep::AskConfirm, _) => Transition::reprompt(state, ChatError::InvalidSelection),

        (NewItemStep::AskType, Input::Back) if state.explicit => Transition::idle(Outcome::Cancelled),
        (NewItemStep::AskType, Input::Back) => Transition::prompt(NewItemState {
            step: NewItemStep::AskConfirm,
            ..state
        }),
        (NewItemStep::AskType, Input::Text("1")) => choose_raw(state, ctx),
        (NewItemStep::AskType, Input::Text("2")) => create_prep(state, ctx),
        (NewItemStep::AskType, _) => Transition::reprompt(state, ChatError::InvalidSelection),

        (NewItemStep::AskSupplier { .. }, Input::Back) => Transition::prompt(NewItemState {
            step: NewItemStep::AskType,
            ..state
        }),
        (NewItemStep::AskSupplier { choices }, Input::Text(selection)) => {
            match SupplierChoice::pick(&choices, selection) {
                Some(choice) => {
                    let choice = choice.clone();
                    create(state, ItemType::Raw, Some(choice), ctx)
                }
                None => Transition::reprompt(state, ChatError::InvalidSelection),
            }
        }
        (NewItemStep::AskSupplier { .. }, _) => {
            Transition::reprompt(state, ChatError::InvalidSelection)
        }
    }
}

fn choose_raw(state: NewItemState, ctx: &FlowContext<'_>) -> Transition {
    let catalog = match ctx.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Transition::reprompt(state, e),
    };
    let choices = SupplierChoice::all(&catalog);
    if choices.is_empty() {
        return create(state, ItemType::Raw, None, ctx);
    }
    Transition::prompt(NewItemState {
        step: NewItemStep::AskSupplier { choices },
        ..state
    })
}

fn create_prep(state: NewItemState, ctx: &FlowContext<'_>) -> Transition {
    let catalog = match ctx.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Transition::reprompt(state, e),
    };
    let prep = catalog.prep_supplier().map(SupplierChoice::from_supplier);
    create(state, ItemType::Prep, prep, ctx)
}

fn create(
    state: NewItemState,
    item_type: ItemType,
    supplier: Option<SupplierChoice>,
    ctx: &FlowContext<'_>,
) -> Transition {
    let command = CatalogCommand::CreateItem(CreateItem {
        name: state.item.clone(),
        item_type,
        supplier_id: supplier.as_ref().map(|s| s.id),
        quantity: state.quantity,
        reported_by: ctx.sender.clone(),
        occurred_at: ctx.now,
    });
    let supplier_name = supplier.map(|s| s.company_name);

    match ctx.commit(&[command]) {
        Ok(events) => {
            ctx.audit(&[AuditRecord::new(
                ctx.now,
                state.item.clone(),
                state.quantity,
                AuditStatus::LowStock,
                item_type,
                ctx.sender.clone(),
                supplier_name.clone(),
            )]);
            match reported(&events, supplier_name) {
                Some(outcome) => Transition::idle(outcome),
                None => Transition::idle(Outcome::Cancelled),
            }
        }
        Err(e) => Transition::commit_failed(state, e),
    }
}
