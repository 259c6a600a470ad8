//! Edit flow: change supplier, change type, rename, or delete one item.

use shopkeep_inventory::{
    CatalogCommand, ChangeSupplier, ChangeType, DeleteItem, ItemType, RenameItem,
};

use super::{FlowContext, FlowState, Input, Transition, classify, classify_text};
use crate::outcome::{ChatError, Outcome, SupplierChoice};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditState {
    /// Stored name of the item being edited.
    pub item: String,
    pub step: EditStep,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditStep {
    Menu,
    ChooseSupplier { choices: Vec<SupplierChoice> },
    ChooseType { current: ItemType },
    /// Prep → Raw needs a supplier other than the prep supplier.
    ChooseRawSupplier { choices: Vec<SupplierChoice> },
    Rename,
    ConfirmDelete,
}

impl FlowState for EditState {
    fn prompt(&self) -> Outcome {
        let item = self.item.clone();
        match &self.step {
            EditStep::Menu => Outcome::EditMenu { item },
            EditStep::ChooseSupplier { choices } => Outcome::AskEditSupplier {
                item,
                choices: choices.clone(),
            },
            EditStep::ChooseType { current } => Outcome::AskEditType {
                item,
                current: *current,
            },
            EditStep::ChooseRawSupplier { choices } => Outcome::AskRawSupplier {
                item,
                choices: choices.clone(),
            },
            EditStep::Rename => Outcome::AskRename { item },
            EditStep::ConfirmDelete => Outcome::ConfirmDelete { item },
        }
    }
}

impl EditState {
    fn at(self, step: EditStep) -> Self {
        Self { step, ..self }
    }
}

pub fn start(name: &str, ctx: &FlowContext<'_>) -> Transition {
    let catalog = match ctx.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Transition::idle(Outcome::rejected(e)),
    };
    match catalog.find_item(name) {
        Some(item) => Transition::prompt(EditState {
            item: item.name.clone(),
            step: EditStep::Menu,
        }),
        None => Transition::idle(Outcome::rejected(ChatError::UnknownItem(name.trim().to_string()))),
    }
}

pub(crate) fn advance(state: EditState, text: &str, ctx: &FlowContext<'_>) -> Transition {
    let input = match state.step {
        EditStep::Rename => classify_text(text),
        _ => classify(text),
    };
    if input == Input::Cancel {
        return Transition::idle(Outcome::Cancelled);
    }

    match (state.step.clone(), input) {
        (EditStep::Menu, Input::Back) => Transition::idle(Outcome::Cancelled),
        (EditStep::Menu, Input::Text("1")) => choose_supplier(state, ctx),
        (EditStep::Menu, Input::Text("2")) => choose_type(state, ctx),
        (EditStep::Menu, Input::Text("3")) => Transition::prompt(state.at(EditStep::Rename)),
        (EditStep::Menu, Input::Text("4")) => Transition::prompt(state.at(EditStep::ConfirmDelete)),
        (EditStep::Menu, _) => Transition::reprompt(state, ChatError::InvalidSelection),

        (EditStep::ChooseSupplier { .. }, Input::Back) => Transition::prompt(state.at(EditStep::Menu)),
        (EditStep::ChooseSupplier { choices }, Input::Text(selection)) => {
            match SupplierChoice::pick(&choices, selection).cloned() {
                Some(choice) => change_supplier(state, choice, ctx),
                None => Transition::reprompt(state, ChatError::InvalidSelection),
            }
        }
        (EditStep::ChooseSupplier { .. }, _) => {
            Transition::reprompt(state, ChatError::InvalidSelection)
        }

        (EditStep::ChooseType { .. }, Input::Back) => Transition::prompt(state.at(EditStep::Menu)),
        (EditStep::ChooseType { .. }, Input::Text("1")) => to_raw(state, ctx),
        (EditStep::ChooseType { .. }, Input::Text("2")) => to_prep(state, ctx),
        (EditStep::ChooseType { .. }, _) => Transition::reprompt(state, ChatError::InvalidSelection),

        (EditStep::ChooseRawSupplier { .. }, Input::Back) => {
            Transition::prompt(state.at(EditStep::ChooseType {
                current: ItemType::Prep,
            }))
        }
        (EditStep::ChooseRawSupplier { choices }, Input::Text(selection)) => {
            match SupplierChoice::pick(&choices, selection).cloned() {
                Some(choice) => change_type(state, ItemType::Raw, Some(choice), ctx),
                None => Transition::reprompt(state, ChatError::InvalidSelection),
            }
        }
        (EditStep::ChooseRawSupplier { .. }, _) => {
            Transition::reprompt(state, ChatError::InvalidSelection)
        }

        (EditStep::Rename, Input::Back) => Transition::prompt(state.at(EditStep::Menu)),
        (EditStep::Rename, Input::Text(new_name)) if !new_name.is_empty() => {
            let new_name = new_name.to_string();
            rename(state, new_name, ctx)
        }
        (EditStep::Rename, _) => Transition::reprompt(state, ChatError::EmptyText),

        (EditStep::ConfirmDelete, Input::Yes) => delete(state, ctx),
        (EditStep::ConfirmDelete, Input::No) => Transition::idle(Outcome::Cancelled),
        (EditStep::ConfirmDelete, Input::Back) => Transition::prompt(state.at(EditStep::Menu)),
        (EditStep::ConfirmDelete, _) => Transition::reprompt(state, ChatError::InvalidSelection),
    }
}

fn choose_supplier(state: EditState, ctx: &FlowContext<'_>) -> Transition {
    let catalog = match ctx.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Transition::reprompt(state, e),
    };
    let choices = SupplierChoice::all(&catalog);
    if choices.is_empty() {
        return Transition::reprompt(state, ChatError::NoSuppliers);
    }
    Transition::prompt(state.at(EditStep::ChooseSupplier { choices }))
}

fn choose_type(state: EditState, ctx: &FlowContext<'_>) -> Transition {
    let catalog = match ctx.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Transition::reprompt(state, e),
    };
    match catalog.find_item(&state.item) {
        Some(item) => {
            let current = item.item_type;
            Transition::prompt(state.at(EditStep::ChooseType { current }))
        }
        None => Transition::idle(Outcome::rejected(ChatError::UnknownItem(state.item))),
    }
}

/// Raw keeps the current supplier; Prep → Raw asks for a non-prep supplier.
fn to_raw(state: EditState, ctx: &FlowContext<'_>) -> Transition {
    let catalog = match ctx.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Transition::reprompt(state, e),
    };
    let Some(item) = catalog.find_item(&state.item) else {
        return Transition::idle(Outcome::rejected(ChatError::UnknownItem(state.item)));
    };

    if item.item_type == ItemType::Raw {
        let current = item
            .supplier_id
            .and_then(|id| catalog.supplier(id))
            .map(SupplierChoice::from_supplier);
        return change_type(state, ItemType::Raw, current, ctx);
    }

    let prep_id = catalog.prep_supplier().map(|s| s.id);
    let choices: Vec<SupplierChoice> = catalog
        .suppliers()
        .iter()
        .filter(|s| Some(s.id) != prep_id)
        .map(SupplierChoice::from_supplier)
        .collect();
    if choices.is_empty() {
        return Transition::reprompt(state, ChatError::NoOtherSupplier);
    }
    Transition::prompt(state.at(EditStep::ChooseRawSupplier { choices }))
}

fn to_prep(state: EditState, ctx: &FlowContext<'_>) -> Transition {
    let catalog = match ctx.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Transition::reprompt(state, e),
    };
    let prep = catalog.prep_supplier().map(SupplierChoice::from_supplier);
    change_type(state, ItemType::Prep, prep, ctx)
}

fn change_supplier(state: EditState, choice: SupplierChoice, ctx: &FlowContext<'_>) -> Transition {
    let command = CatalogCommand::ChangeSupplier(ChangeSupplier {
        name: state.item.clone(),
        supplier_id: choice.id,
    });
    match ctx.commit(&[command]) {
        Ok(_) => Transition::idle(Outcome::SupplierChanged {
            item: state.item,
            supplier: choice.company_name,
        }),
        Err(e) => Transition::commit_failed(state, e),
    }
}

fn change_type(
    state: EditState,
    item_type: ItemType,
    supplier: Option<SupplierChoice>,
    ctx: &FlowContext<'_>,
) -> Transition {
    let command = CatalogCommand::ChangeType(ChangeType {
        name: state.item.clone(),
        item_type,
        supplier_id: supplier.as_ref().map(|s| s.id),
    });
    match ctx.commit(&[command]) {
        Ok(_) => Transition::idle(Outcome::TypeChanged {
            item: state.item,
            item_type,
            supplier: supplier.map(|s| s.company_name),
        }),
        Err(e) => Transition::commit_failed(state, e),
    }
}

fn rename(state: EditState, new_name: String, ctx: &FlowContext<'_>) -> Transition {
    let command = CatalogCommand::RenameItem(RenameItem {
        name: state.item.clone(),
        new_name: new_name.clone(),
    });
    match ctx.commit(&[command]) {
        Ok(_) => Transition::idle(Outcome::ItemRenamed {
            from: state.item,
            to: new_name,
        }),
        Err(e) => Transition::commit_failed(state, e),
    }
}

fn delete(state: EditState, ctx: &FlowContext<'_>) -> Transition {
    let command = CatalogCommand::DeleteItem(DeleteItem {
        name: state.item.clone(),
    });
    match ctx.commit(&[command]) {
        Ok(_) => Transition::idle(Outcome::ItemDeleted { item: state.item }),
        Err(e) => Transition::commit_failed(state, e),
    }
}
