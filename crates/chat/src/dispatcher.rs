//! Message dispatcher.
//!
//! Routing precedence for one inbound message:
//!
//! ```text
//! pending flow?        → that flow's step engine
//! multi-item mode?     → buffer entry, or commit on `!`
//! empty / `!` / yes/no → rejected
//! keyword?             → command handler
//! otherwise            → implicit Low on the whole message
//! ```

use regex::RegexBuilder;

use shopkeep_infra::AuditStatus;
use shopkeep_inventory::{CatalogCommand, ReportStock, SetRequiredQuantity};

use crate::conversation::{Conversation, Mode};
use crate::flows::{
    self, FlowContext, Transition, edit, language, multi, new_item, preferences, supplier_add,
    supplier_view,
};
use crate::locale::{self, CanonicalCommand, Language};
use crate::outcome::{ChatError, ItemRow, Outcome};
use crate::parse::{self, ItemArgs};

/// Upper bound on compiled filter size; user patterns are untrusted.
const FILTER_SIZE_LIMIT: usize = 1 << 16;

/// Route one message and update the conversation. Never panics on user input.
pub fn dispatch(conversation: &mut Conversation, text: &str, ctx: &FlowContext<'_>) -> Outcome {
    let text = text.trim();
    let transition = match conversation.take_mode() {
        Mode::Flow(flow) => flows::advance(flow, text, ctx),
        Mode::Multi(buffer) => multi::advance(buffer, text, ctx),
        Mode::Idle => route(text, conversation.language, ctx),
    };

    if let Some(language) = transition.language {
        conversation.language = language;
    }
    conversation.set_mode(transition.mode);
    transition.outcome
}

fn route(text: &str, language: Language, ctx: &FlowContext<'_>) -> Transition {
    if text.is_empty() {
        return Transition::idle(Outcome::rejected(ChatError::EmptyMessage));
    }
    if locale::is_cancel(text) {
        return Transition::idle(Outcome::rejected(ChatError::ReservedToken(text.to_string())));
    }

    let (head, rest) = match text.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (text, ""),
    };

    if rest.is_empty() && locale::confirmation(head).is_some() {
        return Transition::idle(Outcome::rejected(ChatError::NoFlowActive(head.to_string())));
    }

    let Some(command) = locale::resolve(head, language) else {
        return low(text, false, ctx);
    };
    if rest.is_empty() && command.requires_argument() {
        return Transition::idle(Outcome::rejected(ChatError::ReservedToken(head.to_string())));
    }

    tracing::debug!(?command, "command resolved");
    match command {
        CanonicalCommand::Low => low(rest, true, ctx),
        CanonicalCommand::Need => need(rest, ctx),
        CanonicalCommand::Edit => edit::start(rest, ctx),
        CanonicalCommand::List => list(rest, false, ctx),
        CanonicalCommand::ListExt => list(rest, true, ctx),
        CanonicalCommand::Sup => supplier_view::start(rest, ctx),
        CanonicalCommand::Supa => supplier_add::start(),
        CanonicalCommand::Lang => language::start(false),
        CanonicalCommand::Pref => preferences::start(),
        CanonicalCommand::Help => help(rest, language),
        CanonicalCommand::Lows => multi::start(rest, ctx),
        CanonicalCommand::Back if rest.is_empty() => {
            Transition::idle(Outcome::rejected(ChatError::NoFlowActive(head.to_string())))
        }
        // Back takes no argument, so `Back Ribs 2` names an item.
        CanonicalCommand::Back => low(text, false, ctx),
    }
}

/// Report low stock; unknown items start the new-item flow.
fn low(args: &str, explicit: bool, ctx: &FlowContext<'_>) -> Transition {
    let ItemArgs { name, quantity } = match parse::item_with_optional_quantity(args) {
        Ok(parsed) => parsed,
        Err(e) => return Transition::idle(Outcome::rejected(e)),
    };
    if locale::is_cancel(&name) {
        return Transition::idle(Outcome::rejected(ChatError::ReservedToken(name)));
    }

    let catalog = match ctx.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Transition::idle(Outcome::rejected(e)),
    };
    let Some(item) = catalog.find_item(&name) else {
        return new_item::start(&name, quantity, explicit);
    };

    let command = CatalogCommand::ReportStock(ReportStock {
        name: item.name.clone(),
        quantity,
        reported_by: ctx.sender.clone(),
        occurred_at: ctx.now,
    });
    match ctx.commit(&[command]) {
        Ok(events) => {
            if let Some(record) = ctx.record_for(&catalog, &name, quantity, AuditStatus::LowStock) {
                ctx.audit(&[record]);
            }
            match flows::reported(&events, None) {
                Some(outcome) => Transition::idle(outcome),
                None => Transition::idle(Outcome::rejected(ChatError::UnknownItem(name))),
            }
        }
        Err(e) => Transition::idle(Outcome::rejected(e)),
    }
}

/// Set the required quantity of an existing item.
fn need(args: &str, ctx: &FlowContext<'_>) -> Transition {
    let ItemArgs { name, quantity } = match parse::item_with_required_quantity(args) {
        Ok(parsed) => parsed,
        Err(e) => return Transition::idle(Outcome::rejected(e)),
    };

    let catalog = match ctx.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Transition::idle(Outcome::rejected(e)),
    };
    let Some(item) = catalog.find_item(&name) else {
        return Transition::idle(Outcome::rejected(ChatError::UnknownItem(name)));
    };
    let (item_name, current) = (item.name.clone(), item.quantity);

    let command = CatalogCommand::SetRequiredQuantity(SetRequiredQuantity {
        name: item_name.clone(),
        required: quantity,
    });
    match ctx.commit(&[command]) {
        Ok(_) => {
            if let Some(record) = ctx.record_for(&catalog, &item_name, quantity, AuditStatus::Need) {
                ctx.audit(&[record]);
            }
            Transition::idle(Outcome::RequiredSet {
                item: item_name,
                required: quantity,
                quantity: current,
            })
        }
        Err(e) => Transition::idle(Outcome::rejected(e)),
    }
}

/// List items, optionally filtered by a case-insensitive pattern on supplier name.
fn list(filter: &str, extended: bool, ctx: &FlowContext<'_>) -> Transition {
    let pattern = if filter.is_empty() {
        None
    } else {
        match RegexBuilder::new(filter)
            .case_insensitive(true)
            .size_limit(FILTER_SIZE_LIMIT)
            .build()
        {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::debug!(error = %e, filter, "invalid list filter");
                return Transition::idle(Outcome::rejected(ChatError::InvalidFilter(
                    filter.to_string(),
                )));
            }
        }
    };

    let catalog = match ctx.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Transition::idle(Outcome::rejected(e)),
    };
    let rows = ItemRow::rows(&catalog)
        .filter(|row| match &pattern {
            None => true,
            Some(re) => row.supplier.as_deref().is_some_and(|s| re.is_match(s)),
        })
        .collect();

    Transition::idle(Outcome::ItemList {
        rows,
        extended,
        filter: pattern.map(|_| filter.to_string()),
    })
}

fn help(topic: &str, language: Language) -> Transition {
    if topic.is_empty() {
        return Transition::idle(Outcome::Help);
    }
    let first = topic.split_whitespace().next().unwrap_or(topic);
    match locale::resolve(first, language) {
        Some(command) => Transition::idle(Outcome::HelpTopic { command }),
        None => Transition::idle(Outcome::rejected(ChatError::UnknownCommand(topic.to_string()))),
    }
}
