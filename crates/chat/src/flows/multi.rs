//! Multi-item mode: buffer `<item> [qty]` lines, commit them together on `!`.
//!
//! Only existing items are accepted into the buffer. The commit is a single
//! registry batch, so either every buffered report lands or none does.

use shopkeep_core::display_name;
use shopkeep_infra::AuditStatus;
use shopkeep_inventory::{CatalogCommand, ReportStock};

use super::{FlowContext, Transition};
use crate::conversation::{BufferedEntry, MultiBuffer};
use crate::locale;
use crate::outcome::{ChatError, Outcome};
use crate::parse::{self, ItemArgs};

/// Enter multi-item mode, optionally buffering a first entry.
pub fn start(args: &str, ctx: &FlowContext<'_>) -> Transition {
    let mut buffer = MultiBuffer::new();
    if args.trim().is_empty() {
        return Transition::multi(buffer, Outcome::MultiStarted { first: None });
    }
    match add_entry(&mut buffer, args, ctx) {
        Ok(entry) => Transition::multi(buffer, Outcome::MultiStarted { first: Some(entry) }),
        Err(e) => Transition::multi(
            buffer,
            Outcome::rejected_with_prompt(e, Outcome::MultiStarted { first: None }),
        ),
    }
}

pub fn advance(mut buffer: MultiBuffer, text: &str, ctx: &FlowContext<'_>) -> Transition {
    if locale::is_cancel(text) {
        return commit(buffer, ctx);
    }
    if text.trim().is_empty() {
        return Transition::multi(buffer, Outcome::rejected(ChatError::EmptyMessage));
    }
    match add_entry(&mut buffer, text, ctx) {
        Ok(entry) => {
            let pending = buffer.len();
            Transition::multi(buffer, Outcome::MultiAdded { entry, pending })
        }
        Err(e) => Transition::multi(buffer, Outcome::rejected(e)),
    }
}

fn add_entry(
    buffer: &mut MultiBuffer,
    args: &str,
    ctx: &FlowContext<'_>,
) -> Result<BufferedEntry, ChatError> {
    let ItemArgs { name, quantity } = parse::item_with_optional_quantity(args)?;
    let catalog = ctx.snapshot()?;
    let item = catalog
        .find_item(&name)
        .ok_or_else(|| ChatError::UnknownItem(display_name(&name)))?;
    Ok(buffer.add(&item.name, quantity))
}

fn commit(buffer: MultiBuffer, ctx: &FlowContext<'_>) -> Transition {
    if buffer.is_empty() {
        return Transition::idle(Outcome::MultiEmpty);
    }

    let catalog = match ctx.snapshot() {
        Ok(catalog) => catalog,
        Err(e) => return Transition::multi(buffer, Outcome::rejected(e)),
    };
    let commands: Vec<CatalogCommand> = buffer
        .entries()
        .iter()
        .map(|entry| {
            CatalogCommand::ReportStock(ReportStock {
                name: entry.item.clone(),
                quantity: entry.quantity,
                reported_by: ctx.sender.clone(),
                occurred_at: ctx.now,
            })
        })
        .collect();

    match ctx.commit(&commands) {
        Ok(_) => {
            let records: Vec<_> = buffer
                .entries()
                .iter()
                .filter_map(|e| ctx.record_for(&catalog, &e.item, e.quantity, AuditStatus::LowStock))
                .collect();
            ctx.audit(&records);
            Transition::idle(Outcome::MultiCommitted {
                entries: buffer.entries().to_vec(),
            })
        }
        // Keep the buffer so `!` can be retried.
        Err(ChatError::PersistenceFailed) => {
            Transition::multi(buffer, Outcome::rejected(ChatError::PersistenceFailed))
        }
        Err(e) => Transition::idle(Outcome::rejected(e)),
    }
}
