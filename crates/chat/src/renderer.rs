//! Outcome → reply text, in English or Hebrew.
//!
//! Pure function of its inputs. Item and supplier names are shown exactly as
//! stored; only the surrounding text is localized.

use std::fmt::Write as _;

use shopkeep_inventory::ItemType;

use crate::locale::{self, CanonicalCommand, Language};
use crate::outcome::{ChatError, ItemRow, Outcome, SupplierChoice};

pub fn render(outcome: &Outcome, language: Language) -> String {
    match language {
        Language::En => english(outcome),
        Language::He => hebrew(outcome),
    }
}

fn numbered(choices: &[SupplierChoice]) -> String {
    choices
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, c.company_name))
        .collect::<Vec<_>>()
        .join("\n")
}

fn type_label(item_type: ItemType, language: Language) -> &'static str {
    match (item_type, language) {
        (ItemType::Raw, Language::En) => "Raw",
        (ItemType::Prep, Language::En) => "Prep",
        (ItemType::Raw, Language::He) => "גלם",
        (ItemType::Prep, Language::He) => "הכנה",
    }
}

fn row_line(row: &ItemRow, extended: bool, language: Language) -> String {
    let required = row
        .required
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut line = format!(
        "• {} | {}/{} | {} | {}",
        row.name,
        row.quantity,
        required,
        type_label(row.item_type, language),
        row.supplier.as_deref().unwrap_or("-"),
    );
    if extended {
        let when = row
            .last_reported_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = write!(
            line,
            " | {} | {}",
            when,
            row.last_reported_by.as_deref().unwrap_or("-")
        );
    }
    line
}

fn rows_block(rows: &[ItemRow], extended: bool, language: Language) -> String {
    rows.iter()
        .map(|r| row_line(r, extended, language))
        .collect::<Vec<_>>()
        .join("\n")
}

fn command_usage(command: CanonicalCommand, language: Language) -> String {
    let (full, short) = locale::keywords(command, language);
    let args = match (command, language) {
        (CanonicalCommand::Low, Language::En) => " <item> [qty]",
        (CanonicalCommand::Low, Language::He) => " <פריט> [כמות]",
        (CanonicalCommand::Need, Language::En) => " <item> <qty>",
        (CanonicalCommand::Need, Language::He) => " <פריט> <כמות>",
        (CanonicalCommand::Edit, Language::En) => " <item>",
        (CanonicalCommand::Edit, Language::He) => " <פריט>",
        (CanonicalCommand::List | CanonicalCommand::ListExt, Language::En) => " [supplier]",
        (CanonicalCommand::List | CanonicalCommand::ListExt, Language::He) => " [ספק]",
        (CanonicalCommand::Lows, Language::En) => " [item qty]",
        (CanonicalCommand::Lows, Language::He) => " [פריט כמות]",
        (CanonicalCommand::Sup, Language::En) => " [n]",
        (CanonicalCommand::Sup, Language::He) => " [מס׳]",
        (CanonicalCommand::Help, Language::En) => " [command]",
        (CanonicalCommand::Help, Language::He) => " [פקודה]",
        _ => "",
    };
    match short {
        Some(short) => format!("{full}{args} ({short})"),
        None => format!("{full}{args}"),
    }
}

fn command_summary(command: CanonicalCommand, language: Language) -> &'static str {
    use CanonicalCommand as C;
    match language {
        Language::En => match command {
            C::Low => "report low stock (a bare item name works too)",
            C::Lows => "report several items, finish with !",
            C::Need => "set the required quantity",
            C::List => "list items, optionally by supplier",
            C::ListExt => "list items with last report date and reporter",
            C::Edit => "change supplier or type, rename, delete",
            C::Sup => "show suppliers",
            C::Supa => "add a supplier",
            C::Lang => "change language",
            C::Pref => "preferences",
            C::Back => "go back one step",
            C::Help => "this message",
        },
        Language::He => match command {
            C::Low => "דיווח מלאי חסר (אפשר גם לשלוח רק שם פריט)",
            C::Lows => "דיווח על כמה פריטים, לסיום שלחו !",
            C::Need => "קביעת כמות נדרשת",
            C::List => "רשימת פריטים, אפשר לסנן לפי ספק",
            C::ListExt => "רשימה עם תאריך ומדווח אחרון",
            C::Edit => "שינוי ספק או סוג, שינוי שם, מחיקה",
            C::Sup => "הצגת ספקים",
            C::Supa => "הוספת ספק",
            C::Lang => "החלפת שפה",
            C::Pref => "העדפות",
            C::Back => "חזרה שלב אחד אחורה",
            C::Help => "הודעה זו",
        },
    }
}

fn command_example(command: CanonicalCommand, language: Language) -> Option<String> {
    let (full, _) = locale::keywords(command, language);
    let args = match (command, language) {
        (CanonicalCommand::Low, Language::En) => "Milk 3",
        (CanonicalCommand::Low, Language::He) => "חלב 3",
        (CanonicalCommand::Need, Language::En) => "Beans 10",
        (CanonicalCommand::Need, Language::He) => "שעועית 10",
        (CanonicalCommand::Edit, Language::En) => "Milk",
        (CanonicalCommand::Edit, Language::He) => "חלב",
        (CanonicalCommand::List | CanonicalCommand::ListExt, _) => "acme|dairy",
        (CanonicalCommand::Lows, Language::En) => "Milk 2",
        (CanonicalCommand::Lows, Language::He) => "חלב 2",
        (CanonicalCommand::Sup, _) => "1",
        (CanonicalCommand::Help, Language::En) => "Low",
        (CanonicalCommand::Help, Language::He) => "פריט",
        _ => return None,
    };
    Some(format!("{full} {args}"))
}

fn help_text(language: Language) -> String {
    let mut out = match language {
        Language::En => "📖 Commands:".to_string(),
        Language::He => "📖 פקודות:".to_string(),
    };
    for command in CanonicalCommand::HELP_ORDER {
        let _ = write!(
            out,
            "\n• {}: {}",
            command_usage(command, language),
            command_summary(command, language)
        );
    }
    out.push_str(match language {
        Language::En => "\nInside a flow: ! cancels, Back goes one step back.",
        Language::He => "\nבתוך תהליך: ! מבטל, חזור חוזר שלב אחד אחורה.",
    });
    out
}

fn help_topic(command: CanonicalCommand, language: Language) -> String {
    let mut out = match language {
        Language::En => format!(
            "📖 {}\nUsage: {}",
            command_summary(command, language),
            command_usage(command, language)
        ),
        Language::He => format!(
            "📖 {}\nשימוש: {}",
            command_summary(command, language),
            command_usage(command, language)
        ),
    };
    if let Some(example) = command_example(command, language) {
        let _ = match language {
            Language::En => write!(out, "\nExample: {example}"),
            Language::He => write!(out, "\nדוגמה: {example}"),
        };
    }
    out
}

fn english(outcome: &Outcome) -> String {
    const HINT: &str = "(Back = previous step, ! = cancel)";
    let lang = Language::En;
    match outcome {
        Outcome::StockReported {
            item,
            quantity,
            total,
        } => format!("✅ Reported {quantity} × {item} (total {total})."),
        Outcome::ItemCreated {
            item,
            item_type,
            quantity,
            supplier,
        } => match supplier {
            Some(s) => format!(
                "✅ Added {item} ({}, {s}) with quantity {quantity}.",
                type_label(*item_type, lang)
            ),
            None => format!(
                "✅ Added {item} ({}) with quantity {quantity}.",
                type_label(*item_type, lang)
            ),
        },
        Outcome::RequiredSet {
            item,
            required,
            quantity,
        } => format!("✅ Required quantity for {item} set to {required} (current {quantity})."),

        Outcome::ConfirmNewItem { item, quantity } => {
            format!("❓ {item} is not in the list. Add it with quantity {quantity}? (yes / no)")
        }
        Outcome::AskItemType { item } => {
            format!("What type is {item}?\n1. Raw\n2. Prep\n{HINT}")
        }
        Outcome::AskSupplier { item, choices } => {
            format!("Which supplier provides {item}?\n{}\n{HINT}", numbered(choices))
        }

        Outcome::MultiStarted { first } => {
            let mut out = "📝 Multi-item mode. Send one item per message (e.g. Milk 2), then ! to finish.".to_string();
            if let Some(entry) = first {
                let _ = write!(out, "\nAdded {} × {}.", entry.quantity, entry.item);
            }
            out
        }
        Outcome::MultiAdded { entry, pending } => format!(
            "📝 {} × {} ({pending} pending). Send ! to finish.",
            entry.quantity, entry.item
        ),
        Outcome::MultiCommitted { entries } => {
            let mut out = format!("✅ Reported {} item(s):", entries.len());
            for entry in entries {
                let _ = write!(out, "\n• {} × {}", entry.quantity, entry.item);
            }
            out
        }
        Outcome::MultiEmpty => "Multi-item mode ended. Nothing was reported.".to_string(),

        Outcome::EditMenu { item } => format!(
            "✏️ Editing {item}:\n1. Change supplier\n2. Change type\n3. Rename\n4. Delete\n{HINT}"
        ),
        Outcome::AskEditSupplier { item, choices } => {
            format!("Choose a new supplier for {item}:\n{}\n{HINT}", numbered(choices))
        }
        Outcome::AskEditType { item, current } => format!(
            "{item} is currently {}. Choose a type:\n1. Raw\n2. Prep\n{HINT}",
            type_label(*current, lang)
        ),
        Outcome::AskRawSupplier { item, choices } => format!(
            "Which supplier provides {item} as a raw item?\n{}\n{HINT}",
            numbered(choices)
        ),
        Outcome::AskRename { item } => format!("Send the new name for {item}.\n{HINT}"),
        Outcome::ConfirmDelete { item } => format!("🗑️ Delete {item}? (yes / no)"),
        Outcome::SupplierChanged { item, supplier } => {
            format!("✅ {item} is now supplied by {supplier}.")
        }
        Outcome::TypeChanged {
            item,
            item_type,
            supplier,
        } => match supplier {
            Some(s) => format!("✅ {item} is now {} ({s}).", type_label(*item_type, lang)),
            None => format!("✅ {item} is now {}.", type_label(*item_type, lang)),
        },
        Outcome::ItemRenamed { from, to } => format!("✅ Renamed {from} to {to}."),
        Outcome::ItemDeleted { item } => format!("✅ Deleted {item}."),

        Outcome::LanguageMenu => format!("🌐 Choose a language:\n1. English\n2. עברית\n{HINT}"),
        Outcome::LanguageSet { language } => match language {
            Language::En => "✅ Language set to English.".to_string(),
            Language::He => "✅ השפה שונתה לעברית.".to_string(),
        },
        Outcome::PreferencesMenu => {
            format!("⚙️ Preferences:\n1. Language\n2. Default prep supplier\n{HINT}")
        }
        Outcome::AskPrepSupplier { choices } => {
            format!("Choose the default prep supplier:\n{}\n{HINT}", numbered(choices))
        }
        Outcome::PrepSupplierSet {
            supplier,
            repointed,
        } => format!("✅ {supplier} is now the prep supplier ({repointed} prep item(s) updated)."),

        Outcome::SupplierList { choices } => format!(
            "🏢 Suppliers:\n{}\nSend a number for details.\n{HINT}",
            numbered(choices)
        ),
        Outcome::SupplierDetails { supplier } => {
            let mut out = format!(
                "🏢 {}\nContact: {}\nPhone: {}",
                supplier.company_name, supplier.contact_name, supplier.contact_number
            );
            if let Some(link) = supplier.chat_link() {
                let _ = write!(out, "\n{link}");
            }
            out
        }
        Outcome::AskCompanyName => format!("🏢 New supplier. Company name?\n{HINT}"),
        Outcome::AskContactName { company } => format!("Contact name at {company}?\n{HINT}"),
        Outcome::AskContactNumber { company, contact } => {
            format!("Phone number for {contact} ({company})?\n{HINT}")
        }
        Outcome::SupplierAdded { supplier } => format!(
            "✅ Added supplier #{} {} ({}, {}).",
            supplier.id, supplier.company_name, supplier.contact_name, supplier.contact_number
        ),

        Outcome::ItemList {
            rows,
            extended,
            filter,
        } => match (rows.is_empty(), filter) {
            (true, None) => "📋 No items yet.".to_string(),
            (true, Some(f)) => format!("📋 No items match supplier \"{f}\"."),
            (false, None) => format!("📋 Items ({}):\n{}", rows.len(), rows_block(rows, *extended, lang)),
            (false, Some(f)) => format!(
                "📋 Items for supplier \"{f}\" ({}):\n{}",
                rows.len(),
                rows_block(rows, *extended, lang)
            ),
        },
        Outcome::Help => help_text(lang),
        Outcome::HelpTopic { command } => help_topic(*command, lang),

        Outcome::Cancelled => "❌ Cancelled.".to_string(),
        Outcome::Rejected { error, prompt } => with_prompt(english_error(error), prompt, lang),
    }
}

fn english_error(error: &ChatError) -> String {
    match error {
        ChatError::UnknownItem(name) => {
            format!("❌ \"{name}\" is not in the list. Send Low {name} to add it.")
        }
        ChatError::InvalidQuantity(raw) if raw.is_empty() => {
            "❌ Invalid quantity. Example: Need Beans 10".to_string()
        }
        ChatError::InvalidQuantity(raw) => format!("❌ \"{raw}\" is not a valid quantity."),
        ChatError::DuplicateName(name) => format!("❌ An item named \"{name}\" already exists."),
        ChatError::InvalidSelection => "❌ Invalid choice.".to_string(),
        ChatError::ReservedToken(token) => {
            format!("❌ \"{token}\" can't be used on its own. Send Help for usage.")
        }
        ChatError::NoFlowActive(token) => format!("❌ Nothing to answer \"{token}\" to right now."),
        ChatError::EmptyMessage => "❌ Empty message. Send Help for the list of commands.".to_string(),
        ChatError::EmptyText => "❌ This can't be empty.".to_string(),
        ChatError::InvalidFilter(pattern) => format!("❌ \"{pattern}\" is not a valid filter."),
        ChatError::UnknownCommand(command) => {
            format!("❌ Unknown command \"{command}\". Send Help for the list.")
        }
        ChatError::NoSuppliers => "❌ No suppliers yet. Add one with Supa.".to_string(),
        ChatError::NoOtherSupplier => {
            "❌ No supplier other than the prep supplier. Add one with Supa.".to_string()
        }
        ChatError::PersistenceFailed => {
            "⚠️ Couldn't save. Nothing was changed; please try again.".to_string()
        }
    }
}

fn hebrew(outcome: &Outcome) -> String {
    const HINT: &str = "(חזור = שלב קודם, ! = ביטול)";
    let lang = Language::He;
    match outcome {
        Outcome::StockReported {
            item,
            quantity,
            total,
        } => format!("✅ דווח {quantity} × {item} (סה״כ {total})."),
        Outcome::ItemCreated {
            item,
            item_type,
            quantity,
            supplier,
        } => match supplier {
            Some(s) => format!(
                "✅ נוסף {item} ({}, {s}) בכמות {quantity}.",
                type_label(*item_type, lang)
            ),
            None => format!(
                "✅ נוסף {item} ({}) בכמות {quantity}.",
                type_label(*item_type, lang)
            ),
        },
        Outcome::RequiredSet {
            item,
            required,
            quantity,
        } => format!("✅ הכמות הנדרשת של {item} נקבעה ל-{required} (כרגע {quantity})."),

        Outcome::ConfirmNewItem { item, quantity } => {
            format!("❓ {item} לא ברשימה. להוסיף בכמות {quantity}? (כן / לא)")
        }
        Outcome::AskItemType { item } => {
            format!("מה הסוג של {item}?\n1. גלם\n2. הכנה\n{HINT}")
        }
        Outcome::AskSupplier { item, choices } => {
            format!("איזה ספק מספק את {item}?\n{}\n{HINT}", numbered(choices))
        }

        Outcome::MultiStarted { first } => {
            let mut out = "📝 מצב ריבוי פריטים. שלחו פריט אחד בכל הודעה (למשל חלב 2), ובסיום !.".to_string();
            if let Some(entry) = first {
                let _ = write!(out, "\nנוסף {} × {}.", entry.quantity, entry.item);
            }
            out
        }
        Outcome::MultiAdded { entry, pending } => format!(
            "📝 {} × {} ({pending} ממתינים). לסיום שלחו !.",
            entry.quantity, entry.item
        ),
        Outcome::MultiCommitted { entries } => {
            let mut out = format!("✅ דווחו {} פריטים:", entries.len());
            for entry in entries {
                let _ = write!(out, "\n• {} × {}", entry.quantity, entry.item);
            }
            out
        }
        Outcome::MultiEmpty => "מצב ריבוי פריטים הסתיים. לא דווח דבר.".to_string(),

        Outcome::EditMenu { item } => format!(
            "✏️ עריכת {item}:\n1. שינוי ספק\n2. שינוי סוג\n3. שינוי שם\n4. מחיקה\n{HINT}"
        ),
        Outcome::AskEditSupplier { item, choices } => {
            format!("בחרו ספק חדש עבור {item}:\n{}\n{HINT}", numbered(choices))
        }
        Outcome::AskEditType { item, current } => format!(
            "{item} כרגע מסוג {}. בחרו סוג:\n1. גלם\n2. הכנה\n{HINT}",
            type_label(*current, lang)
        ),
        Outcome::AskRawSupplier { item, choices } => format!(
            "איזה ספק מספק את {item} כחומר גלם?\n{}\n{HINT}",
            numbered(choices)
        ),
        Outcome::AskRename { item } => format!("שלחו את השם החדש עבור {item}.\n{HINT}"),
        Outcome::ConfirmDelete { item } => format!("🗑️ למחוק את {item}? (כן / לא)"),
        Outcome::SupplierChanged { item, supplier } => {
            format!("✅ הספק של {item} הוא עכשיו {supplier}.")
        }
        Outcome::TypeChanged {
            item,
            item_type,
            supplier,
        } => match supplier {
            Some(s) => format!("✅ {item} עכשיו מסוג {} ({s}).", type_label(*item_type, lang)),
            None => format!("✅ {item} עכשיו מסוג {}.", type_label(*item_type, lang)),
        },
        Outcome::ItemRenamed { from, to } => format!("✅ השם שונה מ-{from} ל-{to}."),
        Outcome::ItemDeleted { item } => format!("✅ {item} נמחק."),

        Outcome::LanguageMenu => format!("🌐 בחרו שפה:\n1. English\n2. עברית\n{HINT}"),
        Outcome::LanguageSet { language } => match language {
            Language::En => "✅ Language set to English.".to_string(),
            Language::He => "✅ השפה שונתה לעברית.".to_string(),
        },
        Outcome::PreferencesMenu => format!("⚙️ העדפות:\n1. שפה\n2. ספק הכנות ברירת מחדל\n{HINT}"),
        Outcome::AskPrepSupplier { choices } => {
            format!("בחרו ספק הכנות ברירת מחדל:\n{}\n{HINT}", numbered(choices))
        }
        Outcome::PrepSupplierSet {
            supplier,
            repointed,
        } => format!("✅ {supplier} הוא עכשיו ספק ההכנות ({repointed} פריטי הכנה עודכנו)."),

        Outcome::SupplierList { choices } => format!(
            "🏢 ספקים:\n{}\nשלחו מספר לפרטים.\n{HINT}",
            numbered(choices)
        ),
        Outcome::SupplierDetails { supplier } => {
            let mut out = format!(
                "🏢 {}\nאיש קשר: {}\nטלפון: {}",
                supplier.company_name, supplier.contact_name, supplier.contact_number
            );
            if let Some(link) = supplier.chat_link() {
                let _ = write!(out, "\n{link}");
            }
            out
        }
        Outcome::AskCompanyName => format!("🏢 ספק חדש. שם החברה?\n{HINT}"),
        Outcome::AskContactName { company } => format!("שם איש הקשר ב-{company}?\n{HINT}"),
        Outcome::AskContactNumber { company, contact } => {
            format!("מספר הטלפון של {contact} ({company})?\n{HINT}")
        }
        Outcome::SupplierAdded { supplier } => format!(
            "✅ נוסף ספק #{} {} ({}, {}).",
            supplier.id, supplier.company_name, supplier.contact_name, supplier.contact_number
        ),

        Outcome::ItemList {
            rows,
            extended,
            filter,
        } => match (rows.is_empty(), filter) {
            (true, None) => "📋 אין עדיין פריטים.".to_string(),
            (true, Some(f)) => format!("📋 אין פריטים לספק \"{f}\"."),
            (false, None) => format!("📋 פריטים ({}):\n{}", rows.len(), rows_block(rows, *extended, lang)),
            (false, Some(f)) => format!(
                "📋 פריטים לספק \"{f}\" ({}):\n{}",
                rows.len(),
                rows_block(rows, *extended, lang)
            ),
        },
        Outcome::Help => help_text(lang),
        Outcome::HelpTopic { command } => help_topic(*command, lang),

        Outcome::Cancelled => "❌ בוטל.".to_string(),
        Outcome::Rejected { error, prompt } => with_prompt(hebrew_error(error), prompt, lang),
    }
}

fn hebrew_error(error: &ChatError) -> String {
    match error {
        ChatError::UnknownItem(name) => {
            format!("❌ \"{name}\" לא ברשימה. שלחו פריט {name} כדי להוסיף.")
        }
        ChatError::InvalidQuantity(raw) if raw.is_empty() => {
            "❌ כמות לא תקינה. דוגמה: צריך שעועית 10".to_string()
        }
        ChatError::InvalidQuantity(raw) => format!("❌ \"{raw}\" אינה כמות תקינה."),
        ChatError::DuplicateName(name) => format!("❌ כבר קיים פריט בשם \"{name}\"."),
        ChatError::InvalidSelection => "❌ בחירה לא תקינה.".to_string(),
        ChatError::ReservedToken(token) => {
            format!("❌ אי אפשר להשתמש ב-\"{token}\" לבד. שלחו עזרה להסבר.")
        }
        ChatError::NoFlowActive(token) => format!("❌ אין כרגע שאלה פתוחה עבור \"{token}\"."),
        ChatError::EmptyMessage => "❌ הודעה ריקה. שלחו עזרה לרשימת הפקודות.".to_string(),
        ChatError::EmptyText => "❌ הערך לא יכול להיות ריק.".to_string(),
        ChatError::InvalidFilter(pattern) => format!("❌ \"{pattern}\" אינו סינון תקין."),
        ChatError::UnknownCommand(command) => {
            format!("❌ פקודה לא מוכרת \"{command}\". שלחו עזרה לרשימה.")
        }
        ChatError::NoSuppliers => "❌ אין עדיין ספקים. הוסיפו ספק עם ספקחדש.".to_string(),
        ChatError::NoOtherSupplier => {
            "❌ אין ספק מלבד ספק ההכנות. הוסיפו ספק עם ספקחדש.".to_string()
        }
        ChatError::PersistenceFailed => "⚠️ השמירה נכשלה. לא בוצע שינוי, נסו שוב.".to_string(),
    }
}

fn with_prompt(error: String, prompt: &Option<Box<Outcome>>, language: Language) -> String {
    match prompt {
        Some(prompt) => format!("{error}\n\n{}", render(prompt, language)),
        None => error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use shopkeep_core::SupplierId;
    use shopkeep_inventory::Supplier;

    fn row(required: Option<u32>) -> ItemRow {
        ItemRow {
            name: "Milk".to_string(),
            quantity: 3,
            required,
            item_type: ItemType::Raw,
            supplier: Some("Acme".to_string()),
            last_reported_at: Some(Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()),
            last_reported_by: Some("..4567".to_string()),
        }
    }

    #[test]
    fn list_shows_current_over_required() {
        let outcome = Outcome::ItemList {
            rows: vec![row(Some(10))],
            extended: false,
            filter: None,
        };
        let text = render(&outcome, Language::En);
        assert!(text.contains("• Milk | 3/10 | Raw | Acme"), "{text}");
        assert!(!text.contains("..4567"));
    }

    #[test]
    fn unset_required_renders_as_dash() {
        let outcome = Outcome::ItemList {
            rows: vec![row(None)],
            extended: true,
            filter: None,
        };
        let text = render(&outcome, Language::En);
        assert!(text.contains("3/-"), "{text}");
        assert!(text.contains("2026-10-16 09:30 | ..4567"), "{text}");
    }

    #[test]
    fn rejection_reshows_prompt() {
        let outcome = Outcome::rejected_with_prompt(
            ChatError::InvalidSelection,
            Outcome::AskItemType {
                item: "Egg Salad".to_string(),
            },
        );
        let text = render(&outcome, Language::En);
        assert!(text.starts_with("❌ Invalid choice."));
        assert!(text.contains("What type is Egg Salad?"));
    }

    #[test]
    fn same_outcome_renders_per_language() {
        let outcome = Outcome::Cancelled;
        assert_ne!(render(&outcome, Language::En), render(&outcome, Language::He));
        assert_eq!(render(&outcome, Language::He), "❌ בוטל.");
    }

    #[test]
    fn supplier_details_include_chat_link() {
        let outcome = Outcome::SupplierDetails {
            supplier: Supplier {
                id: SupplierId::new(1),
                company_name: "Acme".to_string(),
                contact_name: "John".to_string(),
                contact_number: "+972 50-123-4567".to_string(),
            },
        };
        let text = render(&outcome, Language::En);
        assert!(text.contains("https://wa.me/972501234567"), "{text}");
    }

    #[test]
    fn help_lists_every_command_in_hebrew() {
        let text = render(&Outcome::Help, Language::He);
        for keyword in ["פריט", "צריך", "מלאי", "ספקחדש", "העדפות"] {
            assert!(text.contains(keyword), "{keyword} missing from {text}");
        }
    }
}
