//! End-to-end conversations through `ChatService`.
//!
//! Each test wires the service to an in-memory registry and audit ledger and
//! drives it one message at a time, asserting on reply text and on the
//! committed catalog.

use std::sync::Arc;

use chrono::{Duration, Utc};

use shopkeep_chat::{ChatService, Language};
use shopkeep_core::{SenderId, SupplierId};
use shopkeep_infra::{
    AuditStatus, CatalogRepository, InMemoryAuditLedger, InMemoryCatalogStore, Registry,
};
use shopkeep_inventory::{AddSupplier, CatalogCommand, CreateItem, ItemType};

const ALICE: &str = "whatsapp:+972501114567";
const BOB: &str = "whatsapp:+972502229999";

struct Harness {
    service: ChatService,
    registry: Arc<Registry<Arc<InMemoryCatalogStore>>>,
    store: Arc<InMemoryCatalogStore>,
    ledger: Arc<InMemoryAuditLedger>,
}

impl Harness {
    fn new() -> Self {
        Self::with_service(|service| service.with_default_language(Language::En))
    }

    fn with_service(configure: impl FnOnce(ChatService) -> ChatService) -> Self {
        let store = Arc::new(InMemoryCatalogStore::new());
        let registry = Arc::new(Registry::load(Arc::clone(&store)).unwrap());
        let ledger = Arc::new(InMemoryAuditLedger::new());
        let service = configure(ChatService::new(registry.clone(), ledger.clone()));
        Self {
            service,
            registry,
            store,
            ledger,
        }
    }

    fn send(&self, text: &str) -> String {
        self.service.handle(ALICE, text)
    }

    fn supplier(&self, company: &str) -> &Self {
        self.registry
            .execute(&[CatalogCommand::AddSupplier(AddSupplier {
                company_name: company.to_string(),
                contact_name: "Dana".to_string(),
                contact_number: "+972 50-123-4567".to_string(),
            })])
            .unwrap();
        self
    }

    fn item(&self, name: &str, item_type: ItemType, supplier: Option<u64>) -> &Self {
        self.registry
            .execute(&[CatalogCommand::CreateItem(CreateItem {
                name: name.to_string(),
                item_type,
                supplier_id: supplier.map(SupplierId::new),
                quantity: 1,
                reported_by: SenderId::new(BOB),
                occurred_at: Utc::now(),
            })])
            .unwrap();
        self
    }

    fn quantity(&self, name: &str) -> Option<u32> {
        self.registry
            .snapshot()
            .unwrap()
            .find_item(name)
            .map(|i| i.quantity)
    }

    fn is_idle(&self) -> bool {
        self.service
            .conversation(ALICE)
            .map(|c| c.is_idle())
            .unwrap_or(true)
    }
}

#[test]
fn unknown_bare_name_confirms_then_creates_prep_item() {
    let h = Harness::new();
    h.supplier("Acme").supplier("Prep Kitchen");

    let reply = h.send("Almond");
    assert!(reply.contains("Almond is not in the list"), "{reply}");

    let reply = h.send("yes");
    assert!(reply.contains("What type is Almond?"), "{reply}");

    let reply = h.send("2");
    assert!(reply.contains("Added Almond (Prep, Prep Kitchen)"), "{reply}");

    let catalog = h.registry.snapshot().unwrap();
    let almond = catalog.find_item("almond").unwrap();
    assert_eq!(almond.item_type, ItemType::Prep);
    assert_eq!(almond.quantity, 1);
    assert_eq!(almond.supplier_id, Some(SupplierId::new(2)));
    assert!(h.is_idle());

    let records = h.ledger.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].status, AuditStatus::LowStock);
    assert_eq!(records[0].supplier.as_deref(), Some("Prep Kitchen"));
}

#[test]
fn declining_new_item_mutates_nothing() {
    let h = Harness::new();
    h.send("Almond");
    let reply = h.send("no");
    assert!(reply.contains("Cancelled"), "{reply}");
    assert!(h.registry.snapshot().unwrap().items().is_empty());
    assert!(h.is_idle());

    h.send("Almond");
    assert!(h.send("!").contains("Cancelled"));
    assert!(h.registry.snapshot().unwrap().items().is_empty());
}

#[test]
fn explicit_low_skips_confirmation_and_picks_supplier_from_snapshot() {
    let h = Harness::new();
    h.supplier("Acme").supplier("Dairy Co");

    let reply = h.send("Low egg  salad 3");
    assert!(reply.contains("What type is Egg Salad?"), "{reply}");

    let reply = h.send("1");
    assert!(reply.contains("1. Acme\n2. Dairy Co"), "{reply}");

    // A supplier added mid-flow does not shift the indices already shown.
    h.supplier("Zeta");
    let reply = h.send("3");
    assert!(reply.starts_with("❌ Invalid choice."), "{reply}");
    assert!(reply.contains("Which supplier provides Egg Salad?"), "{reply}");

    let reply = h.send("2");
    assert!(reply.contains("Added Egg Salad (Raw, Dairy Co) with quantity 3"), "{reply}");
    let catalog = h.registry.snapshot().unwrap();
    assert_eq!(catalog.find_item("Egg Salad").unwrap().supplier_id, Some(SupplierId::new(2)));
}

#[test]
fn raw_item_without_suppliers_commits_immediately() {
    let h = Harness::new();
    h.send("Low Almond");
    let reply = h.send("1");
    assert!(reply.contains("Added Almond (Raw) with quantity 1"), "{reply}");
    assert_eq!(h.registry.snapshot().unwrap().find_item("Almond").unwrap().supplier_id, None);
}

#[test]
fn back_steps_through_new_item_flow() {
    let h = Harness::new();
    h.supplier("Acme");
    h.send("Almond");
    h.send("y");
    assert!(h.send("1").contains("Which supplier provides Almond?"));
    assert!(h.send("back").contains("What type is Almond?"));
    assert!(h.send("b").contains("Almond is not in the list"));
    assert!(h.send("Back").contains("Cancelled"));
    assert!(h.is_idle());
}

#[test]
fn repeated_low_accumulates() {
    let h = Harness::new();
    h.item("Milk", ItemType::Raw, None);

    for _ in 0..3 {
        h.send("milk");
    }
    let reply = h.send("MILK 5");
    assert!(reply.contains("Reported 5 × Milk (total 9)"), "{reply}");
    assert_eq!(h.quantity("Milk"), Some(9));
    assert_eq!(h.ledger.records().len(), 4);
}

#[test]
fn edit_delete_requires_confirmation() {
    let h = Harness::new();
    h.item("Milk", ItemType::Raw, None);

    assert!(h.send("Edit Milk").contains("Editing Milk"));
    assert!(h.send("4").contains("Delete Milk?"));
    let reply = h.send("no");
    assert!(reply.contains("Cancelled"), "{reply}");
    assert!(h.is_idle());
    assert!(h.registry.snapshot().unwrap().contains_item("Milk"));

    // The next message is routed normally, not swallowed by the menu.
    let reply = h.send("Milk");
    assert!(reply.contains("Reported 1 × Milk (total 2)"), "{reply}");

    h.send("Edit Milk");
    h.send("4");
    assert!(h.send("Back").contains("Editing Milk"));
    h.send("!");
    assert!(h.is_idle());

    h.send("E milk");
    h.send("4");
    let reply = h.send("yes");
    assert!(reply.contains("Deleted Milk"), "{reply}");
    assert!(!h.registry.snapshot().unwrap().contains_item("Milk"));
    assert!(h.is_idle());
}

#[test]
fn edit_unknown_item_starts_no_flow() {
    let h = Harness::new();
    let reply = h.send("Edit Ghost");
    assert!(reply.contains("\"Ghost\" is not in the list"), "{reply}");
    assert!(h.is_idle());
}

#[test]
fn rename_collision_reprompts_and_keeps_flow() {
    let h = Harness::new();
    h.item("Milk", ItemType::Raw, None).item("Beans", ItemType::Raw, None);

    h.send("Edit Milk");
    h.send("3");
    let reply = h.send("beans");
    assert!(reply.contains("An item named \"Beans\" already exists"), "{reply}");
    assert!(reply.contains("Send the new name for Milk"), "{reply}");
    assert!(!h.is_idle());

    let reply = h.send("Oat Milk");
    assert!(reply.contains("Renamed Milk to Oat Milk"), "{reply}");
    let catalog = h.registry.snapshot().unwrap();
    assert!(catalog.contains_item("oat milk"));
    assert!(!catalog.contains_item("milk"));
}

#[test]
fn edit_type_rules() {
    let h = Harness::new();
    h.supplier("Prep Kitchen");
    h.item("Salad", ItemType::Prep, Some(1));

    h.send("Edit Salad");
    assert!(h.send("2").contains("Salad is currently Prep"));
    let reply = h.send("1");
    assert!(reply.contains("No supplier other than the prep supplier"), "{reply}");

    h.supplier("Acme");
    let reply = h.send("1");
    assert!(reply.contains("1. Acme"), "{reply}");
    assert!(!reply.contains("Prep Kitchen"), "{reply}");
    let reply = h.send("1");
    assert!(reply.contains("Salad is now Raw (Acme)"), "{reply}");

    h.send("Edit Salad");
    h.send("2");
    let reply = h.send("2");
    assert!(reply.contains("Salad is now Prep (Prep Kitchen)"), "{reply}");
}

#[test]
fn edit_change_supplier_without_suppliers_stays_on_menu() {
    let h = Harness::new();
    h.item("Milk", ItemType::Raw, None);
    h.send("Edit Milk");
    let reply = h.send("1");
    assert!(reply.contains("No suppliers yet"), "{reply}");
    assert!(reply.contains("Editing Milk"), "{reply}");
}

#[test]
fn need_sets_required_quantity() {
    let h = Harness::new();
    h.item("Milk", ItemType::Raw, None);

    let reply = h.send("Need Milk 10");
    assert!(reply.contains("Required quantity for Milk set to 10"), "{reply}");
    assert!(h.send("List").contains("Milk | 1/10"));

    let records = h.ledger.records();
    assert_eq!(records.last().unwrap().status, AuditStatus::Need);
    assert_eq!(records.last().unwrap().quantity, 10);

    let before = h.registry.snapshot().unwrap();
    let reply = h.send("N Ghost 5");
    assert!(reply.contains("\"Ghost\" is not in the list"), "{reply}");
    let reply = h.send("Need Milk lots");
    assert!(reply.contains("\"lots\" is not a valid quantity"), "{reply}");
    assert_eq!(h.registry.snapshot().unwrap(), before);
}

#[test]
fn bare_bang_without_flow_is_reserved() {
    let h = Harness::new();
    h.item("Milk", ItemType::Raw, None);
    let before = h.registry.snapshot().unwrap();

    let reply = h.send("!");
    assert!(reply.contains("\"!\" can't be used on its own"), "{reply}");
    assert_eq!(h.registry.snapshot().unwrap(), before);
    assert!(h.is_idle());
}

#[test]
fn stray_confirmation_is_not_an_item() {
    let h = Harness::new();
    let reply = h.send("yes");
    assert!(reply.contains("Nothing to answer \"yes\""), "{reply}");
    assert!(h.registry.snapshot().unwrap().items().is_empty());
    assert!(h.is_idle());
}

#[test]
fn language_switch_applies_to_every_later_reply() {
    let h = Harness::new();
    h.item("Milk", ItemType::Raw, None);
    h.send("Milk");

    assert!(h.send("Lang").contains("Choose a language"));
    let reply = h.send("2");
    assert_eq!(reply, "✅ השפה שונתה לעברית.");

    let reply = h.send("מלאי");
    assert!(reply.starts_with("📋 פריטים (1):"), "{reply}");
    assert!(reply.contains("Milk | 2/- | גלם"), "{reply}");

    // English keywords still work; replies stay Hebrew.
    let reply = h.send("Milk");
    assert!(reply.contains("דווח 1 × Milk"), "{reply}");

    // Other senders are unaffected.
    assert!(h.service.handle(BOB, "List").starts_with("📋 Items (1):"));
}

#[test]
fn language_menu_rejects_unknown_choice() {
    let h = Harness::new();
    h.send("Lang");
    let reply = h.send("7");
    assert!(reply.starts_with("❌ Invalid choice."), "{reply}");
    assert!(reply.contains("Choose a language"), "{reply}");
    assert_eq!(h.service.conversation(ALICE).unwrap().language, Language::En);
}

#[test]
fn hebrew_is_the_default_language() {
    let h = Harness::with_service(|service| service);
    h.item("חלב", ItemType::Raw, None);

    let reply = h.send("פ חלב 2");
    assert!(reply.contains("דווח 2 × חלב"), "{reply}");

    let reply = h.send("שמן");
    assert!(reply.contains("לא ברשימה"), "{reply}");
    let reply = h.send("כן");
    assert!(reply.contains("מה הסוג של שמן?"), "{reply}");
    let reply = h.send("ביטול");
    assert!(reply.contains("לא ברשימה"), "{reply}");
    assert_eq!(h.send("לא"), "❌ בוטל.");
    assert!(h.is_idle());
}

#[test]
fn multi_mode_buffers_and_commits_atomically() {
    let h = Harness::new();
    h.item("Milk", ItemType::Raw, None).item("Beans", ItemType::Raw, None);

    let reply = h.send("Lows Milk 2");
    assert!(reply.contains("Multi-item mode"), "{reply}");
    assert!(reply.contains("Added 2 × Milk"), "{reply}");

    let reply = h.send("Almond");
    assert!(reply.contains("\"Almond\" is not in the list"), "{reply}");
    assert!(h.service.conversation(ALICE).unwrap().is_multi_mode());

    assert!(h.send("milk").contains("3 × Milk (1 pending)"));
    h.send("Beans 4");
    assert_eq!(h.quantity("Milk"), Some(1));

    let reply = h.send("!");
    assert!(reply.contains("Reported 2 item(s)"), "{reply}");
    assert_eq!(h.quantity("Milk"), Some(4));
    assert_eq!(h.quantity("Beans"), Some(5));
    assert!(h.is_idle());
    assert_eq!(h.ledger.records().len(), 2);
}

#[test]
fn multi_mode_commit_failure_applies_nothing() {
    let h = Harness::new();
    h.item("Milk", ItemType::Raw, None).item("Beans", ItemType::Raw, None);
    let before = h.registry.snapshot().unwrap();

    h.send("S");
    h.send("Milk 2");
    h.send("Beans 3");

    h.store.fail_saves(true);
    let reply = h.send("!");
    assert!(reply.contains("Couldn't save"), "{reply}");
    assert_eq!(h.registry.snapshot().unwrap(), before);
    assert!(h.service.conversation(ALICE).unwrap().is_multi_mode());
    assert!(h.ledger.records().is_empty());

    h.store.fail_saves(false);
    h.send("!");
    assert_eq!(h.quantity("Milk"), Some(3));
    assert_eq!(h.quantity("Beans"), Some(4));
}

#[test]
fn empty_multi_mode_ends_without_commit() {
    let h = Harness::new();
    h.send("Lows");
    assert!(h.send("!").contains("Nothing was reported"));
    assert!(h.is_idle());
}

#[test]
fn supplier_add_with_back_then_view() {
    let h = Harness::new();
    assert!(h.send("Supa").contains("Company name?"));
    assert!(h.send("Acme").contains("Contact name at Acme?"));
    assert!(h.send("Back").contains("Company name?"));
    h.send("Acme Ltd");
    assert!(h.send("").contains("This can't be empty"));
    h.send("Dana");
    let reply = h.send("+972 50-123-4567");
    assert!(reply.contains("Added supplier #1 Acme Ltd"), "{reply}");

    let reply = h.send("Sup");
    assert!(reply.contains("1. Acme Ltd"), "{reply}");
    let reply = h.send("1");
    assert!(reply.contains("https://wa.me/972501234567"), "{reply}");
    assert!(h.is_idle());

    assert!(h.send("Sup 1").contains("Contact: Dana"));
}

#[test]
fn supplier_add_cancel_mutates_nothing() {
    let h = Harness::new();
    h.send("Supa");
    h.send("Acme");
    h.send("!");
    assert!(h.registry.snapshot().unwrap().suppliers().is_empty());
}

#[test]
fn preferences_set_prep_supplier_and_repoint() {
    let h = Harness::new();
    h.supplier("Acme").supplier("Central Kitchen");
    h.item("Salad", ItemType::Prep, Some(1));

    assert!(h.send("Pref").contains("Preferences"));
    h.send("2");
    let reply = h.send("2");
    assert!(reply.contains("Central Kitchen is now the prep supplier (1 prep item(s) updated)"), "{reply}");

    let catalog = h.registry.snapshot().unwrap();
    assert_eq!(catalog.find_item("Salad").unwrap().supplier_id, Some(SupplierId::new(2)));
    assert_eq!(catalog.configured_prep_supplier_id(), Some(SupplierId::new(2)));

    // Language reached from preferences goes back to the preferences menu.
    h.send("Pref");
    h.send("1");
    assert!(h.send("Back").contains("Preferences"));
}

#[test]
fn list_filters_by_supplier_and_ext_masks_sender() {
    let h = Harness::new();
    h.supplier("Acme").supplier("Dairy Co");
    h.item("Flour", ItemType::Raw, Some(1)).item("Milk", ItemType::Raw, Some(2));

    let reply = h.send("List acme");
    assert!(reply.contains("Flour"), "{reply}");
    assert!(!reply.contains("Milk"), "{reply}");

    let reply = h.send("List [");
    assert!(reply.contains("is not a valid filter"), "{reply}");

    let reply = h.send("ListExt");
    assert!(reply.contains("| ..9999"), "{reply}");
    assert!(!reply.contains(BOB), "{reply}");
}

#[test]
fn stale_flow_is_dropped_after_idle_timeout() {
    let h = Harness::with_service(|service| {
        service
            .with_default_language(Language::En)
            .with_flow_idle_timeout(Some(std::time::Duration::from_secs(60)))
    });
    let start = Utc::now();

    h.service.handle_at(ALICE, "Almond", start);
    let reply = h.service.handle_at(ALICE, "yes", start + Duration::minutes(5));
    assert!(reply.contains("Nothing to answer \"yes\""), "{reply}");
    assert!(h.registry.snapshot().unwrap().items().is_empty());
}

#[test]
fn audit_failure_does_not_fail_the_turn() {
    let h = Harness::new();
    h.item("Milk", ItemType::Raw, None);
    h.ledger.fail_appends(true);

    let reply = h.send("Milk");
    assert!(reply.contains("Reported 1 × Milk"), "{reply}");
    assert_eq!(h.quantity("Milk"), Some(2));
}

#[test]
fn help_and_help_topics() {
    let h = Harness::new();
    assert!(h.send("Help").contains("Need <item> <qty> (N)"));
    assert!(h.send("help low").contains("Example: Low Milk 3"));
    assert!(h.send("Help Frobnicate").contains("Unknown command \"Frobnicate\""));
}

#[test]
fn concurrent_senders_do_not_lose_reports() {
    let h = Arc::new(Harness::new());
    h.item("Milk", ItemType::Raw, None);

    let handles: Vec<_> = (0..8)
        .map(|n| {
            let h = Arc::clone(&h);
            std::thread::spawn(move || {
                let sender = format!("whatsapp:+97250000{n:04}");
                for _ in 0..25 {
                    h.service.handle(&sender, "Milk");
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(h.quantity("Milk"), Some(201));
}

#[test]
fn item_named_like_back_keyword_is_reported() {
    let h = Harness::new();
    h.item("Back Ribs", ItemType::Raw, None);

    let reply = h.send("Back Ribs 2");
    assert!(reply.contains("Reported 2 × Back Ribs (total 3)"), "{reply}");
    assert_eq!(h.quantity("back ribs"), Some(3));
    assert!(h.is_idle());

    let reply = h.send("Back");
    assert!(!reply.contains("Reported"), "{reply}");
    assert_eq!(h.quantity("Back Ribs"), Some(3));
}
