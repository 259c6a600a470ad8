use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::Utc;
use shopkeep_chat::{ChatService, Language};
use shopkeep_core::SenderId;
use shopkeep_infra::{CatalogRepository, InMemoryAuditLedger, InMemoryCatalogStore, Registry};
use shopkeep_inventory::{AddSupplier, CatalogCommand, CreateItem, ItemType};
use std::sync::Arc;

const SENDER: &str = "whatsapp:+972501234567";

/// Service over an in-memory registry seeded with `items` items and 5 suppliers.
fn seeded_service(items: usize) -> ChatService {
    let registry = Arc::new(Registry::load(InMemoryCatalogStore::new()).unwrap());
    let mut commands: Vec<CatalogCommand> = (0..5)
        .map(|i| {
            CatalogCommand::AddSupplier(AddSupplier {
                company_name: format!("Supplier {i}"),
                contact_name: "Dana".to_string(),
                contact_number: format!("05000000{i:02}"),
            })
        })
        .collect();
    commands.extend((0..items).map(|i| {
        CatalogCommand::CreateItem(CreateItem {
            name: format!("Item {i}"),
            item_type: ItemType::Raw,
            supplier_id: None,
            quantity: 1,
            reported_by: SenderId::new(SENDER),
            occurred_at: Utc::now(),
        })
    }));
    registry.execute(&commands).unwrap();

    ChatService::new(registry, Arc::new(InMemoryAuditLedger::new()))
        .with_default_language(Language::En)
}

fn bench_single_message_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_message_latency");
    group.sample_size(1000);

    let service = seeded_service(100);
    group.bench_function("implicit_low_existing_item", |b| {
        b.iter(|| black_box(service.handle(SENDER, black_box("Item 42 2"))));
    });

    group.bench_function("keyword_help", |b| {
        b.iter(|| black_box(service.handle(SENDER, black_box("Help"))));
    });

    group.bench_function("new_item_confirm_and_cancel", |b| {
        b.iter(|| {
            black_box(service.handle(SENDER, "Almond"));
            black_box(service.handle(SENDER, "!"));
        });
    });

    group.finish();
}

fn bench_list_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("list_rendering");

    for item_count in [10usize, 100, 1000].iter() {
        let service = seeded_service(*item_count);
        group.throughput(Throughput::Elements(*item_count as u64));
        group.bench_with_input(
            BenchmarkId::new("list_ext", item_count),
            item_count,
            |b, _| {
                b.iter(|| black_box(service.handle(SENDER, "ListExt")));
            },
        );
    }

    group.finish();
}

fn bench_multi_mode_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("multi_mode_commit");

    for batch_size in [1usize, 10, 50].iter() {
        let service = seeded_service(100);
        group.throughput(Throughput::Elements(*batch_size as u64));
        group.bench_with_input(
            BenchmarkId::new("buffer_then_commit", batch_size),
            batch_size,
            |b, &batch_size| {
                b.iter(|| {
                    service.handle(SENDER, "Lows");
                    for i in 0..batch_size {
                        service.handle(SENDER, &format!("Item {i} 1"));
                    }
                    black_box(service.handle(SENDER, "!"))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_message_latency,
    bench_list_rendering,
    bench_multi_mode_commit
);
criterion_main!(benches);
