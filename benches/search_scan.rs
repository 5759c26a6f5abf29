//! Benchmarks for the collection keyword scan (shallow vs deep)

use chat_archive_explorer::models::{ContentBlock, Conversation, Message, Sender};
use chat_archive_explorer::search;
use chrono::{TimeZone, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn synthetic_collection(conversations: usize, messages_per_conversation: usize) -> Vec<Conversation> {
    (0..conversations)
        .map(|c| Conversation {
            uuid: format!("conv-{}", c),
            name: Some(format!("Conversation number {}", c)),
            summary: Some(format!(
                "Summary {} about parsers, lifetimes and the occasional deadlock", c
            )),
            created_at: Utc.timestamp_opt(1_700_000_000 + c as i64, 0).unwrap(),
            updated_at: Utc.timestamp_opt(1_700_000_500 + c as i64, 0).unwrap(),
            messages: (0..messages_per_conversation)
                .map(|m| Message {
                    uuid: format!("msg-{}-{}", c, m),
                    sender: if m % 2 == 0 { Sender::Human } else { Sender::Assistant },
                    text: Some(format!(
                        "Message {} in conversation {} with some filler text about \
                         borrow checking and async executors",
                        m, c
                    )),
                    content: vec![ContentBlock {
                        block_type: "tool_result".to_string(),
                        text: Some(format!("tool output {} with embedded diagnostics", m)),
                    }],
                    created_at: Utc.timestamp_opt(1_700_000_000 + m as i64, 0).unwrap(),
                })
                .collect(),
        })
        .collect()
}

fn bench_shallow_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("shallow_search");
    for size in [100, 1000] {
        let collection = synthetic_collection(size, 20);
        group.bench_with_input(BenchmarkId::from_parameter(size), &collection, |b, collection| {
            b.iter(|| search(black_box(collection), black_box("deadlock"), false));
        });
    }
    group.finish();
}

fn bench_deep_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_search");
    for size in [100, 1000] {
        let collection = synthetic_collection(size, 20);
        group.bench_with_input(BenchmarkId::from_parameter(size), &collection, |b, collection| {
            b.iter(|| search(black_box(collection), black_box("diagnostics"), true));
        });
    }
    group.finish();
}

fn bench_search_no_matches(c: &mut Criterion) {
    let collection = synthetic_collection(1000, 20);
    c.bench_function("deep_search_no_matches", |b| {
        b.iter(|| search(black_box(&collection), black_box("zzzznothing"), true));
    });
}

criterion_group!(benches, bench_shallow_search, bench_deep_search, bench_search_no_matches);
criterion_main!(benches);
