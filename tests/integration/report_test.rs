//! Integration tests for the size and aggregate reports

use sniff_info::pipeline::analyze_reader;
use sniff_info::report::{
    aggregate_by_collection, filter_by_collection, top_by_size_out, DEFAULT_TOP_LIMIT,
};
use sniff_info::{AggregateRecord, CollectedDiagnostics, MatchStrategy, Operation};

use crate::helpers::{load_fixture, request_header, response_header};

fn operations(content: &str) -> Vec<Operation> {
    analyze_reader(
        content.as_bytes(),
        MatchStrategy::Indexed,
        &mut CollectedDiagnostics::default(),
    )
    .unwrap()
}

/// A capture with `count` clients, each sending one request answered later.
fn busy_capture(count: u64) -> String {
    let mut content = String::new();
    for i in 0..count {
        let client = format!("10.0.1.{}:5{:04}", i % 250, i);
        let collection = format!("shop.c{}", i % 3);
        content.push_str(&request_header(&client, &collection, 100 + i));
        content.push_str("\n\tquery: {}\n");
    }
    for i in (0..count).rev() {
        let client = format!("10.0.1.{}:5{:04}", i % 250, i);
        content.push_str(&response_header(&client, (i * 37) % 1000));
        content.push_str("\n\treply n:1\n");
    }
    content
}

#[test]
fn request_answered_later_aggregates_into_one_group() {
    let content = format!(
        "{}\n\tquery\n{}\n\tquery\n{}\n\treply n:0\n{}\n\treply n:10\n",
        request_header("A:1", "orders", 170),
        request_header("B:2", "users", 5),
        response_header("B:2", 9),
        response_header("A:1", 72336),
    );
    let ops = operations(&content);
    let records = aggregate_by_collection(filter_by_collection(&ops, Some("orders")));

    assert_eq!(
        records,
        vec![AggregateRecord {
            collection: "orders".to_string(),
            ops_count: 1,
            total_size_in: 170,
            total_size_out: 72336,
        }]
    );
}

#[test]
fn top_report_is_sorted_and_bounded() {
    let ops = operations(&busy_capture(40));
    let top = top_by_size_out(&ops, DEFAULT_TOP_LIMIT);

    assert_eq!(ops.len(), 40);
    assert_eq!(top.len(), DEFAULT_TOP_LIMIT);
    assert!(top.windows(2).all(|w| w[0].size_out >= w[1].size_out));

    // Every selected operation is one of the inputs, none is repeated.
    let max = ops.iter().map(|op| op.size_out).max().unwrap();
    assert_eq!(top[0].size_out, max);
    for (i, a) in top.iter().enumerate() {
        assert!(ops.iter().any(|op| std::ptr::eq(op, *a)));
        assert!(top[i + 1..].iter().all(|b| !std::ptr::eq(*a, *b)));
    }
}

#[test]
fn aggregate_totals_cover_filtered_operations() {
    let ops = operations(&busy_capture(30));

    for filter in [None, Some("shop.c1")] {
        let filtered = filter_by_collection(&ops, filter);
        let records = aggregate_by_collection(filtered.iter().copied());

        let count: usize = records.iter().map(|r| r.ops_count).sum();
        let size_in: u64 = records.iter().map(|r| r.total_size_in).sum();
        let size_out: u64 = records.iter().map(|r| r.total_size_out).sum();
        assert_eq!(count, filtered.len());
        assert_eq!(size_in, filtered.iter().map(|op| op.size_in).sum::<u64>());
        assert_eq!(size_out, filtered.iter().map(|op| op.size_out).sum::<u64>());
        assert!(records
            .windows(2)
            .all(|w| w[0].total_size_out >= w[1].total_size_out));
    }
}

#[test]
fn unknown_collection_filter_gives_empty_reports() {
    let ops = operations(&load_fixture("sample.log"));
    let filtered = filter_by_collection(&ops, Some("shop.nothing"));

    assert!(top_by_size_out(filtered.iter().copied(), DEFAULT_TOP_LIMIT).is_empty());
    assert!(aggregate_by_collection(filtered).is_empty());
}

#[test]
fn sample_aggregate_by_outbound_traffic() {
    let ops = operations(&load_fixture("sample.log"));
    let records = aggregate_by_collection(&ops);

    let summary: Vec<_> = records
        .iter()
        .map(|r| (r.collection.as_str(), r.ops_count, r.total_size_in, r.total_size_out))
        .collect();
    assert_eq!(
        summary,
        vec![("shop.orders", 2, 260, 73360), ("shop.users", 1, 60, 310)]
    );
}
