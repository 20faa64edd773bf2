use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use webutil::{locate, locate_byte};

fn generate_json_document(num_entries: usize) -> String {
    let mut src = String::from("{\n");
    for i in 0..num_entries {
        src.push_str(&format!("  \"entry_{i}\": {{ \"name\": \"café {i}\", \"count\": {i} }},\n"));
    }
    src.push_str("  \"last\": true\n}\n");
    src
}

fn bench_locating(c: &mut Criterion) {
    let mut group = c.benchmark_group("locate");

    group.bench_function("locate_start_of_small_document", |b| {
        let src = generate_json_document(10);
        b.iter(|| black_box(locate(&src, 3).unwrap()));
    });

    group.bench_function("locate_end_of_40KB_document", |b| {
        let src = generate_json_document(780);
        let end = src.chars().count();
        b.iter(|| black_box(locate(&src, end).unwrap()));
    });

    group.bench_function("locate_end_of_1MB_document", |b| {
        let src = generate_json_document(20000);
        let end = src.chars().count();
        b.iter(|| black_box(locate(&src, end).unwrap()));
    });

    group.bench_function("locate_byte_middle_of_1MB_document", |b| {
        let src = generate_json_document(20000);
        let mut middle = src.len() / 2;
        while !src.is_char_boundary(middle) {
            middle -= 1;
        }
        b.iter(|| black_box(locate_byte(&src, middle).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_locating);
criterion_main!(benches);
