use std::path::Path;

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use coursemate_core::parser::{parse_catalog_str, parse_quiz_str};

fn bench_catalog_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog_parsing");

    let small = generate_catalog(5);
    let large = generate_catalog(500);

    group.bench_function("5_courses", |b| {
        b.iter(|| parse_catalog_str(black_box(&small), Path::new("bench.toml")))
    });

    group.bench_function("500_courses", |b| {
        b.iter(|| parse_catalog_str(black_box(&large), Path::new("bench.toml")))
    });

    group.finish();
}

fn bench_quiz_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("quiz_parsing");

    let quiz = generate_quiz(50);

    group.bench_function("50_questions", |b| {
        b.iter(|| parse_quiz_str(black_box(&quiz), Path::new("bench.toml")))
    });

    group.finish();
}

fn generate_catalog(n: usize) -> String {
    let levels = ["beginner", "intermediate", "advanced"];
    let mut s = String::new();
    for i in 0..n {
        let level = levels[i % levels.len()];
        let score = (i % 100) as f64 / 100.0;
        s.push_str(&format!(
            r#"
[[courses]]
id = "course_{i}"
title = "Course {i}"
description = "Bench course number {i}"
instructor = "Instructor {i}"
duration = "{weeks} weeks"
category = "Bench"
difficulty = "{level}"
tags = ["bench", "tag_{i}", "python"]
base_score = {score}
rating = 4.5
enrolled_students = {i}
"#,
            weeks = i % 10 + 1,
        ));
    }
    s
}

fn generate_quiz(n: usize) -> String {
    let mut s = String::from("[quiz]\nid = \"bench\"\ntitle = \"Bench quiz\"\n");
    for i in 0..n {
        s.push_str(&format!(
            r#"
[[questions]]
id = "q{i}"
prompt = "Question {i}?"
options = ["a", "b", "c", "d"]
correct_option_index = {correct}
explanation = "Because {i}."
"#,
            correct = i % 4,
        ));
    }
    s
}

criterion_group!(benches, bench_catalog_parsing, bench_quiz_parsing);
criterion_main!(benches);
