//! Parse throughput for a database shaped like the shipped ones.

use classic_config::{ParseMode, YamlConfigService};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn synthetic_database(entries: usize) -> String {
    let mut yaml = String::from(
        "Game_Info:\n  GameVersion: 1.10.163\n  XSE_Acronym: F4SE\n\nCrashlog_Error_Check:\n",
    );
    for i in 0..entries {
        yaml.push_str(&format!("  {} | Crash Number {}: PATTERN_{}\n", i % 6, i, i));
    }

    yaml.push_str("\nCrashlog_Stack_Check:\n");
    for i in 0..entries {
        yaml.push_str(&format!(
            "  {} | Stack Crash {}:\n    - ME-REQ|EXCEPTION_{}\n    - 2|Frame{}\n",
            i % 6,
            i,
            i,
            i
        ));
    }

    yaml.push_str("\nMods_FREQ:\n");
    for i in 0..entries {
        yaml.push_str(&format!(
            "  Mod{} | Mod Number {}: |\n    Causes crashes.\n    Link: https://example.com/{}\n",
            i, i, i
        ));
    }

    yaml
}

fn bench_load(c: &mut Criterion) {
    let yaml = synthetic_database(200);
    let tolerant = YamlConfigService::new();
    let strict = YamlConfigService::new().with_mode(ParseMode::Strict);

    c.bench_function("load_tolerant_200", |b| {
        b.iter(|| tolerant.load_config_from_str(black_box(&yaml)).unwrap())
    });

    c.bench_function("load_strict_200", |b| {
        b.iter(|| strict.load_config_from_str(black_box(&yaml)).unwrap())
    });

    let config = tolerant.load_config_from_str(&yaml).unwrap();
    c.bench_function("normalize_stack_patterns_200", |b| {
        b.iter(|| black_box(&config).stack_patterns())
    });
}

criterion_group!(benches, bench_load);
criterion_main!(benches);
