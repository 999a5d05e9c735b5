//! Name parsing and dataset scanning benchmarks.

use std::fs::{self, File};

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tempfile::TempDir;

use bidskit::{BidsPath, Dataset, EntityKey, EntityQuery, PathUpdate};

const NAMES: &[&str] = &[
    "sub-01_eeg.edf",
    "sub-01_ses-pre_task-rest_run-1_meg.fif",
    "sub-control01_ses-01_task-audio_acq-hi_run-03_proc-sss_space-head_rec-x_split-02_desc-clean_meg.fif",
];

/// Generate a dataset with `subjects` subjects, two sessions and four runs each.
fn generate_dataset(subjects: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    for sub in 0..subjects {
        for ses in ["pre", "post"] {
            let eeg = dir
                .path()
                .join(format!("sub-{:03}", sub))
                .join(format!("ses-{}", ses))
                .join("eeg");
            fs::create_dir_all(&eeg).unwrap();
            for run in 1..=4 {
                for ext in ["edf", "json"] {
                    let name = format!("sub-{:03}_ses-{}_task-rest_run-{:02}_eeg.{}", sub, ses, run, ext);
                    File::create(eeg.join(name)).unwrap();
                }
            }
        }
    }
    dir
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for name in NAMES {
        group.bench_with_input(BenchmarkId::from_parameter(name.len()), name, |b, name| {
            b.iter(|| BidsPath::parse(black_box(name)).unwrap())
        });
    }
    group.finish();
}

fn bench_build_and_update(c: &mut Criterion) {
    c.bench_function("build", |b| {
        b.iter(|| {
            BidsPath::builder()
                .subject(black_box("01"))
                .session("pre")
                .task("rest")
                .run("1")
                .suffix("meg")
                .extension("fif")
                .build()
                .unwrap()
        })
    });

    let base = BidsPath::parse("sub-01_ses-pre_task-rest_run-01_meg.fif").unwrap();
    let update = PathUpdate::new()
        .set(EntityKey::Run, "2")
        .set_suffix("channels")
        .set_extension(".tsv");
    c.bench_function("update", |b| b.iter(|| base.update(black_box(&update)).unwrap()));
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_matching_paths");
    group.sample_size(20);

    for subjects in [10, 50] {
        let dir = generate_dataset(subjects);
        let dataset = Dataset::new(dir.path()).unwrap();
        let query = EntityQuery::new()
            .with(EntityKey::Session, "pre")
            .with_extension(".edf");

        group.bench_with_input(BenchmarkId::new("subjects", subjects), &query, |b, query| {
            b.iter(|| dataset.find(query).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_build_and_update, bench_find);
criterion_main!(benches);
