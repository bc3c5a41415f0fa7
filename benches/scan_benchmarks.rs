use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dupescan::duplicates::DuplicateFinder;
use dupescan::scanner::{Hasher, Walker};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// Helper to create a test directory with a specific structure
fn setup_test_dir(depth: usize, files_per_dir: usize) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    create_dir_recursive(temp_dir.path().to_path_buf(), depth, files_per_dir);
    temp_dir
}

fn create_dir_recursive(path: PathBuf, depth: usize, files_per_dir: usize) {
    if depth == 0 {
        return;
    }

    if !path.exists() {
        fs::create_dir_all(&path).expect("Failed to create dir");
    }

    for i in 0..files_per_dir {
        let file_path = path.join(format!("file_{i}.txt"));
        // Half the files share content so some duplicate groups form
        let content = if i % 2 == 0 {
            "shared duplicate content".to_string()
        } else {
            format!("unique content {i} at depth {depth}")
        };
        fs::write(file_path, content).expect("Failed to write file");
    }

    if depth > 1 {
        for i in 0..2 {
            // 2 subdirectories per level
            let sub_dir = path.join(format!("dir_{i}"));
            create_dir_recursive(sub_dir, depth - 1, files_per_dir);
        }
    }
}

fn bench_walker(c: &mut Criterion) {
    let temp_dir = setup_test_dir(4, 10); // roughly 150 files

    c.bench_function("walker_150_files", |b| {
        b.iter(|| {
            let walker = Walker::new(temp_dir.path());
            let files: Vec<_> = walker.walk().unwrap().collect();
            black_box(files);
        })
    });
}

fn bench_hasher(c: &mut Criterion) {
    let mut group = c.benchmark_group("hasher");
    let hasher = Hasher::new();

    for size_kb in [1, 64, 1024] {
        let data = vec![b'a'; size_kb * 1024];
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("bench_file.dat");
        fs::write(&file_path, &data).expect("Failed to write bench file");

        group.bench_with_input(format!("md5_{size_kb}KB"), &file_path, |b, path| {
            b.iter(|| {
                let digest = hasher.hash_file(path).unwrap();
                black_box(digest);
            });
        });
    }
    group.finish();
}

fn bench_full_scan(c: &mut Criterion) {
    let temp_dir = setup_test_dir(4, 10);

    c.bench_function("scan_150_files", |b| {
        b.iter(|| {
            let finder = DuplicateFinder::with_defaults();
            let result = finder.scan(temp_dir.path()).unwrap();
            black_box(result);
        })
    });
}

criterion_group!(benches, bench_walker, bench_hasher, bench_full_scan);
criterion_main!(benches);
