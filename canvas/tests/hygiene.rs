//! Hygiene: enforces coding standards at test time
//!
//! Scans the canvas crate's production sources for antipatterns. The core
//! must never take the session down: stale references, bad video URLs and
//! rejected input all degrade to no-ops, so nothing here may panic or drop an
//! error on the floor. Output goes through `tracing`. Every budget is zero and
//! never grows.

use std::fs;
use std::path::Path;

/// A set of patterns counted together, with a hint shown when over budget.
struct Budget {
    label: &'static str,
    patterns: &'static [&'static str],
    hint: &'static str,
}

// Panics: these crash the process.
const UNWRAP: Budget = Budget { label: ".unwrap()", patterns: &[".unwrap()"], hint: "" };
const EXPECT: Budget = Budget { label: ".expect()", patterns: &[".expect("], hint: "" };
const PANIC_LIKE: Budget = Budget {
    label: "panic-like macros",
    patterns: &["panic!(", "unreachable!(", "todo!(", "unimplemented!("],
    hint: "Return an Option or a no-op instead.",
};

// Silent loss: discards errors without inspecting.
const SILENT_DISCARD: Budget = Budget { label: "let _ =", patterns: &["let _ ="], hint: "" };
const DOT_OK: Budget = Budget { label: ".ok()", patterns: &[".ok()"], hint: "" };
const UNWRAP_OR_DEFAULT: Budget = Budget {
    label: ".unwrap_or_default()",
    patterns: &[".unwrap_or_default()"],
    hint: "Missing items are no-ops, not defaults.",
};

// Style / structure.
const ALLOW_DEAD_CODE: Budget = Budget { label: "#[allow(dead_code)]", patterns: &["#[allow(dead_code)]"], hint: "" };
const PRINT: Budget = Budget {
    label: "print macros",
    patterns: &["println!(", "eprintln!(", "dbg!("],
    hint: "Log through tracing instead.",
};

/// Production `.rs` files under `src/`, excluding `*_test.rs` siblings.
fn source_files() -> Vec<(String, String)> {
    let mut files = Vec::new();
    collect(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut files);
    assert!(!files.is_empty(), "no canvas sources found");
    files
}

fn collect(dir: &Path, out: &mut Vec<(String, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect(&path, out);
            continue;
        }
        let name = path.to_string_lossy().to_string();
        if !name.ends_with(".rs") || name.ends_with("_test.rs") {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((name, content));
        }
    }
}

fn assert_clean(budget: &Budget) {
    let hits: Vec<String> = source_files()
        .iter()
        .filter_map(|(path, content)| {
            let count = content
                .lines()
                .filter(|line| budget.patterns.iter().any(|p| line.contains(p)))
                .count();
            (count > 0).then(|| format!("  {path}: {count}"))
        })
        .collect();
    assert!(hits.is_empty(), "{} found in canvas sources. {}\n{}", budget.label, budget.hint, hits.join("\n"));
}

#[test]
fn unwrap_budget() {
    assert_clean(&UNWRAP);
}

#[test]
fn expect_budget() {
    assert_clean(&EXPECT);
}

#[test]
fn panic_budget() {
    assert_clean(&PANIC_LIKE);
}

#[test]
fn silent_discard_budget() {
    assert_clean(&SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    assert_clean(&DOT_OK);
}

#[test]
fn unwrap_or_default_budget() {
    assert_clean(&UNWRAP_OR_DEFAULT);
}

#[test]
fn allow_dead_code_budget() {
    assert_clean(&ALLOW_DEAD_CODE);
}

#[test]
fn print_budget() {
    assert_clean(&PRINT);
}
