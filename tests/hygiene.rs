//! Hygiene: enforces coding standards at test time
//!
//! Scans the session binary's production sources (`src/`) for antipatterns.
//! The canvas core carries its own zero-budget scan in `canvas/tests`. The
//! binary gets the few exceptions it genuinely needs: failing fast on bad
//! configuration at startup, optional env and header lookups, and an
//! unreadable error body. Budgets only ever shrink.

use std::fs;
use std::path::Path;

struct Budget {
    label: &'static str,
    patterns: &'static [&'static str],
    max: usize,
}

// Panics: these crash the process.
const MAX_UNWRAP: Budget = Budget { label: ".unwrap()", patterns: &[".unwrap()"], max: 0 };
const MAX_EXPECT: Budget = Budget { label: ".expect()", patterns: &[".expect("], max: 1 };
const MAX_PANIC: Budget =
    Budget { label: "panic-like macros", patterns: &["panic!(", "unreachable!(", "todo!(", "unimplemented!("], max: 0 };

// Silent loss: discards errors without inspecting.
const MAX_SILENT_DISCARD: Budget = Budget { label: "let _ =", patterns: &["let _ ="], max: 0 };
const MAX_DOT_OK: Budget = Budget { label: ".ok()", patterns: &[".ok()"], max: 2 };
const MAX_UNWRAP_OR_DEFAULT: Budget =
    Budget { label: ".unwrap_or_default()", patterns: &[".unwrap_or_default()"], max: 1 };

// Style / structure.
const MAX_PRINT: Budget = Budget { label: "print macros", patterns: &["println!(", "eprintln!(", "dbg!("], max: 0 };

fn source_files() -> Vec<(String, String)> {
    let mut files = Vec::new();
    collect(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut files);
    assert!(!files.is_empty(), "no session sources found");
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

fn check(budget: &Budget) {
    let hits: Vec<(String, usize)> = source_files()
        .into_iter()
        .filter_map(|(path, content)| {
            let count = content
                .lines()
                .filter(|line| budget.patterns.iter().any(|p| line.contains(p)))
                .count();
            (count > 0).then_some((path, count))
        })
        .collect();
    let count: usize = hits.iter().map(|(_, c)| c).sum();
    let listing = hits.iter().map(|(path, c)| format!("  {path}: {c}")).collect::<Vec<_>>().join("\n");
    assert!(
        count <= budget.max,
        "{} budget exceeded: found {count}, max {}.\n{listing}",
        budget.label,
        budget.max
    );
}

#[test]
fn unwrap_budget() {
    check(&MAX_UNWRAP);
}

#[test]
fn expect_budget() {
    check(&MAX_EXPECT);
}

#[test]
fn panic_budget() {
    check(&MAX_PANIC);
}

#[test]
fn silent_discard_budget() {
    check(&MAX_SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    check(&MAX_DOT_OK);
}

#[test]
fn unwrap_or_default_budget() {
    check(&MAX_UNWRAP_OR_DEFAULT);
}

#[test]
fn print_budget() {
    check(&MAX_PRINT);
}
