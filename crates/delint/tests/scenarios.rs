//! End-to-end linting of in-memory sources: parse with tree-sitter, lint
//! with the recommended rules, render in the `file (line,col): message` form.

use delint::rules::{recommended_rules, IfBodyBlock, LoopBodyBlock, StrictEquality};
use delint::ts::{Dialect, EcmaParser, SourceParser};
use delint::{
    lint_source, Diagnostic, Finding, LineIndex, Linter, Node, ReportAnchor, SourceFile,
};

fn parse(name: &str, src: &str) -> SourceFile {
    let dialect = Dialect::from_path(std::path::Path::new(name)).unwrap_or(Dialect::TypeScript);
    EcmaParser::new(dialect)
        .parse(name, src)
        .expect("source should parse")
}

fn linter() -> Linter {
    Linter::builder().rules(recommended_rules()).build()
}

fn render(file: &SourceFile, diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(|d| d.render(&file.name))
        .collect::<Vec<_>>()
        .join("\n")
}

const FIXTURE: &[&str] = &[
    "function check(items, flag) {",
    "  for (const k in items)",
    "    if (items[k] == flag) return k;",
    "    else if (items[k] != null) continue;",
    "    else break;",
    "  while (flag) flag = !flag;",
    "  do { flag = items.length == 0; } while (false);",
    "  for (const x of items) console.log(x);",
    "  if (flag) {",
    "    return null;",
    "  } else return undefined;",
    "}",
];

// ── Scenarios ──

#[test]
fn loop_without_block() {
    let diagnostics =
        lint_source("loop.ts", "for (let i = 0; i < 1; i++) console.log(i);").unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message,
        "A looping statement's contents should be wrapped in a block body."
    );
    insta::assert_snapshot!(
        diagnostics[0].render("loop.ts"),
        @"loop.ts (1,1): A looping statement's contents should be wrapped in a block body."
    );
}

#[test]
fn else_if_chain_only_flags_bare_else() {
    let diagnostics =
        lint_source("chain.ts", "if (x) { a(); } else if (y) { b(); } else c();").unwrap();
    assert_eq!(diagnostics.len(), 1);
    insta::assert_snapshot!(
        diagnostics[0].render("chain.ts"),
        @"chain.ts (1,42): Else statement's contents should be wrapped in a block body."
    );
}

#[test]
fn token_start_anchor_skips_leading_trivia() {
    let file = parse("chain.ts", "if (x) { a(); } else if (y) { b(); } else c();");
    let diagnostics = Linter::builder()
        .rules(recommended_rules())
        .anchor(ReportAnchor::TokenStart)
        .build()
        .check(&file)
        .unwrap();
    insta::assert_snapshot!(
        render(&file, &diagnostics),
        @"chain.ts (1,43): Else statement's contents should be wrapped in a block body."
    );
}

#[test]
fn nested_loop_reported_where_its_trivia_starts() {
    let diagnostics = lint_source("nested.ts", "while (a)\n  for (;;) b();").unwrap();
    let lines: Vec<String> = diagnostics.iter().map(|d| d.render("nested.ts")).collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    nested.ts (1,1): A looping statement's contents should be wrapped in a block body.
    nested.ts (1,10): A looping statement's contents should be wrapped in a block body.
    ");
}

#[test]
fn loose_equality_with_block_body() {
    let diagnostics = lint_source("eq.ts", "if (a == b) {}").unwrap();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(
        diagnostics[0].message,
        "Use strict equality and inequality operators."
    );
    assert_eq!(diagnostics[0].rule, "strict-equality");
}

#[test]
fn clean_input_has_no_diagnostics() {
    let diagnostics = lint_source(
        "clean.ts",
        "for (let i = 0; i < 1; i++) { f(); } if (a === b) {}",
    )
    .unwrap();
    assert!(diagnostics.is_empty());
}

#[test]
fn multi_line_fixture() {
    let file = parse("fixture.js", &FIXTURE.join("\n"));
    let diagnostics = linter().check(&file).unwrap();
    insta::assert_snapshot!(render(&file, &diagnostics), @r"
    fixture.js (1,30): A looping statement's contents should be wrapped in a block body.
    fixture.js (3,26): An if statement's contents should be wrapped in a block body.
    fixture.js (3,9): Use strict equality and inequality operators.
    fixture.js (4,31): An if statement's contents should be wrapped in a block body.
    fixture.js (5,9): Else statement's contents should be wrapped in a block body.
    fixture.js (4,14): Use strict equality and inequality operators.
    fixture.js (5,16): A looping statement's contents should be wrapped in a block body.
    fixture.js (7,14): Use strict equality and inequality operators.
    fixture.js (11,9): Else statement's contents should be wrapped in a block body.
    ");
}

#[test]
fn ancestor_diagnostics_precede_descendants_regardless_of_rule_order() {
    let file = parse("order.ts", "if (x == 1) y(); else z();");
    let diagnostics = Linter::builder()
        .rule(StrictEquality::new())
        .rule(IfBodyBlock::new())
        .rule(LoopBodyBlock::new())
        .build()
        .check(&file)
        .unwrap();
    let messages: Vec<&str> = diagnostics.iter().map(|d| d.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            "An if statement's contents should be wrapped in a block body.",
            "Else statement's contents should be wrapped in a block body.",
            "Use strict equality and inequality operators.",
        ]
    );
}

// ── Properties ──

/// Recursive pre-order evaluation of the same rules, used as an oracle
/// for the linter's explicit-stack traversal.
fn recursive_findings(node: &Node, out: &mut Vec<Finding>) {
    for rule in recommended_rules() {
        rule.check(node, out);
    }
    for child in node.children() {
        recursive_findings(child, out);
    }
}

#[test]
fn matches_recursive_pre_order() {
    let file = parse("fixture.js", &FIXTURE.join("\n"));
    let mut expected = Vec::new();
    recursive_findings(&file.root, &mut expected);

    let actual = linter().check(&file).unwrap();
    assert_eq!(actual.len(), expected.len());
    for (d, f) in actual.iter().zip(&expected) {
        assert_eq!(d.offset, f.full_start);
        assert_eq!(d.message, f.message);
    }
}

#[test]
fn very_long_comparison_chain() {
    let terms = 10_000;
    let src = format!("x{};", " == x".repeat(terms));
    let diagnostics = lint_source("deep.js", &src).unwrap();
    assert_eq!(diagnostics.len(), terms);
    // outermost comparison first, innermost last
    assert_eq!(diagnostics[0].offset, 0);
    assert_eq!(diagnostics[0].length, src.len() - 1);
    assert_eq!(diagnostics[terms - 1].length, "x == x".len());

    let sum = format!("x{};", " + x".repeat(terms));
    assert!(lint_source("sum.js", &sum).unwrap().is_empty());
}

#[test]
fn linting_is_idempotent() {
    let file = parse("fixture.js", &FIXTURE.join("\n"));
    let linter = linter();
    let first: Vec<_> = linter.lint_file(&file).collect();
    let second: Vec<_> = linter.lint_file(&file).collect();
    assert_eq!(first, second);
}

#[test]
fn positions_round_trip_to_offsets() {
    let file = parse("fixture.js", &FIXTURE.join("\r\n"));
    let index = LineIndex::new(&file.text);
    let diagnostics = linter().check(&file).unwrap();
    assert_eq!(diagnostics.len(), 9);
    for d in &diagnostics {
        assert_eq!(index.offset_of(d.position), Ok(d.offset));
    }
}

#[test]
fn early_abandonment_is_harmless() {
    let file = parse("fixture.js", &FIXTURE.join("\n"));
    let linter = linter();
    let first_two: Vec<_> = linter.lint_file(&file).take(2).collect();
    let all: Vec<_> = linter.lint_file(&file).collect();
    assert_eq!(first_two[..], all[..2]);
}

#[test]
fn diagnostics_serialize_to_json() {
    let diagnostics = lint_source("eq.ts", "if (a == b) {}").unwrap();
    let json = serde_json::to_value(&diagnostics[0]).unwrap();
    assert_eq!(json["code"], "DL003");
    assert_eq!(json["offset"], 4);
    assert_eq!(json["position"]["line"], 0);
}
