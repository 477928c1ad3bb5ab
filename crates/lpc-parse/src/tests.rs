use std::fs;
use std::path::{Path, PathBuf};

use expect_test::expect_file;
use lpc_ast::{Document, NodeId, NodeKind, TextSize};

use crate::parse;

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "lpc" {
                    let expected = path.with_extension("ast");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

#[test]
fn parse_test_data() {
    let test_cases = TestCase::list();
    assert!(!test_cases.is_empty());

    for case in test_cases {
        let actual = match parse(&case.text) {
            Ok(document) => document.debug_tree(),
            Err(err) => panic!("{}: {err} at {:?}", case.input.display(), err.offset()),
        };
        expect_file![&case.expected].assert_eq(&actual);
    }
}

fn root_kinds(text: &str) -> Vec<&'static str> {
    let document = parse(text).unwrap();
    document.roots().iter().map(|&root| document.kind(root).name()).collect()
}

#[test]
fn mismatched_closer_reports_its_offset() {
    let err = parse("(( 1, 2 })").unwrap_err();
    assert_eq!(err.offset(), TextSize::new(8));
    assert_eq!(err.message(), "expected `,` or `)`, found `}`");
}

#[test]
fn unclosed_bracket_at_end_of_file() {
    let err = parse("x = ({ 1").unwrap_err();
    assert_eq!(err.message(), "unexpected end of file, a bracket is still open");
}

#[test]
fn comma_in_if_condition_is_rejected() {
    let err = parse("if (a, b) x;").unwrap_err();
    assert_eq!(err.offset(), TextSize::new(5));
}

/// Writes every binary and logical node of the first root with explicit
/// parentheses.
fn grouping(text: &str) -> String {
    fn walk(document: &Document, id: NodeId) -> String {
        match document.kind(id) {
            NodeKind::Binary { left, op, right, .. } | NodeKind::Logical { left, op, right } => {
                let (left, right) = (walk(document, *left), walk(document, *right));
                format!("({left} {} {right})", document.slice(*op))
            }
            _ => document.source(id).to_owned(),
        }
    }

    let document = parse(&format!("{text};")).unwrap();
    walk(&document, document.roots()[0])
}

#[test]
fn precedence_matrix() {
    let cases = [
        ("a + b * c", "(a + (b * c))"),
        ("a * b + c", "((a * b) + c)"),
        ("a - b - c", "((a - b) - c)"),
        ("a * b / c", "((a * b) / c)"),
        ("a + b + c + d", "(((a + b) + c) + d)"),
        ("a * b / c % d", "(((a * b) / c) % d)"),
        ("a - b * c + d", "((a - (b * c)) + d)"),
        ("a * b + c * d", "((a * b) + (c * d))"),
        ("a + b * c * d - e", "((a + ((b * c) * d)) - e)"),
        ("a < b == c", "((a < b) == c)"),
        ("a | b ^ c & d", "(a | (b ^ (c & d)))"),
        ("a || b && c || d", "((a || (b && c)) || d)"),
        ("a && b && c && d", "(((a && b) && c) && d)"),
    ];
    for (text, expected) in cases {
        assert_eq!(grouping(text), expected, "{text}");
    }
}

#[test]
fn logical_operators_bind_looser_than_comparisons() {
    let document = parse("a < b && c == d || e;").unwrap();
    let root = document.roots()[0];
    let NodeKind::Logical { left, right, op } = document.kind(root) else {
        panic!("expected a logical node");
    };
    assert_eq!(document.slice(*op), "||");
    assert_eq!(document.source(*left), "a < b && c == d");
    assert_eq!(document.source(*right), "e");
}

#[test]
fn explicit_plus_is_not_implied() {
    let document = parse(r#"s = "a" + "b";"#).unwrap();
    let root = document.roots()[0];
    let NodeKind::Assignment { right: Some(right), .. } = document.kind(root) else {
        panic!("expected an assignment");
    };
    assert!(matches!(document.kind(*right), NodeKind::Binary { implied: false, .. }));
}

#[test]
fn typeless_function_and_prototype() {
    assert_eq!(root_kinds("test() { int i=0; return 1; }"), ["Function"]);
    assert_eq!(root_kinds("void reset(int arg);"), ["Function"]);
    assert_eq!(root_kinds("query(int arg);"), ["Function"]);
    assert_eq!(root_kinds("query(arg);"), ["Call"]);
}

#[test]
fn type_word_used_as_a_name() {
    assert_eq!(root_kinds("status = 1;"), ["Assignment"]);
    assert_eq!(root_kinds("status ok;"), ["VarDecl"]);
}

#[test]
fn blank_lines_collapse_between_statements() {
    assert_eq!(root_kinds("\n\nx;\n\n\n\ny;\n\n"), ["Identifier", "BlankLine", "Identifier"]);
}

#[test]
fn else_binds_across_blank_lines() {
    let document = parse("if (a) {\n}\n\nelse {\n}\n").unwrap();
    assert_eq!(document.roots().len(), 1);
    let NodeKind::If { alternate, .. } = document.kind(document.roots()[0]) else {
        panic!("expected an if");
    };
    assert!(alternate.is_some());
}

#[test]
fn statements_and_closures() {
    let text = r#"
create() {
    foreach (string key, mixed value in data) write(key);
    for (int i = 0; i < 3; i++) { }
    do { x--; } while (x);
    switch (x) {
    case 1 .. 2:
        break;
    default:
        return;
    }
    f = lambda(({ 'a }), ({ #'+, 'a, 1 }));
    g = (: $1 :);
    h = (<point> x: 1, y: 2);
    ::create();
}
"#;
    assert_eq!(root_kinds(text), ["Function"]);
}

#[test]
fn directive_arguments_keep_one_range_per_line() {
    let document = parse("#define MAX(a, b) \\\n  ((a) > (b) \\\n  ? (a) : (b))\n").unwrap();
    let NodeKind::Directive { name, key, args } = document.kind(document.roots()[0]) else {
        panic!("expected a directive");
    };
    assert_eq!(document.slice(*name), "define");
    assert_eq!(key.map(|key| document.slice(key)), Some("MAX(a, b)"));
    let args: Vec<_> = args.iter().map(|&arg| document.slice(arg)).collect();
    assert_eq!(args, ["((a) > (b)", "? (a) : (b))"]);
}

#[test]
fn find_node_at_returns_the_deepest_node() {
    let document = parse("x = foo(1);").unwrap();
    let node = document.find_node_at(TextSize::new(9)).unwrap();
    assert_eq!(document.source(node), "1");

    let parent = document.parent(node).unwrap();
    assert!(matches!(document.kind(parent), NodeKind::Call { .. }));
}

#[test]
fn ternary_branches_may_assign() {
    let document = parse("c ? y = 1 : z = 2;").unwrap();
    let NodeKind::Ternary { consequent, alternate, .. } = document.kind(document.roots()[0]) else {
        panic!("expected a ternary");
    };
    assert!(matches!(document.kind(*consequent), NodeKind::Assignment { .. }));
    assert!(matches!(document.kind(*alternate), NodeKind::Assignment { .. }));
    assert_eq!(document.source(*alternate), "z = 2");
}

#[test]
fn statements_end_with_a_comma_or_before_a_brace() {
    assert_eq!(root_kinds(r#"short = "short name", long = "long";"#), ["Assignment", "Assignment"]);
    assert_eq!(root_kinds("string s = a[0..2]"), ["VarDecl"]);
    assert_eq!(root_kinds("void test() { obj->set_weight(1) }"), ["Function"]);

    let err = parse("x() y();").unwrap_err();
    assert_eq!(err.message(), "expected `;`, found `y`");
    assert_eq!(err.offset(), TextSize::new(4));
}

#[test]
fn dot_member_access() {
    let document = parse(r#"animals["bird"].name;"#).unwrap();
    let NodeKind::Member { object, property, dot } = document.kind(document.roots()[0]) else {
        panic!("expected a member access");
    };
    assert!(*dot);
    assert!(matches!(document.kind(*object), NodeKind::Index { .. }));
    assert_eq!(document.source(*property), "name");

    let document = parse("f(alarm.args...);").unwrap();
    let NodeKind::Call { args, .. } = document.kind(document.roots()[0]) else {
        panic!("expected a call");
    };
    assert_eq!(document.kind(args[0]).name(), "Spread");
}

#[test]
fn directives_inside_an_array() {
    let document = parse("x = ({\n#ifndef TEST\n  1, 2,\n  3\n#endif\n});\n").unwrap();
    let NodeKind::Assignment { right: Some(right), .. } = document.kind(document.roots()[0]) else {
        panic!("expected an assignment");
    };
    let NodeKind::Array { elements } = document.kind(*right) else {
        panic!("expected an array");
    };
    let kinds: Vec<_> = elements.iter().map(|&element| document.kind(element).name()).collect();
    assert_eq!(kinds, ["Directive", "Literal", "Literal", "Literal", "Directive"]);
}
