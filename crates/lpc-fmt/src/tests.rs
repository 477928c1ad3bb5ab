use expect_test::{Expect, expect};
use lpc_ast::TextSize;

use crate::{FormatOptions, format};

fn check_with(options: &FormatOptions, input: &str, expected: Expect) {
    let actual = match format(input, options) {
        Ok(formatted) => formatted,
        Err(err) => panic!("{err} at {:?}", err.offset()),
    };
    expected.assert_eq(&actual);

    let again = format(&actual, options).unwrap();
    assert_eq!(again, actual, "formatting is not idempotent");
}

fn check(input: &str, expected: Expect) {
    check_with(&FormatOptions::default(), input, expected);
}

#[test]
fn single_statement_body_stays_on_one_line() {
    check(
        "string set_s(string s){return foo=s;}",
        expect![[r#"
            string set_s(string s) { return foo = s; }
        "#]],
    );
    check(
        "query_s ( ) {return s;}",
        expect![[r#"
            query_s() { return s; }
        "#]],
    );
}

#[test]
fn two_statement_body_breaks() {
    check(
        "test() { int i=0; return 1; }",
        expect![[r#"
            test() {
              int i = 0;
              return 1;
            }
        "#]],
    );
}

#[test]
fn condensing_can_be_switched_off() {
    let options = FormatOptions { condense_single_statement_blocks: false, ..Default::default() };
    check_with(
        &options,
        "string set_s(string s){return foo=s;}",
        expect![[r#"
            string set_s(string s) {
              return foo = s;
            }
        "#]],
    );
}

#[test]
fn tabs_replace_indentation() {
    let options = FormatOptions {
        use_tabs: true,
        condense_single_statement_blocks: false,
        ..Default::default()
    };
    let formatted = format("string set_s(string s){return foo=s;}", &options).unwrap();
    assert_eq!(formatted, "string set_s(string s) {\n\treturn foo = s;\n}\n");
}

#[test]
fn pair_variable_prints_two_per_line() {
    check(
        r#"test() { dest_dir = ({ "room1", "north", "room2", "south" }); }"#,
        expect![[r#"
            test() {
              dest_dir = ({
                "room1", "north",
                "room2", "south",
              });
            }
        "#]],
    );
}

#[test]
fn odd_length_array_never_pairs() {
    check(
        r#"test() { dest_dir = ({ "room1", "north", "room2" }); }"#,
        expect![[r#"
            test() { dest_dir = ({"room1", "north", "room2"}); }
        "#]],
    );
}

#[test]
fn unrelated_name_uses_fill() {
    check(
        r#"test() { exits = ({ "room1", "north", "room2", "south" }); }"#,
        expect![[r#"
            test() { exits = ({"room1", "north", "room2", "south"}); }
        "#]],
    );
}

#[test]
fn configured_pair_variables_add_to_the_builtins() {
    let options = FormatOptions { pair_variables: vec!["exits".to_owned()], ..Default::default() };
    assert!(options.is_pair_variable("dest_dir"));
    assert!(options.is_pair_variable("items"));

    check_with(
        &options,
        r#"test() { exits = ({ "room1", "north", "room2", "south" }); }"#,
        expect![[r#"
            test() {
              exits = ({
                "room1", "north",
                "room2", "south",
              });
            }
        "#]],
    );
}

#[test]
fn marker_comment_turns_on_pairs() {
    check(
        "test() {\n  // @prettier-pair\n  x = ({ 1, 2, 3, 4 });\n}\n",
        expect![[r#"
            test() {
              // @prettier-pair
              x = ({
                1, 2,
                3, 4,
              });
            }
        "#]],
    );
}

#[test]
fn array_cast_spacing() {
    check(
        "string *dirs = (string *) env->query_dest_dir();",
        expect![[r#"
            string *dirs = (string*)env->query_dest_dir();
        "#]],
    );
    check(
        "string * dirs = obj->fn( (string *) env->query_dest_dir() );",
        expect![[r#"
            string *dirs = obj->fn((string*)env->query_dest_dir());
        "#]],
    );
}

#[test]
fn array_elements_fill_lines() {
    let options = FormatOptions { print_width: 20, ..Default::default() };
    check_with(
        &options,
        r#"set_items(({ "aaaa", "bbbb", "cccc" }));"#,
        expect![[r#"
            set_items(({
              "aaaa", "bbbb",
              "cccc"
            }));
        "#]],
    );

    let options = FormatOptions { trailing_comma: true, ..options };
    check_with(
        &options,
        r#"set_items(({ "aaaa", "bbbb", "cccc" }));"#,
        expect![[r#"
            set_items(({
              "aaaa", "bbbb",
              "cccc",
            }));
        "#]],
    );
}

#[test]
fn single_collection_argument_hugs_the_call() {
    check(
        "foo(({ 1, 2 }));\nm = ([ \"k\": 1; 2, \"j\" ]);\nx = ({});\n",
        expect![[r#"
            foo(({1, 2}));
            m = (["k": 1; 2, "j"]);
            x = ({});
        "#]],
    );
}

#[test]
fn operators_keep_their_grouping() {
    check(
        "x = a+b*c;\ny = a-b-c;\n",
        expect![[r#"
            x = a + b * c;
            y = a - b - c;
        "#]],
    );
}

#[test]
fn implied_concatenation_prints_without_operator() {
    check(
        r#"s = "a" "b" + c;"#,
        expect![[r#"
            s = "a" "b" + c;
        "#]],
    );
}

#[test]
fn ternary_and_logical() {
    check(
        r#"printf("Foo is %s\n", test=="bar" ? "bar" : "notbar");"#,
        expect![[r#"
            printf("Foo is %s\n", test == "bar" ? "bar" : "notbar");
        "#]],
    );
    check(
        "int *arr=filter(arr2,( :($1==1&&$1<10):));",
        expect![[r#"
            int *arr = filter(arr2, (: ($1 == 1 && $1 < 10) :));
        "#]],
    );
}

#[test]
fn closures_and_lambdas() {
    check(
        r#"object *a = filter(all_inventory(room), (: $1->id("something") :));"#,
        expect![[r#"
            object *a = filter(all_inventory(room), (: $1->id("something") :));
        "#]],
    );
    check(
        "f = lambda(({ 'a }), ({ #'+, 'a, 1 }));",
        expect![[r#"
            f = lambda(({'a}), ({#'+, 'a, 1}));
        "#]],
    );
}

#[test]
fn if_else_with_blocks() {
    check(
        "test() { if (a) { x(); } else { y(); } }",
        expect![[r#"
            test() {
              if (a) {
                x();
              } else {
                y();
              }
            }
        "#]],
    );
}

#[test]
fn if_else_without_blocks() {
    check(
        "if (x) return 1;\nelse return 2;\n",
        expect![[r#"
            if (x) return 1;
            else return 2;
        "#]],
    );
}

#[test]
fn loops() {
    check(
        "for (int i=0; i < 10; i++) { }\nfor (;;) { }\n",
        expect![[r#"
            for (int i = 0; i < 10; i++) {  }
            for (;;) {  }
        "#]],
    );
    check(
        "foreach (string key, mixed value in data) write(key);",
        expect![[r#"
            foreach (string key, mixed value in data) write(key);
        "#]],
    );
}

#[test]
fn switch_cases_indent() {
    check(
        "switch (x) { case 1: y(); break; default: return; }",
        expect![[r#"
            switch (x) {
              case 1:
                y();
                break;
              default:
                return;
            }
        "#]],
    );
}

#[test]
fn struct_definition_on_one_line() {
    check(
        "struct coords { int x; int y; };",
        expect![[r#"
            struct coords { int x; int y; };
        "#]],
    );
}

#[test]
fn indexor_ranges() {
    check(
        "string s = a[<1..<2];\nstring t = a[0..2];\n",
        expect![[r#"
            string s = a[<1..<2];
            string t = a[0..2];
        "#]],
    );
}

#[test]
fn declarator_comments_align_the_next_declarator() {
    check(
        "string\n  *arr,\t\t/* OPTIONAL: Array of stuff */\n  code;\t\t\t/* test comment */\n",
        expect![[r#"
            string *arr, /* OPTIONAL: Array of stuff */
                   code; /* test comment */
        "#]],
    );
}

#[test]
fn comments_are_normalised() {
    check(
        "int x; //count\n/* a\n   b */\n/*\n * Only one line\n */\nint y;\n",
        expect![[r#"
            int x; // count
            /* a
             * b */
            /* Only one line */
            int y;
        "#]],
    );
}

#[test]
fn directives_join_or_continue() {
    let input = "#define MAX(a, b) \\\n  ((a) > (b) \\\n  ? (a) : (b))\n";
    check(
        input,
        expect![[r#"
            #define MAX(a, b) ((a) > (b) ? (a) : (b))
        "#]],
    );

    let options = FormatOptions { print_width: 30, ..Default::default() };
    let formatted = format(input, &options).unwrap();
    assert_eq!(formatted, "#define MAX(a, b) \\\n  ((a) > (b) \\\n  ? (a) : (b))\n");
}

#[test]
fn blank_lines_collapse_to_one() {
    check(
        "int a;\n\n\nint b;\n",
        expect![[r#"
            int a;

            int b;
        "#]],
    );
    check("", expect![[""]]);
}

#[test]
fn nested_blocks_break() {
    check(
        "reset(arg) { if (!arg) { set_light(1); } }",
        expect![[r#"
            reset(arg) {
              if (!arg) {
                set_light(1);
              }
            }
        "#]],
    );
}

#[test]
fn parse_errors_pass_through() {
    let err = format("(( 1, 2 })", &FormatOptions::default()).unwrap_err();
    assert_eq!(err.offset(), TextSize::new(8));
}

#[test]
fn short_chain_in_statement_position_stays_flat() {
    check(
        "test() { a() || b() || c(); return 1; }",
        expect![[r#"
            test() {
              a() || b() || c();
              return 1;
            }
        "#]],
    );
    check(
        r#"inherit __DIR__ "file" ".c";"#,
        expect![[r#"
            inherit __DIR__ "file" ".c";
        "#]],
    );
}

#[test]
fn ternary_with_assignments_in_both_branches() {
    check(
        "int test() { gener == 1 ? firstName = males[random(sizeof(males))] : firstName = females[random(sizeof(females))]; return 1; }    ",
        expect![[r#"
            int test() {
              gener == 1
                ? firstName = males[random(sizeof(males))]
                : firstName = females[random(sizeof(females))];
              return 1;
            }
        "#]],
    );
}

#[test]
fn missing_semicolons_are_supplied() {
    check(
        r#"test() { short = "short name", long = "long" + "desc"; }"#,
        expect![[r#"
            test() {
              short = "short name";
              long = "long" + "desc";
            }
        "#]],
    );
    check(
        "string s = a[0..2]",
        expect![[r#"
            string s = a[0..2];
        "#]],
    );
    check(
        "void test() { obj->set_weight(1 + random(avail_weight-1))     }",
        expect![[r#"
            void test() { obj->set_weight(1 + random(avail_weight - 1)); }
        "#]],
    );
}

#[test]
fn dot_member_access_is_kept() {
    check(
        r#"void test() { printf("%O\n", animals["bird"].name);  }"#,
        expect![[r#"
            void test() { printf("%O\n", animals["bird"].name); }
        "#]],
    );
    check(
        r#"debugf(sprintf("Alarm %O: %O called at %s", alarm.args..., ctime())) ;"#,
        expect![[r#"
            debugf(sprintf("Alarm %O: %O called at %s", alarm.args..., ctime()));
        "#]],
    );
}

#[test]
fn directives_inside_an_array_keep_their_own_lines() {
    check(
        "test() { \n      items = ({\n#ifndef TEST\n        1, 2,\n        3\n#endif\n      });\n    }",
        expect![[r#"
            test() {
              items = ({
                #ifndef TEST
                1, 2, 3
                #endif
              });
            }
        "#]],
    );
}
