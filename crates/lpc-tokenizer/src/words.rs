use crate::SyntaxKind::{self, *};

const MODIFIERS: &[&str] = &[
    "private",
    "protected",
    "static",
    "public",
    "nomask",
    "varargs",
    "deprecated",
    "nosave",
    "virtual",
];

const TYPES: &[&str] = &[
    "int", "string", "status", "object", "array", "mapping", "closure", "symbol", "float", "mixed",
    "struct", "union", "null", "void", "class",
];

/// Type words that may also name a variable (`int status;`).
const TYPES_ALLOWED_AS_NAMES: &[&str] = &["status", "symbol", "null"];

pub(crate) const DIRECTIVES: &[&str] = &[
    "include", "define", "ifdef", "ifndef", "if", "else", "elif", "endif", "undef", "line", "echo",
    "pragma",
];

const RESERVED_WORDS: &[&str] = &[
    "enum", "char", "double", "typdef", "unsigned", "register", "global", "extern", "goto",
];

/// Longest first, so `>>>=` wins over `>>=` over `>=` over `>`.
pub(crate) const OPERATORS: &[(&str, SyntaxKind)] = &[
    (">>>=", ASSIGN_OP),
    (">>=", ASSIGN_OP),
    ("<<=", ASSIGN_OP),
    ("&&=", ASSIGN_OP),
    ("||=", ASSIGN_OP),
    ("+=", ASSIGN_OP),
    ("-=", ASSIGN_OP),
    ("&=", ASSIGN_OP),
    ("|=", ASSIGN_OP),
    ("^=", ASSIGN_OP),
    ("*=", ASSIGN_OP),
    ("%=", ASSIGN_OP),
    ("/=", ASSIGN_OP),
    ("++", ASSIGN_OP),
    ("--", ASSIGN_OP),
    ("==", BINARY_OP),
    ("!=", BINARY_OP),
    ("<=", BINARY_OP),
    (">=", BINARY_OP),
    ("<<", BINARY_OP),
    (">>", BINARY_OP),
    ("||", LOGICAL_OP),
    ("&&", LOGICAL_OP),
    ("=", ASSIGN_OP),
    ("<", BINARY_OP),
    (">", BINARY_OP),
    ("*", STAR),
    ("+", ARITH_OP),
    ("-", ARITH_OP),
    ("/", ARITH_OP),
    ("%", ARITH_OP),
    ("&", ARITH_OP),
    ("|", ARITH_OP),
    ("^", ARITH_OP),
    ("!", UNARY_OP),
    ("~", UNARY_OP),
];

/// Modifiers are checked before types, types before keywords, and anything
/// left over is an identifier.
pub(crate) fn classify(word: &str) -> SyntaxKind {
    if MODIFIERS.contains(&word) {
        return MODIFIER;
    }
    if TYPES.contains(&word) {
        return TYPE;
    }

    match word {
        "if" => IF_KW,
        "else" => ELSE_KW,
        "for" => FOR_KW,
        "foreach" => FOREACH_KW,
        "while" => WHILE_KW,
        "do" => DO_KW,
        "switch" => SWITCH_KW,
        "case" => CASE_KW,
        "default" => DEFAULT_KW,
        "return" => RETURN_KW,
        "break" => BREAK_KW,
        "continue" => CONTINUE_KW,
        "inherit" => INHERIT_KW,
        _ if RESERVED_WORDS.contains(&word) => RESERVED,
        _ => NAME,
    }
}

pub fn is_type_allowed_as_name(word: &str) -> bool {
    TYPES_ALLOWED_AS_NAMES.contains(&word)
}
