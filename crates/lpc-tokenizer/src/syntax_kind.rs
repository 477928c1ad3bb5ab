#[allow(non_camel_case_types)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SyntaxKind {
    LINE_COMMENT,
    BLOCK_COMMENT,
    BLANK_LINES,

    NAME,
    TYPE,
    MODIFIER,
    RESERVED,

    IF_KW,
    ELSE_KW,
    FOR_KW,
    FOREACH_KW,
    WHILE_KW,
    DO_KW,
    SWITCH_KW,
    CASE_KW,
    DEFAULT_KW,
    RETURN_KW,
    BREAK_KW,
    CONTINUE_KW,
    INHERIT_KW,

    NUMBER,
    STRING,
    CHAR,
    SYMBOL,
    CLOSURE,
    LAMBDA_INDEXOR,
    CLOSURE_ARG,
    STRUCT_TYPE,
    STRING_BLOCK_START,
    STRING_BLOCK_BODY,
    STRING_BLOCK_END,

    PAREN_START,
    PAREN_END,
    ARRAY_START,
    ARRAY_END,
    MAPPING_START,
    MAPPING_END,
    INLINE_CLOSURE_START,
    INLINE_CLOSURE_END,
    LAMBDA_START,
    LAMBDA_END,
    INDEXOR_START,
    INDEXOR_END,
    LEFT_BRACE,
    RIGHT_BRACE,
    TYPE_CAST,

    SEMICOLON,
    COMMA,
    COLON,
    DOUBLE_COLON,
    QUESTION,
    ARROW,
    DOT,
    ELLIPSIS,
    RANGE,
    FROM_END,
    FOREACH_IN,

    BINARY_OP,
    LOGICAL_OP,
    ASSIGN_OP,
    ARITH_OP,
    UNARY_OP,
    STAR,

    DIRECTIVE,
    DIRECTIVE_KEY,
    DIRECTIVE_ARGUMENT,
    DIRECTIVE_LINE_BREAK,
    DIRECTIVE_END,

    UNKNOWN,
    EOF,
}

impl SyntaxKind {
    pub fn is_comment(self) -> bool {
        matches!(self, Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    pub fn is_operator(self) -> bool {
        matches!(self, Self::BINARY_OP | Self::LOGICAL_OP | Self::ARITH_OP | Self::STAR)
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            Self::NUMBER | Self::STRING | Self::CHAR | Self::SYMBOL | Self::STRING_BLOCK_START
        )
    }
}
