mod arena;
mod document;
mod node;

pub use arena::{Arena, Key};
pub use document::Document;
pub use node::{
    CommentKind, ControlFlowKind, IndexorMark, LiteralKind, Node, NodeId, NodeKind,
};
pub use text_size::{TextRange, TextSize};
