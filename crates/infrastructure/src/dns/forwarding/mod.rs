pub mod message_builder;
pub mod response_rewriter;

pub use message_builder::MessageBuilder;
pub use response_rewriter::ResponseRewriter;
