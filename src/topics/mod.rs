pub mod table;

pub use table::{TopicExtractor, TopicTable, TopicTag, TopicTagSet};
