pub mod bot;
pub mod classify;
pub mod decide;
pub mod detect;
pub mod document;
pub mod io;
pub mod lines;
pub mod mutate;
pub mod plan;
pub mod registry;
pub mod resolve;
pub mod wikitext;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use bot::{ArticleStore, Bot, BotSettings, CategorySource, Outcome, RunSummary};
pub use classify::{AggregatorClassifier, DefinitionSource, NullSource};
pub use decide::{Decision, Pending, decide};
pub use detect::detect;
pub use document::Document;
pub use io::*;
pub use mutate::{Marker, apply};
pub use plan::InsertionPlan;
pub use registry::{AliasRegistry, CompositeContainer, TrailerKind};
pub use resolve::resolve;
