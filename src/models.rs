mod model_selection;
mod snippet;

pub use model_selection::ModelSelection;
pub use snippet::ContextSnippet;
