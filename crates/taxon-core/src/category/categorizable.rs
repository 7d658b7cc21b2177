//! Consumers that carry a category.

use super::descriptor::Descriptor;

/// Something classified by exactly one category, e.g. an item or entity.
///
/// Implementors store the descriptor they were handed and never mutate the
/// hierarchy.
pub trait Categorizable {
    fn category(&self) -> Option<&Descriptor>;

    fn categorize(&mut self, descriptor: Descriptor);

    /// False until categorized.
    fn is_category_of(&self, category: &str) -> bool {
        self.category()
            .is_some_and(|descriptor| descriptor.is_category_of(category))
    }
}
