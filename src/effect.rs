#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    LoadCatalog { limit: usize },
}
