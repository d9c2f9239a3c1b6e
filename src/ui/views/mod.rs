pub mod deck;
pub mod history;
pub mod library;
pub mod setup;

pub use deck::DeckView;
pub use history::HistoryView;
pub use library::LibraryView;
pub use setup::SetupView;
