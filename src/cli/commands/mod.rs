pub mod check;
pub mod replay;
pub mod schema;
pub mod states;
pub mod transitions;

pub use check::CheckCommand;
pub use replay::ReplayCommand;
pub use schema::SchemaCommand;
pub use states::StatesCommand;
pub use transitions::TransitionsCommand;
