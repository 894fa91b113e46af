pub mod entities;
pub mod script;
pub mod stage;
pub mod workspace;
