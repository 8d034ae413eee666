pub mod data;
pub mod muster;
pub mod report;
pub mod roster;
pub mod settings;
pub mod stats;
pub mod status;
