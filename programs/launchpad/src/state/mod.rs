pub mod campaign;
pub mod ledger;
pub mod launch_record;

pub use campaign::*;
pub use ledger::*;
pub use launch_record::*;
