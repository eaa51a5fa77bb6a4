pub mod grades;
pub mod ledger;
pub mod session;
