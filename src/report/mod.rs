// Report module
// Month arithmetic and the returning-supporters report

pub mod months;
pub mod returning;
pub mod status;

pub use returning::write_returning_report;
pub use status::{PaymentHistory, SupporterHistories, SupporterStatus};
