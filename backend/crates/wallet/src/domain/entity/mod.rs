pub mod evacuation;
pub mod wallet;

pub use evacuation::EvacuationRecord;
pub use wallet::{AnalyticsPoint, Paginated, Wallet, WalletAnalytics, WalletSummary};
