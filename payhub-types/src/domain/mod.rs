//! Domain models for the PayHub adapter.

pub mod address;
pub mod card;
pub mod merchant;
pub mod money;
pub mod response;

pub use address::{Address, Customer};
pub use card::CreditCard;
pub use merchant::MerchantContext;
pub use money::Money;
pub use response::{AvsResult, CvvResult, GatewayResponse};
