pub mod companies_house;
pub mod sec_edgar;
pub mod traits;

pub use companies_house::CompaniesHouseAdapter;
pub use sec_edgar::SecEdgarAdapter;
pub use traits::{AdapterError, RegistryAdapter};
