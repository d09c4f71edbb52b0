//! SeaORM entities for the BizTime schema plus field validation helpers.

pub mod errors;
pub mod db;
pub mod company;
pub mod invoice;
pub mod industry;
pub mod company_industry;
