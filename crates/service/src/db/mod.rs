pub mod company_service;
pub mod invoice_service;
pub mod industry_service;
