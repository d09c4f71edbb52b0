use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorDetail { pub message: String, pub status: u16 }

#[derive(ToSchema)]
pub struct ErrorBody { pub error: ErrorDetail }

#[derive(ToSchema)]
pub struct CreateCompanyDoc { pub code: String, pub name: String, pub description: Option<String> }

#[derive(ToSchema)]
pub struct UpdateCompanyDoc { pub name: String, pub description: Option<String> }

/// `amt` may also be sent as a numeric string.
#[derive(ToSchema)]
pub struct CreateInvoiceDoc { pub comp_code: String, pub amt: f64 }

#[derive(ToSchema)]
pub struct UpdateInvoiceDoc { pub amt: f64, pub paid: Option<bool> }

#[derive(ToSchema)]
pub struct CreateIndustryDoc { pub code: String, pub industry: String }

#[derive(ToSchema)]
#[allow(non_snake_case)]
pub struct AssociateDoc { pub compCode: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::companies::list,
        crate::routes::companies::get,
        crate::routes::companies::create,
        crate::routes::companies::update,
        crate::routes::companies::delete,
        crate::routes::invoices::list,
        crate::routes::invoices::get,
        crate::routes::invoices::create,
        crate::routes::invoices::update,
        crate::routes::invoices::delete,
        crate::routes::industries::list,
        crate::routes::industries::create,
        crate::routes::industries::associate,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorDetail,
            ErrorBody,
            CreateCompanyDoc,
            UpdateCompanyDoc,
            CreateInvoiceDoc,
            UpdateInvoiceDoc,
            CreateIndustryDoc,
            AssociateDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "companies"),
        (name = "invoices"),
        (name = "industries")
    )
)]
pub struct ApiDoc;
