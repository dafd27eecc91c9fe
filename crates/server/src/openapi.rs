use utoipa::{IntoParams, OpenApi, ToSchema};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Stored ship as returned by every read or write.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ShipDoc {
    pub id: i64,
    pub name: String,
    pub planet: String,
    /// TRANSPORT, MILITARY or MERCHANT
    pub ship_type: String,
    /// epoch milliseconds
    pub prod_date: i64,
    pub is_used: bool,
    pub speed: f64,
    pub crew_size: i32,
    pub rating: f64,
}

/// Create requires every field but `isUsed`; update applies the present ones.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
pub struct ShipPayloadDoc {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<String>,
    pub prod_date: Option<i64>,
    pub is_used: Option<bool>,
    pub speed: Option<f64>,
    pub crew_size: Option<i32>,
}

#[derive(ToSchema)]
pub struct ErrorBody { pub error: String, pub message: String, pub code: u16 }

#[derive(IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct CountParams {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<String>,
    /// epoch milliseconds, inclusive
    pub after: Option<i64>,
    /// epoch milliseconds, inclusive
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
}

#[derive(IntoParams)]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct ListParams {
    pub name: Option<String>,
    pub planet: Option<String>,
    pub ship_type: Option<String>,
    pub after: Option<i64>,
    pub before: Option<i64>,
    pub is_used: Option<bool>,
    pub min_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub min_crew_size: Option<i32>,
    pub max_crew_size: Option<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    /// ID, SPEED, DATE or RATING
    pub order: Option<String>,
    /// 0-based, default 0
    pub page_number: Option<u64>,
    /// default 3
    pub page_size: Option<u64>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::list_ships,
        crate::routes::count_ships,
        crate::routes::create_ship,
        crate::routes::get_ship,
        crate::routes::update_ship,
        crate::routes::delete_ship,
    ),
    components(
        schemas(
            HealthResponse,
            ShipDoc,
            ShipPayloadDoc,
            ErrorBody,
        )
    ),
    tags(
        (name = "health"),
        (name = "ships")
    )
)]
pub struct ApiDoc;
