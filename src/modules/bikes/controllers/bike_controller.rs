use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::error::AppError;
use crate::middleware::auth::{Admin, Principal};
use crate::modules::bikes::models::BikeDto;
use crate::modules::bikes::services::BikeService;

/// List all bikes
/// GET /api/bikes
pub async fn get_all(
    service: web::Data<Arc<BikeService>>,
    _principal: Principal,
) -> Result<HttpResponse, AppError> {
    let bikes = service.get_all().await?;
    Ok(HttpResponse::Ok().json(bikes))
}

/// Get bike by ID
/// GET /api/bikes/{id}
pub async fn get_by_id(
    service: web::Data<Arc<BikeService>>,
    _principal: Principal,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let bike = service.get_by_id(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(bike))
}

/// Register a bike for repair
/// POST /api/bikes/save
pub async fn add_bike(
    service: web::Data<Arc<BikeService>>,
    _admin: Admin,
    request: web::Json<BikeDto>,
) -> Result<HttpResponse, AppError> {
    let bike = service.add_bike(request.into_inner()).await?;
    Ok(HttpResponse::Created().json(bike))
}

/// Merge the request fields into an existing bike
/// PUT /api/bikes/{id}
pub async fn update_bike(
    service: web::Data<Arc<BikeService>>,
    _admin: Admin,
    path: web::Path<i64>,
    request: web::Json<BikeDto>,
) -> Result<HttpResponse, AppError> {
    let bike = service
        .update_bike(path.into_inner(), request.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(bike))
}

/// DELETE /api/bikes/{id}
pub async fn delete_bike(
    service: web::Data<Arc<BikeService>>,
    _admin: Admin,
    path: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    service.delete_bike(path.into_inner()).await?;
    Ok(HttpResponse::Accepted().finish())
}

/// Configure bike routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/bikes")
            .route("", web::get().to(get_all))
            .route("/save", web::post().to(add_bike))
            .route("/{id}", web::get().to(get_by_id))
            .route("/{id}", web::put().to(update_bike))
            .route("/{id}", web::delete().to(delete_bike)),
    );
}
