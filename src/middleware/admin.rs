use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, ResponseError,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::database::DocumentStore;
use crate::services::{auth_service::Claims, user_service};
use crate::utils::AppError;

/// Lets a request through only when the verified caller's stored role is admin.
///
/// Must be wrapped inside [`super::TokenVerifier`] so that [`Claims`] are present.
pub struct AdminGate;

impl<S, B> Transform<S, ServiceRequest> for AdminGate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminGateService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminGateService {
            service: Rc::new(service),
        }))
    }
}

pub struct AdminGateService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdminGateService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let email = req.extensions().get::<Claims>().map(|c| c.email.clone());
            let store = req.app_data::<web::Data<dyn DocumentStore>>().cloned();

            let decision = match (&email, store) {
                (Some(email), Some(store)) => {
                    user_service::require_admin(store.get_ref(), email).await
                }
                (None, _) => Err(AppError::Unauthorized("Missing verified identity".into())),
                (_, None) => Err(AppError::ConfigError("Document store is not configured".into())),
            };

            match decision {
                Ok(()) => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(e) => {
                    log::warn!("🛡️ Admin check failed for '{}': {}", email.unwrap_or_default(), e);
                    Ok(req.into_response(e.error_response()).map_into_right_body())
                }
            }
        })
    }
}
