use crate::core::AppError;
use crate::core::Result as AppResult;
use crate::modules::users::{AppUser, CredentialStore, Role};
use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderValue, AUTHORIZATION, WWW_AUTHENTICATE},
    web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2, PasswordHash, PasswordVerifier,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;

/// Paths reachable without credentials
const PUBLIC_PATHS: &[&str] = &["/health", "/ready"];

/// HTTP Basic authentication middleware
///
/// Resolves the caller against a [`CredentialStore`] and stores the
/// resulting [`Principal`] in request extensions. Role checks happen in the
/// handlers.
#[derive(Clone)]
pub struct BasicAuth {
    store: Arc<dyn CredentialStore>,
    challenge: HeaderValue,
}

impl BasicAuth {
    pub fn new(store: Arc<dyn CredentialStore>, realm: &str) -> AppResult<Self> {
        let challenge = HeaderValue::from_str(&format!("Basic realm=\"{}\"", realm))
            .map_err(|_| AppError::Configuration(format!("Invalid auth realm: {}", realm)))?;

        Ok(Self { store, challenge })
    }
}

impl<S, B> Transform<S, ServiceRequest> for BasicAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = BasicAuthMiddleware<S>;
    type Future = Ready<std::result::Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BasicAuthMiddleware {
            service: Rc::new(service),
            store: self.store.clone(),
            challenge: self.challenge.clone(),
        }))
    }
}

pub struct BasicAuthMiddleware<S> {
    service: Rc<S>,
    store: Arc<dyn CredentialStore>,
    challenge: HeaderValue,
}

impl<S, B> Service<ServiceRequest> for BasicAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, std::result::Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let store = self.store.clone();
        let challenge = self.challenge.clone();

        Box::pin(async move {
            if PUBLIC_PATHS.contains(&req.path()) {
                return svc.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .map(str::to_owned);

            match authenticate(store.as_ref(), header.as_deref()).await {
                Ok(principal) => {
                    tracing::debug!(
                        username = %principal.username,
                        role = %principal.role,
                        "Request authenticated"
                    );
                    req.extensions_mut().insert(principal);
                    svc.call(req).await.map(ServiceResponse::map_into_left_body)
                }
                Err(err) => {
                    tracing::info!(path = %req.path(), error = %err, "Authentication rejected");
                    let mut response = err.error_response();
                    if let AppError::Unauthorized(_) = err {
                        response.headers_mut().insert(WWW_AUTHENTICATE, challenge);
                    }
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Resolve an `Authorization` header value into a principal
pub async fn authenticate(
    store: &dyn CredentialStore,
    header: Option<&str>,
) -> AppResult<Principal> {
    let header = header.ok_or_else(|| AppError::unauthorized("Missing Authorization header"))?;
    let (username, password) = parse_basic_credentials(header)?;

    let user = store
        .find_by_username(&username)
        .await?
        .ok_or_else(|| AppError::unauthorized("Invalid username or password"))?;

    // Argon2 is CPU-bound; keep it off the worker thread
    let password_hash = user.password_hash.clone();
    let verified = web::block(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| AppError::internal(format!("Password verification aborted: {}", e)))??;

    if !verified {
        return Err(AppError::unauthorized("Invalid username or password"));
    }

    Ok(Principal {
        username: user.username,
        role: user.role,
    })
}

/// Split `Basic base64(user:pass)` into its parts
pub fn parse_basic_credentials(header: &str) -> AppResult<(String, String)> {
    let encoded = header
        .strip_prefix("Basic ")
        .or_else(|| header.strip_prefix("basic "))
        .ok_or_else(|| AppError::unauthorized("Unsupported authorization scheme"))?;

    let decoded = STANDARD
        .decode(encoded.trim())
        .map_err(|_| AppError::unauthorized("Malformed Basic credentials"))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| AppError::unauthorized("Malformed Basic credentials"))?;

    let (username, password) = decoded
        .split_once(':')
        .ok_or_else(|| AppError::unauthorized("Malformed Basic credentials"))?;

    if username.is_empty() {
        return Err(AppError::unauthorized("Malformed Basic credentials"));
    }

    Ok((username.to_string(), password.to_string()))
}

/// The authenticated caller, available to handlers as an extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub username: String,
    pub role: Role,
}

impl Principal {
    pub fn require_role(&self, required: Role) -> AppResult<()> {
        if self.role.satisfies(required) {
            Ok(())
        } else {
            Err(AppError::forbidden(format!(
                "Role {} required, {} has {}",
                required, self.username, self.role
            )))
        }
    }
}

impl FromRequest for Principal {
    type Error = AppError;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(principal_of(req))
    }
}

fn principal_of(req: &HttpRequest) -> AppResult<Principal> {
    req.extensions()
        .get::<Principal>()
        .cloned()
        .ok_or_else(|| AppError::unauthorized("Authentication required"))
}

/// A principal holding the ADMIN role.
///
/// Resolves without touching the request body, so placing it before a
/// `web::Json` argument rejects readers before their payload is parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admin(pub Principal);

impl FromRequest for Admin {
    type Error = AppError;
    type Future = Ready<std::result::Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(principal_of(req).and_then(|principal| {
            principal.require_role(Role::Admin)?;
            Ok(Admin(principal))
        }))
    }
}

/// Hash a password with the default Argon2id parameters
pub fn hash_password(password: &str) -> AppResult<String> {
    hash_password_with(&Argon2::default(), password)
}

/// Hash a password with caller-chosen Argon2 parameters
pub fn hash_password_with(argon2: &Argon2<'_>, password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::internal(format!("Failed to hash password: {}", e)))
}

/// Verify a password against a PHC hash, using the parameters stored in the hash
pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Hash `password` and store the account, replacing any previous one
pub async fn provision_user(
    store: &dyn CredentialStore,
    username: &str,
    password: &str,
    role: Role,
) -> AppResult<()> {
    let password_hash = hash_password(password)?;
    store
        .upsert(&AppUser::new(username, password_hash, role))
        .await?;

    tracing::info!(username = %username, role = %role, "Provisioned account");
    Ok(())
}
