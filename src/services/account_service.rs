use crate::{
    database::Store,
    models::{AuthenticatedUser, CreateAdminRequest, CreateUserRequest, LoginRequest, Role, User, UserView},
    services::parse_object_id,
    utils::{error::AppError, password},
};
use validator::Validate;

fn required(field: Option<&String>) -> Result<String, AppError> {
    field
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("Missing required fields".to_string()))
}

/// Registers an employee account. Role is always `user`.
pub async fn create_user_account(
    store: &dyn Store,
    bcrypt_cost: u32,
    request: &CreateUserRequest,
) -> Result<UserView, AppError> {
    request.validate()?;

    let fullname = required(request.fullname.as_ref())?;
    let email = required(request.email.as_ref())?.to_lowercase();
    let plain = required(request.password.as_ref())?;

    if store
        .find_user_by_email_or_fullname(&email, &fullname)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("Account already exists".to_string()));
    }

    let hashed = password::hash_password(&plain, bcrypt_cost).await?;
    let phone = request.phone.clone().filter(|p| !p.trim().is_empty());

    let mut user = User::new(fullname, email, phone, hashed, Role::User);
    user.service_focus = request.service_focus;

    let user = store.insert_user(user).await?;
    Ok(UserView::from(user))
}

/// Checks credentials and flags the account as active. No session is issued.
pub async fn login(store: &dyn Store, request: &LoginRequest) -> Result<AuthenticatedUser, AppError> {
    if request.validate().is_err() {
        return Err(AppError::InvalidRequest("email and password are required.".to_string()));
    }

    let email = required(request.email.as_ref())?.to_lowercase();
    let plain = request.password.clone().unwrap_or_default();

    let user = store
        .find_user_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;

    if !password::verify_password(&plain, &user.password).await? {
        return Err(AppError::Unauthorized("Invalid email or password.".to_string()));
    }

    if let Some(id) = user.id.as_ref() {
        store.set_user_active(id, true).await?;
    }

    Ok(AuthenticatedUser::from(&user))
}

pub async fn logout(store: &dyn Store, raw_id: &str) -> Result<UserView, AppError> {
    let id = parse_object_id(raw_id, "user")?;

    let mut user = store
        .find_user_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    store.set_user_active(&id, false).await?;
    user.active = false;

    Ok(UserView::from(user))
}

pub async fn list_accounts(store: &dyn Store, roles: &[Role]) -> Result<Vec<UserView>, AppError> {
    let users = store.list_users_by_roles(roles).await?;
    Ok(users.into_iter().map(UserView::from).collect())
}

pub async fn delete_user(store: &dyn Store, raw_id: &str) -> Result<UserView, AppError> {
    let id = parse_object_id(raw_id, "user")?;

    store
        .delete_user(&id)
        .await?
        .map(UserView::from)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

pub async fn create_admin_account(
    store: &dyn Store,
    bcrypt_cost: u32,
    request: &CreateAdminRequest,
) -> Result<UserView, AppError> {
    request.validate()?;

    let role = request
        .role
        .ok_or_else(|| AppError::InvalidRequest("Missing required fields".to_string()))?;

    if !role.is_admin() {
        return Err(AppError::InvalidRequest(
            "role must be admin or super_admin".to_string(),
        ));
    }

    let fullname = required(request.fullname.as_ref())?;
    let email = required(request.email.as_ref())?.to_lowercase();
    let plain = required(request.password.as_ref())?;

    if store.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Account already exists".to_string()));
    }

    let hashed = password::hash_password(&plain, bcrypt_cost).await?;
    let phone = request.phone.clone().filter(|p| !p.trim().is_empty());

    let user = store
        .insert_user(User::new(fullname, email, phone, hashed, role))
        .await?;
    Ok(UserView::from(user))
}
