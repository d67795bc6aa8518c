pub mod use_cases;

pub use use_cases::{
    create_user::{CreateUserError, CreateUserUseCase},
    fetch_users::{FetchUsersError, FetchUsersUseCase, UserFilter},
    obtain_token::{ObtainTokenError, ObtainTokenUseCase},
    refresh_token::{RefreshTokenError, RefreshTokenUseCase},
    update_password::{UpdatePasswordError, UpdatePasswordUseCase},
};
