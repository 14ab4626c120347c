use crate::{
    api::{ApiClient, ApiError, LoginRequest, RegisterRequest, Role, UserResponse},
    pages::login::repository::LoginRepository,
    state::cache::use_caches,
};
use leptos::*;
use std::rc::Rc;

type AuthContext = (ReadSignal<AuthState>, WriteSignal<AuthState>);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<UserResponse>,
    pub is_authenticated: bool,
    pub loading: bool,
}

impl AuthState {
    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|u| u.role)
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(user: UserResponse) -> Self {
        Self {
            user: Some(user),
            is_authenticated: true,
            loading: false,
        }
    }
}

/// Seeds the auth signal from the persisted session so a reload keeps the
/// user signed in without waiting for the network.
pub fn hydrate_auth_state(api: &ApiClient) -> AuthState {
    match api.session().load() {
        Some(persisted) => match persisted.user {
            Some(user) => AuthState::signed_in(user),
            None => AuthState::signed_out(),
        },
        None => AuthState::signed_out(),
    }
}

fn create_auth_context() -> AuthContext {
    let api_client = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    let (auth_state, set_auth_state) = create_signal(hydrate_auth_state(&api_client));
    let caches = use_caches();

    api_client.set_on_unauthorized(move || {
        log::info!("session rejected by backend, signing out");
        caches.clear_all();
        set_auth_state.set(AuthState::signed_out());
    });

    #[cfg(target_arch = "wasm32")]
    if auth_state.get_untracked().is_authenticated {
        let api = api_client.clone();
        spawn_local(async move {
            match api.get_me().await {
                Ok(user) => set_auth_state.update(|state| state.user = Some(user)),
                Err(err) => log::warn!("could not refresh profile: {}", err),
            }
        });
    }

    (auth_state, set_auth_state)
}

#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let ctx = create_auth_context();
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| create_signal(AuthState::default()))
}

pub async fn login_request(
    request: LoginRequest,
    repo: &LoginRepository,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| state.loading = true);

    match repo.login(request).await {
        Ok(response) => {
            log::info!("signed in as {}", response.user.email);
            set_auth_state.set(AuthState::signed_in(response.user));
            Ok(())
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

pub async fn register_request(
    request: RegisterRequest,
    repo: &LoginRepository,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    set_auth_state.update(|state| state.loading = true);

    match repo.register(request).await {
        Ok(response) => {
            set_auth_state.set(AuthState::signed_in(response.user));
            Ok(())
        }
        Err(error) => {
            set_auth_state.update(|state| state.loading = false);
            Err(error)
        }
    }
}

pub async fn logout(
    repo: &LoginRepository,
    set_auth_state: WriteSignal<AuthState>,
) -> Result<(), ApiError> {
    let result = repo.logout().await;
    set_auth_state.set(AuthState::signed_out());
    result
}

fn login_repository() -> LoginRepository {
    let api = use_context::<ApiClient>().unwrap_or_else(ApiClient::new);
    LoginRepository::new_with_client(Rc::new(api))
}

pub fn use_login_action() -> Action<LoginRequest, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let repo = login_repository();

    create_action(move |request: &LoginRequest| {
        let payload = request.clone();
        let repo = repo.clone();
        async move { login_request(payload, &repo, set_auth).await }
    })
}

pub fn use_register_action() -> Action<RegisterRequest, Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let repo = login_repository();

    create_action(move |request: &RegisterRequest| {
        let payload = request.clone();
        let repo = repo.clone();
        async move { register_request(payload, &repo, set_auth).await }
    })
}

pub fn use_logout_action() -> Action<(), Result<(), ApiError>> {
    let (_auth, set_auth) = use_auth();
    let repo = login_repository();
    let caches = use_caches();

    create_action(move |_: &()| {
        let repo = repo.clone();
        let caches = caches.clone();
        async move {
            let result = logout(&repo, set_auth).await;
            caches.clear_all();
            result
        }
    })
}
