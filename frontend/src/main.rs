use shared::{AuthResponse, ClientConfig};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

mod components;
mod hooks;
mod page;
mod services;

use components::{
    Activities, ActivityDetail, Dashboard, ErrorPage, Favorites, Home, LoginForm, Navbar,
    PlaceDetailView, Profile, PublicProfileView, RegisterForm, TripDetail,
};
use hooks::use_session::use_session;
use page::Page;
use services::api::ApiClient;
use services::logging::Logger;

/// Compile-time overrides; an unusable API URL falls back to the defaults
fn client_config() -> ClientConfig {
    match ClientConfig::with_overrides(option_env!("TRAVELMAP_API_URL"), option_env!("TRAVELMAP_GEONAMES_USER")) {
        Ok(config) => config,
        Err(e) => {
            Logger::error_with_component("app", &format!("Ignoring TRAVELMAP_API_URL: {}", e));
            ClientConfig::default()
        }
    }
}

#[function_component(App)]
fn app() -> Html {
    let session = use_session();
    let page = use_state(|| Page::Home);
    let config = use_memo((), |_| client_config());

    let token = session.state.token();
    let api_client = use_memo(token, {
        let config = config.clone();
        move |token| ApiClient::new((*config).clone()).with_token(token.clone())
    });
    let api_client = (*api_client).clone();

    // Check backend connectivity once on startup
    use_effect_with((), {
        let api_client = api_client.clone();
        move |_| {
            spawn_local(async move {
                match api_client.ping().await {
                    Ok(()) => Logger::info_with_component("app", &format!("✅ Backend reachable at {}", api_client.config().api_base_url)),
                    Err(e) => Logger::warn_with_component("app", &format!("⚠️ Backend not reachable: {}", e)),
                }
            });
            || ()
        }
    });

    // Pick up the server-side avatar once per signed-in user, without surfacing errors
    let user_id = session.state.session.as_ref().map(|s| s.user.id);
    use_effect_with(user_id, {
        let api_client = api_client.clone();
        let update_avatar = session.actions.update_avatar.clone();
        move |user_id: &Option<i64>| {
            if user_id.is_some() {
                spawn_local(async move {
                    match api_client.get_profile_detail().await {
                        Ok(detail) => {
                            if let Some(path) = detail.avatar_path() {
                                update_avatar.emit(path.to_string());
                            }
                        }
                        Err(e) => Logger::debug_with_component("app", &format!("Avatar not loaded: {}", e)),
                    }
                });
            }
            || ()
        }
    });

    let on_navigate = {
        let page = page.clone();
        Callback::from(move |target: Page| {
            Logger::debug_with_component("app", &format!("Navigating to {:?}", target));
            page.set(target);
        })
    };

    let on_unauthorized = {
        let page = page.clone();
        let expire = session.actions.expire.clone();
        Callback::from(move |_: ()| {
            expire.emit(());
            page.set(Page::Login);
        })
    };

    let on_authenticated = {
        let page = page.clone();
        let sign_in = session.actions.sign_in.clone();
        Callback::from(move |response: AuthResponse| {
            sign_in.emit(response);
            page.set(Page::Home);
        })
    };

    let on_logout = {
        let page = page.clone();
        let logout = session.actions.logout.clone();
        Callback::from(move |_: ()| {
            logout.emit(());
            page.set(Page::Home);
        })
    };

    let user = session.state.session.as_ref().map(|s| s.user.clone());
    let current = if page.requires_auth() && user.is_none() {
        Page::Login
    } else {
        (*page).clone()
    };

    let content = match (&current, user.clone()) {
        (Page::Home, _) => html! {
            <Home api_client={api_client.clone()} on_navigate={on_navigate.clone()} />
        },
        (Page::Login, _) => html! {
            <LoginForm
                api_client={api_client.clone()}
                on_login={on_authenticated.clone()}
                on_navigate={on_navigate.clone()}
                session_expired={session.state.expired}
            />
        },
        (Page::Register, _) => html! {
            <RegisterForm api_client={api_client.clone()} on_register={on_authenticated.clone()} on_navigate={on_navigate.clone()} />
        },
        (Page::Dashboard, Some(_)) => html! {
            <Dashboard api_client={api_client.clone()} on_navigate={on_navigate.clone()} on_unauthorized={on_unauthorized.clone()} />
        },
        (Page::Activities, Some(user)) => html! {
            <Activities api_client={api_client.clone()} {user} on_navigate={on_navigate.clone()} on_unauthorized={on_unauthorized.clone()} />
        },
        (Page::ActivityDetail(id), user) => html! {
            <ActivityDetail
                api_client={api_client.clone()}
                activity_id={*id}
                {user}
                on_navigate={on_navigate.clone()}
                on_unauthorized={on_unauthorized.clone()}
            />
        },
        (Page::PlaceDetail(id), _) => html! {
            <PlaceDetailView
                api_client={api_client.clone()}
                place_id={*id}
                on_navigate={on_navigate.clone()}
                on_unauthorized={on_unauthorized.clone()}
            />
        },
        (Page::TripDetail(id), _) => html! {
            <TripDetail api_client={api_client.clone()} trip_id={*id} on_navigate={on_navigate.clone()} />
        },
        (Page::Favorites, Some(_)) => html! {
            <Favorites api_client={api_client.clone()} on_navigate={on_navigate.clone()} on_unauthorized={on_unauthorized.clone()} />
        },
        (Page::Profile, Some(user)) => html! {
            <Profile
                api_client={api_client.clone()}
                {user}
                on_navigate={on_navigate.clone()}
                on_unauthorized={on_unauthorized.clone()}
                on_avatar={session.actions.update_avatar.clone()}
            />
        },
        (Page::PublicProfile(id), _) => html! {
            <PublicProfileView api_client={api_client.clone()} user_id={*id} on_navigate={on_navigate.clone()} />
        },
        _ => html! { <ErrorPage code={404} on_navigate={on_navigate.clone()} /> },
    };

    html! {
        <div class="app">
            <Navbar
                user={user}
                theme={session.state.theme}
                current={current.clone()}
                media_root={config.media_root.clone()}
                on_navigate={on_navigate.clone()}
                on_logout={on_logout}
                on_toggle_theme={session.actions.toggle_theme.clone()}
            />
            <main class="container">
                {content}
            </main>
            <footer class="footer">
                <p>{"© TravelMap : carnet de voyages"}</p>
            </footer>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
